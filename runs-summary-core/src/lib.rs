//! Runs summary core library - tallies run plays by direction and team and
//! renders them as stacked bars

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Aggregates are recomputed on every render, never stored
// - Collaborator state (rows, schema, control values) is read, never written
// - Every render fully replaces the summary subtree
// - No randomness, clocks, threads, or async
// - Identical input yields byte-for-byte identical output

pub mod aggregate;
pub mod config;
pub mod html;
pub mod lifecycle;
pub mod render;
pub mod report;
pub mod row;
pub mod schema;
pub mod session;
pub mod teams;
pub mod view;

pub use aggregate::{aggregate, RunAggregate, TeamTally};
pub use config::ResolvedConfig;
pub use lifecycle::{RunsSummary, SummaryState};
pub use report::{render_json, render_text};
pub use row::{Direction, Row, TeamColor};
pub use session::Session;
pub use teams::TeamNames;
pub use view::{Document, Element};

/// Everything produced by mounting the summary for one session
pub struct SessionRender {
    pub document: Document,
    pub state: SummaryState,
    pub aggregate: RunAggregate,
    pub team_names: TeamNames,
}

/// Build the session's page, run set-up against it, and collect the results
///
/// When the summary could not be mounted the aggregate is empty, so every
/// output derived from it agrees with the page.
pub fn render_session(session: &Session, config: &ResolvedConfig) -> SessionRender {
    let mut summary = RunsSummary::new(config.anchors.clone(), config.team_names.clone());
    let mut document = session.build_document(&config.anchors);
    let state = summary.set_up(&mut document, session, session, session);

    let aggregate = match state {
        SummaryState::Uninitialized => aggregate(&[]),
        _ => aggregate(&session.rows),
    };

    SessionRender {
        document,
        state,
        aggregate,
        team_names: teams::resolve_team_names(session, &config.team_names),
    }
}
