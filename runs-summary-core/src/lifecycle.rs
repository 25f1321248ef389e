//! Mounting and re-rendering the run summary
//!
//! `set_up` runs once when the page is ready; `update` runs after every change
//! to rows, filters or team names. Both are silent no-ops when the page lacks
//! the anchors they need.

use crate::aggregate::aggregate;
use crate::render::render_summary;
use crate::row::Row;
use crate::schema::{should_show_summary, FieldSchema};
use crate::teams::{resolve_team_names, TeamNameControls, TeamNameSource};
use crate::view::{Document, Element};

pub const DEFAULT_PLAYING_AREA_ID: &str = "playing-area";
pub const DEFAULT_LEGEND_ID: &str = "legend";
pub const DEFAULT_CONTAINER_ID: &str = "runs-summary";

/// Supplies the row set currently visible after filtering
pub trait RowSource {
    fn filtered_rows(&self) -> Vec<Row>;
}

impl RowSource for Vec<Row> {
    fn filtered_rows(&self) -> Vec<Row> {
        self.clone()
    }
}

/// Supplies the active custom field configuration
pub trait SchemaSource {
    fn field_schema(&self) -> FieldSchema;
}

impl SchemaSource for FieldSchema {
    fn field_schema(&self) -> FieldSchema {
        self.clone()
    }
}

/// Element ids the summary mounts against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchors {
    /// Root the summary is inserted into
    pub playing_area: String,
    /// Sibling the summary is inserted in front of
    pub legend: String,
    /// Id given to the summary's own container
    pub container: String,
}

impl Default for Anchors {
    fn default() -> Self {
        Anchors {
            playing_area: DEFAULT_PLAYING_AREA_ID.to_string(),
            legend: DEFAULT_LEGEND_ID.to_string(),
            container: DEFAULT_CONTAINER_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryState {
    /// Not mounted: never set up, gated off, or the container disappeared
    Uninitialized,
    /// Container inserted, nothing rendered yet
    Mounted,
    /// Container holds a summary
    Rendered,
    /// Container is present but empty (no runs)
    Empty,
}

/// Owns the summary's place in the page
#[derive(Debug, Clone)]
pub struct RunsSummary {
    anchors: Anchors,
    team_controls: TeamNameControls,
    state: SummaryState,
}

impl Default for RunsSummary {
    fn default() -> Self {
        Self::new(Anchors::default(), TeamNameControls::default())
    }
}

impl RunsSummary {
    pub fn new(anchors: Anchors, team_controls: TeamNameControls) -> Self {
        RunsSummary {
            anchors,
            team_controls,
            state: SummaryState::Uninitialized,
        }
    }

    pub fn state(&self) -> SummaryState {
        self.state
    }

    pub fn anchors(&self) -> &Anchors {
        &self.anchors
    }

    /// Mount the summary container and render it once
    ///
    /// Does nothing if the playing area is missing or the schema lacks the
    /// direction or play-type field. Calling it again after a successful
    /// mount only re-renders.
    pub fn set_up(
        &mut self,
        doc: &mut Document,
        schema: &dyn SchemaSource,
        rows: &dyn RowSource,
        names: &dyn TeamNameSource,
    ) -> SummaryState {
        if doc.element_by_id(&self.anchors.playing_area).is_none() {
            tracing::debug!(anchor = %self.anchors.playing_area, "playing area absent, summary not mounted");
            return self.state;
        }
        if !should_show_summary(&schema.field_schema()) {
            tracing::debug!("direction or play-type field not configured, summary not mounted");
            return self.state;
        }

        if doc.element_by_id(&self.anchors.container).is_none() {
            let container = Element::new("div")
                .with_id(&self.anchors.container)
                .with_class("center")
                .style("margin-top", "20px");
            if let Some(area) = doc.element_by_id_mut(&self.anchors.playing_area) {
                area.insert_before(container, &self.anchors.legend);
            }
        }
        self.state = SummaryState::Mounted;

        self.update(doc, rows, names)
    }

    /// Rebuild the summary from the current rows and team names
    ///
    /// Does nothing if the container is not in the page.
    pub fn update(
        &mut self,
        doc: &mut Document,
        rows: &dyn RowSource,
        names: &dyn TeamNameSource,
    ) -> SummaryState {
        let Some(container) = doc.element_by_id_mut(&self.anchors.container) else {
            self.state = SummaryState::Uninitialized;
            return self.state;
        };

        let aggregate = aggregate(&rows.filtered_rows());
        let team_names = resolve_team_names(names, &self.team_controls);
        render_summary(container, &aggregate, &team_names);

        self.state = if aggregate.is_empty() {
            SummaryState::Empty
        } else {
            SummaryState::Rendered
        };
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn page(with_legend: bool) -> Document {
        let mut doc = Document::new();
        let area = doc
            .body
            .append(Element::new("div").with_id(DEFAULT_PLAYING_AREA_ID));
        area.append(Element::new("svg").with_id("field"));
        if with_legend {
            area.append(Element::new("div").with_id(DEFAULT_LEGEND_ID));
        }
        doc
    }

    fn full_schema() -> FieldSchema {
        FieldSchema::from_ids(["direction", "play-type"])
    }

    fn run(direction: &str, team: &str) -> Row {
        Row::new([("play-type", "Run"), ("direction", direction)], Some(team))
    }

    fn no_rows() -> Vec<Row> {
        Vec::new()
    }

    fn no_names() -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    #[test]
    fn test_set_up_inserts_before_legend() {
        let mut doc = page(true);
        let mut summary = RunsSummary::default();
        let state = summary.set_up(
            &mut doc,
            &full_schema(),
            &vec![run("Left", "blueTeam")],
            &no_names(),
        );
        assert_eq!(state, SummaryState::Rendered);

        let area = doc.element_by_id(DEFAULT_PLAYING_AREA_ID).unwrap();
        let ids: Vec<&str> = area.children.iter().filter_map(|c| c.id.as_deref()).collect();
        assert_eq!(ids, vec!["field", "runs-summary", "legend"]);

        let container = doc.element_by_id(DEFAULT_CONTAINER_ID).unwrap();
        assert!(container.has_class("center"));
        assert_eq!(container.get_style("margin-top"), Some("20px"));
    }

    #[test]
    fn test_set_up_without_playing_area_is_noop() {
        let mut doc = Document::new();
        let mut summary = RunsSummary::default();
        let state = summary.set_up(&mut doc, &full_schema(), &no_rows(), &no_names());
        assert_eq!(state, SummaryState::Uninitialized);
        assert!(doc.body.is_empty());
    }

    #[test]
    fn test_set_up_gated_by_schema() {
        let mut doc = page(true);
        let before = doc.clone();
        let mut summary = RunsSummary::default();
        let rows = vec![run("Left", "blueTeam")];

        let state = summary.set_up(
            &mut doc,
            &FieldSchema::from_ids(["direction"]),
            &rows,
            &no_names(),
        );
        assert_eq!(state, SummaryState::Uninitialized);
        assert_eq!(doc, before);

        // Update stays inert without a container
        assert_eq!(
            summary.update(&mut doc, &rows, &no_names()),
            SummaryState::Uninitialized
        );
        assert_eq!(doc, before);
    }

    #[test]
    fn test_update_transitions_between_rendered_and_empty() {
        let mut doc = page(true);
        let mut summary = RunsSummary::default();
        let state = summary.set_up(&mut doc, &full_schema(), &no_rows(), &no_names());
        assert_eq!(state, SummaryState::Empty);
        assert!(doc.element_by_id(DEFAULT_CONTAINER_ID).unwrap().is_empty());

        let rows = vec![run("Middle", "orangeTeam")];
        assert_eq!(
            summary.update(&mut doc, &rows, &no_names()),
            SummaryState::Rendered
        );
        assert!(!doc.element_by_id(DEFAULT_CONTAINER_ID).unwrap().is_empty());

        assert_eq!(
            summary.update(&mut doc, &no_rows(), &no_names()),
            SummaryState::Empty
        );
        assert!(doc.element_by_id(DEFAULT_CONTAINER_ID).unwrap().is_empty());
    }

    #[test]
    fn test_repeated_set_up_mounts_once() {
        let mut doc = page(true);
        let mut summary = RunsSummary::default();
        let rows = vec![run("Left", "blueTeam")];
        summary.set_up(&mut doc, &full_schema(), &rows, &no_names());
        summary.set_up(&mut doc, &full_schema(), &rows, &no_names());

        let area = doc.element_by_id(DEFAULT_PLAYING_AREA_ID).unwrap();
        let mounted = area
            .children
            .iter()
            .filter(|c| c.id.as_deref() == Some(DEFAULT_CONTAINER_ID))
            .count();
        assert_eq!(mounted, 1);
    }

    #[test]
    fn test_missing_legend_appends_container() {
        let mut doc = page(false);
        let mut summary = RunsSummary::default();
        summary.set_up(&mut doc, &full_schema(), &no_rows(), &no_names());
        let area = doc.element_by_id(DEFAULT_PLAYING_AREA_ID).unwrap();
        assert_eq!(area.children.last().unwrap().id.as_deref(), Some(DEFAULT_CONTAINER_ID));
    }

    #[test]
    fn test_update_picks_up_team_name_changes() {
        let mut doc = page(true);
        let mut summary = RunsSummary::default();
        let rows = vec![run("Left", "blueTeam")];
        summary.set_up(&mut doc, &full_schema(), &rows, &no_names());

        let mut names = BTreeMap::new();
        names.insert("blue-team-name".to_string(), "Hawks".to_string());
        summary.update(&mut doc, &rows, &names);

        let container = doc.element_by_id(DEFAULT_CONTAINER_ID).unwrap();
        assert!(container.text_content().contains("Hawks: 1"));
    }

    #[test]
    fn test_container_removed_resets_state() {
        let mut doc = page(true);
        let mut summary = RunsSummary::default();
        summary.set_up(&mut doc, &full_schema(), &no_rows(), &no_names());
        doc.body.clear();
        assert_eq!(
            summary.update(&mut doc, &no_rows(), &no_names()),
            SummaryState::Uninitialized
        );
    }
}
