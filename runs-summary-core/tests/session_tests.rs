//! Session-level tests: load fixture sessions and mount the summary

use runs_summary_core::config::ResolvedConfig;
use runs_summary_core::html::render_html_page;
use runs_summary_core::session::load_session;
use runs_summary_core::{
    render_json, render_session, render_text, Direction, SummaryState, TeamTally,
};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join("sessions")
        .join(name)
}

#[test]
fn test_left_left_right_session() {
    let session = load_session(&fixture_path("left_left_right.json")).unwrap();
    let rendered = render_session(&session, &ResolvedConfig::defaults());

    assert_eq!(rendered.state, SummaryState::Rendered);
    assert_eq!(rendered.aggregate.run_count, 3);
    assert_eq!(
        rendered.aggregate.tally(Direction::Left),
        TeamTally {
            blue_team: 1,
            orange_team: 1,
            grey_team: 0,
            total: 2
        }
    );
    assert_eq!(
        rendered.aggregate.tally(Direction::Right),
        TeamTally {
            blue_team: 1,
            orange_team: 0,
            grey_team: 0,
            total: 1
        }
    );
    assert_eq!(rendered.aggregate.tally(Direction::Middle).total, 0);

    let container = rendered.document.element_by_id("runs-summary").unwrap();
    assert_eq!(
        container.children.last().unwrap().text.as_deref(),
        Some("Total Runs: 3 (Blue Team: 2, Orange Team: 1)")
    );
}

#[test]
fn test_empty_rows_leave_empty_container() {
    let session = load_session(&fixture_path("empty_rows.json")).unwrap();
    let rendered = render_session(&session, &ResolvedConfig::defaults());

    assert_eq!(rendered.state, SummaryState::Empty);
    let container = rendered
        .document
        .element_by_id("runs-summary")
        .expect("container should be mounted");
    assert!(container.is_empty());
}

#[test]
fn test_missing_play_type_field_never_mounts() {
    let session = load_session(&fixture_path("missing_play_type.json")).unwrap();
    let rendered = render_session(&session, &ResolvedConfig::defaults());

    assert_eq!(rendered.state, SummaryState::Uninitialized);
    assert!(rendered.document.element_by_id("runs-summary").is_none());
    // The page itself is untouched
    assert!(rendered.document.element_by_id("playing-area").is_some());
}

#[test]
fn test_missing_play_type_field_reports_nothing() {
    let session = load_session(&fixture_path("missing_play_type.json")).unwrap();
    let rendered = render_session(&session, &ResolvedConfig::defaults());

    assert_eq!(rendered.aggregate.run_count, 0);
    assert_eq!(render_text(&rendered.aggregate, &rendered.team_names), "");
    let json: serde_json::Value =
        serde_json::from_str(&render_json(&rendered.aggregate, &rendered.team_names)).unwrap();
    assert_eq!(json["run_count"], 0);
    assert_eq!(json["blue_total"], 0);
}

#[test]
fn test_missing_playing_area_is_silent() {
    let session = load_session(&fixture_path("no_playing_area.json")).unwrap();
    let rendered = render_session(&session, &ResolvedConfig::defaults());

    assert_eq!(rendered.state, SummaryState::Uninitialized);
    assert!(rendered.document.body.is_empty());
}

#[test]
fn test_mixed_session() {
    let session = load_session(&fixture_path("mixed.json")).unwrap();
    let rendered = render_session(&session, &ResolvedConfig::defaults());
    let agg = &rendered.aggregate;

    assert_eq!(agg.run_count, 7);
    // Row without a team is dropped from the Left tally
    assert_eq!(agg.tally(Direction::Left).total, 1);
    assert_eq!(
        agg.tally(Direction::Middle),
        TeamTally {
            blue_team: 1,
            orange_team: 2,
            grey_team: 1,
            total: 4
        }
    );
    assert_eq!(agg.tally(Direction::Right).total, 0);
    // Overall orange includes the unrecognized-direction run
    assert_eq!(agg.blue_total, 2);
    assert_eq!(agg.orange_total, 3);

    assert_eq!(rendered.team_names.blue, "Hawks");
    assert_eq!(rendered.team_names.orange, "Orange Team");

    // No legend anchor: the container is appended to the playing area
    let area = rendered.document.element_by_id("playing-area").unwrap();
    assert_eq!(area.children.last().unwrap().id.as_deref(), Some("runs-summary"));

    let container = rendered.document.element_by_id("runs-summary").unwrap();
    let heights: Vec<Vec<&str>> = container
        .find_all_by_class("bar")
        .iter()
        .map(|bar| {
            bar.children
                .iter()
                .filter_map(|s| s.get_style("height"))
                .collect()
        })
        .collect();
    assert_eq!(
        heights,
        vec![vec!["30px"], vec!["60px", "30px", "30px"], vec!["5px"]]
    );
    assert!(container
        .text_content()
        .contains("Total Runs: 7 (Hawks: 2, Orange Team: 3)"));
}

#[test]
fn test_html_page_for_session() {
    let session = load_session(&fixture_path("left_left_right.json")).unwrap();
    let rendered = render_session(&session, &ResolvedConfig::defaults());
    let html = render_html_page(&rendered.document, "Run Summary");

    assert!(html.contains("<h5 style=\"margin-bottom: 10px\">Run Summary</h5>"));
    assert!(html.contains("title=\"Blue Team: 1\""));
    assert!(html.contains("title=\"Orange Team: 1\""));
    assert!(html.contains("data-direction=\"Middle\""));
}

#[test]
fn test_render_is_deterministic() {
    let session = load_session(&fixture_path("mixed.json")).unwrap();
    let first = render_session(&session, &ResolvedConfig::defaults());
    let second = render_session(&session, &ResolvedConfig::defaults());

    assert_eq!(first.document.to_html(), second.document.to_html());
    assert_eq!(
        render_json(&first.aggregate, &first.team_names),
        render_json(&second.aggregate, &second.team_names)
    );
}

#[test]
fn test_missing_session_file_reports_path() {
    let err = load_session(&fixture_path("does_not_exist.json")).unwrap_err();
    assert!(format!("{:#}", err).contains("does_not_exist.json"));
}
