//! Text and JSON output for run aggregates
//!
//! Global invariants enforced:
//! - Directions always appear in display order
//! - Byte-for-byte identical output for identical input

use crate::aggregate::RunAggregate;
use crate::render::{bar_segments, totals_line, SUMMARY_TITLE};
use crate::row::{Direction, TeamColor};
use crate::teams::TeamNames;
use serde::{Deserialize, Serialize};

/// Width of the widest text bar, in characters
const TEXT_BAR_WIDTH: usize = 24;

/// Serializable summary of one aggregate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct SummaryReport {
    pub team_names: TeamNames,
    pub run_count: usize,
    pub blue_total: usize,
    pub orange_total: usize,
    /// Summed from the per-direction tallies, unlike blue/orange totals
    pub grey_total: usize,
    pub max_direction_total: usize,
    pub directions: Vec<DirectionReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct DirectionReport {
    pub direction: Direction,
    pub blue_team: usize,
    pub orange_team: usize,
    pub grey_team: usize,
    pub total: usize,
    /// Drawn bar length in display units (placeholder length when empty)
    pub bar_length: f64,
}

impl SummaryReport {
    pub fn new(aggregate: &RunAggregate, names: &TeamNames) -> Self {
        let max = aggregate.max_direction_total();
        let directions = Direction::ALL
            .iter()
            .map(|d| {
                let tally = aggregate.tally(*d);
                DirectionReport {
                    direction: *d,
                    blue_team: tally.blue_team,
                    orange_team: tally.orange_team,
                    grey_team: tally.grey_team,
                    total: tally.total,
                    bar_length: bar_segments(&tally, max).iter().map(|s| s.length).sum(),
                }
            })
            .collect();

        SummaryReport {
            team_names: names.clone(),
            run_count: aggregate.run_count,
            blue_total: aggregate.blue_total,
            orange_total: aggregate.orange_total,
            grey_total: aggregate.grey_total(),
            max_direction_total: max,
            directions,
        }
    }
}

/// Render an aggregate as a plain-text table
///
/// Empty when there are no runs, matching the rendered view.
pub fn render_text(aggregate: &RunAggregate, names: &TeamNames) -> String {
    let mut output = String::new();
    if aggregate.is_empty() {
        return output;
    }

    output.push_str(SUMMARY_TITLE);
    output.push('\n');
    output.push_str(&format!(
        "{:<10} {} {} {} {:<6} {}\n",
        "DIRECTION",
        truncate_or_pad(names.name(TeamColor::Blue), 12),
        truncate_or_pad(names.name(TeamColor::Orange), 12),
        truncate_or_pad(names.name(TeamColor::Grey), 12),
        "TOTAL",
        "BAR"
    ));

    let max = aggregate.max_direction_total();
    for direction in Direction::ALL {
        let tally = aggregate.tally(direction);
        let bar_len = (tally.total * TEXT_BAR_WIDTH + max / 2) / max;
        let bar = if tally.total == 0 {
            ".".to_string()
        } else {
            "#".repeat(bar_len.max(1))
        };
        output.push_str(&format!(
            "{:<10} {:<12} {:<12} {:<12} {:<6} {}\n",
            direction.as_str(),
            tally.blue_team,
            tally.orange_team,
            tally.grey_team,
            tally.total,
            bar
        ));
    }

    output.push_str(&totals_line(aggregate, names));
    output.push('\n');
    output
}

/// Render an aggregate as pretty JSON
pub fn render_json(aggregate: &RunAggregate, names: &TeamNames) -> String {
    let report = SummaryReport::new(aggregate, names);
    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
}

/// Truncate or pad string to fixed width (in characters)
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        format!("{:<width$}", s, width = width)
    }
}
