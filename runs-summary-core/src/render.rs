//! Run summary rendering
//!
//! Draws the title, legend, one stacked bar per direction and the totals line
//! into a container element. Every call clears the container first; there is
//! no incremental patching.

use crate::aggregate::{RunAggregate, TeamTally};
use crate::row::{Direction, TeamColor};
use crate::teams::TeamNames;
use crate::view::Element;

pub const SUMMARY_TITLE: &str = "Run Summary";

/// Bar length, in display units, of the direction with the most runs
pub const MAX_BAR_LENGTH: f64 = 120.0;

/// Length of the stand-in segment drawn for a direction with no runs
pub const PLACEHOLDER_LENGTH: f64 = 5.0;

pub const BAR_WIDTH: f64 = 80.0;

/// Smallest drawn length of a segment with runs; anything shorter would be
/// written as `0px`
pub const MIN_SEGMENT_LENGTH: f64 = 0.01;

const PLACEHOLDER_COLOR: &str = "#dee2e6";
const ROUNDED_TOP: &str = "4px 4px 0 0";

/// Teams shown in the legend, in order
const LEGEND_TEAMS: [TeamColor; 2] = [TeamColor::Blue, TeamColor::Orange];

/// One stacked piece of a bar
#[derive(Debug, Clone, PartialEq)]
pub struct BarSegment {
    /// `None` for the empty-direction placeholder
    pub team: Option<TeamColor>,
    pub count: usize,
    pub length: f64,
    /// Only the topmost segment of a bar gets a rounded leading edge
    pub rounded: bool,
}

impl BarSegment {
    pub fn is_placeholder(&self) -> bool {
        self.team.is_none()
    }
}

/// Segments for one direction's bar, top to bottom
///
/// Each team's length is `count / max_count * MAX_BAR_LENGTH`; teams with no
/// runs get no segment. A direction with no runs gets a single placeholder.
pub fn bar_segments(tally: &TeamTally, max_count: usize) -> Vec<BarSegment> {
    if tally.total == 0 {
        return vec![BarSegment {
            team: None,
            count: 0,
            length: PLACEHOLDER_LENGTH,
            rounded: true,
        }];
    }

    let max_count = max_count.max(1) as f64;
    let mut segments: Vec<BarSegment> = TeamColor::STACK_ORDER
        .iter()
        .filter_map(|team| {
            let count = tally.count(*team);
            (count > 0).then(|| BarSegment {
                team: Some(*team),
                count,
                length: count as f64 / max_count * MAX_BAR_LENGTH,
                rounded: false,
            })
        })
        .collect();
    if let Some(top) = segments.first_mut() {
        top.rounded = true;
    }
    segments
}

/// Replace the contents of `container` with the run summary
///
/// Leaves the container empty when there are no runs.
pub fn render_summary(container: &mut Element, aggregate: &RunAggregate, names: &TeamNames) {
    container.clear();

    if aggregate.is_empty() {
        tracing::debug!("no runs in filtered rows, summary cleared");
        return;
    }

    container.append(
        Element::new("h5")
            .style("margin-bottom", "10px")
            .text(SUMMARY_TITLE),
    );
    container.append(render_legend(names));

    let max_count = aggregate.max_direction_total();
    let viz = container.append(
        Element::new("div")
            .with_class("runs-viz")
            .style("display", "flex")
            .style("justify-content", "center")
            .style("align-items", "flex-end")
            .style("gap", "30px")
            .style("padding", "20px")
            .style("background-color", "#f8f9fa")
            .style("border-radius", "8px")
            .style("max-width", "600px")
            .style("margin", "0 auto"),
    );
    for direction in Direction::ALL {
        viz.append(render_bar_group(
            direction,
            &aggregate.tally(direction),
            max_count,
            names,
        ));
    }

    container.append(
        Element::new("div")
            .with_class("runs-total")
            .style("margin-top", "15px")
            .style("font-size", "14px")
            .style("color", "#666")
            .text(totals_line(aggregate, names)),
    );

    tracing::debug!(
        run_count = aggregate.run_count,
        max_count,
        "rendered run summary"
    );
}

/// Trailing text line: overall run count with the blue/orange breakdown
pub fn totals_line(aggregate: &RunAggregate, names: &TeamNames) -> String {
    format!(
        "Total Runs: {} ({}: {}, {}: {})",
        aggregate.run_count, names.blue, aggregate.blue_total, names.orange, aggregate.orange_total
    )
}

fn render_legend(names: &TeamNames) -> Element {
    let mut legend = Element::new("div")
        .with_class("runs-legend")
        .style("display", "flex")
        .style("justify-content", "center")
        .style("gap", "20px")
        .style("margin-bottom", "10px");

    for team in LEGEND_TEAMS {
        legend.append(
            Element::new("div")
                .with_class("legend-entry")
                .style("display", "flex")
                .style("align-items", "center")
                .style("gap", "6px")
                .child(
                    Element::new("span")
                        .with_class("legend-swatch")
                        .style("display", "inline-block")
                        .style("width", "14px")
                        .style("height", "14px")
                        .style("border-radius", "3px")
                        .style("background-color", team.hex()),
                )
                .child(
                    Element::new("span")
                        .with_class("legend-label")
                        .style("font-size", "14px")
                        .style("color", "#333")
                        .text(names.name(team)),
                ),
        );
    }
    legend
}

fn render_bar_group(
    direction: Direction,
    tally: &TeamTally,
    max_count: usize,
    names: &TeamNames,
) -> Element {
    let mut bar = Element::new("div")
        .with_class("bar")
        .style("display", "flex")
        .style("flex-direction", "column")
        .style("width", px(BAR_WIDTH));

    for segment in bar_segments(tally, max_count) {
        let mut el = Element::new("div")
            .style("width", px(BAR_WIDTH))
            .style("height", px(segment.length.max(MIN_SEGMENT_LENGTH)))
            .style("transition", "height 0.3s ease");
        el = match segment.team {
            Some(team) => el
                .with_class("bar-segment")
                .attr("data-team", team.as_str())
                .attr("title", format!("{}: {}", names.name(team), segment.count))
                .style("background-color", team.hex()),
            None => el
                .with_class("bar-segment bar-placeholder")
                .style("background-color", PLACEHOLDER_COLOR),
        };
        if segment.rounded {
            el.set_style("border-radius", ROUNDED_TOP);
        }
        bar.append(el);
    }

    Element::new("div")
        .with_class("bar-group")
        .attr("data-direction", direction.as_str())
        .style("display", "flex")
        .style("flex-direction", "column")
        .style("align-items", "center")
        .style("gap", "8px")
        .child(
            Element::new("div")
                .with_class("bar-count")
                .style("font-weight", "bold")
                .style("font-size", "18px")
                .style("color", "#333")
                .text(tally.total.to_string()),
        )
        .child(bar)
        .child(
            Element::new("div")
                .with_class("bar-label")
                .style("font-weight", "500")
                .style("font-size", "14px")
                .style("color", "#666")
                .text(direction.as_str()),
        )
}

/// Format a length as CSS pixels with at most two decimals
pub fn px(length: f64) -> String {
    let s = format!("{:.2}", length);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    format!("{}px", s)
}
