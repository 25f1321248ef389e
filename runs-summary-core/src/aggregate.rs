//! Run aggregation - per-direction, per-team tallies
//!
//! Global invariants enforced:
//! - Aggregates are strictly derived (recomputed per render, never stored)
//! - Only rows whose play type is exactly "Run" are counted
//! - Every direction is present in the result, zero-filled when empty
//! - Input rows are never modified

use crate::row::{Direction, Row, TeamColor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts of runs in one direction, split by team
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TeamTally {
    pub blue_team: usize,
    pub orange_team: usize,
    pub grey_team: usize,
    pub total: usize,
}

impl TeamTally {
    pub fn count(&self, team: TeamColor) -> usize {
        match team {
            TeamColor::Blue => self.blue_team,
            TeamColor::Orange => self.orange_team,
            TeamColor::Grey => self.grey_team,
        }
    }

    fn record(&mut self, team: TeamColor) {
        match team {
            TeamColor::Blue => self.blue_team += 1,
            TeamColor::Orange => self.orange_team += 1,
            TeamColor::Grey => self.grey_team += 1,
        }
        self.total += 1;
    }
}

/// Aggregated view of the run plays in a row set
///
/// `blue_total` and `orange_total` count every run with that team color,
/// whatever its direction. They are computed separately from
/// `per_direction`, so they exceed the per-direction sums whenever a run
/// carries a valid team but an unrecognized direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunAggregate {
    pub per_direction: BTreeMap<Direction, TeamTally>,
    pub run_count: usize,
    pub blue_total: usize,
    pub orange_total: usize,
}

impl RunAggregate {
    /// Tally for a direction (zero tally if somehow absent)
    pub fn tally(&self, direction: Direction) -> TeamTally {
        self.per_direction
            .get(&direction)
            .copied()
            .unwrap_or_default()
    }

    /// Largest direction total, floored at 1 so it can be used as a divisor
    pub fn max_direction_total(&self) -> usize {
        Direction::ALL
            .iter()
            .map(|d| self.tally(*d).total)
            .max()
            .unwrap_or(0)
            .max(1)
    }

    /// Grey runs across the three known directions
    ///
    /// Unlike the blue and orange totals this is summed from the
    /// per-direction tallies, so it never includes runs with an
    /// unrecognized direction.
    pub fn grey_total(&self) -> usize {
        Direction::ALL.iter().map(|d| self.tally(*d).grey_team).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.run_count == 0
    }
}

/// Aggregate the run plays in `rows`
pub fn aggregate(rows: &[Row]) -> RunAggregate {
    let runs: Vec<&Row> = rows.iter().filter(|r| r.is_run()).collect();

    let mut per_direction: BTreeMap<Direction, TeamTally> = Direction::ALL
        .iter()
        .map(|d| (*d, TeamTally::default()))
        .collect();

    let mut skipped = 0usize;
    for run in &runs {
        match (run.direction(), run.team()) {
            (Some(direction), Some(team)) => {
                per_direction.entry(direction).or_default().record(team);
            }
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::trace!(skipped, "runs excluded from per-direction tallies");
    }

    // Overall team totals ignore direction validity
    let blue_total = runs
        .iter()
        .filter(|r| r.team() == Some(TeamColor::Blue))
        .count();
    let orange_total = runs
        .iter()
        .filter(|r| r.team() == Some(TeamColor::Orange))
        .count();

    RunAggregate {
        per_direction,
        run_count: runs.len(),
        blue_total,
        orange_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(direction: &str, team: Option<&str>) -> Row {
        Row::new([("play-type", "Run"), ("direction", direction)], team)
    }

    #[test]
    fn test_left_left_right_scenario() {
        let rows = vec![
            run("Left", Some("blueTeam")),
            run("Left", Some("orangeTeam")),
            run("Right", Some("blueTeam")),
        ];

        let agg = aggregate(&rows);
        assert_eq!(agg.run_count, 3);
        assert_eq!(
            agg.tally(Direction::Left),
            TeamTally {
                blue_team: 1,
                orange_team: 1,
                grey_team: 0,
                total: 2
            }
        );
        assert_eq!(
            agg.tally(Direction::Right),
            TeamTally {
                blue_team: 1,
                orange_team: 0,
                grey_team: 0,
                total: 1
            }
        );
        assert_eq!(agg.tally(Direction::Middle).total, 0);
        assert_eq!(agg.blue_total, 2);
        assert_eq!(agg.orange_total, 1);
        assert_eq!(agg.max_direction_total(), 2);
    }

    #[test]
    fn test_non_runs_ignored() {
        let rows = vec![
            Row::new([("play-type", "Pass"), ("direction", "Left")], Some("blueTeam")),
            Row::new([("play-type", "run"), ("direction", "Left")], Some("blueTeam")),
            Row::new([("direction", "Left")], Some("blueTeam")),
        ];
        let agg = aggregate(&rows);
        assert_eq!(agg.run_count, 0);
        assert!(agg.is_empty());
        assert_eq!(agg.blue_total, 0);
        assert_eq!(agg.per_direction.len(), 3);
        assert_eq!(agg.max_direction_total(), 1);
    }

    #[test]
    fn test_missing_team_excluded_from_direction_but_counted() {
        let agg = aggregate(&[run("Left", None)]);
        assert_eq!(agg.run_count, 1);
        assert_eq!(agg.tally(Direction::Left), TeamTally::default());
    }

    #[test]
    fn test_unknown_direction_diverges_from_overall_totals() {
        let rows = vec![
            run("Backwards", Some("blueTeam")),
            run("Middle", Some("blueTeam")),
            run("Middle", Some("greyTeam")),
        ];
        let agg = aggregate(&rows);
        assert_eq!(agg.run_count, 3);
        // Overall blue counts the unknown-direction run
        assert_eq!(agg.blue_total, 2);
        let blue_by_direction: usize = Direction::ALL
            .iter()
            .map(|d| agg.tally(*d).blue_team)
            .sum();
        assert_eq!(blue_by_direction, 1);
        assert_eq!(agg.grey_total(), 1);
        assert_eq!(agg.tally(Direction::Middle).total, 2);
    }

    #[test]
    fn test_unknown_team_excluded_everywhere() {
        let agg = aggregate(&[run("Right", Some("purpleTeam"))]);
        assert_eq!(agg.run_count, 1);
        assert_eq!(agg.tally(Direction::Right).total, 0);
        assert_eq!(agg.blue_total + agg.orange_total, 0);
    }

    #[test]
    fn test_total_is_sum_of_teams() {
        let rows = vec![
            run("Left", Some("greyTeam")),
            run("Left", Some("orangeTeam")),
            run("Left", Some("orangeTeam")),
            run("Right", Some("blueTeam")),
            run("Middle", Some("greyTeam")),
        ];
        let agg = aggregate(&rows);
        for d in Direction::ALL {
            let t = agg.tally(d);
            assert_eq!(t.total, t.blue_team + t.orange_team + t.grey_team);
        }
        assert_eq!(agg.max_direction_total(), 3);
    }

    #[test]
    fn test_deterministic() {
        let rows = vec![run("Left", Some("blueTeam")), run("Middle", Some("orangeTeam"))];
        assert_eq!(aggregate(&rows), aggregate(&rows));
    }
}
