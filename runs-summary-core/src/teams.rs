//! Team display names
//!
//! Names come from two editable UI controls owned elsewhere. Empty or
//! missing values fall back to fixed defaults.

use crate::row::TeamColor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_BLUE_TEAM_NAME: &str = "Blue Team";
pub const DEFAULT_ORANGE_TEAM_NAME: &str = "Orange Team";
/// The grey team is never renamed
pub const GREY_TEAM_NAME: &str = "Grey Team";

pub const DEFAULT_BLUE_CONTROL: &str = "blue-team-name";
pub const DEFAULT_ORANGE_CONTROL: &str = "orange-team-name";

/// Read access to the current value of a named UI control
pub trait TeamNameSource {
    fn control_value(&self, control_id: &str) -> Option<String>;
}

impl TeamNameSource for BTreeMap<String, String> {
    fn control_value(&self, control_id: &str) -> Option<String> {
        self.get(control_id).cloned()
    }
}

/// Which controls hold the team names, and the names used when they are empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamNameControls {
    pub blue_control: String,
    pub orange_control: String,
    pub blue_default: String,
    pub orange_default: String,
}

impl Default for TeamNameControls {
    fn default() -> Self {
        TeamNameControls {
            blue_control: DEFAULT_BLUE_CONTROL.to_string(),
            orange_control: DEFAULT_ORANGE_CONTROL.to_string(),
            blue_default: DEFAULT_BLUE_TEAM_NAME.to_string(),
            orange_default: DEFAULT_ORANGE_TEAM_NAME.to_string(),
        }
    }
}

/// Resolved display names for the two named teams
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamNames {
    pub blue: String,
    pub orange: String,
}

impl Default for TeamNames {
    fn default() -> Self {
        TeamNames {
            blue: DEFAULT_BLUE_TEAM_NAME.to_string(),
            orange: DEFAULT_ORANGE_TEAM_NAME.to_string(),
        }
    }
}

impl TeamNames {
    pub fn name(&self, team: TeamColor) -> &str {
        match team {
            TeamColor::Blue => &self.blue,
            TeamColor::Orange => &self.orange,
            TeamColor::Grey => GREY_TEAM_NAME,
        }
    }
}

/// Read both team-name controls, falling back to defaults for blank values
pub fn resolve_team_names(source: &dyn TeamNameSource, controls: &TeamNameControls) -> TeamNames {
    TeamNames {
        blue: non_blank(source.control_value(&controls.blue_control))
            .unwrap_or_else(|| controls.blue_default.clone()),
        orange: non_blank(source.control_value(&controls.orange_control))
            .unwrap_or_else(|| controls.orange_default.clone()),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
