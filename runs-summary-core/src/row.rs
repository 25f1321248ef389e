//! Play rows and the fixed categories they are classified into
//!
//! Rows are owned by the row-storage collaborator; this crate only reads them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field id holding the play classification ("Run", "Pass", ...)
pub const PLAY_TYPE_FIELD: &str = "play-type";

/// Field id holding the run direction
pub const DIRECTION_FIELD: &str = "direction";

/// Play-type value that marks a row as a run
pub const RUN_PLAY_TYPE: &str = "Run";

/// One recorded play event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Generic field values keyed by field id
    #[serde(default)]
    pub row_data: BTreeMap<String, serde_json::Value>,
    /// Auxiliary attributes outside the generic field schema
    #[serde(default)]
    pub special_data: SpecialData,
}

/// Auxiliary row attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialData {
    /// Raw team color ("blueTeam", "orangeTeam", "greyTeam"); kept as-is so
    /// unrecognized values stay visible to callers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_color: Option<String>,
}

impl Row {
    /// Build a row from string field values and an optional team color
    pub fn new<'a>(
        fields: impl IntoIterator<Item = (&'a str, &'a str)>,
        team_color: Option<&str>,
    ) -> Self {
        Row {
            row_data: fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
                .collect(),
            special_data: SpecialData {
                team_color: team_color.map(str::to_string),
            },
        }
    }

    /// String value of a field, `None` when absent or not a string
    pub fn field(&self, id: &str) -> Option<&str> {
        self.row_data.get(id).and_then(|v| v.as_str())
    }

    pub fn is_run(&self) -> bool {
        self.field(PLAY_TYPE_FIELD) == Some(RUN_PLAY_TYPE)
    }

    /// Parsed run direction, `None` for missing or unrecognized values
    pub fn direction(&self) -> Option<Direction> {
        self.field(DIRECTION_FIELD).and_then(Direction::parse)
    }

    /// Parsed team category, `None` for missing, empty, or unrecognized values
    pub fn team(&self) -> Option<TeamColor> {
        self.special_data
            .team_color
            .as_deref()
            .and_then(TeamColor::parse)
    }
}

/// Run direction, declared in left-to-right display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Middle,
    Right,
}

impl Direction {
    /// All directions in display order
    pub const ALL: [Direction; 3] = [Direction::Left, Direction::Middle, Direction::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "Left",
            Direction::Middle => "Middle",
            Direction::Right => "Right",
        }
    }

    /// Exact, case-sensitive match against the recorded field values
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Left" => Some(Direction::Left),
            "Middle" => Some(Direction::Middle),
            "Right" => Some(Direction::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Team category a play is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TeamColor {
    #[serde(rename = "blueTeam")]
    Blue,
    #[serde(rename = "orangeTeam")]
    Orange,
    #[serde(rename = "greyTeam")]
    Grey,
}

impl TeamColor {
    /// Stacking order inside a bar, top to bottom
    pub const STACK_ORDER: [TeamColor; 3] = [TeamColor::Orange, TeamColor::Grey, TeamColor::Blue];

    /// Wire name stored in `specialData.teamColor`
    pub fn as_str(self) -> &'static str {
        match self {
            TeamColor::Blue => "blueTeam",
            TeamColor::Orange => "orangeTeam",
            TeamColor::Grey => "greyTeam",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "blueTeam" => Some(TeamColor::Blue),
            "orangeTeam" => Some(TeamColor::Orange),
            "greyTeam" => Some(TeamColor::Grey),
            _ => None,
        }
    }

    /// Fixed swatch color, shared by legend entries and bar segments
    pub fn hex(self) -> &'static str {
        match self {
            TeamColor::Blue => "#35aba9",
            TeamColor::Orange => "#ea8e48",
            TeamColor::Grey => "#aaaaaa",
        }
    }
}
