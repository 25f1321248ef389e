//! Configuration file support for the run summary
//!
//! Loads optional settings from JSON files.
//!
//! An explicit `--config` path wins. Otherwise the nearest
//! `.runssummaryrc.json` or `runs-summary.config.json` is used, searching
//! from the session's directory upwards. The search stops after the first
//! directory containing `.git`, so a config outside the repository holding
//! the sessions is never picked up.
//!
//! All fields are optional; anything left out keeps its default.

use crate::lifecycle::Anchors;
use crate::teams::TeamNameControls;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Run summary configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunsSummaryConfig {
    /// Names shown when the team-name controls are blank
    #[serde(default)]
    pub team_names: Option<TeamNameConfig>,

    /// Ids of the controls holding the team names
    #[serde(default)]
    pub controls: Option<ControlConfig>,

    /// Element ids used to mount the summary
    #[serde(default)]
    pub anchors: Option<AnchorConfig>,
}

/// Fallback team names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeamNameConfig {
    /// Default: "Blue Team"
    pub blue: Option<String>,
    /// Default: "Orange Team"
    pub orange: Option<String>,
}

/// Team-name control ids
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControlConfig {
    /// Default: "blue-team-name"
    pub blue: Option<String>,
    /// Default: "orange-team-name"
    pub orange: Option<String>,
}

/// Page anchor ids
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnchorConfig {
    /// Default: "playing-area"
    pub playing_area: Option<String>,
    /// Default: "legend"
    pub legend: Option<String>,
    /// Default: "runs-summary"
    pub container: Option<String>,
}

/// Resolved configuration with every default applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub team_names: TeamNameControls,
    pub anchors: Anchors,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl RunsSummaryConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref names) = self.team_names {
            for (name, val) in [("blue", &names.blue), ("orange", &names.orange)] {
                if let Some(v) = val {
                    if v.trim().is_empty() {
                        anyhow::bail!("team_names.{} must not be blank", name);
                    }
                }
            }
        }

        if let Some(ref controls) = self.controls {
            for (name, val) in [("blue", &controls.blue), ("orange", &controls.orange)] {
                if let Some(v) = val {
                    validate_id(&format!("controls.{}", name), v)?;
                }
            }
        }

        if let Some(ref anchors) = self.anchors {
            for (name, val) in [
                ("playing_area", &anchors.playing_area),
                ("legend", &anchors.legend),
                ("container", &anchors.container),
            ] {
                if let Some(v) = val {
                    validate_id(&format!("anchors.{}", name), v)?;
                }
            }
        }

        // Defaults fill the gaps, so check distinctness on the resolved ids
        let resolved = self.resolve_unchecked();
        let controls = &resolved.team_names;
        if controls.blue_control == controls.orange_control {
            anyhow::bail!(
                "controls.blue and controls.orange must differ (both are {:?})",
                controls.blue_control
            );
        }
        let anchors = &resolved.anchors;
        if anchors.container == anchors.playing_area || anchors.container == anchors.legend {
            anyhow::bail!(
                "anchors.container ({:?}) must differ from anchors.playing_area and anchors.legend",
                anchors.container
            );
        }
        if anchors.playing_area == anchors.legend {
            anyhow::bail!(
                "anchors.playing_area and anchors.legend must differ (both are {:?})",
                anchors.playing_area
            );
        }

        Ok(())
    }

    /// Resolve config into its final form
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;
        Ok(self.resolve_unchecked())
    }

    fn resolve_unchecked(&self) -> ResolvedConfig {
        let mut team_names = TeamNameControls::default();
        if let Some(ref names) = self.team_names {
            if let Some(ref blue) = names.blue {
                team_names.blue_default = blue.trim().to_string();
            }
            if let Some(ref orange) = names.orange {
                team_names.orange_default = orange.trim().to_string();
            }
        }
        if let Some(ref controls) = self.controls {
            if let Some(ref blue) = controls.blue {
                team_names.blue_control = blue.clone();
            }
            if let Some(ref orange) = controls.orange {
                team_names.orange_control = orange.clone();
            }
        }

        let mut anchors = Anchors::default();
        if let Some(ref a) = self.anchors {
            if let Some(ref id) = a.playing_area {
                anchors.playing_area = id.clone();
            }
            if let Some(ref id) = a.legend {
                anchors.legend = id.clone();
            }
            if let Some(ref id) = a.container {
                anchors.container = id.clone();
            }
        }

        ResolvedConfig {
            team_names,
            anchors,
            config_path: None,
        }
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Self {
        RunsSummaryConfig::default().resolve_unchecked()
    }
}

fn validate_id(field: &str, id: &str) -> Result<()> {
    if id.is_empty() {
        anyhow::bail!("{} must not be empty", field);
    }
    if id.chars().any(char::is_whitespace) {
        anyhow::bail!("{} must not contain whitespace (got {:?})", field, id);
    }
    Ok(())
}

/// Config file names, in priority order within one directory
pub const CONFIG_FILE_NAMES: [&str; 2] = [".runssummaryrc.json", "runs-summary.config.json"];

/// Find the config file that applies to sessions in `start`
///
/// Returns `None` when no directory up to the repository root holds one.
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        if let Some(found) = CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
        {
            return Some(found);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Load and validate a config file
pub fn load_config_file(path: &Path) -> Result<RunsSummaryConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: RunsSummaryConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;
    Ok(config)
}

/// Resolve the config for sessions in `session_dir`
///
/// `explicit` bypasses discovery. With neither an explicit nor a discovered
/// file every default applies.
pub fn load_and_resolve(session_dir: &Path, explicit: Option<&Path>) -> Result<ResolvedConfig> {
    let source = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(session_dir),
    };
    let Some(path) = source else {
        return Ok(ResolvedConfig::defaults());
    };

    tracing::debug!(path = %path.display(), "loading config");
    let mut resolved = load_config_file(&path)?.resolve()?;
    resolved.config_path = Some(path);
    Ok(resolved)
}
