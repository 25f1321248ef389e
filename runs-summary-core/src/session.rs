//! Session snapshots
//!
//! A session is a JSON capture of everything the summary reads from its
//! collaborators: the filtered rows, the custom field schema, the team-name
//! control values, and which page anchors exist.

use crate::lifecycle::{Anchors, RowSource, SchemaSource};
use crate::row::Row;
use crate::schema::{FieldDescriptor, FieldSchema};
use crate::teams::TeamNameSource;
use crate::view::{Document, Element};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Custom field descriptors
    #[serde(default)]
    pub details: Vec<FieldDescriptor>,
    /// Rows remaining after the active filters
    pub rows: Vec<Row>,
    /// Current values of UI controls, keyed by control id
    #[serde(default)]
    pub controls: BTreeMap<String, String>,
    #[serde(default)]
    pub page: PageLayout,
}

/// Which anchors the host page provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    #[serde(default = "present")]
    pub playing_area: bool,
    #[serde(default = "present")]
    pub legend: bool,
}

fn present() -> bool {
    true
}

impl Default for PageLayout {
    fn default() -> Self {
        PageLayout {
            playing_area: true,
            legend: true,
        }
    }
}

impl Session {
    pub fn schema(&self) -> FieldSchema {
        FieldSchema {
            details: self.details.clone(),
        }
    }

    /// Build the host page described by `page`
    pub fn build_document(&self, anchors: &Anchors) -> Document {
        let mut doc = Document::new();
        if !self.page.playing_area {
            return doc;
        }
        let area = doc
            .body
            .append(Element::new("div").with_id(&anchors.playing_area));
        area.append(Element::new("div").with_class("field"));
        if self.page.legend {
            area.append(Element::new("div").with_id(&anchors.legend));
        }
        doc
    }
}

impl RowSource for Session {
    fn filtered_rows(&self) -> Vec<Row> {
        self.rows.clone()
    }
}

impl SchemaSource for Session {
    fn field_schema(&self) -> FieldSchema {
        self.schema()
    }
}

impl TeamNameSource for Session {
    fn control_value(&self, control_id: &str) -> Option<String> {
        self.controls.get(control_id).cloned()
    }
}

/// Parse a session from JSON text
pub fn parse_session(json: &str) -> Result<Session> {
    serde_json::from_str(json).context("failed to parse session")
}

/// Load a session from a JSON file
pub fn load_session(path: &Path) -> Result<Session> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read session file: {}", path.display()))?;
    let session = parse_session(&content)
        .with_context(|| format!("invalid session in: {}", path.display()))?;
    tracing::debug!(
        rows = session.rows.len(),
        fields = session.details.len(),
        "loaded session"
    );
    Ok(session)
}
