//! Custom field schema probe
//!
//! The field schema is owned by the custom-field configuration system. The
//! summary only needs to know whether the two fields it reads exist.

use crate::row::{DIRECTION_FIELD, PLAY_TYPE_FIELD};
use serde::{Deserialize, Serialize};

/// One configured field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: String,
}

/// Ordered list of configured fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(default)]
    pub details: Vec<FieldDescriptor>,
}

impl FieldSchema {
    /// Build a schema from field ids
    pub fn from_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        FieldSchema {
            details: ids
                .into_iter()
                .map(|id| FieldDescriptor { id: id.to_string() })
                .collect(),
        }
    }

    pub fn has_field(&self, id: &str) -> bool {
        self.details.iter().any(|d| d.id == id)
    }
}

/// Whether the summary applies to this schema: both the direction and the
/// play-type field must be configured
pub fn should_show_summary(schema: &FieldSchema) -> bool {
    schema.has_field(DIRECTION_FIELD) && schema.has_field(PLAY_TYPE_FIELD)
}
