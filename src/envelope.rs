//! Loading a Swarmic export and normalizing its envelope.
//!
//! Two shapes are accepted. Older exports are flat:
//!
//! ```json
//! { "version": "1", "exported_at": "...", "data": { "sleep_sessions": [ ... ] } }
//! ```
//!
//! Newer exports wrap that in an API response:
//!
//! ```json
//! { "success": true, "data": { "version": "2", "exported_at": "...", "data": { ... } } }
//! ```
//!
//! Both become the same `ExportDocument`.

use crate::model::Category;
use crate::{fs, Result};
use anyhow::Context;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{info, warn};

/// A normalized export: optional metadata plus the mapping from category key to records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportDocument {
    version: Option<String>,
    exported_at: Option<String>,
    /// `None` when the export has no `data` section at all.
    data: Option<Map<String, Value>>,
}

impl ExportDocument {
    /// Reads and parses the JSON file at `path`, then normalizes its envelope.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let raw: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON file at {}", path.display()))?;
        let document = Self::normalize(raw);
        info!(
            "Loaded {} (version: {})",
            path.display(),
            document.version().unwrap_or("unknown")
        );
        Ok(document)
    }

    /// Detects the envelope shape of `raw` and lifts the metadata and categories out of it.
    pub fn normalize(raw: Value) -> Self {
        let Value::Object(mut root) = raw else {
            return Self::default();
        };

        let wrapped =
            root.contains_key("success") && root.get("data").is_some_and(Value::is_object);
        if !wrapped {
            return Self::from_flat(root);
        }

        match root.remove("data") {
            Some(Value::Object(inner)) => Self::from_flat(inner),
            _ => Self::default(),
        }
    }

    /// Reads an object that already has `version`, `exported_at` and `data` at its top level.
    fn from_flat(mut object: Map<String, Value>) -> Self {
        let data = match object.remove("data") {
            None | Some(Value::Null) => None,
            Some(Value::Object(categories)) => Some(categories),
            Some(other) => {
                warn!(
                    "The data section is {} rather than an object, no categories will be found",
                    json_kind(&other)
                );
                Some(Map::new())
            }
        };
        Self {
            version: scalar_string(object.get("version")),
            exported_at: scalar_string(object.get("exported_at")),
            data,
        }
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn exported_at(&self) -> Option<&str> {
        self.exported_at.as_deref()
    }

    /// The category mapping, or `None` when the export has no `data` section.
    pub fn data(&self) -> Option<&Map<String, Value>> {
        self.data.as_ref()
    }

    /// The records of `category`, or `None` when the category is absent or is not a list.
    pub fn records(&self, category: Category) -> Option<&[Value]> {
        match self.data()?.get(category.key())? {
            Value::Array(records) => Some(records.as_slice()),
            other => {
                warn!(
                    "{category}: expected a list of records but found {}",
                    json_kind(other)
                );
                None
            }
        }
    }

    /// The number of records listed for `category`, zero when absent.
    pub fn record_count(&self, category: Category) -> usize {
        self.data()
            .and_then(|data| data.get(category.key()))
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or_default()
    }

    /// Whether the `data` section has an entry for `category`, whatever its value.
    pub fn contains(&self, category: Category) -> bool {
        self.data()
            .map(|data| data.contains_key(category.key()))
            .unwrap_or(false)
    }
}

fn scalar_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
