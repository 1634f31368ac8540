//! Output schema: ordered column names with nominal types.

use serde::{Deserialize, Serialize};

/// One output column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaEntry {
    /// Column name, taken verbatim from the schema file.
    pub name: String,

    /// Declared type, trimmed and lowercased. Informational only.
    #[serde(rename = "type")]
    pub data_type: String,
}

impl SchemaEntry {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// Ordered list of output columns. Order defines the output column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    entries: Vec<SchemaEntry>,
}

impl Schema {
    pub fn new(entries: Vec<SchemaEntry>) -> Self {
        Self { entries }
    }

    /// Column names in output order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<SchemaEntry> for Schema {
    fn from_iter<I: IntoIterator<Item = SchemaEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
