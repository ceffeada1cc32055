//! The field table: caller-supplied mapping from field ID to column name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Mapping from non-negative integer field ID to column name.
///
/// Supplied ready-made by the caller and read-only for the duration of a
/// compile. The `serde(transparent)` representation lets a JSON object like
/// `{"2": "name"}` decode directly (serde_json parses integer map keys from
/// their string form).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldTable {
    columns: HashMap<u32, String>,
}

impl FieldTable {
    /// Create an empty field table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a column name under a field ID.
    pub fn insert(&mut self, id: u32, column: impl Into<String>) -> &mut Self {
        self.columns.insert(id, column.into());
        self
    }

    /// Look up the column name for a field ID.
    pub fn column(&self, id: u32) -> Option<&str> {
        self.columns.get(&id).map(String::as_str)
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table has no fields.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl From<HashMap<u32, String>> for FieldTable {
    fn from(columns: HashMap<u32, String>) -> Self {
        Self { columns }
    }
}

impl FromIterator<(u32, String)> for FieldTable {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(u32, &str); N]> for FieldTable {
    fn from(pairs: [(u32, &str); N]) -> Self {
        pairs
            .into_iter()
            .map(|(id, col)| (id, col.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let fields = FieldTable::from([(1, "id"), (2, "name")]);
        assert_eq!(fields.column(2), Some("name"));
        assert_eq!(fields.column(9), None);
    }

    #[test]
    fn test_decode_from_json_object() {
        let fields: FieldTable =
            serde_json::from_value(serde_json::json!({"1": "id", "4": "age"})).unwrap();
        assert_eq!(fields.column(4), Some("age"));
        assert_eq!(fields.len(), 2);
    }
}
