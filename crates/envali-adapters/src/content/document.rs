//! Serde model of a content resource.
//!
//! ```json
//! {
//!   "selectionNodes": [
//!     { "node": { "variableName": "count", "rangeFrom": "0", "rangeTo": "10" } }
//!   ]
//! }
//! ```
//!
//! Attribute values may be strings, numbers or booleans and are normalized
//! to strings. `null` means the attribute is absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use envali_core::application::{ApplicationError, ContentRow, ResourceId};
use envali_core::error::EnvaliResult;

/// A whole content resource.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    pub selection_nodes: Vec<SelectionNode>,
}

/// One `{ "node": { ... } }` entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SelectionNode {
    pub node: BTreeMap<String, Value>,
}

impl ContentDocument {
    /// Parse the raw text of `resource`.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::MalformedContent`] when the text is not a content
    /// document.
    pub fn parse(resource: &ResourceId, raw: &str) -> EnvaliResult<Self> {
        serde_json::from_str(raw).map_err(|e| malformed(resource, e.to_string()))
    }

    /// Rows in document order, with values normalized to strings.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::MalformedContent`] when a value is an array or an
    /// object.
    pub fn rows(&self, resource: &ResourceId) -> EnvaliResult<Vec<ContentRow>> {
        self.selection_nodes
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.row(resource, index))
            .collect()
    }

    /// Build a document from rows, the inverse of [`Self::rows`].
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a ContentRow>) -> Self {
        let selection_nodes = rows
            .into_iter()
            .map(|row| SelectionNode {
                node: row
                    .iter()
                    .map(|(k, v)| (k.to_owned(), Value::String(v.to_owned())))
                    .collect(),
            })
            .collect();
        Self { selection_nodes }
    }
}

impl SelectionNode {
    fn row(&self, resource: &ResourceId, index: usize) -> EnvaliResult<ContentRow> {
        let mut row = ContentRow::new();
        for (key, value) in &self.node {
            match value {
                Value::Null => {}
                Value::String(s) => row.insert(key.as_str(), s.as_str()),
                Value::Number(n) => row.insert(key.as_str(), n.to_string()),
                Value::Bool(b) => row.insert(key.as_str(), b.to_string()),
                Value::Array(_) | Value::Object(_) => {
                    return Err(malformed(
                        resource,
                        format!("node {index}: attribute '{key}' must be a string, number or boolean"),
                    ));
                }
            }
        }
        Ok(row)
    }
}

fn malformed(resource: &ResourceId, reason: String) -> envali_core::error::EnvaliError {
    ApplicationError::MalformedContent {
        resource: resource.to_string(),
        reason,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use envali_core::application::ports::ContentAttribute;

    fn resource() -> ResourceId {
        ResourceId::for_mapping("sample")
    }

    #[test]
    fn values_are_normalized_to_strings() {
        let raw = r#"{
            "selectionNodes": [
                { "node": { "variableName": "count", "rangeFrom": 0, "rangeTo": "10", "strict": true, "regex": null } }
            ]
        }"#;
        let rows = ContentDocument::parse(&resource(), raw)
            .unwrap()
            .rows(&resource())
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].attribute(ContentAttribute::RangeFrom), Some("0"));
        assert_eq!(rows[0].attribute(ContentAttribute::RangeTo), Some("10"));
        assert_eq!(rows[0].get("strict"), Some("true"));
        assert_eq!(rows[0].attribute(ContentAttribute::Regex), None);
    }

    #[test]
    fn missing_selection_nodes_is_malformed() {
        let err = ContentDocument::parse(&resource(), r#"{ "nodes": [] }"#).unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn nested_values_are_malformed() {
        let raw = r#"{ "selectionNodes": [ { "node": { "variableName": ["a"] } } ] }"#;
        let document = ContentDocument::parse(&resource(), raw).unwrap();
        let err = document.rows(&resource()).unwrap_err();
        assert!(err.to_string().contains("node 0"));
    }

    #[test]
    fn rows_round_trip_through_documents() {
        let row = ContentRow::new()
            .with("variableName", "name")
            .with("startWith", "Mr");
        let document = ContentDocument::from_rows([&row]);
        assert_eq!(document.rows(&resource()).unwrap(), vec![row]);
    }
}
