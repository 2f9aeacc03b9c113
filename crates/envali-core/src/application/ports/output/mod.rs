//! Driven (output) ports - implemented by infrastructure.
//!
//! The validator reads range bounds, affixes and patterns from external
//! content when an entity declares a content mapping. The
//! `envali-adapters` crate provides implementations.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::application::ApplicationError;
use crate::error::EnvaliResult;

/// Directory under which content resources live, relative to the loader root.
pub const CONTENT_ROOT: &str = "content/envali/";

/// File extension of a content resource.
pub const CONTENT_EXTENSION: &str = ".json";

/// Attribute that names the field a content row belongs to.
pub const SELECTOR_KEY: &str = "variableName";

// ── Resource ids ─────────────────────────────────────────────────────────────

/// Relative path of a content resource, e.g. `content/envali/user.json`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Resource backing the content mapping `mapping`.
    pub fn for_mapping(mapping: &str) -> Self {
        Self(format!("{CONTENT_ROOT}{mapping}{CONTENT_EXTENSION}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The mapping name, when this id follows the content layout.
    pub fn mapping(&self) -> Option<&str> {
        self.0
            .strip_prefix(CONTENT_ROOT)
            .and_then(|rest| rest.strip_suffix(CONTENT_EXTENSION))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

// ── Attributes ───────────────────────────────────────────────────────────────

/// Content attributes that directives read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentAttribute {
    RangeFrom,
    RangeTo,
    StartWith,
    EndWith,
    Regex,
}

impl ContentAttribute {
    pub const ALL: &'static [ContentAttribute] = &[
        Self::RangeFrom,
        Self::RangeTo,
        Self::StartWith,
        Self::EndWith,
        Self::Regex,
    ];

    /// Key of the attribute inside a content node.
    pub fn key(self) -> &'static str {
        match self {
            Self::RangeFrom => "rangeFrom",
            Self::RangeTo => "rangeTo",
            Self::StartWith => "startWith",
            Self::EndWith => "endWith",
            Self::Regex => "regex",
        }
    }
}

impl fmt::Display for ContentAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ── Queries and rows ─────────────────────────────────────────────────────────

/// A content lookup: which resource, which attributes, which rows.
///
/// An empty attribute list projects every attribute. Conditions are
/// equality tests combined with AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    resource: ResourceId,
    attributes: Vec<&'static str>,
    conditions: Vec<(String, String)>,
}

impl ContentQuery {
    pub fn new(resource: ResourceId) -> Self {
        Self {
            resource,
            attributes: Vec::new(),
            conditions: Vec::new(),
        }
    }

    /// The query the validator issues for one field: every directive
    /// attribute of the row whose `variableName` equals `field`.
    pub fn for_field(resource: ResourceId, field: &str) -> Self {
        Self::new(resource)
            .with_attributes(ContentAttribute::ALL.iter().map(|a| a.key()))
            .with_condition(SELECTOR_KEY, field)
    }

    pub fn with_attribute(mut self, attribute: &'static str) -> Self {
        if !self.attributes.contains(&attribute) {
            self.attributes.push(attribute);
        }
        self
    }

    pub fn with_attributes(self, attributes: impl IntoIterator<Item = &'static str>) -> Self {
        attributes
            .into_iter()
            .fold(self, |query, attribute| query.with_attribute(attribute))
    }

    pub fn with_condition(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push((key.into(), value.into()));
        self
    }

    pub fn resource(&self) -> &ResourceId {
        &self.resource
    }

    pub fn attributes(&self) -> &[&'static str] {
        &self.attributes
    }

    pub fn conditions(&self) -> &[(String, String)] {
        &self.conditions
    }

    /// `true` when `row` satisfies every condition.
    pub fn matches(&self, row: &ContentRow) -> bool {
        self.conditions
            .iter()
            .all(|(key, value)| row.get(key) == Some(value.as_str()))
    }
}

/// One content node: attribute name to string value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContentRow(BTreeMap<String, String>);

impl ContentRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn attribute(&self, attribute: ContentAttribute) -> Option<&str> {
        self.get(attribute.key())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keep only `attributes`; an empty list keeps everything.
    pub fn project(&self, attributes: &[&str]) -> ContentRow {
        if attributes.is_empty() {
            return self.clone();
        }
        self.0
            .iter()
            .filter(|(key, _)| attributes.contains(&key.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl FromIterator<(String, String)> for ContentRow {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ── Port ─────────────────────────────────────────────────────────────────────

/// Port for loading directive parameters from external content.
///
/// Implemented by:
/// - `envali_adapters::content::FilesystemContentLoader` (JSON files on disk)
/// - `envali_adapters::content::InMemoryContentLoader` (testing, embedding)
/// - [`NoContent`] (entities without content mappings)
///
/// ## Contract
///
/// - A missing resource is [`ApplicationError::ContentNotFound`]
/// - Rows come back in resource order, projected onto the query's attributes
/// - Absent values are omitted from a row, never stored as empty strings
#[cfg_attr(test, mockall::automock)]
pub trait ContentLoader: Send + Sync {
    /// Load every row of `query.resource()` that matches the query.
    fn load(&self, query: &ContentQuery) -> EnvaliResult<Vec<ContentRow>>;
}

/// A loader with no resources at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl ContentLoader for NoContent {
    fn load(&self, query: &ContentQuery) -> EnvaliResult<Vec<ContentRow>> {
        Err(ApplicationError::ContentNotFound {
            resource: query.resource().to_string(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_id_follows_content_layout() {
        let id = ResourceId::for_mapping("user");
        assert_eq!(id.as_str(), "content/envali/user.json");
        assert_eq!(id.mapping(), Some("user"));
        assert_eq!(ResourceId::from("other/file.json").mapping(), None);
    }

    #[test]
    fn field_query_selects_by_variable_name() {
        let query = ContentQuery::for_field(ResourceId::for_mapping("user"), "age");
        assert_eq!(query.attributes().len(), ContentAttribute::ALL.len());
        assert_eq!(query.conditions(), &[("variableName".to_owned(), "age".to_owned())]);

        let age = ContentRow::new().with("variableName", "age");
        let name = ContentRow::new().with("variableName", "name");
        assert!(query.matches(&age));
        assert!(!query.matches(&name));
    }

    #[test]
    fn duplicate_attributes_are_ignored() {
        let query = ContentQuery::new(ResourceId::for_mapping("x"))
            .with_attribute("regex")
            .with_attribute("regex");
        assert_eq!(query.attributes(), &["regex"]);
    }

    #[test]
    fn projection_keeps_requested_keys() {
        let row = ContentRow::new()
            .with("variableName", "count")
            .with("rangeFrom", "0")
            .with("comment", "ignored");

        let projected = row.project(&["rangeFrom", "rangeTo"]);
        assert_eq!(projected.len(), 1);
        assert_eq!(projected.attribute(ContentAttribute::RangeFrom), Some("0"));
        assert_eq!(row.project(&[]), row);
    }

    #[test]
    fn no_content_reports_missing_resource() {
        let query = ContentQuery::new(ResourceId::for_mapping("user"));
        let err = NoContent.load(&query).unwrap_err();
        assert!(err.to_string().contains("content/envali/user.json"));
    }
}
