//! In-memory content loader.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use envali_core::application::{ApplicationError, ContentLoader, ContentQuery, ContentRow, ResourceId};
use envali_core::error::EnvaliResult;

use super::document::ContentDocument;

/// Thread-safe in-memory content loader.
///
/// Clones share the same rows.
#[derive(Clone, Default)]
pub struct InMemoryContentLoader {
    inner: Arc<RwLock<HashMap<ResourceId, Vec<ContentRow>>>>,
}

impl InMemoryContentLoader {
    /// Create a new empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader holding one JSON content document for `mapping`.
    pub fn from_json(mapping: &str, raw: &str) -> EnvaliResult<Self> {
        let loader = Self::new();
        let resource = ResourceId::for_mapping(mapping);
        let document = ContentDocument::parse(&resource, raw)?;
        loader.insert_document(resource, &document)?;
        Ok(loader)
    }

    /// Append one row to the resource of `mapping`.
    pub fn insert_row(&self, mapping: &str, row: ContentRow) -> EnvaliResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LoaderLock)?;
        inner
            .entry(ResourceId::for_mapping(mapping))
            .or_default()
            .push(row);
        Ok(())
    }

    /// Replace the rows of `resource` with those of `document`.
    pub fn insert_document(
        &self,
        resource: ResourceId,
        document: &ContentDocument,
    ) -> EnvaliResult<()> {
        let rows = document.rows(&resource)?;
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LoaderLock)?;
        inner.insert(resource, rows);
        Ok(())
    }

    /// Remove a resource. Returns `true` if it existed.
    pub fn remove(&self, resource: &ResourceId) -> EnvaliResult<bool> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LoaderLock)?;
        Ok(inner.remove(resource).is_some())
    }

    /// Number of resources held.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if the loader holds no resources.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContentLoader for InMemoryContentLoader {
    fn load(&self, query: &ContentQuery) -> EnvaliResult<Vec<ContentRow>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::LoaderLock)?;

        let rows = inner
            .get(query.resource())
            .ok_or_else(|| ApplicationError::ContentNotFound {
                resource: query.resource().to_string(),
            })?;

        Ok(rows
            .iter()
            .filter(|row| query.matches(row))
            .map(|row| row.project(query.attributes()))
            .collect())
    }
}
