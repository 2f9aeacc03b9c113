//! Filesystem-based content loader.
//!
//! Resolves resource ids against a base directory and parses the JSON
//! content documents it finds there.
//!
//! # Directory layout expected
//!
//! ```text
//! <base_dir>/
//! └── content/
//!     └── envali/
//!         ├── user.json      ← mapping "user"
//!         └── order.json     ← mapping "order"
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use envali_core::application::ports::{CONTENT_EXTENSION, CONTENT_ROOT};
use envali_core::application::{ApplicationError, ContentLoader, ContentQuery, ContentRow, ResourceId};
use envali_core::error::EnvaliResult;

use super::document::ContentDocument;

/// Loads content resources from disk.
///
/// Files are read on every [`ContentLoader::load`] call; the validator
/// already caches one row per field within a pass.
///
/// # Example
///
/// ```no_run
/// use envali_adapters::FilesystemContentLoader;
/// use envali_core::application::Validator;
///
/// let validator = Validator::new(FilesystemContentLoader::new("."));
/// ```
#[derive(Debug, Clone)]
pub struct FilesystemContentLoader {
    base_dir: PathBuf,
}

impl FilesystemContentLoader {
    /// Create a loader rooted at `base_dir`.
    ///
    /// The directory does not need to exist yet; loads fail with
    /// `ContentNotFound` while it is missing.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of `resource` on disk.
    pub fn path_of(&self, resource: &ResourceId) -> PathBuf {
        self.base_dir.join(resource.as_str())
    }

    /// Read and parse one resource.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::ContentNotFound`] if the file does not exist
    /// - [`ApplicationError::MalformedContent`] if it cannot be read or parsed
    #[instrument(skip(self), fields(resource = %resource))]
    pub fn document(&self, resource: &ResourceId) -> EnvaliResult<ContentDocument> {
        let path = self.path_of(resource);
        let raw = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ApplicationError::ContentNotFound {
                resource: resource.to_string(),
            },
            _ => ApplicationError::MalformedContent {
                resource: resource.to_string(),
                reason: format!("failed to read '{}': {e}", path.display()),
            },
        })?;

        let document = ContentDocument::parse(resource, &raw)?;
        debug!(nodes = document.selection_nodes.len(), "parsed content document");
        Ok(document)
    }

    /// Every `.json` resource under `content/envali/`, sorted by id.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::ContentNotFound`] if the content directory does
    /// not exist.
    #[instrument(skip(self), fields(dir = %self.base_dir.display()))]
    pub fn discover(&self) -> EnvaliResult<Vec<ResourceId>> {
        let content_dir = self.base_dir.join(CONTENT_ROOT);
        if !content_dir.is_dir() {
            return Err(ApplicationError::ContentNotFound {
                resource: CONTENT_ROOT.to_owned(),
            }
            .into());
        }

        let mut resources = Vec::new();
        for entry in WalkDir::new(&content_dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable content entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.path().to_str() else {
                continue;
            };
            if !name.ends_with(CONTENT_EXTENSION) {
                continue;
            }
            if let Some(id) = self.resource_id(entry.path()) {
                resources.push(id);
            }
        }

        resources.sort();
        debug!(count = resources.len(), "discovered content resources");
        Ok(resources)
    }

    /// Id of a file below `base_dir`, always with `/` separators.
    fn resource_id(&self, path: &Path) -> Option<ResourceId> {
        let relative = path.strip_prefix(&self.base_dir).ok()?;
        let parts = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?;
        Some(ResourceId::from(parts.join("/").as_str()))
    }
}

impl ContentLoader for FilesystemContentLoader {
    fn load(&self, query: &ContentQuery) -> EnvaliResult<Vec<ContentRow>> {
        let resource = query.resource();
        let rows = self.document(resource)?.rows(resource)?;
        Ok(rows
            .iter()
            .filter(|row| query.matches(row))
            .map(|row| row.project(query.attributes()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envali_core::application::ports::ContentAttribute;
    use envali_core::error::EnvaliError;
    use std::{fs::File, io::Write};
    use tempfile::TempDir;

    // ── helpers ───────────────────────────────────────────────────────────

    /// Write content files (mapping, json) under a fresh TempDir.
    fn content_dir(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONTENT_ROOT);
        fs::create_dir_all(&dir).unwrap();

        for (name, json) in files {
            let full = dir.join(name);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            File::create(full)
                .unwrap()
                .write_all(json.as_bytes())
                .unwrap();
        }

        temp
    }

    const USER: &str = r#"{
        "selectionNodes": [
            { "node": { "variableName": "age", "rangeFrom": 18, "rangeTo": 130 } },
            { "node": { "variableName": "name", "startWith": "Mr", "comment": "ignored" } }
        ]
    }"#;

    // ── load ──────────────────────────────────────────────────────────────

    #[test]
    fn load_selects_and_projects_the_field_row() {
        let temp = content_dir(&[("user.json", USER)]);
        let loader = FilesystemContentLoader::new(temp.path());

        let query = ContentQuery::for_field(ResourceId::for_mapping("user"), "name");
        let rows = loader.load(&query).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].attribute(ContentAttribute::StartWith), Some("Mr"));
        assert_eq!(rows[0].get("comment"), None);
        assert_eq!(rows[0].get("variableName"), None);
    }

    #[test]
    fn unknown_field_yields_no_rows() {
        let temp = content_dir(&[("user.json", USER)]);
        let loader = FilesystemContentLoader::new(temp.path());

        let query = ContentQuery::for_field(ResourceId::for_mapping("user"), "email");
        assert!(loader.load(&query).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_content_not_found() {
        let temp = content_dir(&[]);
        let loader = FilesystemContentLoader::new(temp.path());

        let query = ContentQuery::for_field(ResourceId::for_mapping("nope"), "x");
        assert_eq!(
            loader.load(&query).unwrap_err(),
            EnvaliError::Application(ApplicationError::ContentNotFound {
                resource: "content/envali/nope.json".into()
            })
        );
    }

    #[test]
    fn invalid_json_is_malformed() {
        let temp = content_dir(&[("broken.json", "{ not json")]);
        let loader = FilesystemContentLoader::new(temp.path());

        let err = loader
            .document(&ResourceId::for_mapping("broken"))
            .unwrap_err();
        assert!(matches!(
            err,
            EnvaliError::Application(ApplicationError::MalformedContent { .. })
        ));
    }

    // ── discover ──────────────────────────────────────────────────────────

    #[test]
    fn discover_lists_json_resources_sorted() {
        let temp = content_dir(&[
            ("user.json", USER),
            ("order.json", USER),
            ("notes.txt", "not content"),
            ("nested/item.json", USER),
        ]);
        let loader = FilesystemContentLoader::new(temp.path());

        let ids: Vec<String> = loader
            .discover()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            ids,
            [
                "content/envali/nested/item.json",
                "content/envali/order.json",
                "content/envali/user.json",
            ]
        );
    }

    #[test]
    fn discover_requires_content_directory() {
        let temp = TempDir::new().unwrap();
        let loader = FilesystemContentLoader::new(temp.path());
        assert!(loader.discover().is_err());
    }
}
