//! Whole-file JSON store implementation
//!
//! This module provides the [`JsonFileStore`] type: a minimal persistence
//! layer that keeps one serializable value in one JSON file.
//!
//! # Lifecycle
//!
//! Every read loads the complete value fresh from disk; every write
//! serializes the complete value and overwrites the file. Nothing is kept in
//! memory between calls, so the file is always the authoritative state.
//!
//! # Missing-File Policy
//!
//! `load` returns the value's `Default` when the file does not exist yet.
//! This is an explicit policy choice: a freshly deployed service has no data
//! file until the first write, and the first read must still succeed. A file
//! that exists but cannot be parsed is a hard [`StoreError::Parse`].

use crate::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Whole-file JSON persistence for a single serializable value.
///
/// The service is stateless: it holds only the path to the backing file and
/// performs no I/O until `load` or `save` is called.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Path to the backing JSON file
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a new store backed by the file at `path`.
    ///
    /// The file (and its parent directories) need not exist yet; they are
    /// created on the first `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored value.
    ///
    /// Returns `T::default()` when the backing file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if:
    /// - The file exists but cannot be read (I/O)
    /// - The file contents are not well-formed JSON for `T`
    pub fn load<T>(&self) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("store file {} missing, starting empty", self.path.display());
                return Ok(T::default());
            }
            Err(e) => return Err(StoreError::Read(e)),
        };

        serde_json::from_str(&contents).map_err(StoreError::Parse)
    }

    /// Serializes `value` and overwrites the entire backing file.
    ///
    /// Parent directories are created as needed. There is no partial-write
    /// recovery: a crash between truncate and flush can corrupt the file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if:
    /// - A parent directory cannot be created (I/O)
    /// - The value cannot be serialized
    /// - The file cannot be written (I/O)
    pub fn save<T>(&self, value: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(StoreError::CreateDir)?;
            }
        }

        let json = serde_json::to_string_pretty(value).map_err(StoreError::Serialize)?;
        fs::write(&self.path, json).map_err(StoreError::Write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Entry {
        label: String,
        count: u32,
    }

    type Entries = BTreeMap<String, Entry>;

    fn sample() -> Entries {
        let mut entries = Entries::new();
        entries.insert(
            "A1".into(),
            Entry {
                label: "first".into(),
                count: 3,
            },
        );
        entries.insert(
            "B2".into(),
            Entry {
                label: "second".into(),
                count: 7,
            },
        );
        entries
    }

    #[test]
    fn missing_file_loads_default() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path().join("absent.json"));

        let loaded: Entries = store.load().unwrap();

        assert!(loaded.is_empty());
    }

    #[test]
    fn save_then_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path().join("entries.json"));

        store.save(&sample()).unwrap();
        let loaded: Entries = store.load().unwrap();

        assert_eq!(loaded, sample());
    }

    #[test]
    fn save_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("deeper").join("entries.json");
        let store = JsonFileStore::new(&path);

        store.save(&sample()).unwrap();

        assert!(path.is_file());
    }

    #[test]
    fn save_overwrites_prior_contents() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path().join("entries.json"));

        store.save(&sample()).unwrap();

        let mut next = Entries::new();
        next.insert(
            "C3".into(),
            Entry {
                label: "third".into(),
                count: 1,
            },
        );
        store.save(&next).unwrap();

        let loaded: Entries = store.load().unwrap();
        assert_eq!(loaded, next);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("entries.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = JsonFileStore::new(&path);
        let result: Result<Entries, _> = store.load();

        assert!(matches!(result, Err(StoreError::Parse(_))));
    }

    #[test]
    fn truncated_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("entries.json");
        std::fs::write(&path, "{\"A1\": {\"label\": \"first\"").unwrap();

        let store = JsonFileStore::new(&path);
        let result: Result<Entries, _> = store.load();

        assert!(matches!(result, Err(StoreError::Parse(_))));
    }

    #[test]
    fn path_getter_reports_backing_file() {
        let store = JsonFileStore::new("some/dir/records.json");
        assert_eq!(store.path(), Path::new("some/dir/records.json"));
    }
}
