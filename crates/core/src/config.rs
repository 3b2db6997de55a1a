//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into core services. The intent is to avoid reading
//! process-wide environment variables during request handling, which can lead
//! to inconsistent behaviour in multi-threaded runtimes and test harnesses.

use crate::{RecordError, RecordResult};
use std::path::{Path, PathBuf};

/// Default location of the record collection file.
pub const DEFAULT_DATA_FILE: &str = "patient_data/patients.json";

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_file: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(data_file: PathBuf) -> RecordResult<Self> {
        if data_file.as_os_str().is_empty() {
            return Err(RecordError::Validation {
                field: "data_file",
                constraint: "cannot be empty".into(),
            });
        }

        Ok(Self { data_file })
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

/// Resolve the data file path from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_DATA_FILE`].
pub fn data_file_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_path() {
        assert!(CoreConfig::new(PathBuf::new()).is_err());
    }

    #[test]
    fn env_value_overrides_default() {
        let path = data_file_from_env_value(Some("/tmp/records.json".into()));
        assert_eq!(path, PathBuf::from("/tmp/records.json"));
    }

    #[test]
    fn blank_env_value_falls_back_to_default() {
        assert_eq!(
            data_file_from_env_value(Some("   ".into())),
            PathBuf::from(DEFAULT_DATA_FILE)
        );
        assert_eq!(
            data_file_from_env_value(None),
            PathBuf::from(DEFAULT_DATA_FILE)
        );
    }
}
