//! PMR Flat-File Storage
//!
//! This crate provides whole-file JSON persistence for the Patient Management
//! Registry (PMR).
//!
//! ## Design Principles
//!
//! - The file on disk is the single source of truth; nothing is cached in
//!   memory between operations
//! - Readers load the entire stored value; writers overwrite the entire file
//! - A missing file loads as the value's `Default` (an empty collection),
//!   so a fresh deployment works before the first write
//! - A present but malformed file is an error, never silently treated as empty
//! - There is no partial-write recovery: a crash mid-write can corrupt the
//!   file (accepted limitation)
//! - Two concurrent writers can race; the last save wins
//!
//! ## Example Usage
//!
//! ```no_run
//! use pmr_store::JsonFileStore;
//! use std::collections::BTreeMap;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonFileStore::new("patient_data/patients.json");
//! let mut records: BTreeMap<String, u32> = store.load()?;
//! records.insert("P001".into(), 1);
//! store.save(&records)?;
//! # Ok(())
//! # }
//! ```

mod store;

pub use store::JsonFileStore;

/// Errors that can occur during store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing file exists but could not be read
    #[error("failed to read store file: {0}")]
    Read(std::io::Error),

    /// The backing file could not be written
    #[error("failed to write store file: {0}")]
    Write(std::io::Error),

    /// A parent directory for the backing file could not be created
    #[error("failed to create store directory: {0}")]
    CreateDir(std::io::Error),

    /// The backing file is not well-formed JSON
    #[error("store file is not well-formed: {0}")]
    Parse(serde_json::Error),

    /// The value could not be serialized
    #[error("failed to serialize store contents: {0}")]
    Serialize(serde_json::Error),
}
