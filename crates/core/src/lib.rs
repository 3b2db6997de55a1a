//! # PMR Core
//!
//! Core business logic for the PMR patient registry.
//!
//! This crate contains pure data operations over the flat-file record store:
//! - Patient record validation and derived health metrics (BMI, verdict)
//! - Partial-update merging
//! - Ordering of records by numeric field
//! - The [`PatientService`] facade handed to API handlers and the CLI
//!
//! **No API concerns**: HTTP servers, routing, status codes, or OpenAPI
//! documentation belong in `api-rest`.

pub mod config;
pub mod error;
pub mod model;
pub mod service;
pub mod sort;

pub use config::CoreConfig;
pub use error::{RecordError, RecordResult};
pub use model::{
    body_mass, BmiReport, Gender, PatientRecord, PatientUpdate, PatientView, RecordCollection,
    Verdict,
};
pub use pmr_types::PatientId;
pub use service::PatientService;
pub use sort::{sort_records, SortField, SortOrder};
