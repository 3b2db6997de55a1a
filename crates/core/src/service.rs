//! Patient registry operations over the flat-file store.
//!
//! Every operation loads the collection fresh from disk; mutating operations
//! write the entire collection back. The file is the single source of truth,
//! so two concurrent writers can race and the last save wins. No lock, no
//! conflict detection, no retry.

use crate::config::CoreConfig;
use crate::error::{RecordError, RecordResult};
use crate::model::{PatientRecord, PatientUpdate, PatientView, RecordCollection};
use crate::sort::{sort_records, SortField, SortOrder};
use pmr_store::JsonFileStore;
use pmr_types::PatientId;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Patient data operations - no API concerns.
///
/// This is the storage interface handed to each request handler: state flows
/// in through construction, never through a module-level singleton.
#[derive(Clone, Debug)]
pub struct PatientService {
    cfg: Arc<CoreConfig>,
    store: JsonFileStore,
}

impl PatientService {
    /// Creates a service over the data file named in `cfg`.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        let store = JsonFileStore::new(cfg.data_file());
        Self { cfg, store }
    }

    /// The configuration this service was built from.
    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    /// Full collection as views keyed by id.
    pub fn list(&self) -> RecordResult<BTreeMap<PatientId, PatientView>> {
        let collection: RecordCollection = self.store.load()?;
        Ok(collection
            .iter()
            .map(|(id, record)| (id.clone(), PatientView::of(record)))
            .collect())
    }

    /// Single record by id. Matching is case-insensitive because ids are
    /// normalized to uppercase on the way in.
    pub fn fetch(&self, id: &str) -> RecordResult<PatientView> {
        let id = PatientId::new(id)?;
        let collection: RecordCollection = self.store.load()?;
        collection
            .get(&id)
            .map(PatientView::of)
            .ok_or_else(|| RecordError::NotFound(id.to_string()))
    }

    /// Inserts a new record under `id`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::AlreadyExists` if the id is already present.
    pub fn create(&self, id: &str, record: PatientRecord) -> RecordResult<PatientId> {
        let id = PatientId::new(id)?;
        let mut collection: RecordCollection = self.store.load()?;

        if collection.contains_key(&id) {
            return Err(RecordError::AlreadyExists(id.to_string()));
        }

        collection.insert(id.clone(), record);
        self.store.save(&collection)?;
        tracing::info!("created patient {id}");

        Ok(id)
    }

    /// Applies a partial update to an existing record and returns the
    /// updated view.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if the id is absent, or
    /// `RecordError::Validation` if the merged record violates a constraint.
    pub fn update(&self, id: &str, update: &PatientUpdate) -> RecordResult<PatientView> {
        let id = PatientId::new(id)?;
        let mut collection: RecordCollection = self.store.load()?;

        let existing = collection
            .get(&id)
            .ok_or_else(|| RecordError::NotFound(id.to_string()))?;
        let merged = update.apply_to(existing)?;
        let view = PatientView::of(&merged);

        collection.insert(id.clone(), merged);
        self.store.save(&collection)?;
        tracing::info!("updated patient {id}");

        Ok(view)
    }

    /// Removes the record under `id`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if the id is absent.
    pub fn remove(&self, id: &str) -> RecordResult<()> {
        let id = PatientId::new(id)?;
        let mut collection: RecordCollection = self.store.load()?;

        if collection.remove(&id).is_none() {
            return Err(RecordError::NotFound(id.to_string()));
        }

        self.store.save(&collection)?;
        tracing::info!("deleted patient {id}");

        Ok(())
    }

    /// All records ordered by `field`.
    pub fn sorted(&self, field: SortField, order: SortOrder) -> RecordResult<Vec<PatientView>> {
        let collection: RecordCollection = self.store.load()?;
        Ok(sort_records(&collection, field, order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(temp: &TempDir) -> PatientService {
        let cfg = CoreConfig::new(temp.path().join("patients.json")).unwrap();
        PatientService::new(Arc::new(cfg))
    }

    fn sample_record() -> PatientRecord {
        PatientRecord::new("Ada", "Lagos", 30, "female", 1.75, 70.0).unwrap()
    }

    #[test]
    fn create_then_fetch_round_trips() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        service.create("p001", sample_record()).unwrap();
        let view = service.fetch("P001").unwrap();

        assert_eq!(view.name, "Ada");
        assert_eq!(view.bmi, 22.86);
        assert_eq!(view.verdict, crate::Verdict::Normal);
    }

    #[test]
    fn fetch_is_case_insensitive() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        service.create("P001", sample_record()).unwrap();

        assert!(service.fetch("p001").is_ok());
    }

    #[test]
    fn duplicate_create_is_a_conflict() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        service.create("P001", sample_record()).unwrap();
        let err = service.create("p001", sample_record()).unwrap_err();

        assert!(matches!(err, RecordError::AlreadyExists(_)));
    }

    #[test]
    fn remove_then_fetch_is_not_found() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        service.create("P001", sample_record()).unwrap();
        service.remove("P001").unwrap();

        assert!(matches!(
            service.fetch("P001"),
            Err(RecordError::NotFound(_))
        ));
    }

    #[test]
    fn remove_absent_is_not_found() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        assert!(matches!(
            service.remove("GHOST"),
            Err(RecordError::NotFound(_))
        ));
    }

    #[test]
    fn update_persists_across_service_instances() {
        let temp = TempDir::new().unwrap();

        {
            let service = service(&temp);
            service.create("P001", sample_record()).unwrap();
            let update = PatientUpdate {
                city: Some("Abuja".into()),
                ..Default::default()
            };
            service.update("P001", &update).unwrap();
        }

        // A fresh service over the same file sees the written state.
        let reopened = service(&temp);
        let view = reopened.fetch("P001").unwrap();
        assert_eq!(view.city, "Abuja");
    }

    #[test]
    fn update_absent_is_not_found() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        let result = service.update("GHOST", &PatientUpdate::default());
        assert!(matches!(result, Err(RecordError::NotFound(_))));
    }

    #[test]
    fn corrupt_file_surfaces_as_storage_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("patients.json"), "{ nope").unwrap();

        let service = service(&temp);
        assert!(matches!(service.list(), Err(RecordError::Storage(_))));
    }

    #[test]
    fn list_keys_are_uppercase() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        service.create("p001", sample_record()).unwrap();
        let listed = service.list().unwrap();

        assert!(listed.contains_key(&PatientId::new("P001").unwrap()));
    }
}
