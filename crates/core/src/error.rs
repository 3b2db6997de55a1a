use pmr_store::StoreError;
use pmr_types::IdError;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("invalid {field}: {constraint}")]
    Validation {
        field: &'static str,
        constraint: String,
    },
    #[error("patient {0} not found")]
    NotFound(String),
    #[error("patient {0} already exists")]
    AlreadyExists(String),
    #[error("invalid sort field '{0}': select from height, weight or bmi")]
    InvalidSortField(String),
    #[error("invalid sort order '{0}': select between asc and desc")]
    InvalidSortOrder(String),
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl From<IdError> for RecordError {
    fn from(e: IdError) -> Self {
        RecordError::Validation {
            field: "id",
            constraint: e.to_string(),
        }
    }
}

pub type RecordResult<T> = std::result::Result<T, RecordError>;
