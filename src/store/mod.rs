pub mod backend;
pub mod repository;

pub use backend::*;
pub use repository::*;

use thiserror::Error;

use crate::metrics::MetricsError;
use crate::models::ValidationError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Patient not found: {id}")]
    NotFound { id: String },

    #[error("Patient already exists: {id}")]
    AlreadyExists { id: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Registry I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Registry document is not valid JSON: {0}")]
    Document(#[from] serde_json::Error),

    #[error("Registry lock poisoned")]
    LockPoisoned,

    #[error("Cannot derive fields: {0}")]
    Derive(#[from] MetricsError),
}
