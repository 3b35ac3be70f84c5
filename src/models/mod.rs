pub mod enums;
pub mod patient;
pub mod profile;

pub use enums::*;
pub use patient::*;
pub use profile::*;

use thiserror::Error;

/// Field-level constraint violation on an inbound payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub(crate) fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}
