//! API endpoint handlers.
//!
//! One module per resource: service banner, patient registry, prediction.

pub mod meta;
pub mod patients;
pub mod predict;

use serde::Serialize;

/// Confirmation body for mutations and banner endpoints.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}
