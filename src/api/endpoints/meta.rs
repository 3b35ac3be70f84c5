//! Service identity endpoints.

use axum::Json;

use super::MessageResponse;
use crate::config;

/// `GET /` — service banner.
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!("{} v{}: patient registry API", config::APP_NAME, config::APP_VERSION),
    })
}

/// `GET /about` — what this service does.
pub async fn about() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Manages patient records in a flat JSON registry and predicts \
                  insurance premium categories from user profiles"
            .into(),
    })
}
