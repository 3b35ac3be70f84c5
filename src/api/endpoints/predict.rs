//! Premium category prediction endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::insurance;
use crate::models::UserProfile;

#[derive(Serialize)]
pub struct PredictResponse {
    /// The key misspelling is part of the deployed wire contract.
    #[serde(rename = "Predicted catagory")]
    pub predicted_category: String,
}

/// `POST /predict` — derive features from the profile and score them.
pub async fn premium(
    State(ctx): State<ApiContext>,
    payload: Result<Json<UserProfile>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(profile) = payload?;
    profile.validate()?;

    let features = insurance::project(&profile, ctx.policy)
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    let label = ctx.model.predict(&features);

    tracing::debug!(label, bmi = features.bmi, city_tier = features.city_tier, "premium scored");

    Ok(Json(PredictResponse {
        predicted_category: label.to_string(),
    }))
}
