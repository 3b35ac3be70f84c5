//! Patient registry endpoints.
//!
//! Reads recompute derived fields on the fly; writes go through the
//! repository's validate-then-persist cycle.

use std::collections::BTreeMap;
use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{NewPatient, PatientPatch, PatientView, SortField, SortOrder};

use super::MessageResponse;

/// `GET /view` — the whole registry keyed by patient id.
pub async fn view(
    State(ctx): State<ApiContext>,
) -> Result<Json<BTreeMap<String, PatientView>>, ApiError> {
    Ok(Json(ctx.repo.list_all()?))
}

/// `GET /patient/:id` — one record with derived fields.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<PatientView>, ApiError> {
    Ok(Json(ctx.repo.get(&id)?))
}

#[derive(Deserialize)]
pub struct SortQuery {
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// `GET /sort?sort_by=<height|weight|bmi>&order=<asc|desc>` — records
/// ordered by one numeric field. Order defaults to ascending.
pub async fn sort(
    State(ctx): State<ApiContext>,
    Query(query): Query<SortQuery>,
) -> Result<Json<Vec<PatientView>>, ApiError> {
    let Some(raw_field) = query.sort_by else {
        return Err(ApiError::InvalidArgument(
            "sort_by is required: pick one of height, weight or bmi".into(),
        ));
    };
    let field = SortField::from_str(&raw_field).map_err(|_| {
        ApiError::InvalidArgument(format!(
            "Invalid sort field '{raw_field}': pick one of height, weight or bmi"
        ))
    })?;
    let order = match query.order.as_deref() {
        None => SortOrder::Asc,
        Some(raw) => SortOrder::from_str(raw).map_err(|_| {
            ApiError::InvalidArgument(format!("Invalid order '{raw}': pick asc or desc"))
        })?,
    };

    Ok(Json(ctx.repo.sort_by(field, order)?))
}

/// `POST /create` — register a new patient.
pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NewPatient>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(record) = payload?;
    ctx.repo.create(record)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Patient created successfully".into(),
        }),
    ))
}

/// `PUT /update/:id` — merge a partial payload into a stored record.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    payload: Result<Json<PatientPatch>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(patch) = payload?;
    ctx.repo.update(&id, patch)?;
    Ok(Json(MessageResponse {
        message: "Patient updated".into(),
    }))
}

/// `DELETE /delete_patient/:id` — remove a record.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    ctx.repo.delete(&id)?;
    Ok(Json(MessageResponse {
        message: "Patient deleted".into(),
    }))
}
