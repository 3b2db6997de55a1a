//! HTTP request handlers.
//!
//! Each handler maps one endpoint onto `PatientService` calls and translates
//! the outcome into a status code. This layer holds no logic of its own
//! beyond that translation.

use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use pmr_core::{
    PatientId, PatientRecord, PatientUpdate, PatientView, RecordError, SortField, SortOrder,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

/// Plain message response
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

/// Error body; clients consume the `detail` field.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorRes {
    pub detail: String,
}

/// Request body for creating a patient; the only payload that carries an id.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePatientReq {
    /// ID of the patient, e.g. P001 (case-insensitive)
    pub id: String,
    /// Name of the patient
    pub name: String,
    /// City where the patient is living
    pub city: String,
    /// Age of the patient in years
    pub age: i64,
    /// Gender: male, female or other
    pub gender: String,
    /// Height of the patient in meters
    pub height: f64,
    /// Weight of the patient in kilograms
    pub weight: f64,
}

/// Query parameters for the sort endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SortParams {
    /// Field to sort on: height, weight or bmi
    pub sort_by: String,
    /// Sort direction: asc (default) or desc
    pub order: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorRes>);

fn error_response(err: RecordError) -> ApiError {
    let status = match &err {
        RecordError::NotFound(_) => StatusCode::NOT_FOUND,
        RecordError::Validation { .. }
        | RecordError::AlreadyExists(_)
        | RecordError::InvalidSortField(_)
        | RecordError::InvalidSortOrder(_) => StatusCode::BAD_REQUEST,
        RecordError::Storage(e) => {
            tracing::error!("storage failure: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorRes {
                    detail: "internal error".into(),
                }),
            );
        }
    };

    (
        status,
        Json(ErrorRes {
            detail: err.to_string(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Liveness message", body = MessageRes))
)]
pub async fn root() -> Json<MessageRes> {
    Json(MessageRes {
        message: "Patient Management Registry API".into(),
    })
}

#[utoipa::path(
    get,
    path = "/about",
    responses((status = 200, description = "Service description", body = MessageRes))
)]
pub async fn about() -> Json<MessageRes> {
    Json(MessageRes {
        message: "A fully functional API to manage your patient records".into(),
    })
}

#[utoipa::path(
    get,
    path = "/view",
    responses(
        (status = 200, description = "Full patient collection keyed by uppercase id"),
        (status = 500, description = "Storage failure", body = ErrorRes)
    )
)]
pub async fn view(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<PatientId, PatientView>>, ApiError> {
    state.patient_service.list().map(Json).map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/patient/{patient_id}",
    params(("patient_id" = String, Path, description = "ID of the patient, e.g. P001")),
    responses(
        (status = 200, description = "Patient record with derived metrics", body = PatientView),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
pub async fn view_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientView>, ApiError> {
    state
        .patient_service
        .fetch(&patient_id)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/sort",
    params(SortParams),
    responses(
        (status = 200, description = "Records ordered by the requested field", body = [PatientView]),
        (status = 400, description = "Unknown sort field or order", body = ErrorRes)
    )
)]
pub async fn sort_patients(
    State(state): State<AppState>,
    Query(params): Query<SortParams>,
) -> Result<Json<Vec<PatientView>>, ApiError> {
    let field = params.sort_by.parse::<SortField>().map_err(error_response)?;
    let order = match params.order.as_deref() {
        Some(raw) => raw.parse::<SortOrder>().map_err(error_response)?,
        None => SortOrder::default(),
    };

    state
        .patient_service
        .sorted(field, order)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    post,
    path = "/create",
    request_body = CreatePatientReq,
    responses(
        (status = 201, description = "Patient created", body = MessageRes),
        (status = 400, description = "Validation failure or duplicate id", body = ErrorRes)
    )
)]
pub async fn create_patient(
    State(state): State<AppState>,
    Json(req): Json<CreatePatientReq>,
) -> Result<(StatusCode, Json<MessageRes>), ApiError> {
    let record = PatientRecord::new(req.name, req.city, req.age, &req.gender, req.height, req.weight)
        .map_err(error_response)?;
    let id = state
        .patient_service
        .create(&req.id, record)
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(MessageRes {
            message: format!("patient {id} created"),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/edit/{patient_id}",
    params(("patient_id" = String, Path, description = "ID of the patient, e.g. P001")),
    request_body = PatientUpdate,
    responses(
        (status = 200, description = "Updated record with recomputed metrics", body = PatientView),
        (status = 400, description = "Merged record is invalid", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
pub async fn update_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    Json(update): Json<PatientUpdate>,
) -> Result<Json<PatientView>, ApiError> {
    state
        .patient_service
        .update(&patient_id, &update)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/delete/{patient_id}",
    params(("patient_id" = String, Path, description = "ID of the patient, e.g. P001")),
    responses(
        (status = 204, description = "Patient deleted"),
        (status = 400, description = "Patient id not present", body = ErrorRes)
    )
)]
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match state.patient_service.remove(&patient_id) {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        // A missing id on delete is reported as a bad request, not a 404.
        Err(err @ RecordError::NotFound(_)) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorRes {
                detail: err.to_string(),
            }),
        )),
        Err(err) => Err(error_response(err)),
    }
}
