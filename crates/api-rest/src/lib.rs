//! # API REST
//!
//! REST API implementation for PMR.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Domain logic lives in `pmr-core`; this crate is boundary glue.

#![warn(rust_2018_idioms)]

mod handlers;

use axum::routing::{delete, get, post, put};
use axum::Router;
use pmr_core::PatientService;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use handlers::{CreatePatientReq, ErrorRes, MessageRes, SortParams};

/// Application state shared across REST API handlers
///
/// Contains the services needed by the REST API endpoints.
/// Currently holds a PatientService instance for data operations.
#[derive(Clone)]
pub struct AppState {
    pub patient_service: PatientService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root,
        handlers::about,
        handlers::view,
        handlers::view_patient,
        handlers::sort_patients,
        handlers::create_patient,
        handlers::update_patient,
        handlers::delete_patient,
    ),
    components(schemas(
        CreatePatientReq,
        MessageRes,
        ErrorRes,
        pmr_core::PatientUpdate,
        pmr_core::PatientView,
        pmr_core::Gender,
        pmr_core::Verdict,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router: all endpoints, Swagger UI, and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/about", get(handlers::about))
        .route("/view", get(handlers::view))
        .route("/patient/:patient_id", get(handlers::view_patient))
        .route("/sort", get(handlers::sort_patients))
        .route("/create", post(handlers::create_patient))
        .route("/edit/:patient_id", put(handlers::update_patient))
        .route("/delete/:patient_id", delete(handlers::delete_patient))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
