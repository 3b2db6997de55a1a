use api_rest::{router, AppState};
use pmr_core::{config, CoreConfig, PatientService};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the PMR application
///
/// Starts the REST server on port 3000 (configurable via PMR_REST_ADDR).
/// Patient records live in a single JSON file; every request loads it fresh
/// and mutating requests rewrite it whole.
///
/// # Environment Variables
/// - `PMR_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PMR_DATA_FILE`: Path of the record collection file
///   (default: "patient_data/patients.json")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If server startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("pmr=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("PMR_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_file = config::data_file_from_env_value(std::env::var("PMR_DATA_FILE").ok());

    tracing::info!("++ Starting PMR REST on {}", rest_addr);
    tracing::info!("++ Patient data file: {}", data_file.display());

    let cfg = Arc::new(CoreConfig::new(data_file)?);
    let patient_service = PatientService::new(cfg);

    let app = router(AppState { patient_service });

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
