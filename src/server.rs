//! HTTP server bootstrap: wires configuration, storage and routes.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::adapters::http::{api_router, AssessmentHandlers};
use crate::adapters::storage::{FileSnapshotStore, InMemorySnapshotStore};
use crate::application::SessionGateway;
use crate::config::{AppConfig, ConfigError, ServerConfig, StorageBackend, ValidationError};
use crate::ports::SnapshotStore;
use crate::telemetry::{self, TelemetryError};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the application router with middleware from configuration.
pub fn build_app(config: &AppConfig) -> Result<Router, ServerError> {
    let catalog = Arc::new(config.assessment.load_catalog()?);
    info!(
        laps = catalog.lap_count(),
        questions = catalog.question_count(),
        max_score = catalog.max_score(),
        "Loaded assessment catalog"
    );

    let store: Arc<dyn SnapshotStore> = match config.assessment.storage {
        StorageBackend::Memory => Arc::new(InMemorySnapshotStore::new()),
        StorageBackend::File => {
            let dir = config
                .assessment
                .storage_dir
                .as_ref()
                .ok_or(ValidationError::MissingRequired("assessment.storage_dir"))?;
            info!(path = %dir.display(), "Using file snapshot store");
            Arc::new(FileSnapshotStore::new(dir))
        }
    };

    let gateway = Arc::new(
        SessionGateway::new(store, catalog)
            .with_lap_transitions(config.assessment.pause_between_laps),
    );

    let cors = cors_layer(&config.server)?;

    Ok(api_router(AssessmentHandlers::new(gateway))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

fn cors_layer(server: &ServerConfig) -> Result<CorsLayer, ValidationError> {
    let origins = server.cors_origin_headers()?;

    if origins.is_empty() && !server.is_production() {
        return Ok(CorsLayer::permissive());
    }

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Loads configuration, installs tracing and serves until shutdown.
pub async fn run() -> Result<(), ServerError> {
    let config = AppConfig::load()?;
    config.validate()?;
    telemetry::init(&config.server)?;

    let app = build_app(&config)?;

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(environment = ?config.server.environment, %addr, "innovation index server ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
