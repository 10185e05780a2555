//! # Page Turner Pro API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::io;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::Instrument;
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use observability::{RequestIdMiddleware, ServiceName, ServiceRootSpan};
use pageturner_infra::PostgresRepository;
use state::AppState;
use telemetry::TelemetryConfig;

/// Seconds in-flight requests get to finish after SIGINT/SIGTERM.
const SHUTDOWN_TIMEOUT_SECS: u64 = 5;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(io::Error::other)?;
    telemetry::init_telemetry(&TelemetryConfig::from(&config));

    let app_span = telemetry::service_span(&config.service_name());
    run(config).instrument(app_span).await
}

async fn run(config: AppConfig) -> io::Result<()> {
    let service_name = config.service_name();
    tracing::info!("Starting API server on {}:{}", config.host, config.port);

    let db = pageturner_infra::connect(&config.database)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to database");
            io::Error::other(e)
        })?;

    let state = AppState::new(Arc::new(PostgresRepository::new(db)));
    let service_name = web::Data::new(ServiceName(service_name));

    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::<ServiceRootSpan>::new())
            .app_data(web::Data::new(state.clone()))
            .app_data(service_name.clone())
            .configure(handlers::configure_routes)
    })
    .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
