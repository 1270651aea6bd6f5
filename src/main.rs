//! # HR Admin
//!
//! HR administration backend implemented in Rust.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Database connection pool, migrations and optional fixtures
//! - Audit worker pool
//! - HTTP server

use anyhow::Result;
use tracing::info;

use hr_admin::config::Settings;
use hr_admin::presentation::http::handlers::health;
use hr_admin::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    hr_admin::telemetry::init_tracing();
    health::init_server_start();

    info!("Starting HR Admin...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        audit_workers = settings.audit.workers,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
