//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::TokenIssuer;
use crate::config::Settings;
use crate::domain::{
    ApiCallRepository, DepartmentRepository, EmployeeRepository, LocationRepository,
    TierRepository,
};
use crate::infrastructure::audit::{AuditQueue, AuditWorkers};
use crate::infrastructure::repositories::{
    PgApiCallRepository, PgDepartmentRepository, PgEmployeeRepository, PgLocationRepository,
    PgTierRepository,
};
use crate::infrastructure::{database, fixtures};
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging};

/// Repository handles used by the handlers
#[derive(Clone)]
pub struct Repositories {
    pub tiers: Arc<dyn TierRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub departments: Arc<dyn DepartmentRepository>,
    pub employees: Arc<dyn EmployeeRepository>,
    pub api_calls: Arc<dyn ApiCallRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            tiers: Arc::new(PgTierRepository::new(pool.clone())),
            locations: Arc::new(PgLocationRepository::new(pool.clone())),
            departments: Arc::new(PgDepartmentRepository::new(pool.clone())),
            employees: Arc::new(PgEmployeeRepository::new(pool.clone())),
            api_calls: Arc::new(PgApiCallRepository::new(pool.clone())),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub repos: Repositories,
    pub tokens: TokenIssuer,
    pub audit: AuditQueue,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(db: PgPool, repos: Repositories, audit: AuditQueue, settings: Settings) -> Self {
        Self {
            db,
            repos,
            tokens: TokenIssuer::new(&settings.jwt),
            audit,
            settings: Arc::new(settings),
        }
    }
}

/// Router with all routes and the global middleware stack
pub fn build_router(state: AppState) -> Router {
    let cors = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
    audit_workers: AuditWorkers,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        // Create database pool
        let db = database::create_pool(&settings.database)
            .await
            .context("Failed to connect to the database")?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
        }

        if settings.fixtures.enabled {
            let summary = fixtures::load_fixtures(&db, Path::new(&settings.fixtures.dir))
                .await
                .context("Failed to load CSV fixtures")?;
            tracing::info!(employees = summary.employees, "CSV fixtures imported");
        }

        let repos = Repositories::postgres(&db);
        let (audit, audit_workers) = AuditQueue::start(repos.api_calls.clone(), &settings.audit);

        let addr = settings.server.socket_addr()?;
        let state = AppState::new(db, repos, audit, settings);
        let router = build_router(state);

        // Bind to address
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self {
            listener,
            router,
            audit_workers,
        })
    }

    /// Run the server until a shutdown signal arrives, then flush pending audit records
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(
            self.listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        // The router owned the last queue senders; workers stop once drained.
        self.audit_workers.join().await;
        tracing::info!("Server stopped");
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
