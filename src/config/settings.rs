//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Database configuration (PostgreSQL)
    pub database: DatabaseSettings,

    /// JWT authentication settings
    pub jwt: JwtSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// API call audit log settings
    pub audit: AuditSettings,

    /// CSV fixture loading at startup
    pub fixtures: FixtureSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// PostgreSQL database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,

    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

/// JWT authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens
    pub secret: String,

    /// Token lifetime in minutes
    pub expiry_minutes: i64,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

/// Audit log worker pool configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditSettings {
    /// Number of persisting workers (1-5)
    pub workers: usize,

    /// Pending records held before new ones are dropped
    pub queue_capacity: usize,

    /// Request/response bodies are cut at this many characters
    pub max_body_chars: usize,

    /// JSON request bodies larger than this are rejected with 413
    pub max_request_bytes: usize,
}

/// Fixture loading configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureSettings {
    /// Replace reference data with the CSV fixtures on startup
    pub enabled: bool,

    /// Directory holding department.csv, tier.csv, location.csv and employee.csv
    pub dir: String,
}

/// Request body cap applied by the audit middleware (2 MiB)
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 2 * 1024 * 1024;

/// Minimum required length for JWT secret (256 bits = 32 bytes)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Upper bound on audit workers
pub const MAX_AUDIT_WORKERS: usize = 5;

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout", 30)?
            .set_default("database.run_migrations", true)?
            .set_default("jwt.expiry_minutes", 60 * 24)?
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            .set_default("audit.workers", 2)?
            .set_default("audit.queue_capacity", 100)?
            .set_default("audit.max_body_chars", 1000)?
            .set_default("audit.max_request_bytes", DEFAULT_MAX_REQUEST_BYTES as i64)?
            .set_default("fixtures.enabled", false)?
            .set_default("fixtures.dir", "data")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__SERVER__PORT=8080 -> server.port = 8080
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| settings.validate().map(|_| settings))
    }

    /// Check values that deserialize fine but are unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "JWT secret must be at least {} characters for security. Current length: {}",
                MIN_JWT_SECRET_LENGTH,
                self.jwt.secret.len()
            )));
        }
        if self.audit.workers == 0 || self.audit.workers > MAX_AUDIT_WORKERS {
            return Err(ConfigError::Message(format!(
                "audit.workers must be between 1 and {}, got {}",
                MAX_AUDIT_WORKERS, self.audit.workers
            )));
        }
        if self.audit.queue_capacity == 0 {
            return Err(ConfigError::Message(
                "audit.queue_capacity must be greater than zero".into(),
            ));
        }
        if self.audit.max_request_bytes == 0 {
            return Err(ConfigError::Message(
                "audit.max_request_bytes must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl ServerSettings {
    /// Get the socket address for binding.
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            workers: 2,
            queue_capacity: 100,
            max_body_chars: 1000,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
        }
    }
}
