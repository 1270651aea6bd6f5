//! # Configuration Module
//!
//! Settings are layered: built-in defaults, then `config/default.toml` and
//! `config/{RUN_ENV}.toml`, then `APP__*` environment variables and the plain
//! overrides (`SERVER_HOST`, `SERVER_PORT`, `DATABASE_URL`, `JWT_SECRET`).
//! A `.env` file is read first.
//!
//! ```rust,ignore
//! use hr_admin::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Audit queue holds {} records", settings.audit.queue_capacity);
//! ```

mod settings;

pub use settings::*;
