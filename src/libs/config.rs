//! Startup configuration for the taskboard application.
//!
//! The configuration is resolved exactly once in `main` and handed to the
//! rest of the application explicitly (actix app data) — there is no global
//! connection state. CLI flags win over environment variables; `.env` files
//! are loaded by the binary before resolution.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Environment variable naming the SQLite database file.
pub const ENV_DB: &str = "TASKBOARD_DB";

/// Environment variable naming the listen address.
pub const ENV_LISTEN: &str = "TASKBOARD_LISTEN";

pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Config {
    /// Location of the backing store. Required: there is no default, a
    /// process without a configured database must not start.
    pub db_path: PathBuf,
    /// Socket address the HTTP server binds to.
    pub listen: String,
}

impl Config {
    /// Resolves the configuration from CLI overrides and the environment.
    ///
    /// Fails fast when no database location is configured; the listen
    /// address falls back to [`DEFAULT_LISTEN`].
    pub fn resolve(db_path: Option<PathBuf>, listen: Option<String>) -> Result<Self> {
        let db_path = match db_path.or_else(|| env::var(ENV_DB).ok().map(PathBuf::from)) {
            Some(path) => path,
            None => bail!("no database configured: pass --db <PATH> or set {}", ENV_DB),
        };

        let listen = listen.or_else(|| env::var(ENV_LISTEN).ok()).unwrap_or_else(|| DEFAULT_LISTEN.to_string());

        Ok(Config { db_path, listen })
    }
}
