//! Environment-driven configuration.
//!
//! Values come from the process environment, after `.env` has been loaded
//! by the binary. Optional settings fall back to logged defaults; backend
//! credentials are only required when the live backend is used.

use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

/// Default public origin used in contact cards when none is configured.
pub const DEFAULT_APP_URL: &str = "https://yourapp.com";

/// Configuration problems detected at start-up.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("Environment variable {0} is required but not set")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("Invalid {key} value: {message}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Parser error message.
        message: String,
    },
}

/// Server settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server binds on `0.0.0.0`.
    pub port: u16,
    /// Public origin of the site, without a trailing slash.
    pub app_url: String,
}

impl Config {
    /// Loads server settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `TAPTAG_PORT` is set but is not a valid port.
    pub fn load() -> Result<Self, ConfigError> {
        let app_url: String = try_load("TAPTAG_APP_URL", DEFAULT_APP_URL)?;
        Ok(Self {
            port: try_load("TAPTAG_PORT", "3000")?,
            app_url: app_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { port: 3000, app_url: DEFAULT_APP_URL.to_string() }
    }
}

/// Credentials for the hosted backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`.
    pub url: String,
    /// Public (anon) API key.
    pub anon_key: String,
    /// Service-role key; preferred for server-side reads and writes.
    pub service_role_key: Option<String>,
}

impl BackendConfig {
    /// Loads backend credentials from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `SUPABASE_URL` or `SUPABASE_ANON_KEY` is missing.
    pub fn load() -> Result<Self, ConfigError> {
        let url = required("SUPABASE_URL")?;
        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: required("SUPABASE_ANON_KEY")?,
            service_role_key: var("SUPABASE_SERVICE_ROLE_KEY"),
        })
    }

    /// The key used for server-side data access.
    #[must_use]
    pub fn data_key(&self) -> &str {
        self.service_role_key.as_deref().unwrap_or(&self.anon_key)
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    var(key).ok_or(ConfigError::Missing(key))
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid { key, message: e.to_string() }
        })
}
