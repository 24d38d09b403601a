use std::env;

use crate::config::ConfigError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 7000;

/// HTTP server and logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Origin of the website allowed to call the API with credentials
    pub cors_allowed_origin: Option<String>,
    /// Directory of built frontend assets served for non-API paths
    pub static_dir: Option<String>,
    pub log_dir: String,
    pub file_log_level: String,
}

impl AppConfig {
    /// Load application configuration from environment variables
    ///
    /// Expected environment variables:
    /// - APP_HOST: listen address (defaults to 0.0.0.0)
    /// - PORT or APP_PORT: listen port (defaults to 7000)
    /// - CORS_ALLOWED_ORIGIN: website origin (optional)
    /// - STATIC_DIR: frontend build directory (optional)
    /// - LOG_DIR: directory for rolling log files (defaults to logs)
    /// - FILE_LOG_LEVEL: filter for file logs (defaults to debug)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] but reading from an arbitrary lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = non_empty("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match non_empty("PORT").or_else(|| non_empty("APP_PORT")) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue(format!("Invalid port: {}", raw)))?,
            None => DEFAULT_PORT,
        };

        let config = AppConfig {
            host,
            port,
            cors_allowed_origin: non_empty("CORS_ALLOWED_ORIGIN").map(|o| o.trim_end_matches('/').to_string()),
            static_dir: non_empty("STATIC_DIR"),
            log_dir: non_empty("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            file_log_level: non_empty("FILE_LOG_LEVEL").unwrap_or_else(|| "debug".to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.parse::<std::net::IpAddr>().is_err() {
            return Err(ConfigError::ValidationError(format!("APP_HOST is not an IP address: {}", self.host)));
        }
        if let Some(ref origin) = self.cors_allowed_origin {
            if !origin.starts_with("http://") && !origin.starts_with("https://") {
                return Err(ConfigError::ValidationError(format!(
                    "CORS_ALLOWED_ORIGIN must start with http:// or https://: {}",
                    origin
                )));
            }
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_allowed_origin: None,
            static_dir: None,
            log_dir: "logs".to_string(),
            file_log_level: "debug".to_string(),
        }
    }
}
