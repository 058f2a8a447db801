//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote registration service
    pub remote_api_base_url: String,

    /// HTTP timeout for calls to the registration service
    pub remote_api_timeout_secs: u64,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let remote_api_base_url = env::var("REMOTE_API_BASE_URL")
            .map_err(|_| ConfigError::MissingEnv("REMOTE_API_BASE_URL"))?;

        if !remote_api_base_url.starts_with("http://") && !remote_api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue("REMOTE_API_BASE_URL"));
        }

        let remote_api_timeout_secs = env::var("REMOTE_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("REMOTE_API_TIMEOUT_SECS"))?;

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Self {
            remote_api_base_url,
            remote_api_timeout_secs,
            host,
            port,
            environment,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(environment: &str) -> Config {
        Config {
            remote_api_base_url: "https://api.example.com".to_string(),
            remote_api_timeout_secs: 30,
            host: "127.0.0.1".to_string(),
            port: 3000,
            environment: environment.to_string(),
        }
    }

    #[test]
    fn test_is_production() {
        assert!(config("production").is_production());
        assert!(!config("development").is_production());
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::MissingEnv("REMOTE_API_BASE_URL");
        assert!(err.to_string().contains("REMOTE_API_BASE_URL"));
    }
}
