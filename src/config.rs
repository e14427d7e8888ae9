/// Configuration management for Post Service
///
/// This module handles loading configuration from environment variables.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::middleware::RateLimitConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Flat-file storage configuration
    pub storage: StorageConfig,
    /// Rate limiting for the listing/creation endpoints
    pub rate_limit: RateLimitConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins; "*" permits any origin
    pub allowed_origins: String,
}

/// Flat-file storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON file holding the post collection
    pub data_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            app: AppConfig {
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                host: std::env::var("POST_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("POST_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(5002),
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "*".to_string()),
            },
            storage: StorageConfig {
                data_file: std::env::var("POSTS_DATA_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("posts.json")),
            },
            rate_limit: RateLimitConfig {
                max_requests: parse_env_or_default("RATE_LIMIT_MAX_REQUESTS", 5)?,
                window_seconds: parse_env_or_default("RATE_LIMIT_WINDOW_SECONDS", 60)?,
            },
        })
    }
}

fn parse_env_or_default<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}
