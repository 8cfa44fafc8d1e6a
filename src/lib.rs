//! Sumi-Sieve: crawl admission and content deduplication
//!
//! This crate decides, for every fetched page, whether its outgoing links are
//! worth adding to a crawl frontier and whether its content is a near-duplicate
//! of something already seen. Fetching and scheduling are left to the caller,
//! which hands each `(url, FetchResult)` pair to an [`Engine`].

pub mod admission;
pub mod config;
pub mod content;
pub mod dedup;
pub mod engine;
pub mod fingerprint;
pub mod output;
pub mod replay;
pub mod state;
pub mod stats;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Sieve operations
#[derive(Debug, Error)]
pub enum SieveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] replay::ManifestError),

    #[error("Worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Sumi-Sieve operations
pub type Result<T> = std::result::Result<T, SieveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use admission::{AdmissionFilter, Rejection};
pub use config::Config;
pub use engine::{Engine, FetchResult};
pub use fingerprint::{Fingerprint, FingerprintWidth};
pub use stats::Report;
pub use url::normalize_link;
