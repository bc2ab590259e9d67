//! # Store Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │      Files      │  │     Formats     │  │     Authorization       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Io             │  │  TomlParse      │  │  Unauthorized           │ │
//! │  │  NoConfigPath   │  │  TomlWrite      │  │  InvalidDigest          │ │
//! │  │                 │  │  Json           │  │  Hashing                │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Core: catalog / config validation failures from framequote-core      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use framequote_core::{CatalogError, ConfigError, CoreError};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // File Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No explicit path given and the platform has no config directory.
    #[error("No config path available")]
    NoConfigPath,

    #[error("Catalog file not found: {0}")]
    CatalogNotFound(PathBuf),

    // =========================================================================
    // Format Errors
    // =========================================================================
    #[error("Invalid pricing config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to write pricing config TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    /// Secret did not verify, or updates are disabled (no digest set).
    #[error("Config update not authorized: {0}")]
    Unauthorized(String),

    /// Stored digest is not a valid PHC string.
    #[error("Invalid admin secret digest: {0}")]
    InvalidDigest(String),

    #[error("Failed to hash admin secret: {0}")]
    Hashing(String),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<ConfigError> for StoreError {
    fn from(err: ConfigError) -> Self {
        StoreError::Core(CoreError::from(err))
    }
}

impl From<CatalogError> for StoreError {
    fn from(err: CatalogError) -> Self {
        StoreError::Core(CoreError::from(err))
    }
}

impl StoreError {
    /// True for failures the operator fixes by supplying the right secret.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, StoreError::Unauthorized(_) | StoreError::InvalidDigest(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_wraps_into_core() {
        let err: StoreError = ConfigError::MustBePositive {
            field: "markup_multiplier".to_string(),
            value: 0.0,
        }
        .into();
        assert!(matches!(err, StoreError::Core(CoreError::Config(_))));
        assert!(!err.is_auth_error());
    }

    #[test]
    fn test_auth_errors() {
        assert!(StoreError::Unauthorized("bad secret".into()).is_auth_error());
        assert!(StoreError::InvalidDigest("garbage".into()).is_auth_error());
    }
}
