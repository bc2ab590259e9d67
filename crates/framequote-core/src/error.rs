//! # Error Types
//!
//! Domain-specific error types for framequote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  framequote-core errors (this file)                                    │
//! │  ├── CoreError     - Umbrella for everything below                     │
//! │  ├── CatalogError  - Building a CatalogIndex from records              │
//! │  └── ConfigError   - PricingConfig::validate failures                  │
//! │                                                                         │
//! │  framequote-store errors (separate crate)                              │
//! │  └── StoreError    - File, TOML, JSON and authorization failures       │
//! │                                                                         │
//! │  NOT AN ERROR: bad measurement text (→ 0), unknown SKU (→ default)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `calculate()` itself is infallible. These errors only surface while a
//! catalog or a config snapshot is being built, before any quote runs.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while assembling the engine's inputs.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Catalog construction failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Pricing configuration is unusable.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

// =============================================================================
// Catalog Error
// =============================================================================

/// Failures while building a [`crate::catalog::CatalogIndex`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The same SKU appears twice in one record kind.
    ///
    /// ## When This Occurs
    /// - A vendor export lists a moulding twice with different prices
    /// - Two supply sheets were concatenated without dedup
    #[error("Duplicate {kind} SKU: '{sku}'")]
    DuplicateSku { kind: &'static str, sku: String },

    /// A record is structurally unusable (blank SKU, negative price...).
    #[error("Invalid {kind} record '{sku}': {reason}")]
    InvalidRecord {
        kind: &'static str,
        sku: String,
        reason: String,
    },
}

// =============================================================================
// Config Error
// =============================================================================

/// Failures from [`crate::config::PricingConfig::validate`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A multiplier or charge that must be positive is not.
    #[error("{field} must be positive, got {value}")]
    MustBePositive { field: String, value: f64 },

    /// A value that must not be negative is.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: f64 },

    /// A shipping tier whose `min` is above its `max`.
    #[error("Shipping tier {index} is inverted: min {min} > max {max}")]
    InvertedTier { index: usize, min: f64, max: f64 },

    /// Two shipping tiers cover the same united-inch range.
    #[error("Shipping tiers overlap at {at} united inches")]
    OverlappingTiers { at: f64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CatalogError::DuplicateSku {
            kind: "moulding",
            sku: "8694".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate moulding SKU: '8694'");

        let err = ConfigError::InvertedTier {
            index: 2,
            min: 50.0,
            max: 40.0,
        };
        assert_eq!(
            err.to_string(),
            "Shipping tier 2 is inverted: min 50 > max 40"
        );
    }

    #[test]
    fn test_config_error_converts_to_core_error() {
        let err = ConfigError::MustBePositive {
            field: "markup_multiplier".to_string(),
            value: 0.0,
        };
        let core_err: CoreError = err.into();
        assert!(matches!(core_err, CoreError::Config(_)));
    }
}
