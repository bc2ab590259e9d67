//! # Pricing Settings
//!
//! Loads and saves the `PricingConfig` snapshot.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FRAMEQUOTE_MARKUP=3.0                                              │
//! │     FRAMEQUOTE_STACKER_MARKUP=2.5                                      │
//! │     FRAMEQUOTE_CHOP_ONLY_JOIN_FEET=10                                  │
//! │     FRAMEQUOTE_STANDALONE_MULTIPLIER=3.0                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/framequote/pricing.toml (Linux)                          │
//! │     ~/Library/Application Support/com.framequote.framequote/... (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     PricingConfig::default()                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pricing.toml
//! markup_multiplier = 2.75
//! stacker_markup_multiplier = 2.5
//! standalone_multiplier = 3.0
//! chop_only_join_feet = 10.0
//! stacker_assembly_charge = 25.0
//! auth_secret_digest = "$argon2id$v=19$m=19456,t=2,p=1$..."
//!
//! [[shipping_tiers]]
//! min = 0.0
//! max = 30.0
//! rate = 15.0
//!
//! [acrylic_prices]
//! Standard = 0.009
//! Museum = 0.03
//!
//! [add_ons]
//! engraved_plaque = 30.0
//! ```
//!
//! Any key left out keeps its default.

use std::path::{Path, PathBuf};

use framequote_core::PricingConfig;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// File name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "pricing.toml";

pub const ENV_MARKUP: &str = "FRAMEQUOTE_MARKUP";
pub const ENV_STACKER_MARKUP: &str = "FRAMEQUOTE_STACKER_MARKUP";
pub const ENV_CHOP_ONLY_JOIN_FEET: &str = "FRAMEQUOTE_CHOP_ONLY_JOIN_FEET";
pub const ENV_STANDALONE_MULTIPLIER: &str = "FRAMEQUOTE_STANDALONE_MULTIPLIER";

/// Loads the config from `path` (or the default location), applies
/// environment overrides and validates the result.
///
/// A missing file is not an error: defaults are used.
pub fn load(path: Option<&Path>) -> StoreResult<PricingConfig> {
    let mut config = PricingConfig::default();

    if let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) {
        if path.exists() {
            info!(?path, "Loading pricing config from file");
            let contents = std::fs::read_to_string(&path)?;
            config = toml::from_str(&contents)?;
        } else {
            debug!(?path, "Pricing config file not found, using defaults");
        }
    }

    apply_env_overrides(&mut config);
    config.validate()?;

    Ok(config)
}

/// Loads the config or falls back to defaults on any failure.
pub fn load_or_default(path: Option<&Path>) -> PricingConfig {
    load(path).unwrap_or_else(|e| {
        warn!("Failed to load pricing config: {}. Using defaults.", e);
        PricingConfig::default()
    })
}

/// Parses and validates a config from TOML text, without env overrides.
pub fn from_toml_str(contents: &str) -> StoreResult<PricingConfig> {
    let config: PricingConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Writes the config as pretty TOML, creating parent directories.
pub fn save(config: &PricingConfig, path: Option<&Path>) -> StoreResult<PathBuf> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(default_config_path)
        .ok_or(StoreError::NoConfigPath)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(&path, contents)?;

    info!(?path, "Pricing config saved");
    Ok(path)
}

/// Applies `FRAMEQUOTE_*` environment overrides.
pub fn apply_env_overrides(config: &mut PricingConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

/// Override logic with an injectable lookup (tests avoid the process env).
fn apply_overrides(config: &mut PricingConfig, lookup: impl Fn(&str) -> Option<String>) {
    let levers: [(&str, &mut f64); 4] = [
        (ENV_MARKUP, &mut config.markup_multiplier),
        (ENV_STACKER_MARKUP, &mut config.stacker_markup_multiplier),
        (ENV_CHOP_ONLY_JOIN_FEET, &mut config.chop_only_join_feet),
        (ENV_STANDALONE_MULTIPLIER, &mut config.standalone_multiplier),
    ];

    for (key, slot) in levers {
        if let Some(raw) = lookup(key) {
            match raw.trim().parse::<f64>() {
                Ok(value) => {
                    debug!(key, value, "Overriding pricing lever from environment");
                    *slot = value;
                }
                Err(_) => warn!(key, raw = %raw, "Ignoring non-numeric environment override"),
            }
        }
    }
}

/// Platform config path for `pricing.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "framequote", "framequote")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_env_overrides() {
        let env = HashMap::from([
            (ENV_MARKUP, "3.0"),
            (ENV_STANDALONE_MULTIPLIER, " 2.5 "),
            (ENV_STACKER_MARKUP, "lots"),
        ]);
        let mut config = PricingConfig::default();
        apply_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.markup_multiplier, 3.0);
        assert_eq!(config.standalone_multiplier, 2.5);
        // garbage ignored
        assert_eq!(config.stacker_markup_multiplier, 2.5);
        assert_eq!(config.chop_only_join_feet, 10.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = from_toml_str("markup_multiplier = 3.0\n").unwrap();
        assert_eq!(config.markup_multiplier, 3.0);
        assert_eq!(config.shipping_tiers, PricingConfig::default().shipping_tiers);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(matches!(
            from_toml_str("markup_multiplier = \"high\""),
            Err(StoreError::TomlParse(_))
        ));
        assert!(matches!(
            from_toml_str("markup_multiplier = 0.0"),
            Err(StoreError::Core(_))
        ));
    }

    #[test]
    fn test_default_path_file_name() {
        if let Some(path) = default_config_path() {
            assert_eq!(path.file_name().unwrap(), CONFIG_FILE_NAME);
        }
    }
}
