//! # Config Store
//!
//! The live `PricingConfig` shared by every quote, and the gate in front of
//! changing it.
//!
//! ## Snapshot Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   quote A ── snapshot() ──► Arc<v1> ──────────── calculate(.., &v1)     │
//! │                                                                         │
//! │   admin  ── update(v2, secret, policy)                                  │
//! │               │  validate v2                                            │
//! │               │  policy.authorize(&v1, secret)                          │
//! │               ▼                                                         │
//! │            RwLock<Arc<v1>>  ──swap──►  RwLock<Arc<v2>>                  │
//! │                                                                         │
//! │   quote B ── snapshot() ──► Arc<v2>                                     │
//! │                                                                         │
//! │   Quote A finishes on v1. Last write wins.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The write lock is held only for the pointer swap, never while hashing.

use std::sync::{Arc, PoisonError, RwLock};

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use framequote_core::PricingConfig;
use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Update Policy
// =============================================================================

/// Decides whether a caller may replace the pricing config.
pub trait UpdatePolicy: Send + Sync {
    fn authorize(&self, current: &PricingConfig, secret: &str) -> StoreResult<()>;
}

/// Verifies the secret against `current.auth_secret_digest` (argon2 PHC).
///
/// With no digest configured, every update is refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Policy;

impl UpdatePolicy for Argon2Policy {
    fn authorize(&self, current: &PricingConfig, secret: &str) -> StoreResult<()> {
        let digest = current.auth_secret_digest.as_deref().ok_or_else(|| {
            StoreError::Unauthorized("no admin secret digest configured".to_string())
        })?;

        let parsed = PasswordHash::new(digest).map_err(|e| StoreError::InvalidDigest(e.to_string()))?;

        Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .map_err(|_| StoreError::Unauthorized("admin secret does not match".to_string()))
    }
}

/// Hashes an admin secret into a PHC string for `auth_secret_digest`.
pub fn hash_admin_secret(secret: &str) -> StoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| StoreError::Hashing(e.to_string()))?;

    Ok(hash.to_string())
}

// =============================================================================
// Config Store
// =============================================================================

/// Shared, swappable pricing config.
#[derive(Debug)]
pub struct ConfigStore {
    current: RwLock<Arc<PricingConfig>>,
}

impl ConfigStore {
    pub fn new(config: PricingConfig) -> Self {
        ConfigStore {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// The config to price with. Holding the `Arc` pins this version even
    /// if an update lands mid-quote.
    pub fn snapshot(&self) -> Arc<PricingConfig> {
        // The guarded value is only ever replaced whole, so a poisoned lock
        // still holds a consistent Arc.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Validates, authorizes against the current snapshot, then swaps.
    ///
    /// When `new` carries no digest the current one is kept, so an update
    /// cannot lock the admin out by omission.
    pub fn update(
        &self,
        mut new: PricingConfig,
        secret: &str,
        policy: &dyn UpdatePolicy,
    ) -> StoreResult<Arc<PricingConfig>> {
        new.validate()?;

        let current = self.snapshot();
        if let Err(e) = policy.authorize(&current, secret) {
            warn!(error = %e, "Rejected pricing config update");
            return Err(e);
        }

        if new.auth_secret_digest.is_none() {
            new.auth_secret_digest = current.auth_secret_digest.clone();
        }

        let new = Arc::new(new);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&new);

        info!(
            markup = new.markup_multiplier,
            stacker_markup = new.stacker_markup_multiplier,
            "Pricing config updated"
        );
        Ok(new)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
