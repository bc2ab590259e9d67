//! # Shipping
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  delivery = pickup ? ──► 0                                              │
//! │        │ no                                                             │
//! │        ▼                                                                │
//! │  chop_only ? ──► 29 flat                                                │
//! │        │ no                                                             │
//! │        ▼                                                                │
//! │  first tier (ascending) with min ≤ UI ≤ max ──► tier.rate              │
//! │  none matched ──► lowest tier's rate                                    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  + 99 when destination is HI/AK/PR and UI < 75                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::config::PricingConfig;
use crate::region::is_remote;
use crate::types::DeliveryMethod;

/// Flat rate for chop-only (unjoined moulding) shipments.
pub const CHOP_ONLY_SHIPPING: f64 = 29.0;

/// Added to shipments to Hawaii, Alaska and Puerto Rico.
pub const REMOTE_SURCHARGE: f64 = 99.0;

/// Remote surcharge only applies below this size; larger pieces already
/// sit in freight tiers.
pub const REMOTE_SURCHARGE_MAX_UNITED_INCHES: f64 = 75.0;

/// Shipping charge in dollars.
pub fn shipping_cost(
    delivery: DeliveryMethod,
    chop_only: bool,
    united_inches: f64,
    destination: &str,
    config: &PricingConfig,
) -> f64 {
    if delivery == DeliveryMethod::Pickup {
        return 0.0;
    }

    let base = if chop_only {
        CHOP_ONLY_SHIPPING
    } else {
        tier_rate(united_inches, config)
    };

    if united_inches < REMOTE_SURCHARGE_MAX_UNITED_INCHES && is_remote(destination) {
        debug!(destination, united_inches, "Remote destination surcharge applied");
        base + REMOTE_SURCHARGE
    } else {
        base
    }
}

/// Rate of the first ascending tier containing `united_inches`, falling
/// back to the lowest tier. An empty tier table ships free.
pub fn tier_rate(united_inches: f64, config: &PricingConfig) -> f64 {
    let tiers = config.sorted_tiers();
    match tiers.iter().find(|t| t.contains(united_inches)) {
        Some(tier) => tier.rate,
        None => {
            debug!(united_inches, "No shipping tier matched, using lowest tier");
            tiers.first().map(|t| t.rate).unwrap_or(0.0)
        }
    }
}
