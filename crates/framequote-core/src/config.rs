//! # Pricing Configuration
//!
//! The business levers every quote reads: markups, shipping tiers, material
//! prices, the stacker profile catalog and the add-on rate card.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Who Touches PricingConfig                           │
//! │                                                                         │
//! │  framequote-store                          framequote-core              │
//! │  ────────────────                          ───────────────              │
//! │  pricing.toml ──► load/validate ──┐                                     │
//! │                                   ▼                                     │
//! │  admin update ──► UpdatePolicy ──► ConfigStore ──► Arc<PricingConfig>  │
//! │                                                          │              │
//! │                                                          ▼              │
//! │                                             calculate(order, cat, &cfg) │
//! │                                                                         │
//! │  The engine only ever sees `&PricingConfig`. It never mutates it and   │
//! │  never checks `auth_secret_digest`.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Config File Format
//! ```toml
//! markup_multiplier = 2.75
//! stacker_markup_multiplier = 2.5
//! standalone_multiplier = 3.0
//! chop_only_join_feet = 10.0
//! stacker_assembly_charge = 25.0
//!
//! [[shipping_tiers]]
//! min = 31.0
//! max = 49.0
//! rate = 19.0
//!
//! [acrylic_prices]
//! Standard = 0.009
//!
//! [[stacker_frame_catalog]]
//! sku = "STK-250"
//! depth_inches = 2.5
//! price_per_foot = 11.81
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ConfigError;

// =============================================================================
// Shipping Tier
// =============================================================================

/// Inclusive united-inch range with a flat shipping rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingTier {
    pub min: f64,
    pub max: f64,
    pub rate: f64,
}

impl ShippingTier {
    pub fn new(min: f64, max: f64, rate: f64) -> Self {
        ShippingTier { min, max, rate }
    }

    /// `min <= united_inches <= max`.
    #[inline]
    pub fn contains(&self, united_inches: f64) -> bool {
        united_inches >= self.min && united_inches <= self.max
    }
}

// =============================================================================
// Stacker Profile
// =============================================================================

/// One depth layer that can be stacked to build a shadowbox frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackerProfile {
    pub sku: String,
    pub depth_inches: f64,
    pub price_per_foot: f64,
}

impl StackerProfile {
    pub fn new(sku: impl Into<String>, depth_inches: f64, price_per_foot: f64) -> Self {
        StackerProfile {
            sku: sku.into(),
            depth_inches,
            price_per_foot,
        }
    }
}

// =============================================================================
// Add-On Rates
// =============================================================================

/// Rate card for mats and services that are not catalog-priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddOnRates {
    /// Mat price when the mat SKU is not in the supply catalog.
    pub default_mat_price: f64,
    /// Per additional window cut in a mat.
    pub extra_mat_opening: f64,
    /// Per square inch.
    pub print_paper: f64,
    /// Per square inch.
    pub dry_mount: f64,
    /// Per square inch, stretched.
    pub print_canvas: f64,
    /// Per square inch, rolled (unstretched).
    pub print_canvas_rolled: f64,
    pub engraved_plaque: f64,
    pub leds: f64,
    pub shadowbox_fitting: f64,
    pub additional_labor: f64,
}

impl Default for AddOnRates {
    fn default() -> Self {
        AddOnRates {
            default_mat_price: 15.0,
            extra_mat_opening: 2.50,
            print_paper: 0.05,
            dry_mount: 0.03,
            print_canvas: 0.08,
            print_canvas_rolled: 0.055,
            engraved_plaque: 30.0,
            leds: 45.0,
            shadowbox_fitting: 17.50,
            additional_labor: 17.50,
        }
    }
}

// =============================================================================
// Pricing Config
// =============================================================================

/// Complete snapshot of pricing levers.
///
/// Scalar fields come first so the struct serializes to valid TOML (plain
/// keys must precede tables).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Markup on frame + add-ons for standard orders.
    pub markup_multiplier: f64,

    /// Markup used when the frame is built from stacker layers.
    pub stacker_markup_multiplier: f64,

    /// Premium on mats/acrylic/backing when no frame is ordered.
    pub standalone_multiplier: f64,

    /// Fixed join-feet assumption for chop-only orders.
    pub chop_only_join_feet: f64,

    /// Flat labor charge added to every stacker build.
    pub stacker_assembly_charge: f64,

    /// argon2 PHC digest of the admin secret. Checked by the store's
    /// update policy, never by the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_secret_digest: Option<String>,

    pub shipping_tiers: Vec<ShippingTier>,

    /// Acrylic type name → price per square inch.
    pub acrylic_prices: BTreeMap<String, f64>,

    /// Backing type name → flat price.
    pub backing_prices: BTreeMap<String, f64>,

    pub stacker_frame_catalog: Vec<StackerProfile>,

    pub add_ons: AddOnRates,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            markup_multiplier: 2.75,
            stacker_markup_multiplier: 2.5,
            standalone_multiplier: 3.0,
            chop_only_join_feet: 10.0,
            stacker_assembly_charge: 25.0,
            auth_secret_digest: None,
            shipping_tiers: vec![
                ShippingTier::new(0.0, 30.0, 15.0),
                ShippingTier::new(31.0, 49.0, 19.0),
                ShippingTier::new(50.0, 74.0, 29.0),
                ShippingTier::new(75.0, 99.0, 49.0),
                ShippingTier::new(100.0, 129.0, 79.0),
                ShippingTier::new(130.0, 999.0, 129.0),
            ],
            acrylic_prices: BTreeMap::from([
                ("Standard".to_string(), 0.009),
                ("Non-Glare".to_string(), 0.012),
                ("UV Filtering".to_string(), 0.015),
                ("Museum".to_string(), 0.03),
            ]),
            backing_prices: BTreeMap::from([
                ("Foam Core".to_string(), 6.0),
                ("Acid-Free Foam".to_string(), 9.0),
                ("Gator Board".to_string(), 14.0),
            ]),
            stacker_frame_catalog: vec![
                StackerProfile::new("STK-250", 2.5, 11.81),
                StackerProfile::new("STK-150", 1.5, 8.36),
                StackerProfile::new("STK-075", 0.75, 5.12),
            ],
            add_ons: AddOnRates::default(),
        }
    }
}

impl PricingConfig {
    /// Checks every lever for values that would make quotes meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        must_be_positive("markup_multiplier", self.markup_multiplier)?;
        must_be_positive("stacker_markup_multiplier", self.stacker_markup_multiplier)?;
        must_be_positive("standalone_multiplier", self.standalone_multiplier)?;
        must_be_positive("chop_only_join_feet", self.chop_only_join_feet)?;
        not_negative("stacker_assembly_charge", self.stacker_assembly_charge)?;

        for (index, tier) in self.shipping_tiers.iter().enumerate() {
            not_negative(&format!("shipping_tiers[{}].rate", index), tier.rate)?;
            if !(tier.min <= tier.max) {
                return Err(ConfigError::InvertedTier {
                    index,
                    min: tier.min,
                    max: tier.max,
                });
            }
        }
        let sorted = self.sorted_tiers();
        for pair in sorted.windows(2) {
            if pair[1].min <= pair[0].max {
                return Err(ConfigError::OverlappingTiers { at: pair[1].min });
            }
        }

        for (name, price) in &self.acrylic_prices {
            not_negative(&format!("acrylic_prices.{}", name), *price)?;
        }
        for (name, price) in &self.backing_prices {
            not_negative(&format!("backing_prices.{}", name), *price)?;
        }
        for profile in &self.stacker_frame_catalog {
            must_be_positive(
                &format!("stacker_frame_catalog.{}.depth_inches", profile.sku),
                profile.depth_inches,
            )?;
            not_negative(
                &format!("stacker_frame_catalog.{}.price_per_foot", profile.sku),
                profile.price_per_foot,
            )?;
        }

        let rates = &self.add_ons;
        for (field, value) in [
            ("add_ons.default_mat_price", rates.default_mat_price),
            ("add_ons.extra_mat_opening", rates.extra_mat_opening),
            ("add_ons.print_paper", rates.print_paper),
            ("add_ons.dry_mount", rates.dry_mount),
            ("add_ons.print_canvas", rates.print_canvas),
            ("add_ons.print_canvas_rolled", rates.print_canvas_rolled),
            ("add_ons.engraved_plaque", rates.engraved_plaque),
            ("add_ons.leds", rates.leds),
            ("add_ons.shadowbox_fitting", rates.shadowbox_fitting),
            ("add_ons.additional_labor", rates.additional_labor),
        ] {
            not_negative(field, value)?;
        }

        Ok(())
    }

    /// Shipping tiers in ascending `min` order (stable for equal mins).
    pub fn sorted_tiers(&self) -> Vec<&ShippingTier> {
        let mut tiers: Vec<&ShippingTier> = self.shipping_tiers.iter().collect();
        tiers.sort_by(|a, b| a.min.total_cmp(&b.min));
        tiers
    }

    /// Price per square inch for an acrylic type (case-insensitive).
    pub fn acrylic_price(&self, acrylic_type: &str) -> Option<f64> {
        lookup_ci(&self.acrylic_prices, acrylic_type)
    }

    /// Flat price for a backing type (case-insensitive).
    pub fn backing_price(&self, backing_type: &str) -> Option<f64> {
        lookup_ci(&self.backing_prices, backing_type)
    }

    /// Stacker profiles deepest first. Ties keep catalog order.
    pub fn stacker_profiles_by_depth(&self) -> Vec<&StackerProfile> {
        let mut profiles: Vec<&StackerProfile> = self
            .stacker_frame_catalog
            .iter()
            .filter(|p| p.depth_inches > 0.0)
            .collect();
        profiles.sort_by(|a, b| b.depth_inches.total_cmp(&a.depth_inches));
        profiles
    }
}

fn lookup_ci(map: &BTreeMap<String, f64>, key: &str) -> Option<f64> {
    let key = key.trim();
    map.get(key).copied().or_else(|| {
        map.iter()
            .find(|(k, _)| k.trim().eq_ignore_ascii_case(key))
            .map(|(_, v)| *v)
    })
}

fn must_be_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::MustBePositive {
            field: field.to_string(),
            value,
        })
    }
}

fn not_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Negative {
            field: field.to_string(),
            value,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
