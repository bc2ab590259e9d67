//! # Frame Cost
//!
//! Prices the frame itself with exactly one of two strategies.
//!
//! ## Strategy Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  stacker_frame && shadow_depth > 0 ?                                    │
//! │       │                                                                 │
//! │       ├── yes ──► STACKER                                               │
//! │       │           perimeter_ft × Σ(layer price/ft × count) + assembly   │
//! │       │           marked up with stacker_markup_multiplier              │
//! │       │                                                                 │
//! │       └── no ───► STANDARD                                              │
//! │                   join_cost/ft × join_feet                              │
//! │                   join_feet = chop_only ? config value                  │
//! │                             : max(4, ⌈(2·UI + 8 + 4·width) / 12⌉)       │
//! │                   marked up with markup_multiplier                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Greedy Depth Decomposition
//! Desired depth 4.0" with layers {2.5", 1.5"}:
//! ```text
//! remaining 4.0 ── 2.5" × ⌊4.0/2.5⌋=1 ──► remaining 1.5
//! remaining 1.5 ── 1.5" × ⌊1.5/1.5⌋=1 ──► remaining 0.0  (exact)
//! ```
//! Deepest-first is a heuristic, not an optimal cover. Whatever depth the
//! catalog cannot reach is reported as `uncovered_depth_inches`.

use serde::Serialize;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::catalog::{CatalogSource, DEFAULT_MOULDING_WIDTH_INCHES};
use crate::config::PricingConfig;
use crate::dimensions::Dimensions;
use crate::types::OrderSpecification;

/// Minimum billable join feet for a standard frame.
pub const MIN_JOIN_FEET: f64 = 4.0;

/// Float slack when dividing remaining depth by a layer depth.
const DEPTH_EPSILON: f64 = 1e-9;

/// Which strategy priced the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FrameStrategy {
    Standard,
    Stacker,
}

/// One stacked depth layer in a shadowbox build.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StackerLayer {
    pub sku: String,
    pub depth_inches: f64,
    pub count: u32,
    /// Pre-markup cost of all `count` layers.
    pub cost: f64,
}

/// Outcome of frame pricing (pre-markup dollars).
#[derive(Debug, Clone, PartialEq)]
pub enum FrameCost {
    Standard {
        sku: Option<String>,
        /// False when the SKU missed the catalog and defaults were used.
        catalog_hit: bool,
        moulding_width_inches: f64,
        join_cost_per_foot: f64,
        join_feet: f64,
        cost: f64,
    },
    Stacker {
        perimeter_feet: f64,
        desired_depth_inches: f64,
        layers: Vec<StackerLayer>,
        uncovered_depth_inches: f64,
        assembly_charge: f64,
        cost: f64,
    },
}

impl FrameCost {
    /// Pre-markup frame dollars.
    pub fn cost(&self) -> f64 {
        match self {
            FrameCost::Standard { cost, .. } | FrameCost::Stacker { cost, .. } => *cost,
        }
    }

    pub fn strategy(&self) -> FrameStrategy {
        match self {
            FrameCost::Standard { .. } => FrameStrategy::Standard,
            FrameCost::Stacker { .. } => FrameStrategy::Stacker,
        }
    }

    /// Markup that applies to this frame's order.
    pub fn markup(&self, config: &PricingConfig) -> f64 {
        match self.strategy() {
            FrameStrategy::Standard => config.markup_multiplier,
            FrameStrategy::Stacker => config.stacker_markup_multiplier,
        }
    }
}

/// Chooses the strategy and prices the frame.
pub fn resolve_frame_cost<C: CatalogSource + ?Sized>(
    order: &OrderSpecification,
    dims: &Dimensions,
    catalog: &C,
    config: &PricingConfig,
) -> FrameCost {
    let depth = order.shadow_depth.value();
    if order.stacker_frame && depth > 0.0 {
        stacker_cost(dims.perimeter_feet(), depth, config)
    } else {
        standard_cost(order, dims, catalog, config)
    }
}

/// Billable join feet for a standard frame.
pub fn join_feet(united_inches: f64, moulding_width: f64, chop_only: bool, config: &PricingConfig) -> f64 {
    if chop_only {
        return config.chop_only_join_feet;
    }
    let raw = ((2.0 * united_inches + 8.0 + moulding_width * 4.0) / 12.0).ceil();
    raw.max(MIN_JOIN_FEET)
}

fn standard_cost<C: CatalogSource + ?Sized>(
    order: &OrderSpecification,
    dims: &Dimensions,
    catalog: &C,
    config: &PricingConfig,
) -> FrameCost {
    let sku = order.frame_sku();
    let record = sku.and_then(|s| catalog.lookup_moulding(s));

    let (width, join_cost) = match record {
        Some(r) => (r.width_inches, r.join_cost_per_foot),
        None => {
            if let Some(s) = sku {
                debug!(sku = s, "Moulding not in catalog, using default width and zero join cost");
            }
            (DEFAULT_MOULDING_WIDTH_INCHES, 0.0)
        }
    };

    let feet = join_feet(dims.united_inches, width, order.chop_only, config);

    FrameCost::Standard {
        sku: sku.map(str::to_string),
        catalog_hit: record.is_some(),
        moulding_width_inches: width,
        join_cost_per_foot: join_cost,
        join_feet: feet,
        cost: join_cost * feet,
    }
}

/// Greedy deepest-first layering of the stacker catalog.
pub fn stacker_cost(perimeter_feet: f64, desired_depth: f64, config: &PricingConfig) -> FrameCost {
    let mut remaining = desired_depth;
    let mut layers = Vec::new();

    for profile in config.stacker_profiles_by_depth() {
        if remaining <= DEPTH_EPSILON {
            break;
        }
        let count = (remaining / profile.depth_inches + DEPTH_EPSILON).floor();
        if count < 1.0 {
            continue;
        }
        layers.push(StackerLayer {
            sku: profile.sku.clone(),
            depth_inches: profile.depth_inches,
            count: count as u32,
            cost: perimeter_feet * profile.price_per_foot * count,
        });
        remaining -= count * profile.depth_inches;
    }

    let uncovered = if remaining > DEPTH_EPSILON { remaining } else { 0.0 };
    if uncovered > 0.0 {
        warn!(
            desired_depth,
            uncovered, "Stacker catalog cannot reach desired depth exactly"
        );
    }

    let layer_total: f64 = layers.iter().map(|l| l.cost).sum();
    let assembly_charge = config.stacker_assembly_charge;

    FrameCost::Stacker {
        perimeter_feet,
        desired_depth_inches: desired_depth,
        layers,
        uncovered_depth_inches: uncovered,
        assembly_charge,
        cost: layer_total + assembly_charge,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogIndex, MouldingRecord};
    use crate::config::StackerProfile;
    use crate::measurement::Measurement;

    fn catalog() -> CatalogIndex {
        CatalogIndex::from_records(vec![MouldingRecord::new("8694", 1.5, 2.5634)], vec![]).unwrap()
    }

    fn two_layer_config() -> PricingConfig {
        PricingConfig {
            stacker_frame_catalog: vec![
                StackerProfile::new("STK-150", 1.5, 8.36),
                StackerProfile::new("STK-250", 2.5, 11.81),
            ],
            stacker_assembly_charge: 25.0,
            ..Default::default()
        }
    }

    fn order(sku: &str, w: f64, h: f64) -> OrderSpecification {
        OrderSpecification {
            frame_sku: sku.to_string(),
            width: Measurement::from(w),
            height: Measurement::from(h),
            ..Default::default()
        }
    }

    #[test]
    fn test_join_feet_formula() {
        let config = PricingConfig::default();
        // (160 + 8 + 6) / 12 = 14.5 → 15
        assert_eq!(join_feet(80.0, 1.5, false, &config), 15.0);
        // tiny piece still bills 4 feet
        assert_eq!(join_feet(4.0, 0.5, false, &config), 4.0);
        assert_eq!(join_feet(80.0, 1.5, true, &config), config.chop_only_join_feet);
    }

    #[test]
    fn test_standard_catalog_hit() {
        let o = order("8694", 20.0, 60.0);
        let dims = Dimensions::from_order(&o);
        let cost = resolve_frame_cost(&o, &dims, &catalog(), &PricingConfig::default());

        assert_eq!(cost.strategy(), FrameStrategy::Standard);
        assert!((cost.cost() - 2.5634 * 15.0).abs() < 1e-9);
        match cost {
            FrameCost::Standard { catalog_hit, join_feet, .. } => {
                assert!(catalog_hit);
                assert_eq!(join_feet, 15.0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_standard_catalog_miss_degrades() {
        let o = order("NOPE", 20.0, 60.0);
        let dims = Dimensions::from_order(&o);
        let cost = resolve_frame_cost(&o, &dims, &catalog(), &PricingConfig::default());

        assert_eq!(cost.cost(), 0.0);
        match cost {
            FrameCost::Standard {
                catalog_hit,
                moulding_width_inches,
                join_feet,
                ..
            } => {
                assert!(!catalog_hit);
                assert_eq!(moulding_width_inches, 2.0);
                // (160 + 8 + 8) / 12 = 14.67 → 15
                assert_eq!(join_feet, 15.0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_stacker_exact_cover() {
        let config = two_layer_config();
        let cost = stacker_cost(6.0, 4.0, &config);

        match &cost {
            FrameCost::Stacker {
                layers,
                uncovered_depth_inches,
                ..
            } => {
                assert_eq!(layers.len(), 2);
                assert_eq!(layers[0].sku, "STK-250");
                assert_eq!(layers[0].count, 1);
                assert_eq!(layers[1].sku, "STK-150");
                assert_eq!(layers[1].count, 1);
                assert_eq!(*uncovered_depth_inches, 0.0);
            }
            _ => unreachable!(),
        }
        let expected = 6.0 * (11.81 + 8.36) + 25.0;
        assert!((cost.cost() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_stacker_multiple_layers_of_one_profile() {
        let config = two_layer_config();
        match stacker_cost(1.0, 5.0, &config) {
            FrameCost::Stacker { layers, .. } => {
                assert_eq!(layers.len(), 1);
                assert_eq!(layers[0].count, 2);
                assert!((layers[0].cost - 2.0 * 11.81).abs() < 1e-9);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_stacker_leaves_uncovered_depth() {
        let config = two_layer_config();
        match stacker_cost(1.0, 1.0, &config) {
            FrameCost::Stacker {
                layers,
                uncovered_depth_inches,
                cost,
                ..
            } => {
                assert!(layers.is_empty());
                assert_eq!(uncovered_depth_inches, 1.0);
                assert_eq!(cost, 25.0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_stacker_requires_positive_depth() {
        let mut o = order("8694", 20.0, 60.0);
        o.stacker_frame = true;
        let dims = Dimensions::from_order(&o);
        let cost = resolve_frame_cost(&o, &dims, &catalog(), &two_layer_config());
        assert_eq!(cost.strategy(), FrameStrategy::Standard);

        o.shadow_depth = Measurement::parse("4");
        let cost = resolve_frame_cost(&o, &dims, &catalog(), &two_layer_config());
        assert_eq!(cost.strategy(), FrameStrategy::Stacker);
        assert_eq!(cost.markup(&two_layer_config()), 2.5);
    }
}
