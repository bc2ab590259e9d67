//! # Quote Assembly
//!
//! The one public entry point: `calculate`.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  OrderSpecification                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Dimensions ──► united_inches, square_inches                            │
//! │         │                                                               │
//! │         ├──► FrameCost (standard | stacker) ──► markup                  │
//! │         ├──► AddOnCharge[]                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  item_total = (frame + Σ add-ons) × markup × quantity                   │
//! │  shipping   = tier / chop-only / pickup  (+ remote surcharge)           │
//! │  sales_tax  = item_total × 7%  (NJ only, else absent)                   │
//! │  total      = item_total + shipping + sales_tax                         │
//! │  balance    = total − deposit                                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The discount field is echoed back but never subtracted.

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::add_ons::{accumulate_add_ons, Component};
use crate::catalog::CatalogSource;
use crate::config::PricingConfig;
use crate::dimensions::Dimensions;
use crate::frame::{resolve_frame_cost, FrameCost, FrameStrategy, StackerLayer};
use crate::money::Money;
use crate::shipping::shipping_cost;
use crate::tax::sales_tax;
use crate::types::OrderSpecification;

// =============================================================================
// Result Types
// =============================================================================

/// One post-markup, post-quantity line on the quote.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub component: Component,
    pub label: String,
    #[ts(type = "string")]
    pub amount: Money,
}

/// How a shadowbox depth was built from stacker profiles.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StackerSummary {
    pub layers: Vec<StackerLayer>,
    /// Depth the profile catalog could not reach; 0 when covered exactly.
    pub uncovered_depth_inches: f64,
}

/// The priced quote.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    #[ts(type = "string")]
    pub item_total: Money,
    #[ts(type = "string")]
    pub shipping: Money,
    /// Absent unless the destination is taxed.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | undefined")]
    pub sales_tax: Option<Money>,
    #[ts(type = "string")]
    pub total: Money,
    #[ts(type = "string")]
    pub deposit: Money,
    #[ts(type = "string")]
    pub balance: Money,
    /// Free-text discount, shown to staff but not applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub discount: Option<String>,
    pub quantity: u32,
    pub markup_multiplier: f64,
    pub united_inches: f64,
    pub square_inches: f64,
    pub frame_strategy: FrameStrategy,
    pub breakdown: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub stacker: Option<StackerSummary>,
}

// =============================================================================
// Calculation
// =============================================================================

/// Prices an order. Pure: same inputs, same result.
///
/// Malformed lengths read as 0 and catalog misses fall back to defaults, so
/// this never fails.
pub fn calculate<C: CatalogSource + ?Sized>(
    order: &OrderSpecification,
    catalog: &C,
    config: &PricingConfig,
) -> PricingResult {
    let dims = Dimensions::from_order(order);
    let frame = resolve_frame_cost(order, &dims, catalog, config);
    let add_ons = accumulate_add_ons(order, &dims, catalog, config);

    let markup = frame.markup(config);
    let quantity = order.quantity();
    let scale = markup * quantity as f64;

    let base: f64 = frame.cost() + add_ons.iter().map(|c| c.cost).sum::<f64>();
    let item_total = Money::from_dollars(base * scale);

    let mut breakdown = Vec::with_capacity(add_ons.len() + 1);
    if let Some(label) = frame_label(order, &frame) {
        breakdown.push(LineItem {
            component: Component::Frame,
            label,
            amount: Money::from_dollars(frame.cost() * scale),
        });
    }
    breakdown.extend(add_ons.into_iter().map(|charge| LineItem {
        component: charge.component,
        label: charge.label,
        amount: Money::from_dollars(charge.cost * scale),
    }));

    let shipping = Money::from_dollars(shipping_cost(
        order.delivery(),
        order.chop_only,
        dims.united_inches,
        &order.destination,
        config,
    ));
    let sales_tax = sales_tax(item_total, &order.destination);
    let total = item_total + shipping + sales_tax.unwrap_or_default();
    let deposit = Money::from_dollars(parse_currency(&order.deposit));
    let balance = total - deposit;

    let discount = Some(order.discount.trim())
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    let stacker = match &frame {
        FrameCost::Stacker {
            layers,
            uncovered_depth_inches,
            ..
        } => Some(StackerSummary {
            layers: layers.clone(),
            uncovered_depth_inches: *uncovered_depth_inches,
        }),
        FrameCost::Standard { .. } => None,
    };

    debug!(
        item_total = %item_total,
        shipping = %shipping,
        total = %total,
        balance = %balance,
        strategy = ?frame.strategy(),
        "Quote calculated"
    );

    PricingResult {
        item_total,
        shipping,
        sales_tax,
        total,
        deposit,
        balance,
        discount,
        quantity,
        markup_multiplier: markup,
        united_inches: dims.united_inches,
        square_inches: dims.square_inches,
        frame_strategy: frame.strategy(),
        breakdown,
        stacker,
    }
}

/// Breakdown label for the frame line; `None` when there is no frame line.
fn frame_label(order: &OrderSpecification, frame: &FrameCost) -> Option<String> {
    match frame {
        FrameCost::Stacker {
            desired_depth_inches,
            ..
        } => Some(format!("Stacker frame ({}\" deep)", desired_depth_inches)),
        FrameCost::Standard { sku: Some(sku), .. } if order.chop_only => {
            Some(format!("Moulding {} (chop only)", sku))
        }
        FrameCost::Standard { sku: Some(sku), .. } => Some(format!("Frame {}", sku)),
        FrameCost::Standard { sku: None, .. } => None,
    }
}

/// Dollar amount from free text like `"$1,200.50"` or `"50 cash"`.
///
/// Keeps digits, the first `.` and a leading `-`; anything unparseable is 0.
pub fn parse_currency(input: &str) -> f64 {
    let mut cleaned = String::with_capacity(input.len());
    let mut seen_dot = false;

    for c in input.chars() {
        match c {
            '0'..='9' => cleaned.push(c),
            '.' if !seen_dot => {
                seen_dot = true;
                cleaned.push(c);
            }
            '-' if cleaned.is_empty() => cleaned.push(c),
            _ => {}
        }
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogIndex, MouldingRecord};
    use crate::measurement::Measurement;

    fn catalog() -> CatalogIndex {
        CatalogIndex::from_records(vec![MouldingRecord::new("8694", 1.5, 2.5634)], vec![]).unwrap()
    }

    fn golden_order() -> OrderSpecification {
        OrderSpecification {
            frame_sku: "8694".to_string(),
            width: Measurement::from(20.0),
            height: Measurement::from(60.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!(parse_currency("$1,200.50"), 1200.5);
        assert_eq!(parse_currency("50 cash"), 50.0);
        assert_eq!(parse_currency("-$20"), -20.0);
        assert_eq!(parse_currency("1.2.3"), 1.23);
        assert_eq!(parse_currency(""), 0.0);
        assert_eq!(parse_currency("none"), 0.0);
        assert_eq!(parse_currency("-"), 0.0);
    }

    #[test]
    fn test_golden_item_total() {
        let result = calculate(&golden_order(), &catalog(), &PricingConfig::default());
        assert_eq!(result.item_total, Money::from_cents(10_574));
        assert_eq!(result.frame_strategy, FrameStrategy::Standard);
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].label, "Frame 8694");
        assert!(result.stacker.is_none());
    }

    #[test]
    fn test_totals_and_balance() {
        let mut order = golden_order();
        order.destination = "Princeton, NJ".to_string();
        order.deposit = "$50".to_string();
        order.discount = "10% repeat customer".to_string();

        let result = calculate(&order, &catalog(), &PricingConfig::default());
        // UI 80 ships in the [75,99] tier
        assert_eq!(result.shipping, Money::from_cents(4_900));
        assert_eq!(result.sales_tax, Some(Money::from_cents(740)));
        assert_eq!(result.total, Money::from_cents(10_574 + 4_900 + 740));
        assert_eq!(result.deposit, Money::from_cents(5_000));
        assert_eq!(result.balance, Money::from_cents(10_574 + 4_900 + 740 - 5_000));
        // Echoed, not applied
        assert_eq!(result.discount.as_deref(), Some("10% repeat customer"));
    }

    #[test]
    fn test_quantity_scales_breakdown() {
        let mut order = golden_order();
        order.quantity = Measurement::parse("2");
        let result = calculate(&order, &catalog(), &PricingConfig::default());
        assert_eq!(result.quantity, 2);
        // 38.451 × 2.75 × 2 = 211.4805
        assert_eq!(result.item_total, Money::from_cents(21_148));
        assert_eq!(result.breakdown[0].amount, Money::from_cents(21_148));
    }

    #[test]
    fn test_stacker_uses_stacker_markup() {
        let mut order = golden_order();
        order.stacker_frame = true;
        order.shadow_depth = Measurement::parse("4");
        let config = PricingConfig::default();

        let result = calculate(&order, &catalog(), &config);
        assert_eq!(result.frame_strategy, FrameStrategy::Stacker);
        assert_eq!(result.markup_multiplier, config.stacker_markup_multiplier);
        assert!(result.stacker.is_some());
    }

    #[test]
    fn test_standalone_has_no_frame_line() {
        let order = OrderSpecification {
            width: Measurement::from(20.0),
            height: Measurement::from(44.0),
            acrylic_type: "Standard".to_string(),
            ..Default::default()
        };
        let result = calculate(&order, &catalog(), &PricingConfig::default());
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].component, Component::Acrylic);
        assert_eq!(result.item_total, Money::from_cents(6_534));
    }
}
