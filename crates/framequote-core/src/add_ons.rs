//! # Add-On Costs
//!
//! Everything on the order that is not the frame.
//!
//! ## Standalone Premium
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  frame_sku empty / "None"  ──► standalone = config.standalone_multiplier│
//! │  otherwise                 ──► standalone = 1.0                         │
//! │                                                                         │
//! │  × standalone   Mat 1/2/3, Acrylic, Backing                            │
//! │  × 1.0 always   Extra openings, Prints, Dry mount, Plaque, LEDs,       │
//! │                 Shadowbox fitting, Additional labor                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All amounts here are pre-markup, pre-quantity dollars.

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::catalog::CatalogSource;
use crate::config::PricingConfig;
use crate::dimensions::Dimensions;
use crate::types::{is_none_option, OrderSpecification};

/// Canvas wrap style priced at the rolled rate.
pub const ROLLED_WRAP_STYLE: &str = "Rolled";

/// Line-item categories on a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Frame,
    Mat,
    ExtraMatOpenings,
    Acrylic,
    Backing,
    PrintPaper,
    DryMount,
    PrintCanvas,
    EngravedPlaque,
    Leds,
    ShadowboxFitting,
    AdditionalLabor,
}

/// One priced add-on, pre-markup.
#[derive(Debug, Clone, PartialEq)]
pub struct AddOnCharge {
    pub component: Component,
    pub label: String,
    pub cost: f64,
}

impl AddOnCharge {
    fn new(component: Component, label: impl Into<String>, cost: f64) -> Self {
        AddOnCharge {
            component,
            label: label.into(),
            cost,
        }
    }
}

/// Multiplier for mats/acrylic/backing on this order.
pub fn standalone_multiplier(order: &OrderSpecification, config: &PricingConfig) -> f64 {
    if order.is_standalone() {
        config.standalone_multiplier
    } else {
        1.0
    }
}

/// Prices every selected add-on, in form order.
pub fn accumulate_add_ons<C: CatalogSource + ?Sized>(
    order: &OrderSpecification,
    dims: &Dimensions,
    catalog: &C,
    config: &PricingConfig,
) -> Vec<AddOnCharge> {
    let standalone = standalone_multiplier(order, config);
    let rates = &config.add_ons;
    let sq_in = dims.square_inches;
    let mut charges = Vec::new();

    // Mats
    for (layer, sku) in order.mat_skus() {
        let price = match catalog.lookup_supply(sku) {
            Some(record) => record.unit_price,
            None => {
                debug!(sku, "Mat not in supply catalog, using default mat price");
                rates.default_mat_price
            }
        };
        charges.push(AddOnCharge::new(
            Component::Mat,
            format!("Mat {} ({})", layer, sku),
            price * standalone,
        ));
    }

    let openings = order.extra_mat_openings.count();
    if openings > 0 {
        charges.push(AddOnCharge::new(
            Component::ExtraMatOpenings,
            format!("Extra mat openings ×{}", openings),
            openings as f64 * rates.extra_mat_opening,
        ));
    }

    // Glazing and backing
    if !is_none_option(&order.acrylic_type) {
        let per_sq_in = config.acrylic_price(&order.acrylic_type).unwrap_or_else(|| {
            debug!(acrylic = %order.acrylic_type, "Unknown acrylic type, pricing at 0");
            0.0
        });
        charges.push(AddOnCharge::new(
            Component::Acrylic,
            format!("Acrylic ({})", order.acrylic_type.trim()),
            per_sq_in * sq_in * standalone,
        ));
    }

    if !is_none_option(&order.backing_type) {
        let flat = config.backing_price(&order.backing_type).unwrap_or_else(|| {
            debug!(backing = %order.backing_type, "Unknown backing type, pricing at 0");
            0.0
        });
        charges.push(AddOnCharge::new(
            Component::Backing,
            format!("Backing ({})", order.backing_type.trim()),
            flat * standalone,
        ));
    }

    // Print services
    if order.print_paper {
        charges.push(AddOnCharge::new(
            Component::PrintPaper,
            "Paper print",
            rates.print_paper * sq_in,
        ));
    }
    if order.dry_mount {
        charges.push(AddOnCharge::new(
            Component::DryMount,
            "Dry mount",
            rates.dry_mount * sq_in,
        ));
    }
    if order.print_canvas {
        let rolled = order
            .canvas_wrap_style
            .trim()
            .eq_ignore_ascii_case(ROLLED_WRAP_STYLE);
        let (rate, label) = if rolled {
            (rates.print_canvas_rolled, "Canvas print (rolled)")
        } else {
            (rates.print_canvas, "Canvas print")
        };
        charges.push(AddOnCharge::new(Component::PrintCanvas, label, rate * sq_in));
    }

    // Fixed fees
    if order.engraved_plaque {
        charges.push(AddOnCharge::new(
            Component::EngravedPlaque,
            "Engraved plaque",
            rates.engraved_plaque,
        ));
    }
    if order.leds {
        charges.push(AddOnCharge::new(Component::Leds, "LED lighting", rates.leds));
    }
    if order.shadowbox_fitting {
        charges.push(AddOnCharge::new(
            Component::ShadowboxFitting,
            "Shadowbox fitting",
            rates.shadowbox_fitting,
        ));
    }
    if order.additional_labor {
        charges.push(AddOnCharge::new(
            Component::AdditionalLabor,
            "Additional labor",
            rates.additional_labor,
        ));
    }

    charges
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogIndex, SupplyRecord};
    use crate::measurement::Measurement;

    fn catalog() -> CatalogIndex {
        CatalogIndex::from_records(vec![], vec![SupplyRecord::new("B8540", "Super White", 12.0)])
            .unwrap()
    }

    fn order(w: f64, h: f64) -> OrderSpecification {
        OrderSpecification {
            width: Measurement::from(w),
            height: Measurement::from(h),
            ..Default::default()
        }
    }

    fn total(charges: &[AddOnCharge]) -> f64 {
        charges.iter().map(|c| c.cost).sum()
    }

    #[test]
    fn test_standalone_acrylic_premium() {
        let mut o = order(20.0, 44.0);
        o.acrylic_type = "Standard".to_string();
        let dims = Dimensions::from_order(&o);
        assert_eq!(dims.square_inches, 880.0);

        let charges = accumulate_add_ons(&o, &dims, &catalog(), &PricingConfig::default());
        assert_eq!(charges.len(), 1);
        assert_eq!(charges[0].component, Component::Acrylic);
        assert!((charges[0].cost - 23.76).abs() < 1e-9);

        o.frame_sku = "8694".to_string();
        let charges = accumulate_add_ons(&o, &dims, &catalog(), &PricingConfig::default());
        assert!((charges[0].cost - 7.92).abs() < 1e-9);
    }

    #[test]
    fn test_mats_use_catalog_or_default() {
        let mut o = order(16.0, 20.0);
        o.frame_sku = "8694".to_string();
        o.mat1_sku = "B8540".to_string();
        o.mat2_sku = "UNKNOWN".to_string();
        let dims = Dimensions::from_order(&o);

        let charges = accumulate_add_ons(&o, &dims, &catalog(), &PricingConfig::default());
        assert_eq!(charges.len(), 2);
        assert_eq!(charges[0].cost, 12.0);
        assert_eq!(charges[1].cost, 15.0);
        assert_eq!(charges[1].label, "Mat 2 (UNKNOWN)");
    }

    #[test]
    fn test_fixed_fees_ignore_standalone() {
        let mut o = order(16.0, 20.0);
        o.engraved_plaque = true;
        o.leds = true;
        o.shadowbox_fitting = true;
        o.additional_labor = true;
        o.extra_mat_openings = Measurement::parse("2");
        let dims = Dimensions::from_order(&o);

        let charges = accumulate_add_ons(&o, &dims, &catalog(), &PricingConfig::default());
        assert!((total(&charges) - (30.0 + 45.0 + 17.5 + 17.5 + 5.0)).abs() < 1e-9);
    }

    #[test]
    fn test_negative_openings_cost_nothing() {
        let mut o = order(16.0, 20.0);
        o.extra_mat_openings = Measurement::parse("-3");
        let dims = Dimensions::from_order(&o);
        let charges = accumulate_add_ons(&o, &dims, &catalog(), &PricingConfig::default());
        assert!(charges.is_empty());
    }

    #[test]
    fn test_print_services_scale_with_area() {
        let mut o = order(10.0, 10.0);
        o.print_paper = true;
        o.dry_mount = true;
        o.print_canvas = true;
        let dims = Dimensions::from_order(&o);
        let config = PricingConfig::default();

        let charges = accumulate_add_ons(&o, &dims, &catalog(), &config);
        assert!((total(&charges) - (5.0 + 3.0 + 8.0)).abs() < 1e-9);

        o.canvas_wrap_style = "rolled".to_string();
        let charges = accumulate_add_ons(&o, &dims, &catalog(), &config);
        let canvas = charges
            .iter()
            .find(|c| c.component == Component::PrintCanvas)
            .unwrap();
        assert!((canvas.cost - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_none_options_skipped() {
        let mut o = order(16.0, 20.0);
        o.acrylic_type = "None".to_string();
        o.backing_type = "".to_string();
        let dims = Dimensions::from_order(&o);
        let charges = accumulate_add_ons(&o, &dims, &catalog(), &PricingConfig::default());
        assert!(charges.is_empty());
    }

    #[test]
    fn test_backing_flat_with_standalone() {
        let mut o = order(16.0, 20.0);
        o.backing_type = "Foam Core".to_string();
        let dims = Dimensions::from_order(&o);
        let charges = accumulate_add_ons(&o, &dims, &catalog(), &PricingConfig::default());
        assert_eq!(charges[0].cost, 18.0);
    }
}
