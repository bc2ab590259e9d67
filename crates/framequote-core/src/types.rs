//! # Domain Types
//!
//! The order as the form submits it, plus small shared value types.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌─────────────────┐   ┌─────────────────┐  │
//! │  │  OrderSpecification  │   │  DeliveryMethod │   │    TaxRate      │  │
//! │  │  ──────────────────  │   │  ─────────────  │   │  ─────────────  │  │
//! │  │  width/height        │   │  Ship           │   │  bps (u32)      │  │
//! │  │  borders, reveals    │   │  Pickup         │   │  700 = 7.00%    │  │
//! │  │  frame_sku, mats     │   └─────────────────┘   └─────────────────┘  │
//! │  │  add-on flags        │                                              │
//! │  │  destination, deposit│   Lengths are `Measurement`, resolved by     │
//! │  └──────────────────────┘   the parser at the serde boundary.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

use crate::measurement::Measurement;

/// Sentinel the form sends for "no frame, mats/glazing only".
pub const NO_FRAME_SENTINEL: &str = "None";

/// Sentinel for "no acrylic" / "no backing".
pub const NONE_OPTION: &str = "None";

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 700 bps = 7.00% (New Jersey sales tax).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a multiplier (700 bps → 0.07).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }
}

// =============================================================================
// Delivery Method
// =============================================================================

/// How the finished piece leaves the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Shipped to the destination address.
    #[default]
    Ship,
    /// Customer collects in store; never charged shipping.
    Pickup,
}

impl FromStr for DeliveryMethod {
    type Err = std::convert::Infallible;

    /// Anything that is not a pickup spelling ships.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pickup" | "pick up" | "pick-up" | "in-store pickup" => Ok(DeliveryMethod::Pickup),
            _ => Ok(DeliveryMethod::Ship),
        }
    }
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryMethod::Ship => write!(f, "ship"),
            DeliveryMethod::Pickup => write!(f, "pickup"),
        }
    }
}

// =============================================================================
// Order Specification
// =============================================================================

/// One framing order as submitted by the order form.
///
/// Every field is optional on the wire; missing fields take the
/// [`Default`] value (quantity 1, everything else empty/false).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderSpecification {
    // ----- artwork -----
    #[ts(type = "string | number | null")]
    pub width: Measurement,
    #[ts(type = "string | number | null")]
    pub height: Measurement,
    #[ts(type = "string | number | null")]
    pub quantity: Measurement,

    // ----- frame -----
    /// Moulding SKU; empty or `"None"` makes this a standalone order.
    pub frame_sku: String,
    /// Customer joins the frame themselves.
    pub chop_only: bool,
    /// Build the frame from stacked depth layers instead of one moulding.
    pub stacker_frame: bool,
    #[ts(type = "string | number | null")]
    pub shadow_depth: Measurement,

    // ----- mats -----
    #[ts(type = "string | number | null")]
    pub border_all: Measurement,
    #[ts(type = "string | number | null")]
    pub border_top: Measurement,
    #[ts(type = "string | number | null")]
    pub border_bottom: Measurement,
    #[ts(type = "string | number | null")]
    pub border_left: Measurement,
    #[ts(type = "string | number | null")]
    pub border_right: Measurement,
    pub mat1_sku: String,
    pub mat2_sku: String,
    pub mat3_sku: String,
    #[ts(type = "string | number | null")]
    pub reveal1: Measurement,
    #[ts(type = "string | number | null")]
    pub reveal2: Measurement,
    #[ts(type = "string | number | null")]
    pub extra_mat_openings: Measurement,

    // ----- glazing / backing -----
    pub acrylic_type: String,
    pub backing_type: String,

    // ----- print services -----
    pub print_paper: bool,
    pub dry_mount: bool,
    pub print_canvas: bool,
    /// `"Rolled"` gets the cheaper unstretched rate.
    pub canvas_wrap_style: String,

    // ----- fixed-fee services -----
    pub engraved_plaque: bool,
    pub plaque_text: String,
    pub leds: bool,
    pub shadowbox_fitting: bool,
    pub additional_labor: bool,
    pub labor_description: String,

    // ----- delivery & payment -----
    pub delivery_method: String,
    pub destination: String,
    pub discount: String,
    pub deposit: String,
    pub notes: String,
}

impl Default for OrderSpecification {
    fn default() -> Self {
        OrderSpecification {
            width: Measurement::Empty,
            height: Measurement::Empty,
            quantity: Measurement::Decimal(1.0),
            frame_sku: String::new(),
            chop_only: false,
            stacker_frame: false,
            shadow_depth: Measurement::Empty,
            border_all: Measurement::Empty,
            border_top: Measurement::Empty,
            border_bottom: Measurement::Empty,
            border_left: Measurement::Empty,
            border_right: Measurement::Empty,
            mat1_sku: String::new(),
            mat2_sku: String::new(),
            mat3_sku: String::new(),
            reveal1: Measurement::Empty,
            reveal2: Measurement::Empty,
            extra_mat_openings: Measurement::Empty,
            acrylic_type: NONE_OPTION.to_string(),
            backing_type: NONE_OPTION.to_string(),
            print_paper: false,
            dry_mount: false,
            print_canvas: false,
            canvas_wrap_style: String::new(),
            engraved_plaque: false,
            plaque_text: String::new(),
            leds: false,
            shadowbox_fitting: false,
            additional_labor: false,
            labor_description: String::new(),
            delivery_method: String::new(),
            destination: String::new(),
            discount: String::new(),
            deposit: String::new(),
            notes: String::new(),
        }
    }
}

impl OrderSpecification {
    /// The frame SKU, or `None` for a standalone (no frame) order.
    pub fn frame_sku(&self) -> Option<&str> {
        let sku = self.frame_sku.trim();
        if sku.is_empty() || sku.eq_ignore_ascii_case(NO_FRAME_SENTINEL) {
            None
        } else {
            Some(sku)
        }
    }

    /// True when no frame is ordered.
    pub fn is_standalone(&self) -> bool {
        self.frame_sku().is_none()
    }

    /// Mat SKUs in layer order, blanks skipped.
    pub fn mat_skus(&self) -> impl Iterator<Item = (usize, &str)> {
        [&self.mat1_sku, &self.mat2_sku, &self.mat3_sku]
            .into_iter()
            .enumerate()
            .filter_map(|(i, sku)| {
                let sku = sku.trim();
                (!sku.is_empty() && !sku.eq_ignore_ascii_case(NONE_OPTION)).then_some((i + 1, sku))
            })
    }

    /// Parsed delivery method.
    pub fn delivery(&self) -> DeliveryMethod {
        self.delivery_method.parse().unwrap_or_default()
    }

    /// Whole units ordered (negative/garbage → 0).
    pub fn quantity(&self) -> u32 {
        self.quantity.count()
    }
}

/// True when a free-text option names nothing (`""`, `"None"`).
pub(crate) fn is_none_option(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(NONE_OPTION)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_fraction() {
        let rate = TaxRate::from_bps(700);
        assert_eq!(rate.bps(), 700);
        assert!((rate.fraction() - 0.07).abs() < 1e-12);
    }

    #[test]
    fn test_delivery_method_parsing() {
        assert_eq!("pickup".parse::<DeliveryMethod>().unwrap(), DeliveryMethod::Pickup);
        assert_eq!(" Pick Up ".parse::<DeliveryMethod>().unwrap(), DeliveryMethod::Pickup);
        assert_eq!("UPS Ground".parse::<DeliveryMethod>().unwrap(), DeliveryMethod::Ship);
        assert_eq!("".parse::<DeliveryMethod>().unwrap(), DeliveryMethod::Ship);
    }

    #[test]
    fn test_standalone_detection() {
        let mut order = OrderSpecification::default();
        assert!(order.is_standalone());

        order.frame_sku = "None".to_string();
        assert!(order.is_standalone());

        order.frame_sku = " 8694 ".to_string();
        assert!(!order.is_standalone());
        assert_eq!(order.frame_sku(), Some("8694"));
    }

    #[test]
    fn test_mat_skus_skip_blanks() {
        let order = OrderSpecification {
            mat1_sku: "B8540".to_string(),
            mat2_sku: "".to_string(),
            mat3_sku: "None".to_string(),
            ..Default::default()
        };
        let mats: Vec<_> = order.mat_skus().collect();
        assert_eq!(mats, vec![(1, "B8540")]);
    }

    #[test]
    fn test_deserialize_sparse_form() {
        let order: OrderSpecification = serde_json::from_str(
            r#"{"width":"16 1/2","height":20,"frameSku":"8694","acrylicType":"Standard"}"#,
        )
        .unwrap();
        assert_eq!(order.width.value(), 16.5);
        assert_eq!(order.height.value(), 20.0);
        assert_eq!(order.quantity(), 1);
        assert_eq!(order.backing_type, "None");
        assert!(!order.is_standalone());
    }
}
