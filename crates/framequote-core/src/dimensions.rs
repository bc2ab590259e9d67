//! # Dimensions
//!
//! Mat-inclusive geometry of an order.
//!
//! ```text
//!        ◄──────────── outer_width ────────────►
//!        ┌─────────────────────────────────────┐  ▲
//!        │ border_all + border_top             │  │
//!        │    ┌───────────────────────────┐    │  │
//!        │    │                           │    │  outer_height
//!        │    │     width × height        │    │  │
//!        │    │                           │    │  │
//!        │    └───────────────────────────┘    │  │
//!        │ border_all + border_bottom          │  │
//!        └─────────────────────────────────────┘  ▼
//!
//!  united_inches = outer_width + outer_height + reveal1 + reveal2
//!  square_inches = (outer_width  + (reveal1 + reveal2) / 2)
//!                × (outer_height + (reveal1 + reveal2) / 2)
//! ```

use serde::Serialize;

use crate::types::OrderSpecification;

/// Derived geometry, all in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    /// Artwork + left/right mat borders (reveals excluded).
    pub outer_width: f64,
    /// Artwork + top/bottom mat borders (reveals excluded).
    pub outer_height: f64,
    /// Combined reveal of the stacked mats.
    pub reveal_total: f64,
    pub united_inches: f64,
    pub square_inches: f64,
}

impl Dimensions {
    /// Resolves every length on the order and derives the geometry.
    pub fn from_order(order: &OrderSpecification) -> Self {
        let border_all = order.border_all.value();
        let outer_width = order.width.value()
            + 2.0 * border_all
            + order.border_left.value()
            + order.border_right.value();
        let outer_height = order.height.value()
            + 2.0 * border_all
            + order.border_top.value()
            + order.border_bottom.value();
        let reveal_total = order.reveal1.value() + order.reveal2.value();

        Self::from_parts(outer_width, outer_height, reveal_total)
    }

    /// Geometry from already-resolved outer sizes.
    pub fn from_parts(outer_width: f64, outer_height: f64, reveal_total: f64) -> Self {
        let united_inches = (outer_width + outer_height + reveal_total).max(0.0);
        let half_reveal = reveal_total / 2.0;
        let area_w = (outer_width + half_reveal).max(0.0);
        let area_h = (outer_height + half_reveal).max(0.0);

        Dimensions {
            outer_width,
            outer_height,
            reveal_total,
            united_inches,
            square_inches: area_w * area_h,
        }
    }

    /// Outer perimeter in feet (stacker layers are priced per foot).
    pub fn perimeter_feet(&self) -> f64 {
        2.0 * (self.outer_width.max(0.0) + self.outer_height.max(0.0)) / 12.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::Measurement;

    fn order(width: &str, height: &str) -> OrderSpecification {
        OrderSpecification {
            width: Measurement::parse(width),
            height: Measurement::parse(height),
            ..Default::default()
        }
    }

    #[test]
    fn test_bare_artwork() {
        let dims = Dimensions::from_order(&order("20", "60"));
        assert_eq!(dims.united_inches, 80.0);
        assert_eq!(dims.square_inches, 1200.0);
    }

    #[test]
    fn test_borders_and_reveals() {
        let mut o = order("16", "20");
        o.border_all = Measurement::parse("2");
        o.border_bottom = Measurement::parse("1/2");
        o.reveal1 = Measurement::parse("1/4");
        o.reveal2 = Measurement::parse("1/4");

        let dims = Dimensions::from_order(&o);
        // (16 + 4) + (20 + 4 + 0.5) + 0.5
        assert_eq!(dims.united_inches, 45.0);
        // (20 + 0.25) × (24.5 + 0.25)
        assert!((dims.square_inches - 20.25 * 24.75).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_input() {
        let dims = Dimensions::from_order(&order("16 1/2", "20-1/2"));
        assert_eq!(dims.united_inches, 37.0);
    }

    #[test]
    fn test_never_negative() {
        let dims = Dimensions::from_order(&order("-30", "10"));
        assert_eq!(dims.united_inches, 0.0);
        assert_eq!(dims.square_inches, 0.0);
    }

    #[test]
    fn test_perimeter_feet() {
        let dims = Dimensions::from_parts(20.0, 16.0, 0.0);
        assert_eq!(dims.perimeter_feet(), 6.0);
    }
}
