//! # framequote-core: Pure Pricing Engine for Custom Framing
//!
//! Turns a submitted frame order into a priced quote. Every function here is
//! deterministic and free of I/O; loading catalogs and configuration is the
//! job of `framequote-store`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FrameQuote Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 quote-cli (order JSON in, quote JSON out)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │     framequote-store: pricing.toml, catalog.json, ConfigStore   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &CatalogIndex, &PricingConfig          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ framequote-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  measurement ─► dimensions ─► frame ──┐                         │   │
//! │  │                             add_ons ──┼─► quote::calculate     │   │
//! │  │                   shipping ─► tax ────┘                         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`measurement`] - Lenient length parsing ("16 1/2", "2-1/2", 3.75)
//! - [`dimensions`] - United inches and square inches
//! - [`frame`] - Standard and stacker frame costs
//! - [`add_ons`] - Mats, glazing, backing, prints and services
//! - [`shipping`] / [`tax`] - Delivery charges and NJ sales tax
//! - [`quote`] - The `calculate` entry point and `PricingResult`
//! - [`config`] / [`catalog`] - Business levers and SKU lookup
//! - [`money`] - Integer-cent money at the output edge
//!
//! ## Example Usage
//!
//! ```rust
//! use framequote_core::{calculate, CatalogIndex, Measurement, OrderSpecification, PricingConfig};
//! use framequote_core::catalog::MouldingRecord;
//!
//! let catalog = CatalogIndex::from_records(
//!     vec![MouldingRecord::new("8694", 1.5, 2.5634)],
//!     vec![],
//! ).unwrap();
//!
//! let order = OrderSpecification {
//!     frame_sku: "8694".to_string(),
//!     width: Measurement::parse("20"),
//!     height: Measurement::parse("60"),
//!     ..Default::default()
//! };
//!
//! let quote = calculate(&order, &catalog, &PricingConfig::default());
//! assert_eq!(quote.item_total.to_fixed(), "105.74");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod add_ons;
pub mod catalog;
pub mod config;
pub mod dimensions;
pub mod error;
pub mod frame;
pub mod measurement;
pub mod money;
pub mod quote;
pub mod region;
pub mod shipping;
pub mod tax;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{CatalogIndex, CatalogSource};
pub use config::PricingConfig;
pub use error::{CatalogError, ConfigError, CoreError, CoreResult};
pub use measurement::{parse_measurement, Measurement};
pub use money::Money;
pub use quote::{calculate, LineItem, PricingResult};
pub use types::{DeliveryMethod, OrderSpecification, TaxRate};
