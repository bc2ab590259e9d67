//! # framequote-store: Config and Catalog Adapters
//!
//! The I/O half of FrameQuote. `framequote-core` prices orders from
//! in-memory values; this crate produces those values from disk and guards
//! changes to them.
//!
//! ## Modules
//!
//! - [`settings`] - `pricing.toml` load/save with `FRAMEQUOTE_*` overrides
//! - [`config_store`] - Live config snapshot and the argon2 update gate
//! - [`catalog`] - `catalog.json` loading, memoized once per process
//! - [`error`] - `StoreError`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use framequote_store::{settings, CatalogCache, ConfigStore};
//!
//! static CATALOG: CatalogCache = CatalogCache::new();
//!
//! # fn main() -> Result<(), framequote_store::StoreError> {
//! let store = ConfigStore::new(settings::load(None)?);
//! let catalog = CATALOG.get_or_load(Path::new("catalog.json"))?;
//!
//! let order = framequote_core::OrderSpecification::default();
//! let quote = framequote_core::calculate(&order, &*catalog, &store.snapshot());
//! println!("{}", quote.total);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config_store;
pub mod error;
pub mod settings;

pub use catalog::{load_catalog, CatalogCache, CatalogFile};
pub use config_store::{hash_admin_secret, Argon2Policy, ConfigStore, UpdatePolicy};
pub use error::{StoreError, StoreResult};
