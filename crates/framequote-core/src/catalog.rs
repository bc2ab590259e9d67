//! # Catalog Module
//!
//! Read-only SKU lookup for mouldings and supplies (mat board etc.).
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  vendor catalog (JSON) ──► framequote-store::CatalogCache               │
//! │                                   │  (exactly one load per process)    │
//! │                                   ▼                                     │
//! │                    CatalogIndex::from_records(..)  ← THIS MODULE        │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                       Arc<CatalogIndex> (immutable)                     │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │             calculate(&order, &*catalog, &config)                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A lookup miss is never an error for the engine: it falls back to the
//! defaults in [`DEFAULT_MOULDING_WIDTH_INCHES`] / the add-on rate card.
//! Keys are trimmed and upper-cased, so `" b8540"` finds `B8540`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::CatalogError;

/// Moulding width assumed when a frame SKU is not in the catalog.
pub const DEFAULT_MOULDING_WIDTH_INCHES: f64 = 2.0;

// =============================================================================
// Records
// =============================================================================

/// A moulding profile sold by the foot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouldingRecord {
    pub sku: String,
    /// Face width of the moulding.
    pub width_inches: f64,
    /// Vendor price for joined moulding, per linear foot.
    pub join_cost_per_foot: f64,
}

impl MouldingRecord {
    pub fn new(sku: impl Into<String>, width_inches: f64, join_cost_per_foot: f64) -> Self {
        MouldingRecord {
            sku: sku.into(),
            width_inches,
            join_cost_per_foot,
        }
    }
}

/// A flat-priced supply item (mat boards).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyRecord {
    pub sku: String,
    #[serde(default)]
    pub name: String,
    pub unit_price: f64,
}

impl SupplyRecord {
    pub fn new(sku: impl Into<String>, name: impl Into<String>, unit_price: f64) -> Self {
        SupplyRecord {
            sku: sku.into(),
            name: name.into(),
            unit_price,
        }
    }
}

// =============================================================================
// Catalog Source
// =============================================================================

/// Anything that can answer SKU lookups for the engine.
///
/// [`CatalogIndex`] is the production implementation; tests and callers
/// with their own storage can implement this directly.
pub trait CatalogSource {
    fn lookup_moulding(&self, sku: &str) -> Option<&MouldingRecord>;
    fn lookup_supply(&self, sku: &str) -> Option<&SupplyRecord>;
}

// =============================================================================
// Catalog Index
// =============================================================================

/// Immutable SKU → record index, built once.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    mouldings: HashMap<String, MouldingRecord>,
    supplies: HashMap<String, SupplyRecord>,
}

impl CatalogIndex {
    /// An index with no records; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the index, rejecting blank SKUs, duplicate SKUs and
    /// negative or non-finite numbers.
    pub fn from_records(
        mouldings: impl IntoIterator<Item = MouldingRecord>,
        supplies: impl IntoIterator<Item = SupplyRecord>,
    ) -> Result<Self, CatalogError> {
        let mut index = CatalogIndex::default();

        for record in mouldings {
            let key = normalize_sku(&record.sku);
            check_record("moulding", &key, "width_inches", record.width_inches)?;
            check_record(
                "moulding",
                &key,
                "join_cost_per_foot",
                record.join_cost_per_foot,
            )?;
            if index.mouldings.contains_key(&key) {
                return Err(CatalogError::DuplicateSku {
                    kind: "moulding",
                    sku: key,
                });
            }
            index.mouldings.insert(key, record);
        }

        for record in supplies {
            let key = normalize_sku(&record.sku);
            check_record("supply", &key, "unit_price", record.unit_price)?;
            if index.supplies.contains_key(&key) {
                return Err(CatalogError::DuplicateSku {
                    kind: "supply",
                    sku: key,
                });
            }
            index.supplies.insert(key, record);
        }

        Ok(index)
    }

    pub fn moulding_count(&self) -> usize {
        self.mouldings.len()
    }

    pub fn supply_count(&self) -> usize {
        self.supplies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mouldings.is_empty() && self.supplies.is_empty()
    }
}

impl CatalogSource for CatalogIndex {
    fn lookup_moulding(&self, sku: &str) -> Option<&MouldingRecord> {
        self.mouldings.get(&normalize_sku(sku))
    }

    fn lookup_supply(&self, sku: &str) -> Option<&SupplyRecord> {
        self.supplies.get(&normalize_sku(sku))
    }
}

fn normalize_sku(sku: &str) -> String {
    sku.trim().to_uppercase()
}

fn check_record(kind: &'static str, sku: &str, field: &str, value: f64) -> Result<(), CatalogError> {
    if sku.is_empty() {
        return Err(CatalogError::InvalidRecord {
            kind,
            sku: sku.to_string(),
            reason: "SKU is blank".to_string(),
        });
    }
    if !value.is_finite() || value < 0.0 {
        return Err(CatalogError::InvalidRecord {
            kind,
            sku: sku.to_string(),
            reason: format!("{} must be a non-negative number, got {}", field, value),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CatalogIndex {
        CatalogIndex::from_records(
            vec![MouldingRecord::new("8694", 1.5, 2.5634)],
            vec![SupplyRecord::new("B8540", "Super White", 12.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_normalizes_sku() {
        let catalog = sample();
        assert_eq!(catalog.lookup_moulding(" 8694 ").unwrap().width_inches, 1.5);
        assert_eq!(catalog.lookup_supply("b8540").unwrap().unit_price, 12.0);
        assert!(catalog.lookup_moulding("0000").is_none());
        assert_eq!(catalog.moulding_count(), 1);
        assert_eq!(catalog.supply_count(), 1);
    }

    #[test]
    fn test_duplicate_sku_rejected() {
        let result = CatalogIndex::from_records(
            vec![
                MouldingRecord::new("8694", 1.5, 2.5),
                MouldingRecord::new("8694 ", 1.5, 2.9),
            ],
            vec![],
        );
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateSku { kind: "moulding", .. })
        ));
    }

    #[test]
    fn test_invalid_record_rejected() {
        let blank = CatalogIndex::from_records(vec![], vec![SupplyRecord::new(" ", "x", 1.0)]);
        assert!(matches!(blank, Err(CatalogError::InvalidRecord { .. })));

        let negative =
            CatalogIndex::from_records(vec![MouldingRecord::new("1", -1.0, 2.0)], vec![]);
        assert!(matches!(negative, Err(CatalogError::InvalidRecord { .. })));
    }

    #[test]
    fn test_empty_index_misses() {
        let catalog = CatalogIndex::empty();
        assert!(catalog.is_empty());
        assert!(catalog.lookup_supply("B8540").is_none());
    }
}
