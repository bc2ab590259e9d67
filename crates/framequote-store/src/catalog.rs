//! # Catalog Loading
//!
//! Reads the vendor catalog file and memoizes the resulting index.
//!
//! ## File Format
//! ```json
//! {
//!   "mouldings": [
//!     { "sku": "8694", "width_inches": 1.5, "join_cost_per_foot": 2.5634 }
//!   ],
//!   "supplies": [
//!     { "sku": "B8540", "name": "Super White", "unit_price": 12.0 }
//!   ]
//! }
//! ```
//!
//! ## Load Once
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  caller ──► OnceLock set? ── yes ──► Arc<CatalogIndex>                 │
//! │                  │ no                                                   │
//! │                  ▼                                                      │
//! │            lock init mutex ──► set now? ── yes ──► Arc<CatalogIndex>   │
//! │                  │ no                                                   │
//! │                  ▼                                                      │
//! │            read + index file ──► Ok: store in OnceLock                 │
//! │                               └► Err: return it, cache stays empty     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Concurrent first callers block on the mutex, so the file is read once.

use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use framequote_core::catalog::{MouldingRecord, SupplyRecord};
use framequote_core::CatalogIndex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{StoreError, StoreResult};

/// On-disk catalog shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
    pub mouldings: Vec<MouldingRecord>,
    pub supplies: Vec<SupplyRecord>,
}

impl CatalogFile {
    pub fn into_index(self) -> StoreResult<CatalogIndex> {
        Ok(CatalogIndex::from_records(self.mouldings, self.supplies)?)
    }
}

/// Reads and indexes a catalog file.
pub fn load_catalog(path: &Path) -> StoreResult<CatalogIndex> {
    if !path.exists() {
        return Err(StoreError::CatalogNotFound(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path)?;
    let file: CatalogFile = serde_json::from_str(&contents)?;
    let index = file.into_index()?;

    info!(
        ?path,
        mouldings = index.moulding_count(),
        supplies = index.supply_count(),
        "Catalog loaded"
    );
    Ok(index)
}

/// Process-wide memoized catalog.
#[derive(Debug, Default)]
pub struct CatalogCache {
    index: OnceLock<Arc<CatalogIndex>>,
    init: Mutex<()>,
}

impl CatalogCache {
    pub const fn new() -> Self {
        CatalogCache {
            index: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// The catalog from `path`, loading it on first use only.
    pub fn get_or_load(&self, path: &Path) -> StoreResult<Arc<CatalogIndex>> {
        self.get_or_try_init(|| load_catalog(path))
    }

    /// Memoizes the first successful `load`. Failures are not cached.
    pub fn get_or_try_init(
        &self,
        load: impl FnOnce() -> StoreResult<CatalogIndex>,
    ) -> StoreResult<Arc<CatalogIndex>> {
        if let Some(index) = self.index.get() {
            return Ok(Arc::clone(index));
        }

        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(index) = self.index.get() {
            return Ok(Arc::clone(index));
        }

        let index = Arc::new(load()?);
        // Only this thread can set while the guard is held.
        Ok(Arc::clone(self.index.get_or_init(|| index)))
    }

    /// The catalog, if already loaded.
    pub fn get(&self) -> Option<Arc<CatalogIndex>> {
        self.index.get().cloned()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
