//! Economy Ledger
//!
//! Per-item price and stock state, keyed by catalog identity (note path).
//! Base price is established once at first resolution; the current price
//! drifts on restock; stock is lazily initialized and never goes negative.
//! The whole ledger is persisted inside the player record.

pub mod pricing;
pub mod restock;
pub mod stock;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use restock::is_restock_due;
pub use stock::StockProfile;

/// Price and stock state for one catalog identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedStock {
    /// Established at first resolution, never changed by restocks
    pub base_price: Option<i32>,
    /// Drifting restock price; `None` means "use base"
    pub current_price: Option<i32>,
    /// `None` until lazily initialized on first sight
    pub stock: Option<i32>,
}

/// All priced-stock entries, keyed by note path
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    entries: HashMap<String, PricedStock>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&PricedStock> {
        self.entries.get(path)
    }

    pub(crate) fn entry_mut(&mut self, path: &str) -> &mut PricedStock {
        self.entries.entry(path.to_string()).or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
