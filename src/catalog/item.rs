//! Catalog Item
//!
//! The normalized form of one item note. Current price and stock are not
//! stored here; they live in the price book and stock ledger keyed by the
//! same path identity.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Usage limits for a consumable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumable {
    pub max_uses: i32,
}

/// A resolved item note
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    /// Stable identity: the source note path
    pub path: String,
    /// Display name (note basename)
    pub name: String,
    pub base_price: i32,
    pub description: String,
    pub tags: BTreeSet<String>,
    /// Present iff the item is consumable
    pub consumable: Option<Consumable>,
}

impl CatalogItem {
    pub fn is_consumable(&self) -> bool {
        self.consumable.is_some()
    }
}
