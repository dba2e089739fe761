//! Player State
//!
//! The single persisted aggregate: coins, inventory, economy ledger and the
//! restock configuration. Threaded explicitly through every operation; the
//! engine saves the whole record after each mutation.

use serde::{Deserialize, Serialize};

use crate::economy::Ledger;
use crate::inventory::Inventory;

/// Version of the persisted record layout
pub const SCHEMA_VERSION: u32 = 1;

/// Starting (and reset) coin balance
pub const STARTING_COINS: i32 = 1000;

/// Everything the economy persists for one player
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerState {
    pub schema_version: u32,
    pub coins: i32,
    pub inventory: Inventory,
    /// Folder backing the default shop
    pub item_folder_path: String,
    /// Milliseconds since epoch of the last restock; 0 = never
    pub last_restock_ms: i64,
    pub restock_interval_days: i64,
    /// Restock price drift bound, in `[0, 1]`
    pub price_variation: f64,
    /// Per-item price and stock, keyed by note path
    pub ledger: Ledger,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            coins: STARTING_COINS,
            inventory: Inventory::new(),
            item_folder_path: "Items/".to_string(),
            last_restock_ms: 0,
            restock_interval_days: 3,
            price_variation: 0.2,
            ledger: Ledger::new(),
        }
    }
}
