//! Economy Error Taxonomy
//!
//! Player-facing failures are transient notices; none of them is fatal and a
//! rejected operation never mutates `PlayerState`.

use thiserror::Error;

/// Errors produced by economy operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EconomyError {
    /// The item has no stock left; the purchase was not applied.
    #[error("'{name}' is out of stock")]
    OutOfStock { name: String },

    /// The player cannot afford the item; coins are unchanged.
    #[error("not enough coins: need {needed}, have {held}")]
    InsufficientFunds { needed: i32, held: i32 },

    /// The loot pool was empty before any chance roll was made.
    #[error("no loot available")]
    NoLootAvailable,

    /// No note exists at the given catalog identity.
    #[error("unknown item '{path}'")]
    UnknownItem { path: String },

    /// The named stack is not in the player's inventory.
    #[error("'{name}' is not in the inventory")]
    NotInInventory { name: String },

    /// Loading or saving the persisted player record failed.
    #[error("persistence error: {0}")]
    Persistence(String),
}
