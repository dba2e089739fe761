//! Vault Economy
//!
//! An in-application virtual economy backed by a vault of markdown notes:
//! item notes are resolved into priced, stocked, consumable-aware catalog
//! entries; shops list them with drifting prices and depleting stock; loot
//! rolls and purchases feed a persistent player inventory.
//!
//! The crate is host-agnostic. The host supplies the note source
//! ([`vault::VaultSource`]), the clock ([`clock::Clock`]) and the persistence
//! slot ([`persist::StateStore`]); the [`engine::EconomyEngine`] exposes the
//! operations a UI wires to buttons: listings, buy, sell, use, loot rolls,
//! restocks and the treasure hunt.

pub mod catalog;
pub mod clock;
pub mod economy;
pub mod engine;
pub mod error;
pub mod inventory;
pub mod loot;
pub mod persist;
pub mod rng;
pub mod shop;
pub mod state;
pub mod vault;

pub use catalog::{CatalogItem, Consumable};
pub use clock::{Clock, SystemClock};
pub use economy::{Ledger, PricedStock, StockProfile};
pub use engine::{EconomyEngine, PurchaseReceipt};
pub use error::EconomyError;
pub use inventory::{Inventory, InventoryEntry, UseOutcome};
pub use loot::LootConfig;
pub use persist::{JsonFileStore, MemoryStore, StateStore};
pub use rng::DiceRoller;
pub use shop::{ListingEntry, ShopDefinition, ShopListing, ShopRegistry};
pub use state::PlayerState;
pub use vault::{FsVault, MemoryVault, Note, VaultSource};
