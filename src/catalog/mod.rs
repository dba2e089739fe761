//! Catalog
//!
//! Turns vault notes into priced, consumable-aware catalog items.

pub mod item;
pub mod resolver;

pub use item::{CatalogItem, Consumable};
pub use resolver::resolve;
