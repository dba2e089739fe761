//! Shop System
//!
//! Shop definitions, the TOML-backed registry, and listing assembly.

pub mod composer;
pub mod definition;
pub mod registry;

pub use composer::{ListingEntry, ShopListing, compose_listing};
pub use definition::{CustomShop, FolderShop, RandomPool, ShopDefinition};
pub use registry::ShopRegistry;
