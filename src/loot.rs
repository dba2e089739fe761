//! Loot Resolver
//!
//! One chance gate per roll, then uniform picks with replacement. Duplicates
//! are expected; stacking happens when the awards are added to the inventory.

use crate::catalog::CatalogItem;
use crate::error::EconomyError;
use crate::rng::DiceRoller;

/// Configuration for a single loot roll
#[derive(Debug, Clone, Copy)]
pub struct LootConfig {
    pub min_items: i32,
    pub max_items: i32,
    /// Probability of any loot at all, in percent
    pub chance_percent: f64,
}

/// Resolve one loot roll against a pool of catalog items.
///
/// An empty pool fails before the chance roll is made. Otherwise a single
/// percentage roll gates the whole attempt; on success, between `min_items`
/// and `max_items` picks are drawn uniformly with replacement.
pub fn resolve_loot(
    pool: &[CatalogItem],
    config: &LootConfig,
    dice: &mut DiceRoller,
) -> Result<Vec<CatalogItem>, EconomyError> {
    if pool.is_empty() {
        return Err(EconomyError::NoLootAvailable);
    }

    if dice.percent() >= config.chance_percent {
        return Ok(Vec::new());
    }

    let count = dice.range(config.min_items.max(0), config.max_items.max(0));
    let mut awards = Vec::with_capacity(count as usize);
    for _ in 0..count {
        awards.push(pool[dice.index(pool.len())].clone());
    }
    Ok(awards)
}
