//! Economy Engine
//!
//! The public operation surface consumed by hosts: listing, purchase, sale,
//! item use, loot rolls, restocks and the treasure hunt. Every operation runs
//! to completion against one owned `PlayerState`; rejected operations leave
//! the state untouched, successful ones persist the full record before
//! returning.

use tracing::{info, warn};

use crate::catalog::{CatalogItem, resolve};
use crate::clock::Clock;
use crate::economy::{StockProfile, is_restock_due};
use crate::error::EconomyError;
use crate::inventory::{InventoryEntry, UseOutcome};
use crate::loot::{LootConfig, resolve_loot};
use crate::persist::StateStore;
use crate::rng::DiceRoller;
use crate::shop::{ShopDefinition, ShopListing, ShopRegistry, compose_listing, composer};
use crate::state::{PlayerState, STARTING_COINS};
use crate::vault::VaultSource;

/// Treasure rolls above this value award that many coins
const TREASURE_THRESHOLD: i32 = 30;

/// Outcome of a successful purchase
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseReceipt {
    pub name: String,
    pub path: String,
    pub price_paid: i32,
    pub remaining_stock: i32,
    pub coins_left: i32,
}

/// The in-application virtual economy
pub struct EconomyEngine<V: VaultSource, S: StateStore> {
    vault: V,
    store: S,
    shops: ShopRegistry,
    clock: Box<dyn Clock>,
    dice: DiceRoller,
    state: PlayerState,
}

impl<V: VaultSource, S: StateStore> EconomyEngine<V, S> {
    /// Create an engine, loading the saved player record or starting fresh.
    /// Call `restock_if_due` afterwards to run the startup due-check.
    pub fn new(
        vault: V,
        store: S,
        clock: Box<dyn Clock>,
        dice: DiceRoller,
    ) -> Result<Self, EconomyError> {
        let state = store.load()?.unwrap_or_default();
        Ok(Self {
            vault,
            store,
            shops: ShopRegistry::new(),
            clock,
            dice,
            state,
        })
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn coins(&self) -> i32 {
        self.state.coins
    }

    pub fn shops(&self) -> &ShopRegistry {
        &self.shops
    }

    pub fn shops_mut(&mut self) -> &mut ShopRegistry {
        &mut self.shops
    }

    /// The folder shop every player has, backed by the configured items folder
    pub fn default_shop(&self) -> ShopDefinition {
        ShopDefinition::default_folder(&self.state.item_folder_path)
    }

    // ========================================================================
    // Listings
    // ========================================================================

    /// Build the current listing for a shop. Re-derived on every call; custom
    /// shops re-roll their random pools each time. Lazy stock initialization
    /// is the one persisted side effect, so the state is saved afterwards.
    pub fn shop_listing(&mut self, shop: &ShopDefinition) -> Result<ShopListing, EconomyError> {
        let listing = compose_listing(shop, &self.vault, &mut self.state.ledger, &mut self.dice);
        self.store.save(&self.state)?;
        Ok(listing)
    }

    // ========================================================================
    // Purchase / Sale / Use
    // ========================================================================

    /// Buy one unit of the item at the given note path
    pub fn buy(&mut self, path: &str) -> Result<PurchaseReceipt, EconomyError> {
        let note = self
            .vault
            .note(path)
            .ok_or_else(|| EconomyError::UnknownItem {
                path: path.to_string(),
            })?;
        let item = resolve(&note, &mut self.dice);

        let base = self.state.ledger.ensure_base_price(&item.path, item.base_price);
        let price = self.state.ledger.current_price(&item.path).unwrap_or(base);
        let stock = self
            .state
            .ledger
            .ensure_stock(&item.path, StockProfile::Folder, &mut self.dice);

        // Stock first, funds second, then mutate; mirrors the listing-side
        // disable plus the decrement-time guard.
        if stock <= 0 {
            return Err(EconomyError::OutOfStock {
                name: item.name.clone(),
            });
        }
        if self.state.coins < price {
            return Err(EconomyError::InsufficientFunds {
                needed: price,
                held: self.state.coins,
            });
        }

        let remaining_stock = self.state.ledger.decrement_stock(&item.path)?;
        self.state.coins -= price;
        self.state.inventory.add(InventoryEntry::from_item(&item, price));
        self.store.save(&self.state)?;

        info!(
            "Bought {} for {} coins ({} left in stock)",
            item.name, price, remaining_stock
        );

        Ok(PurchaseReceipt {
            name: item.name,
            path: item.path,
            price_paid: price,
            remaining_stock,
            coins_left: self.state.coins,
        })
    }

    /// Sell one item from the named inventory stack; returns the coins gained
    pub fn sell(&mut self, name: &str) -> Result<i32, EconomyError> {
        let gained = self.state.inventory.sell(name)?;
        self.state.coins += gained;
        self.store.save(&self.state)?;

        info!("Sold {} for {} coins", name, gained);
        Ok(gained)
    }

    /// Use one item from the named inventory stack
    pub fn use_item(&mut self, name: &str) -> Result<UseOutcome, EconomyError> {
        let outcome = self.state.inventory.use_one(name)?;
        // Non-consumable use mutates nothing, so there is nothing to persist.
        if outcome != UseOutcome::NotConsumable {
            self.store.save(&self.state)?;
        }
        Ok(outcome)
    }

    // ========================================================================
    // Loot
    // ========================================================================

    /// Roll loot from a pool of note paths; awarded items land in the
    /// inventory with their current price as the acquisition snapshot.
    pub fn roll_loot(
        &mut self,
        pool_paths: &[String],
        config: &LootConfig,
    ) -> Result<Vec<InventoryEntry>, EconomyError> {
        let mut pool: Vec<CatalogItem> = Vec::with_capacity(pool_paths.len());
        for path in pool_paths {
            let Some(note) = self.vault.note(path) else {
                warn!("Loot pool references missing note {}", path);
                continue;
            };
            let item = resolve(&note, &mut self.dice);
            self.state.ledger.ensure_base_price(&item.path, item.base_price);
            pool.push(item);
        }

        let picks = resolve_loot(&pool, config, &mut self.dice)?;
        let mut awards = Vec::with_capacity(picks.len());
        for item in picks {
            let price = self.state.ledger.current_price(&item.path).unwrap_or(item.base_price);
            let entry = InventoryEntry::from_item(&item, price);
            self.state.inventory.add(entry.clone());
            awards.push(entry);
        }

        if !awards.is_empty() {
            self.store.save(&self.state)?;
            info!("Loot roll awarded {} item(s)", awards.len());
        }
        Ok(awards)
    }

    /// The original adventure button: roll 1-100, anything above 30 is found
    /// coins. Returns the coins gained, if any.
    pub fn find_treasure(&mut self) -> Result<Option<i32>, EconomyError> {
        let roll = self.dice.range(1, 100);
        if roll <= TREASURE_THRESHOLD {
            return Ok(None);
        }
        self.state.coins += roll;
        self.store.save(&self.state)?;
        info!("Found {} coins of treasure", roll);
        Ok(Some(roll))
    }

    // ========================================================================
    // Restock
    // ========================================================================

    /// Run a restock if one is due; returns whether it ran. Intended to be
    /// called once at startup and from any scheduled host check. Multiple
    /// elapsed intervals still produce a single restock.
    pub fn restock_if_due(&mut self) -> Result<bool, EconomyError> {
        let now = self.clock.now_ms();
        if !is_restock_due(self.state.last_restock_ms, self.state.restock_interval_days, now) {
            return Ok(false);
        }
        self.restock_now()?;
        Ok(true)
    }

    /// Restock every identity belonging to any folder shop: fresh stock
    /// counts and drifted prices. Manual "restock now" action.
    pub fn restock_now(&mut self) -> Result<usize, EconomyError> {
        let mut shops = vec![self.default_shop()];
        shops.extend(self.shops.all().cloned());

        let mut seen = std::collections::HashSet::new();
        let mut notes = Vec::new();
        for shop in &shops {
            if let ShopDefinition::Folder(folder) = shop {
                for note in composer::folder_members(folder, &self.vault) {
                    if seen.insert(note.path.clone()) {
                        notes.push(note);
                    }
                }
            }
        }

        let variation = self.state.price_variation;
        for note in &notes {
            let item = resolve(note, &mut self.dice);
            self.state.ledger.ensure_base_price(&item.path, item.base_price);
            self.state.ledger.restock_stock(&item.path, &mut self.dice);
            self.state
                .ledger
                .restock_price(&item.path, variation, &mut self.dice);
        }

        self.state.last_restock_ms = self.clock.now_ms();
        self.store.save(&self.state)?;

        info!("Restocked {} item(s)", notes.len());
        Ok(notes.len())
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Reset the coin balance to the starting 1000
    pub fn reset_coins(&mut self) -> Result<(), EconomyError> {
        self.state.coins = STARTING_COINS;
        self.store.save(&self.state)
    }

    /// Remove every inventory stack
    pub fn clear_inventory(&mut self) -> Result<(), EconomyError> {
        self.state.inventory.clear();
        self.store.save(&self.state)
    }
}
