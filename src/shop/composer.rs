//! Shop Composer
//!
//! Assembles the purchasable listing for a shop. This is a pure re-derivation
//! from the vault and the economy ledger on every open; random-pool picks are
//! intentionally re-rolled each time and never persisted, so a custom shop's
//! rare section changes between visits. Callers wanting a stable render hold
//! on to the returned `ShopListing`.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::catalog::{CatalogItem, resolve};
use crate::economy::{Ledger, StockProfile};
use crate::rng::DiceRoller;
use crate::vault::{Note, VaultSource};

use super::definition::{CustomShop, FolderShop, ShopDefinition};

/// One purchasable row of a shop listing
#[derive(Debug, Clone)]
pub struct ListingEntry {
    pub item: CatalogItem,
    /// Current price, snapshot at listing time
    pub price: i32,
    /// Current stock, initialized lazily on first sight
    pub stock: i32,
    /// True for accepted random-pool picks
    pub rare: bool,
}

impl ListingEntry {
    /// UIs must disable the buy action when this is false; the stock ledger
    /// re-checks at purchase time.
    pub fn purchasable(&self) -> bool {
        self.stock > 0
    }
}

/// A shop's full item listing at one point in time
#[derive(Debug, Clone)]
pub struct ShopListing {
    pub shop_name: String,
    pub entries: Vec<ListingEntry>,
}

impl ShopListing {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the current listing for a shop
pub fn compose_listing(
    shop: &ShopDefinition,
    vault: &impl VaultSource,
    ledger: &mut Ledger,
    dice: &mut DiceRoller,
) -> ShopListing {
    let entries = match shop {
        ShopDefinition::Folder(folder) => compose_folder(folder, vault, ledger, dice),
        ShopDefinition::Custom(custom) => compose_custom(custom, vault, ledger, dice),
    };

    if entries.is_empty() {
        info!("Shop '{}' has no items to sell", shop.name());
    }

    ShopListing {
        shop_name: shop.name().to_string(),
        entries,
    }
}

/// Folder-shop membership: tag-matched notes unioned with folder-enumerated
/// notes, deduplicated by path.
pub(crate) fn folder_members(shop: &FolderShop, vault: &impl VaultSource) -> Vec<Note> {
    let mut members = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    if let Some(tag) = &shop.item_tag {
        let mut tagged = vault.by_tag(tag);
        tagged.sort_by(|a, b| a.path.cmp(&b.path));
        for note in tagged {
            if seen.insert(note.path.clone()) {
                members.push(note);
            }
        }
    }

    let mut in_folder = vault.by_prefix(&shop.folder_path);
    in_folder.sort_by(|a, b| a.path.cmp(&b.path));
    for note in in_folder {
        if seen.insert(note.path.clone()) {
            members.push(note);
        }
    }

    members
}

fn compose_folder(
    shop: &FolderShop,
    vault: &impl VaultSource,
    ledger: &mut Ledger,
    dice: &mut DiceRoller,
) -> Vec<ListingEntry> {
    folder_members(shop, vault)
        .iter()
        .map(|note| make_entry(note, StockProfile::Folder, false, ledger, dice))
        .collect()
}

fn compose_custom(
    shop: &CustomShop,
    vault: &impl VaultSource,
    ledger: &mut Ledger,
    dice: &mut DiceRoller,
) -> Vec<ListingEntry> {
    let mut entries = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for path in &shop.fixed_items {
        let Some(note) = vault.note(path) else {
            warn!("Shop '{}' lists missing note {}", shop.name, path);
            continue;
        };
        if seen.insert(note.path.clone()) {
            entries.push(make_entry(&note, StockProfile::Fixed, false, ledger, dice));
        }
    }

    for pool in &shop.pools {
        let mut candidates = pool.items.clone();
        dice.shuffle(&mut candidates);
        let take = pool.max_items.min(candidates.len());

        for path in candidates.into_iter().take(take) {
            if !dice.chance(pool.chance) {
                continue;
            }
            let Some(note) = vault.note(&path) else {
                warn!("Pool '{}' in shop '{}' lists missing note {}", pool.name, shop.name, path);
                continue;
            };
            if seen.insert(note.path.clone()) {
                entries.push(make_entry(&note, StockProfile::Rare, true, ledger, dice));
            }
        }
    }

    entries
}

fn make_entry(
    note: &Note,
    profile: StockProfile,
    rare: bool,
    ledger: &mut Ledger,
    dice: &mut DiceRoller,
) -> ListingEntry {
    let item = resolve(note, dice);
    let base = ledger.ensure_base_price(&item.path, item.base_price);
    let price = ledger.current_price(&item.path).unwrap_or(base);
    let stock = ledger.ensure_stock(&item.path, profile, dice);

    ListingEntry {
        item,
        price,
        stock,
        rare,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::definition::RandomPool;
    use crate::vault::MemoryVault;

    fn vault_with_items() -> MemoryVault {
        let mut vault = MemoryVault::new();
        vault.insert("Items/Sword.md", "---\nprice: 40\n---\nA blade. #item");
        vault.insert("Items/Shield.md", "---\nprice: 30\n---\nA wall. #item");
        vault.insert("Gear/Cloak.md", "---\nprice: 20\n---\nWarm. #item");
        vault.insert("Notes/Diary.md", "Not an item at all.");
        vault
    }

    fn folder_shop() -> ShopDefinition {
        ShopDefinition::default_folder("Items/")
    }

    #[test]
    fn folder_listing_unions_tag_and_folder_members() {
        let vault = vault_with_items();
        let mut ledger = Ledger::new();
        let mut dice = DiceRoller::seeded(1);

        let listing = compose_listing(&folder_shop(), &vault, &mut ledger, &mut dice);

        // Sword + Shield are in the folder AND tagged; Cloak only tagged.
        let paths: Vec<&str> = listing.entries.iter().map(|e| e.item.path.as_str()).collect();
        assert_eq!(paths.len(), 3);
        assert!(paths.contains(&"Items/Sword.md"));
        assert!(paths.contains(&"Gear/Cloak.md"));
        assert!(!paths.contains(&"Notes/Diary.md"));
    }

    #[test]
    fn folder_listing_initializes_stock_once() {
        let vault = vault_with_items();
        let mut ledger = Ledger::new();
        let mut dice = DiceRoller::seeded(1);

        let first = compose_listing(&folder_shop(), &vault, &mut ledger, &mut dice);
        let second = compose_listing(&folder_shop(), &vault, &mut ledger, &mut dice);

        for (a, b) in first.entries.iter().zip(second.entries.iter()) {
            assert!((1..=10).contains(&a.stock));
            assert_eq!(a.stock, b.stock, "stock must survive re-listing");
            assert_eq!(a.price, b.price, "price must survive re-listing");
        }
    }

    #[test]
    fn empty_folder_is_an_empty_listing_not_an_error() {
        let vault = MemoryVault::new();
        let mut ledger = Ledger::new();
        let mut dice = DiceRoller::seeded(1);

        let listing = compose_listing(&folder_shop(), &vault, &mut ledger, &mut dice);
        assert!(listing.is_empty());
    }

    #[test]
    fn custom_shop_lists_fixed_items_with_small_stock() {
        let vault = vault_with_items();
        let mut ledger = Ledger::new();
        let mut dice = DiceRoller::seeded(1);

        let shop = ShopDefinition::Custom(CustomShop {
            name: "Smith".to_string(),
            description: String::new(),
            linked_note: None,
            fixed_items: vec!["Items/Sword.md".to_string(), "Items/Missing.md".to_string()],
            pools: vec![],
        });

        let listing = compose_listing(&shop, &vault, &mut ledger, &mut dice);
        assert_eq!(listing.entries.len(), 1);
        let entry = &listing.entries[0];
        assert!(!entry.rare);
        assert!((1..=5).contains(&entry.stock));
    }

    #[test]
    fn full_chance_pool_always_contributes_up_to_max_items() {
        let vault = vault_with_items();
        let mut ledger = Ledger::new();
        let mut dice = DiceRoller::seeded(1);

        let shop = ShopDefinition::Custom(CustomShop {
            name: "Collector".to_string(),
            description: String::new(),
            linked_note: None,
            fixed_items: vec![],
            pools: vec![RandomPool {
                name: "Everything".to_string(),
                chance: 1.0,
                max_items: 2,
                items: vec![
                    "Items/Sword.md".to_string(),
                    "Items/Shield.md".to_string(),
                    "Gear/Cloak.md".to_string(),
                ],
            }],
        });

        for _ in 0..20 {
            let listing = compose_listing(&shop, &vault, &mut ledger, &mut dice);
            assert_eq!(listing.entries.len(), 2);
            for entry in &listing.entries {
                assert!(entry.rare);
                assert!((1..=3).contains(&entry.stock));
            }
        }
    }

    #[test]
    fn zero_chance_pool_never_contributes() {
        let vault = vault_with_items();
        let mut ledger = Ledger::new();
        let mut dice = DiceRoller::seeded(1);

        let shop = ShopDefinition::Custom(CustomShop {
            name: "Ghost Stall".to_string(),
            description: String::new(),
            linked_note: None,
            fixed_items: vec![],
            pools: vec![RandomPool {
                name: "Never".to_string(),
                chance: 0.0,
                max_items: 3,
                items: vec!["Items/Sword.md".to_string()],
            }],
        });

        for _ in 0..20 {
            let listing = compose_listing(&shop, &vault, &mut ledger, &mut dice);
            assert!(listing.is_empty());
        }
    }

    #[test]
    fn zero_stock_entry_is_not_purchasable() {
        let vault = vault_with_items();
        let mut ledger = Ledger::new();
        let mut dice = DiceRoller::seeded(1);

        let listing = compose_listing(&folder_shop(), &vault, &mut ledger, &mut dice);
        let path = listing.entries[0].item.path.clone();
        while ledger.decrement_stock(&path).is_ok() {}

        let listing = compose_listing(&folder_shop(), &vault, &mut ledger, &mut dice);
        let entry = listing.entries.iter().find(|e| e.item.path == path).unwrap();
        assert_eq!(entry.stock, 0);
        assert!(!entry.purchasable());
    }
}
