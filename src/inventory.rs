//! Player Inventory
//!
//! Owned item stacks with merge-by-name semantics, half-price sell-back and
//! consumable use tracking.
//!
//! Stacks merge by display name, not by catalog identity: two different notes
//! with the same basename share one stack, and the stack keeps the source
//! path of whichever was acquired first. This mirrors the original economy's
//! observed behavior and is preserved deliberately.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;
use crate::error::EconomyError;

/// Sell-back never pays less than this many coins
pub const MIN_SALE_PRICE: i32 = 25;

/// Price assumed for entries that recorded no acquisition price
pub const UNPRICED_SALE_BASIS: i32 = 50;

/// Use tracking for a consumable stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumableState {
    pub current_uses: i32,
    pub max_uses: i32,
}

/// One stack of owned items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub name: String,
    /// Note path of the first acquisition
    pub source_id: String,
    pub quantity: i32,
    /// Price snapshot at acquisition; `None` for grandfathered entries
    pub price: Option<i32>,
    pub description: String,
    pub consumable: Option<ConsumableState>,
}

impl InventoryEntry {
    /// Build a quantity-1 entry from a resolved item and its acquisition price
    pub fn from_item(item: &CatalogItem, price: i32) -> Self {
        Self {
            name: item.name.clone(),
            source_id: item.path.clone(),
            quantity: 1,
            price: Some(price),
            description: item.description.clone(),
            consumable: item.consumable.map(|c| ConsumableState {
                current_uses: c.max_uses,
                max_uses: c.max_uses,
            }),
        }
    }

    /// Half the acquisition price, floor-protected at 25 coins
    pub fn sale_price(&self) -> i32 {
        (self.price.unwrap_or(UNPRICED_SALE_BASIS) / 2).max(MIN_SALE_PRICE)
    }
}

/// Result of using one item from a stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseOutcome {
    /// Not a consumable; nothing changed beyond the host's notification
    NotConsumable,
    /// A use was spent, some remain on the current item
    Used { remaining_uses: i32 },
    /// The current item was spent; the stack shrank and uses reset
    SpentOne { remaining_quantity: i32 },
    /// The last item was spent and the stack is gone
    Removed,
}

/// The player's owned-item collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn find(&self, name: &str) -> Option<&InventoryEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Add an entry, merging into an existing stack with the same name
    pub fn add(&mut self, entry: InventoryEntry) {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => existing.quantity += entry.quantity,
            None => self.entries.push(entry),
        }
    }

    /// Sell one item from the named stack; returns the coins gained
    pub fn sell(&mut self, name: &str) -> Result<i32, EconomyError> {
        let index = self.index_of(name)?;
        let gained = self.entries[index].sale_price();

        if self.entries[index].quantity > 1 {
            self.entries[index].quantity -= 1;
        } else {
            self.entries.remove(index);
        }
        Ok(gained)
    }

    /// Use one item from the named stack
    pub fn use_one(&mut self, name: &str) -> Result<UseOutcome, EconomyError> {
        let index = self.index_of(name)?;
        let entry = &mut self.entries[index];

        let Some(state) = entry.consumable.as_mut() else {
            return Ok(UseOutcome::NotConsumable);
        };

        state.current_uses -= 1;
        if state.current_uses > 0 {
            return Ok(UseOutcome::Used {
                remaining_uses: state.current_uses,
            });
        }

        // The current item is spent.
        if entry.quantity > 1 {
            state.current_uses = state.max_uses;
            entry.quantity -= 1;
            Ok(UseOutcome::SpentOne {
                remaining_quantity: entry.quantity,
            })
        } else {
            self.entries.remove(index);
            Ok(UseOutcome::Removed)
        }
    }

    fn index_of(&self, name: &str) -> Result<usize, EconomyError> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| EconomyError::NotInInventory {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn item(path: &str, name: &str, price: i32) -> CatalogItem {
        CatalogItem {
            path: path.to_string(),
            name: name.to_string(),
            base_price: price,
            description: "desc".to_string(),
            tags: BTreeSet::new(),
            consumable: None,
        }
    }

    fn consumable_entry(name: &str, max_uses: i32, quantity: i32) -> InventoryEntry {
        InventoryEntry {
            name: name.to_string(),
            source_id: format!("Items/{}.md", name),
            quantity,
            price: Some(40),
            description: String::new(),
            consumable: Some(ConsumableState {
                current_uses: max_uses,
                max_uses,
            }),
        }
    }

    #[test]
    fn entries_merge_by_name_across_identities() {
        let mut inventory = Inventory::new();
        inventory.add(InventoryEntry::from_item(&item("Items/Sword.md", "Sword", 40), 40));
        inventory.add(InventoryEntry::from_item(&item("Other/Sword.md", "Sword", 90), 90));

        assert_eq!(inventory.len(), 1);
        let stack = inventory.find("Sword").unwrap();
        assert_eq!(stack.quantity, 2);
        // The stack keeps the first acquisition's identity and price.
        assert_eq!(stack.source_id, "Items/Sword.md");
        assert_eq!(stack.price, Some(40));
    }

    #[test]
    fn sale_price_is_floored_half_price() {
        let entry = InventoryEntry::from_item(&item("a", "Cheap", 30), 30);
        assert_eq!(entry.sale_price(), 25);

        let entry = InventoryEntry::from_item(&item("b", "Dear", 120), 120);
        assert_eq!(entry.sale_price(), 60);

        let mut unpriced = InventoryEntry::from_item(&item("c", "Old", 0), 0);
        unpriced.price = None;
        assert_eq!(unpriced.sale_price(), 25);
    }

    #[test]
    fn selling_decrements_then_removes() {
        let mut inventory = Inventory::new();
        let mut entry = InventoryEntry::from_item(&item("a", "Sword", 100), 100);
        entry.quantity = 2;
        inventory.add(entry);

        assert_eq!(inventory.sell("Sword"), Ok(50));
        assert_eq!(inventory.find("Sword").unwrap().quantity, 1);
        assert_eq!(inventory.sell("Sword"), Ok(50));
        assert!(inventory.find("Sword").is_none());
        assert!(matches!(
            inventory.sell("Sword"),
            Err(EconomyError::NotInInventory { .. })
        ));
    }

    #[test]
    fn consumable_use_cycle_with_one_stack_item() {
        let mut inventory = Inventory::new();
        inventory.add(consumable_entry("Tonic", 3, 1));

        assert_eq!(inventory.use_one("Tonic"), Ok(UseOutcome::Used { remaining_uses: 2 }));
        assert_eq!(inventory.use_one("Tonic"), Ok(UseOutcome::Used { remaining_uses: 1 }));
        assert_eq!(inventory.use_one("Tonic"), Ok(UseOutcome::Removed));
        assert!(inventory.is_empty());
    }

    #[test]
    fn consumable_spend_resets_uses_when_more_remain() {
        let mut inventory = Inventory::new();
        inventory.add(consumable_entry("Tonic", 2, 3));

        assert_eq!(inventory.use_one("Tonic"), Ok(UseOutcome::Used { remaining_uses: 1 }));
        assert_eq!(
            inventory.use_one("Tonic"),
            Ok(UseOutcome::SpentOne { remaining_quantity: 2 })
        );

        let stack = inventory.find("Tonic").unwrap();
        assert_eq!(stack.consumable.unwrap().current_uses, 2);
    }

    #[test]
    fn non_consumable_use_changes_nothing() {
        let mut inventory = Inventory::new();
        inventory.add(InventoryEntry::from_item(&item("a", "Sword", 40), 40));

        assert_eq!(inventory.use_one("Sword"), Ok(UseOutcome::NotConsumable));
        assert_eq!(inventory.find("Sword").unwrap().quantity, 1);
    }
}
