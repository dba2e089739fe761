//! Stock Ledger
//!
//! Integer stock counts per catalog identity. Stock is lazily initialized
//! with a random count the first time an item appears in a listing, depleted
//! by purchases, and reset by restocks. A purchase that would drive stock
//! below zero is rejected without mutating anything; listings additionally
//! mark zero-stock entries non-purchasable so the UI disables the buy action
//! before the decrement guard is ever reached.

use crate::error::EconomyError;
use crate::rng::DiceRoller;

use super::Ledger;

/// Initial stock range by how the item entered a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockProfile {
    /// Folder-shop member
    Folder,
    /// Fixed entry of a custom shop
    Fixed,
    /// Accepted random-pool drop
    Rare,
}

impl StockProfile {
    /// Inclusive bounds for the initial random stock count
    pub fn bounds(self) -> (i32, i32) {
        match self {
            StockProfile::Folder => (1, 10),
            StockProfile::Fixed => (1, 5),
            StockProfile::Rare => (1, 3),
        }
    }
}

impl Ledger {
    /// Initialize stock with a random count if absent; returns current stock.
    pub fn ensure_stock(&mut self, path: &str, profile: StockProfile, dice: &mut DiceRoller) -> i32 {
        let entry = self.entry_mut(path);
        match entry.stock {
            Some(count) => count,
            None => {
                let (min, max) = profile.bounds();
                let count = dice.range(min, max);
                entry.stock = Some(count);
                count
            }
        }
    }

    /// Current stock for an identity, if initialized
    pub fn stock_of(&self, path: &str) -> Option<i32> {
        self.get(path).and_then(|e| e.stock)
    }

    /// Take one unit of stock. Fails without mutating when stock is 0 or was
    /// never initialized. Returns the remaining count.
    pub fn decrement_stock(&mut self, path: &str) -> Result<i32, EconomyError> {
        let current = self.stock_of(path).unwrap_or(0);
        if current <= 0 {
            return Err(EconomyError::OutOfStock {
                name: path.to_string(),
            });
        }
        self.entry_mut(path).stock = Some(current - 1);
        Ok(current - 1)
    }

    /// Reset stock to a fresh random folder-range count
    pub fn restock_stock(&mut self, path: &str, dice: &mut DiceRoller) -> i32 {
        let (min, max) = StockProfile::Folder.bounds();
        let count = dice.range(min, max);
        self.entry_mut(path).stock = Some(count);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_stock_initializes_once() {
        let mut ledger = Ledger::new();
        let mut dice = DiceRoller::seeded(3);

        let first = ledger.ensure_stock("Items/Sword.md", StockProfile::Folder, &mut dice);
        assert!((1..=10).contains(&first));

        for _ in 0..20 {
            let again = ledger.ensure_stock("Items/Sword.md", StockProfile::Folder, &mut dice);
            assert_eq!(again, first);
        }
    }

    #[test]
    fn profiles_bound_initial_stock() {
        let mut dice = DiceRoller::seeded(11);
        for _ in 0..100 {
            let mut ledger = Ledger::new();
            let fixed = ledger.ensure_stock("a", StockProfile::Fixed, &mut dice);
            let rare = ledger.ensure_stock("b", StockProfile::Rare, &mut dice);
            assert!((1..=5).contains(&fixed));
            assert!((1..=3).contains(&rare));
        }
    }

    #[test]
    fn stock_never_goes_negative() {
        let mut ledger = Ledger::new();
        let mut dice = DiceRoller::seeded(3);
        let count = ledger.ensure_stock("Items/Sword.md", StockProfile::Folder, &mut dice);

        for remaining in (0..count).rev() {
            assert_eq!(ledger.decrement_stock("Items/Sword.md").unwrap(), remaining);
        }

        // Exhausted: every further decrement fails and leaves stock at 0.
        for _ in 0..5 {
            assert!(matches!(
                ledger.decrement_stock("Items/Sword.md"),
                Err(EconomyError::OutOfStock { .. })
            ));
            assert_eq!(ledger.stock_of("Items/Sword.md"), Some(0));
        }
    }

    #[test]
    fn decrement_on_uninitialized_identity_fails() {
        let mut ledger = Ledger::new();
        assert!(ledger.decrement_stock("Items/Ghost.md").is_err());
    }

    #[test]
    fn restock_resets_to_folder_range() {
        let mut ledger = Ledger::new();
        let mut dice = DiceRoller::seeded(3);
        ledger.ensure_stock("Items/Sword.md", StockProfile::Rare, &mut dice);
        while ledger.decrement_stock("Items/Sword.md").is_ok() {}

        for _ in 0..50 {
            let count = ledger.restock_stock("Items/Sword.md", &mut dice);
            assert!((1..=10).contains(&count));
        }
    }
}
