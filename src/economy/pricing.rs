//! Pricing Engine
//!
//! Base prices are recorded once; restocks drift the current price by a
//! bounded random variation around the base.

use crate::rng::DiceRoller;

use super::Ledger;

impl Ledger {
    /// Record the base price for an identity if none is set yet.
    /// Returns the established base, which later resolutions cannot change.
    pub fn ensure_base_price(&mut self, path: &str, base: i32) -> i32 {
        let entry = self.entry_mut(path);
        *entry.base_price.get_or_insert(base)
    }

    /// Current price for an identity: the drifted restock price if one is
    /// stored, else the base price.
    pub fn current_price(&self, path: &str) -> Option<i32> {
        let entry = self.get(path)?;
        entry.current_price.or(entry.base_price)
    }

    /// Re-price an identity: `round(base * (1 + uniform(-v, +v)))`, stored as
    /// the new current price. A variation of 0 yields exactly the base price.
    pub fn restock_price(&mut self, path: &str, variation: f64, dice: &mut DiceRoller) -> Option<i32> {
        let base = self.get(path).and_then(|e| e.base_price)?;
        let v = variation.clamp(0.0, 1.0);
        let delta = (dice.unit() * 2.0 - 1.0) * v;
        let priced = ((f64::from(base)) * (1.0 + delta)).round() as i32;
        let priced = priced.max(0);
        self.entry_mut(path).current_price = Some(priced);
        Some(priced)
    }
}
