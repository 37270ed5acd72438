//! Coins, PERFECT streaks and kill counts for the running session.
//!
//! Stored on `SimulationEngine`, not as an ECS entity.

use chronoguard_core::constants::{COMBO_BONUS_COINS, COMBO_BONUS_INTERVAL};
use chronoguard_core::state::EconomyView;

/// Running wallet and streak state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Economy {
    pub coins: u32,
    /// Consecutive PERFECT attacks.
    pub combo: u32,
    pub best_combo: u32,
    pub enemies_killed: u32,
}

impl Economy {
    pub fn earn(&mut self, coins: u32) {
        self.coins = self.coins.saturating_add(coins);
    }

    /// Deduct `amount` if the wallet covers it.
    pub fn spend(&mut self, amount: u32) -> bool {
        if self.coins < amount {
            return false;
        }
        self.coins -= amount;
        true
    }

    /// Extend the PERFECT streak. Every third consecutive PERFECT pays the
    /// combo bonus; returns whether it was paid.
    pub fn register_perfect(&mut self) -> bool {
        self.combo += 1;
        self.best_combo = self.best_combo.max(self.combo);
        if self.combo % COMBO_BONUS_INTERVAL == 0 {
            self.earn(COMBO_BONUS_COINS);
            true
        } else {
            false
        }
    }

    pub fn break_combo(&mut self) {
        self.combo = 0;
    }

    pub fn record_kills(&mut self, kills: u32) {
        self.enemies_killed += kills;
    }

    pub fn view(&self) -> EconomyView {
        EconomyView {
            coins: self.coins,
            combo: self.combo,
            best_combo: self.best_combo,
            enemies_killed: self.enemies_killed,
        }
    }
}
