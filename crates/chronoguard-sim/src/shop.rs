//! Upgrade shop: levels, prices and coin-gated purchases.

use chronoguard_core::constants::*;
use chronoguard_core::enums::UpgradeKind;
use chronoguard_core::state::UpgradeView;

use crate::economy::Economy;

/// Read access to upgrade levels. The attack resolver only needs this much
/// of the shop.
pub trait UpgradeLevels {
    /// Current level of `upgrade`. Levels start at 1.
    fn level(&self, upgrade: UpgradeKind) -> u32;

    /// Blast radius multiplier from the radius upgrade.
    fn radius_multiplier(&self) -> f64 {
        1.0 + f64::from(self.level(UpgradeKind::Radius).saturating_sub(1)) * RADIUS_UPGRADE_STEP
    }

    /// Damage dealt per hit.
    fn power(&self) -> u32 {
        self.level(UpgradeKind::Power).max(1)
    }
}

/// Purchased upgrade levels. Persists across sessions of one engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shop {
    radius_level: u32,
    power_level: u32,
}

impl Default for Shop {
    fn default() -> Self {
        Self {
            radius_level: 1,
            power_level: 1,
        }
    }
}

impl UpgradeLevels for Shop {
    fn level(&self, upgrade: UpgradeKind) -> u32 {
        match upgrade {
            UpgradeKind::Radius => self.radius_level,
            UpgradeKind::Power => self.power_level,
            // One-shot purchases have no level of their own.
            UpgradeKind::Heal | UpgradeKind::MaxHealth => 1,
        }
    }
}

/// Price of the next level of a tiered upgrade, `None` once maxed.
fn tier_cost(level: u32, max_level: u32, costs: &[u32]) -> Option<u32> {
    if level >= max_level {
        return None;
    }
    costs.get(level.saturating_sub(1) as usize).copied()
}

impl Shop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Price of the next purchase of `upgrade`, `None` once maxed.
    pub fn cost(&self, upgrade: UpgradeKind) -> Option<u32> {
        match upgrade {
            UpgradeKind::Radius => {
                tier_cost(self.radius_level, RADIUS_UPGRADE_MAX_LEVEL, &RADIUS_UPGRADE_COSTS)
            }
            UpgradeKind::Power => {
                tier_cost(self.power_level, POWER_UPGRADE_MAX_LEVEL, &POWER_UPGRADE_COSTS)
            }
            UpgradeKind::Heal => Some(HEAL_COST),
            UpgradeKind::MaxHealth => Some(FORTIFY_COST),
        }
    }

    /// Price for a free-form item name. Unknown names (and maxed items)
    /// report a cost nobody can pay.
    pub fn cost_by_name(&self, name: &str) -> u32 {
        match UpgradeKind::parse(name) {
            Some(upgrade) => self.cost(upgrade).unwrap_or(UNATTAINABLE_COST),
            None => {
                log::warn!("unknown shop item {name:?}");
                UNATTAINABLE_COST
            }
        }
    }

    /// Buy `upgrade` from `wallet`. Returns the price paid, or `None` when
    /// the item is maxed or unaffordable. One-shot effects (heal, fortify)
    /// are applied by the caller.
    pub fn purchase(&mut self, upgrade: UpgradeKind, wallet: &mut Economy) -> Option<u32> {
        let cost = self.cost(upgrade)?;
        if !wallet.spend(cost) {
            return None;
        }
        match upgrade {
            UpgradeKind::Radius => self.radius_level += 1,
            UpgradeKind::Power => self.power_level += 1,
            UpgradeKind::Heal | UpgradeKind::MaxHealth => {}
        }
        Some(cost)
    }

    /// `purchase` keyed by item name. Unknown names never succeed.
    pub fn purchase_by_name(&mut self, name: &str, wallet: &mut Economy) -> Option<(UpgradeKind, u32)> {
        let upgrade = UpgradeKind::parse(name)?;
        self.purchase(upgrade, wallet).map(|cost| (upgrade, cost))
    }

    pub fn view(&self) -> UpgradeView {
        UpgradeView {
            radius_level: self.radius_level,
            power_level: self.power_level,
            radius_cost: self.cost(UpgradeKind::Radius),
            power_cost: self.cost(UpgradeKind::Power),
            heal_cost: self.cost(UpgradeKind::Heal),
            max_health_cost: self.cost(UpgradeKind::MaxHealth),
        }
    }
}
