//! The boss: an orbiting entity with a surge/cooldown cycle.
//!
//! Bosses live on the engine rather than in the ECS world. There is at most
//! one and every system that touches it needs exclusive access anyway.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::DVec2;

use chronoguard_core::components::Health;
use chronoguard_core::constants::*;
use chronoguard_core::enums::{BossAbility, DamageOutcome, SurgeSignal};
use chronoguard_core::state::BossView;
use chronoguard_core::types::Position;

#[derive(Debug, Clone)]
pub struct Boss {
    level: u32,
    ability: BossAbility,
    health: Health,
    center: Position,
    position: Position,
    orbit_radius: f64,
    orbit_angle: f64,
    rotation: f64,
    surging: bool,
    /// Seconds left in the current surge or cooldown phase.
    surge_timer: f64,
}

impl Boss {
    /// Spawn a level-`level` boss far out on its orbit around `center`.
    pub fn new(level: u32, center: Position) -> Self {
        let level = level.max(1);
        let orbit_angle = -FRAC_PI_2;
        Self {
            level,
            ability: BossAbility::for_level(level),
            health: Health::full(Self::max_health_for_level(level)),
            center,
            position: center + DVec2::from_angle(orbit_angle) * BOSS_ENTRANCE_RADIUS,
            orbit_radius: BOSS_ENTRANCE_RADIUS,
            orbit_angle,
            rotation: 0.0,
            surging: false,
            surge_timer: BOSS_SURGE_COOLDOWN,
        }
    }

    pub fn max_health_for_level(level: u32) -> u32 {
        BOSS_BASE_HEALTH + level.saturating_sub(1) * BOSS_HEALTH_PER_LEVEL
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn ability(&self) -> BossAbility {
        self.ability
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn orbit_radius(&self) -> f64 {
        self.orbit_radius
    }

    pub fn is_surging(&self) -> bool {
        self.surging
    }

    pub fn surge_timer(&self) -> f64 {
        self.surge_timer
    }

    pub fn is_defeated(&self) -> bool {
        self.health.is_depleted()
    }

    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        self.health.apply_damage(amount)
    }

    /// Minion spawn interval in the current phase.
    pub fn minion_interval(&self) -> f64 {
        let base = if self.surging {
            BOSS_SURGE_MINION_INTERVAL
        } else {
            BOSS_MINION_INTERVAL
        };
        if self.level == 1 {
            base * FIRST_BOSS_MINION_MULTIPLIER
        } else {
            base
        }
    }

    /// Advance movement and the surge cycle by `dt`. Returns a signal on
    /// the tick a surge starts or ends.
    ///
    /// The phase timer carries its overshoot into the next phase, so
    /// surge and cooldown phases tile simulated time exactly.
    pub fn update(&mut self, dt: f64) -> Option<SurgeSignal> {
        if self.is_defeated() {
            return None;
        }

        if self.orbit_radius > BOSS_ORBIT_RADIUS {
            self.orbit_radius = (self.orbit_radius - BOSS_ENTRANCE_SPEED * dt).max(BOSS_ORBIT_RADIUS);
        }

        let (orbit_factor, rotation_factor) = if self.surging {
            (BOSS_SURGE_ORBIT_FACTOR, BOSS_SURGE_ROTATION_FACTOR)
        } else {
            (1.0, 1.0)
        };
        self.orbit_angle = (self.orbit_angle + BOSS_ORBIT_SPEED * orbit_factor * dt).rem_euclid(TAU);
        self.rotation = (self.rotation + BOSS_ROTATION_SPEED * rotation_factor * dt).rem_euclid(TAU);
        self.position = self.center + DVec2::from_angle(self.orbit_angle) * self.orbit_radius;

        self.surge_timer -= dt;
        if self.surge_timer > 0.0 {
            return None;
        }
        if self.surging {
            self.surging = false;
            self.surge_timer += BOSS_SURGE_COOLDOWN;
            Some(SurgeSignal::SurgeEnded)
        } else {
            self.surging = true;
            self.surge_timer += BOSS_SURGE_DURATION;
            Some(SurgeSignal::SurgeStarted)
        }
    }

    pub fn view(&self) -> BossView {
        BossView {
            level: self.level,
            ability: self.ability,
            position: self.position,
            radius: BOSS_RADIUS,
            rotation: self.rotation,
            health: self.health.current,
            max_health: self.health.max,
            surging: self.surging,
            surge_timer: self.surge_timer,
        }
    }
}
