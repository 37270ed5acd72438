//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` is the session object: it owns the hecs ECS world, the
//! stopwatch, the wave/boss director and the scheduled-event queue. It
//! processes player commands, runs all systems and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use chronoguard_core::commands::PlayerCommand;
use chronoguard_core::components::Health;
use chronoguard_core::constants::*;
use chronoguard_core::enums::*;
use chronoguard_core::events::{AudioCue, GameEvent, UiCue};
use chronoguard_core::state::{GameStateSnapshot, StopwatchView};
use chronoguard_core::types::{PlayArea, Position, SimTime};
use chronoguard_timing::Stopwatch;

use crate::boss::Boss;
use crate::economy::Economy;
use crate::scheduler::{ScheduledEvent, Scheduler};
use crate::shop::Shop;
use crate::systems;
use crate::systems::attack::AttackOutcome;
use crate::systems::snapshot::SessionView;
use crate::wave::{self, WaveState};
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same simulation.
    pub seed: u64,
    /// Difficulty used until a StartGame command picks one.
    pub difficulty: Difficulty,
    pub area: PlayArea,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            difficulty: Difficulty::default(),
            area: PlayArea::default(),
        }
    }
}

/// Clamp a host frame delta. Non-positive or non-finite deltas are dropped.
pub fn clamp_frame_dt(dt: f64) -> Option<f64> {
    if !dt.is_finite() || dt <= 0.0 {
        return None;
    }
    Some(dt.min(MAX_FRAME_DT))
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    world: World,
    area: PlayArea,
    time: SimTime,
    phase: GamePhase,
    director: DirectorState,
    rng: ChaCha8Rng,
    /// Drives glitched display strings only, so rendering never perturbs
    /// gameplay rolls.
    cosmetic_rng: ChaCha8Rng,
    stopwatch: Stopwatch,
    castle: Health,
    boss: Option<Boss>,
    wave: WaveState,
    economy: Economy,
    shop: Shop,
    scheduler: Scheduler,
    frozen: bool,
    attack_locked: bool,
    /// Whether the stopwatch was running when the session was paused.
    resume_stopwatch: bool,
    last_grade: Option<Grade>,
    next_enemy_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    audio_cues: Vec<AudioCue>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            area: config.area,
            time: SimTime::default(),
            phase: GamePhase::default(),
            director: DirectorState::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            cosmetic_rng: ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(1)),
            stopwatch: Stopwatch::new(config.difficulty),
            castle: Health::full(CASTLE_MAX_HEALTH),
            boss: None,
            wave: WaveState::first(),
            economy: Economy::default(),
            shop: Shop::new(),
            scheduler: Scheduler::new(),
            frozen: false,
            attack_locked: false,
            resume_stopwatch: false,
            last_grade: None,
            next_enemy_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_cues: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the session by one host frame of `dt` seconds and return the
    /// resulting snapshot.
    ///
    /// Commands are applied first. While playing, the scheduler clock runs
    /// even during a surge freeze, but gameplay systems do not.
    pub fn tick(&mut self, dt: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing {
            if let Some(dt) = clamp_frame_dt(dt) {
                for event in self.scheduler.advance(dt) {
                    self.handle_scheduled(event);
                }
                if self.phase == GamePhase::Playing && !self.frozen {
                    self.run_systems(dt);
                    self.time.advance(dt);
                }
            }
        }

        self.build_snapshot()
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn director(&self) -> DirectorState {
        self.director
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn wave(&self) -> &WaveState {
        &self.wave
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    pub fn castle(&self) -> Health {
        self.castle
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn is_attack_locked(&self) -> bool {
        self.attack_locked
    }

    pub fn last_grade(&self) -> Option<Grade> {
        self.last_grade
    }

    pub fn live_enemy_count(&self) -> usize {
        systems::movement::live_enemy_count(&self.world)
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Spawn an enemy at an exact position (for testing).
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, kind: EnemyKind, position: Position) -> hecs::Entity {
        world_setup::spawn_enemy_at(&mut self.world, kind, position, &mut self.next_enemy_id)
    }

    /// Add coins directly (for testing).
    #[cfg(test)]
    pub fn grant_coins(&mut self, coins: u32) {
        self.economy.earn(coins);
    }

    /// Damage the structure directly (for testing).
    #[cfg(test)]
    pub fn damage_castle(&mut self, amount: u32) {
        self.castle.apply_damage(amount);
    }

    /// Mark the current wave fully spawned and remove its enemies (for testing).
    #[cfg(test)]
    pub fn finish_wave_spawns(&mut self) {
        self.wave.enemies_spawned = self.wave.enemies_target;
        systems::cleanup::clear_enemies(&mut self.world, &mut self.despawn_buffer);
    }

    /// Drop the live boss to zero health (for testing).
    #[cfg(test)]
    pub fn defeat_boss(&mut self) {
        if let Some(boss) = self.boss.as_mut() {
            boss.take_damage(boss.health().current);
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame { difficulty } => {
                if matches!(self.phase, GamePhase::MainMenu | GamePhase::GameOver) {
                    self.start_game(difficulty);
                }
            }
            PlayerCommand::ReturnToMenu => {
                if self.phase != GamePhase::MainMenu {
                    self.reset_session();
                    self.phase = GamePhase::MainMenu;
                    self.ui_cue(UiCue::Click);
                }
            }
            PlayerCommand::Pause => self.suspend(GamePhase::Paused),
            PlayerCommand::Resume => self.unsuspend(GamePhase::Paused),
            PlayerCommand::OpenShop => self.suspend(GamePhase::Shop),
            PlayerCommand::CloseShop => self.unsuspend(GamePhase::Shop),
            PlayerCommand::Attack => {
                self.attack();
            }
            PlayerCommand::Purchase { upgrade } => {
                self.purchase(upgrade);
            }
            PlayerCommand::JumpToWave { wave } => {
                if !self.jump_to_wave(wave) {
                    log::warn!("rejected jump to wave {wave} in {:?}", self.phase);
                }
            }
        }
    }

    fn start_game(&mut self, difficulty: Difficulty) {
        self.reset_session();
        self.stopwatch.set_difficulty(difficulty);
        self.stopwatch.start();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::GameStarted { difficulty });
        self.announce_wave();
        log::info!("game started on {difficulty:?}");
    }

    /// Drop every trace of the current session except shop levels. Pending
    /// scheduled events are orphaned.
    fn reset_session(&mut self) {
        self.scheduler.invalidate();
        self.world.clear();
        self.despawn_buffer.clear();
        self.time = SimTime::default();
        self.director = DirectorState::NormalSpawning;
        self.stopwatch.reset();
        self.castle = Health::full(CASTLE_MAX_HEALTH);
        self.boss = None;
        self.wave = WaveState::first();
        self.economy = Economy::default();
        self.frozen = false;
        self.attack_locked = false;
        self.resume_stopwatch = false;
        self.last_grade = None;
        self.next_enemy_id = 0;
    }

    /// Enter a suspended phase (pause or shop) from Playing. The stopwatch
    /// is stopped and the grade of that stop discarded.
    fn suspend(&mut self, phase: GamePhase) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.resume_stopwatch = self.stopwatch.is_running();
        let _ = self.stopwatch.stop();
        self.phase = phase;
        self.ui_cue(UiCue::Click);
    }

    fn unsuspend(&mut self, phase: GamePhase) {
        if self.phase != phase {
            return;
        }
        if self.resume_stopwatch {
            self.stopwatch.start();
        }
        self.phase = GamePhase::Playing;
        self.ui_cue(UiCue::Click);
    }

    /// Handle an attack trigger. Ignored outside play, during a surge
    /// freeze and during the lockout that follows a previous attack.
    pub fn attack(&mut self) -> Option<AttackOutcome> {
        if self.phase != GamePhase::Playing || self.frozen || self.attack_locked {
            log::debug!("attack ignored");
            return None;
        }

        self.attack_locked = true;
        let grade = self.stopwatch.stop();
        self.last_grade = Some(grade);

        let outcome = systems::attack::resolve(
            &mut self.world,
            self.boss.as_mut(),
            &mut self.economy,
            &self.shop,
            &self.area,
            grade,
            &mut self.audio_cues,
        );
        self.events.push(GameEvent::AttackResolved {
            grade,
            kills: outcome.kills,
            coins: outcome.coins,
        });
        self.scheduler
            .schedule(ATTACK_LOCKOUT_SECS, ScheduledEvent::ReleaseAttackLock);
        Some(outcome)
    }

    /// Buy an upgrade. Only possible while the shop is open.
    pub fn purchase(&mut self, upgrade: UpgradeKind) -> bool {
        if self.phase != GamePhase::Shop {
            self.ui_cue(UiCue::Error);
            return false;
        }
        let Some(cost) = self.shop.purchase(upgrade, &mut self.economy) else {
            log::debug!("purchase of {upgrade:?} refused");
            self.ui_cue(UiCue::Error);
            return false;
        };

        match upgrade {
            UpgradeKind::Heal => self.castle.heal(HEAL_AMOUNT),
            UpgradeKind::MaxHealth => {
                self.castle.max += FORTIFY_AMOUNT;
                self.castle.heal(FORTIFY_AMOUNT);
            }
            UpgradeKind::Radius | UpgradeKind::Power => {}
        }
        self.ui_cue(UiCue::Buy);
        self.events
            .push(GameEvent::UpgradePurchased { upgrade, cost });
        log::info!("bought {upgrade:?} for {cost}");
        true
    }

    /// Debug jump straight to wave `n`, as if it had just started. Boss
    /// waves start their encounter immediately. Wave 0 is rejected.
    pub fn jump_to_wave(&mut self, n: u32) -> bool {
        if n == 0 || self.phase != GamePhase::Playing {
            return false;
        }

        self.scheduler.invalidate();
        self.world.clear();
        self.despawn_buffer.clear();
        self.boss = None;
        self.frozen = false;
        self.attack_locked = false;
        self.stopwatch.reset();
        self.stopwatch.start();

        self.wave.wave = n;
        self.wave.spawn_timer = 0.0;
        if wave::is_boss_wave_number(n) {
            self.wave.boss_level = n / BOSS_WAVE_PERIOD - 1;
            self.start_boss_encounter();
            self.director = DirectorState::BossActive;
        } else {
            self.wave.boss_level = n / BOSS_WAVE_PERIOD;
            self.wave.begin_normal_wave();
            self.director = DirectorState::NormalSpawning;
            self.announce_wave();
        }
        log::info!("jumped to wave {n}");
        true
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let center = self.area.center();
        self.despawn_buffer.clear();

        // 1. Stopwatch
        self.stopwatch.tick(dt);

        // 2. Spawning and the boss
        match self.director {
            DirectorState::NormalSpawning => systems::spawner::run_wave(
                &mut self.world,
                &mut self.rng,
                &self.area,
                &mut self.wave,
                &mut self.next_enemy_id,
                dt,
            ),
            DirectorState::BossActive => self.update_boss(dt),
            DirectorState::WaveClearPause
            | DirectorState::BossIntro
            | DirectorState::BossDefeated => {}
        }
        // A surge that just began freezes the rest of this tick too.
        if self.frozen {
            return;
        }

        // 3. Wave clear
        if self.director == DirectorState::NormalSpawning
            && self.wave.is_cleared(systems::movement::live_enemy_count(&self.world))
        {
            self.on_wave_cleared();
        }

        // 4. Enemy movement and structure contact
        for damage in systems::movement::run(&mut self.world, center, dt) {
            self.castle.apply_damage(damage);
            self.audio_cues.push(AudioCue::Hit);
        }

        // 5. Effects
        systems::effects::run(&mut self.world, dt, &mut self.despawn_buffer);

        // 6. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        // 7. Game over
        if self.castle.is_depleted() {
            self.game_over();
        }
    }

    fn update_boss(&mut self, dt: f64) {
        let Some(boss) = self.boss.as_mut() else {
            return;
        };
        if boss.is_defeated() {
            self.on_boss_defeated();
            return;
        }

        let signal = boss.update(dt);
        let interval = boss.minion_interval();
        match signal {
            Some(SurgeSignal::SurgeStarted) => self.on_surge_started(),
            Some(SurgeSignal::SurgeEnded) => self.on_surge_ended(),
            None => {}
        }
        if self.frozen {
            return;
        }

        systems::spawner::run_minions(
            &mut self.world,
            &mut self.rng,
            &self.area,
            &mut self.wave,
            &mut self.next_enemy_id,
            interval,
            dt,
        );
    }

    fn on_wave_cleared(&mut self) {
        let cleared = self.wave.wave;
        self.events.push(GameEvent::WaveCleared { wave: cleared });
        self.director = DirectorState::WaveClearPause;
        self.wave.wave += 1;
        self.castle.heal(WAVE_CLEAR_HEAL);

        if wave::is_boss_wave_number(self.wave.wave) {
            self.scheduler
                .schedule(BOSS_INTRO_DELAY_SECS, ScheduledEvent::BossIntro);
        } else {
            self.wave.begin_normal_wave();
            self.announce_wave();
        }
        self.scheduler
            .schedule(WAVE_CLEAR_PAUSE_SECS, ScheduledEvent::EndWavePause);
        log::info!("wave {cleared} cleared");
    }

    /// Spawn the next boss and configure the wave around it.
    fn start_boss_encounter(&mut self) {
        self.wave.boss_level += 1;
        let boss = Boss::new(self.wave.boss_level, self.area.center());
        let ability = boss.ability();
        match ability {
            BossAbility::None => {}
            BossAbility::TimeWarp => {
                self.stopwatch.set_time_scale(TIME_WARP_SCALE);
            }
            BossAbility::Glitch => self.stopwatch.set_glitch(true),
        }

        systems::cleanup::clear_enemies(&mut self.world, &mut self.despawn_buffer);
        self.wave.begin_boss_wave();
        world_setup::spawn_announcement(&mut self.world, self.wave.wave, true);
        self.audio_cues.push(AudioCue::BossSpawn);
        self.events.push(GameEvent::BossSpawned {
            level: boss.level(),
            ability,
        });
        log::info!("boss level {} ({ability:?}) spawned", boss.level());
        self.boss = Some(boss);
    }

    fn on_boss_defeated(&mut self) {
        let level = self.boss.take().map(|b| b.level()).unwrap_or_default();
        self.director = DirectorState::BossDefeated;
        systems::cleanup::clear_enemies(&mut self.world, &mut self.despawn_buffer);
        self.stopwatch.clear_modifiers();
        self.frozen = false;
        self.wave.enemies_spawned = self.wave.enemies_target;
        self.ui_cue(UiCue::Buy);
        self.events.push(GameEvent::BossDefeated { level });
        log::info!("boss level {level} defeated");
        self.director = DirectorState::NormalSpawning;
    }

    fn on_surge_started(&mut self) {
        self.frozen = true;
        self.scheduler
            .schedule(SURGE_FREEZE_SECS, ScheduledEvent::EndSurgeFreeze);
        let target = self.stopwatch.surge_target(&mut self.rng);
        self.stopwatch.retarget(Some(target));
        self.banner("OVERDRIVE!", EffectTone::Warning);
        self.audio_cues.push(AudioCue::SurgeStart);
        self.events.push(GameEvent::SurgeStarted);
        log::debug!("surge started, target {target:.2}");
    }

    fn on_surge_ended(&mut self) {
        self.banner("OVERDRIVE ENDED", EffectTone::Calm);
        self.audio_cues.push(AudioCue::SurgeEnd);
        self.events.push(GameEvent::SurgeEnded);
    }

    fn handle_scheduled(&mut self, event: ScheduledEvent) {
        match event {
            ScheduledEvent::BossIntro => {
                if self.director == DirectorState::WaveClearPause {
                    self.start_boss_encounter();
                    self.director = DirectorState::BossIntro;
                }
            }
            ScheduledEvent::EndWavePause => {
                self.director = match self.director {
                    DirectorState::WaveClearPause => DirectorState::NormalSpawning,
                    DirectorState::BossIntro => DirectorState::BossActive,
                    other => other,
                };
            }
            ScheduledEvent::EndSurgeFreeze => self.frozen = false,
            ScheduledEvent::ReleaseAttackLock => self.release_attack_lock(),
        }
    }

    /// End the attack lockout: pick the next target and restart the clock.
    /// During a surge freeze the surge target already set stands.
    fn release_attack_lock(&mut self) {
        self.attack_locked = false;
        if !self.frozen {
            let surging = self.boss.as_ref().is_some_and(Boss::is_surging);
            if surging {
                let target = self.stopwatch.surge_target(&mut self.rng);
                self.stopwatch.retarget(Some(target));
            } else {
                self.stopwatch.retarget(None);
            }
        }
        self.stopwatch.start();
    }

    fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.scheduler.invalidate();
        let _ = self.stopwatch.stop();
        self.audio_cues.push(AudioCue::GameOver);
        self.events.push(GameEvent::GameOver {
            wave: self.wave.wave,
            coins: self.economy.coins,
        });
        log::info!(
            "game over on wave {} with {} coins",
            self.wave.wave,
            self.economy.coins
        );
    }

    fn announce_wave(&mut self) {
        world_setup::spawn_announcement(&mut self.world, self.wave.wave, false);
        self.events.push(GameEvent::WaveStarted {
            wave: self.wave.wave,
            enemies: self.wave.enemies_target,
        });
    }

    fn banner(&mut self, text: &str, tone: EffectTone) {
        let position = self.area.center() - Position::new(0.0, BANNER_OFFSET_Y);
        world_setup::spawn_floating_text(&mut self.world, text, position, tone);
    }

    fn ui_cue(&mut self, cue: UiCue) {
        self.audio_cues.push(AudioCue::Ui { cue });
    }

    fn build_snapshot(&mut self) -> GameStateSnapshot {
        let stopwatch = StopwatchView {
            elapsed: self.stopwatch.elapsed(),
            target: self.stopwatch.target(),
            running: self.stopwatch.is_running(),
            time_scale: self.stopwatch.time_scale(),
            glitched: self.stopwatch.is_glitched(),
            difficulty: self.stopwatch.difficulty(),
            elapsed_display: self.stopwatch.elapsed_display(&mut self.cosmetic_rng),
            target_display: self.stopwatch.target_display(&mut self.cosmetic_rng),
            last_grade: self.last_grade,
        };
        let session = SessionView {
            time: self.time,
            phase: self.phase,
            frozen: self.frozen,
            attack_locked: self.attack_locked,
            center: self.area.center(),
            castle: self.castle,
            stopwatch,
            wave: self.wave.view(self.director),
            economy: self.economy.view(),
            upgrades: self.shop.view(),
        };
        systems::snapshot::build_snapshot(
            &self.world,
            session,
            self.boss.as_ref(),
            std::mem::take(&mut self.audio_cues),
            std::mem::take(&mut self.events),
        )
    }
}
