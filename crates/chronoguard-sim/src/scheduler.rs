//! Deferred one-shot work (wave-clear pause, boss intro, surge freeze,
//! attack lockout).
//!
//! Entries are stamped with the generation current at scheduling time.
//! `invalidate` bumps the generation, so anything scheduled before a reset,
//! jump or game over is dropped when it comes due instead of firing.

/// Work the engine performs when an entry comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledEvent {
    /// Spawn the boss of the upcoming boss wave.
    BossIntro,
    /// End the pause that follows a wave clear.
    EndWavePause,
    /// Lift the gameplay freeze started by a boss surge.
    EndSurgeFreeze,
    /// Lift the attack lockout, retarget and restart the stopwatch.
    ReleaseAttackLock,
}

#[derive(Debug, Clone)]
struct Entry {
    due: f64,
    seq: u64,
    generation: u64,
    event: ScheduledEvent,
}

/// Clock-driven queue of scheduled events.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    clock: f64,
    generation: u64,
    next_seq: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds the scheduler clock has advanced.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Schedule `event` to fire `delay` seconds from now.
    pub fn schedule(&mut self, delay: f64, event: ScheduledEvent) {
        let delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        self.entries.push(Entry {
            due: self.clock + delay,
            seq: self.next_seq,
            generation: self.generation,
            event,
        });
        self.next_seq += 1;
    }

    /// Orphan every pending entry.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Number of entries that will still fire.
    pub fn pending(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.generation == self.generation)
            .count()
    }

    /// Whether a live entry for `event` is pending.
    pub fn is_pending(&self, event: ScheduledEvent) -> bool {
        self.entries
            .iter()
            .any(|e| e.generation == self.generation && e.event == event)
    }

    /// Advance the clock and return the live events that came due, in due
    /// order (ties in scheduling order). Stale entries are discarded.
    pub fn advance(&mut self, dt: f64) -> Vec<ScheduledEvent> {
        self.clock += dt;

        let clock = self.clock;
        let (mut due, pending): (Vec<Entry>, Vec<Entry>) =
            self.entries.drain(..).partition(|e| e.due <= clock);
        self.entries = pending;

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));

        let generation = self.generation;
        due.into_iter()
            .filter_map(|entry| {
                if entry.generation == generation {
                    Some(entry.event)
                } else {
                    log::debug!(
                        "dropping stale {:?} from generation {}",
                        entry.event,
                        entry.generation
                    );
                    None
                }
            })
            .collect()
    }
}
