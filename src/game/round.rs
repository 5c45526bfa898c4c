//! Round controller.
//!
//! Owns the phase, score, best score, board and clock, plus the handles of the
//! two timers that must be cancelled explicitly: the clock tick and the next
//! spawn tick. Slot timers (dwell and hit cleanup) are never cancelled; they
//! carry the round number and the slot's occupancy token and do nothing once
//! either is out of date.
//!
//! Phases: `Idle` -> `Active` -> `Ended`, and `start_round` re-enters `Active`
//! from any phase.

use log::{debug, info, trace, warn};
use rand::RngCore;

use crate::config::GameConfig;
use crate::config::game::CLOCK_TICK;
use crate::error::ConfigError;
use crate::game::board::Board;
use crate::game::clock::{ClockTick, RoundClock};
use crate::game::effects::{Burst, Celebration};
use crate::game::hit::{HitOutcome, HitProcessor};
use crate::game::spawner::{SpawnOutcome, Spawner};
use crate::game::store::BestScoreStore;
use crate::game::timers::Timers;
use crate::game::types::{Phase, Snapshot, Timer};

pub struct Round<H> {
    config: GameConfig,
    board: Board,
    clock: RoundClock,
    score: u32,
    best_score: u32,
    phase: Phase,
    /// Number of the current (or last) round; 0 before the first one.
    round: u64,
    clock_timer: Option<H>,
    spawn_timer: Option<H>,
    store: Box<dyn BestScoreStore>,
    effects: Box<dyn Celebration>,
    rng: Box<dyn RngCore>,
}

impl<H> Round<H> {
    /// Create an idle controller. The best score is read from `store` once, here.
    ///
    /// Fails if `config` does not describe a playable round.
    pub fn new(
        config: GameConfig,
        store: Box<dyn BestScoreStore>,
        effects: Box<dyn Celebration>,
        rng: Box<dyn RngCore>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let best_score = match store.read() {
            Ok(best) => best.unwrap_or(0),
            Err(err) => {
                warn!("[Round] Could not read best score, starting from 0: {}", err);
                0
            }
        };

        Ok(Self {
            board: Board::new(config.mole_count),
            clock: RoundClock::new(config.round_duration),
            config,
            score: 0,
            best_score,
            phase: Phase::Idle,
            round: 0,
            clock_timer: None,
            spawn_timer: None,
            store,
            effects,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn time_remaining(&self) -> u32 {
        self.clock.remaining()
    }

    pub fn round_number(&self) -> u64 {
        self.round
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            best_score: self.best_score,
            time_remaining: self.clock.remaining(),
            phase: self.phase,
            slots: self.board.snapshot(),
        }
    }

    /// Start a fresh round, abandoning any round in progress.
    pub fn start_round<T: Timers<Handle = H>>(&mut self, timers: &mut T) {
        self.cancel_timers(timers);

        self.round += 1;
        self.score = 0;
        self.clock.reset();
        self.board = Board::new(self.config.mole_count);
        self.phase = Phase::Active;

        self.clock_timer = Some(timers.arm(CLOCK_TICK, Timer::ClockTick { round: self.round }));
        info!(
            "[Round] Round {} started: {}s, {} slots",
            self.round,
            self.config.round_duration,
            self.board.len()
        );

        self.spawn_tick(timers);
    }

    /// End the active round. Does nothing unless the phase is `Active`.
    pub fn end_round<T: Timers<Handle = H>>(&mut self, timers: &mut T) {
        if self.phase != Phase::Active {
            return;
        }
        self.cancel_timers(timers);
        self.phase = Phase::Ended;

        if self.score > self.best_score {
            self.best_score = self.score;
            if let Err(err) = self.store.write(self.best_score) {
                warn!("[Round] Could not persist best score {}: {}", self.best_score, err);
            }
            self.effects.celebrate(&Burst::NEW_BEST);
            info!("[Round] Round {} ended with a new best score of {}", self.round, self.score);
        } else {
            info!(
                "[Round] Round {} ended: score {}, best {}",
                self.round, self.score, self.best_score
            );
        }
    }

    pub fn attempt_hit<T: Timers<Handle = H>>(&mut self, index: usize, timers: &mut T) -> HitOutcome {
        let hits = HitProcessor {
            config: &self.config,
            round: self.round,
            phase: self.phase,
        };
        hits.attempt(&mut self.board, &mut self.score, index, self.effects.as_mut(), timers)
    }

    /// Run a timer that fell due. Returns false if the timer was stale or
    /// changed nothing.
    pub fn fire<T: Timers<Handle = H>>(&mut self, timer: Timer, timers: &mut T) -> bool {
        if timer.round() != self.round || self.phase != Phase::Active {
            trace!("[Round] Dropped stale {:?} (round {}, {:?})", timer, self.round, self.phase);
            return false;
        }

        match timer {
            Timer::ClockTick { .. } => {
                self.clock_timer = None;
                match self.clock.tick() {
                    ClockTick::Running(left) => {
                        trace!("[Round] {}s left", left);
                        self.clock_timer = Some(timers.arm(CLOCK_TICK, Timer::ClockTick { round: self.round }));
                    }
                    ClockTick::Expired => self.end_round(timers),
                }
                true
            }
            Timer::SpawnTick { .. } => {
                self.spawn_timer = None;
                self.spawn_tick(timers)
            }
            Timer::Dwell { index, token, .. } | Timer::HitCleanup { index, token, .. } => {
                let cleared = self.board.withdraw(index, token);
                if cleared {
                    debug!("[Round] Slot {} cleared by {:?}", index, timer);
                }
                cleared
            }
        }
    }

    /// Show a mole in `index` right now, replacing whatever occupied it.
    #[cfg(test)]
    pub(crate) fn force_spawn<T: Timers<Handle = H>>(&mut self, index: usize, timers: &mut T) -> u64 {
        assert_eq!(self.phase, Phase::Active, "force_spawn outside an active round");
        let spawner = Spawner {
            config: &self.config,
            round: self.round,
        };
        spawner.show(&mut self.board, index, timers)
    }

    /// Returns true if a mole appeared.
    fn spawn_tick<T: Timers<Handle = H>>(&mut self, timers: &mut T) -> bool {
        let spawner = Spawner {
            config: &self.config,
            round: self.round,
        };
        let tick = spawner.tick(&mut self.board, self.rng.as_mut(), timers);
        self.spawn_timer = Some(tick.next);
        matches!(tick.outcome, SpawnOutcome::Spawned { .. })
    }

    fn cancel_timers<T: Timers<Handle = H>>(&mut self, timers: &mut T) {
        if let Some(handle) = self.clock_timer.take() {
            timers.cancel(handle);
        }
        if let Some(handle) = self.spawn_timer.take() {
            timers.cancel(handle);
        }
    }
}
