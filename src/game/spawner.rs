//! Spawn scheduler.
//!
//! Keeps a randomized cadence of mole appearances. Each tick makes at most one
//! spawn decision, arms the dwell timer of the mole it showed and arms the next
//! tick. The scheduler keeps no state of its own; the controller owns the handle
//! of the next tick and stops the chain by cancelling it.

use std::time::Duration;

use log::debug;
use rand::Rng;
use rand::seq::IteratorRandom;

use crate::config::GameConfig;
use crate::game::board::Board;
use crate::game::timers::Timers;
use crate::game::types::Timer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned { index: usize, token: u64 },
    /// Every slot was occupied; only a retry was armed.
    BoardFull,
}

/// Result of one scheduling tick.
#[derive(Debug)]
pub struct SpawnTick<H> {
    pub outcome: SpawnOutcome,
    /// Handle of the next scheduling tick.
    pub next: H,
}

pub struct Spawner<'a> {
    pub config: &'a GameConfig,
    pub round: u64,
}

impl Spawner<'_> {
    /// Run one scheduling tick against `board`.
    pub fn tick<R, T>(&self, board: &mut Board, rng: &mut R, timers: &mut T) -> SpawnTick<T::Handle>
    where
        R: Rng + ?Sized,
        T: Timers,
    {
        let choice = board.empty_slots().choose(rng);
        let outcome = match choice {
            Some(index) => {
                let token = self.show(board, index, timers);
                SpawnOutcome::Spawned { index, token }
            }
            None => {
                debug!("[Spawner] Board full, retrying later (round {})", self.round);
                SpawnOutcome::BoardFull
            }
        };

        let delay = self.pop_delay(rng);
        let next = timers.arm(delay, Timer::SpawnTick { round: self.round });
        SpawnTick { outcome, next }
    }

    /// Show a mole in `index` and arm its dwell timer.
    pub fn show<T: Timers>(&self, board: &mut Board, index: usize, timers: &mut T) -> u64 {
        let token = board.show(index);
        timers.arm(
            self.config.mole_stay(),
            Timer::Dwell { round: self.round, index, token },
        );
        debug!("[Spawner] Mole up in slot {} (token {})", index, token);
        token
    }

    /// Delay until the next tick, uniform over the configured pop interval.
    pub fn pop_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let ms = rng.random_range(self.config.min_pop_interval_ms..=self.config.max_pop_interval_ms);
        Duration::from_millis(ms)
    }
}
