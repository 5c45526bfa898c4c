//! Hit processor.
//!
//! A hit is only valid on a visible, not yet hit mole while the round is
//! Active. Anything else is ordinary mistiming and is dropped without touching
//! the board, the score or the celebration hook.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::game::board::Board;
use crate::game::effects::{Burst, Celebration};
use crate::game::timers::Timers;
use crate::game::types::{Phase, Timer};

/// Why a hit was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Miss {
    NotActive,
    OutOfRange,
    NotVisible,
    AlreadyHit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitOutcome {
    /// The mole in `index` was struck; `score` is the new round score.
    Scored { index: usize, score: u32 },
    Missed(Miss),
}

pub struct HitProcessor<'a> {
    pub config: &'a GameConfig,
    pub round: u64,
    pub phase: Phase,
}

impl HitProcessor<'_> {
    pub fn attempt<T: Timers>(
        &self,
        board: &mut Board,
        score: &mut u32,
        index: usize,
        effects: &mut dyn Celebration,
        timers: &mut T,
    ) -> HitOutcome {
        let token = match self.check(board, index) {
            Ok(token) => token,
            Err(miss) => {
                debug!("[Hit] Ignored hit on slot {}: {:?}", index, miss);
                return HitOutcome::Missed(miss);
            }
        };

        board.set_hit(index, true);
        *score += self.config.hit_award;
        effects.celebrate(&Burst::HIT);
        timers.arm(
            self.config.hit_reset(),
            Timer::HitCleanup { round: self.round, index, token },
        );

        debug!("[Hit] Slot {} hit, score {}", index, score);
        HitOutcome::Scored { index, score: *score }
    }

    /// Occupancy token of the mole in `index` if it can be hit.
    fn check(&self, board: &Board, index: usize) -> Result<u64, Miss> {
        if self.phase != Phase::Active {
            return Err(Miss::NotActive);
        }
        let slot = board.get(index).ok_or(Miss::OutOfRange)?;
        if !slot.visible {
            return Err(Miss::NotVisible);
        }
        if slot.hit {
            return Err(Miss::AlreadyHit);
        }
        board.occupant(index).ok_or(Miss::NotVisible)
    }
}
