use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Slot {
    /// A mole is currently showing.
    pub visible: bool,
    /// The showing mole has been struck and is waiting to be cleared.
    pub hit: bool,
}

impl Slot {
    pub const EMPTY: Slot = Slot { visible: false, hit: false };

    pub fn is_empty(&self) -> bool {
        !self.visible
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No round has been played yet.
    Idle,
    Active,
    /// The last round is over; a new one may be started.
    Ended,
}

/// A unit of scheduled work.
///
/// `round` is the round number the timer was armed in. Slot timers also carry
/// the occupancy token the board handed out when the mole appeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    ClockTick { round: u64 },
    SpawnTick { round: u64 },
    /// The dwell time of an unhit mole ran out.
    Dwell { round: u64, index: usize, token: u64 },
    /// A hit mole has finished its short post-hit window.
    HitCleanup { round: u64, index: usize, token: u64 },
}

impl Timer {
    pub fn round(&self) -> u64 {
        match *self {
            Timer::ClockTick { round }
            | Timer::SpawnTick { round }
            | Timer::Dwell { round, .. }
            | Timer::HitCleanup { round, .. } => round,
        }
    }
}

/// Read-only view of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u32,
    pub best_score: u32,
    pub time_remaining: u32,
    pub phase: Phase,
    pub slots: Arc<[Slot]>,
}

impl Snapshot {
    /// Indices of moles that can still be hit.
    pub fn hittable(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.visible && !slot.hit)
            .map(|(index, _)| index)
    }
}
