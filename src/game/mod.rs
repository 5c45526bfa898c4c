//! Round scheduling and target-lifecycle core.
//!
//! Everything here is synchronous and driven through the `Timers` seam: the
//! caller fires timers back into `Round::fire` when they fall due.

pub mod types;
pub mod board;
pub mod clock;
pub mod spawner;
pub mod hit;
pub mod round;
pub mod timers;
pub mod effects;
pub mod store;

#[cfg(test)]
mod tests;

pub use hit::{HitOutcome, Miss};
pub use round::Round;
pub use timers::{Timers, VirtualTimers};
pub use types::{Phase, Slot, Snapshot, Timer};
