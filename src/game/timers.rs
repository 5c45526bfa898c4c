//! Timer seam between the round core and whatever drives it.
//!
//! The core never sleeps. It asks a `Timers` implementation to call it back
//! with a `Timer` after some delay, and keeps the returned handle when it
//! needs to cancel that work later. The actor host implements this with actix
//! context timers; `VirtualTimers` is a manual clock for driving the core in
//! simulated time.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::game::types::Timer;

pub trait Timers {
    type Handle;

    /// Schedule `timer` to be fired `delay` from now.
    fn arm(&mut self, delay: Duration, timer: Timer) -> Self::Handle;

    /// Drop a scheduled timer. Cancelling one that already fired is a no-op.
    fn cancel(&mut self, handle: Self::Handle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualHandle {
    due: Duration,
    seq: u64,
}

/// Simulated clock with an ordered queue of armed timers.
///
/// Timers due at the same instant fire in the order they were armed.
#[derive(Debug, Default)]
pub struct VirtualTimers {
    now: Duration,
    seq: u64,
    pending: BTreeMap<VirtualHandle, Timer>,
}

impl VirtualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Armed timers with their due time, earliest first.
    pub fn pending(&self) -> impl Iterator<Item = (Duration, Timer)> + '_ {
        self.pending.iter().map(|(handle, timer)| (handle.due, *timer))
    }

    /// Remove the earliest pending timer matching `select` without moving the clock.
    pub fn take(&mut self, select: impl Fn(&Timer) -> bool) -> Option<Timer> {
        let handle = self
            .pending
            .iter()
            .find(|(_, timer)| select(timer))
            .map(|(handle, _)| *handle)?;
        self.pending.remove(&handle)
    }

    /// Move the clock forward by `by`, handing every timer that falls due to `fire`
    /// in due order. `fire` may arm or cancel further timers; those are honoured
    /// if they fall inside the same window.
    pub fn advance(&mut self, by: Duration, mut fire: impl FnMut(&mut Self, Timer)) {
        let target = self.now + by;
        while let Some(timer) = self.pop_due(target) {
            fire(self, timer);
        }
        self.now = target;
    }

    fn pop_due(&mut self, until: Duration) -> Option<Timer> {
        let (&handle, _) = self.pending.first_key_value()?;
        if handle.due > until {
            return None;
        }
        self.now = handle.due;
        self.pending.remove(&handle)
    }
}

impl Timers for VirtualTimers {
    type Handle = VirtualHandle;

    fn arm(&mut self, delay: Duration, timer: Timer) -> VirtualHandle {
        let handle = VirtualHandle {
            due: self.now + delay,
            seq: self.seq,
        };
        self.seq += 1;
        self.pending.insert(handle, timer);
        handle
    }

    fn cancel(&mut self, handle: VirtualHandle) {
        self.pending.remove(&handle);
    }
}
