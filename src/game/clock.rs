//! Round clock.
//!
//! Counts whole seconds down from the round duration. The controller arms one
//! `Timer::ClockTick` per second and calls `tick` when it fires.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Seconds left after this tick.
    Running(u32),
    /// The countdown reached zero on this tick.
    Expired,
}

#[derive(Debug, Clone)]
pub struct RoundClock {
    duration: u32,
    remaining: u32,
}

impl RoundClock {
    pub fn new(duration: u32) -> Self {
        Self { duration, remaining: duration }
    }

    pub fn reset(&mut self) {
        self.remaining = self.duration;
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn tick(&mut self) -> ClockTick {
        if self.remaining <= 1 {
            self.remaining = 0;
            ClockTick::Expired
        } else {
            self.remaining -= 1;
            ClockTick::Running(self.remaining)
        }
    }
}
