//! Celebration side effects.
//!
//! Bursts are cosmetic and fire-and-forget: the core never reads anything back
//! from a `Celebration`.

use log::info;

/// Parameters of a particle burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub particle_count: u32,
    pub spread: f32,
    /// Vertical origin as a fraction of the surface height.
    pub origin_y: f32,
    pub colors: &'static [&'static str],
    pub scalar: f32,
}

impl Burst {
    /// Large burst for a new best score.
    pub const NEW_BEST: Burst = Burst {
        particle_count: 150,
        spread: 70.0,
        origin_y: 0.6,
        colors: &["#FFD700", "#90EE90", "#FFB6C1"],
        scalar: 1.0,
    };

    /// Small burst for every successful hit.
    pub const HIT: Burst = Burst {
        particle_count: 15,
        spread: 30.0,
        origin_y: 0.7,
        colors: &["#FFD700", "#90EE90"],
        scalar: 0.5,
    };
}

pub trait Celebration {
    fn celebrate(&mut self, burst: &Burst);
}

/// Celebration that only writes the burst to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCelebration;

impl Celebration for LogCelebration {
    fn celebrate(&mut self, burst: &Burst) {
        info!(
            "[Celebration] {} particles, spread {}, scalar {}",
            burst.particle_count, burst.spread, burst.scalar
        );
    }
}
