//! Round scheduling and target-lifecycle core for a timed whack-a-mole game.
//!
//! - `game`: the synchronous core (board, clock, spawner, hits, round controller)
//! - `session`: actix actor hosting a round and driving its timers
//! - `config`: gameplay constants and `GameConfig`
//! - `demo`: bot player and text renderer used by the binary

pub mod config;
pub mod error;
pub mod game;
pub mod session;
pub mod demo;
