//! Actor host for the round core.
//!
//! `GameActor` owns a `Round` and drives its timers with actix context timers.
//! Renderers talk to it through the messages in `messages` and receive a
//! `StateUpdate` after every change once registered as viewers.

pub mod actor;
pub mod messages;

pub use actor::GameActor;
