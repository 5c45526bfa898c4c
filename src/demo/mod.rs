// Demo module. Provides a bot viewer that plays a round on its own and a
// plain-text board renderer used by the demo binary.
pub mod autoplayer;
pub mod render;

pub use autoplayer::Autoplayer;
