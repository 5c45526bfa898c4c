/// Main configuration module.
///
/// Re-exports submodules for gameplay timing and best-score storage.
pub mod game;
pub mod storage;

pub use game::GameConfig;
