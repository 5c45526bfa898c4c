//! Main entry point for the demo.
//!
//! Starts the actor system, lets the autoplayer play one round against the game
//! actor, then prints the final board. Run with `RUST_LOG=debug` to follow the
//! round tick by tick.

use std::env;
use std::error::Error;

use actix::Actor;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::oneshot;

use whack_grid::config::GameConfig;
use whack_grid::config::game::CONFIG_FILE_ENV;
use whack_grid::config::storage::{DEFAULT_SCORE_FILE, SCORE_FILE_ENV};
use whack_grid::demo::Autoplayer;
use whack_grid::demo::render::render_board;
use whack_grid::error::ConfigError;
use whack_grid::game::Round;
use whack_grid::game::effects::LogCelebration;
use whack_grid::game::store::FileStore;
use whack_grid::session::GameActor;
use whack_grid::session::messages::{RegisterViewer, StartRound};

/// Load the config file named by `WHACK_CONFIG`, or fall back to the defaults.
fn load_config() -> Result<GameConfig, ConfigError> {
    match env::var(CONFIG_FILE_ENV) {
        Ok(path) => {
            info!("[Main] Loading config from {}", path);
            GameConfig::from_json_file(path)
        }
        Err(_) => Ok(GameConfig::default()),
    }
}

#[actix::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger from environment variable.
    env_logger::init();

    let config = load_config()?;
    let score_file = env::var(SCORE_FILE_ENV).unwrap_or_else(|_| DEFAULT_SCORE_FILE.to_string());

    let store = FileStore::new(score_file);
    info!("[Main] Best score kept in {}", store.path().display());

    // Start the game actor (owns the round controller and its timers).
    let round = Round::new(
        config,
        Box::new(store),
        Box::new(LogCelebration),
        Box::new(StdRng::from_os_rng()),
    )?;
    let game = GameActor::new(round).start();

    // Start the bot player and subscribe it to state updates.
    let (done_tx, done_rx) = oneshot::channel();
    let player = Autoplayer::new(game.clone(), StdRng::from_os_rng(), done_tx).start();
    game.send(RegisterViewer { viewer: player.recipient() }).await?;

    game.send(StartRound).await?;

    match done_rx.await {
        Ok(state) => {
            println!("{}", render_board(&state));
            info!("[Main] Final score {}, best {}", state.score, state.best_score);
        }
        Err(_) => warn!("[Main] Autoplayer stopped before the round ended"),
    }
    Ok(())
}
