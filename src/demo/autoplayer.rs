//! Bot player for the demo binary.
//!
//! Registers as a viewer, swings at every mole it sees after a random reaction
//! time, and misses some of them on purpose. When the round it watched ends it
//! hands the final snapshot back through a oneshot channel and stops.

use std::time::Duration;

use actix::prelude::*;
use log::{debug, info};
use rand::Rng;
use rand::rngs::StdRng;
use tokio::sync::oneshot;

use crate::demo::render::render_board;
use crate::game::{Phase, Snapshot};
use crate::session::GameActor;
use crate::session::messages::{AttemptHit, StateUpdate};

/// Fastest and slowest reaction time of the bot, in ms.
const REACTION_MS: (u64, u64) = (250, 1100);

/// Probability that the bot swings at a mole at all.
const ACCURACY: f64 = 0.8;

pub struct Autoplayer {
    game: Addr<GameActor>,
    rng: StdRng,
    /// Slots the bot already decided about since they last showed a mole.
    aimed: Vec<bool>,
    seen_active: bool,
    done: Option<oneshot::Sender<Snapshot>>,
}

impl Autoplayer {
    pub fn new(game: Addr<GameActor>, rng: StdRng, done: oneshot::Sender<Snapshot>) -> Self {
        Self {
            game,
            rng,
            aimed: Vec::new(),
            seen_active: false,
            done: Some(done),
        }
    }

    fn react(&mut self, state: &Snapshot, ctx: &mut Context<Self>) {
        self.aimed.resize(state.slots.len(), false);
        for (index, slot) in state.slots.iter().enumerate() {
            if !slot.visible {
                self.aimed[index] = false;
                continue;
            }
            if slot.hit || self.aimed[index] {
                continue;
            }
            self.aimed[index] = true;
            if !self.rng.random_bool(ACCURACY) {
                debug!("[Autoplayer] Letting slot {} go", index);
                continue;
            }
            let delay = Duration::from_millis(self.rng.random_range(REACTION_MS.0..=REACTION_MS.1));
            ctx.run_later(delay, move |act, _ctx| {
                act.game.do_send(AttemptHit { index });
            });
        }
    }
}

impl Actor for Autoplayer {
    type Context = Context<Self>;
}

impl Handler<StateUpdate> for Autoplayer {
    type Result = ();

    fn handle(&mut self, msg: StateUpdate, ctx: &mut Context<Self>) -> Self::Result {
        let state = msg.state;
        debug!("[Autoplayer] Board:\n{}", render_board(&state));

        match state.phase {
            Phase::Active => {
                self.seen_active = true;
                self.react(&state, ctx);
            }
            Phase::Ended if self.seen_active => {
                info!("[Autoplayer] Round over with {} points", state.score);
                if let Some(done) = self.done.take() {
                    let _ = done.send(state);
                }
                ctx.stop();
            }
            _ => {}
        }
    }
}
