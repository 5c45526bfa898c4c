use std::time::Duration;

use actix::prelude::*;
use actix::MessageResult;
use log::{debug, info};

use crate::game::timers::Timers;
use crate::game::{HitOutcome, Round, Timer};
use crate::session::messages::{AttemptHit, GetSnapshot, RegisterViewer, StartRound, StateUpdate};

/// Actor owning one round controller.
///
/// All messages and timer callbacks run on the actor's context one at a time,
/// so every core call sees a consistent board.
pub struct GameActor {
    round: Round<SpawnHandle>,
    viewers: Vec<Recipient<StateUpdate>>,
}

/// `Timers` backed by the actor's context.
struct ContextTimers<'a> {
    ctx: &'a mut Context<GameActor>,
}

impl Timers for ContextTimers<'_> {
    type Handle = SpawnHandle;

    fn arm(&mut self, delay: Duration, timer: Timer) -> SpawnHandle {
        self.ctx.run_later(delay, move |act, ctx| act.fire(timer, ctx))
    }

    fn cancel(&mut self, handle: SpawnHandle) {
        self.ctx.cancel_future(handle);
    }
}

impl GameActor {
    pub fn new(round: Round<SpawnHandle>) -> Self {
        Self {
            round,
            viewers: Vec::new(),
        }
    }

    /// Broadcast the current snapshot to every connected viewer.
    fn send_state(&mut self) {
        self.viewers.retain(|viewer| viewer.connected());
        let state = self.round.snapshot();
        debug!(
            "[GameActor] Broadcast state: score={} time={} phase={:?} viewers={}",
            state.score,
            state.time_remaining,
            state.phase,
            self.viewers.len()
        );
        for viewer in &self.viewers {
            viewer.do_send(StateUpdate { state: state.clone() });
        }
    }

    fn fire(&mut self, timer: Timer, ctx: &mut Context<Self>) {
        if self.round.fire(timer, &mut ContextTimers { ctx }) {
            self.send_state();
        }
    }
}

impl Actor for GameActor {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("[GameActor] Ready with {} slots", self.round.config().mole_count);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!("[GameActor] Stopped after {} round(s)", self.round.round_number());
    }
}

impl Handler<StartRound> for GameActor {
    type Result = MessageResult<StartRound>;

    fn handle(&mut self, _msg: StartRound, ctx: &mut Context<Self>) -> Self::Result {
        self.round.start_round(&mut ContextTimers { ctx });
        self.send_state();
        MessageResult(self.round.snapshot())
    }
}

impl Handler<AttemptHit> for GameActor {
    type Result = MessageResult<AttemptHit>;

    fn handle(&mut self, msg: AttemptHit, ctx: &mut Context<Self>) -> Self::Result {
        let outcome = self.round.attempt_hit(msg.index, &mut ContextTimers { ctx });
        if matches!(outcome, HitOutcome::Scored { .. }) {
            self.send_state();
        }
        MessageResult(outcome)
    }
}

impl Handler<GetSnapshot> for GameActor {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _msg: GetSnapshot, _ctx: &mut Context<Self>) -> Self::Result {
        MessageResult(self.round.snapshot())
    }
}

impl Handler<RegisterViewer> for GameActor {
    type Result = ();

    fn handle(&mut self, msg: RegisterViewer, _ctx: &mut Context<Self>) -> Self::Result {
        msg.viewer.do_send(StateUpdate { state: self.round.snapshot() });
        self.viewers.push(msg.viewer);
    }
}
