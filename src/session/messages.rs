use actix::prelude::*;
use serde::Serialize;

use crate::game::{HitOutcome, Snapshot};

/// Start (or restart) a round. Replies with the fresh snapshot.
#[derive(Message)]
#[rtype(result = "Snapshot")]
pub struct StartRound;

/// The player struck the slot at `index`.
#[derive(Message)]
#[rtype(result = "HitOutcome")]
pub struct AttemptHit {
    pub index: usize,
}

#[derive(Message)]
#[rtype(result = "Snapshot")]
pub struct GetSnapshot;

/// Subscribe a renderer to state updates. It immediately receives the current state.
#[derive(Message)]
#[rtype(result = "()")]
pub struct RegisterViewer {
    pub viewer: Recipient<StateUpdate>,
}

#[derive(Message, Clone, Serialize, Debug)]
#[rtype(result = "()")]
pub struct StateUpdate {
    pub state: Snapshot,
}
