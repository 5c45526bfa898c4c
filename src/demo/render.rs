//! Board rendering (terminal).
//!
//! Turns a snapshot into a small text grid for logs and the demo binary.

use crate::game::{Slot, Snapshot};

/// Slots per row, matching the 3x3 board of the default game.
pub const GRID_COLS: usize = 3;

fn symbol(slot: &Slot) -> &'static str {
    match (slot.visible, slot.hit) {
        (true, true) => "XX",
        (true, false) => "()",
        _ => "..",
    }
}

/// Render the board and the score line.
pub fn render_board(snapshot: &Snapshot) -> String {
    let mut out = format!(
        "score {:>4} | best {:>4} | {:>2}s | {:?}\n",
        snapshot.score, snapshot.best_score, snapshot.time_remaining, snapshot.phase
    );
    for row in snapshot.slots.chunks(GRID_COLS) {
        let line: Vec<&str> = row.iter().map(symbol).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}
