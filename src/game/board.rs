//! Target slot model.
//!
//! The board is a fixed row of slots. Every mutation builds a fresh slot array
//! and swaps it in, so a snapshot handed out earlier never changes under the
//! reader. Each time a slot is shown it receives a new occupancy token; timers
//! that clear the slot must present that token.

use std::sync::Arc;

use crate::game::types::Slot;

/// Token of a slot with no current occupant.
const NO_OCCUPANT: u64 = 0;

#[derive(Debug, Clone)]
pub struct Board {
    slots: Arc<[Slot]>,
    occupants: Vec<u64>,
    next_token: u64,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![Slot::EMPTY; size].into(),
            occupants: vec![NO_OCCUPANT; size],
            next_token: NO_OCCUPANT + 1,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current revision of the whole board.
    pub fn snapshot(&self) -> Arc<[Slot]> {
        Arc::clone(&self.slots)
    }

    pub fn get(&self, index: usize) -> Option<Slot> {
        self.slots.get(index).copied()
    }

    /// Show or hide `index` outside the token flow.
    ///
    /// Showing an unoccupied slot hands it a fresh token, so it can be hit and
    /// withdrawn like any spawned mole. Hiding clears the slot completely.
    pub fn set_visible(&mut self, index: usize, value: bool) {
        if value {
            if self.occupant(index).is_none() {
                self.show(index);
            }
        } else {
            self.occupants[index] = NO_OCCUPANT;
            self.replace(index, |slot| *slot = Slot::EMPTY);
        }
    }

    /// Mark `index` as hit. Ignored while the slot has no mole in it.
    pub fn set_hit(&mut self, index: usize, value: bool) {
        if value && self.occupant(index).is_none() {
            return;
        }
        self.replace(index, |slot| slot.hit = value);
    }

    /// Indices of slots with no mole showing.
    pub fn empty_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_empty())
            .map(|(index, _)| index)
    }

    /// Show a mole in `index` and return the token identifying this appearance.
    pub fn show(&mut self, index: usize) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        self.occupants[index] = token;
        self.replace(index, |slot| {
            slot.visible = true;
            slot.hit = false;
        });
        token
    }

    /// Token of the mole currently in `index`, if any.
    pub fn occupant(&self, index: usize) -> Option<u64> {
        match self.occupants.get(index) {
            Some(&token) if token != NO_OCCUPANT => Some(token),
            _ => None,
        }
    }

    /// Clear `index` if it is still held by the appearance `token`.
    ///
    /// Returns false when the slot was already cleared or now holds a later
    /// appearance; the board is left untouched in that case.
    pub fn withdraw(&mut self, index: usize, token: u64) -> bool {
        if self.occupant(index) != Some(token) {
            return false;
        }
        self.occupants[index] = NO_OCCUPANT;
        self.replace(index, |slot| *slot = Slot::EMPTY);
        true
    }

    fn replace(&mut self, index: usize, update: impl FnOnce(&mut Slot)) {
        let mut next = self.slots.to_vec();
        update(&mut next[index]);
        if next[index] != self.slots[index] {
            self.slots = next.into();
        }
    }
}
