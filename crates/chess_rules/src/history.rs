//! Snapshot-based undo/redo.
//!
//! Every entry is a full deep copy of the game. Nothing is replayed or
//! reverted move by move.

use tracing::debug;

use crate::game::Game;

#[derive(Debug, Default, Clone)]
pub struct History {
    undo: Vec<Game>,
    redo: Vec<Game>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `game` as the state to return to on the next undo.
    pub fn save(&mut self, game: &Game) {
        self.undo.push(game.clone());
        debug!(depth = self.undo.len(), "snapshot saved");
    }

    /// Drop the most recent snapshot, used when the attempted command was
    /// rejected.
    pub fn discard_last_save(&mut self) {
        self.undo.pop();
    }

    /// A new branch of history starts; previous redos no longer apply.
    pub fn commit(&mut self) {
        self.redo.clear();
    }

    /// Swap `current` for the latest snapshot. Returns `false` when there
    /// is nothing to undo.
    pub fn undo(&mut self, current: &mut Game) -> bool {
        let Some(prev) = self.undo.pop() else {
            return false;
        };
        self.redo.push(std::mem::replace(current, prev));
        true
    }

    pub fn redo(&mut self, current: &mut Game) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.undo.push(std::mem::replace(current, next));
        true
    }

    pub fn has_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn has_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn reset(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod history_tests;
