//! Bounded undo/redo stacks over document snapshots.
//!
//! `past` holds pre-mutation snapshots, newest last, capped at
//! [`MAX_HISTORY`] with the oldest evicted. `future` holds redo states,
//! next-up first. Any new history push invalidates `future`.

use std::collections::VecDeque;

use crate::core::document::SchemaDocument;

/// Maximum number of retained undo steps.
pub const MAX_HISTORY: usize = 50;

#[derive(Clone, Debug, Default)]
pub struct History {
    past: VecDeque<SchemaDocument>,
    future: VecDeque<SchemaDocument>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a pre-mutation snapshot, evicting the oldest entry beyond the
    /// cap and clearing any redo states.
    pub fn push(&mut self, snapshot: SchemaDocument) {
        self.past.push_back(snapshot);
        if self.past.len() > MAX_HISTORY {
            self.past.pop_front();
        }
        self.future.clear();
    }

    /// Swaps the current document for the most recent past snapshot.
    /// Returns false (leaving `current` untouched) when there is nothing
    /// to undo.
    pub fn undo(&mut self, current: &mut SchemaDocument) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let now = std::mem::replace(current, previous);
        self.future.push_front(now);
        true
    }

    /// Swaps the current document for the next redo snapshot. Returns false
    /// when there is nothing to redo.
    pub fn redo(&mut self, current: &mut SchemaDocument) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let now = std::mem::replace(current, next);
        self.past.push_back(now);
        true
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}
