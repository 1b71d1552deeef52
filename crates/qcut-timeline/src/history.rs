//! Undo/redo history of timeline snapshots.
//!
//! The history is owned by whoever owns the timeline state; there is no
//! global stack. Each entry is a full snapshot taken before an edit.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default maximum number of undo steps.
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Bounded undo/redo history. Serializable so it can be saved alongside the
/// state it restores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History<T> {
    /// Snapshots to return to on undo (most recent at the back).
    undo: VecDeque<T>,
    /// Snapshots to return to on redo (most recent at the back).
    redo: Vec<T>,
    max_depth: usize,
}

impl<T> History<T> {
    /// Create a history holding at most `max_depth` undo steps.
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(max_depth.min(DEFAULT_HISTORY_DEPTH)),
            redo: Vec::new(),
            max_depth,
        }
    }

    /// Record the state as it was before an edit.
    /// Clears the redo stack (a new edit invalidates redo history).
    pub fn push(&mut self, snapshot: T) {
        self.redo.clear();
        self.undo.push_back(snapshot);
        while self.undo.len() > self.max_depth {
            self.undo.pop_front();
            debug!(max_depth = self.max_depth, "dropped oldest undo snapshot");
        }
    }

    /// Step back, swapping `current` with the previous snapshot. The
    /// replaced state is kept for redo. Returns `false` and leaves `current`
    /// untouched when there is nothing to undo.
    pub fn undo(&mut self, current: &mut T) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        self.redo.push(std::mem::replace(current, previous));
        true
    }

    /// Step forward again, swapping `current` with the next snapshot. Returns
    /// `false` and leaves `current` untouched when there is nothing to redo.
    pub fn redo(&mut self, current: &mut T) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.undo.push_back(std::mem::replace(current, next));
        if self.undo.len() > self.max_depth {
            self.undo.pop_front();
        }
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}
