use crate::error::{Result, SessionError};
use reelcut_core::types::Timeline;
use std::collections::VecDeque;
use tracing::debug;

/// How many undo snapshots a session keeps before evicting the oldest.
pub const DEFAULT_HISTORY_CAP: usize = 50;

#[derive(Debug, Clone)]
struct Snapshot {
    timeline: Timeline,
    label: String,
}

/// Bounded undo/redo stack of whole-timeline snapshots.
///
/// The engine's copy-on-write discipline makes snapshots cheap and correct:
/// a snapshot is just the previous `Timeline` value. Pushing a new snapshot
/// clears the redo stack; exceeding the cap evicts the oldest entry.
#[derive(Debug)]
pub struct History {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
    cap: usize,
}

impl History {
    pub fn new(cap: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            cap,
        }
    }

    /// Record the state that existed before an edit. Clears the redo stack.
    pub fn push(&mut self, before: Timeline, label: &str) {
        self.redo_stack.clear();
        self.undo_stack.push_back(Snapshot {
            timeline: before,
            label: label.to_string(),
        });
        if self.undo_stack.len() > self.cap {
            self.undo_stack.pop_front();
            debug!(cap = self.cap, "history cap reached, evicted oldest snapshot");
        }
    }

    /// Swap the current value for the most recent snapshot, parking the
    /// current value on the redo stack.
    pub fn undo(&mut self, current: Timeline) -> Result<Timeline> {
        let snapshot = self.undo_stack.pop_back().ok_or(SessionError::NothingToUndo)?;
        debug!(label = %snapshot.label, "undo");
        self.redo_stack.push(Snapshot {
            timeline: current,
            label: snapshot.label.clone(),
        });
        Ok(snapshot.timeline)
    }

    /// Swap the current value for the most recently undone one.
    pub fn redo(&mut self, current: Timeline) -> Result<Timeline> {
        let snapshot = self.redo_stack.pop().ok_or(SessionError::NothingToRedo)?;
        debug!(label = %snapshot.label, "redo");
        self.undo_stack.push_back(Snapshot {
            timeline: current,
            label: snapshot.label.clone(),
        });
        if self.undo_stack.len() > self.cap {
            self.undo_stack.pop_front();
        }
        Ok(snapshot.timeline)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(|s| s.label.as_str())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|s| s.label.as_str())
    }

    /// Forget everything, e.g. when a different project is loaded.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAP)
    }
}
