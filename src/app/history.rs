use std::collections::VecDeque;

use crate::model::DiagramElement;

/// Number of undo steps retained; the oldest snapshot is dropped first.
pub const MAX_HISTORY: usize = 50;

type Snapshot = Vec<DiagramElement>;

/// Linear undo/redo ledger over full element-list snapshots.
///
/// `present` mirrors the live element list as of the last successful
/// `save_state`/`undo`/`redo`; callers are responsible for copying the
/// value returned by `undo`/`redo` back into the live diagram.
#[derive(Default)]
pub struct HistoryLedger {
    past: Vec<Snapshot>,
    present: Snapshot,
    future: VecDeque<Snapshot>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the state that a beginning mutation is about to replace.
    /// Called once at gesture start, not per pointer-move frame, so a full
    /// drag collapses into a single undo step. Invalidates redo history.
    pub fn save_state(&mut self, current: &[DiagramElement]) {
        let previous = std::mem::replace(&mut self.present, current.to_vec());
        self.past.push(previous);
        if self.past.len() > MAX_HISTORY {
            self.past.remove(0);
        }
        self.future.clear();
    }

    /// Steps back one snapshot, returning the new present for the caller
    /// to propagate into the live element list. No-op when exhausted.
    pub fn undo(&mut self) -> Option<&[DiagramElement]> {
        let previous = self.past.pop()?;
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        Some(&self.present)
    }

    /// Symmetric counterpart of [`HistoryLedger::undo`].
    pub fn redo(&mut self) -> Option<&[DiagramElement]> {
        let next = self.future.pop_front()?;
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        Some(&self.present)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.past.len()
    }

    pub fn present(&self) -> &[DiagramElement] {
        &self.present
    }

    /// Drops all undo/redo state, e.g. after loading a new diagram, and
    /// re-bases `present` on the freshly loaded element list.
    pub fn reset(&mut self, current: &[DiagramElement]) {
        self.past.clear();
        self.future.clear();
        self.present = current.to_vec();
    }
}
