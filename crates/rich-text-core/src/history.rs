//! Undo/redo history for formatting changes.
//!
//! Every mutating action produces one [`HistoryCheckpoint`]: the runs it overwrote, the runs it
//! wrote, and the typing attributes and selection around it. Undo replays the "before" half,
//! redo replays the "after" half. The history is owned by the engine and does not depend on
//! any host undo manager.

use crate::attributes::{AttributeSet, StyleKey};
use crate::buffer::TextBufferAdapter;
use crate::runs::Run;
use crate::selection::SelectionRange;

/// Snapshot sufficient to reverse or reapply one formatting change.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryCheckpoint {
    key: StyleKey,
    before: Vec<Run>,
    after: Vec<Run>,
    typing_before: AttributeSet,
    typing_after: AttributeSet,
    selection: SelectionRange,
}

impl HistoryCheckpoint {
    /// Create a checkpoint.
    ///
    /// `before` and `after` must cover the same ranges; ranges are clamped to the buffer when
    /// replayed.
    pub fn new(
        key: StyleKey,
        before: Vec<Run>,
        after: Vec<Run>,
        typing_before: AttributeSet,
        typing_after: AttributeSet,
        selection: SelectionRange,
    ) -> Self {
        Self {
            key,
            before,
            after,
            typing_before,
            typing_after,
            selection,
        }
    }

    /// Key changed by this checkpoint.
    pub fn key(&self) -> StyleKey {
        self.key
    }

    /// Returns `true` if replaying the checkpoint would not change anything.
    pub fn is_noop(&self) -> bool {
        self.before == self.after && self.typing_before == self.typing_after
    }

    fn replay<B>(&self, buffer: &mut B, runs: &[Run], typing: &AttributeSet)
    where
        B: TextBufferAdapter + ?Sized,
    {
        for run in runs {
            buffer.set_attribute(self.key, run.value.clone(), run.range.clone());
        }

        // Moving the selection resets typing attributes in most widgets, so restore them last.
        if buffer.selection() != self.selection.clamped(buffer.len()) {
            buffer.set_selection(self.selection);
        }
        for (key, value) in typing.iter() {
            buffer.set_typing_attribute(key, value.clone());
        }
    }
}

/// Undo and redo stacks of [`HistoryCheckpoint`]s.
#[derive(Debug, Clone, Default)]
pub struct HistoryController {
    undo_stack: Vec<HistoryCheckpoint>,
    redo_stack: Vec<HistoryCheckpoint>,
    limit: Option<usize>,
}

impl HistoryController {
    /// Unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// History keeping at most `limit` undo checkpoints (oldest are dropped first).
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Push a checkpoint onto the undo stack and clear the redo stack.
    pub fn record(&mut self, checkpoint: HistoryCheckpoint) {
        self.redo_stack.clear();
        self.undo_stack.push(checkpoint);

        if let Some(limit) = self.limit
            && self.undo_stack.len() > limit
        {
            let excess = self.undo_stack.len() - limit;
            self.undo_stack.drain(..excess);
        }
    }

    /// Revert the latest checkpoint. Returns `false` if there was nothing to undo.
    pub fn undo<B>(&mut self, buffer: &mut B) -> bool
    where
        B: TextBufferAdapter + ?Sized,
    {
        let Some(checkpoint) = self.undo_stack.pop() else {
            return false;
        };
        checkpoint.replay(buffer, &checkpoint.before, &checkpoint.typing_before);
        self.redo_stack.push(checkpoint);
        true
    }

    /// Reapply the latest undone checkpoint. Returns `false` if there was nothing to redo.
    pub fn redo<B>(&mut self, buffer: &mut B) -> bool
    where
        B: TextBufferAdapter + ?Sized,
    {
        let Some(checkpoint) = self.redo_stack.pop() else {
            return false;
        };
        checkpoint.replay(buffer, &checkpoint.after, &checkpoint.typing_after);
        self.undo_stack.push(checkpoint);
        true
    }

    /// Can undo
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Can redo
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Undo stack depth
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Redo stack depth
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop all checkpoints.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
