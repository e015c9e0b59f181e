//! Rich Text Context
//!
//! [`RichTextContext`] is the action-dispatch and state-synchronization engine. It owns the
//! text buffer adapter, the clipboard sink, the [`StyleState`] mirror and the
//! [`HistoryController`], and keeps them consistent.
//!
//! # Overview
//!
//! A host UI only needs two entry points:
//!
//! - [`can_trigger_rich_text_action`](RichTextContext::can_trigger_rich_text_action): a pure
//!   query, typically bound to a button's enabled state
//! - [`trigger_rich_text_action`](RichTextContext::trigger_rich_text_action): runs the action
//!
//! Every trigger is atomic and synchronous: resolve the effective range, mutate the buffer,
//! refresh the style mirror, record a history checkpoint. Triggering an action that cannot be
//! triggered is a no-op.
//!
//! # Example
//!
//! ```rust
//! use rich_text_core::{AttributedTextBuffer, RichTextAction, RichTextContext, SelectionRange};
//!
//! let mut context = RichTextContext::new(AttributedTextBuffer::new("foo bar baz"));
//! context.set_selection(SelectionRange::new(4, 3));
//!
//! let size = context.style().font_size();
//! context.trigger_rich_text_action(RichTextAction::IncrementFontSize);
//! assert_eq!(context.style().font_size(), size + 1.0);
//!
//! assert!(context.can_trigger_rich_text_action(RichTextAction::UndoLatestChange));
//! context.trigger_rich_text_action(RichTextAction::UndoLatestChange);
//! assert_eq!(context.style().font_size(), size);
//! ```

use crate::actions::{RichTextAction, RichTextStyle};
use crate::attributes::{DEFAULT_FONT_SIZE, StyleKey, StyleValue, TextAlignment, VerticalPosition};
use crate::buffer::TextBufferAdapter;
use crate::clipboard::{ClipboardSink, MemoryClipboard};
use crate::config::RichTextConfig;
use crate::error::RichTextError;
use crate::history::{HistoryCheckpoint, HistoryController};
use crate::resolver;
use crate::runs::Run;
use crate::selection::SelectionRange;
use crate::style_state::{StyleChange, StyleState};
use std::ops::Range;

/// Rich text editing context.
///
/// `B` is the host's text buffer, `C` the clipboard the copy action writes to.
pub struct RichTextContext<B, C = MemoryClipboard> {
    buffer: B,
    clipboard: C,
    style: StyleState,
    history: HistoryController,
    config: RichTextConfig,
    /// Text length and revision the history's offsets refer to.
    text_stamp: (usize, u64),
}

impl<B> RichTextContext<B, MemoryClipboard>
where
    B: TextBufferAdapter,
{
    /// Context over `buffer` with an in-memory clipboard and the default configuration.
    pub fn new(buffer: B) -> Self {
        Self::with_clipboard(buffer, MemoryClipboard::new())
    }
}

impl<B, C> RichTextContext<B, C>
where
    B: TextBufferAdapter,
    C: ClipboardSink,
{
    /// Context over `buffer` and `clipboard` with the default configuration.
    pub fn with_clipboard(buffer: B, clipboard: C) -> Self {
        Self::from_parts(buffer, clipboard, RichTextConfig::default())
    }

    /// Context with an explicit configuration.
    pub fn with_config(buffer: B, clipboard: C, config: RichTextConfig) -> Result<Self, RichTextError> {
        config.validate()?;
        Ok(Self::from_parts(buffer, clipboard, config))
    }

    fn from_parts(buffer: B, clipboard: C, config: RichTextConfig) -> Self {
        let mut context = Self {
            buffer,
            clipboard,
            style: StyleState::new(),
            history: HistoryController::with_limit(config.history_limit),
            config,
            text_stamp: (0, 0),
        };
        context.text_stamp = context.current_text_stamp();
        context.refresh();
        context
    }

    /// Whether `action` can currently be triggered.
    pub fn can_trigger_rich_text_action(&self, action: RichTextAction) -> bool {
        match action {
            RichTextAction::Copy => self.can_copy(),
            RichTextAction::DismissKeyboard => true,
            RichTextAction::IncrementFontSize => true,
            RichTextAction::DecrementFontSize => true,
            RichTextAction::IncreaseIndent => self.can_increase_indent(),
            RichTextAction::DecreaseIndent => self.can_decrease_indent(),
            RichTextAction::Print => false,
            RichTextAction::RedoLatestChange => self.history.can_redo() && self.text_is_current(),
            RichTextAction::UndoLatestChange => self.history.can_undo() && self.text_is_current(),
            RichTextAction::ToggleStyle(_)
            | RichTextAction::SetAlignment(_)
            | RichTextAction::ToggleSuperscript
            | RichTextAction::ToggleSubscript => true,
        }
    }

    /// Trigger `action`.
    ///
    /// Does nothing if [`can_trigger_rich_text_action`](Self::can_trigger_rich_text_action)
    /// returns `false`.
    pub fn trigger_rich_text_action(&mut self, action: RichTextAction) {
        if !self.can_trigger_rich_text_action(action) {
            tracing::debug!(%action, "ignoring rich text action that cannot be triggered");
            return;
        }
        tracing::debug!(%action, mutating = action.is_mutating(), "triggering rich text action");

        let font_step = self.config.font_size_step;
        let indent_step = self.config.indent_step;

        match action {
            RichTextAction::Copy => self.copy_current_selection(),
            RichTextAction::DismissKeyboard => self.buffer.resign_focus(),
            RichTextAction::IncrementFontSize => {
                self.step_font_size(font_step);
            }
            RichTextAction::DecrementFontSize => {
                self.step_font_size(-font_step);
            }
            RichTextAction::IncreaseIndent => {
                self.step_indent(indent_step);
            }
            RichTextAction::DecreaseIndent => {
                self.step_indent(-indent_step);
            }
            RichTextAction::Print => {}
            RichTextAction::RedoLatestChange => {
                self.redo_latest_change();
            }
            RichTextAction::UndoLatestChange => {
                self.undo_latest_change();
            }
            RichTextAction::ToggleStyle(style) => {
                self.toggle_style(style);
            }
            RichTextAction::SetAlignment(alignment) => {
                self.set_alignment(alignment);
            }
            RichTextAction::ToggleSuperscript => {
                self.toggle_vertical_position(VerticalPosition::Superscript);
            }
            RichTextAction::ToggleSubscript => {
                self.toggle_vertical_position(VerticalPosition::Subscript);
            }
        }
    }

    /// Change the font size by `points` (negative to shrink), clamped to the configured bounds.
    ///
    /// The new size is computed from the leading edge of the selection and applied uniformly.
    /// Returns `true` if anything changed; unchanged results are not recorded in history.
    pub fn step_font_size(&mut self, points: f64) -> bool {
        let current = resolver::effective_value(StyleKey::FontSize, self.selection(), &self.buffer)
            .as_font_size()
            .unwrap_or(DEFAULT_FONT_SIZE);
        let size = self.config.clamp_font_size(current + points);
        self.set_value(StyleKey::FontSize, StyleValue::FontSize(size))
    }

    /// Change the indent of every selected paragraph by `points`, each from its own indent,
    /// clamped to the configured levels.
    ///
    /// Returns `true` if anything changed.
    pub fn step_indent(&mut self, points: f64) -> bool {
        let selection = self.selection();
        let (min, max) = (self.config.min_indent_points(), self.config.max_indent_points());
        // Indents already past a bound in the stepping direction are left alone.
        let stepped = |indent: f64| {
            if (points > 0.0 && indent >= max) || (points < 0.0 && indent <= min) {
                indent
            } else {
                (indent + points).clamp(min, max)
            }
        };

        let writes: Vec<Run> = resolver::paragraph_ranges(selection, &self.buffer)
            .into_iter()
            .map(|paragraph| {
                let indent = self
                    .buffer
                    .attribute(StyleKey::IndentLevel, paragraph.start)
                    .as_indent()
                    .unwrap_or(0.0);
                Run::new(paragraph, StyleValue::Indent(stepped(indent)))
            })
            .collect();

        let leading = resolver::effective_value(StyleKey::IndentLevel, selection, &self.buffer)
            .as_indent()
            .unwrap_or(0.0);
        let typing = StyleValue::Indent(stepped(leading));

        let ranges: Vec<Range<usize>> = writes.iter().map(|run| run.range.clone()).collect();
        self.apply_and_record(StyleKey::IndentLevel, ranges, |buffer| {
            for run in writes {
                buffer.set_attribute(StyleKey::IndentLevel, run.value, run.range);
            }
            buffer.set_typing_attribute(StyleKey::IndentLevel, typing);
        })
    }

    /// Undo the latest change. Returns `false` if there was nothing to undo.
    pub fn undo_latest_change(&mut self) -> bool {
        self.invalidate_stale_history();
        let undone = self.history.undo(&mut self.buffer);
        if undone {
            self.refresh();
        }
        tracing::debug!(undone, undo_depth = self.history.undo_depth(), "undo");
        undone
    }

    /// Redo the latest undone change. Returns `false` if there was nothing to redo.
    pub fn redo_latest_change(&mut self) -> bool {
        self.invalidate_stale_history();
        let redone = self.history.redo(&mut self.buffer);
        if redone {
            self.refresh();
        }
        tracing::debug!(redone, redo_depth = self.history.redo_depth(), "redo");
        redone
    }

    /// Current selection, clamped to the buffer.
    pub fn selection(&self) -> SelectionRange {
        self.buffer.selection().clamped(self.buffer.len())
    }

    /// Move the selection and refresh the style mirror.
    pub fn set_selection(&mut self, selection: SelectionRange) {
        let selection = selection.clamped(self.buffer.len());
        self.invalidate_stale_history();
        self.buffer.set_selection(selection);
        self.refresh();
    }

    /// Refresh the style mirror after the host changed the buffer or its selection.
    ///
    /// If the text itself changed, the undo and redo history is dropped.
    pub fn handle_selection_change(&mut self) {
        self.invalidate_stale_history();
        self.refresh();
    }

    /// Current indent level at the selection.
    pub fn current_indent_level(&self) -> u32 {
        self.config.indent_level(self.style.indent_points())
    }

    /// Style mirror.
    pub fn style(&self) -> &StyleState {
        &self.style
    }

    /// Subscribe to style change notifications
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&StyleChange) + Send + 'static,
    {
        self.style.subscribe(callback);
    }

    /// History stacks.
    pub fn history(&self) -> &HistoryController {
        &self.history
    }

    /// Drop all undo/redo checkpoints (e.g. after replacing the document).
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Engine configuration.
    pub fn config(&self) -> &RichTextConfig {
        &self.config
    }

    /// Text buffer.
    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Mutable text buffer.
    ///
    /// Call [`handle_selection_change`](Self::handle_selection_change) after modifying it. Text
    /// edits made through it drop the undo and redo history.
    pub fn buffer_mut(&mut self) -> &mut B {
        &mut self.buffer
    }

    /// Clipboard sink.
    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    fn can_copy(&self) -> bool {
        !self.selection().is_caret()
    }

    fn can_increase_indent(&self) -> bool {
        self.current_indent_level() < self.config.max_indent_level
    }

    fn can_decrease_indent(&self) -> bool {
        self.current_indent_level() > self.config.min_indent_level
    }

    fn copy_current_selection(&mut self) {
        let selection = self.selection();
        if selection.is_caret() {
            return;
        }
        let fragment = resolver::fragment(selection, &self.buffer);
        self.clipboard.write(&fragment.text, &fragment);
    }

    /// Flip a boolean character style, based on the leading edge of the selection.
    pub fn toggle_style(&mut self, style: RichTextStyle) -> bool {
        let key = style.key();
        let enabled = resolver::effective_value(key, self.selection(), &self.buffer)
            .as_flag()
            .unwrap_or(false);
        self.set_value(key, StyleValue::Flag(!enabled))
    }

    /// Set the selected paragraphs' alignment.
    pub fn set_alignment(&mut self, alignment: TextAlignment) -> bool {
        self.set_value(StyleKey::Alignment, StyleValue::Alignment(alignment))
    }

    /// Switch to `position`, or back to the baseline if already there.
    pub fn toggle_vertical_position(&mut self, position: VerticalPosition) -> bool {
        let current = resolver::effective_value(StyleKey::VerticalPosition, self.selection(), &self.buffer)
            .as_vertical_position()
            .unwrap_or(VerticalPosition::Baseline);
        let next = if current == position {
            VerticalPosition::Baseline
        } else {
            position
        };
        self.set_value(StyleKey::VerticalPosition, StyleValue::VerticalPosition(next))
    }

    /// Apply one value through the resolver and record it.
    fn set_value(&mut self, key: StyleKey, value: StyleValue) -> bool {
        let selection = self.selection();
        let ranges: Vec<Range<usize>> = resolver::target_range(key, selection, &self.buffer)
            .into_iter()
            .collect();
        self.apply_and_record(key, ranges, |buffer| {
            resolver::apply_value(key, value, selection, buffer);
        })
    }

    /// Run `apply` against the buffer, capturing `key` over `ranges` and the typing attributes
    /// before and after. Records a checkpoint and refreshes the mirror if anything changed.
    fn apply_and_record<F>(&mut self, key: StyleKey, ranges: Vec<Range<usize>>, apply: F) -> bool
    where
        F: FnOnce(&mut B),
    {
        self.invalidate_stale_history();
        let selection = self.selection();
        let capture = |buffer: &B| -> Vec<Run> {
            ranges
                .iter()
                .flat_map(|range| resolver::capture_runs(key, range.clone(), buffer))
                .collect()
        };

        let before = capture(&self.buffer);
        let typing_before = resolver::typing_attributes(&self.buffer);
        apply(&mut self.buffer);
        let after = capture(&self.buffer);
        let typing_after = resolver::typing_attributes(&self.buffer);

        let checkpoint =
            HistoryCheckpoint::new(key, before, after, typing_before, typing_after, selection);
        if checkpoint.is_noop() {
            tracing::debug!(%key, "formatting change had no effect; not recorded");
            return false;
        }

        self.history.record(checkpoint);
        self.refresh();
        true
    }

    fn current_text_stamp(&self) -> (usize, u64) {
        (self.buffer.len(), self.buffer.text_revision())
    }

    fn text_is_current(&self) -> bool {
        self.text_stamp == self.current_text_stamp()
    }

    /// Drop checkpoints whose offsets refer to text that has since been edited.
    fn invalidate_stale_history(&mut self) {
        if self.text_is_current() {
            return;
        }
        if self.history.can_undo() || self.history.can_redo() {
            tracing::debug!(
                undo_depth = self.history.undo_depth(),
                redo_depth = self.history.redo_depth(),
                "text changed; dropping history"
            );
            self.history.clear();
        }
        self.text_stamp = self.current_text_stamp();
    }

    fn refresh(&mut self) {
        let selection = self.selection();
        self.style.refresh(selection, &self.buffer);
    }
}

impl<B, C> std::fmt::Debug for RichTextContext<B, C>
where
    B: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RichTextContext")
            .field("buffer", &self.buffer)
            .field("style", &self.style)
            .field("undo_depth", &self.history.undo_depth())
            .field("redo_depth", &self.history.redo_depth())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::AttributedTextBuffer;

    fn context(text: &str) -> RichTextContext<AttributedTextBuffer> {
        RichTextContext::new(AttributedTextBuffer::new(text))
    }

    #[test]
    fn test_initial_state_mirrors_typing_attributes() {
        let context = context("foo");
        assert_eq!(context.style().font_size(), DEFAULT_FONT_SIZE);
        assert_eq!(context.style().alignment(), TextAlignment::Left);
        assert_eq!(context.current_indent_level(), 0);
        assert_eq!(context.style().version(), 0);
    }

    #[test]
    fn test_noop_change_is_not_recorded() {
        let mut context = context("foo");
        context.set_selection(SelectionRange::new(0, 3));
        assert!(!context.set_value(StyleKey::Bold, StyleValue::Flag(false)));
        assert_eq!(context.history().undo_depth(), 0);

        assert!(context.set_value(StyleKey::Bold, StyleValue::Flag(true)));
        assert_eq!(context.history().undo_depth(), 1);
        assert!(context.style().is_bold());
    }

    #[test]
    fn test_with_config_rejects_invalid_config() {
        let config = RichTextConfig {
            font_size_step: -1.0,
            ..RichTextConfig::default()
        };
        let result = RichTextContext::with_config(
            AttributedTextBuffer::new("foo"),
            MemoryClipboard::new(),
            config,
        );
        assert!(matches!(result, Err(RichTextError::Config(_))));
    }

    #[test]
    fn test_toggle_vertical_position() {
        let mut context = context("x2");
        context.set_selection(SelectionRange::new(1, 1));

        context.trigger_rich_text_action(RichTextAction::ToggleSuperscript);
        assert_eq!(context.style().vertical_position(), VerticalPosition::Superscript);

        context.trigger_rich_text_action(RichTextAction::ToggleSubscript);
        assert_eq!(context.style().vertical_position(), VerticalPosition::Subscript);

        context.trigger_rich_text_action(RichTextAction::ToggleSubscript);
        assert_eq!(context.style().vertical_position(), VerticalPosition::Baseline);
        assert_eq!(
            context.buffer().attribute(StyleKey::VerticalPosition, 0),
            StyleValue::VerticalPosition(VerticalPosition::Baseline)
        );
    }
}
