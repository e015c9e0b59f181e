//! Text buffer boundary.
//!
//! [`TextBufferAdapter`] is the contract between the engine and whatever owns the attributed
//! text and selection (a native text view, a TUI widget, ...). The engine never touches text
//! storage except through this trait.
//!
//! [`AttributedTextBuffer`] is a headless implementation backed by a [`ropey::Rope`] and one
//! [`AttributeRuns`] list per [`StyleKey`]. It mimics the typing-attribute behaviour of native
//! text views: moving the selection resets the typing attributes from the text, while typing
//! keeps them.
//!
//! # Example
//!
//! ```rust
//! use rich_text_core::{AttributedTextBuffer, SelectionRange, StyleKey, StyleValue, TextBufferAdapter};
//!
//! let mut buffer = AttributedTextBuffer::new("foo bar baz");
//! buffer.set_selection(SelectionRange::new(4, 3));
//! buffer.set_attribute(StyleKey::Bold, StyleValue::Flag(true), 4..7);
//!
//! assert_eq!(buffer.attribute(StyleKey::Bold, 4), StyleValue::Flag(true));
//! assert_eq!(buffer.attribute(StyleKey::Bold, 0), StyleValue::Flag(false));
//! ```

use crate::attributes::{AttributeSet, StyleKey, StyleValue};
use crate::error::RichTextError;
use crate::runs::{AttributeRuns, Run};
use crate::selection::SelectionRange;
use ropey::Rope;
use std::ops::Range;

/// Attributed text storage and selection owned by the host widget.
///
/// All offsets are character (Unicode scalar value) offsets.
pub trait TextBufferAdapter {
    /// Current selection.
    fn selection(&self) -> SelectionRange;

    /// Replace the selection.
    fn set_selection(&mut self, selection: SelectionRange);

    /// Value of `key` for the character at `offset`.
    fn attribute(&self, key: StyleKey, offset: usize) -> StyleValue;

    /// Set `key` to `value` for every character in `range`.
    fn set_attribute(&mut self, key: StyleKey, value: StyleValue, range: Range<usize>);

    /// Pending typing attribute for `key`.
    fn typing_attribute(&self, key: StyleKey) -> StyleValue;

    /// Set the pending typing attribute for `key`.
    fn set_typing_attribute(&mut self, key: StyleKey, value: StyleValue);

    /// Text length in characters.
    fn len(&self) -> usize;

    /// Counter that changes whenever the text changes.
    ///
    /// History checkpoints hold character offsets, so the engine drops them once the text they
    /// refer to has changed. The default never changes, which leaves only length changes
    /// detectable; buffers that can edit text should override it.
    fn text_revision(&self) -> u64 {
        0
    }

    /// Returns `true` if the buffer holds no text.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Plain text in `range`.
    fn text(&self, range: Range<usize>) -> String;

    /// Smallest range of whole paragraphs containing `range`.
    ///
    /// A paragraph ends after its `\n`, or at the end of the text. Other Unicode line
    /// separators do not end a paragraph.
    fn paragraph_range(&self, range: Range<usize>) -> Range<usize>;

    /// Runs of `key` overlapping `range`, clipped to it.
    ///
    /// The default implementation scans character by character; buffers that store runs
    /// natively should override it.
    fn attribute_runs(&self, key: StyleKey, range: Range<usize>) -> Vec<Run> {
        let end = range.end.min(self.len());
        let mut runs: Vec<Run> = Vec::new();
        for offset in range.start..end {
            let value = self.attribute(key, offset);
            match runs.last_mut() {
                Some(last) if last.value == value => last.range.end = offset + 1,
                _ => runs.push(Run::new(offset..offset + 1, value)),
            }
        }
        runs
    }

    /// Ask the input surface to give up focus (dismiss the keyboard).
    fn resign_focus(&mut self);

    /// Whether the host reflects typing attributes as the "current" attributes while nothing
    /// is selected.
    ///
    /// When `false`, a caret reflects the attributes of the text at the caret instead.
    fn supports_typing_attribute_reflection_without_selection(&self) -> bool {
        true
    }
}

/// Headless attributed text buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributedTextBuffer {
    text: Rope,
    runs: Vec<AttributeRuns>,
    typing_attributes: AttributeSet,
    selection: SelectionRange,
    has_focus: bool,
    reflects_typing_attributes: bool,
    revision: u64,
}

impl AttributedTextBuffer {
    /// Buffer holding `text` with default attributes.
    pub fn new(text: &str) -> Self {
        Self::with_attributes(text, AttributeSet::new())
    }

    /// Buffer holding `text` with `attributes` applied to all of it.
    pub fn with_attributes(text: &str, attributes: AttributeSet) -> Self {
        let text = Rope::from_str(text);
        let len = text.len_chars();
        let runs = attributes
            .iter()
            .map(|(_, value)| AttributeRuns::new(len, value.clone()))
            .collect();

        Self {
            text,
            runs,
            typing_attributes: attributes,
            selection: SelectionRange::caret(0),
            has_focus: true,
            reflects_typing_attributes: true,
            revision: 0,
        }
    }

    /// Builder: choose whether a caret reflects typing attributes (see
    /// [`TextBufferAdapter::supports_typing_attribute_reflection_without_selection`]).
    pub fn with_typing_attribute_reflection(mut self, enabled: bool) -> Self {
        self.reflects_typing_attributes = enabled;
        self
    }

    /// Apply `value` for `key` to a range, validating the range.
    pub fn apply_attribute(
        &mut self,
        key: StyleKey,
        value: StyleValue,
        range: Range<usize>,
    ) -> Result<(), RichTextError> {
        let len = self.len();
        if range.start > range.end {
            return Err(RichTextError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.end > len {
            return Err(RichTextError::InvalidBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }
        self.set_attribute(key, value, range);
        Ok(())
    }

    /// Full plain text.
    pub fn get_text(&self) -> String {
        self.text.to_string()
    }

    /// Runs stored for `key`.
    pub fn runs(&self, key: StyleKey) -> &AttributeRuns {
        &self.runs[key.index()]
    }

    /// All attributes of the character at `offset`.
    pub fn attributes_at(&self, offset: usize) -> AttributeSet {
        let mut set = AttributeSet::new();
        for key in StyleKey::ALL {
            set.set(key, self.attribute(key, offset));
        }
        set
    }

    /// Pending typing attributes.
    pub fn typing_attributes(&self) -> &AttributeSet {
        &self.typing_attributes
    }

    /// Whether the input surface currently has focus.
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Give focus back to the input surface.
    pub fn focus(&mut self) {
        self.has_focus = true;
    }

    /// Replace the selected text with `text`, as if typed.
    ///
    /// Inserted characters take the current typing attributes; the caret ends up after the
    /// inserted text and the typing attributes are kept.
    pub fn insert_text(&mut self, text: &str) {
        let selection = self.selection.clamped(self.len());
        if !selection.is_caret() {
            self.text.remove(selection.range());
            for runs in &mut self.runs {
                runs.remove(selection.range());
            }
        }

        let count = text.chars().count();
        self.text.insert(selection.start, text);
        for (key, value) in self.typing_attributes.iter() {
            self.runs[key.index()].insert(selection.start, count, value.clone());
        }

        if count > 0 || !selection.is_caret() {
            self.revision += 1;
        }
        self.selection = SelectionRange::caret(selection.start + count);
    }

    /// Reset typing attributes from the text, the way native text views do when the
    /// selection moves.
    fn sync_typing_attributes(&mut self) {
        let len = self.len();
        if len == 0 {
            return;
        }

        let selection = self.selection;
        let offset = if selection.is_caret() {
            selection.start.saturating_sub(1)
        } else {
            selection.start
        };
        let mut attributes = self.attributes_at(offset.min(len - 1));

        // Paragraph attributes follow the paragraph the selection starts in.
        let paragraph = self.paragraph_range(selection.start..selection.start);
        if !paragraph.is_empty() {
            for key in StyleKey::ALL.into_iter().filter(|key| key.is_paragraph_scoped()) {
                attributes.set(key, self.attribute(key, paragraph.start));
            }
        }
        self.typing_attributes = attributes;
    }
}

impl Default for AttributedTextBuffer {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextBufferAdapter for AttributedTextBuffer {
    fn selection(&self) -> SelectionRange {
        self.selection
    }

    fn set_selection(&mut self, selection: SelectionRange) {
        self.selection = selection.clamped(self.len());
        self.sync_typing_attributes();
    }

    fn attribute(&self, key: StyleKey, offset: usize) -> StyleValue {
        let runs = &self.runs[key.index()];
        let len = runs.len();
        if len == 0 {
            return self.typing_attributes.get(key).clone();
        }
        runs.value_at(offset.min(len - 1))
            .cloned()
            .unwrap_or_else(|| key.default_value())
    }

    fn set_attribute(&mut self, key: StyleKey, value: StyleValue, range: Range<usize>) {
        if value.fits(key) {
            self.runs[key.index()].set(range, value);
        }
    }

    fn typing_attribute(&self, key: StyleKey) -> StyleValue {
        self.typing_attributes.get(key).clone()
    }

    fn set_typing_attribute(&mut self, key: StyleKey, value: StyleValue) {
        self.typing_attributes.set(key, value);
    }

    fn len(&self) -> usize {
        self.text.len_chars()
    }

    fn text_revision(&self) -> u64 {
        self.revision
    }

    fn text(&self, range: Range<usize>) -> String {
        let len = self.len();
        let end = range.end.min(len);
        let start = range.start.min(end);
        self.text.slice(start..end).to_string()
    }

    fn paragraph_range(&self, range: Range<usize>) -> Range<usize> {
        let len = self.len();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        let last = if end > start { end - 1 } else { start };

        let mut chars = self.text.chars_at(start);
        let mut paragraph_start = start;
        while let Some(ch) = chars.prev() {
            if ch == '\n' {
                break;
            }
            paragraph_start -= 1;
        }

        let paragraph_end = self
            .text
            .chars_at(last)
            .position(|ch| ch == '\n')
            .map_or(len, |idx| last + idx + 1);
        paragraph_start..paragraph_end
    }

    fn attribute_runs(&self, key: StyleKey, range: Range<usize>) -> Vec<Run> {
        self.runs[key.index()].runs_in(range)
    }

    fn resign_focus(&mut self) {
        self.has_focus = false;
    }

    fn supports_typing_attribute_reflection_without_selection(&self) -> bool {
        self.reflects_typing_attributes
    }
}
