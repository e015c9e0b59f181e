//! Style State Mirror
//!
//! [`StyleState`] mirrors the formatting at the current selection: the first selected
//! character's attributes for a range selection, or the pending typing attributes for a caret.
//!
//! # Overview
//!
//! - **Single writer**: only the engine ([`RichTextContext`](crate::RichTextContext)) writes,
//!   either by refreshing after a selection change or after a mutating action.
//! - **Many readers**: [`read`](StyleState::read) and the typed accessors are O(1) lookups.
//! - **Change notifications**: subscribers are called once per changed key, with the version
//!   before and after the change, so UI bindings never need to poll.
//!
//! A refresh that changes nothing is silent and does not bump the version.

use crate::attributes::{AttributeSet, Color, StyleKey, StyleValue, TextAlignment, VerticalPosition};
use crate::buffer::TextBufferAdapter;
use crate::resolver;
use crate::selection::SelectionRange;

/// A change of one mirrored style key.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleChange {
    /// Key that changed.
    pub key: StyleKey,
    /// Value before the change.
    pub old: StyleValue,
    /// Value after the change.
    pub new: StyleValue,
    /// Version before the change.
    pub old_version: u64,
    /// Version after the change.
    pub new_version: u64,
}

/// Style change callback function type
pub type StyleChangeCallback = Box<dyn FnMut(&StyleChange) + Send>;

/// Observable mirror of the current formatting.
pub struct StyleState {
    values: AttributeSet,
    version: u64,
    callbacks: Vec<StyleChangeCallback>,
}

impl StyleState {
    /// State holding default values, at version 0.
    pub fn new() -> Self {
        Self {
            values: AttributeSet::new(),
            version: 0,
            callbacks: Vec::new(),
        }
    }

    /// Recompute every key from `buffer` for `selection`.
    ///
    /// Returns the number of keys that changed.
    pub fn refresh<B>(&mut self, selection: SelectionRange, buffer: &B) -> usize
    where
        B: TextBufferAdapter + ?Sized,
    {
        let mut changed = 0;
        for key in StyleKey::ALL {
            let value = resolver::effective_value(key, selection, buffer);
            if self.write(key, value) {
                changed += 1;
            }
        }

        if changed > 0 {
            tracing::trace!(changed, version = self.version, "style state refreshed");
        }
        changed
    }

    /// Current value of `key`.
    pub fn read(&self, key: StyleKey) -> &StyleValue {
        self.values.get(key)
    }

    /// Store `value` for `key` and notify subscribers if it changed.
    ///
    /// Returns `true` if the value changed.
    pub(crate) fn write(&mut self, key: StyleKey, value: StyleValue) -> bool {
        if self.values.get(key) == &value || !value.fits(key) {
            return false;
        }

        let old = self.values.set(key, value.clone());
        let old_version = self.version;
        self.version += 1;

        let change = StyleChange {
            key,
            old,
            new: value,
            old_version,
            new_version: self.version,
        };
        for callback in &mut self.callbacks {
            callback(&change);
        }
        true
    }

    /// Subscribe to style change notifications
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&StyleChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Get current version number
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Check if state has changed since a version
    pub fn has_changed_since(&self, version: u64) -> bool {
        self.version > version
    }

    /// Copy of every mirrored value.
    pub fn snapshot(&self) -> AttributeSet {
        self.values.clone()
    }

    /// Current font family.
    pub fn font_family(&self) -> &str {
        self.read(StyleKey::FontFamily)
            .as_font_family()
            .unwrap_or_default()
    }

    /// Current font size in points.
    pub fn font_size(&self) -> f64 {
        self.read(StyleKey::FontSize)
            .as_font_size()
            .unwrap_or(crate::attributes::DEFAULT_FONT_SIZE)
    }

    fn flag(&self, key: StyleKey) -> bool {
        self.read(key).as_flag().unwrap_or(false)
    }

    /// Whether the current text is bold.
    pub fn is_bold(&self) -> bool {
        self.flag(StyleKey::Bold)
    }

    /// Whether the current text is italic.
    pub fn is_italic(&self) -> bool {
        self.flag(StyleKey::Italic)
    }

    /// Whether the current text is underlined.
    pub fn is_underlined(&self) -> bool {
        self.flag(StyleKey::Underline)
    }

    /// Whether the current text is struck through.
    pub fn is_strikethrough(&self) -> bool {
        self.flag(StyleKey::Strikethrough)
    }

    /// Current paragraph alignment.
    pub fn alignment(&self) -> TextAlignment {
        self.read(StyleKey::Alignment)
            .as_alignment()
            .unwrap_or(TextAlignment::Left)
    }

    /// Current paragraph indent in points.
    pub fn indent_points(&self) -> f64 {
        self.read(StyleKey::IndentLevel).as_indent().unwrap_or(0.0)
    }

    /// Current text color.
    pub fn foreground_color(&self) -> Color {
        self.read(StyleKey::ForegroundColor)
            .as_color()
            .unwrap_or(Color::BLACK)
    }

    /// Current background color.
    pub fn background_color(&self) -> Color {
        self.read(StyleKey::BackgroundColor)
            .as_color()
            .unwrap_or(Color::CLEAR)
    }

    /// Current baseline position.
    pub fn vertical_position(&self) -> VerticalPosition {
        self.read(StyleKey::VerticalPosition)
            .as_vertical_position()
            .unwrap_or(VerticalPosition::Baseline)
    }
}

impl Default for StyleState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StyleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleState")
            .field("values", &self.values)
            .field("version", &self.version)
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}
