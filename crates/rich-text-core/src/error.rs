use crate::attributes::StyleKey;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading or validating a [`RichTextConfig`](crate::RichTextConfig).
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    /// The configuration document was not valid JSON for the config schema.
    Json(#[from] serde_json::Error),

    #[error("invalid font size bounds: min {min} must be > 0 and <= max {max}")]
    /// `min_font_size` / `max_font_size` are not a usable interval.
    InvalidFontSizeBounds {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },

    #[error("invalid {name} step: {value} (must be finite and > 0)")]
    /// A step size was zero, negative, or not finite.
    InvalidStep {
        /// Name of the offending field.
        name: &'static str,
        /// Configured value.
        value: f64,
    },

    #[error("invalid indent bounds: min level {min} is greater than max level {max}")]
    /// `min_indent_level` exceeds `max_indent_level`.
    InvalidIndentBounds {
        /// Configured minimum level.
        min: u32,
        /// Configured maximum level.
        max: u32,
    },
}

#[derive(Debug, Error)]
/// Errors produced by fallible construction paths of the rich text engine.
///
/// Action dispatch itself never fails: illegal actions are ignored, stale selections are
/// clamped, and empty history stacks report `false`.
pub enum RichTextError {
    #[error("configuration error: {0}")]
    /// The engine configuration was rejected.
    Config(#[from] ConfigError),

    #[error("invalid range: {start}..{end}")]
    /// A range with `start > end`.
    InvalidRange {
        /// Inclusive start character offset.
        start: usize,
        /// Exclusive end character offset.
        end: usize,
    },

    #[error("range {start}..{end} is out of bounds for text of length {len}")]
    /// A range extending past the end of the text.
    InvalidBounds {
        /// Inclusive start character offset.
        start: usize,
        /// Exclusive end character offset.
        end: usize,
        /// Text length in characters.
        len: usize,
    },

    #[error("attribute set must hold {expected} values, found {found}")]
    /// A serialized attribute set with the wrong number of values.
    AttributeCount {
        /// Number of style keys.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },

    #[error("attribute value for {key} has the wrong type")]
    /// A serialized attribute set holding a value that does not fit its key.
    AttributeMismatch {
        /// Key whose value was rejected.
        key: StyleKey,
    },
}
