//! Engine configuration.
//!
//! Step sizes and clamps used by the font-size and indent actions. Actions never carry these
//! values themselves; the engine reads them from the [`RichTextConfig`] it was created with.
//!
//! Configurations can be loaded from JSON. Missing fields fall back to their defaults:
//!
//! ```rust
//! use rich_text_core::RichTextConfig;
//!
//! let config = RichTextConfig::from_json_str(r#"{ "indent_step": 20.0 }"#).unwrap();
//! assert_eq!(config.indent_step, 20.0);
//! assert_eq!(config.font_size_step, 1.0);
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Smallest font size reachable by stepping, in points.
pub const MIN_FONT_SIZE: f64 = 1.0;

/// Largest font size reachable by stepping, in points.
pub const MAX_FONT_SIZE: f64 = 1000.0;

/// Default font size step, in points.
pub const DEFAULT_FONT_SIZE_STEP: f64 = 1.0;

/// Default indent step, in points.
pub const DEFAULT_INDENT_STEP: f64 = 30.0;

/// Default maximum indent level.
pub const DEFAULT_MAX_INDENT_LEVEL: u32 = 10;

/// Rich text engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RichTextConfig {
    /// Points added/removed by the increment/decrement font size actions.
    pub font_size_step: f64,
    /// Lower font size clamp.
    pub min_font_size: f64,
    /// Upper font size clamp.
    pub max_font_size: f64,
    /// Points added/removed per indent level.
    pub indent_step: f64,
    /// Lowest indent level (decrease indent is illegal at this level).
    pub min_indent_level: u32,
    /// Highest indent level (increase indent is illegal at this level).
    pub max_indent_level: u32,
    /// Maximum number of undo checkpoints kept; `None` keeps everything.
    pub history_limit: Option<usize>,
}

impl Default for RichTextConfig {
    fn default() -> Self {
        Self {
            font_size_step: DEFAULT_FONT_SIZE_STEP,
            min_font_size: MIN_FONT_SIZE,
            max_font_size: MAX_FONT_SIZE,
            indent_step: DEFAULT_INDENT_STEP,
            min_indent_level: 0,
            max_indent_level: DEFAULT_MAX_INDENT_LEVEL,
            history_limit: None,
        }
    }
}

impl RichTextConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that steps are positive and bounds are ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("font size", self.font_size_step),
            ("indent", self.indent_step),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidStep { name, value });
            }
        }

        let (min, max) = (self.min_font_size, self.max_font_size);
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(ConfigError::InvalidFontSizeBounds { min, max });
        }

        if self.min_indent_level > self.max_indent_level {
            return Err(ConfigError::InvalidIndentBounds {
                min: self.min_indent_level,
                max: self.max_indent_level,
            });
        }

        Ok(())
    }

    /// Clamp a font size into `[min_font_size, max_font_size]`.
    pub fn clamp_font_size(&self, size: f64) -> f64 {
        size.clamp(self.min_font_size, self.max_font_size)
    }

    /// Indent in points at the lowest allowed level.
    pub fn min_indent_points(&self) -> f64 {
        f64::from(self.min_indent_level) * self.indent_step
    }

    /// Indent in points at the highest allowed level.
    pub fn max_indent_points(&self) -> f64 {
        f64::from(self.max_indent_level) * self.indent_step
    }

    /// Indent level for an indent in points.
    ///
    /// Partial steps round down; a small tolerance absorbs floating-point drift.
    pub fn indent_level(&self, points: f64) -> u32 {
        if points <= 0.0 {
            return 0;
        }
        // Saturating float-to-int cast.
        ((points / self.indent_step) + 1e-9).floor() as u32
    }
}
