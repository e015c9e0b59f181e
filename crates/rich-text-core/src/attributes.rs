//! Style keys, values and attribute sets.
//!
//! Every formatting property the engine understands is identified by a [`StyleKey`]. Values are
//! carried as [`StyleValue`], a small tagged union, and a full set of values (one per key) is an
//! [`AttributeSet`].
//!
//! Keys are either *character-scoped* (font, colors, decorations) or *paragraph-scoped*
//! (alignment, indent). Paragraph-scoped keys are always written over whole paragraphs.

use crate::error::RichTextError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default font family used when a buffer has no explicit font.
pub const DEFAULT_FONT_FAMILY: &str = "System";

/// Default font size in points.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Formatting property identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StyleKey {
    /// Font family name.
    FontFamily,
    /// Font size in points.
    FontSize,
    /// Bold weight.
    Bold,
    /// Italic slant.
    Italic,
    /// Single underline.
    Underline,
    /// Single strikethrough.
    Strikethrough,
    /// Paragraph alignment (paragraph-scoped).
    Alignment,
    /// Paragraph head indent in points (paragraph-scoped).
    IndentLevel,
    /// Text color.
    ForegroundColor,
    /// Text background (highlight) color.
    BackgroundColor,
    /// Superscript / subscript position.
    VerticalPosition,
}

impl StyleKey {
    /// Number of keys.
    pub const COUNT: usize = 11;

    /// All keys, in table order.
    pub const ALL: [StyleKey; Self::COUNT] = [
        StyleKey::FontFamily,
        StyleKey::FontSize,
        StyleKey::Bold,
        StyleKey::Italic,
        StyleKey::Underline,
        StyleKey::Strikethrough,
        StyleKey::Alignment,
        StyleKey::IndentLevel,
        StyleKey::ForegroundColor,
        StyleKey::BackgroundColor,
        StyleKey::VerticalPosition,
    ];

    /// Position of this key in [`StyleKey::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this key applies to whole paragraphs rather than individual characters.
    pub const fn is_paragraph_scoped(self) -> bool {
        matches!(self, StyleKey::Alignment | StyleKey::IndentLevel)
    }

    /// The value a key holds when nothing has been set.
    pub fn default_value(self) -> StyleValue {
        match self {
            StyleKey::FontFamily => StyleValue::FontFamily(DEFAULT_FONT_FAMILY.to_string()),
            StyleKey::FontSize => StyleValue::FontSize(DEFAULT_FONT_SIZE),
            StyleKey::Bold
            | StyleKey::Italic
            | StyleKey::Underline
            | StyleKey::Strikethrough => StyleValue::Flag(false),
            StyleKey::Alignment => StyleValue::Alignment(TextAlignment::Left),
            StyleKey::IndentLevel => StyleValue::Indent(0.0),
            StyleKey::ForegroundColor => StyleValue::Color(Color::BLACK),
            StyleKey::BackgroundColor => StyleValue::Color(Color::CLEAR),
            StyleKey::VerticalPosition => StyleValue::VerticalPosition(VerticalPosition::Baseline),
        }
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StyleKey::FontFamily => "font-family",
            StyleKey::FontSize => "font-size",
            StyleKey::Bold => "bold",
            StyleKey::Italic => "italic",
            StyleKey::Underline => "underline",
            StyleKey::Strikethrough => "strikethrough",
            StyleKey::Alignment => "alignment",
            StyleKey::IndentLevel => "indent",
            StyleKey::ForegroundColor => "foreground-color",
            StyleKey::BackgroundColor => "background-color",
            StyleKey::VerticalPosition => "vertical-position",
        };
        f.write_str(name)
    }
}

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextAlignment {
    /// Flush left.
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
    /// Justified.
    Justified,
}

/// Baseline position of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerticalPosition {
    /// Regular baseline.
    Baseline,
    /// Raised and reduced.
    Superscript,
    /// Lowered and reduced.
    Subscript,
}

/// RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (0 is fully transparent).
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Fully transparent.
    pub const CLEAR: Color = Color::rgba(0, 0, 0, 0);

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A single attribute value.
///
/// The variant always matches the key it is stored under; see [`StyleKey::default_value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StyleValue {
    /// Font family name.
    FontFamily(String),
    /// Font size in points.
    FontSize(f64),
    /// On/off trait (bold, italic, underline, strikethrough).
    Flag(bool),
    /// Paragraph alignment.
    Alignment(TextAlignment),
    /// Paragraph head indent in points.
    Indent(f64),
    /// Color.
    Color(Color),
    /// Baseline position.
    VerticalPosition(VerticalPosition),
}

impl StyleValue {
    /// Font size in points, if this is a font size.
    pub fn as_font_size(&self) -> Option<f64> {
        match self {
            StyleValue::FontSize(size) => Some(*size),
            _ => None,
        }
    }

    /// Flag state, if this is a flag.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            StyleValue::Flag(on) => Some(*on),
            _ => None,
        }
    }

    /// Indent in points, if this is an indent.
    pub fn as_indent(&self) -> Option<f64> {
        match self {
            StyleValue::Indent(points) => Some(*points),
            _ => None,
        }
    }

    /// Alignment, if this is an alignment.
    pub fn as_alignment(&self) -> Option<TextAlignment> {
        match self {
            StyleValue::Alignment(alignment) => Some(*alignment),
            _ => None,
        }
    }

    /// Color, if this is a color.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            StyleValue::Color(color) => Some(*color),
            _ => None,
        }
    }

    /// Font family, if this is a font family.
    pub fn as_font_family(&self) -> Option<&str> {
        match self {
            StyleValue::FontFamily(family) => Some(family),
            _ => None,
        }
    }

    /// Vertical position, if this is a vertical position.
    pub fn as_vertical_position(&self) -> Option<VerticalPosition> {
        match self {
            StyleValue::VerticalPosition(position) => Some(*position),
            _ => None,
        }
    }

    /// Whether this value is of the variant `key` stores.
    pub fn fits(&self, key: StyleKey) -> bool {
        matches!(
            (key, self),
            (StyleKey::FontFamily, StyleValue::FontFamily(_))
                | (StyleKey::FontSize, StyleValue::FontSize(_))
                | (
                    StyleKey::Bold
                        | StyleKey::Italic
                        | StyleKey::Underline
                        | StyleKey::Strikethrough,
                    StyleValue::Flag(_)
                )
                | (StyleKey::Alignment, StyleValue::Alignment(_))
                | (StyleKey::IndentLevel, StyleValue::Indent(_))
                | (
                    StyleKey::ForegroundColor | StyleKey::BackgroundColor,
                    StyleValue::Color(_)
                )
                | (StyleKey::VerticalPosition, StyleValue::VerticalPosition(_))
        )
    }
}

/// One value per [`StyleKey`], indexed in O(1).
///
/// Serialized as a plain list in [`StyleKey::ALL`] order. Deserialization rejects lists of the
/// wrong length or with a value that does not fit its key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StyleValue>", into = "Vec<StyleValue>")]
pub struct AttributeSet {
    values: Vec<StyleValue>,
}

impl AttributeSet {
    /// Attribute set holding every key's default value.
    pub fn new() -> Self {
        Self {
            values: StyleKey::ALL.iter().map(|key| key.default_value()).collect(),
        }
    }

    /// Value stored for `key`.
    pub fn get(&self, key: StyleKey) -> &StyleValue {
        &self.values[key.index()]
    }

    /// Store `value` for `key`, returning the previous value.
    ///
    /// Values of the wrong variant are ignored and the current value is returned unchanged.
    pub fn set(&mut self, key: StyleKey, value: StyleValue) -> StyleValue {
        if !value.fits(key) {
            return self.values[key.index()].clone();
        }
        std::mem::replace(&mut self.values[key.index()], value)
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: StyleKey, value: StyleValue) -> Self {
        self.set(key, value);
        self
    }

    /// Iterate over `(key, value)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleKey, &StyleValue)> {
        StyleKey::ALL.iter().copied().zip(self.values.iter())
    }
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<StyleValue>> for AttributeSet {
    type Error = RichTextError;

    fn try_from(values: Vec<StyleValue>) -> Result<Self, Self::Error> {
        if values.len() != StyleKey::COUNT {
            return Err(RichTextError::AttributeCount {
                expected: StyleKey::COUNT,
                found: values.len(),
            });
        }
        if let Some((key, _)) = StyleKey::ALL
            .iter()
            .zip(&values)
            .find(|(key, value)| !value.fits(**key))
        {
            return Err(RichTextError::AttributeMismatch { key: *key });
        }
        Ok(Self { values })
    }
}

impl From<AttributeSet> for Vec<StyleValue> {
    fn from(set: AttributeSet) -> Self {
        set.values
    }
}
