//! Clipboard boundary.
//!
//! The engine copies the current selection as plain text plus a [`RichTextFragment`], a
//! host-independent rich representation that can be serialized with serde.

use crate::attributes::AttributeSet;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A span of a copied fragment sharing one full attribute set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentRun {
    /// Range relative to the start of the fragment.
    pub range: Range<usize>,
    /// Attributes of every character in the range.
    pub attributes: AttributeSet,
}

/// Rich representation of copied text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RichTextFragment {
    /// Plain text of the fragment.
    pub text: String,
    /// Attribute runs covering the text, in order.
    pub runs: Vec<FragmentRun>,
}

impl RichTextFragment {
    /// Serialize the fragment to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a fragment serialized with [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Destination for copied text.
pub trait ClipboardSink {
    /// Publish `plain_text` and its rich representation.
    fn write(&mut self, plain_text: &str, rich: &RichTextFragment);
}

/// In-memory clipboard, for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<(String, RichTextFragment)>,
    write_count: usize,
}

impl MemoryClipboard {
    /// Empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last written plain text.
    pub fn plain_text(&self) -> Option<&str> {
        self.contents.as_ref().map(|(text, _)| text.as_str())
    }

    /// Last written rich representation.
    pub fn rich_text(&self) -> Option<&RichTextFragment> {
        self.contents.as_ref().map(|(_, rich)| rich)
    }

    /// Number of writes so far.
    pub fn write_count(&self) -> usize {
        self.write_count
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write(&mut self, plain_text: &str, rich: &RichTextFragment) {
        self.contents = Some((plain_text.to_string(), rich.clone()));
        self.write_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{StyleKey, StyleValue};

    #[test]
    fn test_memory_clipboard_keeps_latest() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.plain_text(), None);

        let fragment = RichTextFragment {
            text: "bar".to_string(),
            runs: vec![FragmentRun {
                range: 0..3,
                attributes: AttributeSet::new(),
            }],
        };
        clipboard.write("foo", &RichTextFragment::default());
        clipboard.write("bar", &fragment);

        assert_eq!(clipboard.plain_text(), Some("bar"));
        assert_eq!(clipboard.rich_text(), Some(&fragment));
        assert_eq!(clipboard.write_count(), 2);
    }

    #[test]
    fn test_fragment_json_round_trip() {
        let fragment = RichTextFragment {
            text: "hi".to_string(),
            runs: vec![FragmentRun {
                range: 0..2,
                attributes: AttributeSet::new().with(StyleKey::Bold, StyleValue::Flag(true)),
            }],
        };
        let json = fragment.to_json().unwrap();
        assert_eq!(RichTextFragment::from_json(&json).unwrap(), fragment);
    }

    #[test]
    fn test_fragment_json_rejects_malformed_attributes() {
        let empty = r#"{"text":"a","runs":[{"range":{"start":0,"end":1},"attributes":[]}]}"#;
        let err = RichTextFragment::from_json(empty).unwrap_err();
        assert!(err.to_string().contains("must hold 11 values"), "{err}");

        let legacy = r#"{"text":"a","runs":[{"range":{"start":0,"end":1},"attributes":{"values":[]}}]}"#;
        assert!(RichTextFragment::from_json(legacy).is_err());

        let mut values: Vec<StyleValue> = AttributeSet::new().into();
        values[StyleKey::Bold.index()] = StyleValue::Indent(4.0);
        let json = format!(
            r#"{{"text":"a","runs":[{{"range":{{"start":0,"end":1}},"attributes":{}}}]}}"#,
            serde_json::to_string(&values).unwrap()
        );
        let err = RichTextFragment::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("bold"), "{err}");
    }
}
