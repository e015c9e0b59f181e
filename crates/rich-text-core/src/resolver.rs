//! Attribute range resolution.
//!
//! Decides *where* an attribute is read from and written to for a given selection:
//!
//! - **Range selection** (`length > 0`): reads come from the first selected character (the
//!   run's leading edge is taken as representative, no merging), writes cover exactly the
//!   selected characters.
//! - **Caret** (`length == 0`): reads and writes go to the typing attributes, so existing text
//!   is never touched.
//! - **Paragraph-scoped keys** (alignment, indent): writes are widened to every paragraph the
//!   selection touches, including the caret's paragraph.
//!
//! Stale selections are clamped to the buffer before use. Nothing in this module fails.

use crate::attributes::{AttributeSet, StyleKey, StyleValue};
use crate::buffer::TextBufferAdapter;
use crate::clipboard::{FragmentRun, RichTextFragment};
use crate::runs::Run;
use crate::selection::SelectionRange;
use std::ops::Range;

/// Effective value of `key` for `selection`.
pub fn effective_value<B>(key: StyleKey, selection: SelectionRange, buffer: &B) -> StyleValue
where
    B: TextBufferAdapter + ?Sized,
{
    let len = buffer.len();
    let selection = selection.clamped(len);

    if !selection.is_caret() {
        return buffer.attribute(key, selection.start);
    }

    if len == 0 || buffer.supports_typing_attribute_reflection_without_selection() {
        buffer.typing_attribute(key)
    } else {
        buffer.attribute(key, selection.start.min(len - 1))
    }
}

/// Range of existing text that a write of `key` affects, if any.
pub fn target_range<B>(key: StyleKey, selection: SelectionRange, buffer: &B) -> Option<Range<usize>>
where
    B: TextBufferAdapter + ?Sized,
{
    let selection = selection.clamped(buffer.len());
    let range = if key.is_paragraph_scoped() {
        buffer.paragraph_range(selection.range())
    } else {
        selection.range()
    };
    (!range.is_empty()).then_some(range)
}

/// Individual paragraphs intersecting `selection`, in order.
///
/// An empty trailing paragraph (caret after a final line break) yields no ranges.
pub fn paragraph_ranges<B>(selection: SelectionRange, buffer: &B) -> Vec<Range<usize>>
where
    B: TextBufferAdapter + ?Sized,
{
    let selection = selection.clamped(buffer.len());
    let whole = buffer.paragraph_range(selection.range());

    let mut ranges = Vec::new();
    let mut start = whole.start;
    while start < whole.end {
        let paragraph = buffer.paragraph_range(start..start);
        if paragraph.end <= start {
            break;
        }
        let end = paragraph.end.min(whole.end);
        ranges.push(start..end);
        start = end;
    }
    ranges
}

/// Write `value` for `key` according to `selection`.
///
/// The typing attribute is always updated as well, so text typed next (including text typed
/// over the selection) picks the value up.
pub fn apply_value<B>(key: StyleKey, value: StyleValue, selection: SelectionRange, buffer: &mut B)
where
    B: TextBufferAdapter + ?Sized,
{
    if let Some(range) = target_range(key, selection, buffer) {
        buffer.set_attribute(key, value.clone(), range);
    }
    buffer.set_typing_attribute(key, value);
}

/// Runs of `key` currently stored in `range`.
pub fn capture_runs<B>(key: StyleKey, range: Range<usize>, buffer: &B) -> Vec<Run>
where
    B: TextBufferAdapter + ?Sized,
{
    buffer.attribute_runs(key, range)
}

/// Snapshot of all typing attributes.
pub fn typing_attributes<B>(buffer: &B) -> AttributeSet
where
    B: TextBufferAdapter + ?Sized,
{
    let mut set = AttributeSet::new();
    for key in StyleKey::ALL {
        set.set(key, buffer.typing_attribute(key));
    }
    set
}

/// Rich representation of the selected text.
pub fn fragment<B>(selection: SelectionRange, buffer: &B) -> RichTextFragment
where
    B: TextBufferAdapter + ?Sized,
{
    let selection = selection.clamped(buffer.len());
    let range = selection.range();
    if range.is_empty() {
        return RichTextFragment::default();
    }

    // Every run boundary of every key splits the fragment.
    let mut boundaries: Vec<usize> = vec![range.start, range.end];
    for key in StyleKey::ALL {
        boundaries.extend(
            buffer
                .attribute_runs(key, range.clone())
                .iter()
                .map(|run| run.range.start),
        );
    }
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut runs: Vec<FragmentRun> = Vec::with_capacity(boundaries.len());
    for window in boundaries.windows(2) {
        let (start, end) = (window[0], window[1]);
        let mut attributes = AttributeSet::new();
        for key in StyleKey::ALL {
            attributes.set(key, buffer.attribute(key, start));
        }
        runs.push(FragmentRun {
            range: start - range.start..end - range.start,
            attributes,
        });
    }

    RichTextFragment {
        text: buffer.text(range),
        runs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::AttributedTextBuffer;

    const SIZE: f64 = 666.0;

    fn font_size(buffer: &AttributedTextBuffer, offset: usize) -> f64 {
        buffer
            .attribute(StyleKey::FontSize, offset)
            .as_font_size()
            .unwrap()
    }

    #[test]
    fn test_apply_to_range_selection() {
        let mut buffer = AttributedTextBuffer::new("foo bar baz");
        let selection = SelectionRange::new(4, 3);
        buffer.set_selection(selection);

        apply_value(StyleKey::FontSize, StyleValue::FontSize(SIZE), selection, &mut buffer);

        for offset in 4..7 {
            assert_eq!(font_size(&buffer, offset), SIZE);
        }
        for offset in (0..4).chain(7..11) {
            assert_ne!(font_size(&buffer, offset), SIZE);
        }
        assert_eq!(
            effective_value(StyleKey::FontSize, selection, &buffer),
            StyleValue::FontSize(SIZE)
        );
        assert_eq!(
            buffer.typing_attribute(StyleKey::FontSize),
            StyleValue::FontSize(SIZE)
        );
    }

    #[test]
    fn test_apply_to_caret_only_touches_typing_attributes() {
        let mut buffer = AttributedTextBuffer::new("foo bar baz");
        let caret = SelectionRange::caret(0);
        buffer.set_selection(caret);

        apply_value(StyleKey::FontSize, StyleValue::FontSize(SIZE), caret, &mut buffer);

        assert_eq!(
            buffer.typing_attribute(StyleKey::FontSize),
            StyleValue::FontSize(SIZE)
        );
        assert_ne!(font_size(&buffer, 0), SIZE);
        assert_eq!(buffer.runs(StyleKey::FontSize).run_count(), 1);
    }

    #[test]
    fn test_apply_at_end_of_document_caret() {
        let mut buffer = AttributedTextBuffer::new("foo");
        let before = buffer.clone();
        let caret = SelectionRange::caret(3);

        apply_value(StyleKey::Bold, StyleValue::Flag(true), caret, &mut buffer);

        assert_eq!(buffer.runs(StyleKey::Bold), before.runs(StyleKey::Bold));
        assert_eq!(buffer.get_text(), "foo");
        assert_eq!(buffer.typing_attribute(StyleKey::Bold), StyleValue::Flag(true));
    }

    #[test]
    fn test_stale_selection_is_clamped() {
        let mut buffer = AttributedTextBuffer::new("foo");
        let stale = SelectionRange::new(2, 40);

        apply_value(StyleKey::Italic, StyleValue::Flag(true), stale, &mut buffer);

        assert_eq!(buffer.attribute(StyleKey::Italic, 1), StyleValue::Flag(false));
        assert_eq!(buffer.attribute(StyleKey::Italic, 2), StyleValue::Flag(true));
        assert_eq!(
            effective_value(StyleKey::Italic, SelectionRange::new(99, 1), &buffer),
            buffer.typing_attribute(StyleKey::Italic)
        );
    }

    #[test]
    fn test_caret_reads_text_without_typing_reflection() {
        let mut buffer =
            AttributedTextBuffer::new("ab").with_typing_attribute_reflection(false);
        buffer.set_attribute(StyleKey::FontSize, StyleValue::FontSize(30.0), 1..2);
        buffer.set_typing_attribute(StyleKey::FontSize, StyleValue::FontSize(5.0));

        assert_eq!(
            effective_value(StyleKey::FontSize, SelectionRange::caret(1), &buffer),
            StyleValue::FontSize(30.0)
        );
        // End of text reads the last character.
        assert_eq!(
            effective_value(StyleKey::FontSize, SelectionRange::caret(2), &buffer),
            StyleValue::FontSize(30.0)
        );
    }

    #[test]
    fn test_paragraph_keys_expand_to_paragraphs() {
        let mut buffer = AttributedTextBuffer::new("one\ntwo\nthree");
        let caret = SelectionRange::caret(5);

        assert_eq!(target_range(StyleKey::IndentLevel, caret, &buffer), Some(4..8));
        assert_eq!(target_range(StyleKey::FontSize, caret, &buffer), None);

        apply_value(StyleKey::IndentLevel, StyleValue::Indent(30.0), caret, &mut buffer);
        assert_eq!(buffer.attribute(StyleKey::IndentLevel, 3), StyleValue::Indent(0.0));
        assert_eq!(buffer.attribute(StyleKey::IndentLevel, 4), StyleValue::Indent(30.0));
        assert_eq!(buffer.attribute(StyleKey::IndentLevel, 7), StyleValue::Indent(30.0));
        assert_eq!(buffer.attribute(StyleKey::IndentLevel, 8), StyleValue::Indent(0.0));
    }

    #[test]
    fn test_paragraph_ranges() {
        let buffer = AttributedTextBuffer::new("one\ntwo\nthree");
        assert_eq!(
            paragraph_ranges(SelectionRange::new(2, 8), &buffer),
            vec![0..4, 4..8, 8..13]
        );
        assert_eq!(paragraph_ranges(SelectionRange::caret(0), &buffer), vec![0..4]);

        let trailing = AttributedTextBuffer::new("abc\n");
        assert!(paragraph_ranges(SelectionRange::caret(4), &trailing).is_empty());
    }

    #[test]
    fn test_fragment_splits_on_attribute_changes() {
        let mut buffer = AttributedTextBuffer::new("foo bar baz");
        buffer.set_attribute(StyleKey::Bold, StyleValue::Flag(true), 4..7);
        buffer.set_attribute(StyleKey::Italic, StyleValue::Flag(true), 5..9);

        let fragment = fragment(SelectionRange::new(2, 6), &buffer);
        assert_eq!(fragment.text, "o bar ");
        let ranges: Vec<Range<usize>> = fragment.runs.iter().map(|r| r.range.clone()).collect();
        assert_eq!(ranges, vec![0..2, 2..3, 3..5, 5..6]);
        assert_eq!(
            fragment.runs[1].attributes.get(StyleKey::Bold),
            &StyleValue::Flag(true)
        );
        assert_eq!(
            fragment.runs[1].attributes.get(StyleKey::Italic),
            &StyleValue::Flag(false)
        );
        assert_eq!(
            fragment.runs[2].attributes.get(StyleKey::Italic),
            &StyleValue::Flag(true)
        );
        assert_eq!(
            fragment.runs[3].attributes.get(StyleKey::Bold),
            &StyleValue::Flag(false)
        );
    }

    #[test]
    fn test_fragment_of_caret_is_empty() {
        let buffer = AttributedTextBuffer::new("foo");
        assert_eq!(fragment(SelectionRange::caret(1), &buffer), RichTextFragment::default());
    }
}
