use pretty_assertions::assert_eq;
use rich_text_core::{
    AttributedTextBuffer, RichTextAction, RichTextContext, RichTextStyle, SelectionRange,
    StyleKey, StyleValue, TextBufferAdapter,
};

fn context(text: &str) -> RichTextContext<AttributedTextBuffer> {
    RichTextContext::new(AttributedTextBuffer::new(text))
}

fn bold_at(context: &RichTextContext<AttributedTextBuffer>, offset: usize) -> bool {
    context
        .buffer()
        .attribute(StyleKey::Bold, offset)
        .as_flag()
        .unwrap()
}

#[test]
fn test_caret_toggle_applies_to_typed_text_only() {
    let mut context = context("foo bar");
    context.set_selection(SelectionRange::caret(3));

    context.trigger_rich_text_action(RichTextAction::ToggleStyle(RichTextStyle::Bold));
    assert!(context.style().is_bold());
    assert!((0..7).all(|offset| !bold_at(&context, offset)));

    context.buffer_mut().insert_text("!!");
    context.handle_selection_change();

    assert_eq!(context.buffer().get_text(), "foo!! bar");
    assert!(!bold_at(&context, 2));
    assert!(bold_at(&context, 3));
    assert!(bold_at(&context, 4));
    assert!(!bold_at(&context, 5));
    assert!(context.style().is_bold());
}

#[test]
fn test_moving_the_caret_drops_pending_typing_attributes() {
    let mut context = context("foo bar");
    context.set_selection(SelectionRange::caret(3));
    context.trigger_rich_text_action(RichTextAction::ToggleStyle(RichTextStyle::Bold));

    context.set_selection(SelectionRange::caret(1));

    assert!(!context.style().is_bold());
    assert!((0..7).all(|offset| !bold_at(&context, offset)));
}

#[test]
fn test_range_selection_also_sets_typing_attributes() {
    let mut context = context("foo bar baz");
    context.set_selection(SelectionRange::new(4, 3));
    context.trigger_rich_text_action(RichTextAction::IncrementFontSize);
    let size = context.style().font_size();

    assert_eq!(
        context.buffer().typing_attribute(StyleKey::FontSize),
        StyleValue::FontSize(size)
    );

    context.buffer_mut().insert_text("qux");
    context.handle_selection_change();
    assert_eq!(context.buffer().get_text(), "foo qux baz");
    assert_eq!(
        context.buffer().attribute(StyleKey::FontSize, 5),
        StyleValue::FontSize(size)
    );
    assert_ne!(
        context.buffer().attribute(StyleKey::FontSize, 8),
        StyleValue::FontSize(size)
    );
}

#[test]
fn test_caret_reflects_text_without_typing_attribute_reflection() {
    let mut buffer = AttributedTextBuffer::new("ab").with_typing_attribute_reflection(false);
    buffer.set_attribute(StyleKey::FontSize, StyleValue::FontSize(30.0), 1..2);
    let mut context = RichTextContext::new(buffer);

    context.set_selection(SelectionRange::caret(1));
    assert_eq!(context.style().font_size(), 30.0);

    context.trigger_rich_text_action(RichTextAction::IncrementFontSize);

    assert_eq!(
        context.buffer().typing_attribute(StyleKey::FontSize),
        StyleValue::FontSize(31.0)
    );
    assert_eq!(
        context.buffer().attribute(StyleKey::FontSize, 1),
        StyleValue::FontSize(30.0)
    );
    // The mirror keeps showing the text at the caret.
    assert_eq!(context.style().font_size(), 30.0);
}
