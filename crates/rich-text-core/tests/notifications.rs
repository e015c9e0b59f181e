use pretty_assertions::assert_eq;
use rich_text_core::{
    AttributedTextBuffer, DEFAULT_FONT_SIZE, RichTextAction, RichTextContext, SelectionRange,
    StyleChange, StyleKey, StyleValue, TextBufferAdapter,
};
use std::sync::{Arc, Mutex};

fn observed_context(
    text: &str,
) -> (RichTextContext<AttributedTextBuffer>, Arc<Mutex<Vec<StyleChange>>>) {
    let mut context = RichTextContext::new(AttributedTextBuffer::new(text));
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = changes.clone();
    context.subscribe(move |change| sink.lock().unwrap().push(change.clone()));
    (context, changes)
}

#[test]
fn test_font_size_change_is_notified_once() {
    let (mut context, changes) = observed_context("foo bar baz");
    context.set_selection(SelectionRange::new(4, 3));
    assert!(changes.lock().unwrap().is_empty());

    context.trigger_rich_text_action(RichTextAction::IncrementFontSize);

    let changes = changes.lock().unwrap();
    assert_eq!(
        *changes,
        vec![StyleChange {
            key: StyleKey::FontSize,
            old: StyleValue::FontSize(DEFAULT_FONT_SIZE),
            new: StyleValue::FontSize(DEFAULT_FONT_SIZE + 1.0),
            old_version: 0,
            new_version: 1,
        }]
    );
    assert_eq!(context.style().version(), 1);
}

#[test]
fn test_illegal_action_is_silent() {
    let (mut context, changes) = observed_context("foo");

    context.trigger_rich_text_action(RichTextAction::UndoLatestChange);
    context.trigger_rich_text_action(RichTextAction::DecreaseIndent);
    context.trigger_rich_text_action(RichTextAction::Print);

    assert!(changes.lock().unwrap().is_empty());
    assert_eq!(context.style().version(), 0);
}

#[test]
fn test_selection_change_notifies_only_on_difference() {
    let (mut context, changes) = observed_context("foo bar");
    context
        .buffer_mut()
        .set_attribute(StyleKey::Italic, StyleValue::Flag(true), 4..7);

    context.set_selection(SelectionRange::new(0, 3));
    assert!(changes.lock().unwrap().is_empty());

    context.set_selection(SelectionRange::new(4, 3));
    {
        let changes = changes.lock().unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].key, StyleKey::Italic);
        assert_eq!(changes[0].new, StyleValue::Flag(true));
    }

    let version = context.style().version();
    context.set_selection(SelectionRange::new(5, 2));
    assert!(!context.style().has_changed_since(version));
}

#[test]
fn test_undo_and_redo_notify() {
    let (mut context, changes) = observed_context("foo");
    context.set_selection(SelectionRange::new(0, 3));
    context.trigger_rich_text_action(RichTextAction::IncrementFontSize);

    context.trigger_rich_text_action(RichTextAction::UndoLatestChange);
    context.trigger_rich_text_action(RichTextAction::RedoLatestChange);

    let sizes: Vec<(StyleValue, StyleValue)> = changes
        .lock()
        .unwrap()
        .iter()
        .map(|change| (change.old.clone(), change.new.clone()))
        .collect();
    let (small, large) = (
        StyleValue::FontSize(DEFAULT_FONT_SIZE),
        StyleValue::FontSize(DEFAULT_FONT_SIZE + 1.0),
    );
    assert_eq!(
        sizes,
        vec![
            (small.clone(), large.clone()),
            (large.clone(), small.clone()),
            (small, large),
        ]
    );
    assert_eq!(context.style().version(), 3);
}
