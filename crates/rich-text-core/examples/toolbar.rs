//! Toolbar example
//!
//! Drives a headless buffer the way a formatting toolbar would: buttons are enabled from
//! `can_trigger_rich_text_action`, clicks go through `trigger_rich_text_action`.
//!
//! Run with `RUST_LOG=rich_text_core=debug` to see the engine's log output.

use rich_text_core::{
    AttributedTextBuffer, RichTextAction, RichTextContext, RichTextStyle, SelectionRange,
    TextAlignment,
};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

const BUTTONS: [RichTextAction; 11] = [
    RichTextAction::Copy,
    RichTextAction::UndoLatestChange,
    RichTextAction::RedoLatestChange,
    RichTextAction::IncrementFontSize,
    RichTextAction::DecrementFontSize,
    RichTextAction::IncreaseIndent,
    RichTextAction::DecreaseIndent,
    RichTextAction::ToggleStyle(RichTextStyle::Bold),
    RichTextAction::ToggleStyle(RichTextStyle::Italic),
    RichTextAction::SetAlignment(TextAlignment::Center),
    RichTextAction::Print,
];

fn print_toolbar(context: &RichTextContext<AttributedTextBuffer>) {
    let buttons: Vec<String> = BUTTONS
        .iter()
        .map(|action| {
            if context.can_trigger_rich_text_action(*action) {
                format!("[{action}]")
            } else {
                format!(" {action} ")
            }
        })
        .collect();
    println!("  toolbar: {}", buttons.join(" "));

    let style = context.style();
    println!(
        "  style:   {} {}pt bold={} italic={} align={:?} indent={}",
        style.font_family(),
        style.font_size(),
        style.is_bold(),
        style.is_italic(),
        style.alignment(),
        context.current_indent_level(),
    );
}

fn click(context: &mut RichTextContext<AttributedTextBuffer>, action: RichTextAction) {
    println!("\n> {action}");
    context.trigger_rich_text_action(action);
    print_toolbar(context);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut context = RichTextContext::new(AttributedTextBuffer::new(
        "Rich text toolbar\nThe quick brown fox jumps over the lazy dog.",
    ));

    let changes = Arc::new(Mutex::new(0));
    let changes_clone = changes.clone();
    context.subscribe(move |change| {
        if let Ok(mut count) = changes_clone.lock() {
            *count += 1;
        }
        println!(
            "  changed: {} {:?} -> {:?} (version {} -> {})",
            change.key, change.old, change.new, change.old_version, change.new_version
        );
    });

    println!("Caret at start:");
    print_toolbar(&context);

    println!("\nSelect \"quick\":");
    context.set_selection(SelectionRange::new(22, 5));
    print_toolbar(&context);

    click(&mut context, RichTextAction::ToggleStyle(RichTextStyle::Bold));
    click(&mut context, RichTextAction::IncrementFontSize);
    click(&mut context, RichTextAction::IncreaseIndent);
    click(&mut context, RichTextAction::Copy);
    click(&mut context, RichTextAction::UndoLatestChange);
    click(&mut context, RichTextAction::RedoLatestChange);
    click(&mut context, RichTextAction::Print);

    if let Some(fragment) = context.clipboard().rich_text() {
        println!("\nClipboard: {:?} in {} run(s)", fragment.text, fragment.runs.len());
        if let Ok(json) = fragment.to_json() {
            println!("  {json}");
        }
    }

    if let Ok(count) = changes.lock() {
        println!("\n{count} style change notification(s)");
    }
}
