//! Rich text actions.
//!
//! [`RichTextAction`] is the closed set of user-triggerable actions. Actions carry no payload
//! beyond their tag: step sizes and clamps live in [`RichTextConfig`](crate::RichTextConfig).
//! Both [`can_trigger_rich_text_action`](crate::RichTextContext::can_trigger_rich_text_action)
//! and [`trigger_rich_text_action`](crate::RichTextContext::trigger_rich_text_action) match
//! exhaustively, so a new variant must be handled in both.

use crate::attributes::{StyleKey, TextAlignment};
use std::fmt;

/// Boolean character style that can be toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RichTextStyle {
    /// Bold weight.
    Bold,
    /// Italic slant.
    Italic,
    /// Underline.
    Underlined,
    /// Strikethrough.
    Strikethrough,
}

impl RichTextStyle {
    /// All styles.
    pub const ALL: [RichTextStyle; 4] = [
        RichTextStyle::Bold,
        RichTextStyle::Italic,
        RichTextStyle::Underlined,
        RichTextStyle::Strikethrough,
    ];

    /// Attribute key backing this style.
    pub const fn key(self) -> StyleKey {
        match self {
            RichTextStyle::Bold => StyleKey::Bold,
            RichTextStyle::Italic => StyleKey::Italic,
            RichTextStyle::Underlined => StyleKey::Underline,
            RichTextStyle::Strikethrough => StyleKey::Strikethrough,
        }
    }
}

/// User-triggerable rich text action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RichTextAction {
    /// Copy the selected text to the clipboard.
    Copy,
    /// Make the text input surface give up focus.
    DismissKeyboard,
    /// Increase the font size by one configured step.
    IncrementFontSize,
    /// Decrease the font size by one configured step.
    DecrementFontSize,
    /// Indent the selected paragraphs by one configured step.
    IncreaseIndent,
    /// Outdent the selected paragraphs by one configured step.
    DecreaseIndent,
    /// Print the document (handled by the host, never triggerable here).
    Print,
    /// Redo the latest undone change.
    RedoLatestChange,
    /// Undo the latest change.
    UndoLatestChange,
    /// Toggle a boolean character style.
    ToggleStyle(RichTextStyle),
    /// Set the alignment of the selected paragraphs.
    SetAlignment(TextAlignment),
    /// Toggle superscript on or off.
    ToggleSuperscript,
    /// Toggle subscript on or off.
    ToggleSubscript,
}

impl RichTextAction {
    /// The basic action set, without style, alignment and baseline actions.
    pub const ALL_BASIC: [RichTextAction; 9] = [
        RichTextAction::Copy,
        RichTextAction::DismissKeyboard,
        RichTextAction::IncrementFontSize,
        RichTextAction::DecrementFontSize,
        RichTextAction::IncreaseIndent,
        RichTextAction::DecreaseIndent,
        RichTextAction::Print,
        RichTextAction::RedoLatestChange,
        RichTextAction::UndoLatestChange,
    ];

    /// Whether the action can change the buffer.
    pub const fn is_mutating(&self) -> bool {
        !matches!(
            self,
            RichTextAction::Copy | RichTextAction::DismissKeyboard | RichTextAction::Print
        )
    }
}

impl fmt::Display for RichTextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RichTextAction::Copy => f.write_str("copy"),
            RichTextAction::DismissKeyboard => f.write_str("dismiss-keyboard"),
            RichTextAction::IncrementFontSize => f.write_str("increment-font-size"),
            RichTextAction::DecrementFontSize => f.write_str("decrement-font-size"),
            RichTextAction::IncreaseIndent => f.write_str("increase-indent"),
            RichTextAction::DecreaseIndent => f.write_str("decrease-indent"),
            RichTextAction::Print => f.write_str("print"),
            RichTextAction::RedoLatestChange => f.write_str("redo"),
            RichTextAction::UndoLatestChange => f.write_str("undo"),
            RichTextAction::ToggleStyle(style) => write!(f, "toggle-{}", style.key()),
            RichTextAction::SetAlignment(alignment) => {
                write!(f, "align-{}", format!("{alignment:?}").to_lowercase())
            }
            RichTextAction::ToggleSuperscript => f.write_str("toggle-superscript"),
            RichTextAction::ToggleSubscript => f.write_str("toggle-subscript"),
        }
    }
}
