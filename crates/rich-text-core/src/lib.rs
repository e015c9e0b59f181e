#![warn(missing_docs)]
//! Rich Text Core - Headless Rich Text Action Engine
//!
//! # Overview
//!
//! `rich-text-core` keeps a formatting toolbar and an attributed text buffer in sync. It does
//! not render or lay out text: the host owns the text view and exposes it through
//! [`TextBufferAdapter`], and the engine decides what each toolbar action does to it.
//!
//! # Core Features
//!
//! - **Validated Actions**: every [`RichTextAction`] has a pure legality check, and triggering
//!   an illegal action is a no-op
//! - **Observable Style State**: [`StyleState`] mirrors the formatting at the selection, with
//!   versioning and change notifications
//! - **Range Resolution**: range selections format the selected text, a caret only changes the
//!   typing attributes, paragraph attributes widen to whole paragraphs
//! - **Undo/Redo**: every formatting change is one [`HistoryCheckpoint`], independent of any
//!   platform undo manager
//! - **Run Storage**: [`AttributedTextBuffer`] stores attributes as sorted, merged runs over a
//!   rope
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  RichTextContext (Action Engine)            │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  StyleState          │  HistoryController   │  ← Observable State / Undo
//! ├─────────────────────────────────────────────┤
//! │  Attribute Range Resolver                   │  ← Read/Write Targets
//! ├─────────────────────────────────────────────┤
//! │  TextBufferAdapter   │  ClipboardSink       │  ← Host Boundary
//! ├─────────────────────────────────────────────┤
//! │  AttributedTextBuffer (Rope + Runs)         │  ← Headless Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Triggering Actions
//!
//! ```rust
//! use rich_text_core::{
//!     AttributedTextBuffer, RichTextAction, RichTextContext, RichTextStyle, SelectionRange,
//! };
//!
//! let mut context = RichTextContext::new(AttributedTextBuffer::new("foo bar baz"));
//! context.set_selection(SelectionRange::new(4, 3));
//!
//! context.trigger_rich_text_action(RichTextAction::ToggleStyle(RichTextStyle::Bold));
//! assert!(context.style().is_bold());
//!
//! // Nothing to redo yet, so this is ignored.
//! assert!(!context.can_trigger_rich_text_action(RichTextAction::RedoLatestChange));
//! context.trigger_rich_text_action(RichTextAction::RedoLatestChange);
//! assert!(context.style().is_bold());
//! ```
//!
//! ## Observing Style Changes
//!
//! ```rust
//! use rich_text_core::{AttributedTextBuffer, RichTextAction, RichTextContext, StyleKey};
//!
//! let mut context = RichTextContext::new(AttributedTextBuffer::new("foo"));
//! context.subscribe(|change| {
//!     if change.key == StyleKey::FontSize {
//!         println!("font size: {:?} -> {:?}", change.old, change.new);
//!     }
//! });
//!
//! let version = context.style().version();
//! context.trigger_rich_text_action(RichTextAction::IncrementFontSize);
//! assert!(context.style().has_changed_since(version));
//! ```
//!
//! # Module Description
//!
//! - [`attributes`] - Style keys, values and attribute sets
//! - [`runs`] - Run-length attribute storage
//! - [`buffer`] - Text buffer boundary and the headless buffer
//! - [`resolver`] - Where attributes are read from and written to
//! - [`style_state`] - Observable style mirror
//! - [`history`] - Undo/redo checkpoints
//! - [`actions`] - The action set
//! - [`context`] - The action engine
//! - [`clipboard`] - Clipboard boundary and rich fragments
//! - [`config`] - Step sizes and clamps

pub mod actions;
pub mod attributes;
pub mod buffer;
pub mod clipboard;
pub mod config;
pub mod context;
mod error;
pub mod history;
pub mod resolver;
pub mod runs;
mod selection;
pub mod style_state;

pub use actions::{RichTextAction, RichTextStyle};
pub use attributes::{
    AttributeSet, Color, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, StyleKey, StyleValue,
    TextAlignment, VerticalPosition,
};
pub use buffer::{AttributedTextBuffer, TextBufferAdapter};
pub use clipboard::{ClipboardSink, FragmentRun, MemoryClipboard, RichTextFragment};
pub use config::RichTextConfig;
pub use context::RichTextContext;
pub use error::{ConfigError, RichTextError};
pub use history::{HistoryCheckpoint, HistoryController};
pub use runs::{AttributeRuns, Run};
pub use selection::SelectionRange;
pub use style_state::{StyleChange, StyleChangeCallback, StyleState};
