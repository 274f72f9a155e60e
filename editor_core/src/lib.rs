//! Pure editor logic for a small Python code editor.
//!
//! This crate holds everything that does not touch a window: the rope
//! text buffer, regex syntax highlighting, the line-number gutter, the
//! auto-indent and quote-pairing policies, prefix autocomplete and the
//! session object that ties them together. The UI crate forwards input
//! events here and renders the resulting state.

pub mod buffer;
pub mod complete;
pub mod editor;
pub mod error;
pub mod gutter;
pub mod indent;
pub mod pairing;
pub mod syntax;

pub use buffer::{Position, TextBuffer};
pub use complete::{AutocompleteEngine, CompletionState, Replacement};
pub use editor::{EditorSession, FontConfig};
pub use error::{EditorError, EditorResult};
pub use gutter::LineNumberTracker;
pub use indent::AutoIndentPolicy;
pub use pairing::{is_quote, quote_action, QuoteAction};
pub use syntax::{
    resolve_styles, HighlightEngine, HighlightSpan, Theme, TokenStyle,
};
