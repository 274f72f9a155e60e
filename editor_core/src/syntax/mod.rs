//! Syntax highlighting: regex scanning, the Python word sets and the
//! color theme.

mod highlighter;
mod language;
mod theme;

pub use highlighter::{resolve_styles, HighlightEngine, HighlightSpan};
pub use language::{completion_vocabulary, BUILTINS, KEYWORDS};
pub use theme::{Color, Theme, TokenStyle};
