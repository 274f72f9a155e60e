//! The fixed Python word sets driving highlighting and autocomplete.

use std::collections::BTreeSet;

/// Python keywords, matched whole-word by the highlighter.
pub const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
    "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
    "with", "yield",
];

/// Builtin names highlighted in their own color.
pub const BUILTINS: &[&str] = &[
    "print", "len", "range", "int", "str", "float", "list", "dict", "set", "tuple", "input",
];

/// Extra words offered by autocomplete beyond keywords and builtins.
const COMPLETION_EXTRAS: &[&str] = &["open"];

/// Builds the completion vocabulary: keywords, builtins and extras,
/// deduplicated and sorted ascending. Fixed at startup, never mutated.
pub fn completion_vocabulary() -> Vec<String> {
    KEYWORDS
        .iter()
        .chain(BUILTINS.iter())
        .chain(COMPLETION_EXTRAS.iter())
        .map(|w| (*w).to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
