//! Quote pairing on keystroke.

/// What a quote keystroke should do, decided from the character after
/// the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteAction {
    /// The same quote already sits after the cursor; move over it
    /// without inserting anything.
    SkipOver,
    /// Insert an opening and closing pair and park the cursor between
    /// them.
    InsertPair,
}

/// True for the characters that trigger pairing. Only quotes pair;
/// brackets and parentheses insert as plain text.
pub fn is_quote(ch: char) -> bool {
    ch == '\'' || ch == '"'
}

/// Decides how to handle typing `typed` when `next` is the character
/// directly after the cursor. The decision is purely local; no quote
/// balance is tracked, so typing a quote before an existing identical
/// quote always skips, even when that breaks nesting intent.
pub fn quote_action(typed: char, next: Option<char>) -> QuoteAction {
    debug_assert!(is_quote(typed));
    if next == Some(typed) {
        QuoteAction::SkipOver
    } else {
        QuoteAction::InsertPair
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_quote() {
        assert!(is_quote('\''));
        assert!(is_quote('"'));
        assert!(!is_quote('('));
        assert!(!is_quote('`'));
    }

    #[test]
    fn test_pair_when_next_differs() {
        assert_eq!(quote_action('"', Some('x')), QuoteAction::InsertPair);
        assert_eq!(quote_action('"', None), QuoteAction::InsertPair);
        // A different quote kind does not trigger skip.
        assert_eq!(quote_action('"', Some('\'')), QuoteAction::InsertPair);
    }

    #[test]
    fn test_skip_over_matching_quote() {
        assert_eq!(quote_action('"', Some('"')), QuoteAction::SkipOver);
        assert_eq!(quote_action('\'', Some('\'')), QuoteAction::SkipOver);
    }
}
