//! Prefix autocomplete over a fixed vocabulary.

use regex::Regex;

use crate::syntax::completion_vocabulary;

/// Whether the completion popup is showing, and for what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionState {
    /// No popup.
    Idle,
    /// Popup visible for the word prefix ending at the cursor.
    Suggesting {
        prefix: String,
        candidates: Vec<String>,
    },
}

/// Edit to perform when a candidate is accepted: delete the typed prefix
/// (`delete_chars` characters before the cursor) and insert the full word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub delete_chars: usize,
    pub insert: String,
}

/// Case-sensitive prefix matcher over a sorted, deduplicated word list.
///
/// A suggestion session only starts from `refresh`, which the editor
/// calls after content-changing keystrokes. Cursor movement calls
/// `reevaluate`, which updates or ends an open session but never starts
/// one, so clicking into the middle of a word does not pop suggestions.
pub struct AutocompleteEngine {
    vocabulary: Vec<String>,
    trailing_word: Regex,
    state: CompletionState,
}

impl AutocompleteEngine {
    /// Builds an engine over the given words, sorted and deduplicated.
    pub fn new(vocabulary: impl IntoIterator<Item = String>) -> Self {
        let vocabulary: Vec<String> = vocabulary
            .into_iter()
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        Self {
            vocabulary,
            trailing_word: Regex::new(r"\w+$").expect("static word pattern must compile"),
            state: CompletionState::Idle,
        }
    }

    /// Engine over the builtin Python vocabulary.
    pub fn with_default_vocabulary() -> Self {
        Self::new(completion_vocabulary())
    }

    pub fn state(&self) -> &CompletionState {
        &self.state
    }

    pub fn is_suggesting(&self) -> bool {
        matches!(self.state, CompletionState::Suggesting { .. })
    }

    /// Candidates of the open session, empty when idle.
    pub fn candidates(&self) -> &[String] {
        match &self.state {
            CompletionState::Suggesting { candidates, .. } => candidates,
            CompletionState::Idle => &[],
        }
    }

    /// Prefix of the open session, if any.
    pub fn prefix(&self) -> Option<&str> {
        match &self.state {
            CompletionState::Suggesting { prefix, .. } => Some(prefix),
            CompletionState::Idle => None,
        }
    }

    /// Recomputes suggestions after a content change, given the current
    /// line's text up to the cursor. May open a session.
    pub fn refresh(&mut self, line_to_cursor: &str) {
        self.state = self.evaluate(line_to_cursor);
    }

    /// Recomputes suggestions after cursor movement. Only has an effect
    /// when a session is already open.
    pub fn reevaluate(&mut self, line_to_cursor: &str) {
        if self.is_suggesting() {
            self.state = self.evaluate(line_to_cursor);
        }
    }

    /// Accepts a candidate, ending the session. Returns the buffer edit
    /// to perform, or None when no session is open.
    pub fn apply(&mut self, candidate: &str) -> Option<Replacement> {
        let replacement = match &self.state {
            CompletionState::Suggesting { prefix, .. } => Some(Replacement {
                delete_chars: prefix.chars().count(),
                insert: candidate.to_string(),
            }),
            CompletionState::Idle => None,
        };
        self.state = CompletionState::Idle;
        replacement
    }

    /// Dismisses any open session without editing.
    pub fn cancel(&mut self) {
        self.state = CompletionState::Idle;
    }

    fn evaluate(&self, line_to_cursor: &str) -> CompletionState {
        let Some(m) = self.trailing_word.find(line_to_cursor) else {
            return CompletionState::Idle;
        };
        let prefix = m.as_str();
        let candidates: Vec<String> = self
            .vocabulary
            .iter()
            .filter(|w| w.starts_with(prefix))
            .cloned()
            .collect();
        if candidates.is_empty() {
            CompletionState::Idle
        } else {
            CompletionState::Suggesting {
                prefix: prefix.to_string(),
                candidates,
            }
        }
    }
}

impl Default for AutocompleteEngine {
    fn default() -> Self {
        Self::with_default_vocabulary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(words: &[&str]) -> AutocompleteEngine {
        AutocompleteEngine::new(words.iter().map(|w| w.to_string()))
    }

    #[test]
    fn test_prefix_matches_sorted() {
        let mut engine = engine(&["from", "format", "for"]);
        engine.refresh("fo");
        assert_eq!(engine.candidates(), ["for", "format"]);
        assert_eq!(engine.prefix(), Some("fo"));
    }

    #[test]
    fn test_no_trailing_word_stays_idle() {
        let mut engine = engine(&["for"]);
        engine.refresh("x = ");
        assert!(!engine.is_suggesting());
        engine.refresh("");
        assert!(!engine.is_suggesting());
    }

    #[test]
    fn test_no_matches_stays_idle() {
        let mut engine = engine(&["for", "while"]);
        engine.refresh("zzz");
        assert!(!engine.is_suggesting());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let mut engine = engine(&["False", "for"]);
        engine.refresh("Fa");
        assert_eq!(engine.candidates(), ["False"]);
        engine.refresh("fa");
        assert!(!engine.is_suggesting());
    }

    #[test]
    fn test_reevaluate_never_opens_a_session() {
        let mut engine = engine(&["for"]);
        engine.reevaluate("fo");
        assert!(!engine.is_suggesting());
    }

    #[test]
    fn test_reevaluate_updates_open_session() {
        let mut engine = engine(&["for", "while"]);
        engine.refresh("fo");
        assert!(engine.is_suggesting());
        // Cursor moved after "wh" somewhere else on the line.
        engine.reevaluate("x = wh");
        assert_eq!(engine.candidates(), ["while"]);
        // Cursor moved off any word.
        engine.reevaluate("x = ");
        assert!(!engine.is_suggesting());
    }

    #[test]
    fn test_apply_returns_replacement_and_resets() {
        let mut engine = engine(&["format", "for"]);
        engine.refresh("fo");
        let replacement = engine.apply("format").unwrap();
        assert_eq!(
            replacement,
            Replacement {
                delete_chars: 2,
                insert: "format".to_string()
            }
        );
        assert!(!engine.is_suggesting());
    }

    #[test]
    fn test_apply_when_idle_is_none() {
        let mut engine = engine(&["for"]);
        assert_eq!(engine.apply("for"), None);
    }

    #[test]
    fn test_default_vocabulary_scenario() {
        let mut engine = AutocompleteEngine::with_default_vocabulary();
        engine.refresh("    fo");
        assert_eq!(engine.candidates(), ["for"]);
        engine.refresh("pri");
        assert_eq!(engine.candidates(), ["print"]);
    }
}
