//! Regex-driven syntax highlighter.
//!
//! The engine re-scans the full document text on every edit and rebuilds
//! the span set wholesale; nothing is patched incrementally. Passes run in
//! a fixed order (comments, strings, keywords, builtins). Later passes do
//! not exclude ranges tagged by earlier ones, so a keyword inside a string
//! or comment is tagged twice; where spans overlap, the later tag wins
//! when rendering. This mirrors the reference behavior and is kept as-is.

use regex::Regex;

use super::language::{BUILTINS, KEYWORDS};
use super::theme::TokenStyle;

/// A highlighted span: a token style over a byte range of the flattened
/// document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub style: TokenStyle,
    /// Start byte offset in the source.
    pub start: usize,
    /// End byte offset in the source (exclusive).
    pub end: usize,
}

/// Full-text scanner classifying spans into token categories.
///
/// Scanning is a pure function of the document text: the same input always
/// yields the same span set. Cost is O(document length x pattern count),
/// acceptable for editor-sized buffers.
pub struct HighlightEngine {
    comment: Regex,
    string: Regex,
    keywords: Vec<Regex>,
    builtins: Vec<Regex>,
}

impl HighlightEngine {
    /// Compiles the fixed pattern set.
    pub fn new() -> Self {
        let word = |w: &str| {
            Regex::new(&format!(r"\b{w}\b")).expect("static keyword pattern must compile")
        };
        Self {
            // `#` to end of line; no quoting-awareness inside comments.
            comment: Regex::new(r"#.*").expect("static comment pattern must compile"),
            // Single- or double-quoted runs, backslash escapes tolerated.
            // Quotes never pair across a newline.
            string: Regex::new(r#"'(?:\\.|[^'\\\n])*'|"(?:\\.|[^"\\\n])*""#)
                .expect("static string pattern must compile"),
            keywords: KEYWORDS.iter().map(|k| word(k)).collect(),
            builtins: BUILTINS.iter().map(|b| word(b)).collect(),
        }
    }

    /// Scans the full document text and returns the fresh span set,
    /// replacing whatever the caller held before.
    pub fn scan(&self, text: &str) -> Vec<HighlightSpan> {
        let mut spans = Vec::new();

        for m in self.comment.find_iter(text) {
            spans.push(HighlightSpan {
                style: TokenStyle::Comment,
                start: m.start(),
                end: m.end(),
            });
        }
        for m in self.string.find_iter(text) {
            spans.push(HighlightSpan {
                style: TokenStyle::String,
                start: m.start(),
                end: m.end(),
            });
        }
        for re in &self.keywords {
            for m in re.find_iter(text) {
                spans.push(HighlightSpan {
                    style: TokenStyle::Keyword,
                    start: m.start(),
                    end: m.end(),
                });
            }
        }
        for re in &self.builtins {
            for m in re.find_iter(text) {
                spans.push(HighlightSpan {
                    style: TokenStyle::Builtin,
                    start: m.start(),
                    end: m.end(),
                });
            }
        }

        spans
    }
}

impl Default for HighlightEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Flattens a span set into a per-byte style map of the given text length.
/// Spans are applied in order, so a later span overwrites an earlier one
/// where they overlap.
pub fn resolve_styles(spans: &[HighlightSpan], text_len: usize) -> Vec<Option<TokenStyle>> {
    let mut styles = vec![None; text_len];
    for span in spans {
        let end = span.end.min(text_len);
        for slot in &mut styles[span.start.min(text_len)..end] {
            *slot = Some(span.style);
        }
    }
    styles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_of(text: &str, style: TokenStyle) -> Vec<(usize, usize)> {
        HighlightEngine::new()
            .scan(text)
            .into_iter()
            .filter(|s| s.style == style)
            .map(|s| (s.start, s.end))
            .collect()
    }

    #[test]
    fn test_comment_to_end_of_line() {
        assert_eq!(spans_of("x = 1  # note\ny = 2", TokenStyle::Comment), vec![(7, 13)]);
    }

    #[test]
    fn test_string_spans() {
        assert_eq!(spans_of(r#"a = "hi" + 'yo'"#, TokenStyle::String), vec![(4, 8), (11, 15)]);
    }

    #[test]
    fn test_string_with_escaped_quote() {
        assert_eq!(spans_of(r#"s = "a\"b""#, TokenStyle::String), vec![(4, 10)]);
    }

    #[test]
    fn test_string_never_crosses_newline() {
        assert_eq!(spans_of("s = 'a\nb'", TokenStyle::String), vec![]);
        // An unclosed quote on one line must not pair with a quote on
        // the next.
        assert_eq!(
            spans_of("x = \"a\ny = \"b\"", TokenStyle::String),
            vec![(11, 14)]
        );
    }

    #[test]
    fn test_keyword_whole_word_only() {
        // `for` inside `format` must not match.
        assert_eq!(spans_of("format", TokenStyle::Keyword), vec![]);
        assert_eq!(spans_of("for x in y", TokenStyle::Keyword), vec![(0, 3), (6, 8)]);
    }

    #[test]
    fn test_builtin_spans() {
        assert_eq!(spans_of("print(len(x))", TokenStyle::Builtin), vec![(0, 5), (6, 9)]);
    }

    #[test]
    fn test_keyword_inside_comment_double_tagged() {
        // Keyword and builtin passes scan the whole text, including ranges
        // already tagged as comment or string.
        let text = r#"# a "b" for"#;
        let spans = HighlightEngine::new().scan(text);
        assert!(spans
            .iter()
            .any(|s| s.style == TokenStyle::Comment && s.start == 0 && s.end == text.len()));
        assert!(spans
            .iter()
            .any(|s| s.style == TokenStyle::Keyword && s.start == 8 && s.end == 11));
    }

    #[test]
    fn test_keyword_inside_string_double_tagged() {
        let spans = HighlightEngine::new().scan(r#"s = "for""#);
        assert!(spans.iter().any(|s| s.style == TokenStyle::String));
        assert!(spans
            .iter()
            .any(|s| s.style == TokenStyle::Keyword && s.start == 5 && s.end == 8));
    }

    #[test]
    fn test_scan_is_idempotent() {
        let engine = HighlightEngine::new();
        let text = "def f():\n    return \"x\"  # done\n";
        assert_eq!(engine.scan(text), engine.scan(text));
    }

    #[test]
    fn test_resolve_styles_later_span_wins() {
        let text = r#"# a "b" for"#;
        let spans = HighlightEngine::new().scan(text);
        let styles = resolve_styles(&spans, text.len());
        // The keyword pass runs after the comment pass, so `for` shows as
        // a keyword even though it sits inside the comment span.
        assert_eq!(styles[8], Some(TokenStyle::Keyword));
        assert_eq!(styles[1], Some(TokenStyle::Comment));
    }

    #[test]
    fn test_resolve_styles_plain_text_untagged() {
        let text = "plain words";
        let spans = HighlightEngine::new().scan(text);
        let styles = resolve_styles(&spans, text.len());
        assert!(styles.iter().all(|s| s.is_none()));
    }
}
