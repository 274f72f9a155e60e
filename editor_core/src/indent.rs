//! Automatic indentation on newline.

use regex::Regex;

/// Copies the current line's leading whitespace onto the next line when
/// Enter is pressed. Whitespace is copied verbatim, tabs included; no
/// language analysis (colons, brackets) is involved.
pub struct AutoIndentPolicy {
    leading: Regex,
}

impl AutoIndentPolicy {
    pub fn new() -> Self {
        Self {
            leading: Regex::new(r"^\s*").expect("static indent pattern must compile"),
        }
    }

    /// Text to insert at the cursor for a newline keystroke, given the
    /// current line's content up to the cursor.
    pub fn newline_insertion(&self, line_to_cursor: &str) -> String {
        let indent = self
            .leading
            .find(line_to_cursor)
            .map(|m| m.as_str())
            .unwrap_or("");
        format!("\n{indent}")
    }
}

impl Default for AutoIndentPolicy {
    fn default() -> Self {
        Self::new()
    }
}
