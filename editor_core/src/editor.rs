//! Editor session: wires the buffer, highlighter, gutter and the input
//! policies together behind a single keystroke-level API.
//!
//! Every content-changing operation funnels through `after_edit`, which
//! re-scans highlighting, refreshes the gutter and (when enabled) updates
//! autocomplete. The UI layer only forwards input events and renders the
//! resulting state.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::buffer::{Position, TextBuffer};
use crate::complete::AutocompleteEngine;
use crate::error::{EditorError, EditorResult};
use crate::gutter::LineNumberTracker;
use crate::indent::AutoIndentPolicy;
use crate::pairing::{is_quote, quote_action, QuoteAction};
use crate::syntax::{HighlightEngine, HighlightSpan};

/// Name used when running an unsaved buffer.
const SCRATCH_RUN_FILE: &str = "temp_code.py";

/// Editor font settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontConfig {
    pub family: String,
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "Consolas".to_string(),
            size: 14,
        }
    }
}

impl FontConfig {
    /// Parses a user-entered size string. A non-integer size is an error
    /// and the caller keeps its previous font.
    pub fn parse_size(family: &str, size_str: &str) -> EditorResult<Self> {
        let size: u32 = size_str
            .trim()
            .parse()
            .map_err(|_| EditorError::FontParse(size_str.to_string()))?;
        Ok(Self {
            family: family.to_string(),
            size,
        })
    }
}

/// A single open document with all its derived editing state.
pub struct EditorSession {
    buffer: TextBuffer,
    highlighter: HighlightEngine,
    spans: Vec<HighlightSpan>,
    gutter: LineNumberTracker,
    indent: AutoIndentPolicy,
    completer: AutocompleteEngine,
    completion_enabled: bool,
    file_path: Option<PathBuf>,
    modified: bool,
    font: FontConfig,
}

impl EditorSession {
    pub fn new() -> Self {
        let mut session = Self {
            buffer: TextBuffer::new(),
            highlighter: HighlightEngine::new(),
            spans: Vec::new(),
            gutter: LineNumberTracker::new(),
            indent: AutoIndentPolicy::new(),
            completer: AutocompleteEngine::with_default_vocabulary(),
            completion_enabled: true,
            file_path: None,
            modified: false,
            font: FontConfig::default(),
        };
        session.gutter.refresh(&session.buffer);
        session
    }

    // ==================== State access ====================

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Highlight spans for the current document text.
    pub fn spans(&self) -> &[HighlightSpan] {
        &self.spans
    }

    pub fn gutter(&self) -> &LineNumberTracker {
        &self.gutter
    }

    pub fn completer(&self) -> &AutocompleteEngine {
        &self.completer
    }

    pub fn cursor(&self) -> Position {
        self.buffer.cursor()
    }

    pub fn font(&self) -> &FontConfig {
        &self.font
    }

    pub fn set_font(&mut self, font: FontConfig) {
        info!("font changed to {} {}", font.family, font.size);
        self.font = font;
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Toggles autocomplete. Disabling dismisses any open suggestion.
    pub fn set_completion_enabled(&mut self, enabled: bool) {
        self.completion_enabled = enabled;
        if !enabled {
            self.completer.cancel();
        }
    }

    /// Status bar text for the current cursor. Columns display 1-indexed.
    pub fn status_line(&self) -> String {
        let cursor = self.buffer.cursor();
        format!("Ln {}, Col {}", cursor.line, cursor.column + 1)
    }

    // ==================== File operations ====================

    /// Replaces the document with an empty one.
    pub fn new_file(&mut self) {
        info!("new file");
        self.buffer = TextBuffer::new();
        self.file_path = None;
        self.modified = false;
        self.completer.cancel();
        self.after_edit(false);
    }

    /// Replaces the document with a file's content.
    pub fn open_file(&mut self, path: &Path) -> EditorResult<()> {
        info!("opening {}", path.display());
        self.buffer = TextBuffer::from_file(path)?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        self.completer.cancel();
        self.after_edit(false);
        Ok(())
    }

    /// Saves to the session's path. Fails when no path is set; the caller
    /// is expected to fall back to a save-as dialog.
    pub fn save(&mut self) -> EditorResult<()> {
        let path = self.file_path.clone().ok_or_else(|| {
            EditorError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no file path set",
            ))
        })?;
        self.buffer.save_to_file(&path)?;
        info!("saved {}", path.display());
        self.modified = false;
        Ok(())
    }

    /// Saves to a new path and adopts it as the session's path.
    pub fn save_as(&mut self, path: &Path) -> EditorResult<()> {
        self.buffer.save_to_file(path)?;
        info!("saved {}", path.display());
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Saves the document so it can be executed, and returns the path to
    /// run. An unsaved buffer is written to a scratch file in the system
    /// temp directory, which then becomes the session's path.
    pub fn prepare_run(&mut self) -> EditorResult<PathBuf> {
        if self.file_path.is_none() {
            let scratch = std::env::temp_dir().join(SCRATCH_RUN_FILE);
            info!("running unsaved buffer via {}", scratch.display());
            self.file_path = Some(scratch);
        }
        self.save()?;
        // save() succeeded, so the path is set.
        Ok(self.file_path.clone().unwrap_or_default())
    }

    // ==================== Editing ====================

    /// Handles a printable character keystroke. Quotes go through the
    /// pairing policy; everything else inserts verbatim.
    pub fn type_char(&mut self, ch: char) -> EditorResult<()> {
        if is_quote(ch) {
            match quote_action(ch, self.buffer.char_after_cursor()) {
                QuoteAction::SkipOver => {
                    // No content change, so no rescan. The cursor still
                    // moved, so an open suggestion must re-evaluate; it
                    // now sits after the quote and dismisses.
                    self.buffer.move_right();
                    self.completer.reevaluate(&self.buffer.line_to_cursor());
                    return Ok(());
                }
                QuoteAction::InsertPair => {
                    let pair: String = [ch, ch].iter().collect();
                    self.buffer.insert_at(self.buffer.cursor(), &pair)?;
                    self.buffer.move_left();
                    self.modified = true;
                    self.after_edit(true);
                    return Ok(());
                }
            }
        }
        self.buffer.insert_at(self.buffer.cursor(), &ch.to_string())?;
        self.modified = true;
        self.after_edit(true);
        Ok(())
    }

    /// Handles Enter: newline plus the current line's leading whitespace.
    pub fn insert_newline(&mut self) -> EditorResult<()> {
        let insertion = self.indent.newline_insertion(&self.buffer.line_to_cursor());
        self.buffer.insert_at(self.buffer.cursor(), &insertion)?;
        self.modified = true;
        self.after_edit(true);
        Ok(())
    }

    /// Handles Tab: four spaces.
    pub fn insert_tab(&mut self) -> EditorResult<()> {
        self.buffer.insert_at(self.buffer.cursor(), "    ")?;
        self.modified = true;
        self.after_edit(true);
        Ok(())
    }

    pub fn delete_backward(&mut self) {
        if self.buffer.delete_backward() {
            self.modified = true;
            self.after_edit(true);
        }
    }

    pub fn delete_forward(&mut self) {
        if self.buffer.delete_forward() {
            self.modified = true;
            self.after_edit(true);
        }
    }

    // ==================== Completion ====================

    /// Accepts a completion candidate: the typed prefix before the cursor
    /// is replaced with the full word. Does not retrigger a suggestion.
    pub fn apply_completion(&mut self, candidate: &str) -> EditorResult<()> {
        let Some(replacement) = self.completer.apply(candidate) else {
            return Ok(());
        };
        let cursor = self.buffer.cursor();
        debug!("completing {:?} at {:?}", replacement.insert, cursor);
        let start = Position::new(cursor.line, cursor.column - replacement.delete_chars);
        self.buffer.delete_range(start, cursor)?;
        self.buffer.insert_at(start, &replacement.insert)?;
        self.modified = true;
        self.after_edit(false);
        Ok(())
    }

    pub fn cancel_completion(&mut self) {
        self.completer.cancel();
    }

    // ==================== Cursor movement ====================

    pub fn move_left(&mut self) {
        self.buffer.move_left();
        self.completer.reevaluate(&self.buffer.line_to_cursor());
    }

    pub fn move_right(&mut self) {
        self.buffer.move_right();
        self.completer.reevaluate(&self.buffer.line_to_cursor());
    }

    pub fn move_up(&mut self) {
        self.buffer.move_up();
        self.completer.reevaluate(&self.buffer.line_to_cursor());
    }

    pub fn move_down(&mut self) {
        self.buffer.move_down();
        self.completer.reevaluate(&self.buffer.line_to_cursor());
    }

    /// Places the cursor from a mouse click, clamping to the document.
    pub fn click_at(&mut self, line: usize, column: usize) {
        self.buffer.set_cursor(Position::new(line, column));
        self.completer.reevaluate(&self.buffer.line_to_cursor());
    }

    // ==================== Derived state ====================

    /// Refreshes everything derived from the document text. Runs after
    /// every content change; `trigger_completion` is false for edits that
    /// must not open a suggestion popup (file loads, accepted completions).
    fn after_edit(&mut self, trigger_completion: bool) {
        self.spans = self.highlighter.scan(&self.buffer.text());
        self.gutter.refresh(&self.buffer);
        if self.completion_enabled && trigger_completion {
            self.completer.refresh(&self.buffer.line_to_cursor());
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::TokenStyle;

    fn type_str(session: &mut EditorSession, text: &str) {
        for ch in text.chars() {
            session.type_char(ch).unwrap();
        }
    }

    #[test]
    fn test_typing_updates_all_derived_state() {
        let mut session = EditorSession::new();
        type_str(&mut session, "for");
        assert_eq!(session.buffer().text(), "for");
        assert!(session
            .spans()
            .iter()
            .any(|s| s.style == TokenStyle::Keyword));
        assert_eq!(session.gutter().count(), 1);
        assert!(session.is_modified());
        assert_eq!(session.completer().candidates(), ["for"]);
    }

    #[test]
    fn test_quote_pair_inserts_and_parks_cursor() {
        let mut session = EditorSession::new();
        session.type_char('"').unwrap();
        assert_eq!(session.buffer().text(), "\"\"");
        assert_eq!(session.cursor(), Position::new(1, 1));
    }

    #[test]
    fn test_quote_skip_over_is_identity() {
        let mut session = EditorSession::new();
        session.type_char('"').unwrap();
        // Second quote closes the pair: cursor moves, nothing inserted.
        session.type_char('"').unwrap();
        assert_eq!(session.buffer().text(), "\"\"");
        assert_eq!(session.cursor(), Position::new(1, 2));
        // A third quote has nothing to skip, so it pairs again.
        session.type_char('"').unwrap();
        assert_eq!(session.buffer().text(), "\"\"\"\"");
        assert_eq!(session.cursor(), Position::new(1, 3));
    }

    #[test]
    fn test_quote_skip_dismisses_suggestion() {
        let mut session = EditorSession::new();
        session.type_char('"').unwrap();
        type_str(&mut session, "fo");
        assert!(session.completer().is_suggesting());
        // The closing quote skips over; the cursor now sits after a
        // non-word character, so the suggestion ends and accepting a
        // candidate becomes a no-op.
        session.type_char('"').unwrap();
        assert_eq!(session.buffer().text(), "\"fo\"");
        assert_eq!(session.cursor(), Position::new(1, 4));
        assert!(!session.completer().is_suggesting());
        session.apply_completion("for").unwrap();
        assert_eq!(session.buffer().text(), "\"fo\"");
    }

    #[test]
    fn test_cancel_completion_dismisses() {
        let mut session = EditorSession::new();
        type_str(&mut session, "fo");
        assert!(session.completer().is_suggesting());
        session.cancel_completion();
        assert!(!session.completer().is_suggesting());
        session.apply_completion("for").unwrap();
        assert_eq!(session.buffer().text(), "fo");
    }

    #[test]
    fn test_newline_copies_indentation() {
        let mut session = EditorSession::new();
        type_str(&mut session, "    x = 1");
        session.insert_newline().unwrap();
        assert_eq!(session.buffer().text(), "    x = 1\n    ");
        assert_eq!(session.cursor(), Position::new(2, 4));
        assert_eq!(session.gutter().text(), "1\n2");
    }

    #[test]
    fn test_tab_inserts_four_spaces() {
        let mut session = EditorSession::new();
        session.insert_tab().unwrap();
        assert_eq!(session.buffer().text(), "    ");
        assert_eq!(session.cursor(), Position::new(1, 4));
    }

    #[test]
    fn test_completion_accept_replaces_prefix() {
        let mut session = EditorSession::new();
        type_str(&mut session, "if x:");
        session.insert_newline().unwrap();
        type_str(&mut session, "pri");
        assert_eq!(session.completer().candidates(), ["print"]);
        let before = session.buffer().len_chars();
        session.apply_completion("print").unwrap();
        assert!(session.buffer().text().ends_with("print"));
        // Length grows by the candidate minus the typed prefix.
        assert_eq!(session.buffer().len_chars(), before - 3 + 5);
        assert!(!session.completer().is_suggesting());
    }

    #[test]
    fn test_movement_dismisses_completion_off_word() {
        let mut session = EditorSession::new();
        type_str(&mut session, "fo");
        assert!(session.completer().is_suggesting());
        session.move_left();
        // Prefix narrows to "f"; matching stays case-sensitive.
        assert_eq!(
            session.completer().candidates(),
            ["finally", "float", "for", "from"]
        );
        session.move_left();
        assert!(!session.completer().is_suggesting());
    }

    #[test]
    fn test_disable_completion_dismisses_and_stops_triggering() {
        let mut session = EditorSession::new();
        type_str(&mut session, "fo");
        session.set_completion_enabled(false);
        assert!(!session.completer().is_suggesting());
        session.type_char('r').unwrap();
        assert!(!session.completer().is_suggesting());
    }

    #[test]
    fn test_delete_backward_rescans() {
        let mut session = EditorSession::new();
        type_str(&mut session, "#x");
        assert!(session
            .spans()
            .iter()
            .any(|s| s.style == TokenStyle::Comment));
        session.delete_backward();
        session.delete_backward();
        assert!(session.spans().is_empty());
        assert_eq!(session.buffer().text(), "");
    }

    #[test]
    fn test_status_line_is_one_indexed_column() {
        let mut session = EditorSession::new();
        assert_eq!(session.status_line(), "Ln 1, Col 1");
        type_str(&mut session, "ab");
        assert_eq!(session.status_line(), "Ln 1, Col 3");
    }

    #[test]
    fn test_font_parse() {
        let font = FontConfig::parse_size("Courier", "16").unwrap();
        assert_eq!(font.family, "Courier");
        assert_eq!(font.size, 16);
        assert!(matches!(
            FontConfig::parse_size("Courier", "big"),
            Err(EditorError::FontParse(_))
        ));
    }

    #[test]
    fn test_prepare_run_unsaved_uses_scratch_file() {
        let mut session = EditorSession::new();
        type_str(&mut session, "print(1)");
        let path = session.prepare_run().unwrap();
        assert_eq!(path.file_name().unwrap(), "temp_code.py");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "print(1)");
        assert!(!session.is_modified());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_without_path_errors() {
        let mut session = EditorSession::new();
        assert!(session.save().is_err());
    }

    #[test]
    fn test_open_and_save_roundtrip() {
        let path = std::env::temp_dir().join(format!("pypad-session-{}.py", std::process::id()));
        std::fs::write(&path, "x = 1\n").unwrap();
        let mut session = EditorSession::new();
        session.open_file(&path).unwrap();
        assert_eq!(session.buffer().text(), "x = 1\n");
        assert!(!session.is_modified());
        assert_eq!(session.gutter().count(), 2);
        type_str(&mut session, "y");
        assert!(session.is_modified());
        session.save().unwrap();
        assert!(!session.is_modified());
        let _ = std::fs::remove_file(&path);
    }
}
