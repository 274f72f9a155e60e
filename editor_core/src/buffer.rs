//! Text buffer implementation using ropey.
//!
//! The buffer owns both the document content and the cursor; every
//! mutation is a single atomic rope edit plus a cursor update.

use ropey::Rope;
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::{EditorError, EditorResult};

/// A position in the buffer. Lines are 1-indexed, columns are 0-indexed.
///
/// Invariant: `column` never exceeds the length of its line (excluding the
/// newline) and `line` never exceeds the total line count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The start of the document.
    pub fn start() -> Self {
        Self { line: 1, column: 0 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

/// A text buffer backed by a rope data structure.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
    cursor: Position,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Creates a new empty text buffer with the cursor at the start.
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            cursor: Position::start(),
        }
    }

    /// Creates a text buffer from a string.
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Position::start(),
        }
    }

    /// Loads a text buffer from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> EditorResult<Self> {
        let file = fs::File::open(path)?;
        let reader = BufReader::new(file);
        let rope = Rope::from_reader(reader)?;
        Ok(Self {
            rope,
            cursor: Position::start(),
        })
    }

    /// Saves the buffer content verbatim to a file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> EditorResult<()> {
        let file = fs::File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.rope.write_to(&mut writer)?;
        Ok(())
    }

    // ==================== Measurements ====================

    /// Returns the total number of characters in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Returns the total number of lines. An empty buffer has one line;
    /// a buffer ending in `\n` counts the empty line after it.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Returns the length of a line in characters, excluding the newline.
    /// `line` is 1-indexed.
    pub fn line_len(&self, line: usize) -> usize {
        if line == 0 || line > self.line_count() {
            return 0;
        }
        let slice = self.rope.line(line - 1);
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Returns a line's content as a string, without the trailing newline.
    /// `line` is 1-indexed.
    pub fn line(&self, line: usize) -> Option<String> {
        if line == 0 || line > self.line_count() {
            return None;
        }
        let mut s = self.rope.line(line - 1).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        Some(s)
    }

    /// Returns the entire buffer as a string.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    // ==================== Addressing ====================

    /// Converts a position to a character index, failing on out-of-range
    /// addresses.
    pub fn char_index(&self, pos: Position) -> EditorResult<usize> {
        if pos.line == 0 || pos.line > self.line_count() || pos.column > self.line_len(pos.line) {
            return Err(EditorError::InvalidPosition {
                line: pos.line,
                column: pos.column,
            });
        }
        Ok(self.rope.line_to_char(pos.line - 1) + pos.column)
    }

    /// Converts a character index to a position. Indices past the end of
    /// the document are clamped.
    pub fn position_at(&self, char_idx: usize) -> Position {
        let char_idx = char_idx.min(self.len_chars());
        let line = self.rope.char_to_line(char_idx);
        let column = char_idx - self.rope.line_to_char(line);
        Position::new(line + 1, column)
    }

    /// Clamps a position to valid document bounds.
    pub fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.clamp(1, self.line_count());
        let column = pos.column.min(self.line_len(line));
        Position::new(line, column)
    }

    /// Returns the character at the given index, if it exists.
    pub fn char_at(&self, char_idx: usize) -> Option<char> {
        if char_idx < self.len_chars() {
            Some(self.rope.char(char_idx))
        } else {
            None
        }
    }

    // ==================== Cursor ====================

    /// Returns the cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Returns the cursor as a character index.
    pub fn cursor_char_index(&self) -> usize {
        // The cursor invariant guarantees this address resolves.
        self.rope.line_to_char(self.cursor.line - 1) + self.cursor.column
    }

    /// Moves the cursor, clamping to document bounds.
    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = self.clamp(pos);
    }

    /// Returns the character immediately to the right of the cursor.
    pub fn char_after_cursor(&self) -> Option<char> {
        self.char_at(self.cursor_char_index())
    }

    /// Returns the text of the cursor's line from line start to the cursor.
    pub fn line_to_cursor(&self) -> String {
        let start = self.rope.line_to_char(self.cursor.line - 1);
        self.rope
            .slice(start..start + self.cursor.column)
            .to_string()
    }

    /// Moves the cursor one character left, crossing line breaks.
    pub fn move_left(&mut self) {
        let idx = self.cursor_char_index();
        if idx > 0 {
            self.cursor = self.position_at(idx - 1);
        }
    }

    /// Moves the cursor one character right, crossing line breaks.
    pub fn move_right(&mut self) {
        let idx = self.cursor_char_index();
        if idx < self.len_chars() {
            self.cursor = self.position_at(idx + 1);
        }
    }

    /// Moves the cursor one line up, clamping the column.
    pub fn move_up(&mut self) {
        if self.cursor.line > 1 {
            self.cursor = self.clamp(Position::new(self.cursor.line - 1, self.cursor.column));
        }
    }

    /// Moves the cursor one line down, clamping the column.
    pub fn move_down(&mut self) {
        if self.cursor.line < self.line_count() {
            self.cursor = self.clamp(Position::new(self.cursor.line + 1, self.cursor.column));
        }
    }

    // ==================== Mutations ====================

    /// Inserts text at a position and places the cursor after it.
    pub fn insert_at(&mut self, pos: Position, text: &str) -> EditorResult<()> {
        let idx = self.char_index(pos)?;
        self.rope.insert(idx, text);
        self.cursor = self.position_at(idx + text.chars().count());
        Ok(())
    }

    /// Deletes the text between two positions (order-insensitive) and
    /// returns it. The cursor moves to the start of the deleted range.
    pub fn delete_range(&mut self, start: Position, end: Position) -> EditorResult<String> {
        let a = self.char_index(start)?;
        let b = self.char_index(end)?;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let removed = self.rope.slice(lo..hi).to_string();
        self.rope.remove(lo..hi);
        self.cursor = self.position_at(lo);
        Ok(removed)
    }

    /// Returns the text between two positions (order-insensitive).
    pub fn get_text(&self, start: Position, end: Position) -> EditorResult<String> {
        let a = self.char_index(start)?;
        let b = self.char_index(end)?;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Ok(self.rope.slice(lo..hi).to_string())
    }

    /// Deletes the character before the cursor. Returns true if a
    /// character was removed.
    pub fn delete_backward(&mut self) -> bool {
        let idx = self.cursor_char_index();
        if idx == 0 {
            return false;
        }
        self.rope.remove(idx - 1..idx);
        self.cursor = self.position_at(idx - 1);
        true
    }

    /// Deletes the character after the cursor. Returns true if a
    /// character was removed.
    pub fn delete_forward(&mut self) -> bool {
        let idx = self.cursor_char_index();
        if idx >= self.len_chars() {
            return false;
        }
        self.rope.remove(idx..idx + 1);
        true
    }
}
