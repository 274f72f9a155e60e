//! Line-number gutter contents.

use crate::buffer::TextBuffer;

/// Derived line-number column, rebuilt from the buffer after every edit.
///
/// Holds the rendered digit column as one newline-joined string so the
/// view can lay it out with the same font metrics as the document text.
#[derive(Debug, Clone)]
pub struct LineNumberTracker {
    text: String,
    count: usize,
}

impl LineNumberTracker {
    pub fn new() -> Self {
        Self {
            text: "1".to_string(),
            count: 1,
        }
    }

    /// Rebuilds the digit column to match the buffer's current line count.
    /// A trailing newline in the document still counts as starting a new
    /// line, so the column ends with that line's number.
    pub fn refresh(&mut self, buffer: &TextBuffer) {
        let count = buffer.line_count();
        if count != self.count || self.text.is_empty() {
            self.text = (1..=count)
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join("\n");
            self.count = count;
        }
    }

    /// The newline-joined digit column, "1" through the last line number.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of lines currently tracked.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Digit width of the widest line number.
    pub fn width(&self) -> usize {
        self.count.to_string().len()
    }
}

impl Default for LineNumberTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_shows_line_one() {
        let mut tracker = LineNumberTracker::new();
        tracker.refresh(&TextBuffer::new());
        assert_eq!(tracker.text(), "1");
        assert_eq!(tracker.count(), 1);
    }

    #[test]
    fn test_refresh_follows_line_count() {
        let mut tracker = LineNumberTracker::new();
        tracker.refresh(&TextBuffer::from_str("a\nb\nc"));
        assert_eq!(tracker.text(), "1\n2\n3");
        assert_eq!(tracker.count(), 3);
    }

    #[test]
    fn test_trailing_newline_counts_as_new_line() {
        let mut tracker = LineNumberTracker::new();
        tracker.refresh(&TextBuffer::from_str("a\nb\n"));
        assert_eq!(tracker.text(), "1\n2\n3");
    }

    #[test]
    fn test_width_grows_with_digits() {
        let mut tracker = LineNumberTracker::new();
        assert_eq!(tracker.width(), 1);
        let text = "x\n".repeat(99);
        tracker.refresh(&TextBuffer::from_str(&text));
        assert_eq!(tracker.count(), 100);
        assert_eq!(tracker.width(), 3);
    }
}
