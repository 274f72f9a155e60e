//! Error types shared across the editor core.

use thiserror::Error;

/// Errors produced by core editor operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// A (line, column) address outside the current document bounds.
    /// Under correct caller discipline this never occurs; it signals a
    /// programming error, not a recoverable condition.
    #[error("invalid position: line {line}, column {column}")]
    InvalidPosition { line: usize, column: usize },

    /// A file read or write failed. The in-memory buffer is never
    /// corrupted by a failed save.
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A user-entered font size is not a valid integer. Recovered locally
    /// by keeping the previous font.
    #[error("invalid font size: {0:?}")]
    FontParse(String),
}

/// Convenience result alias for core operations.
pub type EditorResult<T> = Result<T, EditorError>;
