//! Theme for syntax highlighting and the editor chrome.

/// Token style categories produced by the highlighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenStyle {
    /// Language keywords (def, for, return, ...).
    Keyword,
    /// String literals.
    String,
    /// Comments, from `#` to end of line.
    Comment,
    /// Builtin names (print, len, ...).
    Builtin,
}

/// RGB color as [r, g, b] with 0-255 components.
pub type Color = [u8; 3];

/// Colors for the editor view and the token categories.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Window chrome background.
    pub background: Color,
    /// Text area background.
    pub text_background: Color,
    /// Default text color.
    pub foreground: Color,
    /// Line-number gutter background.
    pub gutter_background: Color,
    /// Line-number gutter text color.
    pub gutter_foreground: Color,
    /// Status bar background.
    pub status_background: Color,
    /// Status bar text color.
    pub status_foreground: Color,
    keyword: Color,
    string: Color,
    comment: Color,
    builtin: Color,
}

impl Theme {
    /// The default dark theme.
    pub fn dark() -> Self {
        Self {
            background: [0x1e, 0x1e, 0x1e],
            text_background: [0x25, 0x25, 0x26],
            foreground: [0xd4, 0xd4, 0xd4],
            gutter_background: [0x2d, 0x2d, 0x2d],
            gutter_foreground: [0x85, 0x85, 0x85],
            status_background: [0x00, 0x7a, 0xcc],
            status_foreground: [0xff, 0xff, 0xff],
            keyword: [0x56, 0x9c, 0xd6],
            string: [0xd6, 0x9d, 0x85],
            comment: [0x6a, 0x99, 0x55],
            builtin: [0xc5, 0x86, 0xc0],
        }
    }

    /// Returns the color for a token style.
    pub fn color(&self, style: TokenStyle) -> Color {
        match style {
            TokenStyle::Keyword => self.keyword,
            TokenStyle::String => self.string,
            TokenStyle::Comment => self.comment,
            TokenStyle::Builtin => self.builtin,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
