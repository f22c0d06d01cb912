//! The core data type shared across all news sources.
//!
//! `NewsItem` is a single headline as the ticker sees it.  Every source
//! converts its native payload into `NewsItem`s, so the rotation engine and
//! the renderer never need to know where an item came from.

use serde::Deserialize;

/// One displayable news entry.
///
/// Items are immutable once received.  The `url` doubles as the stable
/// content key: two items with the same url are the same story.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct NewsItem {
    /// Link to the full article; unique within one batch.
    #[serde(default)]
    pub url: String,

    /// Headline.
    #[serde(default)]
    pub title: String,

    /// Body text or summary.
    #[serde(default)]
    pub content: String,
}

impl NewsItem {
    /// Default number of characters of `content` shown under the headline.
    pub const EXCERPT_CHARS: usize = 300;

    /// The body cut to at most `max_chars` characters, with `...` appended
    /// when anything was dropped.  Cuts on a character boundary.
    pub fn excerpt(&self, max_chars: usize) -> String {
        match self.content.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &self.content[..cut]),
            None => self.content.clone(),
        }
    }

    /// Headline to display, never blank.
    pub fn display_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() {
            "(untitled)"
        } else {
            title
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
