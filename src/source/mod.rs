//! News source abstraction layer.
//!
//! This module defines the [`DataSource`] trait and the common [`NewsItem`]
//! type.  Concrete source implementations live in sub-modules (currently only
//! [`legal_news`]).
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory (e.g. `rss.rs`).
//! 2. Define a struct (e.g. `RssSource`) and implement [`DataSource`] for it.
//! 3. Add `mod rss;` below and re-export your struct in the `pub use` block.
//! 4. Construct an instance in `main.rs` and add it to the `sources` vec.
//!
//! The poller and the ticker are source-agnostic: each successful fetch
//! replaces the rotating list wholesale.

mod legal_news;
mod news_item;

// Re-export the public API of this module so callers can write
// `use crate::source::{DataSource, LegalNewsSource, NewsItem};`
pub use legal_news::{FeedError, LegalNewsSource};
pub use news_item::NewsItem;

use anyhow::Result;

/// Trait that every news source must implement.
///
/// The polling loop calls [`fetch()`](DataSource::fetch) periodically on a
/// background thread, so implementations must be [`Send`].
pub trait DataSource: Send {
    /// Human-readable label shown in the status bar.
    fn name(&self) -> &str;

    /// Fetch the latest ordered batch of items.
    ///
    /// Errors are reported to the UI as a load failure; the poller does not
    /// retry before the next refresh.
    fn fetch(&self) -> Result<Vec<NewsItem>>;
}
