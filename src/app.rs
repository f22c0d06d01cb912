use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{debug, info, trace};

use crate::config::Config;
use crate::poll::PollMsg;
use crate::ticker::{RotationEngine, View};

/// Outcome of fetching the news list, independent of rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing has arrived yet.
    Loading,
    /// The last successful fetch.
    Loaded { count: usize, at: DateTime<Local> },
    /// Every fetch so far has failed.
    Failed(String),
}

pub struct App {
    /// The rotation over the most recently fetched list.
    pub engine: RotationEngine,
    /// Whether anything has loaded.
    pub load: LoadState,
    /// Error from the latest refresh when an earlier one succeeded.  The
    /// previous list keeps rotating meanwhile.
    pub refresh_error: Option<String>,
    /// Characters of body text shown per card.
    pub excerpt_chars: usize,
    /// Whether the user has requested to quit.
    pub quit: bool,
}

impl App {
    /// Mount with an empty list at session time zero.
    pub fn new(config: &Config) -> Self {
        Self {
            engine: RotationEngine::new(config.ticker, Vec::new(), Duration::ZERO),
            load: LoadState::Loading,
            refresh_error: None,
            excerpt_chars: config.excerpt_chars,
            quit: false,
        }
    }

    /// Apply one message from the poller at session time `now`.
    pub fn handle_poll(&mut self, msg: PollMsg, now: Duration) {
        match msg {
            PollMsg::Items(items) => {
                let count = items.len();
                if let Some(view) = self.engine.replace_items(items, now) {
                    debug!(count, phase = ?view.phase(), "news list replaced");
                }
                self.load = LoadState::Loaded {
                    count,
                    at: Local::now(),
                };
                self.refresh_error = None;
            }
            PollMsg::Error(e) => match self.load {
                LoadState::Loaded { .. } => self.refresh_error = Some(e),
                LoadState::Loading | LoadState::Failed(_) => self.load = LoadState::Failed(e),
            },
        }
    }

    /// Advance the rotation to session time `now`.
    pub fn on_tick(&mut self, now: Duration) {
        for emission in self.engine.tick(now) {
            trace!(
                at_ms = emission.at.as_millis() as u64,
                phase = ?emission.view.phase(),
                title = emission.view.focused().map(|item| item.display_title()),
                "ticker"
            );
        }
    }

    /// Stop the rotation for good.  Called once when the UI exits.
    pub fn shutdown(&mut self) {
        if !self.engine.is_disposed() {
            self.engine.dispose();
            info!("ticker stopped");
        }
    }

    pub fn view(&self) -> View {
        self.engine.view()
    }

    /// 1-based position of the settled item and the list length.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.engine
            .current_index()
            .map(|index| (index + 1, self.engine.len()))
    }

    /// One-line summary for the status bar.
    pub fn status(&self) -> String {
        let base = match &self.load {
            LoadState::Loading => "Loading…".to_string(),
            LoadState::Loaded { count, at } => {
                format!("Fetched {count} items at {}", at.format("%H:%M"))
            }
            LoadState::Failed(e) => format!("Error: {e}"),
        };
        match &self.refresh_error {
            Some(e) => format!("{base} (refresh failed: {e})"),
            None => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::NewsItem;
    use crate::ticker::{Phase, TickerConfig};

    fn config() -> Config {
        Config {
            endpoint: "http://localhost:8000/trending-legal-news".into(),
            ticker: TickerConfig::default(),
            refresh: Duration::from_secs(60),
            excerpt_chars: NewsItem::EXCERPT_CHARS,
            log_file: "test.log".into(),
        }
    }

    fn make_item(key: &str) -> NewsItem {
        NewsItem {
            url: format!("https://news.example/{key}"),
            title: key.to_string(),
            content: String::new(),
        }
    }

    fn sample_items() -> Vec<NewsItem> {
        vec![make_item("A"), make_item("B"), make_item("C")]
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    // -- construction --------------------------------------------------------

    #[test]
    fn new_app_starts_loading_and_empty() {
        let app = App::new(&config());
        assert_eq!(app.load, LoadState::Loading);
        assert_eq!(app.view(), View::Empty);
        assert!(app.position().is_none());
        assert!(!app.quit);
    }

    // -- poll messages -------------------------------------------------------

    #[test]
    fn items_start_rotation_from_first() {
        let mut app = App::new(&config());
        app.handle_poll(PollMsg::Items(sample_items()), ms(1200));

        assert!(matches!(app.load, LoadState::Loaded { count: 3, .. }));
        assert_eq!(app.position(), Some((1, 3)));
        assert_eq!(app.engine.next_deadline(), Some(ms(6200)));
    }

    #[test]
    fn error_before_any_items_is_a_load_failure() {
        let mut app = App::new(&config());
        app.handle_poll(PollMsg::Error("Legal: timed out".into()), ms(10));

        assert_eq!(app.load, LoadState::Failed("Legal: timed out".into()));
        assert_eq!(app.status(), "Error: Legal: timed out");
    }

    #[test]
    fn error_after_items_keeps_rotating() {
        let mut app = App::new(&config());
        app.handle_poll(PollMsg::Items(sample_items()), ms(0));
        app.handle_poll(PollMsg::Error("Legal: 502".into()), ms(100));

        assert!(matches!(app.load, LoadState::Loaded { .. }));
        assert!(app.status().ends_with("(refresh failed: Legal: 502)"));

        app.on_tick(ms(5500));
        assert_eq!(app.position(), Some((2, 3)));
    }

    #[test]
    fn successful_refresh_clears_error() {
        let mut app = App::new(&config());
        app.handle_poll(PollMsg::Items(sample_items()), ms(0));
        app.handle_poll(PollMsg::Error("x".into()), ms(100));
        app.handle_poll(PollMsg::Items(sample_items()), ms(200));

        assert!(app.refresh_error.is_none());
    }

    #[test]
    fn empty_refresh_clears_the_ticker() {
        let mut app = App::new(&config());
        app.handle_poll(PollMsg::Items(sample_items()), ms(0));
        app.handle_poll(PollMsg::Items(Vec::new()), ms(100));

        assert_eq!(app.view(), View::Empty);
        assert_eq!(app.engine.outstanding_timers(), 0);
    }

    // -- ticking / shutdown --------------------------------------------------

    #[test]
    fn on_tick_drives_the_engine() {
        let mut app = App::new(&config());
        app.handle_poll(PollMsg::Items(sample_items()), ms(0));

        app.on_tick(ms(5000));
        assert_eq!(app.engine.phase(), Phase::Transitioning);
        app.on_tick(ms(5500));
        assert_eq!(app.engine.phase(), Phase::Idle);
        assert_eq!(app.position(), Some((2, 3)));
    }

    #[test]
    fn shutdown_freezes_the_view() {
        let mut app = App::new(&config());
        app.handle_poll(PollMsg::Items(sample_items()), ms(0));
        app.shutdown();
        app.shutdown();

        app.on_tick(ms(60_000));
        app.handle_poll(PollMsg::Items(vec![make_item("Z")]), ms(60_001));

        assert!(app.engine.is_disposed());
        assert_eq!(app.position(), Some((1, 3)));
    }
}
