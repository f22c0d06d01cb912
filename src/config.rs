//! Command-line and environment configuration.
//!
//! Every option can be given as a flag or through the environment variable
//! listed in `--help`.  [`Cli::into_config`] validates the raw values.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::source::NewsItem;
use crate::ticker::TickerConfig;

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("advance interval must be greater than zero")]
    ZeroAdvanceInterval,

    #[error("refresh interval must be greater than zero")]
    ZeroRefreshInterval,
}

#[derive(Debug, Parser)]
#[command(
    name = "legal-news-ticker",
    version,
    about = "Rotate through trending legal news in the terminal"
)]
pub struct Cli {
    /// Trending legal news endpoint.
    #[arg(
        long,
        env = "LEGAL_NEWS_ENDPOINT",
        default_value = "http://localhost:8000/trending-legal-news"
    )]
    pub endpoint: String,

    /// How long an item stays fully visible before sliding out.
    #[arg(long, env = "TICKER_ADVANCE_MS", default_value_t = 5000)]
    pub advance_interval_ms: u64,

    /// How long the slide between two items takes.
    #[arg(long, env = "TICKER_TRANSITION_MS", default_value_t = 500)]
    pub transition_duration_ms: u64,

    /// Seconds between fetches of the news list.
    #[arg(long, env = "LEGAL_NEWS_REFRESH_SECS", default_value_t = 60)]
    pub refresh_secs: u64,

    /// Characters of body text shown under each headline.
    #[arg(long, default_value_t = NewsItem::EXCERPT_CHARS)]
    pub excerpt_chars: usize,

    /// Log file (the terminal itself is taken by the UI).
    #[arg(long, env = "LEGAL_NEWS_LOG", default_value = "legal-news-ticker.log")]
    pub log_file: PathBuf,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub ticker: TickerConfig,
    pub refresh: Duration,
    pub excerpt_chars: usize,
    pub log_file: PathBuf,
}

impl Cli {
    pub fn into_config(self) -> Result<Config, ConfigError> {
        if self.refresh_secs == 0 {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        Ok(Config {
            endpoint: self.endpoint,
            ticker: TickerConfig::from_millis(
                self.advance_interval_ms,
                self.transition_duration_ms,
            )?,
            refresh: Duration::from_secs(self.refresh_secs),
            excerpt_chars: self.excerpt_chars,
            log_file: self.log_file,
        })
    }
}
