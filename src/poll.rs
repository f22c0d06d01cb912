//! Background news polling.
//!
//! Runs on a dedicated thread, fetching all configured sources immediately
//! and then once per refresh interval, and sends results to the UI thread
//! over an [`mpsc`] channel.
//!
//! ## For contributors
//!
//! The poller is intentionally simple: it loops forever, fetches every source
//! sequentially, sends results, then sleeps.  It never retries a failed fetch
//! before the next interval and never caches; the UI decides what to show on
//! failure.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::source::{DataSource, NewsItem};

/// Messages sent from the poller thread to the UI thread.
#[derive(Debug)]
pub enum PollMsg {
    /// A successful fetch returned these items, in display order.
    Items(Vec<NewsItem>),
    /// A fetch failed with this error description.
    Error(String),
}

/// Spawn the background polling thread.
///
/// Returns a receiver that the main loop should drain on every tick.
/// The thread stops at its next send once the receiver is dropped.
pub fn spawn(sources: Vec<Box<dyn DataSource>>, refresh: Duration) -> mpsc::Receiver<PollMsg> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || loop {
        for src in &sources {
            let msg = match src.fetch() {
                Ok(items) => {
                    info!(source = src.name(), count = items.len(), "fetched news");
                    PollMsg::Items(items)
                }
                Err(e) => {
                    warn!(source = src.name(), error = %e, "news fetch failed");
                    PollMsg::Error(format!("{}: {e}", src.name()))
                }
            };
            // If the receiver is gone the main thread has exited;
            // silently stop polling.
            if tx.send(msg).is_err() {
                return;
            }
        }
        thread::sleep(refresh);
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};

    struct Fixed(Vec<NewsItem>);

    impl DataSource for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch(&self) -> Result<Vec<NewsItem>> {
            Ok(self.0.clone())
        }
    }

    struct Broken;

    impl DataSource for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn fetch(&self) -> Result<Vec<NewsItem>> {
            Err(anyhow!("connection refused"))
        }
    }

    #[test]
    fn first_round_is_sent_immediately_in_source_order() {
        let item = NewsItem {
            url: "https://news.example/a".into(),
            title: "A".into(),
            content: String::new(),
        };
        let rx = spawn(
            vec![Box::new(Fixed(vec![item.clone()])), Box::new(Broken)],
            Duration::from_secs(3600),
        );

        let timeout = Duration::from_secs(5);
        match rx.recv_timeout(timeout).unwrap() {
            PollMsg::Items(items) => assert_eq!(items, vec![item]),
            other => panic!("expected items, got {other:?}"),
        }
        match rx.recv_timeout(timeout).unwrap() {
            PollMsg::Error(e) => assert_eq!(e, "broken: connection refused"),
            other => panic!("expected error, got {other:?}"),
        }
    }
}
