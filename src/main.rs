//! legal-news-ticker — trending legal news, one headline at a time.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐  PollMsg   ┌──────────┐  tick(now)  ┌──────────┐
//! │  poll.rs │ ─────────► │  app.rs  │ ──────────► │ ticker/  │
//! │ (thread) │  (channel) │ (host)   │ ◄────────── │ (engine) │
//! └──────────┘            └──────────┘    View     └──────────┘
//!                           ▲     │
//!       handle_key_event()  │     │ draw()
//!                     ┌──────────┐ ┌──────────┐
//!                     │ input.rs │ │  ui.rs   │
//!                     └──────────┘ └──────────┘
//! ```
//!
//! * **`source/`** — the `DataSource` trait and the legal news endpoint.
//! * **`poll`** — spawns a background thread that fetches sources on a timer.
//! * **`ticker`** — the rotation engine: index, phase, and its two timers.
//! * **`app`** — hosts the engine, feeds it fetched lists and session time.
//! * **`ui`** — pure rendering of the engine's view and the status bar.
//! * **`input`** — maps key events to `App` mutations.
//! * **`config`** — command-line / environment options.
//! * **`main`** — wires everything together: parse args, set up logging and
//!   the terminal, and run the event loop.

mod app;
mod config;
mod input;
mod poll;
mod source;
mod ticker;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use config::Cli;
use source::{DataSource, LegalNewsSource};
use ticker::Phase;

/// Redraw cadence while a slide is running.
const ANIMATION_FRAME: Duration = Duration::from_millis(33);
/// Longest wait for input while idle.
const IDLE_TICK: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// RAII terminal guard — cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

/// Send `tracing` output to `path`; stdout belongs to the UI.
///
/// Filtered by `RUST_LOG`, defaulting to `info`.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

/// How long to wait for input before the next iteration.
fn poll_timeout(app: &App, now: Duration) -> Duration {
    if app.engine.phase() == Phase::Transitioning {
        return ANIMATION_FRAME;
    }
    app.engine
        .next_deadline()
        .map(|deadline| deadline.saturating_sub(now).min(IDLE_TICK))
        .unwrap_or(IDLE_TICK)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;
    init_logging(&config.log_file)?;
    install_panic_hook();

    info!(
        endpoint = %config.endpoint,
        advance_ms = config.ticker.advance_interval().as_millis() as u64,
        transition_ms = config.ticker.transition_duration().as_millis() as u64,
        refresh_secs = config.refresh.as_secs(),
        "starting legal news ticker"
    );

    // -- configure data sources ----------------------------------------------
    let sources: Vec<Box<dyn DataSource>> = vec![Box::new(LegalNewsSource::new(
        config.endpoint.clone(),
        "Legal News",
    ))];

    // -- start background polling --------------------------------------------
    let rx = poll::spawn(sources, config.refresh);

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new(&config);
    let started = Instant::now();

    // -- main event loop -----------------------------------------------------
    // Each iteration:
    //   1. Drain any messages from the poller into the engine.
    //   2. Fire due ticker timers.
    //   3. Render.
    //   4. Wait for input until the next frame or timer deadline.
    loop {
        let now = started.elapsed();

        while let Ok(msg) = rx.try_recv() {
            app.handle_poll(msg, now);
        }

        app.on_tick(now);

        guard.terminal.draw(|f| ui::draw(&app, f, now))?;

        if event::poll(poll_timeout(&app, now))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.quit {
            break;
        }
    }

    app.shutdown();
    // `guard` is dropped here, restoring the terminal.
    Ok(())
}
