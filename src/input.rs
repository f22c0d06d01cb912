//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] actions.  The ticker advances on its
//! own, so the only binding is quitting; adding one is a single match arm in
//! [`handle_key_event`] plus the help text in [`crate::ui`].

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::App;

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
        app.quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::ticker::TickerConfig;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    fn app() -> App {
        App::new(&Config {
            endpoint: String::new(),
            ticker: TickerConfig::default(),
            refresh: Duration::from_secs(60),
            excerpt_chars: 300,
            log_file: "test.log".into(),
        })
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn q_and_esc_quit() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = app();
            handle_key_event(&mut app, key(code, KeyEventKind::Press));
            assert!(app.quit);
        }
    }

    #[test]
    fn release_is_ignored() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('q'), KeyEventKind::Release));
        assert!(!app.quit);
    }

    #[test]
    fn other_keys_do_nothing() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('x'), KeyEventKind::Press));
        assert!(!app.quit);
    }
}
