//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).  Rendering reads only the engine's
//! [`View`] and transition progress, never its timers.
//!
//! ## For contributors
//!
//! * The layout is a two-row split: the ticker panel on top and a one-line
//!   status bar at the bottom.
//! * During a transition the panel is split in two columns: the outgoing
//!   card shrinks towards the left edge while the incoming card grows from
//!   the right, proportionally to the transition progress.

use std::time::Duration;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, LoadState};
use crate::source::NewsItem;
use crate::ticker::View;

/// Draw the complete UI for one frame at session time `now`.
pub fn draw(app: &App, frame: &mut Frame, now: Duration) {
    let [main_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_ticker(app, frame, main_area, now);
    draw_status_bar(app, frame, status_area);
}

/// Render the rotating news panel.
fn draw_ticker(app: &App, frame: &mut Frame, area: Rect, now: Duration) {
    let block = Block::default()
        .title(" Trending Legal News ")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match app.view() {
        View::Empty => {
            let text = match app.load {
                LoadState::Loading => "Loading trending legal news...",
                LoadState::Failed(_) => "Failed to load news.",
                LoadState::Loaded { .. } => "No news available.",
            };
            let placeholder = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
            frame.render_widget(placeholder, inner);
        }
        View::Idle { visible } => {
            frame.render_widget(card(&visible, app.excerpt_chars), inner);
        }
        View::Transitioning { outgoing, incoming } => {
            let progress = app.engine.transition_progress(now).unwrap_or(1.0);
            let incoming_width = (f32::from(inner.width) * progress).round() as u16;
            let [out_area, in_area] = Layout::horizontal([
                Constraint::Length(inner.width.saturating_sub(incoming_width)),
                Constraint::Length(incoming_width),
            ])
            .areas(inner);

            frame.render_widget(card(&outgoing, app.excerpt_chars), out_area);
            frame.render_widget(card(&incoming, app.excerpt_chars), in_area);
        }
    }
}

/// One news card: headline, link, excerpt.
fn card(item: &NewsItem, excerpt_chars: usize) -> Paragraph<'static> {
    let lines = vec![
        Line::from(Span::styled(
            item.display_title().to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            item.url.clone(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::UNDERLINED),
        )),
        Line::default(),
        Line::from(Span::styled(
            item.excerpt(excerpt_chars),
            Style::default().fg(Color::White),
        )),
    ];
    Paragraph::new(lines).wrap(Wrap { trim: true })
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let position = app
        .position()
        .map(|(index, total)| format!("{index}/{total}"))
        .unwrap_or_else(|| "0/0".into());

    let status = Paragraph::new(Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(app.status(), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(position, Style::default().fg(Color::Green)),
        Span::raw("  q: quit"),
    ]));
    frame.render_widget(status, area);
}
