//! Timer-driven rotation over a list of news items.
//!
//! [`RotationEngine`] is a two-state machine (`Idle`, `Transitioning`, plus a
//! degenerate `Empty`) coordinating two generation-tagged timers:
//!
//! * the **advance** timer, which ends an item's fully-visible period, and
//! * the **transition** timer, which ends the slide animation and commits
//!   the next index.
//!
//! The host supplies the time, calls [`RotationEngine::tick`], and renders
//! whatever [`View`] comes back.

mod config;
mod engine;
mod timer;
mod view;

pub use config::TickerConfig;
pub use engine::{FireOutcome, RotationEngine};
pub use timer::{TimerKind, TimerToken};
pub use view::{Emission, Phase, View};
