//! The rotation state machine.
//!
//! ```text
//!            advance timer (len > 1)
//!   Idle(i) ─────────────────────────► Transitioning(i, i+1 mod len)
//!     ▲                                        │
//!     └────────────────────────────────────────┘
//!          transition timer: i := i+1, re-arm advance
//! ```
//!
//! `Empty` sits beside both states and is entered or left only through
//! [`RotationEngine::replace_items`].  Time is a [`Duration`] offset from the
//! start of the session, supplied by the host; the engine never reads a clock
//! itself, which keeps every test deterministic.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use super::config::TickerConfig;
use super::timer::{TimerKind, TimerSlot, TimerToken};
use super::view::{Emission, Phase, View};
use crate::source::NewsItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Empty,
    Idle {
        current: usize,
    },
    Transitioning {
        current: usize,
        next: usize,
        started: Duration,
    },
}

/// Result of delivering one timer token to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FireOutcome {
    /// The visible state changed.
    Emitted(View),
    /// Nothing to rotate to; the advance timer was re-armed.
    Rescheduled,
    /// The token was superseded, already fired, or the engine is disposed.
    Stale,
}

/// Drives a repeating, animated rotation over an ordered list of items.
#[derive(Debug)]
pub struct RotationEngine {
    config: TickerConfig,
    items: Vec<Arc<NewsItem>>,
    state: State,
    advance: TimerSlot,
    transition: TimerSlot,
    disposed: bool,
}

impl RotationEngine {
    /// Mount the engine at session time `now`.
    ///
    /// Starts in `Idle(0)` with the advance timer armed when `items` is
    /// non-empty, otherwise in `Empty` with no timers.
    pub fn new(config: TickerConfig, items: Vec<NewsItem>, now: Duration) -> Self {
        let mut engine = Self {
            config,
            items: items.into_iter().map(Arc::new).collect(),
            state: State::Empty,
            advance: TimerSlot::new(TimerKind::Advance),
            transition: TimerSlot::new(TimerKind::Transition),
            disposed: false,
        };
        if !engine.items.is_empty() {
            engine.state = State::Idle { current: 0 };
            engine.arm_advance(now);
        }
        engine
    }

    // -- external events -----------------------------------------------------

    /// Replace the item list wholesale.
    ///
    /// Returns the new view when anything visible may have changed.  A list
    /// with the same urls in the same order is ignored.  An in-flight
    /// transition keeps its timer and lands on the clamped index.
    pub fn replace_items(&mut self, items: Vec<NewsItem>, now: Duration) -> Option<View> {
        if self.disposed {
            trace!("items replaced after dispose; ignoring");
            return None;
        }
        if self.same_keys(&items) {
            trace!(len = items.len(), "items unchanged; ignoring");
            return None;
        }

        self.items = items.into_iter().map(Arc::new).collect();
        let len = self.items.len();

        if len == 0 {
            self.advance.cancel();
            self.transition.cancel();
            self.state = State::Empty;
            debug!("item list emptied; rotation stopped");
            return Some(View::Empty);
        }

        self.state = match self.state {
            State::Empty => {
                self.arm_advance(now);
                debug!(len, "items arrived; rotation started");
                State::Idle { current: 0 }
            }
            State::Idle { current } => State::Idle {
                current: current % len,
            },
            State::Transitioning {
                current, started, ..
            } => {
                let current = current % len;
                State::Transitioning {
                    current,
                    next: (current + 1) % len,
                    started,
                }
            }
        };
        debug!(len, index = ?self.current_index(), "items replaced");
        Some(self.view())
    }

    /// Cancel all timers and stop emitting.  Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.advance.cancel();
        self.transition.cancel();
        debug!("rotation engine disposed");
    }

    // -- timers --------------------------------------------------------------

    /// Fire every timer due at or before `now`, in deadline order.
    ///
    /// Each timer fires at its own deadline, so a host that ticks late still
    /// sees the exact cadence.  Returns one emission per visible change.
    pub fn tick(&mut self, now: Duration) -> Vec<Emission> {
        let mut emissions = Vec::new();
        while let Some(token) = self.next_timer().filter(|t| t.deadline <= now) {
            if let FireOutcome::Emitted(view) = self.fire(token) {
                emissions.push(Emission {
                    at: token.deadline,
                    view,
                });
            }
        }
        debug_assert!(self.outstanding_timers() <= 1, "advance and transition both armed");
        emissions
    }

    /// Deliver one timer callback.
    ///
    /// Hosts that keep their own timer queue call this with the tokens from
    /// [`next_timer`](Self::next_timer).  Anything that is no longer the live
    /// instance is discarded as [`FireOutcome::Stale`].
    pub fn fire(&mut self, token: TimerToken) -> FireOutcome {
        if self.disposed {
            trace!(?token, "timer fired after dispose; discarding");
            return FireOutcome::Stale;
        }
        let claimed = match token.kind {
            TimerKind::Advance => self.advance.claim(token),
            TimerKind::Transition => self.transition.claim(token),
        };
        if !claimed {
            trace!(?token, "stale timer; discarding");
            return FireOutcome::Stale;
        }

        let at = token.deadline;
        match (token.kind, self.state) {
            (TimerKind::Advance, State::Idle { current }) => {
                let len = self.items.len();
                if len <= 1 {
                    self.arm_advance(at);
                    return FireOutcome::Rescheduled;
                }
                let next = (current + 1) % len;
                self.state = State::Transitioning {
                    current,
                    next,
                    started: at,
                };
                self.transition
                    .arm(at + self.config.transition_duration());
                trace!(current, next, "transition started");
                FireOutcome::Emitted(self.view())
            }
            (TimerKind::Transition, State::Transitioning { next, .. }) => {
                self.state = State::Idle { current: next };
                self.arm_advance(at);
                trace!(current = next, "transition committed");
                FireOutcome::Emitted(self.view())
            }
            (kind, state) => {
                // Slots are cancelled whenever the state they belong to is
                // left, so a live token always matches its state.
                debug_assert!(false, "live {kind:?} timer in state {state:?}");
                FireOutcome::Stale
            }
        }
    }

    /// The earliest outstanding timer.
    pub fn next_timer(&self) -> Option<TimerToken> {
        if self.disposed {
            return None;
        }
        match (self.advance.token(), self.transition.token()) {
            (Some(a), Some(t)) => Some(if t.deadline <= a.deadline { t } else { a }),
            (a, t) => a.or(t),
        }
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.next_timer().map(|t| t.deadline)
    }

    /// Number of armed timers.  Never more than one per kind.
    pub fn outstanding_timers(&self) -> usize {
        usize::from(self.advance.is_armed()) + usize::from(self.transition.is_armed())
    }

    // -- projection ----------------------------------------------------------

    pub fn view(&self) -> View {
        match self.state {
            State::Empty => View::Empty,
            State::Idle { current } => View::Idle {
                visible: self.item(current),
            },
            State::Transitioning { current, next, .. } => View::Transitioning {
                outgoing: self.item(current),
                incoming: self.item(next),
            },
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Empty => Phase::Empty,
            State::Idle { .. } => Phase::Idle,
            State::Transitioning { .. } => Phase::Transitioning,
        }
    }

    /// Index of the settled (or outgoing) item.
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            State::Empty => None,
            State::Idle { current } | State::Transitioning { current, .. } => Some(current),
        }
    }

    /// Fraction of the running transition elapsed at `now`, in `[0, 1]`.
    pub fn transition_progress(&self, now: Duration) -> Option<f32> {
        let State::Transitioning { started, .. } = self.state else {
            return None;
        };
        let total = self.config.transition_duration();
        if total.is_zero() {
            return Some(1.0);
        }
        let elapsed = now.saturating_sub(started);
        Some((elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // -- helpers -------------------------------------------------------------

    fn arm_advance(&mut self, from: Duration) {
        self.advance.arm(from + self.config.advance_interval());
    }

    fn item(&self, index: usize) -> Arc<NewsItem> {
        debug_assert!(
            index < self.items.len(),
            "index {index} out of range for {} items",
            self.items.len()
        );
        Arc::clone(&self.items[index])
    }

    fn same_keys(&self, items: &[NewsItem]) -> bool {
        self.items.len() == items.len()
            && self.items.iter().zip(items).all(|(a, b)| a.url == b.url)
    }
}
