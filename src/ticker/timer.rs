//! Generation-tagged timer slots.
//!
//! The engine never owns a real OS timer.  Instead each timer kind has one
//! [`TimerSlot`] that records the deadline of the single outstanding instance
//! and a generation counter.  Arming or cancelling bumps the generation, so a
//! [`TimerToken`] handed out earlier no longer matches and is discarded when
//! it fires.

use std::time::Duration;

/// The two timers the rotation engine coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// How long an item stays fully visible before a transition begins.
    Advance,
    /// How long the slide animation between two items takes.
    Transition,
}

/// A handle to one armed timer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub generation: u64,
    /// Session time at which the timer is due.
    pub deadline: Duration,
}

/// Holds at most one outstanding timer of a given kind.
#[derive(Debug)]
pub struct TimerSlot {
    kind: TimerKind,
    generation: u64,
    deadline: Option<Duration>,
}

impl TimerSlot {
    pub fn new(kind: TimerKind) -> Self {
        Self {
            kind,
            generation: 0,
            deadline: None,
        }
    }

    /// Arm the slot, replacing any instance already outstanding.
    pub fn arm(&mut self, deadline: Duration) -> TimerToken {
        self.generation += 1;
        self.deadline = Some(deadline);
        TimerToken {
            kind: self.kind,
            generation: self.generation,
            deadline,
        }
    }

    /// Cancel the outstanding instance, if any.  Tokens issued before this
    /// call become stale.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.deadline = None;
    }

    /// The live token, if the slot is armed.
    pub fn token(&self) -> Option<TimerToken> {
        self.deadline.map(|deadline| TimerToken {
            kind: self.kind,
            generation: self.generation,
            deadline,
        })
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume `token` if it is the live instance of this slot.
    ///
    /// Returns `false` for tokens from another slot, superseded generations,
    /// or a slot that has already fired or been cancelled.  A successful claim
    /// disarms the slot so the same token can never fire twice.
    pub fn claim(&mut self, token: TimerToken) -> bool {
        let live = token.kind == self.kind
            && token.generation == self.generation
            && self.deadline.is_some();
        if live {
            self.deadline = None;
        }
        live
    }
}
