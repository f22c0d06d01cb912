//! The read-only projection handed to the rendering layer.

use std::sync::Arc;
use std::time::Duration;

use crate::source::NewsItem;

/// Coarse phase of the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No items; nothing is displayed and no timers are armed.
    Empty,
    /// One item fully visible.
    Idle,
    /// Two items visible while the slide animation runs.
    Transitioning,
}

/// What the caller should draw.  Renderers depend on this and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Empty,
    Idle {
        visible: Arc<NewsItem>,
    },
    Transitioning {
        outgoing: Arc<NewsItem>,
        incoming: Arc<NewsItem>,
    },
}

impl View {
    pub fn phase(&self) -> Phase {
        match self {
            View::Empty => Phase::Empty,
            View::Idle { .. } => Phase::Idle,
            View::Transitioning { .. } => Phase::Transitioning,
        }
    }

    /// The item that is (or is becoming) the settled one.
    pub fn focused(&self) -> Option<&NewsItem> {
        match self {
            View::Empty => None,
            View::Idle { visible } => Some(visible),
            View::Transitioning { incoming, .. } => Some(incoming),
        }
    }
}

/// A state change produced by a timer, stamped with the session time it
/// logically happened at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub at: Duration,
    pub view: View,
}
