//! Session events.
//!
//! Each event kind carries its own typed payload, so listeners match on the
//! variant instead of unpacking positional arguments.

use serde::{Deserialize, Serialize};

use crate::session::SessionStatus;

/// Something that can be published through an [`EventHub`](super::EventHub).
pub trait Event {
    /// Subscription key.
    type Kind: Copy + Eq + std::hash::Hash + std::fmt::Debug;

    /// The kind this event is published under.
    fn kind(&self) -> Self::Kind;
}

/// Kinds of session events, used as subscription keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionEventKind {
    /// Fired whenever the session status actually changes.
    StatusChanged,
    /// Fired after every resolved pair of selections.
    AttemptsChanged,
}

impl SessionEventKind {
    /// Stable name, as used by UI bindings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::StatusChanged => "status-changed",
            Self::AttemptsChanged => "attempts-changed",
        }
    }
}

impl std::fmt::Display for SessionEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Events published by the session controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The session moved from `old` to `new`.
    StatusChanged {
        new: SessionStatus,
        old: SessionStatus,
    },
    /// The attempt counter now reads `attempts`.
    AttemptsChanged { attempts: u32 },
}

impl Event for SessionEvent {
    type Kind = SessionEventKind;

    fn kind(&self) -> SessionEventKind {
        match self {
            Self::StatusChanged { .. } => SessionEventKind::StatusChanged,
            Self::AttemptsChanged { .. } => SessionEventKind::AttemptsChanged,
        }
    }
}
