//! Session state and notifications.
//!
//! [`SessionEvent`]s are queued by the [`crate::Session`] as a side effect of
//! every state change and drained by the presentation layer with
//! [`crate::Session::take_events`]. The session never renders anything and
//! never touches a UI thread.

use crate::{ChatLine, ErrorKind};

/// Connection lifecycle.
///
/// `Idle → Connecting → Connected → Disconnected | Failed`. Every state other
/// than `Connecting` and `Connected` accepts a fresh connect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// No session. Initial state, and the state after an explicit disconnect
    /// or a failed connect attempt.
    #[default]
    Idle,
    /// TCP connect in progress.
    Connecting,
    /// Socket open and receive loop running.
    Connected,
    /// Peer closed the stream.
    Disconnected,
    /// The connection broke.
    Failed {
        /// Human-readable cause.
        reason: String,
    },
}

impl ConnectionState {
    /// Whether a connection is open or opening.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Connecting | Self::Connected)
    }
}

/// Notification for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The known group list changed.
    GroupsChanged {
        /// All known group names in discovery order.
        groups: Vec<String>,
    },

    /// A line was appended to a group's history.
    MessageAppended {
        /// Group key.
        group: String,
        /// The appended line.
        line: ChatLine,
    },

    /// A session notice was recorded.
    NoticeRecorded {
        /// Notice text.
        text: String,
    },

    /// The selected group changed.
    SelectionChanged {
        /// New selection. `None` if the selection was cleared.
        group: Option<String>,
    },

    /// The connection state changed.
    ConnectionStateChanged {
        /// New state.
        state: ConnectionState,
    },

    /// An operation failed.
    Error {
        /// Error category.
        kind: ErrorKind,
        /// Human-readable description.
        message: String,
    },
}
