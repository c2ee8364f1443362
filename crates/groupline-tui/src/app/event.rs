//! Inputs to the App state machine.

use groupline_client::SessionEvent;

/// Events consumed by [`crate::App::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Terminal resized. The next frame is laid out for the new size.
    Resize,

    /// Notification drained from the session.
    Session(SessionEvent),
}
