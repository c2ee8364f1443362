//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use groupline_client::Endpoint;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Connect to a server.
    Connect {
        /// Name to chat as.
        username: String,
        /// Server to dial.
        endpoint: Endpoint,
    },

    /// Close the current connection.
    Disconnect,

    /// Persist a new server for the next connect.
    SetServer {
        /// New server.
        endpoint: Endpoint,
    },

    /// Select a group.
    SelectGroup {
        /// Group key.
        group: String,
    },

    /// Send a message to the selected group.
    SendMessage {
        /// Message text as typed.
        text: String,
    },
}
