//! Outbound message formatting.

use std::fmt;

use crate::SYSTEM_SENDER;

/// A chat line addressed to one group.
///
/// Rendered as `[{group}] {username}: {text}`. The rendered form is both what
/// goes on the wire and what the sender echoes into its own history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundChat {
    /// Target group key.
    pub group: String,
    /// Display name of the sender.
    pub username: String,
    /// Message body, trimmed.
    pub text: String,
}

impl OutboundChat {
    /// Create an outbound line. Surrounding whitespace of `text` is dropped.
    pub fn new(group: impl Into<String>, username: impl Into<String>, text: &str) -> Self {
        Self { group: group.into(), username: username.into(), text: text.trim().to_owned() }
    }

    /// UTF-8 bytes for a single write.
    pub fn encode(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for OutboundChat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.group, self.username, self.text)
    }
}

/// Format a locally generated notice, e.g. `[System]: Connected to server.`
pub fn system_notice(text: &str) -> String {
    format!("[{SYSTEM_SENDER}]: {text}")
}
