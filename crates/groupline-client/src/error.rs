//! Client error types.
//!
//! Errors are split by how the caller recovers from them:
//!
//! - [`ValidationError`] and [`PreconditionError`] are rejected locally before
//!   any I/O. Nothing changes; the user corrects the input.
//! - [`ConnectError`] leaves the session idle. The user may retry.
//! - [`ReadError`] and [`WriteError`] end the session. The user must
//!   reconnect explicitly.
//!
//! Nothing in the client retries on its own.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::Endpoint;

/// Coarse error category, attached to [`crate::SessionEvent::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad local input.
    Validation,
    /// Operation not allowed in the current session state.
    Precondition,
    /// Could not reach the server.
    Connect,
    /// Inbound stream failed.
    Read,
    /// Outbound write failed.
    Write,
    /// Unknown group.
    NotFound,
}

/// Bad local input. Never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Username is empty or whitespace.
    #[error("please enter your name before connecting")]
    EmptyUsername,

    /// Host is empty or whitespace.
    #[error("please enter a valid host address")]
    EmptyHost,

    /// Port is not a number in `1..=65535`.
    #[error("please enter a valid port number (1-65535), got {0:?}")]
    InvalidPort(String),

    /// Endpoint string is not `host:port`.
    #[error("expected host:port, got {0:?}")]
    MalformedEndpoint(String),
}

/// Operation rejected because the session is not in a state that allows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// Send attempted without a selected group.
    #[error("please select a group before sending a message")]
    NoGroupSelected,

    /// Send attempted with blank text.
    #[error("message is empty")]
    EmptyMessage,

    /// Operation requires a live connection.
    #[error("not connected to a server")]
    NotConnected,

    /// Connect attempted while a connection is open or opening.
    #[error("already connected")]
    AlreadyConnected,
}

/// Failed to open the TCP connection (DNS, refusal, unreachable host).
#[derive(Debug, Error)]
#[error("failed to connect to {endpoint}: {source}")]
pub struct ConnectError {
    /// Endpoint that was dialed.
    pub endpoint: Endpoint,
    /// Underlying socket error.
    #[source]
    pub source: io::Error,
}

/// Inbound stream failure.
#[derive(Debug, Error)]
#[error("read failed: {0}")]
pub struct ReadError(#[from] pub io::Error);

/// Outbound write failure.
#[derive(Debug, Error)]
#[error("write failed: {0}")]
pub struct WriteError(#[from] pub io::Error);

impl WriteError {
    /// Write attempted on a closed connection.
    pub(crate) fn closed() -> Self {
        Self(io::Error::new(io::ErrorKind::NotConnected, "connection closed"))
    }
}

/// Group key is not in the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown group {key:?}")]
pub struct GroupNotFound {
    /// Requested key.
    pub key: String,
}

/// Errors returned by [`crate::Session`] operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Bad local input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Operation not allowed in the current state.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// Could not reach the server.
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// Outbound write failed; the session has been torn down.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// Unknown group.
    #[error(transparent)]
    NotFound(#[from] GroupNotFound),
}

impl SessionError {
    /// Category for event reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Precondition(_) => ErrorKind::Precondition,
            Self::Connect(_) => ErrorKind::Connect,
            Self::Write(_) => ErrorKind::Write,
            Self::NotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Settings file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform config directory could be determined.
    #[error("could not determine a configuration directory")]
    NoConfigDir,

    /// Settings file exists but could not be read.
    #[error("failed to read settings at {}: {source}", path.display())]
    Read {
        /// Settings file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Settings file is not valid TOML or holds invalid values.
    #[error("failed to parse settings at {}: {source}", path.display())]
    Parse {
        /// Settings file path.
        path: PathBuf,
        /// Deserialization error.
        #[source]
        source: toml::de::Error,
    },

    /// Settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Settings file could not be written.
    #[error("failed to write settings at {}: {source}", path.display())]
    Write {
        /// Settings file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
