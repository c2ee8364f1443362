//! Client
//!
//! Session controller, group store and TCP transport for the Groupline chat
//! protocol. One [`Session`] owns one server connection, the groups discovered
//! on it and the per-group message history.
//!
//! # Architecture
//!
//! The [`Session`] is the only owner of mutable state. The receive loop in
//! [`transport`] runs as a separate task but only forwards raw chunks over a
//! channel; decoding, routing and store updates happen in
//! [`Session::process_inbound`]. Every state change is also queued as a
//! [`SessionEvent`] for the front end to drain.
//!
//! # Components
//!
//! - [`Session`]: Connection lifecycle, routing and local echo
//! - [`GroupStore`]: Discovered groups, selection and history
//! - [`Endpoint`]: Validated server address
//! - [`SettingsStore`]: Persisted endpoint and behaviour switches
//! - [`transport::Connection`]: Socket plus receive loop

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod endpoint;
mod error;
mod event;
mod session;
mod settings;
mod store;
pub mod transport;

pub use endpoint::{DEFAULT_HOST, DEFAULT_PORT, Endpoint};
pub use error::{
    ConfigError, ConnectError, ErrorKind, GroupNotFound, PreconditionError, ReadError, SessionError,
    ValidationError, WriteError,
};
pub use event::{ConnectionState, SessionEvent};
pub use session::{Session, SessionConfig};
pub use settings::{Settings, SettingsStore};
pub use store::{
    ChatLine, Group, GroupListChange, GroupListPolicy, GroupStore, LineOrigin, Recorded,
    group_initials,
};
