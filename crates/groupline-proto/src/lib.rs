//! Groupline wire protocol
//!
//! Plaintext, line-oriented group chat over a raw TCP stream. There is no
//! handshake, no length prefix and no terminator: every write is one logical
//! message, and every read chunk is assumed to carry exactly one.
//!
//! # Messages
//!
//! - Client to server: `[{group}] {username}: {text}` ([`OutboundChat`])
//! - Server to client, group announcement: `GROUPS:{a},{b},...`
//! - Server to client, chat relay: anything else, attributed by its leading
//!   `[{group}]` prefix
//!
//! Inbound chunks are classified by [`decode`] into an [`Inbound`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod inbound;
mod outbound;

pub use inbound::{Inbound, decode, decode_text, extract_group, parse_group_list};
pub use outbound::{OutboundChat, system_notice};

/// Prefix marking a server group announcement.
pub const GROUPS_PREFIX: &str = "GROUPS:";

/// Separator between names in a group announcement.
pub const GROUP_SEPARATOR: char = ',';

/// Sender name used for locally generated notices.
pub const SYSTEM_SENDER: &str = "System";
