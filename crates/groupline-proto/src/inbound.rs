//! Inbound chunk classification.
//!
//! A chunk read from the socket is either a group announcement or a chat line.
//! Chat lines are attributed to a group by their leading `[group]` prefix;
//! lines without one cannot be routed and are reported as
//! [`Inbound::Undeliverable`] so the caller can drop them.

use crate::{GROUP_SEPARATOR, GROUPS_PREFIX};

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Full group announcement, in server order.
    ///
    /// Names are trimmed and empty entries removed. Duplicates are preserved;
    /// de-duplication is the store's job.
    GroupList(Vec<String>),

    /// Chat line attributed to a group.
    Chat {
        /// Group key recovered from the `[group]` prefix.
        group: String,
        /// Full line as received, prefix included.
        text: String,
    },

    /// Chat line with no well-formed `[group]` prefix.
    Undeliverable(String),
}

/// Decode one raw chunk.
///
/// Invalid UTF-8 is replaced rather than rejected, so decoding never fails.
pub fn decode(chunk: &[u8]) -> Inbound {
    decode_text(&String::from_utf8_lossy(chunk))
}

/// Classify already-decoded text.
pub fn decode_text(text: &str) -> Inbound {
    if let Some(body) = text.strip_prefix(GROUPS_PREFIX) {
        return Inbound::GroupList(parse_group_list(body));
    }

    match extract_group(text) {
        Some(group) => Inbound::Chat { group: group.to_owned(), text: text.to_owned() },
        None => Inbound::Undeliverable(text.to_owned()),
    }
}

/// Split the body of a `GROUPS:` announcement into group names.
///
/// Surrounding whitespace is insignificant and empty entries are dropped.
pub fn parse_group_list(body: &str) -> Vec<String> {
    body.split(GROUP_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Group key of a chat line, taken from its leading `[group]` prefix.
///
/// Returns `None` unless the text starts with `[` and the first `]` closes a
/// non-empty name.
pub fn extract_group(text: &str) -> Option<&str> {
    let rest = text.strip_prefix('[')?;
    let end = rest.find(']')?;
    let group = &rest[..end];
    (!group.is_empty()).then_some(group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_list_trims_and_drops_empty_entries() {
        assert_eq!(
            decode(b"GROUPS:Dev Team, QA ,  ,Ops"),
            Inbound::GroupList(vec!["Dev Team".into(), "QA".into(), "Ops".into()])
        );
    }

    #[test]
    fn empty_announcement_is_empty_list() {
        assert_eq!(decode(b"GROUPS:"), Inbound::GroupList(vec![]));
        assert_eq!(decode(b"GROUPS: , ,"), Inbound::GroupList(vec![]));
    }

    #[test]
    fn groups_prefix_is_case_sensitive() {
        assert_eq!(decode(b"groups:General"), Inbound::Undeliverable("groups:General".into()));
    }

    #[test]
    fn chat_line_keeps_full_text() {
        assert_eq!(decode(b"[General] Alice: hi"), Inbound::Chat {
            group: "General".into(),
            text: "[General] Alice: hi".into(),
        });
    }

    #[test]
    fn group_ends_at_first_closing_bracket() {
        assert_eq!(extract_group("[a]b] x: y"), Some("a"));
        assert_eq!(extract_group("[Dev Team] Bob: [ok]"), Some("Dev Team"));
    }

    #[test]
    fn malformed_prefixes_are_undeliverable() {
        for text in ["hello", "[] Alice: hi", "[General Alice: hi", " [General] x", ""] {
            assert_eq!(decode(text.as_bytes()), Inbound::Undeliverable(text.into()), "{text:?}");
        }
    }

    #[test]
    fn system_notice_is_routed_to_system_group() {
        assert_eq!(extract_group("[System]: Connected to server."), Some("System"));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let Inbound::Chat { group, text } = decode(b"[G] a: \xff") else {
            unreachable!("prefix is valid")
        };
        assert_eq!(group, "G");
        assert!(text.ends_with('\u{fffd}'));
    }
}
