//! Property-based tests for the wire codec.
//!
//! Decoding must be total: arbitrary bytes classify without panicking, and
//! announcements never yield blank or padded names.

use groupline_proto::{GROUPS_PREFIX, Inbound, OutboundChat, decode, parse_group_list};
use proptest::prelude::*;

/// Group names as a server might announce them (no separators or brackets).
fn group_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 _-]{0,15}".prop_map(|s| s.trim().to_owned())
}

proptest! {
    #[test]
    fn prop_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode(&bytes);
    }

    #[test]
    fn prop_group_list_entries_are_trimmed_and_non_empty(body in ".{0,128}") {
        for name in parse_group_list(&body) {
            prop_assert!(!name.is_empty());
            prop_assert_eq!(name.trim(), name.as_str());
            prop_assert!(!name.contains(','));
        }
    }

    #[test]
    fn prop_announced_names_survive_padding(
        names in prop::collection::vec(group_name(), 0..8),
        pad in " {0,3}",
    ) {
        let body = names
            .iter()
            .map(|n| format!("{pad}{n}{pad}"))
            .collect::<Vec<_>>()
            .join(",");
        let expected: Vec<String> = names.into_iter().filter(|n| !n.is_empty()).collect();

        let decoded = decode(format!("{GROUPS_PREFIX}{body}").as_bytes());
        prop_assert_eq!(decoded, Inbound::GroupList(expected));
    }

    #[test]
    fn prop_outbound_lines_route_to_their_group(
        group in "[A-Za-z0-9 ]{1,12}",
        user in "[a-z]{1,8}",
        text in "[ -~]{0,64}",
    ) {
        prop_assume!(!group.starts_with(GROUPS_PREFIX));
        let chat = OutboundChat::new(group.clone(), user, &text);
        match decode(&chat.encode()) {
            Inbound::Chat { group: decoded, text: line } => {
                prop_assert_eq!(decoded, group);
                prop_assert_eq!(line, chat.to_string());
            },
            other => prop_assert!(false, "expected chat line, got {:?}", other),
        }
    }
}
