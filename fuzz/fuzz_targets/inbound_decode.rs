//! Fuzz target for inbound chunk decoding
//!
//! Feeds arbitrary bytes to `decode` to find:
//! - Parser panics on malformed UTF-8 or bracket placement
//! - Group lists containing blank or padded names
//! - Chat relays attributed to an empty group
//!
//! Decoding is total: every input classifies, nothing panics.

#![no_main]

use groupline_proto::{Inbound, decode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    match decode(data) {
        Inbound::GroupList(names) => {
            for name in names {
                assert!(!name.is_empty());
                assert_eq!(name.trim(), name);
            }
        },
        Inbound::Chat { group, text } => {
            assert!(!group.is_empty());
            assert!(text.starts_with(&format!("[{group}]")));
        },
        Inbound::Undeliverable(_) => {},
    }
});
