//! Fuzz target for session routing
//!
//! Drives a disconnected session with arbitrary inbound messages and local
//! selections, under both group list policies.
//!
//! # Invariants
//!
//! - Group names are unique
//! - The selection, if any, names a known group
//! - Every stored line belongs to the group it is filed under
//! - With auto-select on, a non-empty group list always has a selection

#![no_main]

use std::collections::HashSet;

use arbitrary::Arbitrary;
use groupline_client::{GroupListPolicy, Session, SessionConfig};
use groupline_proto::decode;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
struct Scenario {
    replace: bool,
    auto_select: bool,
    steps: Vec<Step>,
}

#[derive(Debug, Clone, Arbitrary)]
enum Step {
    Inbound(Vec<u8>),
    Select(String),
}

fuzz_target!(|scenario: Scenario| {
    let policy =
        if scenario.replace { GroupListPolicy::Replace } else { GroupListPolicy::AppendOnly };
    let mut session = Session::new(SessionConfig {
        group_list_policy: policy,
        auto_select_first: scenario.auto_select,
    });

    for step in scenario.steps {
        match step {
            Step::Inbound(bytes) => session.apply_inbound(decode(&bytes)),
            Step::Select(group) => {
                let _ = session.select_group(&group);
            },
        }
        let _ = session.take_events();

        let store = session.store();
        let names = store.group_names();
        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), names.len());

        if let Some(selected) = store.selected_key() {
            assert!(store.contains(selected));
        } else if scenario.auto_select {
            assert!(names.is_empty());
        }

        for name in &names {
            assert!(store.messages_for(name).iter().all(|line| line.group() == name));
        }
    }
});
