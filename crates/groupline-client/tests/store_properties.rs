//! Property-based tests for `GroupStore` invariants.
//!
//! Random sequences of announcements, messages and selections are applied to
//! a store; after every step the structural invariants must hold.

use std::collections::HashSet;

use groupline_client::{GroupListPolicy, GroupStore, LineOrigin};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Announce(Vec<String>, GroupListPolicy),
    Message(String, String),
    Select(String),
    AutoSelect,
}

fn group_key() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["General", "Dev", "Ops", "Random", "QA"]).prop_map(str::to_owned)
}

fn policy() -> impl Strategy<Value = GroupListPolicy> {
    prop_oneof![Just(GroupListPolicy::AppendOnly), Just(GroupListPolicy::Replace)]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (prop::collection::vec(group_key(), 0..5), policy()).prop_map(|(n, p)| Op::Announce(n, p)),
        (group_key(), "[a-z ]{1,20}").prop_map(|(g, t)| Op::Message(g, t)),
        group_key().prop_map(Op::Select),
        Just(Op::AutoSelect),
    ]
}

fn apply(store: &mut GroupStore, op: &Op) {
    match op {
        Op::Announce(names, policy) => {
            store.apply_group_list(names, *policy);
        },
        Op::Message(group, text) => {
            store.record_message(group, text.as_str(), LineOrigin::Remote);
        },
        Op::Select(group) => {
            let _ = store.select(group);
        },
        Op::AutoSelect => {
            store.select_first_if_unselected();
        },
    }
}

fn assert_invariants(store: &GroupStore) -> Result<(), TestCaseError> {
    let names = store.group_names();
    let unique: HashSet<&String> = names.iter().collect();
    prop_assert_eq!(unique.len(), names.len(), "duplicate group in {:?}", names);

    if let Some(selected) = store.selected_key() {
        prop_assert!(store.contains(selected), "selected {} not in {:?}", selected, names);
    }

    for name in &names {
        for line in store.messages_for(name) {
            prop_assert_eq!(line.group(), name.as_str());
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_invariants_hold_after_every_op(ops in prop::collection::vec(op(), 0..40)) {
        let mut store = GroupStore::new();
        for op in &ops {
            apply(&mut store, op);
            assert_invariants(&store)?;
        }
    }

    #[test]
    fn prop_append_only_preserves_first_seen_order(
        batches in prop::collection::vec(prop::collection::vec(group_key(), 0..5), 0..8),
    ) {
        let mut store = GroupStore::new();
        let mut expected: Vec<String> = Vec::new();

        for batch in &batches {
            store.apply_group_list(batch, GroupListPolicy::AppendOnly);
            for name in batch {
                if !expected.contains(name) {
                    expected.push(name.clone());
                }
            }
        }

        prop_assert_eq!(store.group_names(), expected);
    }

    #[test]
    fn prop_history_keeps_arrival_order(
        lines in prop::collection::vec((group_key(), "[a-z]{1,10}"), 0..30),
    ) {
        let mut store = GroupStore::new();
        for (group, text) in &lines {
            store.record_message(group, text.as_str(), LineOrigin::Remote);
        }

        for name in store.group_names() {
            let expected: Vec<&str> =
                lines.iter().filter(|(g, _)| *g == name).map(|(_, t)| t.as_str()).collect();
            let actual: Vec<&str> = store.messages_for(&name).iter().map(|l| l.text()).collect();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn prop_announcements_never_touch_history(
        lines in prop::collection::vec((group_key(), "[a-z]{1,10}"), 1..10),
        names in prop::collection::vec(group_key(), 0..5),
        policy in policy(),
    ) {
        let mut store = GroupStore::new();
        for (group, text) in &lines {
            store.record_message(group, text.as_str(), LineOrigin::Remote);
        }
        let before: Vec<usize> = lines.iter().map(|(g, _)| store.messages_for(g).len()).collect();

        store.apply_group_list(&names, policy);

        let after: Vec<usize> = lines.iter().map(|(g, _)| store.messages_for(g).len()).collect();
        prop_assert_eq!(before, after);
    }
}
