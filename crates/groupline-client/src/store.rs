//! In-memory group and message state.
//!
//! [`GroupStore`] is the authoritative view of what the client knows: the
//! ordered list of groups announced by the server (or implied by traffic),
//! the append-only log of chat lines per group, the selected group, and a
//! separate log of session notices that belong to no group.
//!
//! The store does no I/O and emits nothing. Mutating methods report what
//! changed so the session can publish events for real changes only.
//!
//! # Invariants
//!
//! - Group keys in [`GroupStore::groups`] are unique and keep first-seen order.
//! - The selected key, if any, is present in [`GroupStore::groups`].
//! - Every line in `messages_for(g)` has `group() == g`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::GroupNotFound;

/// How a `GROUPS:` announcement is applied to the known groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupListPolicy {
    /// Union with the known groups; nothing is ever removed.
    #[default]
    AppendOnly,
    /// Rebuild the list from the announcement. Dropped groups keep their
    /// history and regain it if re-announced.
    Replace,
}

/// A chat group. The key is the group name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    name: String,
}

impl Group {
    fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Routing key.
    pub fn key(&self) -> &str {
        &self.name
    }
}

/// Where a chat line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOrigin {
    /// Relayed by the server.
    Remote,
    /// Local echo of our own send.
    Local,
    /// Generated locally to report a session event.
    System,
}

/// One line in a group's history. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    group: String,
    text: String,
    origin: LineOrigin,
}

impl ChatLine {
    /// Key of the group this line belongs to.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Full line text as displayed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Origin of the line.
    pub fn origin(&self) -> LineOrigin {
        self.origin
    }
}

/// Result of [`GroupStore::record_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    /// The appended line.
    pub line: ChatLine,
    /// Whether the line introduced a previously unknown group.
    pub new_group: bool,
}

/// Result of [`GroupStore::apply_group_list`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupListChange {
    /// The group list differs from before.
    pub groups_changed: bool,
    /// The selected group was dropped and the selection cleared.
    pub selection_cleared: bool,
}

/// Groups, per-group history, selection and session notices.
#[derive(Debug, Clone, Default)]
pub struct GroupStore {
    groups: Vec<Group>,
    messages: HashMap<String, Vec<ChatLine>>,
    selected: Option<String>,
    notices: Vec<String>,
}

impl GroupStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a server group announcement.
    ///
    /// Duplicates within `names` collapse to their first occurrence. Message
    /// history is never touched.
    pub fn apply_group_list(
        &mut self,
        names: &[String],
        policy: GroupListPolicy,
    ) -> GroupListChange {
        match policy {
            GroupListPolicy::AppendOnly => {
                let mut changed = false;
                for name in names {
                    if !name.is_empty() && !self.contains(name) {
                        self.groups.push(Group::new(name.as_str()));
                        changed = true;
                    }
                }
                GroupListChange { groups_changed: changed, selection_cleared: false }
            },
            GroupListPolicy::Replace => {
                let mut rebuilt: Vec<Group> = Vec::with_capacity(names.len());
                for name in names {
                    if !name.is_empty() && !rebuilt.iter().any(|g| g.key() == name) {
                        rebuilt.push(Group::new(name.as_str()));
                    }
                }

                let groups_changed = rebuilt != self.groups;
                self.groups = rebuilt;

                let selection_cleared =
                    self.selected.as_deref().is_some_and(|key| !self.contains(key));
                if selection_cleared {
                    self.selected = None;
                }

                GroupListChange { groups_changed, selection_cleared }
            },
        }
    }

    /// Append a line to a group's history, creating the group if needed.
    ///
    /// Returns `None` and changes nothing if `group_key` is empty.
    pub fn record_message(
        &mut self,
        group_key: &str,
        text: impl Into<String>,
        origin: LineOrigin,
    ) -> Option<Recorded> {
        if group_key.is_empty() {
            return None;
        }

        let new_group = !self.contains(group_key);
        if new_group {
            self.groups.push(Group::new(group_key));
        }

        let line = ChatLine { group: group_key.to_owned(), text: text.into(), origin };
        self.messages.entry(group_key.to_owned()).or_default().push(line.clone());

        Some(Recorded { line, new_group })
    }

    /// Append a session notice that belongs to no group.
    pub fn record_notice(&mut self, text: impl Into<String>) {
        self.notices.push(text.into());
    }

    /// Select a known group.
    pub fn select(&mut self, group_key: &str) -> Result<(), GroupNotFound> {
        if !self.contains(group_key) {
            return Err(GroupNotFound { key: group_key.to_owned() });
        }
        self.selected = Some(group_key.to_owned());
        Ok(())
    }

    /// Select the first known group if nothing is selected.
    ///
    /// Returns the newly selected key, or `None` if the selection is unchanged.
    pub fn select_first_if_unselected(&mut self) -> Option<&str> {
        if self.selected.is_some() {
            return None;
        }
        let first = self.groups.first()?.key().to_owned();
        self.selected = Some(first);
        self.selected.as_deref()
    }

    /// History of a group in arrival order. Empty for unknown keys.
    pub fn messages_for(&self, group_key: &str) -> &[ChatLine] {
        self.messages.get(group_key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Known groups in discovery order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Known group names in discovery order.
    pub fn group_names(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.name().to_owned()).collect()
    }

    /// Whether a group key is known.
    pub fn contains(&self, group_key: &str) -> bool {
        self.groups.iter().any(|g| g.key() == group_key)
    }

    /// Selected group key. `None` if nothing is selected.
    pub fn selected_key(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Session notices in arrival order.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Whether the store holds no groups, messages or notices.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.messages.is_empty() && self.notices.is_empty()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Badge label for a group name.
///
/// Uses the first two space-separated words. A single word yields its first
/// two characters; two or more words yield the first character of each of the
/// first two. The result is upper-cased.
pub fn group_initials(name: &str) -> String {
    let mut words = name.split(' ').filter(|w| !w.is_empty());
    let (Some(first), second) = (words.next(), words.next()) else {
        return String::new();
    };

    let label: String = match second {
        None => first.chars().take(2).collect(),
        Some(second) => first.chars().take(1).chain(second.chars().take(1)).collect(),
    };
    label.to_uppercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn initials() {
        assert_eq!(group_initials("Dev Team"), "DT");
        assert_eq!(group_initials("Ops"), "OP");
        assert_eq!(group_initials("A"), "A");
        assert_eq!(group_initials("quality assurance crew"), "QA");
        assert_eq!(group_initials("  spaced   out "), "SO");
        assert_eq!(group_initials("élan vital"), "ÉV");
        assert_eq!(group_initials(""), "");
        assert_eq!(group_initials("   "), "");
    }

    #[test]
    fn append_only_keeps_first_seen_order() {
        let mut store = GroupStore::new();
        let policy = GroupListPolicy::AppendOnly;

        let change = store.apply_group_list(&names(&["General", "Dev"]), policy);
        assert!(change.groups_changed);

        let change = store.apply_group_list(&names(&["Ops", "General"]), policy);
        assert!(change.groups_changed);
        assert_eq!(store.group_names(), names(&["General", "Dev", "Ops"]));

        let change = store.apply_group_list(&names(&["Dev"]), policy);
        assert!(!change.groups_changed);
        assert_eq!(store.group_names(), names(&["General", "Dev", "Ops"]));
    }

    #[test]
    fn duplicates_in_one_announcement_collapse() {
        let mut store = GroupStore::new();
        store.apply_group_list(&names(&["A", "B", "A"]), GroupListPolicy::AppendOnly);
        assert_eq!(store.group_names(), names(&["A", "B"]));

        store.apply_group_list(&names(&["C", "C", "B"]), GroupListPolicy::Replace);
        assert_eq!(store.group_names(), names(&["C", "B"]));
    }

    #[test]
    fn replace_drops_missing_groups_but_keeps_history() {
        let mut store = GroupStore::new();
        store.apply_group_list(&names(&["General", "Dev"]), GroupListPolicy::Replace);
        store.record_message("Dev", "[Dev] a: one", LineOrigin::Remote);
        store.select("Dev").unwrap();

        let change = store.apply_group_list(&names(&["General"]), GroupListPolicy::Replace);
        assert_eq!(change, GroupListChange { groups_changed: true, selection_cleared: true });
        assert_eq!(store.group_names(), names(&["General"]));
        assert_eq!(store.selected_key(), None);

        store.apply_group_list(&names(&["General", "Dev"]), GroupListPolicy::Replace);
        assert_eq!(store.messages_for("Dev").len(), 1);
    }

    #[test]
    fn replace_with_same_list_is_not_a_change() {
        let mut store = GroupStore::new();
        store.apply_group_list(&names(&["A", "B"]), GroupListPolicy::Replace);
        let change = store.apply_group_list(&names(&["A", "B"]), GroupListPolicy::Replace);
        assert_eq!(change, GroupListChange::default());
    }

    #[test]
    fn reannounce_preserves_history() {
        let mut store = GroupStore::new();
        store.apply_group_list(&names(&["General"]), GroupListPolicy::AppendOnly);
        store.record_message("General", "[General] a: hi", LineOrigin::Remote);

        store.apply_group_list(&names(&["General"]), GroupListPolicy::AppendOnly);
        assert_eq!(store.messages_for("General").len(), 1);
    }

    #[test]
    fn record_message_creates_unknown_group() {
        let mut store = GroupStore::new();
        let recorded =
            store.record_message("Random", "[Random] b: yo", LineOrigin::Remote).unwrap();

        assert!(recorded.new_group);
        assert_eq!(recorded.line.group(), "Random");
        assert_eq!(store.group_names(), names(&["Random"]));

        let recorded =
            store.record_message("Random", "[Random] b: again", LineOrigin::Remote).unwrap();
        assert!(!recorded.new_group);
        assert_eq!(store.messages_for("Random").len(), 2);
    }

    #[test]
    fn record_message_ignores_empty_key() {
        let mut store = GroupStore::new();
        assert!(store.record_message("", "text", LineOrigin::Remote).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn messages_for_unknown_group_is_empty() {
        let store = GroupStore::new();
        assert!(store.messages_for("nope").is_empty());
    }

    #[test]
    fn select_requires_known_group() {
        let mut store = GroupStore::new();
        assert_eq!(store.select("General"), Err(GroupNotFound { key: "General".into() }));

        store.apply_group_list(&names(&["General"]), GroupListPolicy::AppendOnly);
        assert!(store.select("General").is_ok());
        assert_eq!(store.selected_key(), Some("General"));
    }

    #[test]
    fn select_first_only_when_unselected() {
        let mut store = GroupStore::new();
        assert_eq!(store.select_first_if_unselected(), None);

        store.apply_group_list(&names(&["A", "B"]), GroupListPolicy::AppendOnly);
        assert_eq!(store.select_first_if_unselected(), Some("A"));

        store.select("B").unwrap();
        assert_eq!(store.select_first_if_unselected(), None);
        assert_eq!(store.selected_key(), Some("B"));
    }

    #[test]
    fn notices_are_not_group_history() {
        let mut store = GroupStore::new();
        store.record_notice("[System]: Connected to server.");

        assert_eq!(store.notices().len(), 1);
        assert!(store.groups().is_empty());
        assert!(store.messages_for("System").is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let mut store = GroupStore::new();
        store.record_message("A", "[A] x: y", LineOrigin::Local);
        store.select("A").unwrap();
        store.record_notice("n");

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.selected_key(), None);
    }
}
