//! UI state machine
//!
//! Pure state machine that mirrors what the session reports and turns user
//! intents into actions for the runtime to execute. Completely decoupled from
//! I/O: it consumes [`AppEvent`]s and produces [`AppAction`]s.
//!
//! # Responsibilities
//!
//! - Mirrors the group list, the selection and the connection state from
//!   [`groupline_client::SessionEvent`]s.
//! - Tracks unread badges, which the session does not know about.
//! - Holds the endpoint and username used for the next connect.
//! - Keeps a transient status message so no failure goes unseen.

mod action;
mod event;

use std::collections::HashSet;

pub use action::AppAction;
use groupline_client::{ConnectionState, Endpoint, SessionEvent};
pub use event::AppEvent;

/// UI state machine.
#[derive(Debug, Clone)]
pub struct App {
    /// Connection state as last reported by the session.
    state: ConnectionState,
    /// Server for the next connect.
    endpoint: Endpoint,
    /// Name for the next connect. `None` until given.
    username: Option<String>,
    /// Known groups in discovery order.
    groups: Vec<String>,
    /// Selected group. `None` if nothing is selected.
    selected: Option<String>,
    /// Groups with lines the user has not looked at.
    unread: HashSet<String>,
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create an idle App.
    pub fn new(endpoint: Endpoint, username: Option<String>) -> Self {
        Self {
            state: ConnectionState::Idle,
            endpoint,
            username,
            groups: Vec::new(),
            selected: None,
            unread: HashSet::new(),
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        if let AppEvent::Session(event) = event {
            self.apply_session_event(event);
        }
        vec![AppAction::Render]
    }

    fn apply_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::GroupsChanged { groups } => {
                self.unread.retain(|g| groups.contains(g));
                self.groups = groups;
            },
            SessionEvent::MessageAppended { group, .. } => {
                if self.selected.as_ref() != Some(&group) {
                    self.unread.insert(group);
                }
            },
            SessionEvent::NoticeRecorded { text } => {
                self.status_message = Some(text);
            },
            SessionEvent::SelectionChanged { group } => {
                if let Some(g) = &group {
                    self.unread.remove(g);
                }
                self.selected = group;
            },
            SessionEvent::ConnectionStateChanged { state } => {
                if let ConnectionState::Failed { reason } = &state {
                    self.status_message = Some(format!("Connection failed: {reason}"));
                }
                self.state = state;
            },
            SessionEvent::Error { message, .. } => {
                self.status_message = Some(format!("Error: {message}"));
            },
        }
    }

    /// Set a status message to display to the user.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Connect as `username`, or as the remembered name if `None`.
    ///
    /// The connection state is left alone; it changes only when the session
    /// reports a transition.
    pub fn connect(&mut self, username: Option<String>) -> Vec<AppAction> {
        let Some(username) = username.or_else(|| self.username.clone()) else {
            self.set_status("Usage: /connect <name>");
            return vec![AppAction::Render];
        };

        self.username = Some(username.clone());
        self.status_message = Some(format!("Connecting to {}... (Esc to cancel)", self.endpoint));
        vec![AppAction::Connect { username, endpoint: self.endpoint.clone() }, AppAction::Render]
    }

    /// Close the current connection.
    pub fn disconnect(&self) -> Vec<AppAction> {
        vec![AppAction::Disconnect, AppAction::Render]
    }

    /// Change the server for the next connect.
    pub fn set_server(&mut self, input: &str) -> Vec<AppAction> {
        match input.parse::<Endpoint>() {
            Ok(endpoint) => {
                self.status_message = Some(if self.state.is_active() {
                    format!("Server set to {endpoint}; applies on next connect")
                } else {
                    format!("Server set to {endpoint}")
                });
                self.endpoint = endpoint.clone();
                vec![AppAction::SetServer { endpoint }, AppAction::Render]
            },
            Err(e) => {
                self.set_status(format!("Error: {e}"));
                vec![AppAction::Render]
            },
        }
    }

    /// Select a group by name.
    pub fn select_group(&self, group: String) -> Vec<AppAction> {
        vec![AppAction::SelectGroup { group }, AppAction::Render]
    }

    /// Send text to the selected group.
    pub fn send_message(&self, text: String) -> Vec<AppAction> {
        vec![AppAction::SendMessage { text }, AppAction::Render]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Select the group after the current one in discovery order, wrapping.
    pub fn cycle_group(&self) -> Vec<AppAction> {
        if self.groups.is_empty() {
            return vec![];
        }

        let current = self.selected.as_ref().and_then(|s| self.groups.iter().position(|g| g == s));
        let next = current.map_or(0, |idx| (idx + 1) % self.groups.len());

        match self.groups.get(next) {
            Some(group) => self.select_group(group.clone()),
            None => vec![],
        }
    }

    /// Connection state.
    pub fn connection_state(&self) -> &ConnectionState {
        &self.state
    }

    /// Server for the next connect.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Name for the next connect.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Known groups in discovery order.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Selected group. `None` if nothing is selected.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Whether a group has unseen lines.
    pub fn is_unread(&self, group: &str) -> bool {
        self.unread.contains(group)
    }

    /// Status message to display. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
