//! Session controller.
//!
//! [`Session`] owns the connection, the [`GroupStore`] and the connection
//! state. It is the single owner of all mutable client state: the receive loop
//! runs as its own task but only forwards raw chunks, and every store mutation
//! happens inside a `&mut self` method here. Inbound and outbound flows are
//! therefore serialized by ownership rather than locks.
//!
//! # Driving a session
//!
//! A front end calls [`Session::connect`], [`Session::send_message`],
//! [`Session::select_group`] and [`Session::disconnect`] in response to user
//! commands, races [`Session::process_inbound`] against its own input in a
//! `select!`, and drains [`Session::take_events`] after each step to update
//! its view.
//!
//! No operation retries or reconnects on its own, and neither connect nor
//! idle reads time out.

use groupline_proto::{Inbound, OutboundChat, decode, system_notice};

use crate::{
    ConnectionState, Endpoint, ErrorKind, GroupListPolicy, GroupStore, LineOrigin,
    PreconditionError, SessionError, SessionEvent, ValidationError,
    transport::{Connection, TransportEvent},
};

/// Behavioural switches for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// How `GROUPS:` announcements are applied.
    pub group_list_policy: GroupListPolicy,
    /// Select the first known group whenever nothing is selected.
    pub auto_select_first: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { group_list_policy: GroupListPolicy::AppendOnly, auto_select_first: true }
    }
}

/// Client session: connection lifecycle, routing and local echo.
pub struct Session {
    config: SessionConfig,
    state: ConnectionState,
    username: Option<String>,
    store: GroupStore,
    connection: Option<Connection>,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Create an idle session.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: ConnectionState::Idle,
            username: None,
            store: GroupStore::new(),
            connection: None,
            events: Vec::new(),
        }
    }

    /// Connect to `endpoint` as `username`.
    ///
    /// The username is trimmed and must not be blank; no socket is opened
    /// otherwise. On success the store is reset for the new session and the
    /// receive loop is running. On failure the session returns to
    /// [`ConnectionState::Idle`].
    ///
    /// If this future is dropped before it resolves the session stays in
    /// [`ConnectionState::Connecting`]; call [`Session::disconnect`] to
    /// abandon the attempt.
    pub async fn connect(
        &mut self,
        username: &str,
        endpoint: &Endpoint,
    ) -> Result<(), SessionError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(self.fail(ValidationError::EmptyUsername));
        }
        if self.state.is_active() {
            return Err(self.fail(PreconditionError::AlreadyConnected));
        }

        tracing::info!(%endpoint, username, "connecting");
        self.set_state(ConnectionState::Connecting);

        match Connection::open(endpoint).await {
            Ok(connection) => {
                self.reset_store();
                self.username = Some(username.to_owned());
                self.connection = Some(connection);
                self.set_state(ConnectionState::Connected);
                self.notice("Connected to server.");
                Ok(())
            },
            Err(err) => {
                tracing::warn!(error = %err, "connect failed");
                self.set_state(ConnectionState::Idle);
                Err(self.fail(err))
            },
        }
    }

    /// Send `text` to the selected group.
    ///
    /// The formatted line is echoed into the local history before it is
    /// written. A failed write leaves the echo in place, records a notice in
    /// the same group and ends the session.
    pub async fn send_message(&mut self, text: &str) -> Result<(), SessionError> {
        let Some(group) = self.store.selected_key().map(str::to_owned) else {
            return Err(self.fail(PreconditionError::NoGroupSelected));
        };
        if text.trim().is_empty() {
            return Err(self.fail(PreconditionError::EmptyMessage));
        }
        let open = self.connection.as_ref().is_some_and(Connection::is_open);
        let Some(username) = self.username.clone().filter(|_| open) else {
            return Err(self.fail(PreconditionError::NotConnected));
        };

        let chat = OutboundChat::new(group.as_str(), username, text);
        self.record(&group, chat.to_string(), LineOrigin::Local);

        let result = match self.connection.as_mut() {
            Some(connection) => connection.write(&chat.encode()).await,
            None => return Err(self.fail(PreconditionError::NotConnected)),
        };

        if let Err(err) = result {
            tracing::warn!(error = %err, %group, "send failed");
            let notice = system_notice(&format!("Error sending message: {err}"));
            self.record(&group, notice, LineOrigin::System);
            self.teardown(ConnectionState::Failed { reason: err.to_string() });
            return Err(self.fail(err));
        }

        Ok(())
    }

    /// Select a known group.
    pub fn select_group(&mut self, group_key: &str) -> Result<(), SessionError> {
        if let Err(err) = self.store.select(group_key) {
            return Err(self.fail(err));
        }
        self.events.push(SessionEvent::SelectionChanged { group: Some(group_key.to_owned()) });
        Ok(())
    }

    /// Close the connection and return to [`ConnectionState::Idle`].
    ///
    /// Callable in any state. History stays readable until the next connect.
    pub fn disconnect(&mut self) {
        if self.connection.is_some() {
            tracing::info!("disconnecting");
        }
        self.teardown(ConnectionState::Idle);
    }

    /// Wait for the next transport event and apply it.
    ///
    /// Never resolves while there is no connection. Cancel-safe: nothing is
    /// lost if the future is dropped before it resolves.
    pub async fn process_inbound(&mut self) {
        let event = match self.connection.as_mut() {
            Some(connection) => connection.recv().await,
            None => std::future::pending().await,
        };

        match event {
            Some(TransportEvent::Chunk(chunk)) => self.apply_inbound(decode(&chunk)),
            Some(TransportEvent::Closed) | None => {
                tracing::info!("server closed the connection");
                self.notice("Disconnected from server.");
                self.teardown(ConnectionState::Disconnected);
            },
            Some(TransportEvent::Failed(err)) => {
                tracing::warn!(error = %err, "connection lost");
                self.notice(&format!("Connection lost: {err}"));
                self.teardown(ConnectionState::Failed { reason: err.to_string() });
                self.events.push(SessionEvent::Error {
                    kind: ErrorKind::Read,
                    message: err.to_string(),
                });
            },
        }
    }

    /// Apply one decoded inbound message to the store.
    pub fn apply_inbound(&mut self, inbound: Inbound) {
        match inbound {
            Inbound::GroupList(names) => {
                let change = self.store.apply_group_list(&names, self.config.group_list_policy);
                if change.groups_changed {
                    tracing::debug!(groups = ?self.store.group_names(), "group list changed");
                    let groups = self.store.group_names();
                    self.events.push(SessionEvent::GroupsChanged { groups });
                }
                if change.selection_cleared {
                    self.events.push(SessionEvent::SelectionChanged { group: None });
                }
                self.auto_select();
            },
            Inbound::Chat { group, text } => self.record(&group, text, LineOrigin::Remote),
            Inbound::Undeliverable(text) => {
                tracing::debug!(len = text.len(), "dropping line without group prefix");
            },
        }
    }

    /// Drain pending notifications.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current connection state.
    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Whether the socket is open.
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Username of the current or last session.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Groups, history and notices.
    pub fn store(&self) -> &GroupStore {
        &self.store
    }

    fn record(&mut self, group: &str, text: String, origin: LineOrigin) {
        let Some(recorded) = self.store.record_message(group, text, origin) else {
            return;
        };
        if recorded.new_group {
            self.events.push(SessionEvent::GroupsChanged { groups: self.store.group_names() });
        }
        self.events
            .push(SessionEvent::MessageAppended { group: group.to_owned(), line: recorded.line });
        self.auto_select();
    }

    fn notice(&mut self, text: &str) {
        let text = system_notice(text);
        self.store.record_notice(text.as_str());
        self.events.push(SessionEvent::NoticeRecorded { text });
    }

    fn auto_select(&mut self) {
        if !self.config.auto_select_first {
            return;
        }
        if let Some(key) = self.store.select_first_if_unselected() {
            let group = key.to_owned();
            tracing::debug!(%group, "auto-selected group");
            self.events.push(SessionEvent::SelectionChanged { group: Some(group) });
        }
    }

    fn reset_store(&mut self) {
        let had_groups = !self.store.groups().is_empty();
        let had_selection = self.store.selected_key().is_some();
        self.store.clear();

        if had_groups {
            self.events.push(SessionEvent::GroupsChanged { groups: Vec::new() });
        }
        if had_selection {
            self.events.push(SessionEvent::SelectionChanged { group: None });
        }
    }

    fn teardown(&mut self, state: ConnectionState) {
        if let Some(mut connection) = self.connection.take() {
            connection.close();
        }
        self.set_state(state);
    }

    fn set_state(&mut self, state: ConnectionState) {
        if self.state != state {
            self.state = state.clone();
            self.events.push(SessionEvent::ConnectionStateChanged { state });
        }
    }

    /// Report an error as an event and hand it back for returning.
    fn fail(&mut self, err: impl Into<SessionError>) -> SessionError {
        let err = err.into();
        self.events.push(SessionEvent::Error { kind: err.kind(), message: err.to_string() });
        err
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
