//! Async runtime
//!
//! Event loop that drives terminal I/O and the client session. Uses
//! `tokio::select!` to handle terminal events and inbound server data
//! concurrently. Both branches are cancel-safe, so whichever loses the race
//! is simply polled again on the next iteration.

use std::io;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures::StreamExt;
use groupline_client::{Endpoint, Session, SettingsStore};
use thiserror::Error;

use crate::{
    App, AppAction, AppEvent, InputState, Tui,
    terminal::convert_key,
    ui::View,
};

/// Runtime errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Async runtime for the TUI.
///
/// Owns the terminal, the UI state machines, the session and the settings
/// store. Session failures never end the loop; they reach the user as status
/// messages.
pub struct Runtime {
    tui: Tui,
    app: App,
    input: InputState,
    session: Session,
    settings: SettingsStore,
}

impl Runtime {
    /// Take over the terminal and prepare an idle session.
    pub fn new(settings: SettingsStore) -> Result<Self, RuntimeError> {
        let app = App::new(settings.endpoint().clone(), settings.settings().username.clone());
        let session = Session::new(settings.settings().session_config());
        let tui = Tui::enter()?;

        Ok(Self { tui, app, input: InputState::new(), session, settings })
    }

    /// Run the main event loop until the user quits.
    pub async fn run(mut self) -> Result<(), RuntimeError> {
        let mut events = EventStream::new();
        self.render()?;

        loop {
            let should_quit = tokio::select! {
                // Terminal events
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_terminal_event(event, &mut events).await?,
                        Some(Err(e)) => return Err(RuntimeError::Io(e)),
                        None => true,
                    }
                }

                // Data from the server
                () = self.session.process_inbound() => {
                    let actions = self.drain_session();
                    self.process_actions(actions, &mut events).await?
                }
            };

            if should_quit {
                break;
            }
        }

        self.session.disconnect();
        Ok(())
    }

    /// Handle a terminal event and return whether to quit.
    async fn handle_terminal_event(
        &mut self,
        event: Event,
        events: &mut EventStream,
    ) -> Result<bool, RuntimeError> {
        let actions = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match convert_key(key.code) {
                Some(key) => self.input.handle_key(key, &mut self.app),
                None => return Ok(false),
            },
            Event::Resize(..) => self.app.handle(AppEvent::Resize),
            _ => return Ok(false),
        };

        self.process_actions(actions, events).await
    }

    /// Process actions returned by the app. Returns true if should quit.
    ///
    /// Uses iterative processing to avoid async recursion between actions and
    /// events.
    async fn process_actions(
        &mut self,
        initial_actions: Vec<AppAction>,
        events: &mut EventStream,
    ) -> Result<bool, RuntimeError> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.render()?,
                    AppAction::Quit => return Ok(true),
                    AppAction::Connect { username, endpoint } => {
                        self.connect(&username, &endpoint, events).await?;
                    },
                    AppAction::Disconnect => self.session.disconnect(),
                    AppAction::SetServer { endpoint } => {
                        if let Err(e) = self.settings.set_endpoint(endpoint) {
                            tracing::warn!(error = %e, "failed to save endpoint");
                            self.app.set_status(format!("Error: {e}"));
                        }
                    },
                    AppAction::SelectGroup { group } => {
                        if let Err(e) = self.session.select_group(&group) {
                            tracing::debug!(error = %e, "select rejected");
                        }
                    },
                    AppAction::SendMessage { text } => {
                        match self.session.send_message(&text).await {
                            Ok(()) => self.input.clear(),
                            Err(e) => tracing::debug!(error = %e, "send rejected"),
                        }
                    },
                }

                pending_actions.extend(self.drain_session());
            }
        }
        Ok(false)
    }

    /// Dial the server, racing the attempt against Esc.
    async fn connect(
        &mut self,
        username: &str,
        endpoint: &Endpoint,
        events: &mut EventStream,
    ) -> Result<(), RuntimeError> {
        self.render()?;

        let outcome = tokio::select! {
            result = self.session.connect(username, endpoint) => Some(result),
            () = wait_for_cancel(events) => None,
        };

        match outcome {
            Some(Ok(())) => {
                let name = self.session.username().map(str::to_owned);
                if let Some(Err(e)) = name.map(|n| self.settings.set_username(&n)) {
                    tracing::warn!(error = %e, "failed to save username");
                    self.app.set_status(format!("Error: {e}"));
                }
            },
            Some(Err(e)) => tracing::debug!(error = %e, "connect rejected"),
            None => {
                tracing::info!("connect cancelled");
                self.session.disconnect();
                self.app.set_status("Connect cancelled");
            },
        }
        Ok(())
    }

    /// Feed pending session events into the app and collect its actions.
    fn drain_session(&mut self) -> Vec<AppAction> {
        let mut actions = Vec::new();
        for event in self.session.take_events() {
            actions.extend(self.app.handle(AppEvent::Session(event)));
        }
        actions
    }

    /// Render the UI.
    fn render(&mut self) -> Result<(), RuntimeError> {
        let view = View { app: &self.app, input: &self.input, store: self.session.store() };
        self.tui.draw(view)?;
        Ok(())
    }
}

/// Resolve when Esc is pressed or the terminal stream ends. Other keys are
/// discarded.
async fn wait_for_cancel(events: &mut EventStream) {
    while let Some(event) = events.next().await {
        if let Ok(Event::Key(key)) = event
            && key.kind == KeyEventKind::Press
            && key.code == KeyCode::Esc
        {
            return;
        }
    }
}
