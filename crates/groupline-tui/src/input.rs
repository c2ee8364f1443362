//! Input state and key handling for the TUI.
//!
//! This module owns all text input state (buffer, cursor) and handles
//! character-level key events. Command parsing happens here on Enter.

use crate::{
    App, AppAction,
    commands::{self, Command},
};

/// Keyboard input abstraction.
///
/// Decouples input handling from crossterm so it can be tested without a
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key (delete character before cursor).
    Backspace,
    /// Delete key (delete character at cursor).
    Delete,
    /// Tab key (cycle groups).
    Tab,
    /// Escape key (quit).
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Home key (cursor to start).
    Home,
    /// End key (cursor to end).
    End,
}

/// Input state for the TUI.
///
/// The cursor counts characters, not bytes.
#[derive(Debug, Default)]
pub struct InputState {
    /// Text buffer for user input.
    buffer: String,
    /// Cursor position within the buffer, in characters.
    cursor: usize,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text in the input buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Current cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Empty the buffer. Called once a message has been written.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Handle a key input event.
    ///
    /// Returns actions to process (may be empty for keys with no effect).
    pub fn handle_key(&mut self, key: KeyInput, app: &mut App) -> Vec<AppAction> {
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor = self.cursor.saturating_add(1);
                vec![AppAction::Render]
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor = self.cursor.saturating_sub(1);
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
                vec![AppAction::Render]
            },
            KeyInput::Delete => {
                if self.cursor < self.len() {
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
                vec![AppAction::Render]
            },
            KeyInput::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![AppAction::Render]
            },
            KeyInput::Right => {
                if self.cursor < self.len() {
                    self.cursor = self.cursor.saturating_add(1);
                }
                vec![AppAction::Render]
            },
            KeyInput::Home => {
                self.cursor = 0;
                vec![AppAction::Render]
            },
            KeyInput::End => {
                self.cursor = self.len();
                vec![AppAction::Render]
            },
            KeyInput::Enter => self.handle_enter(app),
            KeyInput::Tab => app.cycle_group(),
            KeyInput::Esc => app.quit(),
        }
    }

    /// Handle Enter key - parse command and call App API.
    ///
    /// Commands clear the buffer. Message text stays until the runtime
    /// reports a successful send, so a rejected message can be retried.
    fn handle_enter(&mut self, app: &mut App) -> Vec<AppAction> {
        if self.buffer.trim().is_empty() {
            self.clear();
            return vec![AppAction::Render];
        }

        let command = commands::parse(&self.buffer);
        if !matches!(command, Command::Message { .. }) {
            self.clear();
        }

        match command {
            Command::Connect { username } => app.connect(username),
            Command::Disconnect => app.disconnect(),
            Command::Server { endpoint } => app.set_server(&endpoint),
            Command::Group { name } => app.select_group(name),
            Command::Quit => app.quit(),
            Command::Message { text } => app.send_message(text),
            Command::Unknown { input } => {
                app.set_status(format!("Unknown command: {input}"));
                vec![AppAction::Render]
            },
            Command::InvalidArgs { command, error } => {
                app.set_status(format!("/{command}: {error}"));
                vec![AppAction::Render]
            },
        }
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(i, _)| i)
    }
}
