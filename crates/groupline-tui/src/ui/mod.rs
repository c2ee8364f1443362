//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O): the App supplies the
//! mirrored session state, the store supplies chat history.

mod chat;
mod groups;
mod input;
mod status;

use groupline_client::GroupStore;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::{App, InputState};

/// Everything a frame is drawn from.
#[derive(Clone, Copy)]
pub struct View<'a> {
    /// UI state.
    pub app: &'a App,
    /// Input line.
    pub input: &'a InputState,
    /// Session history.
    pub store: &'a GroupStore,
}

/// Render the entire UI.
pub fn render(frame: &mut Frame, view: View<'_>) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [main_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, view, *main_area);
    input::render(frame, view.input, *input_area);
    status::render(frame, view.app, *status_area);
}

/// Render the main area (groups sidebar + chat).
fn render_main_area(frame: &mut Frame, view: View<'_>, area: Rect) {
    const GROUP_SIDEBAR_WIDTH: u16 = 22;
    const CHAT_AREA_MIN_WIDTH: u16 = 20;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(GROUP_SIDEBAR_WIDTH),
            Constraint::Min(CHAT_AREA_MIN_WIDTH),
        ])
        .split(area);

    let [groups_area, chat_area] = chunks.as_ref() else {
        return;
    };

    groups::render(frame, view.app, *groups_area);
    chat::render(frame, view.app, view.store, *chat_area);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use groupline_client::{ConnectionState, Endpoint, LineOrigin, SessionEvent};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::AppEvent;

    fn screen(app: &App, store: &GroupStore) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 12)).unwrap();
        let input = InputState::new();
        terminal.draw(|frame| render(frame, View { app, input: &input, store })).unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(ratatui::buffer::Cell::symbol).collect()
    }

    #[test]
    fn empty_session_prompts_to_connect() {
        let app = App::new(Endpoint::default(), None);
        let text = screen(&app, &GroupStore::new());

        assert!(text.contains("Idle"));
        assert!(text.contains("127.0.0.1:5000"));
        assert!(text.contains("/connect <name>"));
    }

    #[test]
    fn selected_group_history_is_shown() {
        let mut store = GroupStore::new();
        store.record_message("Dev Team", "[Dev Team] bob: ship it", LineOrigin::Remote);
        store.record_message("Ops", "[Ops] carol: paging", LineOrigin::Remote);

        let mut app = App::new(Endpoint::default(), Some("alice".into()));
        for event in [
            SessionEvent::ConnectionStateChanged { state: ConnectionState::Connected },
            SessionEvent::GroupsChanged { groups: vec!["Dev Team".into(), "Ops".into()] },
            SessionEvent::SelectionChanged { group: Some("Dev Team".into()) },
        ] {
            app.handle(AppEvent::Session(event));
        }

        let text = screen(&app, &store);
        assert!(text.contains("DT Dev Team"));
        assert!(text.contains("OP Ops"));
        assert!(text.contains("[Dev Team] bob: ship it"));
        assert!(!text.contains("carol"));
        assert!(text.contains("Connected"));
        assert!(text.contains("alice"));
    }
}
