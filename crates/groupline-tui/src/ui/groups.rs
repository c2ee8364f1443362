//! Groups sidebar
//!
//! Lists known groups in discovery order with their initials badge, the
//! selection marker and unread indicators.

use groupline_client::group_initials;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::App;

const ACTIVE_PREFIX: &str = ">";
const INACTIVE_PREFIX: &str = " ";
const UNREAD_MARKER: &str = " *";
const EMPTY_MARKER: &str = "";

enum GroupDisplayState {
    Active,
    Unread,
    Normal,
}

/// Render the groups sidebar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .groups()
        .iter()
        .map(|name| {
            let state = if app.selected() == Some(name.as_str()) {
                GroupDisplayState::Active
            } else if app.is_unread(name) {
                GroupDisplayState::Unread
            } else {
                GroupDisplayState::Normal
            };

            let (prefix, suffix, style) = match state {
                GroupDisplayState::Active => (
                    ACTIVE_PREFIX,
                    EMPTY_MARKER,
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                GroupDisplayState::Unread => {
                    (INACTIVE_PREFIX, UNREAD_MARKER, Style::default().fg(Color::Cyan))
                },
                GroupDisplayState::Normal => (INACTIVE_PREFIX, EMPTY_MARKER, Style::default()),
            };

            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(
                    format!("{:<2}", group_initials(name)),
                    style.add_modifier(Modifier::REVERSED),
                ),
                Span::raw(" "),
                Span::styled(name.clone(), style),
                Span::styled(suffix, Style::default().fg(Color::Red)),
            ]))
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" Groups ");
    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}
