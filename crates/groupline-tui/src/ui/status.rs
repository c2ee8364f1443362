//! Status bar
//!
//! Displays connection state, endpoint, username and the latest status
//! message.

use groupline_client::ConnectionState;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let connection_status = match app.connection_state() {
        ConnectionState::Idle => Span::styled("Idle", Style::default().fg(Color::Gray)),
        ConnectionState::Connecting => {
            Span::styled("Connecting...", Style::default().fg(Color::Yellow))
        },
        ConnectionState::Connected => Span::styled(
            "Connected",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        ConnectionState::Disconnected => {
            Span::styled("Disconnected", Style::default().fg(Color::Red))
        },
        ConnectionState::Failed { .. } => {
            Span::styled("Failed", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        },
    };

    let session_info = format!(" | {} | {}", app.endpoint(), app.username().unwrap_or("-"));
    let message = app.status_message().map(|m| format!(" | {m}")).unwrap_or_default();

    let status_line = Line::from(vec![
        Span::raw(" "),
        connection_status,
        Span::styled(session_info, Style::default().fg(Color::Gray)),
        Span::raw(message),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
