//! Chat area
//!
//! Displays the history of the selected group, newest at the bottom.

use groupline_client::{ChatLine, GroupStore, LineOrigin};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::App;

const BORDER_SIZE: u16 = 2;

/// Render the chat area.
pub fn render(frame: &mut Frame, app: &App, store: &GroupStore, area: Rect) {
    let title =
        app.selected().map_or_else(|| " No Group ".to_owned(), |group| format!(" {group} "));
    let block = Block::default().borders(Borders::ALL).title(title);

    let items: Vec<ListItem> = match app.selected() {
        None => vec![hint("Use /connect <name> to join a server")],
        Some(group) => {
            let lines = store.messages_for(group);
            if lines.is_empty() {
                vec![hint("No messages yet")]
            } else {
                lines.iter().map(line_item).collect()
            }
        },
    };

    let visible_height = usize::from(area.height.saturating_sub(BORDER_SIZE));
    let skip = items.len().saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    let list = List::new(visible_items).block(block);

    frame.render_widget(list, area);
}

fn line_item(line: &ChatLine) -> ListItem<'_> {
    let style = match line.origin() {
        LineOrigin::Remote => Style::default(),
        LineOrigin::Local => Style::default().fg(Color::Green),
        LineOrigin::System => Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
    };
    ListItem::new(Line::from(Span::styled(line.text(), style)))
}

fn hint(text: &'static str) -> ListItem<'static> {
    ListItem::new(Line::from(Span::styled(text, Style::default().fg(Color::DarkGray))))
}
