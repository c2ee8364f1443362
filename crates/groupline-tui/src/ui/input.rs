//! Input line
//!
//! Shows the input buffer behind a prompt, scrolled horizontally so the
//! cursor stays visible, or a dimmed hint while the buffer is empty.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::InputState;

const PROMPT: &str = "> ";
const BORDER: u16 = 1;
const HINT: &str = "message, /group <name>, /server <host:port>, /quit";

/// Render the input line.
pub fn render(frame: &mut Frame, input: &InputState, area: Rect) {
    let prompt_width = u16::try_from(PROMPT.len()).unwrap_or(0);
    let text_width = usize::from(area.width.saturating_sub(2 * BORDER + prompt_width).max(1));

    // First visible character: keep the cursor inside the text area.
    let start = (input.cursor() + 1).saturating_sub(text_width);
    let visible: String = input.buffer().chars().skip(start).take(text_width).collect();

    let body = if input.buffer().is_empty() {
        Span::styled(HINT, Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(visible, Style::default().fg(Color::White))
    };

    let paragraph = Paragraph::new(Line::from(vec![Span::raw(PROMPT), body]))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);

    let offset = u16::try_from(input.cursor() - start).unwrap_or(u16::MAX);
    let cursor_x = area.x.saturating_add(BORDER + prompt_width).saturating_add(offset);
    let max_x = area.x.saturating_add(area.width).saturating_sub(BORDER + 1);
    frame.set_cursor_position((cursor_x.min(max_x), area.y.saturating_add(BORDER)));
}
