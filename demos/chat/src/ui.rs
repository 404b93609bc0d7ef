use crate::app::App;
use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
};
use threadline::selectors;

const HELP: &str = "←/→ switch thread | ↑/↓ select | Del delete | Enter send | Esc quit";

/// Renders a millisecond timestamp as local wall-clock time.
fn format_timestamp(millis: u64) -> String {
    i64::try_from(millis)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

pub fn ui(f: &mut ratatui::Frame, app: &mut App) {
    let state = app.state();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Thread tabs
            Constraint::Min(0),    // Messages
            Constraint::Length(3), // Input
            Constraint::Length(1), // Key help
        ])
        .split(f.area());

    // Thread tabs
    let tabs = selectors::tabs(&state);
    let titles: Vec<Line> = tabs.iter().map(|t| Line::from(t.title.as_str())).collect();
    let tab_bar = Tabs::new(titles)
        .select(tabs.iter().position(|t| t.active))
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Threads")
                .style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(tab_bar, chunks[0]);

    // Messages of the active thread
    let thread = selectors::active_thread(&state);
    let messages: Vec<ListItem> = thread
        .map(|t| t.messages.iter())
        .into_iter()
        .flatten()
        .map(|m| {
            let content = Line::from(vec![
                Span::styled(
                    format!("[{}] ", format_timestamp(m.timestamp)),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(m.text.as_str()),
            ]);
            ListItem::new(content)
        })
        .collect();

    let title = match thread {
        Some(t) => format!("{} ({})", t.title, t.messages.len()),
        None => format!("No thread {}", state.active_thread_id),
    };
    let messages_list = List::new(messages)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(Style::default().fg(Color::White)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    f.render_stateful_widget(messages_list, chunks[1], &mut app.list_state);

    // Input area
    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Type your message (Enter to send)"),
        );
    f.render_widget(input, chunks[2]);

    let help = Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);

    // Set cursor position
    f.set_cursor_position((
        chunks[2].x + app.input.chars().count() as u16 + 1,
        chunks[2].y + 1,
    ));
}
