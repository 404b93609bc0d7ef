use crate::app::App;
use crossterm::event::{KeyCode, KeyModifiers};

pub fn handle_key_event(app: &mut App, key: KeyCode, _modifiers: KeyModifiers) {
    match key {
        KeyCode::Esc => app.quit(),
        KeyCode::Enter => app.submit_input(),
        KeyCode::Right | KeyCode::Tab => app.next_thread(),
        KeyCode::Left | KeyCode::BackTab => app.previous_thread(),
        KeyCode::Up => app.select_up(),
        KeyCode::Down => app.select_down(),
        KeyCode::Delete => app.delete_selected(),
        KeyCode::Char(c) => app.push_char(c),
        KeyCode::Backspace => app.pop_char(),
        _ => {}
    }
}
