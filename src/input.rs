/// Key-event → player-action mapping.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::Action;

pub const CONTROLS_HINT: &str = "Controls: ↑/↓ to move, SPACE to shoot, q to quit";

/// Translate one key event.  Releases map to nothing; presses and
/// auto-repeats both act.
pub fn map_key(event: &KeyEvent) -> Option<Action> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    match event.code {
        KeyCode::Char('c') | KeyCode::Char('C')
            if event.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(Action::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Char(' ') => Some(Action::Shoot),
        _ => None,
    }
}

/// Any terminal event → action.  Only key events carry one.
pub fn event_action(event: &Event) -> Option<Action> {
    match event {
        Event::Key(key) => map_key(key),
        _ => None,
    }
}
