use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use maze_explorer_core::Direction;

/// Action requested by a single key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Step the player one cell.
    Move(Direction),
    /// Leave the session.
    Quit,
}

/// Translates a key event into an action, ignoring releases and unbound keys.
///
/// WASD and the arrow keys alias the same four directions. `q`, `Q`, `Esc`
/// and `Ctrl+C` all quit because raw mode swallows the interrupt signal.
#[must_use]
pub fn map_key(event: KeyEvent) -> Option<KeyAction> {
    if !matches!(event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }

    let action = match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Up | KeyCode::Char('w' | 'W') => KeyAction::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => KeyAction::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => KeyAction::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => KeyAction::Move(Direction::Right),
        _ => return None,
    };
    Some(action)
}
