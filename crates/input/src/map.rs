//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Quit keys map to [`GameAction::Quit`] as well; see [`should_quit`].
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if should_quit(key) {
        return Some(GameAction::Quit);
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') => {
            Some(GameAction::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') => {
            Some(GameAction::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') => {
            Some(GameAction::SoftDrop)
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') => {
            Some(GameAction::Rotate)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert_eq!(press(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(press(KeyCode::Down), Some(GameAction::SoftDrop));
        assert_eq!(press(KeyCode::Up), Some(GameAction::Rotate));
    }

    #[test]
    fn test_letter_keys() {
        assert_eq!(press(KeyCode::Char('A')), Some(GameAction::MoveLeft));
        assert_eq!(press(KeyCode::Char('l')), Some(GameAction::MoveRight));
        assert_eq!(press(KeyCode::Char('j')), Some(GameAction::SoftDrop));
        assert_eq!(press(KeyCode::Char('w')), Some(GameAction::Rotate));
        assert_eq!(press(KeyCode::Char('r')), Some(GameAction::Restart));
        assert_eq!(press(KeyCode::Char(' ')), None);
        assert_eq!(press(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert_eq!(press(KeyCode::Char('Q')), Some(GameAction::Quit));
    }
}
