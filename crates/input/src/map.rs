//! Key mapping from terminal events to control intents.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One of the four control intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Thrust,
    Brake,
    Left,
    Right,
}

impl Intent {
    pub const ALL: [Intent; 4] = [Intent::Thrust, Intent::Brake, Intent::Left, Intent::Right];

    pub(crate) fn index(self) -> usize {
        match self {
            Intent::Thrust => 0,
            Intent::Brake => 1,
            Intent::Left => 2,
            Intent::Right => 3,
        }
    }
}

/// Map a key to the intent it drives.
pub fn intent_for_key(code: KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') => {
            Some(Intent::Thrust)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') => {
            Some(Intent::Brake)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') => {
            Some(Intent::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') => {
            Some(Intent::Right)
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if key should restart the flight from the spawn point.
pub fn should_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(intent_for_key(KeyCode::Up), Some(Intent::Thrust));
        assert_eq!(intent_for_key(KeyCode::Down), Some(Intent::Brake));
        assert_eq!(intent_for_key(KeyCode::Left), Some(Intent::Left));
        assert_eq!(intent_for_key(KeyCode::Right), Some(Intent::Right));
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(intent_for_key(KeyCode::Char('w')), Some(Intent::Thrust));
        assert_eq!(intent_for_key(KeyCode::Char('S')), Some(Intent::Brake));
        assert_eq!(intent_for_key(KeyCode::Char('a')), Some(Intent::Left));
        assert_eq!(intent_for_key(KeyCode::Char('D')), Some(Intent::Right));
        assert_eq!(intent_for_key(KeyCode::Char('x')), None);
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
        assert!(should_restart(KeyEvent::from(KeyCode::Char('r'))));
    }

    #[test]
    fn intent_indices_are_distinct() {
        let mut seen = [false; 4];
        for intent in Intent::ALL {
            assert!(!seen[intent.index()]);
            seen[intent.index()] = true;
        }
    }
}
