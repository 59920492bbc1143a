//! Key mapping from terminal events to game intents.

use crate::types::GameIntent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key to the intent it stands for, regardless of phase.
pub fn map_key(code: KeyCode) -> Option<GameIntent> {
    match code {
        // Steering
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameIntent::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameIntent::MoveRight)
        }

        // Jump
        KeyCode::Up
        | KeyCode::Char(' ')
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(GameIntent::Jump),

        // Start / restart
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(GameIntent::Start),

        _ => None,
    }
}

pub fn handle_key_event(key: KeyEvent) -> Option<GameIntent> {
    map_key(key.code)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Theme cycling key. Not a game intent; valid in every phase.
pub fn is_theme_key(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('t') | KeyCode::Char('T'))
        && !key.modifiers.contains(KeyModifiers::CONTROL)
}
