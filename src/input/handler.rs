use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Action;

/// What a key press means to the game loop. `None` covers keys the game
/// does not bind, so unknown input is simply ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Action),
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Move(Action::Up),
            KeyCode::Down => KeyAction::Move(Action::Down),
            KeyCode::Left => KeyAction::Move(Action::Left),
            KeyCode::Right => KeyAction::Move(Action::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Move(Action::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Move(Action::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Move(Action::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Move(Action::Right),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
