use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Request a direction change for the next tick
    Direction(Direction),
    /// Flip between Running and Paused
    TogglePause,
    /// Start a fresh game
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
            KeyCode::Up => KeyAction::Direction(Direction::Up),
            KeyCode::Down => KeyAction::Direction(Direction::Down),
            KeyCode::Left => KeyAction::Direction(Direction::Left),
            KeyCode::Right => KeyAction::Direction(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Direction(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Direction(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Direction(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Direction(Direction::Right),

            // Controls
            KeyCode::Char(' ') | KeyCode::Enter => KeyAction::TogglePause,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
