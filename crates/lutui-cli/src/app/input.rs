use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use lutui_engine::Direction;
use std::time::Duration;

/// A user intent decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    /// Start the selected game, or stop it if it is running
    Activate,
    Refresh,
    Quit,
}

/// Where the grid loop gets user input from.
pub trait InputSource {
    /// Wait up to `timeout` for the next action. `Ok(None)` means nothing
    /// actionable arrived in time.
    fn poll_action(&mut self, timeout: Duration) -> Result<Option<Action>>;
}

/// Terminal keyboard input via crossterm.
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn poll_action(&mut self, timeout: Duration) -> Result<Option<Action>> {
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
        {
            return Ok(action_for_key(&key));
        }
        Ok(None)
    }
}

pub fn action_for_key(key: &KeyEvent) -> Option<Action> {
    // Only handle key press events, not release or repeat
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Move(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Move(Direction::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Move(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Move(Direction::Right)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
        KeyCode::Char('r') => Some(Action::Refresh),
        _ => None,
    }
}
