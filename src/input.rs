use macroquad::input::{get_keys_pressed, KeyCode};

use crate::events::Command;
use crate::rules::Difficulty;
use crate::types::Direction;

/// One key press, already interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Session(Command),
    /// Switch survival/adventure; resolved against the current mode by the caller
    NextMode,
    SwitchPresentation,
    Quit,
}

pub fn map_key(key: KeyCode) -> Option<Input> {
    let input = match key {
        KeyCode::Up => Input::Session(Command::Steer(Direction::Up)),
        KeyCode::Right => Input::Session(Command::Steer(Direction::Right)),
        KeyCode::Down => Input::Session(Command::Steer(Direction::Down)),
        KeyCode::Left => Input::Session(Command::Steer(Direction::Left)),
        KeyCode::P => Input::Session(Command::Pause),
        KeyCode::M => Input::Session(Command::ToggleMute),
        KeyCode::F => Input::Session(Command::ToggleFullscreen),
        KeyCode::Key1 => Input::Session(Command::SetDifficulty(Difficulty::Easy)),
        KeyCode::Key2 => Input::Session(Command::SetDifficulty(Difficulty::Medium)),
        KeyCode::Key3 => Input::Session(Command::SetDifficulty(Difficulty::Hard)),
        KeyCode::Tab => Input::NextMode,
        KeyCode::V => Input::SwitchPresentation,
        KeyCode::Escape => Input::Quit,
        _ => return None,
    };
    Some(input)
}

/// Keys pressed this frame
pub fn poll() -> Vec<Input> {
    get_keys_pressed().into_iter().filter_map(map_key).collect()
}
