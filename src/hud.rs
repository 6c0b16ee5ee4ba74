//! Panel contents. Which lines show depends on the mode: survival hides the
//! level/time lines, adventure hides the score lines.

use crate::rules::{Difficulty, Mode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudState {
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub score: u32,
    pub best_score: u32,
    pub level: u32,
    pub best_level: u32,
    pub time_left: u32,
    pub playing: bool,
    pub muted: bool,
}

impl HudState {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            "SNAKE".to_string(),
            "PAUSE : (P)".to_string(),
            "CONTROLS : arrows".to_string(),
        ];
        match self.mode {
            Mode::Survival => {
                lines.push(format!("SCORE : {}", self.score));
                lines.push(format!("BEST SCORE : {}", self.best_score));
            }
            Mode::Adventure => {
                lines.push(format!("LEVEL : {}", self.level));
                lines.push(format!("BEST LEVEL : {}", self.best_level));
            }
        }
        lines.push(format!("MODE : {} ({})", self.mode, self.difficulty));
        if self.mode == Mode::Adventure {
            lines.push(format!("TIME LEFT : {}", self.time_left));
        }
        lines.push("FULLSCREEN / NORMAL : (F)".to_string());
        lines.push(format!("MUTE / UNMUTE : (M){}", if self.muted { " [muted]" } else { "" }));
        if !self.playing {
            lines.push("press an arrow key to play".to_string());
        }
        lines
    }
}
