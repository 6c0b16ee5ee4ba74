//! Commands into the session, events out of it, and the sink traits the
//! front-ends implement.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::collision::Collision;
use crate::error::SinkError;
use crate::frame::Frame;
use crate::hud::HudState;
use crate::rules::{Difficulty, Mode};
use crate::types::Direction;

/// Session input, already translated from raw keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Steer(Direction),
    Pause,
    ToggleMute,
    ToggleFullscreen,
    SetDifficulty(Difficulty),
    SetMode(Mode),
}

/// Why a session was rebuilt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetCause {
    Wall,
    SelfBite,
    Agent,
    Obstacle,
    TimeUp,
    Settings,
}

impl ResetCause {
    /// Cause for a fatal collision; `None` for food
    pub fn from_collision(hit: &Collision) -> Option<Self> {
        match hit {
            Collision::Wall => Some(ResetCause::Wall),
            Collision::SelfBite { .. } => Some(ResetCause::SelfBite),
            Collision::Agent { .. } => Some(ResetCause::Agent),
            Collision::Obstacle(_) => Some(ResetCause::Obstacle),
            Collision::Food(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BestKind {
    Score,
    Level,
}

/// Something that happened during a command or a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    Started,
    Paused,
    Scored { score: u32 },
    /// Adventure pickup that did not clear the level
    FoodEaten { remaining: usize },
    LevelUp { level: u32 },
    CountdownTick { remaining: u32 },
    GameOver { cause: ResetCause },
    Reset { cause: ResetCause },
    NewBest { kind: BestKind, value: u32 },
    MuteToggled { muted: bool },
    FullscreenToggled,
    SettingsChanged { difficulty: Difficulty, mode: Mode },
}

/// Sound cues the audio collaborator knows how to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Point,
    GameOver,
}

impl SessionEvent {
    pub fn cue(&self) -> Option<Cue> {
        match self {
            SessionEvent::Scored { .. } | SessionEvent::LevelUp { .. } => Some(Cue::Point),
            SessionEvent::GameOver { .. } => Some(Cue::GameOver),
            _ => None,
        }
    }
}

/// Draws a board snapshot
pub trait RenderSink {
    fn render(&mut self, frame: &Frame) -> Result<(), SinkError>;
}

pub trait AudioSink {
    fn play(&mut self, cue: Cue) -> Result<(), SinkError>;
    fn set_muted(&mut self, muted: bool) -> Result<(), SinkError>;
}

/// Panel text
pub trait HudSink {
    fn refresh(&mut self, hud: &HudState) -> Result<(), SinkError>;
}

fn report(result: Result<(), SinkError>) {
    if let Err(err) = result {
        warn!(%err, "sink failure ignored");
    }
}

/// Forward session events to the audio sink. Failures are logged and
/// swallowed.
pub fn dispatch_audio(audio: &mut dyn AudioSink, events: &[SessionEvent]) {
    for event in events {
        if let SessionEvent::MuteToggled { muted } = event {
            report(audio.set_muted(*muted));
        }
        if let Some(cue) = event.cue() {
            report(audio.play(cue));
        }
    }
}

/// Hand one frame to the renderer and the panel. Failures are logged and
/// swallowed.
pub fn present(render: &mut dyn RenderSink, hud: &mut dyn HudSink, frame: &Frame, state: &HudState) {
    report(render.render(frame));
    report(hud.refresh(state));
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingAudio {
        calls: usize,
    }

    impl AudioSink for FailingAudio {
        fn play(&mut self, _cue: Cue) -> Result<(), SinkError> {
            self.calls += 1;
            Err(SinkError::new("audio", "device gone"))
        }

        fn set_muted(&mut self, _muted: bool) -> Result<(), SinkError> {
            self.calls += 1;
            Err(SinkError::new("audio", "device gone"))
        }
    }

    #[test]
    fn test_audio_failures_are_swallowed() {
        let mut audio = FailingAudio { calls: 0 };
        let events = vec![
            SessionEvent::Scored { score: 1 },
            SessionEvent::MuteToggled { muted: true },
            SessionEvent::GameOver { cause: ResetCause::Wall },
            SessionEvent::Paused,
        ];
        dispatch_audio(&mut audio, &events);
        assert_eq!(audio.calls, 3);
    }

    #[test]
    fn test_cues() {
        assert_eq!(SessionEvent::LevelUp { level: 2 }.cue(), Some(Cue::Point));
        assert_eq!(SessionEvent::Reset { cause: ResetCause::TimeUp }.cue(), None);
    }

    #[test]
    fn test_food_is_not_a_reset_cause() {
        assert_eq!(ResetCause::from_collision(&Collision::Food(crate::types::Position::new(2, 2))), None);
        assert_eq!(ResetCause::from_collision(&Collision::Wall), Some(ResetCause::Wall));
    }
}
