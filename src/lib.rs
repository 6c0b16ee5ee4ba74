pub mod board;
pub mod clock;
pub mod collision;
pub mod config;
pub mod countdown;
pub mod error;
pub mod event_log;
pub mod events;
pub mod frame;
pub mod grid;
pub mod hud;
pub mod input;
pub mod planar;
pub mod records;
pub mod rules;
pub mod session;
pub mod snake;
pub mod spawner;
pub mod types;
pub mod volumetric;

pub use board::{Board, Layout};
pub use collision::Collision;
pub use error::{EngineError, RecordError, SinkError};
pub use events::{Command, ResetCause, SessionEvent};
pub use grid::{CellState, Grid};
pub use rules::{Difficulty, Mode};
pub use session::{Phase, Session, SessionSettings};
pub use snake::Snake;
pub use spawner::Spawner;
pub use types::{Direction, Position, Ring, RingTag, SnakeKind};
