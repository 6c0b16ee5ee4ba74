use thiserror::Error;

/// Errors surfaced while building or resetting a session
#[derive(Error, Debug)]
pub enum EngineError {
    /// Rejection sampling ran out of attempts; the board is too crowded for
    /// the requested layout
    #[error("could not place {what}: {placed}/{requested} placed after {attempts} attempts")]
    PlacementExhausted {
        what: &'static str,
        placed: usize,
        requested: usize,
        attempts: usize,
    },

    #[error("invalid board {cols}x{rows}: {reason}")]
    InvalidBoard { cols: i32, rows: i32, reason: String },

    #[error(transparent)]
    Records(#[from] RecordError),
}

/// Failures of the best-record store
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("could not access records file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed records file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure reported by a render, audio or HUD sink. Logged by the
/// dispatcher, never fed back into the simulation.
#[derive(Error, Debug)]
#[error("{sink} sink failed: {message}")]
pub struct SinkError {
    pub sink: &'static str,
    pub message: String,
}

impl SinkError {
    pub fn new(sink: &'static str, message: impl Into<String>) -> Self {
        Self {
            sink,
            message: message.into(),
        }
    }
}
