use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::rc::Rc;

use crate::error::RecordError;
use crate::events::BestKind;
use crate::rules::{Difficulty, Mode};

/// Best records plus the last chosen difficulty and mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Records {
    pub best_score: u32,
    pub best_level: u32,
    pub difficulty: Difficulty,
    pub mode: Mode,
}

impl Records {
    /// Fold a finished session into the records. Only the counter that
    /// belongs to `mode` is compared. Returns the improved record, if any.
    pub fn offer(&mut self, mode: Mode, score: u32, level: u32) -> Option<(BestKind, u32)> {
        match mode {
            Mode::Survival if score > self.best_score => {
                self.best_score = score;
                Some((BestKind::Score, score))
            }
            Mode::Adventure if level > self.best_level => {
                self.best_level = level;
                Some((BestKind::Level, level))
            }
            _ => None,
        }
    }
}

/// Persistence collaborator for [`Records`]
pub trait RecordStore {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&mut self) -> Result<Option<Records>, RecordError>;
    fn save(&mut self, records: &Records) -> Result<(), RecordError>;
}

/// Records kept as pretty JSON in a single file
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    path: PathBuf,
}

impl JsonRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn path_string(&self) -> String {
        self.path.display().to_string()
    }
}

impl RecordStore for JsonRecordStore {
    fn load(&mut self) -> Result<Option<Records>, RecordError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(RecordError::Io {
                    path: self.path_string(),
                    source,
                })
            }
        };
        let records = serde_json::from_str(&json).map_err(|source| RecordError::Parse {
            path: self.path_string(),
            source,
        })?;
        Ok(Some(records))
    }

    fn save(&mut self, records: &Records) -> Result<(), RecordError> {
        let json = serde_json::to_string_pretty(records).map_err(|source| RecordError::Parse {
            path: self.path_string(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|source| RecordError::Io {
            path: self.path_string(),
            source,
        })
    }
}

/// In-memory store. Clones share the same history, so a test can keep one
/// handle and give the other to a session.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    initial: Option<Records>,
    saved: Rc<RefCell<Vec<Records>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Records) -> Self {
        Self {
            initial: Some(records),
            saved: Rc::default(),
        }
    }

    /// Every record written so far, oldest first
    pub fn saved(&self) -> Vec<Records> {
        self.saved.borrow().clone()
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&mut self) -> Result<Option<Records>, RecordError> {
        Ok(self.saved.borrow().last().copied().or(self.initial))
    }

    fn save(&mut self, records: &Records) -> Result<(), RecordError> {
        self.saved.borrow_mut().push(*records);
        Ok(())
    }
}
