use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

use crate::events::{Command, SessionEvent};

/// What was logged: player input or a session reaction to it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Entry {
    Command(Command),
    Event(SessionEvent),
}

/// Logged entry with timestamp
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedEntry {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub entry: Entry,
}

/// Session event logger
pub struct EventLog {
    start_time: Instant,
    entries: Vec<LoggedEntry>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    pub fn new() -> Self {
        EventLog {
            start_time: Instant::now(),
            entries: Vec::new(),
        }
    }

    fn push(&mut self, entry: Entry) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.entries.push(LoggedEntry { timestamp_ms, entry });
    }

    pub fn log_command(&mut self, command: Command) {
        self.push(Entry::Command(command));
    }

    pub fn log_events(&mut self, events: &[SessionEvent]) {
        for event in events {
            self.push(Entry::Event(event.clone()));
        }
    }

    pub fn entries(&self) -> &[LoggedEntry] {
        &self.entries
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, json)?;
        info!(path, entries = self.entries.len(), "event log saved");
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut commands = 0;
        let mut scores = 0;
        let mut level_ups = 0;
        let mut game_overs = 0;
        let mut resets = 0;

        for logged in &self.entries {
            match &logged.entry {
                Entry::Command(_) => commands += 1,
                Entry::Event(SessionEvent::Scored { .. }) => scores += 1,
                Entry::Event(SessionEvent::LevelUp { .. }) => level_ups += 1,
                Entry::Event(SessionEvent::GameOver { .. }) => game_overs += 1,
                Entry::Event(SessionEvent::Reset { .. }) => resets += 1,
                Entry::Event(_) => {}
            }
        }

        let duration = self.entries.last().map_or(0, |last| last.timestamp_ms);

        format!(
            "Session Duration: {}ms\n\
             Total Entries: {} ({} commands)\n\
             Food: {} scored, {} levels cleared\n\
             Endings: {} game overs, {} resets",
            duration,
            self.entries.len(),
            commands,
            scores,
            level_ups,
            game_overs,
            resets
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ResetCause;
    use crate::types::Direction;

    #[test]
    fn test_summary_counts() {
        let mut log = EventLog::new();
        log.log_command(Command::Steer(Direction::Up));
        log.log_events(&[
            SessionEvent::Started,
            SessionEvent::Scored { score: 1 },
            SessionEvent::GameOver { cause: ResetCause::Wall },
            SessionEvent::Reset { cause: ResetCause::Wall },
        ]);
        assert_eq!(log.entries().len(), 5);
        let summary = log.summary();
        assert!(summary.contains("Total Entries: 5 (1 commands)"));
        assert!(summary.contains("1 scored"));
        assert!(summary.contains("1 game overs, 1 resets"));
    }

    #[test]
    fn test_entries_serialize() {
        let mut log = EventLog::new();
        log.log_events(&[SessionEvent::LevelUp { level: 2 }]);
        let json = serde_json::to_string(log.entries()).unwrap();
        assert!(json.contains("LevelUp"));
    }
}
