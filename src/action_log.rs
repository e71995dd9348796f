use crate::direction::Direction;
use crate::error::ExportError;
use crate::point::Tile;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// User commands and their outcomes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Click resolved to a tile
    Click { tile: Tile },
    /// Path found and walking started
    PathFound { to: Tile, steps: Vec<Direction> },
    /// Click target could not be reached
    NoPath { to: Tile },
    /// Click on an obstacle, outside the map or on the character's own tile
    IgnoredClick { tile: Tile },
    /// Keyboard movement started or changed direction
    Steer { direction: Direction },
    /// Keyboard movement released
    Release,
    /// Tile size changed
    Zoom { tile_size: f32 },
}

/// Logged action with timestamp
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub action: Action,
}

/// Action logger
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    /// Log an action with the current timestamp
    pub fn log(&mut self, action: Action) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.log_at(timestamp_ms, action);
    }

    pub fn log_at(&mut self, timestamp_ms: u64, action: Action) {
        log::debug!("[{:6}ms] {:?}", timestamp_ms, action);
        self.actions.push(LoggedAction { timestamp_ms, action });
    }

    pub fn actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(&self.actions)?)
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), ExportError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut clicks = 0;
        let mut walks = 0;
        let mut unreachable = 0;
        let mut ignored = 0;
        let mut tiles_walked = 0;
        let mut steers = 0;
        let mut zooms = 0;

        for logged in &self.actions {
            match &logged.action {
                Action::Click { .. } => clicks += 1,
                Action::PathFound { steps, .. } => {
                    walks += 1;
                    tiles_walked += steps.len();
                }
                Action::NoPath { .. } => unreachable += 1,
                Action::IgnoredClick { .. } => ignored += 1,
                Action::Steer { .. } => steers += 1,
                Action::Zoom { .. } => zooms += 1,
                Action::Release => {}
            }
        }

        let duration = self.actions.last().map(|a| a.timestamp_ms).unwrap_or(0);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Clicks: {} ({} walked, {} unreachable, {} ignored, {} path tiles)\n\
             Keyboard: {} steers\n\
             Zoom changes: {}",
            duration,
            self.actions.len(),
            clicks,
            walks,
            unreachable,
            ignored,
            tiles_walked,
            steers,
            zooms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> ActionLog {
        let mut log = ActionLog::new();
        log.log_at(5, Action::Click { tile: Tile::new(3, 1) });
        log.log_at(5, Action::PathFound {
            to: Tile::new(3, 1),
            steps: vec![Direction::SE, Direction::S],
        });
        log.log_at(900, Action::Click { tile: Tile::new(0, 9) });
        log.log_at(900, Action::NoPath { to: Tile::new(0, 9) });
        log.log_at(1000, Action::Click { tile: Tile::new(3, 1) });
        log.log_at(1000, Action::IgnoredClick { tile: Tile::new(3, 1) });
        log.log_at(1200, Action::Steer { direction: Direction::N });
        log.log_at(1500, Action::Release);
        log
    }

    #[test]
    fn test_summary_counts() {
        let summary = sample_log().summary();
        assert!(summary.contains("Session Duration: 1500ms"));
        assert!(summary.contains("Total Events: 8"));
        assert!(summary.contains("Clicks: 3 (1 walked, 1 unreachable, 1 ignored, 2 path tiles)"));
        assert!(summary.contains("Keyboard: 1 steers"));
    }

    #[test]
    fn test_json_export() {
        let log = sample_log();
        let json = log.to_json().unwrap();
        let parsed: Vec<LoggedAction> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_slice(), log.actions());
        assert!(json.contains("\"PathFound\""));
    }
}
