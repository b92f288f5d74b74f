use std::collections::HashMap;

use cue_engine::{TableEvent, Team};

/// Capture counter per team, fed from the table's event stream.
/// Presentation is the host's business; this only counts.
#[derive(Debug, Default, Clone)]
pub struct Scoreboard {
    captures: HashMap<Team, u32>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every capture in `events`. Other events are ignored.
    pub fn record(&mut self, events: &[TableEvent]) {
        for event in events {
            if let TableEvent::PocketCapture { team, .. } = *event {
                *self.captures.entry(team).or_insert(0) += 1;
            }
        }
    }

    pub fn count(&self, team: Team) -> u32 {
        self.captures.get(&team).copied().unwrap_or(0)
    }
}
