use cue_engine::bridge::protocol::{pack_balls, pack_events};
use cue_engine::{
    BallInstance, InputEvent, InputQueue, PackedEvent, Result, Table, TableConfig, Team,
};

use crate::score::Scoreboard;

/// The table's control loop, driven one frame at a time by the host.
///
/// `lib.rs` keeps a single runner in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`, which cannot export the struct's methods
/// with the pointer accessors the host needs.
pub struct TableRunner {
    table: Table,
    input: InputQueue,
    score: Scoreboard,
    /// Packed events of the last frame.
    event_buffer: Vec<PackedEvent>,
    /// Packed live balls after the last frame.
    ball_buffer: Vec<BallInstance>,
    running: bool,
}

impl TableRunner {
    pub fn new(config: &TableConfig) -> Result<Self> {
        let table = Table::new(config)?;
        let mut ball_buffer = Vec::with_capacity(config.balls.len());
        pack_balls(table.bodies(), &mut ball_buffer);

        Ok(Self {
            table,
            input: InputQueue::new(),
            score: Scoreboard::new(),
            event_buffer: Vec::with_capacity(32),
            ball_buffer,
            running: true,
        })
    }

    /// Build from a JSON table description; an empty string means the reference table.
    pub fn from_json(json: &str) -> Result<Self> {
        let config = if json.trim().is_empty() {
            TableConfig::default()
        } else {
            TableConfig::from_json(json)?
        };
        Self::new(&config)
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: exactly one tick, then score and repack.
    /// Returns `false` once the loop has stopped; a quit seen this frame still
    /// lets this frame's tick complete.
    pub fn frame(&mut self) -> bool {
        if !self.running {
            self.input.drain();
            return false;
        }

        self.table.tick(&self.input);
        let quit = self.input.quit_requested();

        // Drain input after the tick
        self.input.drain();

        self.score.record(self.table.events());
        pack_events(self.table.events(), &mut self.event_buffer);
        pack_balls(self.table.bodies(), &mut self.ball_buffer);

        if quit {
            log::info!("quit after tick {}", self.table.tick_count());
            self.running = false;
        }
        self.running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn score(&self) -> &Scoreboard {
        &self.score
    }

    // ---- Pointer accessors for host memory reads ----

    pub fn events_ptr(&self) -> *const f32 {
        self.event_buffer.as_ptr() as *const f32
    }

    /// Number of packed events (each `EVENT_FLOATS` wide).
    pub fn events_len(&self) -> u32 {
        self.event_buffer.len() as u32
    }

    pub fn balls_ptr(&self) -> *const f32 {
        self.ball_buffer.as_ptr() as *const f32
    }

    /// Number of ball instances (each `BALL_FLOATS` wide).
    pub fn balls_len(&self) -> u32 {
        self.ball_buffer.len() as u32
    }

    pub fn score_for(&self, team_code: u32) -> u32 {
        Team::from_code(team_code).map_or(0, |team| self.score.count(team))
    }

    pub fn captured_count(&self) -> u32 {
        self.table.captured().len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cue_engine::bridge::protocol::EVENT_SHOT_FIRED;
    use cue_engine::{BallDesc, Error};
    use glam::Vec2;

    #[test]
    fn empty_json_builds_reference_table() {
        let runner = TableRunner::from_json("").unwrap();
        assert_eq!(runner.balls_len(), 2);
        assert_eq!(runner.events_len(), 0);
        assert!(runner.is_running());
    }

    #[test]
    fn bad_json_is_reported() {
        assert!(matches!(TableRunner::from_json("{ nope"), Err(Error::Parse(_))));
        assert!(matches!(
            TableRunner::from_json(r#"{ "walls": [], "balls": [] }"#),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn frame_runs_one_tick_and_packs_shot() {
        let mut runner = TableRunner::from_json("").unwrap();
        runner.push_input(InputEvent::PointerMove { x: 100.0, y: 500.0 });
        runner.push_input(InputEvent::Shoot);
        assert!(runner.frame());

        assert_eq!(runner.table().tick_count(), 1);
        assert_eq!(runner.events_len(), 1);
        assert_eq!(runner.event_buffer[0].kind, EVENT_SHOT_FIRED);
        // Cue ball record shows it moving
        assert_eq!(runner.ball_buffer[0].moving, 1.0);

        assert!(runner.frame());
        assert_eq!(runner.events_len(), 0);
    }

    #[test]
    fn quit_stops_after_current_tick() {
        let mut runner = TableRunner::from_json("").unwrap();
        runner.push_input(InputEvent::Quit);
        assert!(!runner.frame());
        assert_eq!(runner.table().tick_count(), 1);

        assert!(!runner.frame());
        assert_eq!(runner.table().tick_count(), 1);
    }

    #[test]
    fn captures_reach_the_scoreboard() {
        let mut config = TableConfig::default();
        config.pockets = vec![Vec2::new(600.0, 300.0)];
        config.balls = vec![
            BallDesc::cue(Vec2::new(200.0, 500.0), 15.0),
            BallDesc::new(Vec2::new(600.0, 300.0), 15.0, Team::Black),
        ];
        let mut runner = TableRunner::new(&config).unwrap();
        runner.frame();

        assert_eq!(runner.score_for(Team::Black.code()), 1);
        assert_eq!(runner.score_for(99), 0);
        assert_eq!(runner.captured_count(), 1);
        assert_eq!(runner.balls_len(), 1);
    }
}
