use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::Team;
use crate::core::collision::ImpulseModel;
use crate::error::{Error, Result};

/// Tunable physics constants, fixed for the lifetime of a table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Per-tick velocity multiplier, in (0, 1).
    pub friction: f32,
    /// Both velocity axes below this magnitude put a body to rest.
    pub rest_epsilon: f32,
    /// Extra reach added to the ball-ball hitbox so the response starts
    /// slightly before visual contact.
    pub hitbox_padding: f32,
    /// Shot speed clamp, per tick.
    pub min_shot_speed: f32,
    pub max_shot_speed: f32,
    pub impulse_model: ImpulseModel,
    /// Re-express resolved velocities in the impact normal/tangent basis.
    pub reproject_basis: bool,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            friction: 0.98,
            rest_epsilon: 0.01,
            hitbox_padding: 10.0,
            min_shot_speed: 5.0,
            max_shot_speed: 30.0,
            impulse_model: ImpulseModel::EqualMass,
            reproject_basis: true,
        }
    }
}

/// An axis-aligned wall rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallDesc {
    /// Top-left corner.
    pub origin: Vec2,
    pub width: f32,
    pub height: f32,
}

/// A ball in the initial rack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallDesc {
    pub pos: Vec2,
    pub radius: f32,
    pub team: Team,
    #[serde(default = "default_mass")]
    pub mass: f32,
    /// Marks the player-controlled cue ball. Exactly one ball must set this.
    #[serde(default)]
    pub cue: bool,
}

fn default_mass() -> f32 {
    1.0
}

impl BallDesc {
    pub fn new(pos: Vec2, radius: f32, team: Team) -> Self {
        Self {
            pos,
            radius,
            team,
            mass: 1.0,
            cue: false,
        }
    }

    pub fn cue(pos: Vec2, radius: f32) -> Self {
        Self {
            cue: true,
            ..Self::new(pos, radius, Team::Cue)
        }
    }
}

/// Complete table setup: geometry, rack and physics constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default)]
    pub physics: PhysicsParams,
    pub walls: Vec<WallDesc>,
    /// Pocket centres.
    #[serde(default)]
    pub pockets: Vec<Vec2>,
    /// Capture radius shared by all pockets.
    #[serde(default = "default_pocket_radius")]
    pub pocket_radius: f32,
    pub balls: Vec<BallDesc>,
}

fn default_pocket_radius() -> f32 {
    POCKET_RADIUS
}

// Reference table: a 1400 × 700 play area framed by four 60-unit walls.
const PLAY_MIN: Vec2 = Vec2::new(100.0, 100.0);
const PLAY_MAX: Vec2 = Vec2::new(1500.0, 800.0);
const WALL_THICKNESS: f32 = 60.0;
const BALL_RADIUS: f32 = 15.0;
const POCKET_RADIUS: f32 = 20.0;

impl Default for TableConfig {
    /// The reference table: cue ball and a single blue object ball.
    fn default() -> Self {
        Self {
            physics: PhysicsParams::default(),
            walls: reference_walls(),
            pockets: reference_pockets(),
            pocket_radius: POCKET_RADIUS,
            balls: vec![
                BallDesc::cue(Vec2::new(200.0, 500.0), BALL_RADIUS),
                BallDesc::new(Vec2::new(500.0, 500.0), BALL_RADIUS, Team::Blue),
            ],
        }
    }
}

impl TableConfig {
    /// Reference table with a full triangle rack: seven red, seven blue and
    /// the black in the middle of the third row.
    pub fn eight_ball() -> Self {
        let cue = BallDesc::cue(Vec2::new(400.0, 450.0), BALL_RADIUS);
        let apex = Vec2::new(1050.0, 450.0);
        let mut balls = vec![cue];
        let mut next = Team::Red;
        for (i, pos) in rack_positions(apex, BALL_RADIUS).into_iter().enumerate() {
            // Black sits in the middle of the third row
            let team = if i == 4 {
                Team::Black
            } else {
                let team = next;
                next = if next == Team::Red { Team::Blue } else { Team::Red };
                team
            };
            balls.push(BallDesc::new(pos, BALL_RADIUS, team));
        }
        Self {
            balls,
            ..Self::default()
        }
    }

    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        let p = &self.physics;
        if !(p.friction > 0.0 && p.friction < 1.0) {
            return Err(Error::config(format!(
                "friction must be in (0, 1), got {}",
                p.friction
            )));
        }
        if !(p.rest_epsilon.is_finite() && p.rest_epsilon > 0.0) {
            return Err(Error::config("rest_epsilon must be finite and > 0"));
        }
        if !(p.hitbox_padding.is_finite() && p.hitbox_padding >= 0.0) {
            return Err(Error::config("hitbox_padding must be finite and >= 0"));
        }
        if !(p.min_shot_speed.is_finite() && p.min_shot_speed > 0.0) {
            return Err(Error::config("min_shot_speed must be finite and > 0"));
        }
        if !(p.max_shot_speed.is_finite() && p.max_shot_speed >= p.min_shot_speed) {
            return Err(Error::config("max_shot_speed must be finite and >= min_shot_speed"));
        }

        for (i, wall) in self.walls.iter().enumerate() {
            if !wall.origin.is_finite() {
                return Err(Error::config(format!("wall {} origin must be finite", i)));
            }
            if !(wall.width.is_finite() && wall.width > 0.0 && wall.height.is_finite() && wall.height > 0.0) {
                return Err(Error::config(format!(
                    "wall {} must have positive width and height",
                    i
                )));
            }
        }

        if !self.pockets.is_empty() && !(self.pocket_radius.is_finite() && self.pocket_radius > 0.0) {
            return Err(Error::config("pocket radius must be finite and > 0"));
        }
        if let Some(i) = self.pockets.iter().position(|p| !p.is_finite()) {
            return Err(Error::config(format!("pocket {} position must be finite", i)));
        }

        for (i, ball) in self.balls.iter().enumerate() {
            if !ball.pos.is_finite() {
                return Err(Error::config(format!("ball {} position must be finite", i)));
            }
            if !(ball.radius.is_finite() && ball.radius > 0.0) {
                return Err(Error::config(format!("ball {} radius must be finite and > 0", i)));
            }
            if !(ball.mass.is_finite() && ball.mass > 0.0) {
                return Err(Error::config(format!("ball {} mass must be finite and > 0", i)));
            }
        }

        match self.balls.iter().filter(|b| b.cue).count() {
            1 => Ok(()),
            n => Err(Error::config(format!("exactly one cue ball required, found {}", n))),
        }
    }
}

fn reference_walls() -> Vec<WallDesc> {
    let t = WALL_THICKNESS;
    let wall = |x: f32, y: f32, width: f32, height: f32| WallDesc {
        origin: Vec2::new(x, y),
        width,
        height,
    };
    vec![
        wall(PLAY_MIN.x - t, PLAY_MIN.y - t, t, PLAY_MAX.y - PLAY_MIN.y + 2.0 * t),
        wall(PLAY_MIN.x, PLAY_MIN.y - t, PLAY_MAX.x - PLAY_MIN.x + t, t),
        wall(PLAY_MAX.x, PLAY_MIN.y - t, t, PLAY_MAX.y - PLAY_MIN.y + 2.0 * t),
        wall(PLAY_MIN.x, PLAY_MAX.y, PLAY_MAX.x - PLAY_MIN.x, t),
    ]
}

/// Four corners plus the middle of the long rails.
fn reference_pockets() -> Vec<Vec2> {
    let mid_x = (PLAY_MIN.x + PLAY_MAX.x) * 0.5;
    vec![
        PLAY_MIN,
        Vec2::new(mid_x, PLAY_MIN.y),
        Vec2::new(PLAY_MAX.x, PLAY_MIN.y),
        Vec2::new(PLAY_MIN.x, PLAY_MAX.y),
        Vec2::new(mid_x, PLAY_MAX.y),
        PLAY_MAX,
    ]
}

/// Triangle rack with the apex pointing at the cue ball (towards -x).
/// Rows spread to +x, balls in a row spread along y. Returns 15 positions,
/// row by row.
pub fn rack_positions(apex: Vec2, ball_radius: f32) -> Vec<Vec2> {
    // Small gap so the rack does not start in overlap
    let gap = ball_radius * 2.0 + 1.0;
    let row_offset = gap * 0.866; // sqrt(3)/2
    let mut positions = Vec::with_capacity(15);
    for row in 0..5 {
        let x = apex.x + row as f32 * row_offset;
        for k in 0..=row {
            let y = apex.y + (k as f32 - row as f32 * 0.5) * gap;
            positions.push(Vec2::new(x, y));
        }
    }
    positions
}
