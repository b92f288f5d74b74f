use serde::{Deserialize, Serialize};

/// Stable identifier for a body on the table.
/// Equal to the body's index in the table's arena; never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl BodyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Team/colour a ball belongs to. Score trackers count captures per team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Cue,
    Red,
    Blue,
    Black,
}

impl Team {
    /// Numeric code used on the host wire.
    pub fn code(self) -> u32 {
        match self {
            Team::Cue => 0,
            Team::Red => 1,
            Team::Blue => 2,
            Team::Black => 3,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Team::Cue),
            1 => Some(Team::Red),
            2 => Some(Team::Blue),
            3 => Some(Team::Black),
            _ => None,
        }
    }
}

/// Something that happened during a tick, for renderers, audio and score keeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    /// A moving body touched a wall and had one velocity axis flipped.
    BoundaryBounce { body: BodyId },
    /// Two bodies were classified as colliding and exchanged momentum.
    /// `a` is the body that was advanced again in the same tick.
    BodyImpact { a: BodyId, b: BodyId },
    /// The cue ball was struck.
    ShotFired { body: BodyId },
    /// A body dropped into a pocket and left play.
    PocketCapture { body: BodyId, team: Team },
}
