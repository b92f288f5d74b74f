//! Flat f32 records handed to the host each frame.
//! Must stay in sync with the TypeScript reader.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Events: event_count × 4 floats]   kind, a, b, c
//! [Balls:  ball_count × 6 floats]    x, y, radius, team, moving, id
//! ```
//!
//! The two sections live in separate buffers; the host reads each through its
//! own pointer/length pair.

use bytemuck::{Pod, Zeroable};

use crate::api::types::TableEvent;
use crate::core::body::Body;

/// Floats per packed event: kind, a, b, c (wire format, fixed).
pub const EVENT_FLOATS: usize = 4;

/// Floats per ball instance (wire format, fixed).
pub const BALL_FLOATS: usize = 6;

/// Event kind codes.
pub const EVENT_BOUNDARY_BOUNCE: f32 = 1.0;
pub const EVENT_BODY_IMPACT: f32 = 2.0;
pub const EVENT_SHOT_FIRED: f32 = 3.0;
pub const EVENT_POCKET_CAPTURE: f32 = 4.0;

/// A table event flattened for the host.
/// `a` is always a body id; `b` is the second body for impacts and the team
/// code for captures.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PackedEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl From<&TableEvent> for PackedEvent {
    fn from(event: &TableEvent) -> Self {
        let (kind, a, b) = match *event {
            TableEvent::BoundaryBounce { body } => (EVENT_BOUNDARY_BOUNCE, body.0, 0),
            TableEvent::BodyImpact { a, b } => (EVENT_BODY_IMPACT, a.0, b.0),
            TableEvent::ShotFired { body } => (EVENT_SHOT_FIRED, body.0, 0),
            TableEvent::PocketCapture { body, team } => (EVENT_POCKET_CAPTURE, body.0, team.code()),
        };
        Self {
            kind,
            a: a as f32,
            b: b as f32,
            c: 0.0,
        }
    }
}

/// One live ball, ready for drawing.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BallInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub team: f32,
    /// 1.0 while moving, 0.0 at rest.
    pub moving: f32,
    pub id: f32,
}

impl BallInstance {
    pub fn from_body(body: &Body) -> Self {
        Self {
            x: body.pos.x,
            y: body.pos.y,
            radius: body.radius,
            team: body.team.code() as f32,
            moving: if body.moving { 1.0 } else { 0.0 },
            id: body.id.0 as f32,
        }
    }
}

/// Replace `out` with the packed form of `events`.
pub fn pack_events(events: &[TableEvent], out: &mut Vec<PackedEvent>) {
    out.clear();
    out.extend(events.iter().map(PackedEvent::from));
}

/// Replace `out` with one instance per live body.
pub fn pack_balls<'a>(bodies: impl Iterator<Item = &'a Body>, out: &mut Vec<BallInstance>) {
    out.clear();
    out.extend(bodies.map(BallInstance::from_body));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{BodyId, Team};
    use glam::Vec2;

    #[test]
    fn record_sizes_match_wire_format() {
        assert_eq!(std::mem::size_of::<PackedEvent>(), EVENT_FLOATS * 4);
        assert_eq!(std::mem::size_of::<BallInstance>(), BALL_FLOATS * 4);
    }

    #[test]
    fn capture_carries_team_code() {
        let packed = PackedEvent::from(&TableEvent::PocketCapture {
            body: BodyId(7),
            team: Team::Black,
        });
        assert_eq!(packed, PackedEvent { kind: 4.0, a: 7.0, b: 3.0, c: 0.0 });
    }

    #[test]
    fn impact_carries_both_bodies() {
        let packed = PackedEvent::from(&TableEvent::BodyImpact { a: BodyId(2), b: BodyId(5) });
        assert_eq!(packed.kind, EVENT_BODY_IMPACT);
        assert_eq!((packed.a, packed.b), (2.0, 5.0));
    }

    #[test]
    fn events_flatten_in_order() {
        let events = [
            TableEvent::ShotFired { body: BodyId(0) },
            TableEvent::BoundaryBounce { body: BodyId(3) },
        ];
        let mut out = vec![PackedEvent::default(); 5];
        pack_events(&events, &mut out);
        let floats: &[f32] = bytemuck::cast_slice(&out);
        assert_eq!(floats, &[3.0, 0.0, 0.0, 0.0, 1.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn ball_instance_from_body() {
        let body = Body::new(BodyId(4), Vec2::new(120.5, 300.0), 15.0, Team::Red)
            .with_velocity(Vec2::new(1.0, 0.0));
        let mut out = Vec::new();
        pack_balls(std::iter::once(&body), &mut out);
        let floats: &[f32] = bytemuck::cast_slice(&out);
        assert_eq!(floats, &[120.5, 300.0, 15.0, 1.0, 1.0, 4.0]);
    }
}
