use glam::Vec2;

use crate::api::config::{PhysicsParams, TableConfig};
use crate::api::types::{BodyId, TableEvent};
use crate::core::body::{Aim, Body};
use crate::core::boundary::Boundary;
use crate::core::collision::{is_colliding, separate, Resolver};
use crate::core::integrator::Integrator;
use crate::core::math::mirror_through;
use crate::core::pocket::Pocket;
use crate::error::Result;
use crate::input::queue::InputQueue;

/// The whole simulated table: bodies, walls, pockets and the tick pipeline.
///
/// Bodies live in an arena indexed by `BodyId` and are never removed from it;
/// a pocketed body is flagged and skipped by every pass from then on.
pub struct Table {
    bodies: Vec<Body>,
    walls: Vec<Boundary>,
    pockets: Vec<Pocket>,
    params: PhysicsParams,
    integrator: Integrator,
    resolver: Resolver,
    cue: BodyId,
    captured: Vec<BodyId>,
    /// Events from the most recent tick.
    events: Vec<TableEvent>,
    /// Events raised between ticks, reported by the next tick.
    staged: Vec<TableEvent>,
    /// Last pointer position reported by the host.
    pointer: Option<Vec2>,
    tick_count: u64,
}

impl Table {
    /// Build a table from a validated config. Body ids follow rack order.
    pub fn new(config: &TableConfig) -> Result<Self> {
        config.validate()?;

        let mut cue = BodyId(0);
        let bodies: Vec<Body> = config
            .balls
            .iter()
            .enumerate()
            .map(|(i, desc)| {
                let id = BodyId(i as u32);
                let body = Body::new(id, desc.pos, desc.radius, desc.team).with_mass(desc.mass);
                if desc.cue {
                    cue = id;
                    body.player_controlled()
                } else {
                    body
                }
            })
            .collect();

        let walls = config
            .walls
            .iter()
            .map(|w| Boundary::new(w.origin, w.width, w.height))
            .collect();
        let pockets = config
            .pockets
            .iter()
            .map(|&pos| Pocket::new(pos, config.pocket_radius))
            .collect();

        let p = config.physics;
        log::info!(
            "table ready: {} balls, {} walls, {} pockets",
            config.balls.len(),
            config.walls.len(),
            config.pockets.len()
        );

        Ok(Self {
            bodies,
            walls,
            pockets,
            params: p,
            integrator: Integrator::new(p.friction, p.rest_epsilon),
            resolver: Resolver::new(p.impulse_model, p.reproject_basis),
            cue,
            captured: Vec::new(),
            events: Vec::new(),
            staged: Vec::new(),
            pointer: None,
            tick_count: 0,
        })
    }

    // -- Queries --

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    /// Bodies still in play.
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| b.is_live())
    }

    /// Pocketed bodies, in capture order.
    pub fn captured(&self) -> &[BodyId] {
        &self.captured
    }

    pub fn cue_ball(&self) -> &Body {
        &self.bodies[self.cue.index()]
    }

    pub fn walls(&self) -> &[Boundary] {
        &self.walls
    }

    pub fn pockets(&self) -> &[Pocket] {
        &self.pockets
    }

    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    /// Events reported by the most recent tick, including a shot fired
    /// through `shoot` just before it. Replaced on every tick.
    pub fn events(&self) -> &[TableEvent] {
        &self.events
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// No live body is moving.
    pub fn is_settled(&self) -> bool {
        self.bodies().all(|b| !b.moving)
    }

    // -- Shot input --

    /// Stage the cue ball's aim from a pointer position.
    ///
    /// The cue is pulled back like a slingshot: the shot points from the ball
    /// towards the pointer mirrored through the ball's centre, with speed
    /// `sqrt(distance)`. Ignored unless the cue ball is live and at rest.
    pub fn aim_at(&mut self, pointer: Vec2) -> Option<Aim> {
        let cue = &mut self.bodies[self.cue.index()];
        if !cue.is_live() || cue.moving {
            return None;
        }
        let dir = mirror_through(pointer, cue.pos) - cue.pos;
        cue.aim = Aim {
            angle: dir.y.atan2(dir.x),
            speed: pointer.distance(cue.pos).sqrt(),
        };
        Some(cue.aim)
    }

    /// Strike the cue ball with its staged aim, speed clamped to the shot range.
    /// Returns `false` if the cue ball is moving or pocketed.
    ///
    /// Called between ticks, the `ShotFired` event shows up in `events()`
    /// after the next tick.
    pub fn shoot(&mut self) -> bool {
        match self.fire() {
            Some(body) => {
                self.staged.push(TableEvent::ShotFired { body });
                true
            }
            None => false,
        }
    }

    fn fire(&mut self) -> Option<BodyId> {
        let (min, max) = (self.params.min_shot_speed, self.params.max_shot_speed);
        let cue = &mut self.bodies[self.cue.index()];
        if !cue.is_live() || cue.moving {
            return None;
        }
        let speed = cue.aim.speed.clamp(min, max);
        cue.vel = Vec2::from_angle(cue.aim.angle) * speed;
        cue.moving = true;
        log::debug!("shot: angle={:.3} speed={:.2}", cue.aim.angle, speed);
        Some(cue.id)
    }

    // -- Simulation --

    /// Run one tick: apply input, then integrate, bounce off walls, separate
    /// and resolve ball pairs, and capture pocketed balls, in that order.
    pub fn tick(&mut self, input: &InputQueue) {
        self.events.clear();
        self.events.append(&mut self.staged);
        self.tick_count += 1;

        if let Some(pointer) = input.latest_pointer() {
            self.pointer = Some(pointer);
        }
        if let Some(pointer) = self.pointer {
            self.aim_at(pointer);
        }
        if input.shoot_requested() {
            if let Some(body) = self.fire() {
                self.events.push(TableEvent::ShotFired { body });
            }
        }

        self.integrate();
        self.resolve_walls();
        self.separate_pairs();
        self.resolve_impacts();
        self.capture_pocketed();
    }

    /// Tick with no input.
    pub fn step(&mut self) {
        self.tick(&InputQueue::new());
    }

    fn live_indices(&self) -> Vec<usize> {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_live())
            .map(|(i, _)| i)
            .collect()
    }

    fn integrate(&mut self) {
        for body in self.bodies.iter_mut().filter(|b| b.is_live()) {
            self.integrator.advance(body);
        }
    }

    /// Only moving bodies are tested. Flips velocity only; an overlapping
    /// body is not pushed back out.
    fn resolve_walls(&mut self) {
        for body in self.bodies.iter_mut().filter(|b| b.is_live() && b.moving) {
            for wall in &self.walls {
                if let Some(axis) = wall.test(body.pos, body.radius) {
                    body.vel = axis.reflect(body.vel);
                    self.events.push(TableEvent::BoundaryBounce { body: body.id });
                }
            }
        }
    }

    fn separate_pairs(&mut self) {
        let live = self.live_indices();
        for (n, &i) in live.iter().enumerate() {
            for &j in &live[n + 1..] {
                let (a, b) = pair_mut(&mut self.bodies, i, j);
                separate(a, b);
            }
        }
    }

    /// The first body of a colliding pair is advanced again immediately; the
    /// second picks up its new velocity on the next tick.
    fn resolve_impacts(&mut self) {
        let padding = self.params.hitbox_padding;
        let live = self.live_indices();
        for (n, &i) in live.iter().enumerate() {
            for &j in &live[n + 1..] {
                let (a, b) = pair_mut(&mut self.bodies, i, j);
                // Two resting bodies have nothing to exchange
                if !a.moving && !b.moving {
                    continue;
                }
                if !is_colliding(a, b, padding) {
                    continue;
                }
                self.resolver.resolve(a, b);
                a.moving = true;
                b.moving = true;
                self.integrator.advance(a);
                self.events.push(TableEvent::BodyImpact { a: a.id, b: b.id });
            }
        }
    }

    /// Collect every body inside a pocket first, then retire them, so the
    /// pass never sees a half-updated live set.
    fn capture_pocketed(&mut self) {
        let pocketed: Vec<usize> = self
            .bodies
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_live())
            .filter(|(_, b)| self.pockets.iter().any(|p| p.contains(b.pos, b.radius)))
            .map(|(i, _)| i)
            .collect();

        for i in pocketed {
            let body = &mut self.bodies[i];
            body.pocketed = true;
            body.come_to_rest();
            log::debug!("body {:?} ({:?}) pocketed at {:?}", body.id, body.team, body.pos);
            self.captured.push(body.id);
            self.events.push(TableEvent::PocketCapture {
                body: body.id,
                team: body.team,
            });
        }
    }
}

/// Two distinct mutable bodies from the arena. Requires `i < j`.
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i < j);
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}
