pub mod api;
pub mod core;
pub mod bridge;
pub mod input;
pub mod error;

// Re-export key types at crate root for convenience
pub use crate::api::config::{BallDesc, PhysicsParams, TableConfig, WallDesc, rack_positions};
pub use crate::api::types::{BodyId, Team, TableEvent};
pub use crate::core::body::{Aim, Body};
pub use crate::core::boundary::{BounceAxis, Boundary};
pub use crate::core::collision::{ImpulseModel, Resolver, is_colliding, separate};
pub use crate::core::integrator::Integrator;
pub use crate::core::pocket::Pocket;
pub use crate::core::table::Table;
pub use crate::input::queue::{InputEvent, InputQueue};
pub use crate::bridge::protocol::{BallInstance, PackedEvent, BALL_FLOATS, EVENT_FLOATS};
pub use crate::error::{Error, Result};
