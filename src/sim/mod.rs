//! Simulation core.
//!
//! Plain Rust state machines with no ECS access. The Bevy plugins own sessions as
//! components and feed them input and delta time; everything here can be stepped
//! directly from tests.

pub mod bird;
pub mod clock;
pub mod collision;
pub mod ground;
pub mod obstacles;
pub mod pipe;
pub mod session;

pub use bird::{Bird, WingFrame};
pub use collision::CollisionCause;
pub use pipe::{Pipe, PipeId};
pub use session::{Phase, Session, Snapshot, StepReport};
