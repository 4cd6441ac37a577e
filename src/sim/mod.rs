//! Simulation core
//!
//! All physics lives here and nowhere else:
//! - Fixed-rate ticks, one update pass per tick in a fixed order
//! - Seeded RNG owned by the arena state
//! - No rendering or platform dependencies; presentation reads the state

pub mod ball;
pub mod collision;
pub mod hexagon;
pub mod particle;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallPhase};
pub use collision::{reflect, renormalize, resolve_ball_pair};
pub use hexagon::Hexagon;
pub use particle::{ExplosionSpark, FallingSquare, Particle, Shard, Spark, SparkMotion};
pub use state::{ArenaConfig, EliminatedBall, SimState, find_spawn_pos};
pub use tick::{EliminationListener, tick};
