//! Shatterball - a last-ball-standing arena toy
//!
//! Core modules:
//! - `sim`: physics and particle simulation (balls, hexagons, collisions)
//! - `background`: decorative lattice recolored on eliminations
//! - `rankings`: final standings table
//!
//! Rendering, windowing and input live outside this crate. The simulation
//! exposes its full state each tick for a presentation layer to consume,
//! and the standings table is plain data.

pub mod background;
pub mod color;
pub mod rankings;
pub mod sim;

pub use color::{BALL_PALETTE, RAINBOW, Rgb};
pub use rankings::{Finish, RankingRow, standings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate; all speeds below are in pixels per tick
    pub const TICK_HZ: u32 = 60;

    /// Default arena dimensions (4:3)
    pub const ARENA_WIDTH: f32 = 960.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Ball defaults
    pub const BALL_SPEED: f32 = 7.0;
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_HEALTH: u32 = 10;
    pub const DAMAGE_PER_HIT: u32 = 1;

    /// Trail sampling
    pub const TRAIL_LENGTH: usize = 20;
    pub const TRAIL_GAP: f32 = 5.0;

    /// Explosion timing (2 seconds, with a top-up burst every 20 ticks)
    pub const EXPLOSION_DURATION_TICKS: u32 = 120;
    pub const EXPLOSION_TOP_UP_INTERVAL: u32 = 20;

    /// Hexagon obstacles
    pub const HEX_SIZE: f32 = 40.0;
    /// Corner hexagons sit this fraction of the arena in from the edges
    pub const HEX_MARGIN_FRAC: f32 = 0.20;

    /// Ball spawn placement
    pub const SPAWN_MARGIN: f32 = 50.0;
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

    /// Falling-square debris physics
    pub const DEBRIS_GRAVITY: f32 = 0.5;
    /// Below this vertical speed a grounded square stops for good
    pub const DEBRIS_REST_SPEED: f32 = 2.0;
    pub const DEBRIS_FLOOR_FRICTION: f32 = 0.8;
}

/// Wrap a rotation in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(mut deg: f32) -> f32 {
    while deg >= 360.0 {
        deg -= 360.0;
    }
    while deg < 0.0 {
        deg += 360.0;
    }
    deg
}
