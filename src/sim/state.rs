//! Arena state: every ball, hexagon and debris particle in one place.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::color::{BALL_PALETTE, Rgb};
use crate::consts::*;
use crate::sim::ball::Ball;
use crate::sim::hexagon::Hexagon;
use crate::sim::particle::FallingSquare;

/// Arena dimensions, fixed at startup and passed by reference everywhere
/// that needs them - never recomputed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl ArenaConfig {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A ball that finished exploding, kept for the standings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EliminatedBall {
    pub color: Rgb,
    pub survival_ticks: u64,
}

/// Complete simulation state
#[derive(Debug)]
pub struct SimState {
    pub seed: u64,
    pub config: ArenaConfig,
    pub time_ticks: u64,
    /// Balls still in play, alive or mid-explosion
    pub balls: Vec<Ball>,
    pub hexagons: Vec<Hexagon>,
    /// Append-only, in elimination order
    pub eliminated: Vec<EliminatedBall>,
    /// Promoted falling squares. Grows forever, updated in place; only the
    /// tick loop may touch it after promotion.
    pub debris: Vec<FallingSquare>,
    pub rng: Pcg32,
}

impl SimState {
    /// Build the arena: five hexagons, then one ball per palette color at a
    /// hexagon-free position.
    pub fn new(config: ArenaConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let hexagons = hexagon_layout(&config, &mut rng);

        let mut state = Self {
            seed,
            config,
            time_ticks: 0,
            balls: Vec::with_capacity(BALL_PALETTE.len()),
            hexagons,
            eliminated: Vec::new(),
            debris: Vec::new(),
            rng,
        };

        for (color, _) in BALL_PALETTE {
            let pos = find_spawn_pos(&state.config, &state.hexagons, &mut state.rng);
            let ball = Ball::new(pos, color, &mut state.rng);
            state.balls.push(ball);
        }

        state
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.time_ticks as f32 / TICK_HZ as f32
    }

    /// Balls that are neither eliminated nor mid-explosion
    pub fn active_count(&self) -> usize {
        self.balls.iter().filter(|b| !b.is_exploding()).count()
    }

    /// The sole survivor, once exactly one non-exploding ball remains
    pub fn winner(&self) -> Option<&Ball> {
        match self.balls.as_slice() {
            [ball] if !ball.is_exploding() => Some(ball),
            _ => None,
        }
    }
}

/// Five hexagons: one per corner region at 20% margins, one dead center
fn hexagon_layout(config: &ArenaConfig, rng: &mut impl Rng) -> Vec<Hexagon> {
    let size = HEX_SIZE;
    let margin_x = config.width * HEX_MARGIN_FRAC;
    let margin_y = config.height * HEX_MARGIN_FRAC;
    [
        Vec2::new(margin_x, margin_y),
        Vec2::new(config.width - margin_x - size * 2.0, margin_y),
        Vec2::new(config.width / 2.0 - size, config.height / 2.0 - size),
        Vec2::new(margin_x, config.height - margin_y - size * 2.0),
        Vec2::new(
            config.width - margin_x - size * 2.0,
            config.height - margin_y - size * 2.0,
        ),
    ]
    .into_iter()
    .map(|anchor| Hexagon::new(anchor, size, rng))
    .collect()
}

/// Random position clear of every hexagon, within the spawn margins.
/// Falls back to the arena center once the retry budget runs out.
pub fn find_spawn_pos(config: &ArenaConfig, hexagons: &[Hexagon], rng: &mut impl Rng) -> Vec2 {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let pos = Vec2::new(
            rng.random_range(SPAWN_MARGIN..config.width - SPAWN_MARGIN),
            rng.random_range(SPAWN_MARGIN..config.height - SPAWN_MARGIN),
        );
        if hexagons
            .iter()
            .all(|h| !h.overlaps_circle(pos, BALL_RADIUS))
        {
            return pos;
        }
    }
    config.center()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_partition() {
        let state = SimState::new(ArenaConfig::default(), 123);
        assert_eq!(state.balls.len(), BALL_PALETTE.len());
        assert!(state.eliminated.is_empty());
        assert_eq!(state.hexagons.len(), 5);
        assert_eq!(state.active_count(), BALL_PALETTE.len());
        assert!(state.winner().is_none());
    }

    #[test]
    fn test_spawn_positions_clear_of_hexagons() {
        for seed in 0..8 {
            let state = SimState::new(ArenaConfig::default(), seed);
            for ball in &state.balls {
                for hexagon in &state.hexagons {
                    assert!(
                        !hexagon.overlaps_circle(ball.pos, ball.radius),
                        "seed {seed}: ball spawned inside a hexagon"
                    );
                }
            }
        }
    }

    #[test]
    fn test_spawn_fallback_to_center() {
        // Shrink the arena until the spawn region is a 40x40 box, then park
        // a hexagon on it so every candidate position touches an edge
        let config = ArenaConfig {
            width: 140.0,
            height: 140.0,
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let blocker = Hexagon::new(Vec2::new(60.0, 60.0), 20.0, &mut rng);
        let pos = find_spawn_pos(&config, &[blocker], &mut rng);
        assert_eq!(pos, config.center());
    }

    #[test]
    fn test_ball_speeds_start_normalized() {
        let state = SimState::new(ArenaConfig::default(), 99);
        for ball in &state.balls {
            assert!((ball.vel.length() - BALL_SPEED).abs() < 0.001);
        }
    }
}
