//! The moving, crackable, shatterable ball entity.

use std::collections::VecDeque;
use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{RAINBOW, Rgb, color_name};
use crate::consts::*;
use crate::sim::particle::{ExplosionSpark, FallingSquare, Particle, Shard, Spark, SparkMotion};
use crate::sim::state::ArenaConfig;

/// Explosion phase machine.
///
/// Alive -> Exploding fires exactly once; Exploding -> Finished happens when
/// the countdown drains. The arena retires Finished balls the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallPhase {
    Alive,
    Exploding { ticks_left: u32 },
    Finished,
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Rgb,
    pub health: u32,
    /// Accumulated damage, clamped to `health`
    pub damage: u32,
    pub damage_per_hit: u32,
    /// Fracture directions accumulated with damage, rendered as fixed lines
    pub crack_angles: Vec<f32>,
    pub phase: BallPhase,
    /// Ticks survived while not exploding
    pub survival_ticks: u64,
    /// Past positions sampled behind the ball, oldest first
    #[serde(skip)]
    pub trail: VecDeque<Vec2>,
    /// Particles owned by this ball until promoted to arena debris
    #[serde(skip)]
    pub particles: Vec<Particle>,
}

impl Ball {
    /// Create a ball at `pos` heading in a random direction at full speed
    pub fn new(pos: Vec2, color: Rgb, rng: &mut impl Rng) -> Self {
        let heading = rng.random_range(0.0..TAU);
        Self {
            pos,
            vel: Vec2::from_angle(heading) * BALL_SPEED,
            radius: BALL_RADIUS,
            color,
            health: BALL_HEALTH,
            damage: 0,
            damage_per_hit: DAMAGE_PER_HIT,
            crack_angles: Vec::new(),
            phase: BallPhase::Alive,
            survival_ticks: 0,
            trail: VecDeque::with_capacity(TRAIL_LENGTH),
            particles: Vec::new(),
        }
    }

    pub fn is_exploding(&self) -> bool {
        !matches!(self.phase, BallPhase::Alive)
    }

    pub fn remaining_health(&self) -> u32 {
        self.health - self.damage
    }

    /// Fraction of health lost, for damage shading
    pub fn damage_ratio(&self) -> f32 {
        self.damage as f32 / self.health as f32
    }

    /// Crack line length grows with damage
    pub fn crack_length(&self) -> f32 {
        self.radius * (0.5 + self.damage_ratio())
    }

    /// Move one tick: record a trail sample, advance, and bounce off the
    /// arena walls. Exploding balls stay frozen in place.
    pub fn advance(&mut self, arena: &ArenaConfig, rng: &mut impl Rng) {
        if self.is_exploding() {
            return;
        }

        // Trail samples sit behind the ball along its heading
        self.trail.push_back(self.pos - self.vel * TRAIL_GAP);
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }

        self.pos += self.vel;

        if self.pos.x - self.radius <= 0.0 || self.pos.x + self.radius >= arena.width {
            self.vel.x = -self.vel.x;
            self.pos.x = self.pos.x.clamp(self.radius, arena.width - self.radius);
            self.spawn_bounce_sparks(rng);
        }
        if self.pos.y - self.radius <= 0.0 || self.pos.y + self.radius >= arena.height {
            self.vel.y = -self.vel.y;
            self.pos.y = self.pos.y.clamp(self.radius, arena.height - self.radius);
            self.spawn_bounce_sparks(rng);
        }
    }

    /// Small burst of bright sparks at the current position
    pub fn spawn_bounce_sparks(&mut self, rng: &mut impl Rng) {
        for _ in 0..3 {
            self.particles.push(Particle::Spark(Spark {
                pos: self.pos,
                vel: Vec2::new(rng.random_range(-6.0..6.0), rng.random_range(-6.0..6.0)),
                life: 15,
                size: 8.0,
                color: self.color.lighten(0.7),
            }));
        }
    }

    /// Apply one hit. Returns true when this hit triggered the explosion.
    ///
    /// Exploding balls ignore damage entirely. Surviving hits grow the crack
    /// set by roughly one line per hit over a full health bar.
    pub fn take_damage(&mut self, rng: &mut impl Rng) -> bool {
        if self.is_exploding() {
            return false;
        }
        self.damage = (self.damage + self.damage_per_hit).min(self.health);
        if self.damage >= self.health {
            self.start_explosion(rng);
            return true;
        }
        let new_cracks = (12.0 / self.health as f32) as usize;
        for _ in 0..new_cracks {
            self.crack_angles.push(rng.random_range(0.0..TAU));
        }
        false
    }

    /// One-shot Alive -> Exploding transition: freeze, start the countdown
    /// and seed the full particle burst.
    fn start_explosion(&mut self, rng: &mut impl Rng) {
        self.phase = BallPhase::Exploding {
            ticks_left: EXPLOSION_DURATION_TICKS,
        };
        log::debug!("{} ball shattered", color_name(self.color));
        self.spawn_explosion_burst(rng);
    }

    /// Advance the survival clock or the explosion countdown.
    /// Returns true on the tick the explosion finishes.
    pub fn update(&mut self, rng: &mut impl Rng) -> bool {
        match self.phase {
            BallPhase::Alive => {
                self.survival_ticks += 1;
                false
            }
            BallPhase::Exploding { ticks_left } => {
                let ticks_left = ticks_left - 1;
                // Top-up bursts keep the explosion lively; these stack on
                // top of the initial burst on purpose
                if ticks_left % EXPLOSION_TOP_UP_INTERVAL == 0 {
                    self.spawn_top_up_burst(rng);
                }
                if ticks_left == 0 {
                    self.phase = BallPhase::Finished;
                    true
                } else {
                    self.phase = BallPhase::Exploding { ticks_left };
                    false
                }
            }
            BallPhase::Finished => false,
        }
    }

    /// Run every owned particle one tick, dropping the expired ones
    pub fn update_particles(&mut self, arena: &ArenaConfig) {
        self.particles.retain_mut(|p| p.update(arena));
    }

    fn random_rainbow(rng: &mut impl Rng) -> Rgb {
        RAINBOW[rng.random_range(0..RAINBOW.len())]
    }

    /// The one-shot explosion burst: falling squares, shards, radial sparks,
    /// a spiral ring and a shockwave ring.
    fn spawn_explosion_burst(&mut self, rng: &mut impl Rng) {
        // Rainbow squares launched upward-ish, then ruled by gravity
        for _ in 0..15 {
            let angle = rng.random_range(0.0..TAU);
            let speed = rng.random_range(5.0..10.0);
            self.particles.push(Particle::FallingSquare(FallingSquare {
                pos: self.pos,
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - 5.0),
                size: rng.random_range(5..=9) as f32,
                rotation: rng.random_range(0.0..TAU),
                rotation_speed: rng.random_range(-0.2..0.2),
                gravity: DEBRIS_GRAVITY,
                bounce_factor: 0.5,
                resting: false,
                color: Self::random_rainbow(rng),
            }));
        }

        // Three irregular shards covering the ball's disc
        let num_shards = 3;
        for i in 0..num_shards {
            let angle = i as f32 / num_shards as f32 * TAU;
            let next_angle = (i + 1) as f32 / num_shards as f32 * TAU;
            let mid_angle = (angle + next_angle) / 2.0;
            let mid_radius = self.radius * rng.random_range(0.8..1.2);
            let base_points = [
                Vec2::ZERO,
                Vec2::from_angle(angle) * self.radius,
                Vec2::from_angle(mid_angle) * mid_radius,
                Vec2::from_angle(next_angle) * self.radius,
            ];
            let speed = rng.random_range(8.0..12.0);
            self.particles.push(Particle::Shard(Shard {
                base_points,
                center: self.pos,
                vel: Vec2::from_angle(angle) * speed,
                rotation: 0.0,
                rotation_speed: rng.random_range(-0.3..0.3),
                speed_decay: 0.99,
                life: 80,
                color: self.color.lighten(0.3),
            }));
        }

        // Radial sparks with pulsing size
        let num_sparks = 80;
        for i in 0..num_sparks {
            let angle = i as f32 / num_sparks as f32 * TAU;
            let speed = rng.random_range(8.0..15.0);
            let size = rng.random_range(1..=2) as f32;
            self.particles.push(Particle::ExplosionSpark(ExplosionSpark {
                pos: self.pos,
                vel: Vec2::from_angle(angle) * speed,
                life: rng.random_range(60..=80),
                base_size: size,
                size,
                speed_decay: 0.97,
                color: Self::random_rainbow(rng),
                motion: SparkMotion::Pulse {
                    phase: rng.random_range(0.0..PI),
                },
            }));
        }

        // Spiral ring winding out of the explosion center
        for i in 0..30 {
            let spiral_angle = i as f32 / 15.0 * 4.0 * PI;
            let spawn_radius = i as f32 * 0.25;
            let speed = rng.random_range(4.0..6.0);
            let size = rng.random_range(2..=3) as f32;
            self.particles.push(Particle::ExplosionSpark(ExplosionSpark {
                pos: self.pos + Vec2::from_angle(spiral_angle) * spawn_radius,
                vel: Vec2::from_angle(spiral_angle) * speed,
                life: rng.random_range(60..=80),
                base_size: size,
                size,
                speed_decay: 0.98,
                color: RAINBOW[i % RAINBOW.len()].lighten(0.8),
                motion: SparkMotion::Spiral {
                    angle: spiral_angle,
                },
            }));
        }

        // Slow expanding shockwave ring
        let num_shockwave = 20;
        for i in 0..num_shockwave {
            let angle = i as f32 / num_shockwave as f32 * TAU;
            let size = rng.random_range(1..=3) as f32;
            self.particles.push(Particle::ExplosionSpark(ExplosionSpark {
                pos: self.pos,
                vel: Vec2::from_angle(angle) * 1.5,
                life: 40,
                base_size: size,
                size,
                speed_decay: 0.99,
                color: Self::random_rainbow(rng).lighten(0.95),
                motion: SparkMotion::Shockwave {
                    max_size: rng.random_range(1..=3) as f32,
                },
            }));
        }
    }

    /// Smaller burst added every 20th countdown tick
    fn spawn_top_up_burst(&mut self, rng: &mut impl Rng) {
        for _ in 0..10 {
            let angle = rng.random_range(0.0..TAU);
            let speed = rng.random_range(8.0..15.0);
            let size = rng.random_range(2..=3) as f32;
            self.particles.push(Particle::ExplosionSpark(ExplosionSpark {
                pos: self.pos,
                vel: Vec2::from_angle(angle) * speed,
                life: rng.random_range(30..=40),
                base_size: size,
                size,
                speed_decay: 0.98,
                color: Self::random_rainbow(rng),
                motion: SparkMotion::Pulse {
                    phase: rng.random_range(0.0..PI),
                },
            }));
        }
    }
}
