//! Transient visual entities spawned by balls.
//!
//! Every particle kind is a closed variant with its own payload and update
//! rule. Finite-lifetime particles report their own expiry; falling squares
//! live forever and are promoted into the arena's debris list instead of
//! being removed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::consts::{DEBRIS_FLOOR_FRICTION, DEBRIS_REST_SPEED};
use crate::sim::state::ArenaConfig;

/// Sub-behavior of an explosion spark
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum SparkMotion {
    /// Radial burst with a pulsing size
    Pulse { phase: f32 },
    /// The heading angle keeps advancing and steers the velocity
    Spiral { angle: f32 },
    /// Expanding ring
    Shockwave { max_size: f32 },
}

/// Short-lived bounce debris emitted on wall and ball contacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub size: f32,
    pub color: Rgb,
}

/// Explosion spark with per-tick speed decay and a motion sub-behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionSpark {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub base_size: f32,
    pub size: f32,
    pub speed_decay: f32,
    pub color: Rgb,
    pub motion: SparkMotion,
}

/// Irregular polygon fragment of a shattered ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shard {
    /// Outline relative to the explosion center, before rotation
    pub base_points: [Vec2; 4],
    pub center: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub speed_decay: f32,
    pub life: u32,
    pub color: Rgb,
}

impl Shard {
    /// Current outline: the fixed point set rotated by the accumulated
    /// angle and carried to the shard center.
    pub fn points(&self) -> [Vec2; 4] {
        let rot = Vec2::from_angle(self.rotation);
        self.base_points.map(|p| self.center + rot.rotate(p))
    }
}

/// Gravity-affected square that bounces, then comes to rest forever
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingSquare {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub gravity: f32,
    pub bounce_factor: f32,
    pub resting: bool,
    pub color: Rgb,
}

impl FallingSquare {
    /// One tick of gravity, floor/wall bouncing and rest detection.
    pub fn update(&mut self, arena: &ArenaConfig) {
        if self.resting {
            return;
        }
        self.vel.y += self.gravity;
        self.pos += self.vel;
        self.rotation += self.rotation_speed;

        let half = self.size / 2.0;
        if self.pos.y + half >= arena.height {
            self.pos.y = arena.height - half;
            if self.vel.y.abs() < DEBRIS_REST_SPEED {
                self.resting = true;
                self.vel = Vec2::ZERO;
                self.rotation_speed = 0.0;
            } else {
                self.vel.y = -self.vel.y * self.bounce_factor;
                self.vel.x *= DEBRIS_FLOOR_FRICTION;
            }
        }

        if self.pos.x - half <= 0.0 {
            self.pos.x = half;
            self.vel.x = self.vel.x.abs() * self.bounce_factor;
        } else if self.pos.x + half >= arena.width {
            self.pos.x = arena.width - half;
            self.vel.x = -self.vel.x.abs() * self.bounce_factor;
        }
    }
}

/// A transient visual entity, tagged by kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Particle {
    Spark(Spark),
    ExplosionSpark(ExplosionSpark),
    Shard(Shard),
    FallingSquare(FallingSquare),
}

impl Particle {
    /// Advance one tick. Returns false once a finite lifetime has run out;
    /// falling squares always report alive.
    pub fn update(&mut self, arena: &ArenaConfig) -> bool {
        match self {
            Particle::Spark(spark) => {
                spark.pos += spark.vel;
                spark.life = spark.life.saturating_sub(1);
                spark.life > 0
            }
            Particle::ExplosionSpark(spark) => {
                spark.vel *= spark.speed_decay;
                spark.pos += spark.vel;
                spark.life = spark.life.saturating_sub(1);
                match &mut spark.motion {
                    SparkMotion::Pulse { phase } => {
                        let wobble = 0.8 + 0.4 * (*phase + spark.life as f32 * 0.1).sin();
                        spark.size = spark.base_size * wobble;
                    }
                    SparkMotion::Spiral { angle } => {
                        *angle += 0.1;
                        spark.vel += Vec2::from_angle(*angle) * 0.2;
                    }
                    SparkMotion::Shockwave { max_size } => {
                        let progress = 1.0 - spark.life as f32 / 60.0;
                        spark.size = *max_size * progress;
                    }
                }
                spark.life > 0
            }
            Particle::Shard(shard) => {
                shard.vel *= shard.speed_decay;
                shard.center += shard.vel;
                shard.rotation += shard.rotation_speed;
                shard.life = shard.life.saturating_sub(1);
                shard.life > 0
            }
            Particle::FallingSquare(square) => {
                square.update(arena);
                true
            }
        }
    }

    pub fn is_falling_square(&self) -> bool {
        matches!(self, Particle::FallingSquare(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use std::f32::consts::FRAC_PI_2;

    fn arena() -> ArenaConfig {
        ArenaConfig {
            width: 800.0,
            height: 600.0,
        }
    }

    #[test]
    fn test_spark_expires() {
        let mut p = Particle::Spark(Spark {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            life: 2,
            size: 8.0,
            color: Rgb::new(255, 255, 255),
        });
        assert!(p.update(&arena()));
        assert!(!p.update(&arena()));
    }

    #[test]
    fn test_spark_moves_by_velocity() {
        let mut p = Particle::Spark(Spark {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(3.0, -2.0),
            life: 5,
            size: 8.0,
            color: Rgb::new(255, 255, 255),
        });
        p.update(&arena());
        let Particle::Spark(spark) = &p else {
            panic!("kind changed")
        };
        assert_eq!(spark.pos, Vec2::new(13.0, 8.0));
    }

    #[test]
    fn test_shockwave_size_grows() {
        let mut spark = ExplosionSpark {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 40,
            base_size: 2.0,
            size: 2.0,
            speed_decay: 1.0,
            color: Rgb::new(255, 255, 255),
            motion: SparkMotion::Shockwave { max_size: 3.0 },
        };
        let mut p = Particle::ExplosionSpark(spark.clone());
        p.update(&arena());
        let Particle::ExplosionSpark(after_one) = &p else {
            panic!("kind changed")
        };
        let size_after_one = after_one.size;
        for _ in 0..10 {
            p.update(&arena());
        }
        let Particle::ExplosionSpark(after_more) = &p else {
            panic!("kind changed")
        };
        assert!(after_more.size > size_after_one);

        // sanity: the formula expands toward max_size as life drains
        spark.life = 1;
        let mut p = Particle::ExplosionSpark(spark);
        p.update(&arena());
        let Particle::ExplosionSpark(s) = &p else {
            panic!("kind changed")
        };
        assert!((s.size - 3.0).abs() < 0.01);
    }

    #[test]
    fn test_shard_points_rotate_around_center() {
        let mut p = Particle::Shard(Shard {
            base_points: [
                Vec2::ZERO,
                Vec2::new(10.0, 0.0),
                Vec2::new(10.0, 10.0),
                Vec2::new(0.0, 10.0),
            ],
            center: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            rotation: 0.0,
            rotation_speed: FRAC_PI_2,
            speed_decay: 1.0,
            life: 80,
            color: Rgb::new(255, 255, 255),
        });
        p.update(&arena());
        let Particle::Shard(shard) = &p else {
            panic!("kind changed")
        };
        // A quarter turn maps (10, 0) to (0, 10) relative to the center
        let pts = shard.points();
        assert!((pts[1] - Vec2::new(100.0, 110.0)).length() < 0.001);
    }

    #[test]
    fn test_falling_square_comes_to_rest() {
        let mut square = FallingSquare {
            pos: Vec2::new(400.0, 590.0),
            vel: Vec2::new(1.0, 1.0),
            size: 8.0,
            rotation: 0.0,
            rotation_speed: 0.1,
            gravity: 0.5,
            bounce_factor: 0.5,
            resting: false,
            color: Rgb::new(255, 0, 0),
        };
        let arena = arena();
        for _ in 0..600 {
            square.update(&arena);
            if square.resting {
                break;
            }
        }
        assert!(square.resting);
        assert_eq!(square.vel, Vec2::ZERO);
        assert_eq!(square.rotation_speed, 0.0);
        assert!((square.pos.y + square.size / 2.0 - arena.height).abs() < 0.001);

        // A resting square never moves again
        let frozen = square.pos;
        square.update(&arena);
        assert_eq!(square.pos, frozen);
    }

    #[test]
    fn test_falling_square_bounces_off_walls() {
        let arena = arena();
        let mut square = FallingSquare {
            pos: Vec2::new(2.0, 100.0),
            vel: Vec2::new(-5.0, 0.0),
            size: 8.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            gravity: 0.0,
            bounce_factor: 0.5,
            resting: false,
            color: Rgb::new(255, 0, 0),
        };
        square.update(&arena);
        assert!(square.vel.x > 0.0);
        assert!(square.pos.x - square.size / 2.0 >= 0.0);
    }
}
