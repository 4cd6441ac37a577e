//! Static hexagonal obstacle: rotates, pulses, and bounces balls without
//! ever damaging them.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::BALL_SPEED;
use crate::sim::ball::Ball;
use crate::sim::collision::{reflect, renormalize};
use crate::wrap_degrees;

/// Contact with a hexagon edge: unit normal toward the ball plus overlap
struct EdgeContact {
    normal: Vec2,
    depth: f32,
}

/// A rotating, pulsing hexagon obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hexagon {
    /// Top-left anchor; the center sits half a size in from it
    pub anchor: Vec2,
    pub size: f32,
    /// Degrees, wrapped to [0, 360)
    pub rotation: f32,
    /// Degrees per tick
    pub rotation_speed: f32,
    /// Per-instance phase so hexagons pulse independently
    pub pulse_phase: f32,
    /// Sinusoidal scale factor, stays within [0.9, 1.1]
    pub pulse: f32,
}

impl Hexagon {
    pub fn new(anchor: Vec2, size: f32, rng: &mut impl Rng) -> Self {
        Self {
            anchor,
            size,
            rotation: 0.0,
            rotation_speed: rng.random_range(0.25..0.75),
            pulse_phase: rng.random_range(0.0..TAU),
            pulse: 1.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.anchor + Vec2::splat(self.size / 2.0)
    }

    /// Advance rotation and recompute the pulse from elapsed seconds
    pub fn update(&mut self, time_secs: f32) {
        self.rotation = wrap_degrees(self.rotation + self.rotation_speed);
        self.pulse = 1.0 + 0.1 * (time_secs * 2.0 + self.pulse_phase).sin();
    }

    /// The six vertices at `60° * i + rotation`, radius `size * scale * pulse`
    pub fn corners(&self, scale: f32) -> [Vec2; 6] {
        let center = self.center();
        std::array::from_fn(|i| {
            let angle = (60.0 * i as f32 + self.rotation).to_radians();
            center + Vec2::from_angle(angle) * (self.size * scale * self.pulse)
        })
    }

    /// Decorative inner ring at half the outer size
    pub fn inner_corners(&self) -> [Vec2; 6] {
        self.corners(0.5)
    }

    /// First edge (consecutive corner pair) whose segment comes within
    /// `radius` of `pos`. Degenerate edges are skipped.
    fn edge_contact(&self, pos: Vec2, radius: f32) -> Option<EdgeContact> {
        let corners = self.corners(1.0);
        for i in 0..6 {
            let p1 = corners[i];
            let p2 = corners[(i + 1) % 6];
            let edge = p2 - p1;
            let len_sq = edge.length_squared();
            if len_sq < 1e-4 {
                continue;
            }
            let t = ((pos - p1).dot(edge) / len_sq).clamp(0.0, 1.0);
            let closest = p1 + edge * t;
            let delta = pos - closest;
            let dist = delta.length();
            if dist <= radius {
                // Ball center exactly on the edge: fall back to the edge
                // perpendicular as the contact normal
                let normal = if dist > 0.0 {
                    delta / dist
                } else {
                    edge.perp() / len_sq.sqrt()
                };
                return Some(EdgeContact {
                    normal,
                    depth: radius - dist,
                });
            }
        }
        None
    }

    /// Pure overlap test, used for spawn placement
    pub fn overlaps_circle(&self, pos: Vec2, radius: f32) -> bool {
        if self.center().distance(pos) > self.size + radius {
            return false;
        }
        self.edge_contact(pos, radius).is_some()
    }

    /// Bounce a ball off this hexagon if they touch.
    ///
    /// Pushes the ball out along the contact normal by the exact overlap,
    /// reflects and renormalizes its velocity, and spawns bounce sparks.
    /// Stops at the first colliding edge. Never applies damage.
    pub fn collide(&self, ball: &mut Ball, rng: &mut impl Rng) -> bool {
        if ball.is_exploding() {
            return false;
        }
        // Broad phase: bounding circle around the unscaled hexagon
        if self.center().distance(ball.pos) > self.size + ball.radius {
            return false;
        }
        let Some(contact) = self.edge_contact(ball.pos, ball.radius) else {
            return false;
        };
        ball.pos += contact.normal * contact.depth;
        ball.vel = renormalize(reflect(ball.vel, contact.normal), BALL_SPEED);
        ball.spawn_bounce_sparks(rng);
        true
    }
}
