//! Decorative background lattice.
//!
//! Purely cosmetic: a grid of wobbling accent points that reacts to ball
//! eliminations by recoloring matching points with a spiral flourish.
//! Nothing here feeds back into the simulation.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::color::{BALL_PALETTE, Rgb};
use crate::sim::state::ArenaConfig;
use crate::sim::tick::EliminationListener;

/// Roughly one lattice point per this many pixels
const CELL_SIZE: f32 = 100.0;
/// Peak circular wobble of a lattice point
const WOBBLE_RADIUS: f32 = 4.0;
const POINT_GRAY: Rgb = Rgb::new(128, 128, 128);

/// One lattice point: a gray dot with a colored accent core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridPoint {
    pub pos: Vec2,
    pub base: Vec2,
    pub radius: f32,
    pub phase: f32,
    pub color: Rgb,
    pub accent: Rgb,
}

/// Expanding spiral flourish emitted when a point changes color
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorChangeEffect {
    pub origin: Vec2,
    pub angle: f32,
    pub radius: f32,
    pub speed: f32,
    pub rotation_speed: f32,
    pub life: u32,
    pub max_radius: f32,
    pub old_color: Rgb,
    pub new_color: Rgb,
}

impl ColorChangeEffect {
    /// Current particle position on the spiral
    pub fn pos(&self) -> Vec2 {
        self.origin + Vec2::from_angle(self.angle) * self.radius
    }

    /// Old color fading into the new one as the spiral expands
    pub fn color(&self) -> Rgb {
        let progress = (self.radius / self.max_radius).clamp(0.0, 1.0);
        self.old_color.blend(self.new_color, progress)
    }
}

/// The animated lattice behind the arena
#[derive(Debug)]
pub struct Background {
    pub cols: usize,
    pub rows: usize,
    /// Row-major, `(rows + 1) * (cols + 1)` points
    pub points: Vec<GridPoint>,
    pub effects: Vec<ColorChangeEffect>,
    rng: Pcg32,
}

impl Background {
    pub fn new(config: &ArenaConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let cols = (config.width / CELL_SIZE) as usize;
        let rows = (config.height / CELL_SIZE) as usize;
        let cell_w = config.width / cols as f32;
        let cell_h = config.height / rows as f32;

        let mut points = Vec::with_capacity((rows + 1) * (cols + 1));
        for y in 0..=rows {
            for x in 0..=cols {
                let base = Vec2::new(x as f32 * cell_w, y as f32 * cell_h);
                points.push(GridPoint {
                    pos: base,
                    base,
                    radius: rng.random_range(4..=10) as f32,
                    phase: rng.random_range(0.0..TAU),
                    color: POINT_GRAY,
                    accent: BALL_PALETTE[rng.random_range(0..BALL_PALETTE.len())].0,
                });
            }
        }

        Self {
            cols,
            rows,
            points,
            effects: Vec::new(),
            rng,
        }
    }

    /// Wobble the lattice and advance the spiral flourishes
    pub fn update(&mut self, time_secs: f32) {
        for point in &mut self.points {
            point.pos = point.base + Vec2::from_angle(time_secs + point.phase) * WOBBLE_RADIUS;
        }
        for effect in &mut self.effects {
            effect.radius += effect.speed;
            effect.angle += effect.rotation_speed;
            effect.life = effect.life.saturating_sub(1);
        }
        self.effects
            .retain(|e| e.life > 0 && e.radius < e.max_radius);
    }

    fn spawn_spiral(&mut self, origin: Vec2, max_radius: f32, old_color: Rgb, new_color: Rgb) {
        let num_particles = 24;
        for i in 0..num_particles {
            self.effects.push(ColorChangeEffect {
                origin,
                angle: i as f32 / num_particles as f32 * TAU,
                radius: 0.0,
                speed: 1.5,
                rotation_speed: 0.15,
                life: 90,
                max_radius,
                old_color,
                new_color,
            });
        }
    }
}

impl EliminationListener for Background {
    /// Hand the eliminated color's lattice points to the survivors
    fn ball_eliminated(&mut self, survivor_colors: &[Rgb], eliminated: Rgb) {
        if survivor_colors.is_empty() {
            return;
        }
        for i in 0..self.points.len() {
            if self.points[i].accent != eliminated {
                continue;
            }
            let new_color = survivor_colors[self.rng.random_range(0..survivor_colors.len())];
            let (origin, max_radius, old_color) = {
                let point = &mut self.points[i];
                let old = point.accent;
                point.accent = new_color;
                (point.pos, point.radius * 4.0, old)
            };
            self.spawn_spiral(origin, max_radius, old_color, new_color);
        }
    }
}
