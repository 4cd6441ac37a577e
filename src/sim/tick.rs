//! Fixed-order simulation tick.
//!
//! The ordering below is load-bearing: the collision passes assume movement
//! already ran this tick, and falling squares are promoted to the arena's
//! debris list before their owning ball can disappear.

use crate::color::{Rgb, color_name};
use crate::consts::TICK_HZ;
use crate::sim::collision::resolve_ball_pair;
use crate::sim::particle::{FallingSquare, Particle};
use crate::sim::state::{EliminatedBall, SimState};

/// Cosmetic collaborator notified when a ball leaves the arena.
///
/// Receives the colors still in play plus the color that just went out;
/// nothing it does feeds back into the simulation.
pub trait EliminationListener {
    fn ball_eliminated(&mut self, survivor_colors: &[Rgb], eliminated: Rgb);
}

/// No-op listener for headless runs and tests
impl EliminationListener for () {
    fn ball_eliminated(&mut self, _survivor_colors: &[Rgb], _eliminated: Rgb) {}
}

/// Advance the arena by one tick.
pub fn tick(state: &mut SimState, listener: &mut impl EliminationListener) {
    state.time_ticks += 1;
    let time_secs = state.elapsed_secs();
    let config = state.config;

    // 1. Obstacle animation; no physics effect on this pass
    for hexagon in &mut state.hexagons {
        hexagon.update(time_secs);
    }

    // 2. Move balls, promote fresh falling squares, run particles, advance
    //    explosion countdowns and retire finished balls
    let mut idx = 0;
    while idx < state.balls.len() {
        let ball = &mut state.balls[idx];
        ball.advance(&config, &mut state.rng);
        promote_falling_squares(&mut ball.particles, &mut state.debris);
        ball.update_particles(&config);

        if ball.update(&mut state.rng) {
            promote_falling_squares(&mut ball.particles, &mut state.debris);
            let ball = state.balls.remove(idx);
            log::info!(
                "{} ball eliminated after {:.1}s",
                color_name(ball.color),
                ball.survival_ticks as f32 / TICK_HZ as f32
            );
            state.eliminated.push(EliminatedBall {
                color: ball.color,
                survival_ticks: ball.survival_ticks,
            });
            let survivors: Vec<Rgb> = state
                .balls
                .iter()
                .filter(|b| !b.is_exploding())
                .map(|b| b.color)
                .collect();
            listener.ball_eliminated(&survivors, ball.color);
            continue;
        }
        idx += 1;
    }

    // 3. Debris physics; the list only ever grows
    for square in &mut state.debris {
        square.update(&config);
    }

    // 4. Ball-ball collisions over all unordered pairs. The active count is
    //    re-read per pair so an explosion earlier in the pass is seen by the
    //    damage policy of later pairs.
    let len = state.balls.len();
    for i in 0..len {
        for j in (i + 1)..len {
            let active_count = state.balls.iter().filter(|b| !b.is_exploding()).count();
            let (head, tail) = state.balls.split_at_mut(j);
            resolve_ball_pair(&mut head[i], &mut tail[0], active_count, &mut state.rng);
        }
    }

    // 5. Ball-hexagon collisions: bounce only, never damage
    for ball in &mut state.balls {
        for hexagon in &state.hexagons {
            hexagon.collide(ball, &mut state.rng);
        }
    }
}

/// Move every falling square out of a ball's private collection into the
/// arena debris list. Index-based compaction; order does not matter.
fn promote_falling_squares(particles: &mut Vec<Particle>, debris: &mut Vec<FallingSquare>) {
    let mut i = 0;
    while i < particles.len() {
        match particles[i] {
            Particle::FallingSquare(_) => {
                if let Particle::FallingSquare(square) = particles.swap_remove(i) {
                    debris.push(square);
                }
            }
            _ => i += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BALL_PALETTE;
    use crate::consts::*;
    use crate::sim::state::ArenaConfig;
    use glam::Vec2;

    fn state() -> SimState {
        SimState::new(ArenaConfig::default(), 2024)
    }

    /// Park every ball far apart so no collisions interfere with a test
    fn separate_balls(state: &mut SimState) {
        for (i, ball) in state.balls.iter_mut().enumerate() {
            ball.pos = Vec2::new(100.0 + 120.0 * i as f32, 60.0);
            ball.vel = Vec2::new(0.0, BALL_SPEED);
        }
        state.hexagons.clear();
    }

    #[test]
    fn test_partition_invariant_over_time() {
        let mut state = state();
        let total = BALL_PALETTE.len();
        for _ in 0..1200 {
            tick(&mut state, &mut ());
            assert_eq!(state.balls.len() + state.eliminated.len(), total);
        }
    }

    #[test]
    fn test_health_monotonicity() {
        let mut state = state();
        let mut last_damage: Vec<(Rgb, u32)> =
            state.balls.iter().map(|b| (b.color, b.damage)).collect();
        for _ in 0..1200 {
            tick(&mut state, &mut ());
            for ball in &state.balls {
                if let Some((_, before)) = last_damage.iter().find(|(c, _)| *c == ball.color) {
                    assert!(ball.damage >= *before, "damage must never decrease");
                }
            }
            last_damage = state.balls.iter().map(|b| (b.color, b.damage)).collect();
        }
    }

    #[test]
    fn test_speed_invariant_over_time() {
        let mut state = state();
        for _ in 0..600 {
            tick(&mut state, &mut ());
            for ball in &state.balls {
                if !ball.is_exploding() {
                    assert!(
                        (ball.vel.length() - BALL_SPEED).abs() < 1e-3,
                        "active balls always travel at the configured speed"
                    );
                }
            }
        }
    }

    #[test]
    fn test_explosion_retires_ball_and_promotes_debris() {
        let mut state = state();
        separate_balls(&mut state);
        let color = state.balls[0].color;
        {
            let ball = &mut state.balls[0];
            ball.damage = ball.health - 1;
            let mut rng = state.rng.clone();
            ball.take_damage(&mut rng);
        }
        assert!(state.balls[0].is_exploding());

        for _ in 0..EXPLOSION_DURATION_TICKS + 1 {
            tick(&mut state, &mut ());
        }

        assert_eq!(state.balls.len(), BALL_PALETTE.len() - 1);
        assert_eq!(state.eliminated.len(), 1);
        assert_eq!(state.eliminated[0].color, color);
        // The one-shot burst contained 15 falling squares, all promoted
        assert!(state.debris.len() >= 15);
        assert!(
            state.balls.iter().all(|b| b.color != color),
            "eliminated ball must leave the active set"
        );
    }

    #[test]
    fn test_listener_receives_elimination() {
        struct Recorder {
            calls: Vec<(Vec<Rgb>, Rgb)>,
        }
        impl EliminationListener for Recorder {
            fn ball_eliminated(&mut self, survivors: &[Rgb], eliminated: Rgb) {
                self.calls.push((survivors.to_vec(), eliminated));
            }
        }

        let mut state = state();
        separate_balls(&mut state);
        let color = state.balls[0].color;
        {
            let ball = &mut state.balls[0];
            ball.damage = ball.health - 1;
            let mut rng = state.rng.clone();
            ball.take_damage(&mut rng);
        }

        let mut recorder = Recorder { calls: Vec::new() };
        for _ in 0..EXPLOSION_DURATION_TICKS + 1 {
            tick(&mut state, &mut recorder);
        }
        assert_eq!(recorder.calls.len(), 1);
        let (survivors, eliminated) = &recorder.calls[0];
        assert_eq!(*eliminated, color);
        assert_eq!(survivors.len(), BALL_PALETTE.len() - 1);
        assert!(!survivors.contains(&color));
    }

    #[test]
    fn test_winner_declared_when_one_ball_left() {
        let mut state = state();
        separate_balls(&mut state);
        // Blow up everyone but the last ball
        let n = state.balls.len();
        let mut rng = state.rng.clone();
        for ball in state.balls.iter_mut().take(n - 1) {
            ball.damage = ball.health - 1;
            ball.take_damage(&mut rng);
        }
        assert!(state.winner().is_none(), "explosions still animating");

        for _ in 0..EXPLOSION_DURATION_TICKS + 1 {
            tick(&mut state, &mut ());
        }
        let winner = state.winner().expect("one ball should remain");
        assert!(!winner.is_exploding());
        assert_eq!(state.eliminated.len(), n - 1);
    }

    #[test]
    fn test_falling_squares_leave_ball_immediately() {
        let mut state = state();
        separate_balls(&mut state);
        {
            let ball = &mut state.balls[0];
            ball.damage = ball.health - 1;
            let mut rng = state.rng.clone();
            ball.take_damage(&mut rng);
        }
        tick(&mut state, &mut ());
        assert!(
            !state.balls[0].particles.iter().any(|p| p.is_falling_square()),
            "falling squares must move to the arena debris list"
        );
        assert_eq!(state.debris.len(), 15);
    }

    #[test]
    fn test_debris_never_shrinks() {
        let mut state = state();
        separate_balls(&mut state);
        {
            let ball = &mut state.balls[0];
            ball.damage = ball.health - 1;
            let mut rng = state.rng.clone();
            ball.take_damage(&mut rng);
        }
        let mut last = 0;
        for _ in 0..300 {
            tick(&mut state, &mut ());
            assert!(state.debris.len() >= last);
            last = state.debris.len();
        }
        assert!(last >= 15);
    }

    #[test]
    fn test_two_ball_endgame_resolves_to_single_winner() {
        let mut state = state();
        separate_balls(&mut state);
        // Leave two critically damaged balls on a head-on course
        state.balls.truncate(2);
        for ball in &mut state.balls {
            ball.damage = ball.health - 1;
        }
        state.balls[0].pos = Vec2::new(300.0, 360.0);
        state.balls[0].vel = Vec2::new(BALL_SPEED, 0.0);
        state.balls[1].pos = Vec2::new(360.0, 360.0);
        state.balls[1].vel = Vec2::new(-BALL_SPEED, 0.0);

        for _ in 0..600 {
            tick(&mut state, &mut ());
        }
        assert!(
            state.winner().is_some(),
            "sudden death must leave exactly one survivor"
        );
    }
}
