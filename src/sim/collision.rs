//! Ball-to-ball collision response and shared reflection math.

use glam::Vec2;
use rand::Rng;

use crate::consts::BALL_SPEED;
use crate::sim::ball::Ball;

/// Standard reflection about a unit surface normal: v' = v - 2(v·n)n
#[inline]
pub fn reflect(vel: Vec2, normal: Vec2) -> Vec2 {
    vel - 2.0 * vel.dot(normal) * normal
}

/// Rescale a velocity to `speed`. Exact-zero velocities are left untouched
/// rather than divided by their own length.
#[inline]
pub fn renormalize(vel: Vec2, speed: f32) -> Vec2 {
    match vel.try_normalize() {
        Some(dir) => dir * speed,
        None => vel,
    }
}

/// Elastic equal-mass collision between two balls, plus the damage policy.
///
/// The velocities are decomposed along the center-to-center normal; the
/// normal components swap between the balls while the tangential components
/// pass through, then both speeds are renormalized. Overlap is resolved by
/// separating the pair symmetrically along the normal.
///
/// `active_count` is the number of non-exploding balls in the arena when
/// this pair is resolved; it selects between normal damage and the two-ball
/// sudden-death rule. Returns whether the pair actually collided.
pub fn resolve_ball_pair(
    a: &mut Ball,
    b: &mut Ball,
    active_count: usize,
    rng: &mut impl Rng,
) -> bool {
    if a.is_exploding() || b.is_exploding() {
        return false;
    }
    let delta = b.pos - a.pos;
    let distance = delta.length();
    if distance > a.radius + b.radius {
        return false;
    }

    // Coincident centers leave no collision axis; pick a fixed one
    let normal = if distance > 0.0 { delta / distance } else { Vec2::X };

    let overlap = (a.radius + b.radius - distance) / 2.0;
    a.pos -= normal * overlap;
    b.pos += normal * overlap;

    let tangent = normal.perp();
    let a_tan = a.vel.dot(tangent);
    let b_tan = b.vel.dot(tangent);
    let a_norm = a.vel.dot(normal);
    let b_norm = b.vel.dot(normal);
    a.vel = renormalize(tangent * a_tan + normal * b_norm, BALL_SPEED);
    b.vel = renormalize(tangent * b_tan + normal * a_norm, BALL_SPEED);

    apply_damage_policy(a, b, active_count, rng);

    a.spawn_bounce_sparks(rng);
    b.spawn_bounce_sparks(rng);
    true
}

/// Damage for a colliding pair.
///
/// With more than two balls in play, both take a normal hit. With exactly
/// two, a pair that is both at critical health goes to sudden death: a coin
/// flip picks the loser, which takes a double hit so its explosion is
/// guaranteed - never a simultaneous double elimination.
fn apply_damage_policy(a: &mut Ball, b: &mut Ball, active_count: usize, rng: &mut impl Rng) {
    if active_count > 2 {
        a.take_damage(rng);
        b.take_damage(rng);
    } else if active_count == 2 {
        let a_critical = a.remaining_health() <= a.damage_per_hit;
        let b_critical = b.remaining_health() <= b.damage_per_hit;
        if a_critical && b_critical {
            let doomed = if rng.random_bool(0.5) { a } else { b };
            doomed.take_damage(rng);
            doomed.take_damage(rng);
        } else {
            a.take_damage(rng);
            b.take_damage(rng);
        }
    }
}
