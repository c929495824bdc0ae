//! Ball/paddle collision detection and response
//!
//! Paddles are axis-aligned boxes on the table plane. A return angle is
//! picked from where on the paddle the ball landed: dead center sends it
//! straight back, the very edge deflects it by the max reflection angle.

use glam::Vec3;

use super::state::{Ball, GameEvent, Paddle, Side};
use crate::config::MatchConfig;

/// The paddle the ball is heading toward (negative X means left).
///
/// This is the only paddle checked each frame, whether or not the ball has
/// reached it yet.
#[inline]
pub fn target_side(vel: Vec3) -> Side {
    if vel.x < 0.0 { Side::Left } else { Side::Right }
}

/// Strictly inside the paddle's half width along X, inclusive along depth
pub fn overlaps(ball: &Ball, paddle: &Paddle) -> bool {
    let within_x = (ball.pos.x - paddle.pos.x).abs() < paddle.half_width();
    let min_z = paddle.pos.z - paddle.half_depth();
    let max_z = paddle.pos.z + paddle.half_depth();
    within_x && ball.pos.z >= min_z && ball.pos.z <= max_z
}

/// Return angle in radians for a hit `distance_from_center` along depth.
///
/// Linear in the offset: ±`half_depth` maps to ±`max_angle_deg`.
/// Requires `half_depth > 0`.
#[inline]
pub fn reflection_angle(distance_from_center: f32, half_depth: f32, max_angle_deg: f32) -> f32 {
    (max_angle_deg * (distance_from_center / half_depth)).to_radians()
}

/// Velocity after a paddle return (before any boost).
///
/// X is flipped, depth is set from the angle, then the whole vector is
/// rescaled to `ball_speed`. The rescale runs after the depth write, so the
/// outgoing X is whatever normalization leaves, not `cos(angle) * ball_speed`.
pub fn reflect(vel: Vec3, angle: f32, ball_speed: f32) -> Vec3 {
    let mut out = vel;
    out.x = -out.x;
    out.z = angle.sin() * ball_speed;
    out.normalize_or_zero() * ball_speed
}

/// Check the targeted paddle and, on overlap, send the ball back.
///
/// Also snaps the ball to the paddle's face on the side it is currently on,
/// so the same contact is not picked up again.
pub fn resolve_paddle_hit(
    ball: &mut Ball,
    left: &Paddle,
    right: &Paddle,
    config: &MatchConfig,
) -> Option<GameEvent> {
    let paddle = match target_side(ball.vel) {
        Side::Left => left,
        Side::Right => right,
    };

    if !overlaps(ball, paddle) {
        return None;
    }

    let distance_from_center = ball.pos.z - paddle.pos.z;
    let angle = reflection_angle(
        distance_from_center,
        paddle.half_depth(),
        config.max_reflection_angle_deg,
    );
    ball.vel = reflect(ball.vel, angle, config.ball_speed);

    let boosted = paddle.movement > config.boost_threshold;
    if boosted {
        ball.vel *= config.boost_multiplier;
    }

    ball.pos.x = if ball.pos.x < paddle.pos.x {
        paddle.pos.x - paddle.half_width()
    } else {
        paddle.pos.x + paddle.half_width()
    };

    log::debug!(
        "{:?} paddle hit: offset {:.3}, angle {:.1} deg{}",
        paddle.side,
        distance_from_center,
        angle.to_degrees(),
        if boosted { ", boosted" } else { "" }
    );

    Some(GameEvent::PaddleHit {
        side: paddle.side,
        boosted,
    })
}
