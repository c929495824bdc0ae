//! Demo-mode paddle driver
//!
//! Produces a raw stick vector that pulls a paddle toward where the ball is
//! heading. An oscillating aim offset keeps returns off dead center so
//! rallies don't settle into a flat loop.

use glam::Vec2;

use crate::config::MatchConfig;
use crate::sim::{Ball, Paddle, target_side};

/// Stick deflection per unit of depth error
const GAIN: f32 = 2.5;
/// How far ahead (seconds) the ball's depth is predicted
const MAX_LOOKAHEAD: f32 = 1.5;
/// Aim offset amplitude as a fraction of the paddle half depth
const AIM_SPREAD: f32 = 0.6;

/// Stick vector for `paddle` on the given frame
pub fn steer(paddle: &Paddle, ball: &Ball, config: &MatchConfig, frame: u64) -> Vec2 {
    let half_depth = config.table.half_depth();

    let target = if target_side(ball.vel) == paddle.side && ball.vel.x != 0.0 {
        // Lead the ball (ignoring wall bounces)
        let time_to_reach = ((paddle.pos.x - ball.pos.x) / ball.vel.x).clamp(0.0, MAX_LOOKAHEAD);
        let predicted = ball.pos.z + ball.vel.z * time_to_reach;

        let t = frame as f32 * 0.01;
        let offset = (t.sin() * 0.7 + (t * 0.7).sin() * 0.3) * AIM_SPREAD * paddle.half_depth();

        (predicted - offset).clamp(-half_depth, half_depth)
    } else {
        // Drift back toward the middle while the ball is going away
        0.0
    };

    let error = target - paddle.pos.z;
    Vec2::new(0.0, (error * GAIN).clamp(-1.0, 1.0))
}
