//! Per-frame simulation step
//!
//! Stages run in a fixed order: sample sticks, move paddles, move the ball,
//! resolve paddle hits, check for a score.

use rand::Rng;

use super::collision::resolve_paddle_hit;
use super::input::{FrameInput, InputSample};
use super::state::{Ball, GameEvent, MatchState, Side};
use crate::config::MatchConfig;

/// Side whose end the ball has left by more than the scoring padding
pub fn check_for_score(ball: &Ball, config: &MatchConfig) -> Option<Side> {
    let line = config.score_line();
    if ball.pos.x < -line {
        Some(Side::Left)
    } else if ball.pos.x > line {
        Some(Side::Right)
    } else {
        None
    }
}

/// Advance the match by one frame and return what happened, in order.
///
/// `dt` is in seconds. Negative or non-finite deltas are treated as zero.
pub fn tick<R: Rng>(state: &mut MatchState<R>, input: &FrameInput, dt: f32) -> Vec<GameEvent> {
    let dt = if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        log::warn!("Ignoring invalid frame delta {dt}");
        0.0
    };

    let mut events = Vec::new();
    state.frame += 1;

    let config = &state.config;

    // Input
    state.left_input = InputSample::sample(input.left, config.deadzone);
    state.right_input = InputSample::sample(input.right, config.deadzone);

    // Paddles
    state
        .left
        .integrate(&state.left_input, config.paddle_speed, config.table.depth, dt);
    state
        .right
        .integrate(&state.right_input, config.paddle_speed, config.table.depth, dt);

    // Ball
    if state.ball.integrate(dt, config.table.half_depth()) {
        log::debug!("Wall bounce at depth {:.3}", state.ball.pos.z);
        events.push(GameEvent::WallBounce);
    }

    // Paddle hits
    if let Some(hit) = resolve_paddle_hit(&mut state.ball, &state.left, &state.right, config) {
        events.push(hit);
    }

    // Scoring
    if let Some(side) = check_for_score(&state.ball, config) {
        log::debug!("Ball out past the {side:?} end at x = {:.3}", state.ball.pos.x);
        events.push(GameEvent::Score { side });
        events.push(state.init_match());
    }

    events
}
