//! Simulation state and core types
//!
//! Everything the frame update mutates lives in `MatchState`. Presentation
//! (meshes, audio, the visual-style toggle) stays outside and only reads
//! `FrameSnapshot`s and `GameEvent`s.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::InputSample;
use crate::config::{ConfigError, MatchConfig};
use crate::consts::PADDLE_MOVING_EPSILON;
use crate::on_table;

/// Which end of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Discrete things that happened during a frame, in order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Ball bounced off one of the long walls
    WallBounce,
    /// Ball was returned by a paddle
    PaddleHit { side: Side, boosted: bool },
    /// Ball left the table through `side`'s end
    Score { side: Side },
    /// Ball was put back at the origin with a fresh velocity
    Serve { velocity: Vec3 },
}

/// A paddle, moving only along the depth axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Center; X is fixed, Y is always 0
    pub pos: Vec3,
    /// x = width, y = depth extent
    pub size: Vec2,
    /// Distance moved during the last frame (never negative)
    pub movement: f32,
}

impl Paddle {
    pub fn new(side: Side, x: f32, size: Vec2) -> Self {
        Self {
            side,
            pos: on_table(x, 0.0),
            size,
            movement: 0.0,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.size.x / 2.0
    }

    #[inline]
    pub fn half_depth(&self) -> f32 {
        self.size.y / 2.0
    }

    #[inline]
    pub fn depth(&self) -> f32 {
        self.pos.z
    }

    /// Allowed center depths on a table of the given depth.
    ///
    /// Precondition: `size.y < table_depth` (enforced by `MatchConfig::validate`).
    pub fn depth_range(&self, table_depth: f32) -> (f32, f32) {
        (
            (-table_depth + self.size.y) / 2.0,
            (table_depth - self.size.y) / 2.0,
        )
    }

    /// Move from stick input, clamp to the table, and return the distance moved
    pub fn integrate(
        &mut self,
        input: &InputSample,
        paddle_speed: f32,
        table_depth: f32,
        dt: f32,
    ) -> f32 {
        let old = self.pos;
        let (min, max) = self.depth_range(table_depth);
        let z = self.pos.z + input.direction.y * paddle_speed * input.magnitude * dt;
        self.pos.z = z.clamp(min, max);
        self.movement = (self.pos - old).length();
        self.movement
    }

    /// Whether the paddle moved noticeably last frame (audio/animation gate)
    pub fn is_moving(&self) -> bool {
        self.movement > PADDLE_MOVING_EPSILON
    }
}

/// The ball, a point mass on the table plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
    pub vel: Vec3,
}

impl Ball {
    /// Advance by `vel * dt`, then bounce off the long walls.
    ///
    /// Only the depth component is ever flipped here, and the position is
    /// left where it is; the next frame pulls the ball back in.
    /// Returns true when a bounce happened.
    pub fn integrate(&mut self, dt: f32, half_depth: f32) -> bool {
        self.pos += self.vel * dt;

        let past_far = self.pos.z > half_depth && self.vel.z > 0.0;
        let past_near = self.pos.z < -half_depth && self.vel.z < 0.0;
        if past_far || past_near {
            self.vel.z = -self.vel.z;
            return true;
        }
        false
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Read-only view of one frame for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub ball_pos: Vec3,
    pub ball_vel: Vec3,
    pub left_depth: f32,
    pub right_depth: f32,
    pub left_movement: f32,
    pub right_movement: f32,
    pub left_input_magnitude: f32,
    pub right_input_magnitude: f32,
}

/// Complete simulation state
///
/// Generic over the serve RNG so tests can inject any `rand::Rng`; the
/// default is a seeded `Pcg32`.
#[derive(Debug, Clone)]
pub struct MatchState<R = Pcg32> {
    pub(crate) config: MatchConfig,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    /// Last frame's filtered stick readings
    pub left_input: InputSample,
    pub right_input: InputSample,
    /// Frames simulated so far
    pub frame: u64,
    /// Serves performed so far (the opening serve included)
    pub serves: u32,
    rng: R,
}

impl MatchState<Pcg32> {
    /// Create a match with a seeded RNG
    pub fn new(config: MatchConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> MatchState<R> {
    /// Create a match with an injected RNG and perform the opening serve
    pub fn with_rng(config: MatchConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let left = Paddle::new(
            Side::Left,
            config.paddle_x(Side::Left),
            config.paddle_size,
        );
        let right = Paddle::new(
            Side::Right,
            config.paddle_x(Side::Right),
            config.paddle_size,
        );

        let mut state = Self {
            config,
            left,
            right,
            ball: Ball::default(),
            left_input: InputSample::ZERO,
            right_input: InputSample::ZERO,
            frame: 0,
            serves: 0,
            rng,
        };
        state.init_match();
        Ok(state)
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Reset the ball to the origin with a random serve.
    ///
    /// Angle is uniform in [-serve_max, +serve_max], direction is a fair coin.
    /// Nothing from the previous serve carries over.
    pub fn init_match(&mut self) -> GameEvent {
        let max = self.config.serve_max_angle_deg;
        let angle = self.rng.random_range(-max..=max).to_radians();
        let direction = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };

        self.ball.pos = Vec3::ZERO;
        self.ball.vel =
            on_table(angle.cos() * direction, angle.sin()) * self.config.ball_speed;
        self.serves += 1;

        log::info!(
            "Serve #{}: angle {:.1} deg, heading {}",
            self.serves,
            angle.to_degrees(),
            if direction > 0.0 { "right" } else { "left" }
        );

        GameEvent::Serve {
            velocity: self.ball.vel,
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            frame: self.frame,
            ball_pos: self.ball.pos,
            ball_vel: self.ball.vel,
            left_depth: self.left.depth(),
            right_depth: self.right.depth(),
            left_movement: self.left.movement,
            right_movement: self.right.movement,
            left_input_magnitude: self.left_input.magnitude,
            right_input_magnitude: self.right_input.magnitude,
        }
    }
}
