//! Pong Sim - deterministic core of a two-paddle 3D table Pong
//!
//! Core modules:
//! - `sim`: Per-frame simulation (input, paddles, ball, collisions, serves)
//! - `config`: Match configuration, JSON loading and validation
//! - `autopilot`: Stick input that steers a paddle toward the ball (demo mode)
//!
//! Rendering, audio and camera effects live in the host. The core only
//! consumes stick vectors plus a frame delta and reports `GameEvent`s.

pub mod autopilot;
pub mod config;
pub mod sim;

pub use config::{ConfigError, MatchConfig, Table};

use glam::Vec3;

/// Default tuning constants
pub mod consts {
    /// Table extent along X (paddle to paddle)
    pub const TABLE_WIDTH: f32 = 20.0;
    /// Table extent along Z (wall to wall)
    pub const TABLE_DEPTH: f32 = 10.0;

    /// Ball speed in units/s
    pub const BALL_SPEED: f32 = 5.0;
    /// Paddle speed in units/s at full stick deflection
    pub const PADDLE_SPEED: f32 = 10.0;
    /// Paddle extent along X
    pub const PADDLE_WIDTH: f32 = 0.5;
    /// Paddle extent along Z
    pub const PADDLE_DEPTH: f32 = 2.0;
    /// Distance from the table end to the paddle center
    pub const PADDLE_INSET: f32 = 1.0;

    /// Deflection for a hit on the very edge of a paddle (degrees)
    pub const MAX_REFLECTION_ANGLE_DEG: f32 = 75.0;
    /// Serve angle is drawn from [-this, +this] (degrees)
    pub const SERVE_MAX_ANGLE_DEG: f32 = 45.0;

    /// Stick magnitude below which direction is ignored
    pub const INPUT_DEADZONE: f32 = 0.04;
    /// How far past the table end the ball may travel before a point is scored
    pub const SCORE_PADDING: f32 = 2.0;

    /// Per-frame paddle movement that turns a return into a power hit
    pub const BOOST_THRESHOLD: f32 = 0.07;
    /// Ball velocity multiplier for a power hit
    pub const BOOST_MULTIPLIER: f32 = 2.0;

    /// Per-frame movement above which a paddle counts as moving (feedback hooks)
    pub const PADDLE_MOVING_EPSILON: f32 = 0.001;
}

/// Lift a (x, depth) pair onto the table plane (Y = 0)
#[inline]
pub fn on_table(x: f32, z: f32) -> Vec3 {
    Vec3::new(x, 0.0, z)
}
