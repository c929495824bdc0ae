//! Match configuration
//!
//! Immutable for a session. Loaded from JSON (missing fields fall back to
//! defaults) and validated once at setup, so the per-frame code never has to
//! guard against degenerate geometry.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while building a `MatchConfig`
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Value rejected by validation
    #[error("Invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: &'static str) -> Self {
        ConfigError::Invalid { field, reason }
    }
}

/// Table dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    /// Extent along X
    pub width: f32,
    /// Extent along Z
    pub depth: f32,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            width: TABLE_WIDTH,
            depth: TABLE_DEPTH,
        }
    }
}

impl Table {
    pub fn new(width: f32, depth: f32) -> Self {
        Self { width, depth }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    #[inline]
    pub fn half_depth(&self) -> f32 {
        self.depth / 2.0
    }
}

/// Match configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub table: Table,

    // === Speeds ===
    /// Ball speed (units/s) after every serve and paddle hit
    pub ball_speed: f32,
    /// Paddle speed (units/s) at full stick deflection
    pub paddle_speed: f32,

    // === Paddles ===
    /// Paddle extent: x = width, y = depth
    pub paddle_size: Vec2,
    /// Distance from each table end to the paddle center
    pub paddle_inset: f32,

    // === Angles (degrees) ===
    pub max_reflection_angle_deg: f32,
    pub serve_max_angle_deg: f32,

    // === Input / scoring ===
    pub deadzone: f32,
    pub score_padding: f32,

    // === Power hit ===
    pub boost_threshold: f32,
    pub boost_multiplier: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            table: Table::default(),

            ball_speed: BALL_SPEED,
            paddle_speed: PADDLE_SPEED,

            paddle_size: Vec2::new(PADDLE_WIDTH, PADDLE_DEPTH),
            paddle_inset: PADDLE_INSET,

            max_reflection_angle_deg: MAX_REFLECTION_ANGLE_DEG,
            serve_max_angle_deg: SERVE_MAX_ANGLE_DEG,

            deadzone: INPUT_DEADZONE,
            score_padding: SCORE_PADDING,

            boost_threshold: BOOST_THRESHOLD,
            boost_multiplier: BOOST_MULTIPLIER,
        }
    }
}

impl MatchConfig {
    /// Default configuration on a custom table
    pub fn with_table(width: f32, depth: f32) -> Self {
        Self {
            table: Table::new(width, depth),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded match config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations the simulation cannot run on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("table.width", self.table.width),
            ("table.depth", self.table.depth),
            ("ball_speed", self.ball_speed),
            ("paddle_speed", self.paddle_speed),
            ("paddle_size.x", self.paddle_size.x),
            ("paddle_size.y", self.paddle_size.y),
            ("paddle_inset", self.paddle_inset),
            ("max_reflection_angle_deg", self.max_reflection_angle_deg),
            ("serve_max_angle_deg", self.serve_max_angle_deg),
            ("deadzone", self.deadzone),
            ("score_padding", self.score_padding),
            ("boost_threshold", self.boost_threshold),
            ("boost_multiplier", self.boost_multiplier),
        ];
        if let Some((field, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::invalid(*field, "must be finite"));
        }

        if self.table.width <= 0.0 {
            return Err(ConfigError::invalid("table.width", "must be positive"));
        }
        if self.table.depth <= 0.0 {
            return Err(ConfigError::invalid("table.depth", "must be positive"));
        }
        if self.paddle_size.x <= 0.0 {
            return Err(ConfigError::invalid("paddle_size.x", "must be positive"));
        }
        // Reflection angle divides by the paddle half depth
        if self.paddle_size.y <= 0.0 {
            return Err(ConfigError::invalid("paddle_size.y", "must be positive"));
        }
        if self.paddle_size.y >= self.table.depth {
            return Err(ConfigError::invalid(
                "paddle_size.y",
                "must be smaller than table.depth",
            ));
        }
        if self.ball_speed < 0.0 {
            return Err(ConfigError::invalid("ball_speed", "must not be negative"));
        }
        if self.paddle_speed < 0.0 {
            return Err(ConfigError::invalid("paddle_speed", "must not be negative"));
        }
        if !(0.0..1.0).contains(&self.deadzone) {
            return Err(ConfigError::invalid("deadzone", "must be in [0, 1)"));
        }
        if self.score_padding < 0.0 {
            return Err(ConfigError::invalid("score_padding", "must not be negative"));
        }
        if self.boost_multiplier <= 0.0 {
            return Err(ConfigError::invalid("boost_multiplier", "must be positive"));
        }
        if !(0.0..90.0).contains(&self.serve_max_angle_deg) {
            return Err(ConfigError::invalid(
                "serve_max_angle_deg",
                "must be in [0, 90)",
            ));
        }
        Ok(())
    }

    /// X coordinate of a paddle center
    pub fn paddle_x(&self, side: crate::sim::Side) -> f32 {
        side.sign() * (self.table.half_width() - self.paddle_inset)
    }

    /// Ball X beyond which a point is scored
    pub fn score_line(&self) -> f32 {
        self.table.half_width() + self.score_padding
    }
}
