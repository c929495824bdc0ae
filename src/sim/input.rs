//! Analog stick sampling
//!
//! One independent sample per paddle per frame. Axis values are expected to
//! be pre-clamped to [-1, 1] by the input source.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Raw stick vectors for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    pub left: Vec2,
    pub right: Vec2,
}

impl FrameInput {
    pub fn new(left: Vec2, right: Vec2) -> Self {
        Self { left, right }
    }
}

/// A deadzone-filtered stick reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputSample {
    /// Stick vector as read
    pub raw: Vec2,
    /// Length of `raw`, kept even inside the deadzone (drives feel/audio)
    pub magnitude: f32,
    /// `raw`, or zero when `magnitude` is below the deadzone
    pub direction: Vec2,
}

impl InputSample {
    pub const ZERO: Self = Self {
        raw: Vec2::ZERO,
        magnitude: 0.0,
        direction: Vec2::ZERO,
    };

    pub fn sample(raw: Vec2, deadzone: f32) -> Self {
        let magnitude = raw.length();
        let direction = if magnitude < deadzone { Vec2::ZERO } else { raw };
        Self {
            raw,
            magnitude,
            direction,
        }
    }

    /// Depth-axis drive: direction.y scaled by magnitude
    #[inline]
    pub fn depth_drive(&self) -> f32 {
        self.direction.y * self.magnitude
    }
}

impl Default for InputSample {
    fn default() -> Self {
        Self::ZERO
    }
}
