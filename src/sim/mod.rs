//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Frame delta and stick vectors are the only inputs
//! - Seeded (or injected) RNG only
//! - Results are reported as `GameEvent`s, never pushed into presentation
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{overlaps, reflect, reflection_angle, resolve_paddle_hit, target_side};
pub use input::{FrameInput, InputSample};
pub use state::{Ball, FrameSnapshot, GameEvent, MatchState, Paddle, Side};
pub use tick::{check_for_score, tick};
