//! Slope Rush - scoring and trick-combo engine for a side-scrolling sled game
//!
//! Core modules:
//! - `sim`: Frame-synchronous scoring simulation (tricks, combos, milestones, power-ups)
//! - `platform`: Collaborator traits for motion/input plus scripted providers
//! - `engine`: Host-facing engine that owns the state and its injected collaborators
//! - `settings`: Data-driven game balance
//! - `error`: Configuration errors

pub mod engine;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use engine::RideEngine;
pub use error::{EngineError, EngineResult};
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Combo multiplier gained per combo step
    pub const COMBO_STEP: f32 = 0.5;

    /// Rotation thresholds (degrees) for the spin tricks
    pub const HALF_SPIN_DEGREES: f32 = 180.0;
    pub const FULL_SPIN_DEGREES: f32 = 360.0;
    pub const DOUBLE_SPIN_DEGREES: f32 = 720.0;
}

/// Wrap a signed angle difference in degrees to (-180, 180]
#[inline]
pub fn wrap_degrees(mut delta: f32) -> f32 {
    delta %= 360.0;
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta <= -180.0 {
        delta += 360.0;
    }
    delta
}

/// Shortest-arc angular distance between two headings, in degrees
#[inline]
pub fn angular_distance(from: f32, to: f32) -> f32 {
    wrap_degrees(to - from).abs()
}
