//! Aerial trick detection
//!
//! Tracks the rider between takeoff and landing and grades the jump when the
//! rider touches down again. Rotation is accumulated as unsigned shortest-arc
//! deltas, so a 350° -> 10° reading counts as 20°, and spinning back and forth
//! adds up in both directions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::angular_distance;
use crate::consts::{DOUBLE_SPIN_DEGREES, FULL_SPIN_DEGREES, HALF_SPIN_DEGREES};
use crate::settings::Settings;

/// Trick grades, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrickKind {
    DoubleSpin,
    FullSpin,
    HalfSpin,
    BigAir,
    LongJump,
}

impl TrickKind {
    pub fn name(&self) -> &'static str {
        match self {
            TrickKind::DoubleSpin => "Double Spin",
            TrickKind::FullSpin => "Full Spin",
            TrickKind::HalfSpin => "Half Spin",
            TrickKind::BigAir => "Big Air",
            TrickKind::LongJump => "Long Jump",
        }
    }

    /// Multiple of the base trick score this grade is worth
    pub fn score_factor(&self) -> f32 {
        match self {
            TrickKind::DoubleSpin => 3.0,
            TrickKind::FullSpin => 2.0,
            TrickKind::HalfSpin | TrickKind::BigAir => 1.0,
            TrickKind::LongJump => 0.8,
        }
    }

    /// Unscaled points for this grade
    pub fn base_points(&self, trick_score: u32) -> f32 {
        trick_score as f32 * self.score_factor()
    }
}

/// Ground contact state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Contact {
    #[default]
    Grounded,
    Airborne,
}

/// Measurements for the current (or just finished) jump
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrickAccumulator {
    /// Seconds spent airborne
    pub air_time: f32,
    /// Cumulative unsigned rotation in degrees
    pub total_rotation: f32,
    /// Peak height above the takeoff point
    pub max_height: f32,
}

/// Grade a finished jump. `None` means no trick (too short or unremarkable).
pub fn classify(jump: &TrickAccumulator, settings: &Settings) -> Option<TrickKind> {
    if jump.air_time < settings.min_air_time {
        return None;
    }

    // Rotation tricks dominate height/duration tricks
    if jump.total_rotation >= DOUBLE_SPIN_DEGREES {
        Some(TrickKind::DoubleSpin)
    } else if jump.total_rotation >= FULL_SPIN_DEGREES {
        Some(TrickKind::FullSpin)
    } else if jump.total_rotation >= HALF_SPIN_DEGREES {
        Some(TrickKind::HalfSpin)
    } else if jump.max_height > settings.big_air_height {
        Some(TrickKind::BigAir)
    } else if jump.air_time > settings.long_jump_time {
        Some(TrickKind::LongJump)
    } else {
        None
    }
}

/// Grounded/airborne state machine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrickDetector {
    contact: Contact,
    jump: TrickAccumulator,
    takeoff: Vec2,
    last_grounded_position: Option<Vec2>,
    last_rotation: Option<f32>,
}

impl TrickDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contact(&self) -> Contact {
        self.contact
    }

    pub fn is_airborne(&self) -> bool {
        self.contact == Contact::Airborne
    }

    /// Measurements of the jump in progress
    pub fn current(&self) -> &TrickAccumulator {
        &self.jump
    }

    /// Feed one physics sample. Returns the finished jump on the landing step.
    pub fn update(
        &mut self,
        grounded: bool,
        position: Vec2,
        rotation_degrees: f32,
        dt: f32,
    ) -> Option<TrickAccumulator> {
        let previous_rotation = self.last_rotation.unwrap_or(rotation_degrees);
        self.last_rotation = Some(rotation_degrees);

        match (self.contact, grounded) {
            (Contact::Grounded, true) => {
                self.last_grounded_position = Some(position);
                None
            }
            (Contact::Grounded, false) => {
                self.contact = Contact::Airborne;
                self.takeoff = self.last_grounded_position.unwrap_or(position);
                self.jump = TrickAccumulator::default();
                log::debug!("Takeoff at ({:.1}, {:.1})", self.takeoff.x, self.takeoff.y);
                self.accumulate(position, previous_rotation, rotation_degrees, dt);
                None
            }
            (Contact::Airborne, false) => {
                self.accumulate(position, previous_rotation, rotation_degrees, dt);
                None
            }
            (Contact::Airborne, true) => {
                let finished = self.jump;
                self.contact = Contact::Grounded;
                self.jump = TrickAccumulator::default();
                self.last_grounded_position = Some(position);
                log::debug!(
                    "Landed: air {:.2}s, rotation {:.0}°, height {:.2}",
                    finished.air_time,
                    finished.total_rotation,
                    finished.max_height
                );
                Some(finished)
            }
        }
    }

    fn accumulate(&mut self, position: Vec2, previous_rotation: f32, rotation: f32, dt: f32) {
        self.jump.air_time += dt.max(0.0);
        self.jump.total_rotation += angular_distance(previous_rotation, rotation);
        let height = position.y - self.takeoff.y;
        if height > self.jump.max_height {
            self.jump.max_height = height;
        }
    }

    /// Forget the jump in progress (session restart)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
