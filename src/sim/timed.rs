//! Timed effects
//!
//! A flag that switches on for a fixed duration and switches itself off when the
//! host clock passes its expiry. There is no scheduler: expiry only happens inside
//! [`TimedEffect::tick`], which the simulation calls once per step.

use serde::{Deserialize, Serialize};

/// An effect that is active until an absolute expiry time
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimedEffect {
    active: bool,
    expires_at: Option<f64>,
}

impl TimedEffect {
    pub const fn new() -> Self {
        Self {
            active: false,
            expires_at: None,
        }
    }

    /// Start (or restart) the effect. The new window replaces any pending expiry.
    pub fn activate(&mut self, now: f64, duration: f32) {
        self.active = true;
        self.expires_at = Some(now + f64::from(duration.max(0.0)));
    }

    /// Expire the effect if its window has elapsed. Returns true on the step it turns off.
    pub fn tick(&mut self, now: f64) -> bool {
        match self.expires_at {
            Some(expires_at) if self.active && now >= expires_at => {
                self.active = false;
                self.expires_at = None;
                true
            }
            _ => false,
        }
    }

    /// Switch off immediately without waiting for expiry
    pub fn cancel(&mut self) {
        self.active = false;
        self.expires_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn expires_at(&self) -> Option<f64> {
        self.expires_at
    }

    /// Seconds left in the current window (0 when inactive)
    pub fn remaining(&self, now: f64) -> f64 {
        match self.expires_at {
            Some(expires_at) if self.active => (expires_at - now).max(0.0),
            _ => 0.0,
        }
    }
}
