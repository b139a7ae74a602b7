//! Per-step simulation tick
//!
//! Advances the scoring state by one host step. Ordering within a step:
//! 1. timed effects expire
//! 2. queued collision notifications apply
//! 3. power-up activation edges
//! 4. movement speed is resolved
//! 5. trick detector consumes the ground sample (landing scores here)
//! 6. manual trick edge
//! 7. speed milestones
//! 8. combo decay, so a same-step trick refreshes the clock first

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Collision;
use super::powerups::PowerUpKind;
use super::state::RideState;

/// Physics reading for one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    pub grounded: bool,
    pub position: Vec2,
    /// Body rotation in degrees (any range, wrapped internally)
    pub rotation_degrees: f32,
    pub horizontal_velocity: f32,
}

impl Default for MotionSample {
    fn default() -> Self {
        Self {
            grounded: true,
            position: Vec2::ZERO,
            rotation_degrees: 0.0,
            horizontal_velocity: 0.0,
        }
    }
}

/// Control state for one step. Activation flags are rising edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub invincibility: bool,
    pub super_boost: bool,
    pub mega_boost: bool,
    pub manual_trick: bool,
    /// Held, not an edge
    pub boost_held: bool,
}

/// Everything the host pushes into a step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// `None` until the rider exists; the step is skipped without it
    pub motion: Option<MotionSample>,
    pub controls: Controls,
    pub collisions: Vec<Collision>,
}

/// Advance the ride state to `now` (seconds), `dt` seconds after the last step
pub fn tick(state: &mut RideState, input: &TickInput, now: f64, dt: f32) {
    let Some(motion) = input.motion else {
        log::debug!("No motion sample yet, skipping step");
        return;
    };

    state.time = now;
    state.time_ticks += 1;

    // Expiry first so this step's speed sees the post-expiry state
    state.powerups.tick(now, &mut state.events);
    state.modifier.tick(now, &mut state.events);
    state.crashes.tick(now);

    for collision in &input.collisions {
        state.handle_collision(*collision, now);
    }

    let controls = if state.input_enabled {
        input.controls
    } else {
        Controls::default()
    };

    let activations = [
        (controls.invincibility, PowerUpKind::Invincibility),
        (controls.super_boost, PowerUpKind::SuperBoost),
        (controls.mega_boost, PowerUpKind::MegaBoost),
    ];
    for (pressed, kind) in activations {
        if pressed {
            state.activate_powerup(kind, now);
        }
    }

    state.resolve_speed(controls.boost_held);

    if let Some(jump) = state.tricks.update(
        motion.grounded,
        motion.position,
        motion.rotation_degrees,
        dt,
    ) {
        state.land(&jump, now);
    }

    if controls.manual_trick {
        let name = state.settings.manual_trick_label.clone();
        state.perform_manual_trick(&name, now);
    }

    state.evaluate_milestones(motion.horizontal_velocity.abs());

    state.combo.tick(now, &mut state.events);
}
