//! Platform abstraction layer
//!
//! The engine never owns physics or input devices. Hosts hand it:
//! - A motion provider (ground contact, position, rotation, velocity)
//! - An input provider (key-down edges and the held boost key)

pub mod scripted;

use glam::Vec2;

use crate::sim::{Controls, MotionSample};

pub use scripted::{DemoInput, DemoRider, ScriptedInput, ScriptedMotion};

/// Physics collaborator, read once per step
pub trait MotionProvider {
    fn is_grounded(&self) -> bool;
    fn position(&self) -> Vec2;
    /// Body rotation in degrees
    fn rotation_degrees(&self) -> f32;
    fn horizontal_velocity(&self) -> f32;

    /// Move the rider forward at the engine's effective speed.
    /// Providers backed by a real physics body can ignore this.
    fn drive(&mut self, _speed: f32, _dt: f32) {}

    fn sample(&self) -> MotionSample {
        MotionSample {
            grounded: self.is_grounded(),
            position: self.position(),
            rotation_degrees: self.rotation_degrees(),
            horizontal_velocity: self.horizontal_velocity(),
        }
    }
}

/// Input collaborator. `*_pressed` are rising edges and are consumed by the call.
pub trait InputProvider {
    fn invincibility_pressed(&mut self) -> bool;
    fn super_boost_pressed(&mut self) -> bool;
    fn mega_boost_pressed(&mut self) -> bool;
    fn manual_trick_pressed(&mut self) -> bool;
    fn boost_held(&self) -> bool;

    /// Called once per step after the edges are read
    fn end_step(&mut self) {}

    fn controls(&mut self) -> Controls {
        let controls = Controls {
            invincibility: self.invincibility_pressed(),
            super_boost: self.super_boost_pressed(),
            mega_boost: self.mega_boost_pressed(),
            manual_trick: self.manual_trick_pressed(),
            boost_held: self.boost_held(),
        };
        self.end_step();
        controls
    }
}
