//! Scripted and seeded collaborators
//!
//! `ScriptedMotion` / `ScriptedInput` replay fixed per-step sequences for tests.
//! `DemoRider` / `DemoInput` produce a deterministic ride from a seed.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{InputProvider, MotionProvider};
use crate::sim::{Controls, MotionSample};

/// Replays one motion sample per step, holding the last one when the script runs out
#[derive(Debug, Clone, Default)]
pub struct ScriptedMotion {
    current: MotionSample,
    queue: VecDeque<MotionSample>,
}

impl ScriptedMotion {
    pub fn new(samples: impl IntoIterator<Item = MotionSample>) -> Self {
        let mut queue: VecDeque<MotionSample> = samples.into_iter().collect();
        let current = queue.pop_front().unwrap_or_default();
        Self { current, queue }
    }

    pub fn push(&mut self, sample: MotionSample) {
        self.queue.push_back(sample);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl MotionProvider for ScriptedMotion {
    fn is_grounded(&self) -> bool {
        self.current.grounded
    }

    fn position(&self) -> Vec2 {
        self.current.position
    }

    fn rotation_degrees(&self) -> f32 {
        self.current.rotation_degrees
    }

    fn horizontal_velocity(&self) -> f32 {
        self.current.horizontal_velocity
    }

    fn drive(&mut self, _speed: f32, _dt: f32) {
        if let Some(next) = self.queue.pop_front() {
            self.current = next;
        }
    }
}

/// Replays one set of controls per step; idle once the script runs out
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    current: Controls,
    queue: VecDeque<Controls>,
}

impl ScriptedInput {
    pub fn new(steps: impl IntoIterator<Item = Controls>) -> Self {
        let mut queue: VecDeque<Controls> = steps.into_iter().collect();
        let current = queue.pop_front().unwrap_or_default();
        Self { current, queue }
    }

    pub fn push(&mut self, controls: Controls) {
        self.queue.push_back(controls);
    }
}

impl InputProvider for ScriptedInput {
    fn invincibility_pressed(&mut self) -> bool {
        std::mem::take(&mut self.current.invincibility)
    }

    fn super_boost_pressed(&mut self) -> bool {
        std::mem::take(&mut self.current.super_boost)
    }

    fn mega_boost_pressed(&mut self) -> bool {
        std::mem::take(&mut self.current.mega_boost)
    }

    fn manual_trick_pressed(&mut self) -> bool {
        std::mem::take(&mut self.current.manual_trick)
    }

    fn boost_held(&self) -> bool {
        self.current.boost_held
    }

    fn end_step(&mut self) {
        self.current = self.queue.pop_front().unwrap_or_default();
    }
}

/// Demo rider tuning
pub mod demo {
    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 20.0;
    /// How quickly horizontal velocity follows the requested speed (1/s)
    pub const TRACTION: f32 = 4.0;
    /// Seconds on the ground between jumps
    pub const GROUND_TIME: (f32, f32) = (0.4, 2.0);
    /// Launch velocity range
    pub const LAUNCH_SPEED: (f32, f32) = (3.0, 14.0);
    /// Spin rate range (degrees/s)
    pub const SPIN_RATE: (f32, f32) = (120.0, 600.0);
}

/// A seeded rider on flat ground that jumps and spins at random
#[derive(Debug, Clone)]
pub struct DemoRider {
    rng: Pcg32,
    position: Vec2,
    velocity: Vec2,
    rotation: f32,
    spin_rate: f32,
    grounded: bool,
    ground_timer: f32,
}

impl DemoRider {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ground_timer = rng.random_range(demo::GROUND_TIME.0..demo::GROUND_TIME.1);
        Self {
            rng,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            spin_rate: 0.0,
            grounded: true,
            ground_timer,
        }
    }

    fn launch(&mut self) {
        self.velocity.y = self
            .rng
            .random_range(demo::LAUNCH_SPEED.0..demo::LAUNCH_SPEED.1);
        // A third of the jumps are flat
        self.spin_rate = if self.rng.random_bool(1.0 / 3.0) {
            0.0
        } else {
            let rate = self.rng.random_range(demo::SPIN_RATE.0..demo::SPIN_RATE.1);
            if self.rng.random_bool(0.5) { rate } else { -rate }
        };
        self.grounded = false;
        log::debug!(
            "Demo rider jump: vy={:.1}, spin={:.0}°/s",
            self.velocity.y,
            self.spin_rate
        );
    }

    fn touch_down(&mut self) {
        self.position.y = 0.0;
        self.velocity.y = 0.0;
        self.rotation = 0.0;
        self.spin_rate = 0.0;
        self.grounded = true;
        self.ground_timer = self
            .rng
            .random_range(demo::GROUND_TIME.0..demo::GROUND_TIME.1);
    }
}

impl MotionProvider for DemoRider {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn rotation_degrees(&self) -> f32 {
        self.rotation
    }

    fn horizontal_velocity(&self) -> f32 {
        self.velocity.x
    }

    fn drive(&mut self, speed: f32, dt: f32) {
        let blend = (demo::TRACTION * dt).min(1.0);
        self.velocity.x += (speed - self.velocity.x) * blend;

        if self.grounded {
            self.ground_timer -= dt;
            if self.ground_timer <= 0.0 {
                self.launch();
            }
        } else {
            self.velocity.y -= demo::GRAVITY * dt;
            self.rotation += self.spin_rate * dt;
        }

        self.position += self.velocity * dt;

        if !self.grounded && self.position.y <= 0.0 && self.velocity.y < 0.0 {
            self.touch_down();
        }
    }
}

/// Seeded button masher: occasional power-ups and tricks, boost held in bursts
#[derive(Debug, Clone)]
pub struct DemoInput {
    rng: Pcg32,
    /// Chance per step of each activation edge
    press_chance: f64,
    boost_timer: f32,
    boost_held: bool,
}

impl DemoInput {
    pub fn new(seed: u64) -> Self {
        Self {
            // Separate stream from the rider
            rng: Pcg32::seed_from_u64(seed ^ 0x5eed_cafe),
            press_chance: 0.002,
            boost_timer: 0.0,
            boost_held: false,
        }
    }

    pub fn with_press_chance(mut self, chance: f64) -> Self {
        self.press_chance = chance.clamp(0.0, 1.0);
        self
    }

    fn roll(&mut self) -> bool {
        self.rng.random_bool(self.press_chance)
    }
}

impl InputProvider for DemoInput {
    fn invincibility_pressed(&mut self) -> bool {
        self.roll()
    }

    fn super_boost_pressed(&mut self) -> bool {
        self.roll()
    }

    fn mega_boost_pressed(&mut self) -> bool {
        self.roll()
    }

    fn manual_trick_pressed(&mut self) -> bool {
        // Mashed far more often than power-ups; grounded presses are rejected anyway
        self.rng.random_bool((self.press_chance * 10.0).min(1.0))
    }

    fn boost_held(&self) -> bool {
        self.boost_held
    }

    fn end_step(&mut self) {
        self.boost_timer -= crate::consts::SIM_DT;
        if self.boost_timer <= 0.0 {
            self.boost_held = !self.boost_held;
            self.boost_timer = self.rng.random_range(0.5..3.0);
        }
    }
}
