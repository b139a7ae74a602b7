//! Host-facing ride engine
//!
//! Owns the scoring state, the clock, and the injected collaborators. Hosts
//! attach a motion provider and an input provider, forward collision
//! notifications as they happen, and call [`RideEngine::step`] once per
//! fixed step.

use crate::platform::{InputProvider, MotionProvider};
use crate::settings::Settings;
use crate::sim::{
    CollectibleKind, Collision, Controls, GameEvent, ObstacleKind, RideSnapshot, RideState,
    TickInput, tick,
};

pub struct RideEngine<M: MotionProvider, I: InputProvider> {
    state: RideState,
    motion: Option<M>,
    input: Option<I>,
    /// Seconds since the session started
    clock: f64,
    /// Collision notifications waiting for the next step
    pending: Vec<Collision>,
}

impl<M: MotionProvider, I: InputProvider> RideEngine<M, I> {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: RideState::new(settings),
            motion: None,
            input: None,
            clock: 0.0,
            pending: Vec::new(),
        }
    }

    pub fn with_collaborators(settings: Settings, motion: M, input: I) -> Self {
        let mut engine = Self::new(settings);
        engine.attach_motion(motion);
        engine.attach_input(input);
        engine
    }

    pub fn attach_motion(&mut self, motion: M) {
        self.motion = Some(motion);
    }

    pub fn attach_input(&mut self, input: I) {
        self.input = Some(input);
    }

    pub fn detach_motion(&mut self) -> Option<M> {
        self.motion.take()
    }

    pub fn motion(&self) -> Option<&M> {
        self.motion.as_ref()
    }

    pub fn motion_mut(&mut self) -> Option<&mut M> {
        self.motion.as_mut()
    }

    pub fn input_mut(&mut self) -> Option<&mut I> {
        self.input.as_mut()
    }

    pub fn state(&self) -> &RideState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn notify_crash(&mut self) {
        self.pending.push(Collision::Crash);
    }

    pub fn notify_obstacle(&mut self, kind: ObstacleKind) {
        self.pending.push(Collision::Obstacle(kind));
    }

    /// Obstacle by classification tag; unknown tags are logged and dropped
    pub fn notify_obstacle_tag(&mut self, tag: &str) -> bool {
        match ObstacleKind::from_tag(tag) {
            Some(kind) => {
                self.notify_obstacle(kind);
                true
            }
            None => {
                log::warn!("Unknown obstacle tag '{}'", tag);
                false
            }
        }
    }

    pub fn notify_collect(&mut self, kind: CollectibleKind) {
        self.pending.push(Collision::Collect(kind));
    }

    /// Advance one step of `dt` seconds.
    ///
    /// Without a motion provider the step is a no-op: the clock does not move
    /// and queued notifications wait. A missing input provider only means no
    /// controls are pressed.
    pub fn step(&mut self, dt: f32) {
        let Some(motion) = self.motion.as_ref() else {
            log::debug!("No motion provider attached, step skipped");
            return;
        };
        let sample = motion.sample();

        let controls = match self.input.as_mut() {
            Some(input) => input.controls(),
            None => Controls::default(),
        };

        self.clock += f64::from(dt);
        let input = TickInput {
            motion: Some(sample),
            controls,
            collisions: std::mem::take(&mut self.pending),
        };
        tick(&mut self.state, &input, self.clock, dt);

        let speed = self.state.effective_speed;
        if let Some(motion) = self.motion.as_mut() {
            motion.drive(speed, dt);
        }
    }

    /// Notifications produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn snapshot(&self) -> RideSnapshot {
        self.state.snapshot()
    }

    pub fn total_score(&self) -> u64 {
        self.state.total_score()
    }

    pub fn set_input_enabled(&mut self, enabled: bool) {
        if self.state.input_enabled != enabled {
            log::info!("Player input {}", if enabled { "enabled" } else { "disabled" });
        }
        self.state.input_enabled = enabled;
    }

    /// Start a fresh session; collaborators stay attached
    pub fn restart(&mut self) {
        self.state.restart();
        self.pending.clear();
        self.clock = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::platform::{ScriptedInput, ScriptedMotion};
    use crate::sim::MotionSample;

    type TestEngine = RideEngine<ScriptedMotion, ScriptedInput>;

    #[test]
    fn test_step_without_motion_is_noop() {
        let mut engine = TestEngine::new(Settings::default());
        engine.notify_collect(CollectibleKind::Diamond);
        engine.step(SIM_DT);
        assert_eq!(engine.clock(), 0.0);
        assert_eq!(engine.total_score(), 0);
        assert!(engine.drain_events().is_empty());

        // Queued notification applies once the rider exists
        engine.attach_motion(ScriptedMotion::new([MotionSample::default()]));
        engine.step(SIM_DT);
        assert_eq!(engine.total_score(), 100);
    }

    #[test]
    fn test_missing_input_means_no_controls() {
        let mut engine = TestEngine::new(Settings::default());
        engine.attach_motion(ScriptedMotion::default());
        engine.step(SIM_DT);
        assert_eq!(engine.snapshot().effective_speed, 10.0);
        assert!(!engine.snapshot().mega_boost);
    }

    #[test]
    fn test_injected_input_drives_powerups() {
        let input = ScriptedInput::new([
            Controls {
                super_boost: true,
                ..Default::default()
            },
            Controls::default(),
        ]);
        let mut engine =
            TestEngine::with_collaborators(Settings::default(), ScriptedMotion::default(), input);
        engine.step(SIM_DT);
        let snapshot = engine.snapshot();
        assert!(snapshot.super_boost);
        assert_eq!(snapshot.effective_speed, 30.0);

        // Edge consumed; the boost keeps running on its timer
        engine.step(SIM_DT);
        assert!(engine.snapshot().super_boost);
    }

    #[test]
    fn test_unknown_obstacle_tag_dropped() {
        let mut engine = TestEngine::new(Settings::default());
        assert!(!engine.notify_obstacle_tag("cactus"));
        assert!(engine.notify_obstacle_tag("Rock"));
        engine.attach_motion(ScriptedMotion::default());
        engine.step(SIM_DT);
        assert_eq!(engine.snapshot().crash_count, 1);
    }

    #[test]
    fn test_restart_keeps_collaborators() {
        let mut engine = TestEngine::with_collaborators(
            Settings::default(),
            ScriptedMotion::default(),
            ScriptedInput::default(),
        );
        engine.notify_collect(CollectibleKind::GoldCoin);
        engine.step(SIM_DT);
        assert_eq!(engine.total_score(), 50);

        engine.restart();
        assert_eq!(engine.total_score(), 0);
        assert_eq!(engine.clock(), 0.0);
        assert!(engine.motion().is_some());
        engine.step(SIM_DT);
        assert_eq!(engine.state().time_ticks, 1);
    }

    #[test]
    fn test_collaborators_fed_and_swapped_mid_ride() {
        let mut engine = TestEngine::with_collaborators(
            Settings::default(),
            ScriptedMotion::default(),
            ScriptedInput::default(),
        );
        engine.step(SIM_DT);

        // Extend the scripts through the engine
        if let Some(motion) = engine.motion_mut() {
            motion.push(MotionSample {
                horizontal_velocity: 12.0,
                ..Default::default()
            });
        }
        if let Some(input) = engine.input_mut() {
            input.push(Controls {
                invincibility: true,
                ..Default::default()
            });
        }
        // Pushed entries queue behind the current step's readings
        engine.step(SIM_DT);
        assert!(!engine.snapshot().invincible);
        engine.step(SIM_DT);
        let snapshot = engine.snapshot();
        assert!(snapshot.invincible);
        assert_eq!(snapshot.milestones_reached, 1);

        // Without a rider the clock stops until one is attached again
        let motion = engine.detach_motion().expect("motion was attached");
        let clock = engine.clock();
        engine.step(SIM_DT);
        assert_eq!(engine.clock(), clock);
        assert!(engine.motion().is_none());

        engine.attach_motion(motion);
        engine.step(SIM_DT);
        assert!(engine.clock() > clock);
    }

    #[test]
    fn test_disabled_input_stops_rider() {
        let input = ScriptedInput::new([Controls {
            mega_boost: true,
            ..Default::default()
        }]);
        let mut engine =
            TestEngine::with_collaborators(Settings::default(), ScriptedMotion::default(), input);
        engine.set_input_enabled(false);
        engine.step(SIM_DT);
        let snapshot = engine.snapshot();
        assert!(!snapshot.mega_boost);
        assert_eq!(snapshot.effective_speed, 0.0);
    }
}
