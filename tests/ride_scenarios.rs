//! End-to-end rides through the engine with scripted collaborators

use glam::Vec2;

use slope_rush::platform::{DemoInput, DemoRider, ScriptedInput, ScriptedMotion};
use slope_rush::sim::{
    CollectibleKind, Controls, GameEvent, MotionSample, ObstacleKind, PowerUpKind, RideState,
    TickInput, tick,
};
use slope_rush::{RideEngine, Settings};

type ScriptedEngine = RideEngine<ScriptedMotion, ScriptedInput>;

const DT: f32 = 0.1;

fn ground(vx: f32) -> MotionSample {
    MotionSample {
        horizontal_velocity: vx,
        ..Default::default()
    }
}

/// Takeoff from flat ground, `steps` airborne samples turning `degrees_per_step`, then landing
fn jump(degrees_per_step: f32, steps: usize, height: f32) -> Vec<MotionSample> {
    let mut samples = vec![ground(0.0)];
    for i in 0..steps {
        samples.push(MotionSample {
            grounded: false,
            position: Vec2::new(i as f32, height),
            rotation_degrees: degrees_per_step * (i as f32 + 1.0),
            horizontal_velocity: 0.0,
        });
    }
    samples.push(ground(0.0));
    samples
}

fn engine_with(samples: Vec<MotionSample>) -> ScriptedEngine {
    ScriptedEngine::with_collaborators(
        Settings::default(),
        ScriptedMotion::new(samples),
        ScriptedInput::default(),
    )
}

fn run(engine: &mut ScriptedEngine, steps: usize) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..steps {
        engine.step(DT);
        events.extend(engine.drain_events());
    }
    events
}

fn popups(events: &[GameEvent]) -> Vec<String> {
    events.iter().filter_map(GameEvent::display_text).collect()
}

fn score_gains(events: &[GameEvent]) -> Vec<u64> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::ScoreChanged { gained, .. } => Some(*gained),
            _ => None,
        })
        .collect()
}

#[test]
fn half_spin_scores_at_landing_multiplier() {
    let samples = jump(25.0, 8, 1.0);
    let steps = samples.len();
    let mut engine = engine_with(samples);

    // Combo of 1 going into the jump
    engine.notify_collect(CollectibleKind::Coin);
    let events = run(&mut engine, steps);

    assert_eq!(popups(&events), vec!["Half Spin +150"]);
    assert_eq!(engine.total_score(), 10 + 150);
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.combo_count, 2);
    assert_eq!(snapshot.combo_multiplier, 2.0);
    assert!(snapshot.grounded);
}

#[test]
fn four_hundred_degrees_is_a_full_spin() {
    let samples = jump(50.0, 8, 1.0);
    let steps = samples.len();
    let mut engine = engine_with(samples);
    let events = run(&mut engine, steps);
    assert_eq!(popups(&events), vec!["Full Spin +200"]);
}

#[test]
fn flat_high_jump_is_big_air() {
    let samples = jump(0.0, 8, 3.5);
    let steps = samples.len();
    let mut engine = engine_with(samples);
    let events = run(&mut engine, steps);
    assert_eq!(popups(&events), vec!["Big Air +100"]);
}

#[test]
fn short_hop_scores_nothing() {
    let samples = jump(90.0, 4, 1.0);
    let steps = samples.len();
    let mut engine = engine_with(samples);
    let events = run(&mut engine, steps);
    assert!(popups(&events).is_empty());
    assert_eq!(engine.total_score(), 0);
    assert_eq!(engine.snapshot().combo_count, 0);
}

#[test]
fn several_milestones_in_one_step_pay_in_order() {
    let mut engine = engine_with(vec![ground(21.0), ground(21.0), ground(25.0)]);

    let events = run(&mut engine, 1);
    assert_eq!(score_gains(&events), vec![50, 100, 200]);
    let totals: Vec<u64> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::ScoreChanged { total, .. } => Some(*total),
            _ => None,
        })
        .collect();
    assert_eq!(totals, vec![50, 150, 350]);
    assert_eq!(
        popups(&events),
        vec!["Speed Boost! +50", "Fast Rider! +100", "Speed Demon! +200"]
    );

    // One-shot: holding the same speed pays nothing more
    let events = run(&mut engine, 1);
    assert!(score_gains(&events).is_empty());

    let events = run(&mut engine, 1);
    assert_eq!(popups(&events), vec!["Lightning Fast! +500"]);
    assert_eq!(engine.snapshot().milestones_reached, 4);
    assert_eq!(engine.snapshot().combo_count, 0);
}

#[test]
fn crash_resets_combo_immediately() {
    let mut engine = engine_with(vec![ground(0.0)]);
    for _ in 0..5 {
        engine.notify_collect(CollectibleKind::Coin);
    }
    run(&mut engine, 1);
    assert_eq!(engine.snapshot().combo_count, 5);
    assert_eq!(engine.snapshot().combo_multiplier, 3.5);
    // 10 x (1.0 + 1.5 + 2.0 + 2.5 + 3.0)
    assert_eq!(engine.total_score(), 100);

    engine.notify_crash();
    let events = run(&mut engine, 1);
    assert!(events.contains(&GameEvent::ComboChanged {
        count: 0,
        multiplier: 1.0
    }));
    assert!(events.contains(&GameEvent::Crashed { count: 1, max: 3 }));
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.combo_count, 0);
    assert_eq!(snapshot.combo_multiplier, 1.0);
    assert_eq!(snapshot.total_score, 100);
}

#[test]
fn crash_limit_requests_one_restart() {
    let mut engine = engine_with(vec![ground(0.0)]);
    let mut requests = 0;
    for _ in 0..4 {
        engine.notify_obstacle(ObstacleKind::Rock);
        // Step past the grace window
        let events = run(&mut engine, 12);
        requests += events
            .iter()
            .filter(|e| matches!(e, GameEvent::RestartRequested))
            .count();
    }
    assert_eq!(requests, 1);
    assert_eq!(engine.snapshot().crash_count, 4);

    engine.restart();
    assert_eq!(engine.snapshot().crash_count, 0);
}

#[test]
fn obstacles_bounce_off_invincibility() {
    let input = ScriptedInput::new([Controls {
        invincibility: true,
        ..Default::default()
    }]);
    let mut engine = ScriptedEngine::with_collaborators(
        Settings::default(),
        ScriptedMotion::new([ground(0.0)]),
        input,
    );
    run(&mut engine, 1);
    assert!(engine.snapshot().invincible);

    engine.notify_obstacle(ObstacleKind::IcePatch);
    let events = run(&mut engine, 1);
    assert!(events.contains(&GameEvent::SpeedModifierRejected {
        factor: 0.2,
        duration: 3.0
    }));
    assert_eq!(engine.snapshot().speed_modifier, 1.0);

    // Invincibility has lapsed by the next step
    engine.step(5.0);
    engine.notify_obstacle(ObstacleKind::IcePatch);
    engine.step(DT);
    let snapshot = engine.snapshot();
    assert!(!snapshot.invincible);
    assert_eq!(snapshot.speed_modifier, 0.2);
    assert!((snapshot.effective_speed - 2.0).abs() < 1e-5);
}

#[test]
fn reactivation_restarts_duration() {
    let mut state = RideState::new(Settings::default());
    let idle = TickInput {
        motion: Some(MotionSample::default()),
        ..Default::default()
    };
    let press = TickInput {
        controls: Controls {
            super_boost: true,
            ..Default::default()
        },
        ..idle.clone()
    };

    tick(&mut state, &press, 0.0, DT);
    tick(&mut state, &press, 1.0, DT);
    assert_eq!(state.powerups.expires_at(PowerUpKind::SuperBoost), Some(4.0));

    tick(&mut state, &idle, 3.5, DT);
    assert!(state.powerups.is_active(PowerUpKind::SuperBoost));
    tick(&mut state, &idle, 4.0, DT);
    assert!(!state.powerups.is_active(PowerUpKind::SuperBoost));
    assert_eq!(state.effective_speed, 10.0);
}

#[test]
fn combo_decays_after_window() {
    let mut engine = engine_with(vec![ground(0.0)]);
    engine.notify_collect(CollectibleKind::SilverCoin);
    run(&mut engine, 1);
    assert_eq!(engine.snapshot().combo_count, 1);

    let events = run(&mut engine, 31);
    let resets = events
        .iter()
        .filter(|e| matches!(e, GameEvent::ComboChanged { count: 0, .. }))
        .count();
    assert_eq!(resets, 1);
    assert_eq!(engine.snapshot().combo_multiplier, 1.0);
}

#[test]
fn demo_ride_is_deterministic() {
    fn ride(seed: u64) -> (u64, u32) {
        let mut engine = RideEngine::with_collaborators(
            Settings::default(),
            DemoRider::new(seed),
            DemoInput::new(seed).with_press_chance(0.0),
        );
        for _ in 0..(120 * 20) {
            engine.step(slope_rush::consts::SIM_DT);
            engine.drain_events();
        }
        let snapshot = engine.snapshot();
        (snapshot.total_score, snapshot.milestones_reached as u32)
    }

    let first = ride(3);
    assert_eq!(first, ride(3));
    // Boost bursts carry the rider past the first milestone
    assert!(first.1 >= 1);
}
