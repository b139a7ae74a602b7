//! Ride state and scoring rules
//!
//! Everything the scoring engine owns for one session lives in [`RideState`].
//! Points only ever enter the total through [`RideState::award`], which applies
//! the combo multiplier, so every scoring path is scaled the same way.

use serde::{Deserialize, Serialize};

use super::collision::{CollectibleKind, Collision, ObstacleKind, ObstacleResponse};
use super::combo::{ComboTracker, ScoreLedger};
use super::crash::{CrashMonitor, CrashOutcome};
use super::milestone::MilestoneTracker;
use super::modifier::{ModifierOutcome, SpeedModifier};
use super::powerups::{PowerUpKind, PowerUps, SpeedTier};
use super::trick::{TrickAccumulator, TrickDetector, TrickKind, classify};
use crate::settings::Settings;

/// One-shot notifications for the presentation layer, drained once per step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged {
        total: u64,
        gained: u64,
        source: String,
    },
    ComboChanged {
        count: u32,
        multiplier: f32,
    },
    TrickPerformed {
        trick: String,
        /// Points after the combo multiplier
        points: u64,
    },
    MilestoneReached {
        label: String,
        points: u64,
    },
    PowerUpActivated {
        kind: PowerUpKind,
        expires_at: f64,
    },
    PowerUpExpired {
        kind: PowerUpKind,
    },
    SpeedModifierApplied {
        factor: f32,
        expires_at: f64,
    },
    SpeedModifierRejected {
        factor: f32,
        duration: f32,
    },
    SpeedModifierExpired,
    Crashed {
        count: u32,
        max: u32,
    },
    RestartRequested,
}

impl GameEvent {
    /// Popup text for trick/milestone notifications
    pub fn display_text(&self) -> Option<String> {
        match self {
            GameEvent::TrickPerformed { trick, points } => Some(format!("{trick} +{points}")),
            GameEvent::MilestoneReached { label, points } => Some(format!("{label} +{points}")),
            _ => None,
        }
    }
}

/// Read-only view for HUDs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideSnapshot {
    pub total_score: u64,
    pub combo_count: u32,
    pub combo_multiplier: f32,
    pub speed_modifier: f32,
    pub invincible: bool,
    pub super_boost: bool,
    pub mega_boost: bool,
    pub grounded: bool,
    pub speed_tier: SpeedTier,
    pub effective_speed: f32,
    pub crash_count: u32,
    pub milestones_reached: usize,
}

/// Complete scoring state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideState {
    pub settings: Settings,
    pub ledger: ScoreLedger,
    pub combo: ComboTracker,
    pub milestones: MilestoneTracker,
    pub tricks: TrickDetector,
    pub powerups: PowerUps,
    pub modifier: SpeedModifier,
    pub crashes: CrashMonitor,
    /// When false, control edges are ignored and the rider stops
    pub input_enabled: bool,
    /// Tier chosen on the last step
    pub speed_tier: SpeedTier,
    /// Movement speed the host should drive the rider at
    pub effective_speed: f32,
    /// Clock value of the last step
    pub time: f64,
    /// Steps processed
    pub time_ticks: u64,
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl RideState {
    pub fn new(mut settings: Settings) -> Self {
        if settings.sort_milestones() {
            log::warn!("Speed milestones were out of order, sorted by speed");
        }
        let combo = ComboTracker::new(settings.combo_window, settings.max_combo_multiplier);
        let effective_speed = settings.normal_speed;
        Self {
            settings,
            ledger: ScoreLedger::new(),
            combo,
            milestones: MilestoneTracker::new(),
            tricks: TrickDetector::new(),
            powerups: PowerUps::new(),
            modifier: SpeedModifier::new(),
            crashes: CrashMonitor::new(),
            input_enabled: true,
            speed_tier: SpeedTier::Normal,
            effective_speed,
            time: 0.0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Discard the session and start over with the same settings
    pub fn restart(&mut self) {
        log::info!("Session restart (final score {})", self.ledger.total());
        let settings = std::mem::take(&mut self.settings);
        *self = Self::new(settings);
    }

    /// Events produced since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn total_score(&self) -> u64 {
        self.ledger.total()
    }

    pub fn is_grounded(&self) -> bool {
        !self.tricks.is_airborne()
    }

    pub fn is_invincible(&self) -> bool {
        self.powerups.is_active(PowerUpKind::Invincibility)
    }

    pub fn snapshot(&self) -> RideSnapshot {
        RideSnapshot {
            total_score: self.ledger.total(),
            combo_count: self.combo.count(),
            combo_multiplier: self.combo.multiplier(),
            speed_modifier: self.modifier.factor(),
            invincible: self.is_invincible(),
            super_boost: self.powerups.is_active(PowerUpKind::SuperBoost),
            mega_boost: self.powerups.is_active(PowerUpKind::MegaBoost),
            grounded: self.is_grounded(),
            speed_tier: self.speed_tier,
            effective_speed: self.effective_speed,
            crash_count: self.crashes.count(),
            milestones_reached: self.milestones.achieved_count(),
        }
    }

    /// Add points scaled by the current combo multiplier. Returns the points added.
    pub fn award(&mut self, base_points: f32, source: &str) -> u64 {
        let multiplier = self.combo.multiplier();
        self.ledger.award(base_points, multiplier, source, &mut self.events)
    }

    /// Score a graded trick and extend the combo
    pub fn score_trick(&mut self, trick: TrickKind, now: f64) -> u64 {
        let points = self.award(trick.base_points(self.settings.trick_score), trick.name());
        self.combo.register(now, &mut self.events);
        log::info!("Trick: {} +{}", trick.name(), points);
        self.events.push(GameEvent::TrickPerformed {
            trick: trick.name().to_string(),
            points,
        });
        points
    }

    /// Grade a finished jump; returns the trick if it scored
    pub fn land(&mut self, jump: &TrickAccumulator, now: f64) -> Option<TrickKind> {
        let trick = classify(jump, &self.settings)?;
        self.score_trick(trick, now);
        Some(trick)
    }

    /// Player-triggered trick. Only counts while airborne.
    pub fn perform_manual_trick(&mut self, name: &str, now: f64) -> bool {
        if !self.tricks.is_airborne() {
            log::debug!("Manual trick '{}' ignored while grounded", name);
            return false;
        }
        let base = self.settings.manual_trick_score as f32;
        let points = self.award(base, name);
        self.combo.register(now, &mut self.events);
        log::info!("Manual trick: {} +{}", name, points);
        self.events.push(GameEvent::TrickPerformed {
            trick: name.to_string(),
            points,
        });
        true
    }

    /// Pay out any speed milestones reached at `speed`
    pub fn evaluate_milestones(&mut self, speed: f32) {
        let reached = self.milestones.evaluate(speed, &self.settings.milestones);
        for index in reached {
            let milestone = &self.settings.milestones[index];
            let (bonus, label) = (milestone.bonus as f32, milestone.label.clone());
            let points = self.award(bonus, "Speed Milestone");
            self.events.push(GameEvent::MilestoneReached { label, points });
        }
    }

    pub fn collect(&mut self, kind: CollectibleKind, now: f64) -> u64 {
        let points = self.award(kind.points(&self.settings) as f32, kind.as_str());
        self.combo.register(now, &mut self.events);
        points
    }

    pub fn activate_powerup(&mut self, kind: PowerUpKind, now: f64) {
        self.powerups.activate(kind, now, &self.settings, &mut self.events);
    }

    /// Apply an obstacle penalty (rejected while invincible)
    pub fn apply_speed_modifier(
        &mut self,
        factor: f32,
        duration: f32,
        now: f64,
    ) -> ModifierOutcome {
        let invincible = self.is_invincible();
        self.modifier.apply(factor, duration, now, invincible, &mut self.events)
    }

    /// Crash notification: the combo always breaks; the counter honours the grace window
    pub fn crash(&mut self, now: f64) {
        self.combo.reset_on_crash(&mut self.events);
        let outcome = self.crashes.register(
            now,
            self.settings.crash_grace,
            self.settings.max_crashes,
        );
        if let CrashOutcome::Counted { count, restart } = outcome {
            self.events.push(GameEvent::Crashed {
                count,
                max: self.settings.max_crashes,
            });
            if restart {
                self.events.push(GameEvent::RestartRequested);
            }
        }
    }

    pub fn hit_obstacle(&mut self, kind: ObstacleKind, now: f64) {
        match kind.response(&self.settings) {
            ObstacleResponse::Crash => {
                log::info!("Crashed into {}", kind.as_str());
                self.crash(now);
            }
            ObstacleResponse::Slow { factor, duration } => {
                if self.apply_speed_modifier(factor, duration, now) == ModifierOutcome::Rejected {
                    log::debug!("{} had no effect (invincible)", kind.as_str());
                }
            }
        }
    }

    pub fn handle_collision(&mut self, collision: Collision, now: f64) {
        match collision {
            Collision::Crash => self.crash(now),
            Collision::Obstacle(kind) => self.hit_obstacle(kind, now),
            Collision::Collect(kind) => {
                self.collect(kind, now);
            }
        }
    }

    /// Movement speed for the current tier and penalty
    pub fn resolve_speed(&mut self, boost_held: bool) -> f32 {
        self.speed_tier = self
            .powerups
            .speed_tier(boost_held && self.input_enabled);
        self.effective_speed = if self.input_enabled {
            self.speed_tier.base_speed(&self.settings) * self.modifier.factor()
        } else {
            0.0
        };
        self.effective_speed
    }
}
