//! Player power-ups and the speed-tier priority rule

use serde::{Deserialize, Serialize};

use super::state::GameEvent;
use super::timed::TimedEffect;
use crate::settings::Settings;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Obstacles can no longer slow the rider
    Invincibility,
    SuperBoost,
    MegaBoost,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Invincibility,
        PowerUpKind::SuperBoost,
        PowerUpKind::MegaBoost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Invincibility => "Invincibility",
            PowerUpKind::SuperBoost => "Super Boost",
            PowerUpKind::MegaBoost => "Mega Boost",
        }
    }

    pub fn duration(&self, settings: &Settings) -> f32 {
        match self {
            PowerUpKind::Invincibility => settings.invincibility_duration,
            PowerUpKind::SuperBoost => settings.super_boost_duration,
            PowerUpKind::MegaBoost => settings.mega_boost_duration,
        }
    }
}

/// Movement speed tiers, lowest to highest priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpeedTier {
    Normal,
    Boost,
    Super,
    Mega,
}

impl SpeedTier {
    /// Base speed for this tier before any obstacle penalty
    pub fn base_speed(&self, settings: &Settings) -> f32 {
        match self {
            SpeedTier::Normal => settings.normal_speed,
            SpeedTier::Boost => settings.boost_speed,
            SpeedTier::Super => settings.super_boost_speed,
            SpeedTier::Mega => settings.mega_boost_speed,
        }
    }
}

/// The three independent power-up timers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerUps {
    pub invincibility: TimedEffect,
    pub super_boost: TimedEffect,
    pub mega_boost: TimedEffect,
}

impl PowerUps {
    pub fn new() -> Self {
        Self::default()
    }

    fn effect(&self, kind: PowerUpKind) -> &TimedEffect {
        match kind {
            PowerUpKind::Invincibility => &self.invincibility,
            PowerUpKind::SuperBoost => &self.super_boost,
            PowerUpKind::MegaBoost => &self.mega_boost,
        }
    }

    fn effect_mut(&mut self, kind: PowerUpKind) -> &mut TimedEffect {
        match kind {
            PowerUpKind::Invincibility => &mut self.invincibility,
            PowerUpKind::SuperBoost => &mut self.super_boost,
            PowerUpKind::MegaBoost => &mut self.mega_boost,
        }
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.effect(kind).is_active()
    }

    pub fn expires_at(&self, kind: PowerUpKind) -> Option<f64> {
        self.effect(kind).expires_at()
    }

    /// Start a power-up; an already-running one restarts its full duration
    pub fn activate(
        &mut self,
        kind: PowerUpKind,
        now: f64,
        settings: &Settings,
        events: &mut Vec<GameEvent>,
    ) {
        let duration = kind.duration(settings);
        let effect = self.effect_mut(kind);
        let restarted = effect.is_active();
        effect.activate(now, duration);
        let expires_at = now + f64::from(duration.max(0.0));

        if restarted {
            log::debug!("{} restarted, now expires at {:.2}s", kind.as_str(), expires_at);
        } else {
            log::info!("{} activated for {:.1}s", kind.as_str(), duration);
        }
        events.push(GameEvent::PowerUpActivated { kind, expires_at });
    }

    /// Expire any power-ups whose window has passed
    pub fn tick(&mut self, now: f64, events: &mut Vec<GameEvent>) {
        for kind in PowerUpKind::ALL {
            if self.effect_mut(kind).tick(now) {
                log::info!("{} expired", kind.as_str());
                events.push(GameEvent::PowerUpExpired { kind });
            }
        }
    }

    /// Mega Boost > Super Boost > held boost key > normal
    pub fn speed_tier(&self, boost_held: bool) -> SpeedTier {
        if self.mega_boost.is_active() {
            SpeedTier::Mega
        } else if self.super_boost.is_active() {
            SpeedTier::Super
        } else if boost_held {
            SpeedTier::Boost
        } else {
            SpeedTier::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restart_not_extend() {
        let settings = Settings::default();
        let mut powerups = PowerUps::new();
        let mut events = Vec::new();

        powerups.activate(PowerUpKind::SuperBoost, 0.0, &settings, &mut events);
        powerups.activate(PowerUpKind::SuperBoost, 1.0, &settings, &mut events);
        assert_eq!(powerups.expires_at(PowerUpKind::SuperBoost), Some(4.0));

        powerups.tick(3.5, &mut events);
        assert!(powerups.is_active(PowerUpKind::SuperBoost));
        powerups.tick(4.0, &mut events);
        assert!(!powerups.is_active(PowerUpKind::SuperBoost));
        assert_eq!(
            events.last(),
            Some(&GameEvent::PowerUpExpired {
                kind: PowerUpKind::SuperBoost
            })
        );
    }

    #[test]
    fn test_speed_tier_priority() {
        let settings = Settings::default();
        let mut powerups = PowerUps::new();
        let mut events = Vec::new();

        assert_eq!(powerups.speed_tier(false), SpeedTier::Normal);
        assert_eq!(powerups.speed_tier(true), SpeedTier::Boost);

        powerups.activate(PowerUpKind::SuperBoost, 0.0, &settings, &mut events);
        assert_eq!(powerups.speed_tier(true), SpeedTier::Super);

        powerups.activate(PowerUpKind::MegaBoost, 0.0, &settings, &mut events);
        assert_eq!(powerups.speed_tier(false), SpeedTier::Mega);

        // Mega (2s) runs out first, Super (3s) takes over
        powerups.tick(2.5, &mut events);
        assert_eq!(powerups.speed_tier(false), SpeedTier::Super);
    }

    #[test]
    fn test_invincibility_does_not_change_tier() {
        let settings = Settings::default();
        let mut powerups = PowerUps::new();
        let mut events = Vec::new();
        powerups.activate(PowerUpKind::Invincibility, 0.0, &settings, &mut events);
        assert_eq!(powerups.speed_tier(false), SpeedTier::Normal);
        assert_eq!(SpeedTier::Mega.base_speed(&settings), 40.0);
    }

    #[test]
    fn test_overlapping_powerups_expire_independently() {
        let settings = Settings::default();
        let mut powerups = PowerUps::new();
        let mut events = Vec::new();
        for kind in PowerUpKind::ALL {
            powerups.activate(kind, 0.0, &settings, &mut events);
        }
        events.clear();

        powerups.tick(10.0, &mut events);
        assert_eq!(events.len(), 3);
        assert!(PowerUpKind::ALL.iter().all(|k| !powerups.is_active(*k)));
    }
}
