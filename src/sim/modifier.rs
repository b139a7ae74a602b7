//! Obstacle speed penalty

use serde::{Deserialize, Serialize};

use super::state::GameEvent;
use super::timed::TimedEffect;

/// Result of trying to apply a speed penalty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierOutcome {
    Applied,
    /// Invincibility blocked the penalty; nothing changed
    Rejected,
}

/// A single multiplicative speed penalty with an expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedModifier {
    factor: f32,
    timer: TimedEffect,
}

impl Default for SpeedModifier {
    fn default() -> Self {
        Self {
            factor: 1.0,
            timer: TimedEffect::new(),
        }
    }
}

impl SpeedModifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current factor (1.0 when no penalty is live)
    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_active()
    }

    pub fn expires_at(&self) -> Option<f64> {
        self.timer.expires_at()
    }

    /// Replace any in-flight penalty, unless the rider is invincible
    pub fn apply(
        &mut self,
        factor: f32,
        duration: f32,
        now: f64,
        invincible: bool,
        events: &mut Vec<GameEvent>,
    ) -> ModifierOutcome {
        if invincible {
            log::debug!("Speed modifier x{:.2} blocked by invincibility", factor);
            events.push(GameEvent::SpeedModifierRejected { factor, duration });
            return ModifierOutcome::Rejected;
        }

        self.factor = factor.clamp(f32::MIN_POSITIVE, 1.0);
        self.timer.activate(now, duration);
        log::info!(
            "Speed reduced by {:.0}% for {:.1}s",
            (1.0 - self.factor) * 100.0,
            duration
        );
        events.push(GameEvent::SpeedModifierApplied {
            factor: self.factor,
            expires_at: now + f64::from(duration.max(0.0)),
        });
        ModifierOutcome::Applied
    }

    /// Restore full speed once the penalty window has passed
    pub fn tick(&mut self, now: f64, events: &mut Vec<GameEvent>) {
        if self.timer.tick(now) {
            self.factor = 1.0;
            log::debug!("Speed restored to normal");
            events.push(GameEvent::SpeedModifierExpired);
        }
    }

    pub fn clear(&mut self) {
        self.timer.cancel();
        self.factor = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_and_expire() {
        let mut modifier = SpeedModifier::new();
        let mut events = Vec::new();
        assert_eq!(
            modifier.apply(0.3, 1.5, 10.0, false, &mut events),
            ModifierOutcome::Applied
        );
        assert_eq!(modifier.factor(), 0.3);

        modifier.tick(11.4, &mut events);
        assert_eq!(modifier.factor(), 0.3);
        modifier.tick(11.5, &mut events);
        assert_eq!(modifier.factor(), 1.0);
        assert_eq!(events.last(), Some(&GameEvent::SpeedModifierExpired));
    }

    #[test]
    fn test_new_penalty_replaces_old() {
        let mut modifier = SpeedModifier::new();
        let mut events = Vec::new();
        modifier.apply(0.2, 3.0, 0.0, false, &mut events);
        modifier.apply(0.7, 1.0, 1.0, false, &mut events);
        assert_eq!(modifier.factor(), 0.7);
        assert_eq!(modifier.expires_at(), Some(2.0));

        // The first penalty's 3s expiry never fires separately
        modifier.tick(2.0, &mut events);
        assert_eq!(modifier.factor(), 1.0);
        modifier.tick(3.0, &mut events);
        let expiries = events
            .iter()
            .filter(|e| matches!(e, GameEvent::SpeedModifierExpired))
            .count();
        assert_eq!(expiries, 1);
    }

    #[test]
    fn test_rejected_while_invincible() {
        let mut modifier = SpeedModifier::new();
        let mut events = Vec::new();
        modifier.apply(0.7, 5.0, 0.0, false, &mut events);

        let outcome = modifier.apply(0.2, 3.0, 1.0, true, &mut events);
        assert_eq!(outcome, ModifierOutcome::Rejected);
        assert_eq!(modifier.factor(), 0.7);
        assert_eq!(modifier.expires_at(), Some(5.0));
    }
}
