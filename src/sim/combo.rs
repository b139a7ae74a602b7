//! Combo counter and score ledger
//!
//! The combo decays after `window` seconds without a scoring event. The ledger
//! is the only writer of the total score and always applies the current combo
//! multiplier.

use serde::{Deserialize, Serialize};

use super::state::GameEvent;
use crate::consts::COMBO_STEP;

/// Multiplier for a combo count: `min(1 + 0.5 * count, max)`
#[inline]
pub fn combo_multiplier(count: u32, max_multiplier: f32) -> f32 {
    (1.0 + COMBO_STEP * count as f32).min(max_multiplier)
}

/// Decaying combo counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboTracker {
    count: u32,
    multiplier: f32,
    last_event_time: f64,
    window: f32,
    max_multiplier: f32,
}

impl ComboTracker {
    pub fn new(window: f32, max_multiplier: f32) -> Self {
        Self {
            count: 0,
            multiplier: 1.0,
            last_event_time: 0.0,
            window,
            max_multiplier,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub fn last_event_time(&self) -> f64 {
        self.last_event_time
    }

    /// Break the combo once it has been idle longer than the window
    pub fn tick(&mut self, now: f64, events: &mut Vec<GameEvent>) {
        if self.count > 0 && now - self.last_event_time > f64::from(self.window) {
            log::info!("Combo broken! Final combo: {}", self.count);
            self.reset(events);
        }
    }

    /// Count a scoring event and restart the decay clock
    pub fn register(&mut self, now: f64, events: &mut Vec<GameEvent>) {
        self.count += 1;
        self.last_event_time = now;
        self.multiplier = combo_multiplier(self.count, self.max_multiplier);
        log::debug!("Combo x{} (multiplier {:.1}x)", self.count, self.multiplier);
        events.push(GameEvent::ComboChanged {
            count: self.count,
            multiplier: self.multiplier,
        });
    }

    /// Crash: drop the combo regardless of the window
    pub fn reset_on_crash(&mut self, events: &mut Vec<GameEvent>) {
        if self.count > 0 {
            log::info!("Combo lost to crash at x{}", self.count);
        }
        self.reset(events);
    }

    fn reset(&mut self, events: &mut Vec<GameEvent>) {
        let changed = self.count != 0 || self.multiplier != 1.0;
        self.count = 0;
        self.multiplier = 1.0;
        if changed {
            events.push(GameEvent::ComboChanged {
                count: 0,
                multiplier: 1.0,
            });
        }
    }
}

/// Running score total
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreLedger {
    total: u64,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self { total: 0 }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Add `base_points` scaled by `multiplier` (rounded). Returns the points added.
    pub fn award(
        &mut self,
        base_points: f32,
        multiplier: f32,
        source: &str,
        events: &mut Vec<GameEvent>,
    ) -> u64 {
        let points = (base_points.max(0.0) * multiplier).round() as u64;
        if points == 0 {
            return 0;
        }
        self.total += points;
        log::debug!("Score +{} from {} (x{:.1})", points, source, multiplier);
        events.push(GameEvent::ScoreChanged {
            total: self.total,
            gained: points,
            source: source.to_string(),
        });
        points
    }
}
