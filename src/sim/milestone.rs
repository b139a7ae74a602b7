//! One-shot speed milestones

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::settings::MilestoneDef;

/// Tracks which speed thresholds have already paid out this session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MilestoneTracker {
    achieved: BTreeSet<usize>,
}

impl MilestoneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_achieved(&self, index: usize) -> bool {
        self.achieved.contains(&index)
    }

    pub fn achieved_count(&self) -> usize {
        self.achieved.len()
    }

    /// Mark every not-yet-achieved threshold at or below `speed`.
    /// Returns the newly reached indices in list order (ascending when the
    /// list is sorted). A NaN reading reaches nothing.
    pub fn evaluate(&mut self, speed: f32, milestones: &[MilestoneDef]) -> Vec<usize> {
        let mut reached = Vec::new();
        if speed.is_nan() {
            log::debug!("Ignoring NaN speed reading");
            return reached;
        }
        for (index, milestone) in milestones.iter().enumerate() {
            if !(milestone.speed <= speed) {
                continue;
            }
            if self.achieved.insert(index) {
                log::info!("Speed milestone: {} at {:.1} u/s", milestone.label, speed);
                reached.push(index);
            }
        }
        reached
    }

    pub fn reset(&mut self) {
        self.achieved.clear();
    }
}
