//! Crash counting with a short grace window after each crash

use serde::{Deserialize, Serialize};

use super::timed::TimedEffect;

/// What a crash notification turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashOutcome {
    /// Inside the grace window of a previous crash
    Ignored,
    /// Counted; `restart` is true on the crash that reaches the limit
    Counted { count: u32, restart: bool },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrashMonitor {
    count: u32,
    grace: TimedEffect,
    restart_requested: bool,
}

impl CrashMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn in_grace(&self) -> bool {
        self.grace.is_active()
    }

    pub fn restart_requested(&self) -> bool {
        self.restart_requested
    }

    pub fn tick(&mut self, now: f64) {
        self.grace.tick(now);
    }

    pub fn register(&mut self, now: f64, grace_seconds: f32, max_crashes: u32) -> CrashOutcome {
        if self.grace.is_active() {
            log::debug!("Crash ignored during grace window");
            return CrashOutcome::Ignored;
        }

        self.count += 1;
        self.grace.activate(now, grace_seconds);
        log::info!("Crash! {}/{}", self.count, max_crashes);

        // Latched: the restart request goes out once per session
        let restart = !self.restart_requested && self.count >= max_crashes;
        if restart {
            self.restart_requested = true;
            log::info!("Too many crashes, requesting level restart");
        }
        CrashOutcome::Counted {
            count: self.count,
            restart,
        }
    }
}
