//! Scoring simulation module
//!
//! All scoring and power-up logic lives here. This module must stay
//! frame-synchronous and deterministic:
//! - One `tick` per host step, driven by an explicit clock
//! - Timers are absolute-time comparisons, never scheduled callbacks
//! - No rendering or platform dependencies

pub mod collision;
pub mod combo;
pub mod crash;
pub mod milestone;
pub mod modifier;
pub mod powerups;
pub mod state;
pub mod tick;
pub mod timed;
pub mod trick;

pub use collision::{CollectibleKind, Collision, ObstacleKind, ObstacleResponse};
pub use combo::{ComboTracker, ScoreLedger, combo_multiplier};
pub use crash::{CrashMonitor, CrashOutcome};
pub use milestone::MilestoneTracker;
pub use modifier::{ModifierOutcome, SpeedModifier};
pub use powerups::{PowerUpKind, PowerUps, SpeedTier};
pub use state::{GameEvent, RideSnapshot, RideState};
pub use tick::{Controls, MotionSample, TickInput, tick};
pub use timed::TimedEffect;
pub use trick::{Contact, TrickAccumulator, TrickDetector, TrickKind, classify};
