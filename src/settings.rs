//! Game balance settings
//!
//! Every tunable number the scoring engine reads lives here. Loaded from JSON,
//! falling back to defaults for any missing field.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Relaxed,
    #[default]
    Standard,
    Hardcore,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Relaxed => "Relaxed",
            Difficulty::Standard => "Standard",
            Difficulty::Hardcore => "Hardcore",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "easy" => Some(Difficulty::Relaxed),
            "standard" | "normal" => Some(Difficulty::Standard),
            "hardcore" | "hard" => Some(Difficulty::Hardcore),
            _ => None,
        }
    }

    /// Seconds a combo survives without a new scoring event
    pub fn combo_window(&self) -> f32 {
        match self {
            Difficulty::Relaxed => 4.0,
            Difficulty::Standard => 3.0,
            Difficulty::Hardcore => 2.0,
        }
    }

    /// Crashes allowed before the level restarts
    pub fn max_crashes(&self) -> u32 {
        match self {
            Difficulty::Relaxed => 5,
            Difficulty::Standard => 3,
            Difficulty::Hardcore => 1,
        }
    }
}

/// A one-shot speed bonus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneDef {
    /// Horizontal speed (units/s) that triggers the bonus
    pub speed: f32,
    /// Base points, scaled by the combo multiplier when awarded
    pub bonus: u32,
    /// Text shown when reached
    pub label: String,
}

impl MilestoneDef {
    pub fn new(speed: f32, bonus: u32, label: &str) -> Self {
        Self {
            speed,
            bonus,
            label: label.to_string(),
        }
    }
}

/// Speed penalty applied by a non-crashing obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleEffect {
    /// Multiplier on movement speed, in (0, 1]
    pub factor: f32,
    /// Seconds the penalty lasts
    pub duration: f32,
}

impl ObstacleEffect {
    pub const fn new(factor: f32, duration: f32) -> Self {
        Self { factor, duration }
    }
}

/// Scoring engine tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preset for the combo window and crash limit. When loading JSON, the
    /// preset fills in whichever of the two is not given explicitly.
    pub difficulty: Difficulty,

    // === Scoring ===
    /// Base points for a 1x trick
    pub trick_score: u32,
    /// Points for a player-triggered trick
    pub manual_trick_score: u32,
    /// Name announced for a player-triggered trick
    pub manual_trick_label: String,
    /// Seconds before an idle combo breaks
    pub combo_window: f32,
    /// Multiplier cap
    pub max_combo_multiplier: f32,

    // === Trick detection ===
    /// Jumps shorter than this never score
    pub min_air_time: f32,
    /// Peak height above takeoff needed for Big Air
    pub big_air_height: f32,
    /// Air-time needed for Long Jump
    pub long_jump_time: f32,

    // === Movement ===
    pub normal_speed: f32,
    /// Speed while the boost key is held
    pub boost_speed: f32,
    pub super_boost_speed: f32,
    pub mega_boost_speed: f32,

    // === Power-ups (seconds) ===
    pub invincibility_duration: f32,
    pub super_boost_duration: f32,
    pub mega_boost_duration: f32,

    // === Obstacles ===
    pub small_rock: ObstacleEffect,
    pub ice_patch: ObstacleEffect,
    pub snow_pile: ObstacleEffect,

    // === Collectibles ===
    pub coin_score: u32,
    pub silver_coin_score: u32,
    pub gold_coin_score: u32,
    pub diamond_score: u32,

    // === Crashes ===
    pub max_crashes: u32,
    /// Seconds after a crash during which further crashes are ignored
    pub crash_grace: f32,

    /// Speed milestones, ascending by speed
    pub milestones: Vec<MilestoneDef>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Standard,

            trick_score: 100,
            manual_trick_score: 50,
            manual_trick_label: "Flip".to_string(),
            combo_window: 3.0,
            max_combo_multiplier: 5.0,

            min_air_time: 0.5,
            big_air_height: 3.0,
            long_jump_time: 1.0,

            normal_speed: 10.0,
            boost_speed: 20.0,
            super_boost_speed: 30.0,
            mega_boost_speed: 40.0,

            invincibility_duration: 5.0,
            super_boost_duration: 3.0,
            mega_boost_duration: 2.0,

            small_rock: ObstacleEffect::new(0.3, 1.5),
            ice_patch: ObstacleEffect::new(0.2, 3.0),
            snow_pile: ObstacleEffect::new(0.7, 1.0),

            coin_score: 10,
            silver_coin_score: 25,
            gold_coin_score: 50,
            diamond_score: 100,

            max_crashes: 3,
            crash_grace: 1.0,

            milestones: vec![
                MilestoneDef::new(10.0, 50, "Speed Boost!"),
                MilestoneDef::new(15.0, 100, "Fast Rider!"),
                MilestoneDef::new(20.0, 200, "Speed Demon!"),
                MilestoneDef::new(25.0, 500, "Lightning Fast!"),
                MilestoneDef::new(30.0, 1000, "SUPERSONIC!"),
            ],
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_preset(preset: Difficulty) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a difficulty preset (updates window and crash limit)
    pub fn apply_preset(&mut self, preset: Difficulty) {
        self.difficulty = preset;
        self.combo_window = preset.combo_window();
        self.max_crashes = preset.max_crashes();
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let given = |key: &str| value.get(key).is_some();
        let (window_given, crashes_given) = (given("combo_window"), given("max_crashes"));

        let mut settings: Settings = serde_json::from_value(value)?;
        if !window_given {
            settings.combo_window = settings.difficulty.combo_window();
        }
        if !crashes_given {
            settings.max_crashes = settings.difficulty.max_crashes();
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Put the milestones in ascending speed order. Returns true if they moved.
    pub fn sort_milestones(&mut self) -> bool {
        let sorted = self
            .milestones
            .windows(2)
            .all(|pair| pair[0].speed.total_cmp(&pair[1].speed).is_le());
        if !sorted {
            self.milestones.sort_by(|a, b| a.speed.total_cmp(&b.speed));
        }
        !sorted
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.combo_window > 0.0) {
            return Err(config_err(format!(
                "combo_window must be positive, got {}",
                self.combo_window
            )));
        }
        if !(self.max_combo_multiplier >= 1.0) {
            return Err(config_err(format!(
                "max_combo_multiplier must be at least 1.0, got {}",
                self.max_combo_multiplier
            )));
        }

        let timings = [
            ("min_air_time", self.min_air_time),
            ("long_jump_time", self.long_jump_time),
            ("invincibility_duration", self.invincibility_duration),
            ("super_boost_duration", self.super_boost_duration),
            ("mega_boost_duration", self.mega_boost_duration),
            ("crash_grace", self.crash_grace),
        ];
        for (name, value) in timings {
            if !(value >= 0.0) {
                return Err(config_err(format!("{name} must not be negative, got {value}")));
            }
        }

        let speeds = [
            ("normal_speed", self.normal_speed),
            ("boost_speed", self.boost_speed),
            ("super_boost_speed", self.super_boost_speed),
            ("mega_boost_speed", self.mega_boost_speed),
        ];
        for (name, value) in speeds {
            if !(value >= 0.0) {
                return Err(config_err(format!("{name} must not be negative, got {value}")));
            }
        }

        let obstacles = [
            ("small_rock", self.small_rock),
            ("ice_patch", self.ice_patch),
            ("snow_pile", self.snow_pile),
        ];
        for (name, effect) in obstacles {
            if !(effect.factor > 0.0 && effect.factor <= 1.0) {
                return Err(config_err(format!(
                    "{name}.factor must be in (0, 1], got {}",
                    effect.factor
                )));
            }
            if !(effect.duration >= 0.0) {
                return Err(config_err(format!(
                    "{name}.duration must not be negative, got {}",
                    effect.duration
                )));
            }
        }

        if self.max_crashes == 0 {
            return Err(config_err("max_crashes must be at least 1".to_string()));
        }

        for milestone in &self.milestones {
            if !(milestone.speed >= 0.0) {
                return Err(config_err(format!(
                    "milestone '{}' needs a non-negative speed, got {}",
                    milestone.label, milestone.speed
                )));
            }
        }

        for pair in self.milestones.windows(2) {
            if pair[1].speed <= pair[0].speed {
                return Err(config_err(format!(
                    "milestones must be strictly ascending: '{}' ({}) follows '{}' ({})",
                    pair[1].label, pair[1].speed, pair[0].label, pair[0].speed
                )));
            }
        }

        Ok(())
    }
}

fn config_err(msg: String) -> EngineError {
    EngineError::Config(msg)
}
