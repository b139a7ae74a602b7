//! Collision notifications raised by the host's trigger plumbing
//!
//! The engine never detects collisions itself. The host classifies what the
//! rider touched and pushes one of these; the engine decides what it means for
//! score, combo and speed.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Obstacle classification tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Rock,
    Tree,
    SmallRock,
    IcePatch,
    SnowPile,
}

/// What hitting an obstacle does to the rider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleResponse {
    Crash,
    Slow { factor: f32, duration: f32 },
}

impl ObstacleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Rock => "Rock",
            ObstacleKind::Tree => "Tree",
            ObstacleKind::SmallRock => "Small Rock",
            ObstacleKind::IcePatch => "Ice Patch",
            ObstacleKind::SnowPile => "Snow Pile",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "rock" => Some(ObstacleKind::Rock),
            "tree" => Some(ObstacleKind::Tree),
            "smallrock" => Some(ObstacleKind::SmallRock),
            "icepatch" | "ice" => Some(ObstacleKind::IcePatch),
            "snowpile" | "snow" => Some(ObstacleKind::SnowPile),
            _ => None,
        }
    }

    pub fn response(&self, settings: &Settings) -> ObstacleResponse {
        let effect = match self {
            ObstacleKind::Rock | ObstacleKind::Tree => return ObstacleResponse::Crash,
            ObstacleKind::SmallRock => settings.small_rock,
            ObstacleKind::IcePatch => settings.ice_patch,
            ObstacleKind::SnowPile => settings.snow_pile,
        };
        ObstacleResponse::Slow {
            factor: effect.factor,
            duration: effect.duration,
        }
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    SilverCoin,
    GoldCoin,
    Diamond,
}

impl CollectibleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectibleKind::Coin => "Coin",
            CollectibleKind::SilverCoin => "Silver Coin",
            CollectibleKind::GoldCoin => "Gold Coin",
            CollectibleKind::Diamond => "Diamond",
        }
    }

    /// Base points before the combo multiplier
    pub fn points(&self, settings: &Settings) -> u32 {
        match self {
            CollectibleKind::Coin => settings.coin_score,
            CollectibleKind::SilverCoin => settings.silver_coin_score,
            CollectibleKind::GoldCoin => settings.gold_coin_score,
            CollectibleKind::Diamond => settings.diamond_score,
        }
    }
}

/// A notification from the collision collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Hard crash (also produced by crash-class obstacles)
    Crash,
    Obstacle(ObstacleKind),
    Collect(CollectibleKind),
}
