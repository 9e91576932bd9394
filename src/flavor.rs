//! Flavor tagging for catalog actions based on slot position

use serde::{Deserialize, Serialize};

/// Behavioral style of a tactical action. Fixed by slot, not by content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    /// Procedural, structured approach
    Basic,
    /// Creative or playful approach
    Risky,
    /// Reflective, cautious approach
    Safe,
}

impl Flavor {
    pub const ALL: [Flavor; 3] = [Flavor::Basic, Flavor::Risky, Flavor::Safe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Flavor::Basic => "basic",
            Flavor::Risky => "risky",
            Flavor::Safe => "safe",
        }
    }

    /// Action slot 1..=3 to flavor.
    pub fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(Flavor::Basic),
            2 => Some(Flavor::Risky),
            3 => Some(Flavor::Safe),
            _ => None,
        }
    }

    pub fn slot(&self) -> u8 {
        match self {
            Flavor::Basic => 1,
            Flavor::Risky => 2,
            Flavor::Safe => 3,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Some(Flavor::Basic),
            "risky" => Some(Flavor::Risky),
            "safe" => Some(Flavor::Safe),
            _ => None,
        }
    }
}
