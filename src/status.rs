//! status.rs: three-level climate status shared by every scoring path.
//!
//! Presentation layers map the status onto exactly three fixed colors, so the
//! enum is closed: nothing outside this module may invent a fourth level.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stress level attached to every score (simulation, live, synthetic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Safe,
    Strained,
    Critical,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Safe, Status::Strained, Status::Critical];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Safe => "safe",
            Status::Strained => "strained",
            Status::Critical => "critical",
        }
    }

    /// Hex color used by badges, timeline bars and map markers.
    pub fn color_hex(self) -> &'static str {
        match self {
            Status::Safe => "#10b981",
            Status::Strained => "#f59e0b",
            Status::Critical => "#ef4444",
        }
    }

    pub fn color_name(self) -> &'static str {
        match self {
            Status::Safe => "green",
            Status::Strained => "amber",
            Status::Critical => "red",
        }
    }

    /// Short advisory line shown next to the engine output.
    pub fn advisory(self) -> &'static str {
        match self {
            Status::Critical => {
                "Dangerous conditions. Human health at risk outdoors. Energy grid stressed."
            }
            Status::Strained => {
                "Elevated risk. Exercise caution. Schedule activities for safe windows."
            }
            Status::Safe => "Conditions are within tolerance. Good time for outdoor activities.",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        let v = serde_json::to_value(Status::Strained).unwrap();
        assert_eq!(v, serde_json::json!("strained"));
        let back: Status = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(back, Status::Critical);
    }

    #[test]
    fn colors_are_distinct() {
        let mut hexes: Vec<_> = Status::ALL.iter().map(|s| s.color_hex()).collect();
        hexes.dedup();
        assert_eq!(hexes.len(), 3);
        assert_eq!(Status::Safe.color_name(), "green");
        assert_eq!(Status::Critical.color_hex(), "#ef4444");
    }
}
