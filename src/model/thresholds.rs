use serde::{Deserialize, Serialize};

use crate::model::risk::ConfidenceLevel;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub matched_floor: f64,
    pub default_floor: f64,
    pub unmapped_base_confidence: f64,
    pub level_high: f64,
    pub level_medium: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            matched_floor: 0.70,
            default_floor: 0.40,
            unmapped_base_confidence: 0.30,
            level_high: 0.80,
            level_medium: 0.50,
        }
    }
}

impl Thresholds {
    pub fn confidence_level(&self, score: f64) -> ConfidenceLevel {
        if score >= self.level_high {
            ConfidenceLevel::High
        } else if score >= self.level_medium {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}
