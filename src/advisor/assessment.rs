//! Recommendation Types
//!
//! Output structures for the advisor: one ScoredRecommendation per ranked
//! crop, wrapped in a CropAdvice with the follow-up suggestions.

use serde::{Deserialize, Serialize};

use crate::catalog::{Season, WaterNeed};
use crate::market::MarketTrend;

/// Score at or above which a crop is rated High
pub const HIGH_THRESHOLD: u8 = 75;

/// Score at or above which a crop is rated Medium
pub const MEDIUM_THRESHOLD: u8 = 55;

/// Suitability label derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SuitabilityLabel {
    Low,
    Medium,
    High,
}

impl SuitabilityLabel {
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_THRESHOLD {
            SuitabilityLabel::High
        } else if score >= MEDIUM_THRESHOLD {
            SuitabilityLabel::Medium
        } else {
            SuitabilityLabel::Low
        }
    }
}

/// Cultivation risk shown next to a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// High for a thirsty crop on a site reporting poor water, otherwise
    /// Medium when the crop itself rated Low.
    pub fn assess(
        water_need: WaterNeed,
        water_status: Option<&str>,
        label: SuitabilityLabel,
    ) -> Self {
        let poor_water = water_status.is_some_and(|s| s.contains("poor"));
        if water_need == WaterNeed::High && poor_water {
            RiskLevel::High
        } else if label == SuitabilityLabel::Low {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// One ranked crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecommendation {
    pub name: String,

    pub suitability: SuitabilityLabel,

    /// Clamped to 0-100
    pub suitability_score: u8,

    pub expected_yield: String,
    pub season: Season,
    pub water_need: WaterNeed,
    pub risk: RiskLevel,
    pub market_signal: MarketTrend,

    /// One entry per scoring adjustment, in rule order
    pub rationale: Vec<String>,

    pub sowing_window: String,
    pub inputs: Vec<String>,
}

/// Complete advice for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropAdvice {
    /// Sorted by score, best first
    pub recommended_crops: Vec<ScoredRecommendation>,

    pub diversification_options: Vec<String>,

    pub seasonal_tips: Vec<String>,
}

impl CropAdvice {
    pub fn top_pick(&self) -> Option<&ScoredRecommendation> {
        self.recommended_crops.first()
    }
}
