//! Scoring Rules
//!
//! One function per adjustment. Each rule is only called when the input it
//! reads is present; absent inputs leave the card untouched.

use super::comparator::{compare_to_range, PhBand, RangeFit};
use crate::catalog::{CropCandidate, PhTolerance, WaterNeed};
use crate::market::MarketTrend;

/// Starting score for every candidate
pub const BASELINE_SCORE: i32 = 50;

/// Running score plus the reasons behind each adjustment
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    points: i32,
    rationale: Vec<String>,
}

impl ScoreCard {
    pub fn new() -> Self {
        Self {
            points: BASELINE_SCORE,
            rationale: Vec::new(),
        }
    }

    pub fn adjust(&mut self, delta: i32, reason: impl Into<String>) {
        self.points += delta;
        self.rationale.push(reason.into());
    }

    /// Unclamped running total
    pub fn points(&self) -> i32 {
        self.points
    }

    pub fn rationale(&self) -> &[String] {
        &self.rationale
    }

    /// Clamp to 0-100 and hand back the rationale
    pub fn finish(self) -> (u8, Vec<String>) {
        (self.points.clamp(0, 100) as u8, self.rationale)
    }
}

impl Default for ScoreCard {
    fn default() -> Self {
        Self::new()
    }
}

pub fn soil_type(card: &mut ScoreCard, crop: &CropCandidate, soil_type: &str) {
    if crop.suits_soil(soil_type) {
        card.adjust(10, format!("Matches soil type: {}", soil_type));
    } else {
        card.adjust(-5, format!("Less suitable for soil type: {}", soil_type));
    }
}

pub fn season(card: &mut ScoreCard, crop: &CropCandidate, season: &str) {
    if crop.season.matches(season) {
        card.adjust(10, format!("In-season crop ({})", crop.season.as_str()));
    } else {
        card.adjust(-5, format!("Out-of-season vs preferred {}", crop.season.as_str()));
    }
}

pub fn soil_ph(card: &mut ScoreCard, crop: &CropCandidate, ph: f64) {
    match (PhBand::classify(ph), crop.ph_tolerance) {
        (PhBand::Optimal, _) => card.adjust(5, "Optimal pH (6.0–7.5)"),
        (PhBand::Acidic, PhTolerance::Acidic) => {
            card.adjust(3, format!("Acidic soil tolerable for {}", crop.name.to_lowercase()))
        }
        (PhBand::Acidic, _) => card.adjust(-4, "Acidic soil: apply lime and prefer tolerant crops"),
        (PhBand::Alkaline, PhTolerance::Alkaline) => card.adjust(
            3,
            format!("Slightly alkaline soil okay for {}", crop.name.to_lowercase()),
        ),
        (PhBand::Alkaline, _) => card.adjust(-4, "Alkaline soil: add organic matter/sulfur"),
    }
}

/// Only a "low" nitrogen reading triggers an adjustment
pub fn nitrogen(card: &mut ScoreCard, crop: &CropCandidate, nitrogen: &str) {
    if !nitrogen.trim().eq_ignore_ascii_case("low") {
        return;
    }
    if crop.fixes_nitrogen {
        card.adjust(6, format!("Low nitrogen: prefer legumes like {}", crop.name.to_lowercase()));
    } else {
        card.adjust(-2, "Low nitrogen may reduce yield");
    }
}

pub fn temperature(card: &mut ScoreCard, crop: &CropCandidate, temp: f64) {
    if compare_to_range(temp, crop.temp_range).is_within_range() {
        card.adjust(8, format!("Temperature suitable ({}°C)", temp));
    } else {
        card.adjust(-5, format!("Temperature suboptimal ({}°C)", temp));
    }
}

pub fn rainfall(card: &mut ScoreCard, crop: &CropCandidate, rain: f64) {
    match compare_to_range(rain, crop.rainfall_range) {
        RangeFit::WithinRange => card.adjust(8, format!("Rainfall suitable ({} mm)", rain)),
        RangeFit::BelowRange if crop.water_need == WaterNeed::Low => {
            card.adjust(2, format!("Low rainfall ({} mm) but crop is low water-need", rain))
        }
        RangeFit::BelowRange => {
            card.adjust(-6, format!("Low rainfall ({} mm) vs higher water need", rain))
        }
        RangeFit::AboveRange => {
            card.adjust(-3, format!("High rainfall ({} mm) may increase disease risk", rain))
        }
    }
}

/// `status` is expected lowercased. "adequate"/"good" wins over "poor"/"low"
/// when both appear; anything else is ignored.
pub fn water_availability(card: &mut ScoreCard, crop: &CropCandidate, status: &str) {
    if status.contains("adequate") || status.contains("good") {
        card.adjust(5, "Adequate water availability");
    } else if status.contains("poor") || status.contains("low") {
        match crop.water_need {
            WaterNeed::High => card.adjust(-10, "Poor water availability vs high water need"),
            WaterNeed::Low => card.adjust(5, "Poor water availability favors low water-need crops"),
            WaterNeed::Medium => card.adjust(-4, "Limited water may constrain yield"),
        }
    }
}

/// Always leaves a rationale entry, even for a stable market
pub fn market(card: &mut ScoreCard, trend: MarketTrend) {
    card.adjust(trend.score_delta(), trend.rationale());
}

pub fn rotation(card: &mut ScoreCard, crop: &CropCandidate, current_crop: &str) {
    if crop.is_named(current_crop) {
        card.adjust(-3, "Promote crop rotation: slightly penalized current crop");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{gram, maize, mustard, rice, wheat};

    fn run(rule: impl Fn(&mut ScoreCard)) -> ScoreCard {
        let mut card = ScoreCard::new();
        rule(&mut card);
        card
    }

    #[test]
    fn test_card_clamps() {
        let mut card = ScoreCard::new();
        card.adjust(80, "boost");
        assert_eq!(card.clone().finish().0, 100);
        card.adjust(-200, "drop");
        assert_eq!(card.points(), -70);
        assert_eq!(card.finish().0, 0);
    }

    #[test]
    fn test_soil_type_match_and_mismatch() {
        let card = run(|c| soil_type(c, &wheat(), "Loamy"));
        assert_eq!(card.points(), 60);
        assert_eq!(card.rationale(), ["Matches soil type: Loamy"]);

        let card = run(|c| soil_type(c, &rice(), "sandy"));
        assert_eq!(card.points(), 45);
    }

    #[test]
    fn test_season_rule() {
        assert_eq!(run(|c| season(c, &rice(), "kharif")).points(), 60);
        let card = run(|c| season(c, &wheat(), "Kharif"));
        assert_eq!(card.points(), 45);
        assert_eq!(card.rationale()[0], "Out-of-season vs preferred Rabi");
    }

    #[test]
    fn test_ph_archetypes() {
        assert_eq!(run(|c| soil_ph(c, &wheat(), 6.5)).points(), 55);
        assert_eq!(run(|c| soil_ph(c, &rice(), 5.5)).points(), 53);
        assert_eq!(run(|c| soil_ph(c, &wheat(), 5.5)).points(), 46);
        assert_eq!(run(|c| soil_ph(c, &mustard(), 8.0)).points(), 53);
        assert_eq!(run(|c| soil_ph(c, &gram(), 8.0)).points(), 53);
        assert_eq!(run(|c| soil_ph(c, &rice(), 8.0)).points(), 46);
    }

    #[test]
    fn test_nitrogen_only_when_low() {
        assert_eq!(run(|c| nitrogen(c, &gram(), "LOW")).points(), 56);
        assert_eq!(run(|c| nitrogen(c, &wheat(), "low")).points(), 48);

        let card = run(|c| nitrogen(c, &wheat(), "Medium"));
        assert_eq!(card.points(), 50);
        assert!(card.rationale().is_empty());
    }

    #[test]
    fn test_temperature_includes_value() {
        let card = run(|c| temperature(c, &wheat(), 25.0));
        assert_eq!(card.points(), 58);
        assert_eq!(card.rationale()[0], "Temperature suitable (25°C)");

        let card = run(|c| temperature(c, &wheat(), 31.5));
        assert_eq!(card.points(), 45);
        assert!(card.rationale()[0].contains("31.5"));
    }

    #[test]
    fn test_rainfall_branches() {
        assert_eq!(run(|c| rainfall(c, &maize(), 100.0)).points(), 58);
        assert_eq!(run(|c| rainfall(c, &mustard(), 10.0)).points(), 52);
        assert_eq!(run(|c| rainfall(c, &rice(), 10.0)).points(), 44);

        let card = run(|c| rainfall(c, &wheat(), 120.0));
        assert_eq!(card.points(), 47);
        assert!(card.rationale()[0].contains("disease risk"));
    }

    #[test]
    fn test_water_availability() {
        assert_eq!(run(|c| water_availability(c, &rice(), "adequate")).points(), 55);
        assert_eq!(run(|c| water_availability(c, &rice(), "poor")).points(), 40);
        assert_eq!(run(|c| water_availability(c, &gram(), "low")).points(), 55);
        assert_eq!(run(|c| water_availability(c, &wheat(), "poor")).points(), 46);

        assert_eq!(run(|c| water_availability(c, &rice(), "low but adequate")).points(), 55);
        assert_eq!(run(|c| water_availability(c, &wheat(), "good, canal poor")).points(), 55);

        let card = run(|c| water_availability(c, &wheat(), "unknown"));
        assert!(card.rationale().is_empty());
    }

    #[test]
    fn test_market_always_noted() {
        let card = run(|c| market(c, MarketTrend::Stable));
        assert_eq!(card.points(), 50);
        assert_eq!(card.rationale(), ["Market trend: stable"]);
    }

    #[test]
    fn test_rotation() {
        assert_eq!(run(|c| rotation(c, &wheat(), "wheat")).points(), 47);
        assert!(run(|c| rotation(c, &wheat(), "rice")).rationale().is_empty());
    }
}
