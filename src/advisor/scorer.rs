//! Crop Advisor - ranks the catalog for one site and one farmer
//!
//! Every candidate starts at the baseline, passes through each rule whose
//! input is present, and is clamped to 0-100. The ranking keeps the best
//! five, ties in catalog order.

use serde::{Deserialize, Serialize};

use super::advice::{diversification_options, seasonal_tips};
use super::assessment::{CropAdvice, RiskLevel, ScoredRecommendation, SuitabilityLabel};
use super::rules::{self, ScoreCard};
use crate::catalog::{Catalog, CropCandidate, Season};
use crate::context::{FarmerPreferences, SiteContext};
use crate::market::MarketSignals;

/// Most recommendations returned for one request
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Sowing window text per season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SowingWindows {
    pub kharif: String,
    pub rabi: String,

    /// Used for any season without a fixed window (currently Zaid)
    pub fallback: String,
}

impl SowingWindows {
    pub const DEFAULT_FALLBACK: &'static str = "Consult local sowing calendar";

    pub fn with_fallback(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
            ..Self::default()
        }
    }

    pub fn for_season(&self, season: Season) -> &str {
        match season {
            Season::Kharif => &self.kharif,
            Season::Rabi => &self.rabi,
            Season::Zaid => &self.fallback,
        }
    }
}

impl Default for SowingWindows {
    fn default() -> Self {
        Self {
            kharif: "June–July".to_string(),
            rabi: "Oct–Nov".to_string(),
            fallback: Self::DEFAULT_FALLBACK.to_string(),
        }
    }
}

/// Tunables that are not part of the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorOptions {
    pub sowing_windows: SowingWindows,
}

/// Catalog, market table and options bundled for repeated scoring.
///
/// Holds no mutable state; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct CropAdvisor {
    catalog: Catalog,
    market: MarketSignals,
    options: AdvisorOptions,
}

impl CropAdvisor {
    pub fn new(catalog: Catalog, market: MarketSignals, options: AdvisorOptions) -> Self {
        Self {
            catalog,
            market,
            options,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn market(&self) -> &MarketSignals {
        &self.market
    }

    pub fn options(&self) -> &AdvisorOptions {
        &self.options
    }

    /// Ranked recommendations, best first, at most five.
    ///
    /// Blank preference strings count as absent.
    pub fn rank(
        &self,
        context: &SiteContext,
        prefs: &FarmerPreferences,
    ) -> Vec<ScoredRecommendation> {
        let prefs = prefs.clone().normalized();
        let water_status = context.water_status();

        let mut ranked: Vec<ScoredRecommendation> = self
            .catalog
            .candidates()
            .iter()
            .map(|crop| self.score_candidate(crop, context, water_status.as_deref(), &prefs))
            .collect();

        // Stable sort keeps catalog order among equal scores
        ranked.sort_by(|a, b| b.suitability_score.cmp(&a.suitability_score));
        ranked.truncate(MAX_RECOMMENDATIONS);
        ranked
    }

    /// Ranking plus diversification options and seasonal tips
    pub fn advise(&self, context: &SiteContext, prefs: &FarmerPreferences) -> CropAdvice {
        let recommended_crops = self.rank(context, prefs);
        let diversification_options = diversification_options(recommended_crops.first());
        let seasonal_tips = seasonal_tips(context);

        CropAdvice {
            recommended_crops,
            diversification_options,
            seasonal_tips,
        }
    }

    fn score_candidate(
        &self,
        crop: &CropCandidate,
        context: &SiteContext,
        water_status: Option<&str>,
        prefs: &FarmerPreferences,
    ) -> ScoredRecommendation {
        let mut card = ScoreCard::new();

        if let Some(soil_type) = prefs.soil_type.as_deref() {
            rules::soil_type(&mut card, crop, soil_type);
        }
        if let Some(season) = prefs.season.as_deref() {
            rules::season(&mut card, crop, season);
        }
        if let Some(ph) = context.ph() {
            rules::soil_ph(&mut card, crop, ph);
        }
        if let Some(nitrogen) = context.nitrogen() {
            rules::nitrogen(&mut card, crop, nitrogen);
        }
        if let Some(temp) = context.temperature() {
            rules::temperature(&mut card, crop, temp);
        }
        if let Some(rain) = context.rainfall() {
            rules::rainfall(&mut card, crop, rain);
        }
        if let Some(status) = water_status {
            rules::water_availability(&mut card, crop, status);
        }

        let trend = self.market.trend_for(&crop.market_key);
        rules::market(&mut card, trend);

        if let Some(current) = prefs.current_crop.as_deref() {
            rules::rotation(&mut card, crop, current);
        }

        let (score, rationale) = card.finish();
        let suitability = SuitabilityLabel::from_score(score);

        ScoredRecommendation {
            name: crop.name.clone(),
            suitability,
            suitability_score: score,
            expected_yield: crop.expected_yield.clone(),
            season: crop.season,
            water_need: crop.water_need,
            risk: RiskLevel::assess(crop.water_need, water_status, suitability),
            market_signal: trend,
            rationale,
            sowing_window: self.options.sowing_windows.for_season(crop.season).to_string(),
            inputs: crop.inputs.clone(),
        }
    }
}

/// Rank `catalog` with the default market table and options
pub fn score(
    catalog: &Catalog,
    context: &SiteContext,
    prefs: &FarmerPreferences,
) -> Vec<ScoredRecommendation> {
    score_with(catalog, &MarketSignals::default(), context, prefs, &AdvisorOptions::default())
}

pub fn score_with(
    catalog: &Catalog,
    market: &MarketSignals,
    context: &SiteContext,
    prefs: &FarmerPreferences,
    options: &AdvisorOptions,
) -> Vec<ScoredRecommendation> {
    CropAdvisor::new(catalog.clone(), market.clone(), options.clone()).rank(context, prefs)
}

pub fn advise(
    catalog: &Catalog,
    market: &MarketSignals,
    context: &SiteContext,
    prefs: &FarmerPreferences,
    options: &AdvisorOptions,
) -> CropAdvice {
    CropAdvisor::new(catalog.clone(), market.clone(), options.clone()).advise(context, prefs)
}
