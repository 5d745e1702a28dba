//! Advice Generation
//!
//! Follow-up suggestions attached to a ranking: diversification ideas built
//! around the top pick, and seasonal tips drawn from the site readings.

use super::assessment::ScoredRecommendation;
use super::comparator::PhBand;
use crate::context::SiteContext;

/// Tips appended to every response
const STANDING_TIPS: [&str; 2] = [
    "Use certified seeds and treat seeds before sowing",
    "Plan irrigation based on 3–5 day weather forecast",
];

/// Diversification ideas for the top-ranked crop.
///
/// Falls back to generic cereal/legume advice when nothing was ranked.
pub fn diversification_options(top: Option<&ScoredRecommendation>) -> Vec<String> {
    match top {
        Some(top) => vec![
            format!(
                "Intercrop {} with a short-duration legume (e.g., Cowpea/Gram)",
                top.name
            ),
            format!(
                "Rotate {} next season with a contrasting crop to improve soil health",
                top.name
            ),
            "Adopt kitchen/vegetable garden for additional income".to_string(),
            "Consider small area for high-margin horticulture if water allows".to_string(),
        ],
        None => vec![
            "Intercropping cereals with legumes to improve nitrogen".to_string(),
            "Adopt crop rotation to break pest cycles".to_string(),
            "Pilot a small area for high-value vegetables".to_string(),
        ],
    }
}

/// Weather advisory first, then a soil amendment tip, then the standing tips
pub fn seasonal_tips(context: &SiteContext) -> Vec<String> {
    let mut tips = Vec::new();

    if let Some(advisory) = context.advisory() {
        tips.push(advisory.to_string());
    }

    if let Some(ph) = context.ph() {
        match PhBand::classify(ph) {
            PhBand::Acidic => {
                tips.push("Soil acidic: Apply lime (2 t/acre) before sowing".to_string())
            }
            PhBand::Alkaline => {
                tips.push("Soil alkaline: Add organic matter/FYM and elemental sulfur".to_string())
            }
            PhBand::Optimal => {}
        }
    }

    tips.extend(STANDING_TIPS.iter().map(|t| t.to_string()));
    tips
}
