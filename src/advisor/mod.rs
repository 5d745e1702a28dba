//! Crop Suitability Advisor
//!
//! Ranks a catalog of candidate crops against one site's readings and one
//! farmer's preferences, explaining every score adjustment.
//!
//! ## Key Concept
//! Scoring is a pure, single pass over the catalog. A missing reading or
//! preference skips its rule entirely; nothing is substituted. The advisor
//! cannot fail: an empty catalog simply yields an empty ranking.
//!
//! ## Architecture
//! - `comparator.rs` - Inclusive range comparison and pH bands
//! - `rules.rs` - ScoreCard plus one function per scoring rule
//! - `assessment.rs` - ScoredRecommendation / CropAdvice output structs
//! - `advice.rs` - Diversification options and seasonal tips
//! - `scorer.rs` - CropAdvisor: runs the rules, ranks, truncates

pub mod comparator;
pub mod rules;
pub mod assessment;
pub mod advice;
pub mod scorer;

// Re-export public API
pub use comparator::{RangeFit, PhBand, compare_to_range};
pub use rules::{ScoreCard, BASELINE_SCORE};
pub use assessment::{
    CropAdvice,
    RiskLevel,
    ScoredRecommendation,
    SuitabilityLabel,
    HIGH_THRESHOLD,
    MEDIUM_THRESHOLD,
};
pub use scorer::{
    advise, score, score_with, AdvisorOptions, CropAdvisor, SowingWindows, MAX_RECOMMENDATIONS,
};
