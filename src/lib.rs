//! Krishi Crop Advisor
//!
//! Ranks candidate crops for a farm by suitability and explains each score.
//!
//! - `catalog`: Candidate crops and the built-in five-crop catalog
//! - `market`: Market trend lookup per crop
//! - `context`: Site readings (soil, weather, water) and farmer preferences
//! - `advisor/`: The suitability scorer and advice generation
//! - `cli`: Argument parsing and request loading for the `advise` binary
//!
//! With the `api` feature:
//! - `store`: Latest-reading store behind the `ContextSource` trait
//! - `config`: Environment configuration for the server
//! - `api_server`: Axum router and handlers

pub mod catalog;
pub mod market;
pub mod context;
pub mod advisor;
pub mod cli;

#[cfg(feature = "api")]
pub mod store;
#[cfg(feature = "api")]
pub mod config;
#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, CropCandidate, PhTolerance, Season, WaterNeed};
pub use market::{MarketSignals, MarketTrend};
pub use context::{FarmerPreferences, SiteContext, SoilReading, WaterReading, WeatherReading};
pub use advisor::{
    advise, score, score_with, AdvisorOptions, CropAdvice, CropAdvisor, RiskLevel,
    ScoredRecommendation, SowingWindows, SuitabilityLabel,
};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
#[cfg(feature = "api")]
pub use config::ServerConfig;
