//! Market signal lookup
//!
//! Maps a candidate's market key to the current price trend. Keys missing
//! from the table read as `Stable`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Direction of recent mandi prices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketTrend {
    Up,
    #[default]
    Stable,
    Down,
}

impl MarketTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketTrend::Up => "up",
            MarketTrend::Stable => "stable",
            MarketTrend::Down => "down",
        }
    }

    /// Score adjustment applied by the advisor
    pub fn score_delta(&self) -> i32 {
        match self {
            MarketTrend::Up => 5,
            MarketTrend::Stable => 0,
            MarketTrend::Down => -5,
        }
    }

    pub fn rationale(&self) -> &'static str {
        match self {
            MarketTrend::Up => "Market trend: rising prices",
            MarketTrend::Stable => "Market trend: stable",
            MarketTrend::Down => "Market trend: falling prices",
        }
    }
}

/// Market key -> trend table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketSignals {
    trends: FxHashMap<String, MarketTrend>,
}

impl MarketSignals {
    pub fn new() -> Self {
        Self {
            trends: FxHashMap::default(),
        }
    }

    pub fn with(mut self, key: &str, trend: MarketTrend) -> Self {
        self.insert(key, trend);
        self
    }

    pub fn insert(&mut self, key: &str, trend: MarketTrend) {
        self.trends.insert(key.to_lowercase(), trend);
    }

    /// Trend for a market key (case-insensitive), `Stable` if unknown
    pub fn trend_for(&self, key: &str) -> MarketTrend {
        self.trends
            .get(&key.to_lowercase())
            .copied()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.trends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trends.is_empty()
    }
}

impl Default for MarketSignals {
    /// Mirrors the trends published on the market-prices page
    fn default() -> Self {
        Self::new()
            .with("wheat", MarketTrend::Up)
            .with("rice", MarketTrend::Stable)
            .with("mustard", MarketTrend::Down)
            .with("gram", MarketTrend::Up)
            .with("corn", MarketTrend::Stable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let signals = MarketSignals::default();
        assert_eq!(signals.len(), 5);
        assert_eq!(signals.trend_for("wheat"), MarketTrend::Up);
        assert_eq!(signals.trend_for("Mustard"), MarketTrend::Down);
        assert_eq!(signals.trend_for("corn"), MarketTrend::Stable);
    }

    #[test]
    fn test_unknown_key_is_stable() {
        assert_eq!(MarketSignals::default().trend_for("saffron"), MarketTrend::Stable);
        assert_eq!(MarketSignals::new().trend_for("wheat"), MarketTrend::Stable);
    }

    #[test]
    fn test_serializes_lowercase() {
        let signals = MarketSignals::new().with("gram", MarketTrend::Up);
        let json = serde_json::to_value(&signals).unwrap();
        assert_eq!(json["gram"], "up");
    }
}
