//! Reading Store
//!
//! Latest soil / weather / water readings per location. The advice handler
//! only sees the `ContextSource` trait, so a database-backed source can
//! replace the in-memory `ReadingStore` without touching the advisor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::RwLock;
use thiserror::Error;

use crate::context::{SiteContext, SoilReading, WaterReading, WeatherReading};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("reading store lock poisoned")]
    Poisoned,

    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fixture JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the advice handler gets site readings from
pub trait ContextSource: Send + Sync {
    fn latest_soil(&self, location: &str) -> Result<Option<SoilReading>, StoreError>;
    fn latest_weather(&self, location: &str) -> Result<Option<WeatherReading>, StoreError>;
    fn latest_water(&self, location: &str) -> Result<Option<WaterReading>, StoreError>;
}

/// Assemble a SiteContext, treating any failed lookup as an absent reading
pub fn load_site_context(source: &dyn ContextSource, location: &str) -> SiteContext {
    SiteContext {
        soil: absent_on_error("soil", location, source.latest_soil(location)),
        weather: absent_on_error("weather", location, source.latest_weather(location)),
        water: absent_on_error("water", location, source.latest_water(location)),
    }
}

fn absent_on_error<T>(
    kind: &str,
    location: &str,
    result: Result<Option<T>, StoreError>,
) -> Option<T> {
    match result {
        Ok(reading) => reading,
        Err(e) => {
            tracing::warn!("Failed to fetch {} reading for '{}': {}", kind, location, e);
            None
        }
    }
}

/// A reading as stored, with its location and insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recorded<T> {
    pub id: u64,
    pub location: String,
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub reading: T,
}

/// A reading tagged with its location, as found in fixtures and request bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Located<T> {
    pub location: String,
    #[serde(flatten)]
    pub reading: T,
}

/// Seed data for the store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadingsFixture {
    #[serde(default)]
    pub soil: Vec<Located<SoilReading>>,
    #[serde(default)]
    pub weather: Vec<Located<WeatherReading>>,
    #[serde(default)]
    pub water: Vec<Located<WaterReading>>,
}

#[derive(Debug, Default)]
struct Tables {
    next_id: u64,
    soil: Vec<Recorded<SoilReading>>,
    weather: Vec<Recorded<WeatherReading>>,
    water: Vec<Recorded<WaterReading>>,
}

impl Tables {
    fn stamp<T>(&mut self, location: &str, reading: T) -> Recorded<T> {
        self.next_id += 1;
        Recorded {
            id: self.next_id,
            location: location.trim().to_string(),
            recorded_at: Utc::now(),
            reading,
        }
    }
}

/// In-memory reading store.
///
/// Lookups match when the stored location contains the query
/// (case-insensitive); the most recently recorded match wins.
#[derive(Debug, Default)]
pub struct ReadingStore {
    tables: RwLock<Tables>,
}

impl ReadingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixture(fixture: ReadingsFixture) -> Result<Self, StoreError> {
        let store = Self::new();
        for entry in fixture.soil {
            store.record_soil(&entry.location, entry.reading)?;
        }
        for entry in fixture.weather {
            store.record_weather(&entry.location, entry.reading)?;
        }
        for entry in fixture.water {
            store.record_water(&entry.location, entry.reading)?;
        }
        Ok(store)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let contents = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let fixture: ReadingsFixture = serde_json::from_str(&contents)?;
        Self::from_fixture(fixture)
    }

    pub fn record_soil(
        &self,
        location: &str,
        reading: SoilReading,
    ) -> Result<Recorded<SoilReading>, StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        let record = tables.stamp(location, reading);
        tables.soil.push(record.clone());
        Ok(record)
    }

    pub fn record_weather(
        &self,
        location: &str,
        reading: WeatherReading,
    ) -> Result<Recorded<WeatherReading>, StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        let record = tables.stamp(location, reading);
        tables.weather.push(record.clone());
        Ok(record)
    }

    pub fn record_water(
        &self,
        location: &str,
        reading: WaterReading,
    ) -> Result<Recorded<WaterReading>, StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        let record = tables.stamp(location, reading);
        tables.water.push(record.clone());
        Ok(record)
    }

    /// Total readings across all three tables
    pub fn reading_count(&self) -> Result<usize, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tables.soil.len() + tables.weather.len() + tables.water.len())
    }
}

fn latest_matching<T: Clone>(rows: &[Recorded<T>], location: &str) -> Option<T> {
    let needle = location.trim().to_lowercase();
    rows.iter()
        .rev()
        .find(|row| row.location.to_lowercase().contains(&needle))
        .map(|row| row.reading.clone())
}

impl ContextSource for ReadingStore {
    fn latest_soil(&self, location: &str) -> Result<Option<SoilReading>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(latest_matching(&tables.soil, location))
    }

    fn latest_weather(&self, location: &str) -> Result<Option<WeatherReading>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(latest_matching(&tables.weather, location))
    }

    fn latest_water(&self, location: &str) -> Result<Option<WaterReading>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(latest_matching(&tables.water, location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn soil(ph: f64) -> SoilReading {
        SoilReading {
            ph: Some(ph),
            ..Default::default()
        }
    }

    #[test]
    fn test_latest_reading_wins() {
        let store = ReadingStore::new();
        store.record_soil("Ludhiana", soil(6.2)).unwrap();
        store.record_soil("Ludhiana", soil(7.9)).unwrap();

        let latest = store.latest_soil("Ludhiana").unwrap().unwrap();
        assert_relative_eq!(latest.ph.unwrap(), 7.9);
    }

    #[test]
    fn test_substring_match_ignores_case() {
        let store = ReadingStore::new();
        store.record_soil("Ludhiana, Punjab", soil(6.5)).unwrap();

        assert!(store.latest_soil("ludhiana").unwrap().is_some());
        assert!(store.latest_soil("PUNJAB").unwrap().is_some());
        assert!(store.latest_soil("Amritsar").unwrap().is_none());
    }

    #[test]
    fn test_ids_increase_across_tables() {
        let store = ReadingStore::new();
        let a = store.record_soil("Patiala", soil(6.5)).unwrap();
        let b = store.record_water("Patiala", WaterReading::default()).unwrap();
        assert!(b.id > a.id);
        assert_eq!(store.reading_count().unwrap(), 2);
    }

    #[test]
    fn test_fixture_seeding() {
        let json = r#"{
            "soil": [{"location": "Bathinda", "ph": 8.1, "nitrogen": "Low"}],
            "water": [{"location": "Bathinda", "availabilityStatus": "Poor"}]
        }"#;
        let fixture: ReadingsFixture = serde_json::from_str(json).unwrap();
        let store = ReadingStore::from_fixture(fixture).unwrap();

        let ctx = load_site_context(&store, "bathinda");
        assert_relative_eq!(ctx.ph().unwrap(), 8.1);
        assert_eq!(ctx.nitrogen(), Some("Low"));
        assert!(ctx.weather.is_none());
        assert_eq!(ctx.water_status().as_deref(), Some("poor"));
    }

    struct FailingSource;

    impl ContextSource for FailingSource {
        fn latest_soil(&self, _: &str) -> Result<Option<SoilReading>, StoreError> {
            Err(StoreError::Poisoned)
        }
        fn latest_weather(&self, _: &str) -> Result<Option<WeatherReading>, StoreError> {
            Ok(Some(WeatherReading {
                temperature: Some(22.0),
                ..Default::default()
            }))
        }
        fn latest_water(&self, _: &str) -> Result<Option<WaterReading>, StoreError> {
            Err(StoreError::Poisoned)
        }
    }

    #[test]
    fn test_failed_lookup_reads_as_absent() {
        let ctx = load_site_context(&FailingSource, "Moga");
        assert!(ctx.soil.is_none());
        assert!(ctx.water.is_none());
        assert_relative_eq!(ctx.temperature().unwrap(), 22.0);
    }
}
