//! Candidate crop catalog
//!
//! Defines the CropCandidate record the advisor ranks, plus the built-in
//! five-crop catalog used by the Punjab deployment. Custom catalogs can be
//! loaded from JSON with the same field names.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Cropping season a candidate is sown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    /// Monsoon crop, sown with the first rains
    Kharif,
    /// Winter crop, sown after the monsoon withdraws
    Rabi,
    /// Short summer crop between Rabi harvest and Kharif sowing
    Zaid,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Zaid => "Zaid",
        }
    }

    /// Case-insensitive comparison against free-text user input
    pub fn matches(&self, input: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(input.trim())
    }
}

/// Qualitative irrigation requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaterNeed {
    Low,
    Medium,
    High,
}

impl WaterNeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaterNeed::Low => "Low",
            WaterNeed::Medium => "Medium",
            WaterNeed::High => "High",
        }
    }
}

/// Soil reaction the crop tolerates outside the 6.0-7.5 optimum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhTolerance {
    #[default]
    Neutral,
    /// Tolerates pH below 6.0 (paddy-type crops)
    Acidic,
    /// Tolerates pH above 7.5 (mustard, gram)
    Alkaline,
}

/// A crop the advisor can recommend.
///
/// Ranges are inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropCandidate {
    pub name: String,

    pub season: Season,

    /// Compatible soil types, lowercase (e.g. "loamy", "clay")
    pub soils: SmallVec<[String; 4]>,

    pub water_need: WaterNeed,

    /// Display text, e.g. "40-45 quintals/hectare"
    pub expected_yield: String,

    /// Suitable temperature (°C)
    pub temp_range: (f64, f64),

    /// Suitable rainfall (mm)
    pub rainfall_range: (f64, f64),

    /// Key into the market signal table
    pub market_key: String,

    /// Inputs the farmer needs to arrange
    pub inputs: Vec<String>,

    #[serde(default)]
    pub ph_tolerance: PhTolerance,

    /// Legume that fixes its own nitrogen
    #[serde(default)]
    pub fixes_nitrogen: bool,
}

impl CropCandidate {
    /// Case-insensitive soil-type membership
    pub fn suits_soil(&self, soil_type: &str) -> bool {
        let wanted = soil_type.trim().to_lowercase();
        self.soils.iter().any(|s| s.to_lowercase() == wanted)
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

/// Errors raised while loading a custom catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("crop '{crop}' has an inverted {field} range ({min} > {max})")]
    InvertedRange {
        crop: String,
        field: &'static str,
        min: f64,
        max: f64,
    },
}

/// Ordered, immutable list of candidates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    candidates: Vec<CropCandidate>,
}

impl Catalog {
    pub fn new(candidates: Vec<CropCandidate>) -> Result<Self, CatalogError> {
        for crop in &candidates {
            check_range(crop, "temperature", crop.temp_range)?;
            check_range(crop, "rainfall", crop.rainfall_range)?;
        }
        Ok(Self { candidates })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let candidates: Vec<CropCandidate> = serde_json::from_str(json)?;
        Self::new(candidates)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn candidates(&self) -> &[CropCandidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
        }
    }
}

fn check_range(
    crop: &CropCandidate,
    field: &'static str,
    (min, max): (f64, f64),
) -> Result<(), CatalogError> {
    if min > max {
        return Err(CatalogError::InvertedRange {
            crop: crop.name.clone(),
            field,
            min,
            max,
        });
    }
    Ok(())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Built-in Catalog
// ============================================================================

/// Wheat - staple Rabi cereal
pub fn wheat() -> CropCandidate {
    CropCandidate {
        name: "Wheat".to_string(),
        season: Season::Rabi,
        soils: smallvec!["loamy".to_string(), "clay".to_string()],
        water_need: WaterNeed::Medium,
        expected_yield: "40-45 quintals/hectare".to_string(),
        temp_range: (10.0, 25.0),
        rainfall_range: (0.0, 80.0),
        market_key: "wheat".to_string(),
        inputs: strings(&["Certified seed", "DAP/Urea", "Timely irrigation"]),
        ph_tolerance: PhTolerance::Neutral,
        fixes_nitrogen: false,
    }
}

/// Rice - puddled paddy, tolerates acidic soil
pub fn rice() -> CropCandidate {
    CropCandidate {
        name: "Rice".to_string(),
        season: Season::Kharif,
        soils: smallvec!["clay".to_string(), "silty".to_string()],
        water_need: WaterNeed::High,
        expected_yield: "50-60 quintals/hectare".to_string(),
        temp_range: (20.0, 35.0),
        rainfall_range: (100.0, 300.0),
        market_key: "rice".to_string(),
        inputs: strings(&["Paddy seedlings", "FYM", "Standing water management"]),
        ph_tolerance: PhTolerance::Acidic,
        fixes_nitrogen: false,
    }
}

/// Mustard - oilseed, copes with slightly alkaline soil
pub fn mustard() -> CropCandidate {
    CropCandidate {
        name: "Mustard".to_string(),
        season: Season::Rabi,
        soils: smallvec!["loamy".to_string(), "sandy".to_string()],
        water_need: WaterNeed::Low,
        expected_yield: "12-20 quintals/hectare".to_string(),
        temp_range: (10.0, 25.0),
        rainfall_range: (20.0, 60.0),
        market_key: "mustard".to_string(),
        inputs: strings(&["Quality seed", "Basal fertilizer", "One irrigation"]),
        ph_tolerance: PhTolerance::Alkaline,
        fixes_nitrogen: false,
    }
}

/// Gram (chickpea) - legume, fixes nitrogen
pub fn gram() -> CropCandidate {
    CropCandidate {
        name: "Gram".to_string(),
        season: Season::Rabi,
        soils: smallvec!["sandy".to_string(), "loamy".to_string()],
        water_need: WaterNeed::Low,
        expected_yield: "15-20 quintals/hectare".to_string(),
        temp_range: (15.0, 25.0),
        rainfall_range: (20.0, 60.0),
        market_key: "gram".to_string(),
        inputs: strings(&["Seed inoculation", "Low irrigation", "Weed control"]),
        ph_tolerance: PhTolerance::Alkaline,
        fixes_nitrogen: true,
    }
}

/// Maize - Kharif cereal, traded as "corn"
pub fn maize() -> CropCandidate {
    CropCandidate {
        name: "Maize".to_string(),
        season: Season::Kharif,
        soils: smallvec!["loamy".to_string(), "silty".to_string()],
        water_need: WaterNeed::Medium,
        expected_yield: "30-40 quintals/hectare".to_string(),
        temp_range: (20.0, 30.0),
        rainfall_range: (50.0, 150.0),
        market_key: "corn".to_string(),
        inputs: strings(&["Fertilizer management", "2-3 irrigations", "Pest monitoring"]),
        ph_tolerance: PhTolerance::Neutral,
        fixes_nitrogen: false,
    }
}

/// Get all built-in candidates, in catalog order
pub fn default_candidates() -> Vec<CropCandidate> {
    vec![wheat(), rice(), mustard(), gram(), maize()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_order() {
        let names: Vec<_> = Catalog::default()
            .candidates()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(names, vec!["Wheat", "Rice", "Mustard", "Gram", "Maize"]);
    }

    #[test]
    fn test_soil_match_ignores_case() {
        let wheat = wheat();
        assert!(wheat.suits_soil("Loamy"));
        assert!(wheat.suits_soil(" CLAY "));
        assert!(!wheat.suits_soil("sandy"));
    }

    #[test]
    fn test_season_matches() {
        assert!(Season::Rabi.matches("rabi"));
        assert!(Season::Kharif.matches("KHARIF"));
        assert!(!Season::Kharif.matches("Rabi"));
    }

    #[test]
    fn test_json_catalog_defaults_archetypes() {
        let json = r#"[{
            "name": "Barley",
            "season": "Rabi",
            "soils": ["loamy"],
            "waterNeed": "Low",
            "expectedYield": "25-30 quintals/hectare",
            "tempRange": [12, 24],
            "rainfallRange": [20, 70],
            "marketKey": "barley",
            "inputs": ["Seed"]
        }]"#;

        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        let barley = &catalog.candidates()[0];
        assert_eq!(barley.ph_tolerance, PhTolerance::Neutral);
        assert!(!barley.fixes_nitrogen);
        assert_eq!(barley.temp_range, (12.0, 24.0));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut crop = wheat();
        crop.rainfall_range = (90.0, 10.0);
        let err = Catalog::new(vec![crop]).unwrap_err();
        assert!(matches!(err, CatalogError::InvertedRange { field: "rainfall", .. }));
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = Catalog::from_json_str("[]").unwrap();
        assert!(catalog.is_empty());
    }
}
