//! Site context and farmer preferences
//!
//! The readings a location has on file (soil test, weather, water status)
//! and what the farmer asked for. Every field is optional: an absent value
//! means the advisor skips the rule that reads it.

use serde::{Deserialize, Serialize};

/// Latest soil test for a location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilReading {
    /// Soil pH (H2O)
    #[serde(alias = "ph_level", alias = "phLevel")]
    pub ph: Option<f64>,

    /// Qualitative N/P/K levels ("Low", "Medium", "High")
    pub nitrogen: Option<String>,
    pub phosphorus: Option<String>,
    pub potassium: Option<String>,
}

/// Latest weather observation for a location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    /// Air temperature (°C)
    pub temperature: Option<f64>,

    /// Relative humidity (%)
    pub humidity: Option<f64>,

    /// Rainfall (mm)
    pub rainfall: Option<f64>,

    /// Wind speed (km/h)
    #[serde(alias = "wind_speed")]
    pub wind_speed: Option<f64>,

    /// Free-text advisory issued with the forecast
    pub advisory: Option<String>,
}

/// Latest water-availability survey for a location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterReading {
    /// Free text such as "Adequate", "Good", "Poor - canal closed"
    #[serde(alias = "availability_status")]
    pub availability_status: Option<String>,
}

/// Everything known about the site at scoring time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteContext {
    pub soil: Option<SoilReading>,
    pub weather: Option<WeatherReading>,
    pub water: Option<WaterReading>,
}

impl SiteContext {
    pub fn ph(&self) -> Option<f64> {
        self.soil.as_ref()?.ph.filter(|v| v.is_finite())
    }

    pub fn nitrogen(&self) -> Option<&str> {
        non_blank(self.soil.as_ref()?.nitrogen.as_deref())
    }

    pub fn temperature(&self) -> Option<f64> {
        self.weather.as_ref()?.temperature.filter(|v| v.is_finite())
    }

    pub fn rainfall(&self) -> Option<f64> {
        self.weather.as_ref()?.rainfall.filter(|v| v.is_finite())
    }

    pub fn advisory(&self) -> Option<&str> {
        non_blank(self.weather.as_ref()?.advisory.as_deref())
    }

    /// Water status, lowercased for substring matching
    pub fn water_status(&self) -> Option<String> {
        non_blank(self.water.as_ref()?.availability_status.as_deref()).map(str::to_lowercase)
    }
}

/// What the farmer asked for in this request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerPreferences {
    pub soil_type: Option<String>,
    pub season: Option<String>,

    /// Crop currently in the field, discouraged to promote rotation
    pub current_crop: Option<String>,
}

impl FarmerPreferences {
    /// Trim every field and drop the blank ones
    pub fn normalized(self) -> Self {
        Self {
            soil_type: normalize(self.soil_type),
            season: normalize(self.season),
            current_crop: normalize(self.current_crop),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_context_has_no_fields() {
        let ctx = SiteContext::default();
        assert!(ctx.ph().is_none());
        assert!(ctx.nitrogen().is_none());
        assert!(ctx.temperature().is_none());
        assert!(ctx.rainfall().is_none());
        assert!(ctx.water_status().is_none());
        assert!(ctx.advisory().is_none());
    }

    #[test]
    fn test_blank_strings_read_as_absent() {
        let ctx = SiteContext {
            soil: Some(SoilReading {
                nitrogen: Some("  ".to_string()),
                ..Default::default()
            }),
            water: Some(WaterReading {
                availability_status: Some(String::new()),
            }),
            ..Default::default()
        };
        assert!(ctx.nitrogen().is_none());
        assert!(ctx.water_status().is_none());
    }

    #[test]
    fn test_soil_reading_accepts_column_name() {
        let soil: SoilReading =
            serde_json::from_str(r#"{"ph_level": 6.8, "nitrogen": "Low"}"#).unwrap();
        approx::assert_relative_eq!(soil.ph.unwrap(), 6.8);
        assert_eq!(soil.nitrogen.as_deref(), Some("Low"));
    }

    #[test]
    fn test_preferences_normalized() {
        let prefs = FarmerPreferences {
            soil_type: Some(" loamy ".to_string()),
            season: Some("".to_string()),
            current_crop: None,
        }
        .normalized();
        assert_eq!(prefs.soil_type.as_deref(), Some("loamy"));
        assert!(prefs.season.is_none());
    }
}
