//! Server configuration from environment variables
//!
//! PORT, CATALOG_PATH, READINGS_PATH, FALLBACK_SOWING_WINDOW.

use std::path::PathBuf;

use crate::advisor::{AdvisorOptions, SowingWindows};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,

    /// JSON catalog replacing the built-in five crops
    pub catalog_path: Option<PathBuf>,

    /// JSON fixture used to seed the reading store
    pub readings_path: Option<PathBuf>,

    pub advisor: AdvisorOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            catalog_path: None,
            readings_path: None,
            advisor: AdvisorOptions::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid PORT '{}', using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let sowing_windows = match get("FALLBACK_SOWING_WINDOW") {
            Some(fallback) => SowingWindows::with_fallback(fallback.trim()),
            None => SowingWindows::default(),
        };

        Self {
            port,
            catalog_path: get("CATALOG_PATH").map(PathBuf::from),
            readings_path: get("READINGS_PATH").map(PathBuf::from),
            advisor: AdvisorOptions { sowing_windows },
        }
    }

    pub fn log_summary(&self) {
        tracing::info!("Configuration:");
        tracing::info!("  PORT: {}", self.port);
        tracing::info!("  CATALOG_PATH: {}", display_opt(&self.catalog_path));
        tracing::info!("  READINGS_PATH: {}", display_opt(&self.readings_path));
        tracing::info!("  FALLBACK_SOWING_WINDOW: {}", self.advisor.sowing_windows.fallback);
    }
}

fn display_opt(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(built-in)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config_from(&[]), ServerConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("CATALOG_PATH", "data/catalog.json"),
            ("FALLBACK_SOWING_WINDOW", "Feb–Mar"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.catalog_path, Some(PathBuf::from("data/catalog.json")));
        assert!(config.readings_path.is_none());
        assert_eq!(config.advisor.sowing_windows.fallback, "Feb–Mar");
    }

    #[test]
    fn test_invalid_port_falls_back() {
        assert_eq!(config_from(&[("PORT", "not-a-port")]).port, DEFAULT_PORT);
    }
}
