// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::classify::DEFAULT_CUTOFF_KM;
use crate::explore::{DEFAULT_HISTOGRAM_BINS, DEFAULT_TOP_EQUIPMENT};
use crate::RouteError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Session defaults. Every field can be overridden on the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub data_dir: PathBuf,
    pub cutoff_km: f64,
    pub internal_only: bool,
    pub top_n: usize,
    pub histogram_bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("downloads"),
            cutoff_km: DEFAULT_CUTOFF_KM,
            internal_only: false,
            top_n: DEFAULT_TOP_EQUIPMENT,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl AnalysisConfig {
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("org", "route-oxide", "Route-Oxide")
            .map(|dirs| dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("route-oxide.json"))
    }

    /// Reads the config file. A missing or unreadable file yields the defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!("No config file, using defaults — path={}", path.display());
            return Self::default();
        }

        match std::fs::read_to_string(path)
            .map_err(RouteError::from)
            .and_then(|s| Self::from_json(&s))
        {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config file — path={} error={}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_json(content: &str) -> Result<Self, RouteError> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| RouteError::Config(e.to_string()))?;
        if !config.cutoff_km.is_finite() || config.cutoff_km < 0.0 {
            return Err(RouteError::Config(format!(
                "cutoff_km must be a non-negative number, got {}",
                config.cutoff_km
            )));
        }
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), RouteError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            serde_json::to_string_pretty(self).map_err(|e| RouteError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = AnalysisConfig::from_json(r#"{ "cutoff_km": 750.0 }"#).unwrap();
        assert_eq!(config.cutoff_km, 750.0);
        assert_eq!(config.top_n, 5);
        assert_eq!(config.histogram_bins, 30);
    }

    #[test]
    fn test_negative_cutoff_rejected() {
        assert!(AnalysisConfig::from_json(r#"{ "cutoff_km": -1.0 }"#).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AnalysisConfig {
            internal_only: true,
            ..Default::default()
        };

        config.save(&path).unwrap();
        assert_eq!(AnalysisConfig::load(&path), config);
    }

    #[test]
    fn test_garbage_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(AnalysisConfig::load(&path), AnalysisConfig::default());
    }
}
