//! Optional configuration file support.
//!
//! Zone names and threshold overrides can come from a TOML file:
//!
//! ```toml
//! [zone_names]
//! 0 = "Tomatoes"
//! 1 = "Lettuce"
//!
//! [thresholds]
//! moisture_low = 40.0
//! temp_high = 32.0
//! ```
//!
//! Values can also be supplied through `IRRIWATCH_*` environment
//! variables. CLI flags override anything loaded here.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::zones::Thresholds;
use crate::source::ZONE_COUNT;

/// Threshold values present in the config file; absent fields keep the
/// built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThresholdOverrides {
    pub moisture_low: Option<f64>,
    pub moisture_high: Option<f64>,
    pub temp_low: Option<f64>,
    pub temp_high: Option<f64>,
    pub humidity_low: Option<f64>,
    pub humidity_high: Option<f64>,
}

/// Loaded configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Zone display names keyed by zone id ("0".."3").
    #[serde(default)]
    pub zone_names: BTreeMap<String, String>,
    #[serde(default)]
    pub thresholds: ThresholdOverrides,
}

impl Settings {
    /// Load settings from a config file plus the environment.
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix("IRRIWATCH"))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Display names for all zones, falling back to "Zone N".
    pub fn names(&self) -> Vec<String> {
        (0..ZONE_COUNT)
            .map(|zone| {
                self.zone_names
                    .get(&zone.to_string())
                    .cloned()
                    .unwrap_or_else(|| format!("Zone {}", zone + 1))
            })
            .collect()
    }

    /// Apply the file's overrides on top of a base threshold set.
    pub fn apply_thresholds(&self, mut base: Thresholds) -> Thresholds {
        let o = &self.thresholds;
        if let Some(v) = o.moisture_low {
            base.moisture_low = v;
        }
        if let Some(v) = o.moisture_high {
            base.moisture_high = v;
        }
        if let Some(v) = o.temp_low {
            base.temp_low = v;
        }
        if let Some(v) = o.temp_high {
            base.temp_high = v;
        }
        if let Some(v) = o.humidity_low {
            base.humidity_low = v;
        }
        if let Some(v) = o.humidity_high {
            base.humidity_high = v;
        }
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_names() {
        let settings = Settings::default();
        assert_eq!(settings.names(), vec!["Zone 1", "Zone 2", "Zone 3", "Zone 4"]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("irriwatch.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[zone_names]
0 = "Tomatoes"
2 = "Herbs"

[thresholds]
moisture_low = 40.0
"#
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(
            settings.names(),
            vec!["Tomatoes", "Zone 2", "Herbs", "Zone 4"]
        );

        let thresholds = settings.apply_thresholds(Thresholds::default());
        assert!((thresholds.moisture_low - 40.0).abs() < f64::EPSILON);
        // Untouched values keep their defaults
        assert!((thresholds.temp_high - 30.0).abs() < f64::EPSILON);
    }
}
