//! Rates configuration.
//!
//! The cost model ships with documented default calibration constants; a
//! JSON rates file can override any subset of them per ranch or region.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cost::CostRates;

/// Paths probed when no explicit config is given.
const DEFAULT_PATHS: &[&str] = &[".fenceline.json", "fenceline.json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
  /// Cost-model calibration constants
  #[serde(default)]
  pub rates: CostRates,
}

impl Config {
  /// Load configuration from a specific file.
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("could not read rates file {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
      .with_context(|| format!("could not parse rates file {}", path.display()))?;
    Ok(config)
  }

  /// Resolve configuration: an explicit path wins, then the
  /// FENCELINE_CONFIG env var, then a probe of the default paths, then
  /// the built-in rates.
  pub fn load(explicit: Option<&Path>) -> Result<Self> {
    if let Some(path) = explicit {
      return Self::load_from_file(path);
    }

    if let Ok(env_path) = std::env::var("FENCELINE_CONFIG") {
      return Self::load_from_file(env_path);
    }

    for candidate in DEFAULT_PATHS {
      if Path::new(candidate).exists() {
        return Self::load_from_file(candidate);
      }
    }

    Ok(Self::default())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;
  use std::fs;
  use tempfile::TempDir;

  #[test]
  fn load_from_valid_file_overrides_named_rates() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rates.json");

    let content = r#"{
            "rates": {
                "mf_cost_per_mile": 9000.0,
                "horizon_periods": 10.0
            }
        }"#;
    fs::write(&config_path, content).unwrap();

    let config = Config::load_from_file(&config_path).unwrap();
    assert_eq!(config.rates.mf_cost_per_mile, 9_000.0);
    assert_eq!(config.rates.horizon_periods, 10.0);
    // Unnamed rates keep their defaults
    assert_eq!(config.rates.scaling_factor, 25_000.0);
    assert_eq!(config.rates.subscription_cost_per_head, 40.0);
  }

  #[test]
  fn load_from_missing_file_errors() {
    assert!(Config::load_from_file("no-such-rates.json").is_err());
  }

  #[test]
  fn load_from_invalid_json_errors() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("broken.json");
    fs::write(&config_path, "{ not json }").unwrap();

    assert!(Config::load_from_file(&config_path).is_err());
  }

  #[test]
  #[serial]
  fn load_without_any_source_falls_back_to_defaults() {
    std::env::remove_var("FENCELINE_CONFIG");
    let config = Config::load(None).unwrap();
    assert_eq!(config.rates, CostRates::default());
  }

  #[test]
  #[serial]
  fn env_var_points_at_a_rates_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("env-rates.json");
    fs::write(&config_path, r#"{"rates": {"vf_cost_per_acre": 3.0}}"#).unwrap();

    std::env::set_var("FENCELINE_CONFIG", &config_path);
    let config = Config::load(None).unwrap();
    std::env::remove_var("FENCELINE_CONFIG");

    assert_eq!(config.rates.vf_cost_per_acre, 3.0);
  }

  #[test]
  fn explicit_path_wins_over_everything() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("explicit.json");
    fs::write(&config_path, r#"{"rates": {"grazing_benefit_per_acre": 0.0}}"#).unwrap();

    let config = Config::load(Some(config_path.as_path())).unwrap();
    assert_eq!(config.rates.grazing_benefit_per_acre, 0.0);
  }
}
