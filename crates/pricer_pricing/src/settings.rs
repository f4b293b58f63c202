//! Engine settings
//!
//! Handles loading engine defaults from TOML and environment variables.
//!
//! Priority (highest to lowest):
//! 1. Environment variables (`PRICER_*`)
//! 2. TOML file or string
//! 3. Default values

use std::path::{Path, PathBuf};

use pricer_models::analytical::{AnalyticalError, ImpliedVolConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lsm::{LsmConfig, DEFAULT_MIN_ITM_PATHS};
use crate::mc::{ConfigError, SimulationConfig, DEFAULT_NUM_WORKERS, DEFAULT_SEED};
use crate::strategy::PricingStrategy;

/// Environment variable overriding [`EngineSettings::num_paths`].
pub const ENV_NUM_PATHS: &str = "PRICER_NUM_PATHS";
/// Environment variable overriding [`EngineSettings::num_steps`].
pub const ENV_NUM_STEPS: &str = "PRICER_NUM_STEPS";
/// Environment variable overriding [`EngineSettings::seed`].
pub const ENV_SEED: &str = "PRICER_SEED";
/// Environment variable overriding [`EngineSettings::num_workers`].
pub const ENV_NUM_WORKERS: &str = "PRICER_NUM_WORKERS";
/// Environment variable overriding [`EngineSettings::min_itm_paths`].
pub const ENV_MIN_ITM_PATHS: &str = "PRICER_MIN_ITM_PATHS";

/// Settings error types
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file could not be read.
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// TOML was malformed or had unknown keys.
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Environment variable did not parse as the expected type.
    #[error("Environment variable {name}={value} is not a valid value")]
    InvalidEnvVar {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
    },

    /// Simulation settings out of range.
    #[error(transparent)]
    Simulation(#[from] ConfigError),

    /// Implied volatility settings out of range.
    #[error(transparent)]
    ImpliedVol(#[from] AnalyticalError),
}

/// Engine-wide defaults for simulation and implied volatility.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::settings::EngineSettings;
///
/// let settings = EngineSettings::from_toml_str("num_paths = 50000\nseed = 7").unwrap();
/// assert_eq!(settings.num_paths, 50_000);
/// assert_eq!(settings.num_steps, 252);
///
/// let config = settings.simulation_config().unwrap();
/// assert_eq!(config.seed(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    /// Number of simulated paths
    pub num_paths: usize,
    /// Time steps per path
    pub num_steps: usize,
    /// Base seed
    pub seed: u64,
    /// Independent RNG streams
    pub num_workers: usize,
    /// Longstaff-Schwartz regression threshold
    pub min_itm_paths: usize,
    /// Implied volatility price tolerance
    pub implied_vol_tolerance: f64,
    /// Implied volatility iteration budget
    pub implied_vol_max_iterations: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        let implied_vol = ImpliedVolConfig::default();
        Self {
            num_paths: 100_000,
            num_steps: 252,
            seed: DEFAULT_SEED,
            num_workers: DEFAULT_NUM_WORKERS,
            min_itm_paths: DEFAULT_MIN_ITM_PATHS,
            implied_vol_tolerance: implied_vol.tolerance,
            implied_vol_max_iterations: implied_vol.max_iterations,
        }
    }
}

impl EngineSettings {
    /// Parses settings from TOML; missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: EngineSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Defaults overridden from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::default().with_env_overrides()
    }

    /// Applies `PRICER_*` environment variables on top of `self`.
    pub fn with_env_overrides(self) -> Result<Self, SettingsError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its
    /// value if set.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse<T: std::str::FromStr>(
            name: &'static str,
            raw: String,
        ) -> Result<T, SettingsError> {
            raw.trim()
                .parse()
                .map_err(|_| SettingsError::InvalidEnvVar { name, value: raw })
        }

        if let Some(raw) = lookup(ENV_NUM_PATHS) {
            self.num_paths = parse(ENV_NUM_PATHS, raw)?;
        }
        if let Some(raw) = lookup(ENV_NUM_STEPS) {
            self.num_steps = parse(ENV_NUM_STEPS, raw)?;
        }
        if let Some(raw) = lookup(ENV_SEED) {
            self.seed = parse(ENV_SEED, raw)?;
        }
        if let Some(raw) = lookup(ENV_NUM_WORKERS) {
            self.num_workers = parse(ENV_NUM_WORKERS, raw)?;
        }
        if let Some(raw) = lookup(ENV_MIN_ITM_PATHS) {
            self.min_itm_paths = parse(ENV_MIN_ITM_PATHS, raw)?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Validates the settings
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.simulation_config()?;
        self.implied_vol_config().validate()?;
        Ok(())
    }

    /// Simulation configuration described by these settings.
    pub fn simulation_config(&self) -> Result<SimulationConfig, ConfigError> {
        SimulationConfig::builder()
            .n_paths(self.num_paths)
            .n_steps(self.num_steps)
            .seed(self.seed)
            .num_workers(self.num_workers)
            .build()
    }

    /// Longstaff-Schwartz policy.
    pub fn lsm_config(&self) -> LsmConfig {
        LsmConfig {
            min_itm_paths: self.min_itm_paths,
        }
    }

    /// Monte Carlo strategy carrying both the simulation and the
    /// Longstaff-Schwartz settings.
    pub fn monte_carlo_strategy(&self) -> Result<PricingStrategy, ConfigError> {
        Ok(PricingStrategy::MonteCarlo {
            simulation: self.simulation_config()?,
            lsm: self.lsm_config(),
        })
    }

    /// Implied volatility settings; bounds and starting point keep their defaults.
    pub fn implied_vol_config(&self) -> ImpliedVolConfig {
        ImpliedVolConfig {
            tolerance: self.implied_vol_tolerance,
            max_iterations: self.implied_vol_max_iterations,
            ..ImpliedVolConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_settings() {
        let settings = EngineSettings::default();
        assert_eq!(settings.num_paths, 100_000);
        assert_eq!(settings.num_steps, 252);
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.num_workers, 8);
        assert_eq!(settings.min_itm_paths, 10);
        assert_eq!(settings.implied_vol_tolerance, 1e-6);
        assert_eq!(settings.implied_vol_max_iterations, 100);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = EngineSettings::from_toml_str(
            r#"
            num_steps = 50
            num_workers = 4
            implied_vol_tolerance = 1e-8
            "#,
        )
        .unwrap();

        assert_eq!(settings.num_paths, 100_000);
        assert_eq!(settings.num_steps, 50);
        assert_eq!(settings.num_workers, 4);
        assert_eq!(settings.implied_vol_config().tolerance, 1e-8);
        assert_eq!(settings.implied_vol_config().upper_bound, 5.0);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = EngineSettings::from_toml_str("num_pathz = 10");
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            EngineSettings::from_toml_str("num_paths = 0"),
            Err(SettingsError::Simulation(ConfigError::InvalidPathCount(0)))
        ));
        assert!(matches!(
            EngineSettings::from_toml_str("num_workers = 0"),
            Err(SettingsError::Simulation(ConfigError::InvalidWorkerCount(0)))
        ));
        assert!(matches!(
            EngineSettings::from_toml_str("implied_vol_tolerance = -1.0"),
            Err(SettingsError::ImpliedVol(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let settings = EngineSettings::default()
            .with_overrides(lookup(&[
                (ENV_NUM_PATHS, "2000"),
                (ENV_SEED, " 99 "),
                (ENV_MIN_ITM_PATHS, "25"),
            ]))
            .unwrap();

        assert_eq!(settings.num_paths, 2000);
        assert_eq!(settings.seed, 99);
        assert_eq!(settings.num_steps, 252);
        assert_eq!(settings.lsm_config().min_itm_paths, 25);
    }

    #[test]
    fn test_override_parse_error() {
        let result = EngineSettings::default().with_overrides(lookup(&[(ENV_NUM_STEPS, "many")]));
        match result {
            Err(SettingsError::InvalidEnvVar { name, value }) => {
                assert_eq!(name, ENV_NUM_STEPS);
                assert_eq!(value, "many");
            }
            other => panic!("Expected InvalidEnvVar, got {:?}", other),
        }
    }

    #[test]
    fn test_override_out_of_range() {
        let result = EngineSettings::default().with_overrides(lookup(&[(ENV_NUM_WORKERS, "0")]));
        assert!(matches!(result, Err(SettingsError::Simulation(_))));
    }

    #[test]
    fn test_simulation_config_conversion() {
        let settings = EngineSettings {
            num_paths: 1234,
            num_steps: 12,
            seed: 5,
            num_workers: 3,
            ..EngineSettings::default()
        };
        let config = settings.simulation_config().unwrap();
        assert_eq!(config.n_paths(), 1234);
        assert_eq!(config.n_steps(), 12);
        assert_eq!(config.seed(), 5);
        assert_eq!(config.num_workers(), 3);
    }

    #[test]
    fn test_monte_carlo_strategy_keeps_lsm_override() {
        let settings = EngineSettings::default()
            .with_overrides(lookup(&[(ENV_MIN_ITM_PATHS, "500"), (ENV_NUM_PATHS, "1000")]))
            .unwrap();

        match settings.monte_carlo_strategy().unwrap() {
            PricingStrategy::MonteCarlo { simulation, lsm } => {
                assert_eq!(simulation.n_paths(), 1000);
                assert_eq!(lsm.min_itm_paths, 500);
            }
            other => panic!("Expected monte_carlo, got {:?}", other),
        }
    }

    #[test]
    fn test_from_file() {
        let name = format!("pricer_settings_{}.toml", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, "num_paths = 777\n").unwrap();

        let settings = EngineSettings::from_file(&path).unwrap();
        assert_eq!(settings.num_paths, 777);
        std::fs::remove_file(&path).unwrap();

        let missing = EngineSettings::from_file(&path);
        assert!(matches!(missing, Err(SettingsError::Io { .. })));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let settings = EngineSettings {
            seed: 11,
            ..EngineSettings::default()
        };
        let text = toml::to_string(&settings).unwrap();
        assert_eq!(EngineSettings::from_toml_str(&text).unwrap(), settings);
    }
}
