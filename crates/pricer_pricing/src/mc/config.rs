//! Monte Carlo simulation configuration.
//!
//! [`SimulationConfig`] is immutable once built and fully determines the
//! random streams of a run: the same config, contract and market state
//! always reproduce the same result.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Maximum number of stored values `n_paths * (n_steps + 1)`.
///
/// American pricing holds every path in memory as `f64`, so this caps the
/// path matrix at about 4 GB.
pub const MAX_PATH_MATRIX_LEN: usize = 500_000_000;

/// Seed used when the builder is given none.
pub const DEFAULT_SEED: u64 = 42;

/// Worker count used when the builder is given none.
///
/// Fixed rather than taken from the machine so that results do not change
/// between hosts.
pub const DEFAULT_NUM_WORKERS: usize = 8;

/// Monte Carlo simulation configuration.
///
/// Use [`SimulationConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_paths(10_000)
///     .n_steps(252)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.n_steps(), 252);
/// assert_eq!(config.num_workers(), 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SimulationParams")]
pub struct SimulationConfig {
    n_paths: usize,
    n_steps: usize,
    seed: u64,
    num_workers: usize,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the base seed of the run.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of independent RNG streams the paths are split across.
    #[inline]
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Number of `f64` values in the full path matrix of this run.
    #[inline]
    pub fn path_matrix_len(&self) -> usize {
        self.n_paths.saturating_mul(self.n_steps.saturating_add(1))
    }

    /// Same configuration with a different seed.
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` is 0 or greater than [`MAX_PATHS`]
    /// - `n_steps` is 0 or greater than [`MAX_STEPS`]
    /// - `n_paths * (n_steps + 1)` exceeds [`MAX_PATH_MATRIX_LEN`]
    /// - `num_workers` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.n_steps));
        }
        if self.path_matrix_len() > MAX_PATH_MATRIX_LEN {
            return Err(ConfigError::PathMatrixTooLarge {
                n_paths: self.n_paths,
                n_steps: self.n_steps,
            });
        }
        if self.num_workers == 0 {
            return Err(ConfigError::InvalidWorkerCount(self.num_workers));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
///
/// `n_paths` and `n_steps` are required; `seed` defaults to
/// [`DEFAULT_SEED`] and `num_workers` to [`DEFAULT_NUM_WORKERS`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
    num_workers: Option<usize>,
}

impl SimulationConfigBuilder {
    /// Sets the number of simulation paths, in `[1, MAX_PATHS]`.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of time steps per path, in `[1, MAX_STEPS]`.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the base seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of workers (independent RNG streams).
    #[inline]
    pub fn num_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = Some(num_workers);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `n_paths` or `n_steps` is not set, or if any
    /// value is out of range.
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let n_paths = self.n_paths.ok_or(ConfigError::InvalidParameter {
            name: "n_paths",
            value: "must be specified".to_string(),
        })?;

        let n_steps = self.n_steps.ok_or(ConfigError::InvalidParameter {
            name: "n_steps",
            value: "must be specified".to_string(),
        })?;

        let config = SimulationConfig {
            n_paths,
            n_steps,
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            num_workers: self.num_workers.unwrap_or(DEFAULT_NUM_WORKERS),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Unvalidated wire form, checked through the builder on deserialisation.
#[derive(Deserialize)]
struct SimulationParams {
    n_paths: usize,
    n_steps: usize,
    #[serde(default = "default_seed")]
    seed: u64,
    #[serde(default = "default_num_workers")]
    num_workers: usize,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_num_workers() -> usize {
    DEFAULT_NUM_WORKERS
}

impl TryFrom<SimulationParams> for SimulationConfig {
    type Error = ConfigError;

    fn try_from(params: SimulationParams) -> Result<Self, Self::Error> {
        SimulationConfig::builder()
            .n_paths(params.n_paths)
            .n_steps(params.n_steps)
            .seed(params.seed)
            .num_workers(params.num_workers)
            .build()
    }
}
