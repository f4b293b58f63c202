//! Seeded pseudo-random number generator for Monte Carlo simulation.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

/// Odd multiplier spreading worker indices across the seed space.
const WORKER_STRIDE: u64 = 6_364_136_223_846_793_005;

/// Monte Carlo random number generator.
///
/// Wraps `StdRng` and remembers the seed it was initialised with.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::PricerRng;
///
/// let mut rng = PricerRng::from_seed(42);
///
/// let n: f64 = rng.gen_normal();
///
/// let mut buffer = vec![0.0; 100];
/// rng.fill_normal(&mut buffer);
/// ```
#[derive(Debug, Clone)]
pub struct PricerRng {
    inner: StdRng,
    seed: u64,
}

impl PricerRng {
    /// Creates a new RNG initialised with the given seed.
    ///
    /// The same seed always produces the same sequence.
    ///
    /// ```rust
    /// use pricer_pricing::rng::PricerRng;
    ///
    /// let mut rng1 = PricerRng::from_seed(12345);
    /// let mut rng2 = PricerRng::from_seed(12345);
    /// assert_eq!(rng1.gen_normal(), rng2.gen_normal());
    /// ```
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates the independent stream owned by worker `worker_index` of a
    /// run seeded with `base_seed`.
    ///
    /// The derived seed is `base_seed + worker_index * stride` (wrapping),
    /// then expanded by `StdRng::seed_from_u64`. Worker 0 therefore matches
    /// [`PricerRng::from_seed`]`(base_seed)`.
    #[inline]
    pub fn for_worker(base_seed: u64, worker_index: u64) -> Self {
        Self::from_seed(base_seed.wrapping_add(worker_index.wrapping_mul(WORKER_STRIDE)))
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a single standard normal variate.
    ///
    /// Uses the Ziggurat sampler of `rand_distr::StandardNormal`.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Fills the buffer with standard normal variates.
    ///
    /// Draws in buffer order, so filling `n` values consumes the stream
    /// exactly as `n` calls to [`gen_normal`](Self::gen_normal) would.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}
