//! # Random Number Generation
//!
//! Seeded normal variates for path simulation.
//!
//! Every simulation run builds its own streams from the seed held in
//! [`SimulationConfig`](crate::mc::SimulationConfig): one stream per worker,
//! derived from `(seed, worker_index)` by [`PricerRng::for_worker`]. No
//! stream is ever shared between threads, so results depend only on
//! `(seed, n_paths, num_workers)` and never on thread scheduling.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let z = rng.gen_normal();
//!
//! // Batch generation into a pre-allocated buffer
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//!
//! // Worker 0 of a run is the plain seeded stream
//! let mut a = PricerRng::for_worker(12345, 0);
//! let mut b = PricerRng::from_seed(12345);
//! assert_eq!(a.gen_normal(), b.gen_normal());
//! ```

mod prng;

pub use prng::PricerRng;
