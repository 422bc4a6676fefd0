//! Deterministic, independently seeded sampling streams.
//!
//! # Determinism strategy
//!
//! Each replication owns one `RandomStream` per sampled quantity.  The
//! stream's `SmallRng` is seeded by:
//!
//!   seed = splitmix64(splitmix64(study_seed) XOR ((stream + 1) * MIXING_CONSTANT))
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive stream indices across the seed space; the
//! SplitMix64 finaliser decorrelates neighbouring study seeds.  This means:
//!
//! - Streams never share RNG state, within or across replications.
//! - The same `(study_seed, stream)` pair reproduces the same sequence
//!   bit-for-bit, whichever thread runs the replication.
//! - Adding a stream does not disturb the sequences of existing ones.

use rand::distributions::Distribution;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::Exp;

use crate::{ConfigError, ConfigResult, StreamId};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

#[inline]
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(MIXING_CONSTANT);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Derive the RNG seed for `stream` within the study identified by `study_seed`.
pub fn derive_seed(study_seed: u64, stream: StreamId) -> u64 {
    let salt = (stream.0 as u64 + 1).wrapping_mul(MIXING_CONSTANT);
    splitmix64(splitmix64(study_seed) ^ salt)
}

// ── RandomStream ──────────────────────────────────────────────────────────────

/// A reproducible sampler for one logical quantity.
///
/// Generic over any `rand_distr` distribution producing `f64`, so the
/// exponential default can be swapped without touching the model.  The type
/// is deliberately not `Clone`: two copies of a stream would replay the same
/// draws.
pub struct RandomStream<D> {
    rng:  SmallRng,
    dist: D,
}

/// Exponentially distributed stream, parameterised by its mean.
pub type Exponential = RandomStream<Exp<f64>>;

impl<D: Distribution<f64>> RandomStream<D> {
    /// Seed deterministically from the study seed and a stream index.
    pub fn new(dist: D, study_seed: u64, stream: StreamId) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(derive_seed(study_seed, stream)),
            dist,
        }
    }

    /// A single draw.
    #[inline]
    pub fn sample(&mut self) -> f64 {
        self.dist.sample(&mut self.rng)
    }

    /// `n` consecutive draws.
    pub fn sample_n(&mut self, n: usize) -> Vec<f64> {
        (&mut self.rng).sample_iter(&self.dist).take(n).collect()
    }
}

impl RandomStream<Exp<f64>> {
    /// Exponential stream with the given `mean`.
    ///
    /// The owning [`Param`][crate::Param] has already checked `mean > 0`; an
    /// invalid mean reaching this point is still reported rather than panicking.
    pub fn exponential(mean: f64, study_seed: u64, stream: StreamId) -> ConfigResult<Self> {
        if !(mean.is_finite() && mean > 0.0) {
            return Err(ConfigError::Distribution(format!(
                "exponential mean must be positive and finite, got {mean}"
            )));
        }
        let dist = Exp::new(1.0 / mean).map_err(|e| ConfigError::Distribution(e.to_string()))?;
        Ok(Self::new(dist, study_seed, stream))
    }
}
