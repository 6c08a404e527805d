//! Random sampling and shuffling.
//!
//! The plain methods draw from the thread-local generator. The `_with`
//! variants take any [`Rng`], typically one built from a [`SamplerConfig`]
//! so that a fixed seed reproduces the same picks.

use ordcoll_core::{CollectionError, Key, Result};
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::collection::Collection;

/// Sampling configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Optional seed for reproducible sampling and shuffles.
    pub seed: Option<u64>,
}

impl SamplerConfig {
    /// A config with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Create a config from the environment, falling back to defaults.
    ///
    /// Environment variables:
    /// - `ORDCOLL_SEED`: random seed
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(s) = std::env::var("ORDCOLL_SEED") {
            if let Ok(v) = s.parse::<u64>() {
                cfg.seed = Some(v);
            }
        }
        cfg
    }

    /// Build the generator: seeded when a seed is set, from OS entropy
    /// otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Collection {
    /// `n` distinct keys chosen uniformly at random, in store order.
    ///
    /// Fails with `OutOfRange` when `n` is zero or exceeds the entry count.
    pub fn rand(&self, n: usize) -> Result<Vec<Key>> {
        self.rand_with(&mut rand::thread_rng(), n)
    }

    /// One key chosen uniformly at random.
    pub fn rand_key(&self) -> Result<Key> {
        self.rand_key_with(&mut rand::thread_rng())
    }

    /// As [`rand_key`](Self::rand_key), drawing from `rng`.
    pub fn rand_key_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Key> {
        let mut keys = self.rand_with(rng, 1)?;
        keys.pop().ok_or(CollectionError::OutOfRange {
            requested: 1,
            available: self.len(),
        })
    }

    /// As [`rand`](Self::rand), drawing from `rng`.
    pub fn rand_with<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Result<Vec<Key>> {
        if n == 0 || n > self.len() {
            return Err(CollectionError::OutOfRange {
                requested: n,
                available: self.len(),
            });
        }
        let mut picked = index::sample(rng, self.len(), n).into_vec();
        picked.sort_unstable();
        tracing::trace!("rand: picked positions {:?} of {}", picked, self.len());
        Ok(picked
            .into_iter()
            .filter_map(|pos| self.get_index(pos).map(|(k, _)| k.clone()))
            .collect())
    }

    /// Randomly permute the values and rekey `0..n`.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// As [`shuffle`](Self::shuffle), drawing from `rng`.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut entries = self.take_entries();
        entries.shuffle(rng);
        tracing::debug!("shuffle: permuted {} entries", entries.len());
        self.reindex(entries);
    }
}
