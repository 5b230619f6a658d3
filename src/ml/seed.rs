// ============================================================
// Layer 5 - Seeding
// ============================================================
// Three independent seeds make a training run repeatable:
//
//   numeric  → the host-side `rand` generator; the data
//              loader's shuffle seed is drawn from it
//   hash     → the language-level seed; Rust has no process
//              hash seed, so it is mixed into that shuffle seed
//   backend  → Burn's tensor RNG (weight initialisation)
//
// Changing any one of the three changes the trained weights.
//
// They are applied by an explicit call at the start of a run,
// never at module load. Identical seeds give identical weights
// only for the same crate versions and hardware.

use burn::prelude::Backend;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seeds {
    pub numeric: u64,
    pub hash: u64,
    pub backend: u64,
}

impl Default for Seeds {
    fn default() -> Self {
        Self { numeric: 46, hash: 1342, backend: 62 }
    }
}

impl Seeds {
    /// Seed the backend's global generator. Call once per run, before
    /// any model is built.
    pub fn apply<B: Backend>(&self) {
        B::seed(self.backend);
        tracing::debug!(
            "Seeds applied: numeric={} hash={} backend={}",
            self.numeric,
            self.hash,
            self.backend
        );
    }

    /// Seed for the data loader's per-epoch shuffle: the first draw
    /// of the numeric generator, keyed by the hash seed.
    pub fn shuffle_seed(&self) -> u64 {
        let mut rng = StdRng::seed_from_u64(self.numeric);
        rng.gen::<u64>() ^ self.hash
    }
}
