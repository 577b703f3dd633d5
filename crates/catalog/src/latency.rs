//! Synthetic read latency.
//!
//! Reads of the full catalog are delayed by a duration picked uniformly from a
//! small fixed set. Two profiles exist: normal jitter and a degraded backend.
//! Sampling is discrete (never a continuous range) so callers can assert
//! exact bounds, and the sampler can be seeded for deterministic tests.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NORMAL_DELAYS: [Duration; 4] = [
    Duration::from_millis(100),
    Duration::from_millis(200),
    Duration::from_millis(300),
    Duration::from_millis(400),
];

const DEGRADED_DELAYS: [Duration; 3] = [
    Duration::from_secs(5),
    Duration::from_secs(10),
    Duration::from_secs(15),
];

/// Which delay set a read draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyProfile {
    /// 100, 200, 300 or 400 ms.
    Normal,
    /// 5, 10 or 15 s.
    Degraded,
}

impl LatencyProfile {
    pub fn delays(self) -> &'static [Duration] {
        match self {
            Self::Normal => &NORMAL_DELAYS,
            Self::Degraded => &DEGRADED_DELAYS,
        }
    }

    /// Smallest and largest delay the profile can produce.
    pub fn bounds(self) -> (Duration, Duration) {
        let delays = self.delays();
        (delays[0], delays[delays.len() - 1])
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Degraded => "degraded",
        }
    }
}

/// Picks delays from a [`LatencyProfile`].
///
/// The RNG sits behind a mutex that is held only for the draw itself.
#[derive(Debug)]
pub struct DelaySampler {
    rng: Mutex<StdRng>,
}

impl DelaySampler {
    /// Sampler seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic sampler (same seed, same delay sequence).
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn sample(&self, profile: LatencyProfile) -> Duration {
        let delays = profile.delays();
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        delays[rng.random_range(0..delays.len())]
    }
}

impl Default for DelaySampler {
    fn default() -> Self {
        Self::from_os_rng()
    }
}
