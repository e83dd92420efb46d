//! Deterministic pseudo-random source.
//!
//! Every stochastic decision in a run draws from one `SimRng` stream, in call
//! order. Re-running with the same seed therefore reproduces the whole trace,
//! so the order of draws in the generators and systems is part of the contract.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// LCG multiplier.
pub const MULTIPLIER: u64 = 9301;
/// LCG increment.
pub const INCREMENT: u64 = 49297;
/// LCG modulus; also the resolution of every draw.
pub const MODULUS: u64 = 233_280;

/// Anything that can hand out uniform floats in [0, 1).
///
/// The engine only ever talks to this trait, which lets tests script
/// individual rolls.
pub trait RandomSource {
    /// Next float in [0, 1).
    fn next_f64(&mut self) -> f64;

    /// True with probability `p`. Always consumes one draw.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Symmetric jitter: `(r - 0.5) * width`, i.e. uniform in (-width/2, width/2).
    fn jitter(&mut self, width: f64) -> f64 {
        (self.next_f64() - 0.5) * width
    }

    /// Uniform index into a collection of `len` elements (`len > 0`).
    fn index(&mut self, len: usize) -> usize {
        let idx = (self.next_f64() * len as f64).floor() as usize;
        idx.min(len.saturating_sub(1))
    }

    /// Pick one element of a non-empty slice.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.index(items.len())]
    }
}

/// A random seed in `1..MODULUS`, for callers that did not pick one.
pub fn random_seed() -> u64 {
    rand::thread_rng().gen_range(1..MODULUS)
}

/// Seedable linear-congruential generator: `s = (s * 9301 + 49297) mod 233280`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimRng {
    state: u64,
}

impl SimRng {
    /// Create a generator from a seed. Seeds are reduced modulo [`MODULUS`];
    /// a reduced seed of zero is replaced by 1.
    pub fn new(seed: u64) -> Self {
        let reduced = seed % MODULUS;
        Self {
            state: if reduced == 0 { 1 } else { reduced },
        }
    }

    /// Create a generator from a randomly chosen non-zero seed.
    pub fn from_entropy() -> Self {
        Self::new(random_seed())
    }

    /// Current internal state (the value the next draw is derived from).
    pub fn state(&self) -> u64 {
        self.state
    }
}

impl RandomSource for SimRng {
    fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }
}

/// Replays a fixed list of draws, then continues with a seeded [`SimRng`].
///
/// Used to force specific rolls (an impediment on day one, a failed
/// completion) while keeping the rest of the run well-defined.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    script: std::collections::VecDeque<f64>,
    fallback: SimRng,
}

impl ScriptedRng {
    pub fn new(script: impl IntoIterator<Item = f64>, fallback_seed: u64) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: SimRng::new(fallback_seed),
        }
    }

    /// Number of scripted draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl RandomSource for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        match self.script.pop_front() {
            Some(v) => v,
            None => self.fallback.next_f64(),
        }
    }
}
