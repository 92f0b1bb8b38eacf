//! Random source handed to the math synthesizer and the fact handlers.
//!
//! Production code shares one entropy-seeded generator per process;
//! tests replay a scripted sequence so outputs can be asserted exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::sync::Mutex;

pub trait RandomSource: Send + Sync {
    /// Uniform integer in `low..=high`
    fn int_between(&self, low: i64, high: i64) -> i64;
}

/// Pick one element uniformly. `items` must not be empty.
pub fn pick<'a, T>(random: &dyn RandomSource, items: &'a [T]) -> &'a T {
    let last = items.len().saturating_sub(1) as i64;
    let idx = random.int_between(0, last).clamp(0, last) as usize;
    &items[idx]
}

/// Process-wide generator behind a mutex
pub struct SharedRandom {
    rng: Mutex<StdRng>,
}

impl SharedRandom {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for SharedRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SharedRandom {
    fn int_between(&self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        // A poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(low..=high)
    }
}

/// Replays a fixed sequence of draws.
///
/// Each draw is clamped into the requested range. Once the script runs
/// out every draw returns `low`.
pub struct ScriptedRandom {
    script: Mutex<VecDeque<i64>>,
    draws: Mutex<usize>,
}

impl ScriptedRandom {
    pub fn new(script: impl IntoIterator<Item = i64>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            draws: Mutex::new(0),
        }
    }

    /// Number of draws taken so far
    pub fn draw_count(&self) -> usize {
        *self.draws.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Draws still queued
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl RandomSource for ScriptedRandom {
    fn int_between(&self, low: i64, high: i64) -> i64 {
        *self.draws.lock().unwrap_or_else(|e| e.into_inner()) += 1;

        let next = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        match next {
            Some(v) => v.clamp(low, high.max(low)),
            None => low,
        }
    }
}
