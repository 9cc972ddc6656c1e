//! Injected sources of randomness and wall-clock time.
//!
//! Narrative code never calls `rand::thread_rng()` or `Utc::now()` directly, so
//! tests can pin both.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Random choice abstraction.
pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..len`. `len` is always at least 1.
    fn pick_index(&self, len: usize) -> usize;
}

/// Wall-clock abstraction.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Thread-local OS-seeded randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len.max(1))
    }
}

/// Reproducible randomness from a fixed seed.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..len.max(1))
    }
}

/// Returns indices from a fixed sequence, cycling, clamped into range.
#[derive(Debug)]
pub struct SequenceRandom {
    values: Vec<usize>,
    index: AtomicUsize,
}

impl SequenceRandom {
    pub fn new(values: Vec<usize>) -> Self {
        Self {
            values,
            index: AtomicUsize::new(0),
        }
    }

    pub fn constant(value: usize) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn pick_index(&self, len: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let idx = self.index.fetch_add(1, Ordering::SeqCst);
        self.values[idx % self.values.len()].min(len.saturating_sub(1))
    }
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
