//! Collision-free todo ids for test payloads.
//!
//! # Design
//! Ids are drawn uniformly from `[1, i64::MAX)` and accepted only when the
//! shared `UsedIds` set reports them as new. The set is the single point of
//! synchronization: concurrent callers race on `insert`, and exactly one of
//! them wins any given value. A generator owns its set through an `Arc`, so
//! suites that need a common pool share one explicitly.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::Rng;

/// Append-only, ordered record of issued ids.
#[derive(Debug, Default)]
pub struct UsedIds {
    inner: Mutex<BTreeSet<i64>>,
}

impl UsedIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `id`; returns `false` if it was already present.
    pub fn insert(&self, id: i64) -> bool {
        self.inner.lock().insert(id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.inner.lock().contains(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    used: Arc<UsedIds>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_used(used: Arc<UsedIds>) -> Self {
        Self { used }
    }

    pub fn used(&self) -> &Arc<UsedIds> {
        &self.used
    }

    /// A positive id never before returned by a generator sharing this set.
    pub fn next(&self) -> i64 {
        self.next_with(&mut rand::rng())
    }

    pub fn next_with<R: Rng>(&self, rng: &mut R) -> i64 {
        loop {
            let candidate = rng.random_range(1..i64::MAX);
            if self.used.insert(candidate) {
                return candidate;
            }
        }
    }
}
