//! Cross-call cache of sub-problem results.

use crate::InputError;
use std::collections::HashMap;

/// Producer indices into the pool; a (partial) team.
pub type Solution = Vec<usize>;

/// `memo key -> minimal completions` for residual recipe states.
///
/// Owned by the caller and lent to the solver, so sub-problems found while
/// solving one recipe are reused by later recipes on the same pool. The
/// solver only ever adds entries. An empty list means the state was proven
/// unreachable within its spots-left budget.
///
/// Entries hold pool indices, so a cache belongs to the pool it was filled
/// against. The pool's size is recorded on first use and a differently sized
/// pool is rejected until the cache is cleared. Swapping in another pool of
/// the same size is not detected.
#[derive(Debug, Clone, Default)]
pub struct MemoCache {
    entries: HashMap<u64, Vec<Solution>>,
    pool_len: Option<usize>,
}

impl MemoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: u64) -> Option<&Vec<Solution>> {
        self.entries.get(&key)
    }

    pub fn insert(&mut self, key: u64, solutions: Vec<Solution>) {
        self.entries.insert(key, solutions);
    }

    pub fn contains(&self, key: u64) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Size of the pool the entries refer to, once bound.
    pub fn pool_len(&self) -> Option<usize> {
        self.pool_len
    }

    /// Tie the cache to a pool of `len` producers.
    ///
    /// An empty cache may be rebound freely.
    pub fn bind_pool(&mut self, len: usize) -> Result<(), InputError> {
        match self.pool_len {
            Some(cached) if cached != len && !self.entries.is_empty() => {
                Err(InputError::MemoPoolMismatch { cached, len })
            }
            _ => {
                self.pool_len = Some(len);
                Ok(())
            }
        }
    }

    /// Drop every entry, e.g. after the pool changed.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.pool_len = None;
    }
}
