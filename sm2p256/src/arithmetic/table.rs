//! Odd-multiple tables for wNAF scalar multiplication, and the process-wide
//! cache of such tables for the base point.

use super::{
    jacobian::JacobianPoint,
    wnaf::{MAX_WINDOW, MIN_WINDOW, clamp_window},
};
use std::{
    collections::BTreeMap,
    sync::{Arc, LazyLock, Mutex, PoisonError},
};

/// Number of entries in the table for the given window width: `2^(w-1)`.
pub const fn table_len(window: usize) -> usize {
    1 << (clamp_window(window) - 1)
}

/// Compute `[1B, 3B, 5B, ...]`, the first [`table_len`] odd multiples of `base`.
pub fn odd_multiples(base: &JacobianPoint, window: usize) -> Vec<JacobianPoint> {
    let len = table_len(window);
    let twice = base.double();

    let mut table = Vec::with_capacity(len);
    table.push(*base);
    for i in 1..len {
        let next = table[i - 1].add(&twice);
        table.push(next);
    }
    table
}

/// Cache of base point tables keyed by window width.
///
/// Tables are built on first request and kept for the lifetime of the cache.
/// The lock is held across lookup, construction and insertion, so concurrent
/// first use of the same window never observes a partially built table.
#[derive(Debug, Default)]
pub struct BaseTableCache {
    tables: Mutex<BTreeMap<usize, Arc<[JacobianPoint]>>>,
}

static GLOBAL_CACHE: LazyLock<Arc<BaseTableCache>> =
    LazyLock::new(|| Arc::new(BaseTableCache::new()));

impl BaseTableCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache shared by [`Sm2P256::new`][crate::Sm2P256::new].
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL_CACHE)
    }

    /// Get the odd-multiple table of the generator for the given window,
    /// building it on first use.
    pub fn get(&self, window: usize) -> Arc<[JacobianPoint]> {
        let window = clamp_window(window);
        let mut tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);

        Arc::clone(
            tables
                .entry(window)
                .or_insert_with(|| odd_multiples(&JacobianPoint::GENERATOR, window).into()),
        )
    }

    /// Number of window widths with a cached table.
    pub fn len(&self) -> usize {
        self.tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Is the cache still empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build tables for every supported window width.
    pub fn warm_up(&self) {
        for window in MIN_WINDOW..=MAX_WINDOW {
            self.get(window);
        }
    }
}
