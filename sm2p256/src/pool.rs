//! Free list of scratch integers for the arbitrary-precision curve arithmetic.

use core::{
    mem,
    ops::{Deref, DerefMut},
};
use num_bigint::BigUint;
use num_traits::Zero;
use std::sync::{Mutex, PoisonError};

/// Number of integers the shared pool keeps around.
const GLOBAL_POOL_CAPACITY: usize = 64;

static GLOBAL_POOL: BigUintPool = BigUintPool::new(GLOBAL_POOL_CAPACITY);

/// Bounded pool of reusable [`BigUint`] values.
///
/// Values handed out by [`BigUintPool::get`] go back to the pool when dropped,
/// so their digit buffers are reused instead of reallocated. Once the pool
/// holds `capacity` values, further returns are freed.
#[derive(Debug)]
pub struct BigUintPool {
    free: Mutex<Vec<BigUint>>,
    capacity: usize,
}

impl BigUintPool {
    /// Create an empty pool retaining at most `capacity` values.
    pub const fn new(capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            capacity,
        }
    }

    /// The pool shared by the curve arithmetic in this crate.
    pub fn global() -> &'static Self {
        &GLOBAL_POOL
    }

    /// Take a zero-valued integer from the pool, allocating one if it is empty.
    pub fn get(&self) -> Pooled<'_> {
        let value = self
            .free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_default();

        Pooled { pool: self, value }
    }

    /// Number of values currently waiting in the pool.
    pub fn available(&self) -> usize {
        self.free.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn put(&self, mut value: BigUint) {
        value.set_zero();
        let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
        if free.len() < self.capacity {
            free.push(value);
        }
    }
}

/// A [`BigUint`] borrowed from a [`BigUintPool`].
#[derive(Debug)]
pub struct Pooled<'a> {
    pool: &'a BigUintPool,
    value: BigUint,
}

impl Pooled<'_> {
    /// Detach the value from the pool.
    pub fn into_inner(mut self) -> BigUint {
        mem::take(&mut self.value)
    }
}

impl Deref for Pooled<'_> {
    type Target = BigUint;

    fn deref(&self) -> &BigUint {
        &self.value
    }
}

impl DerefMut for Pooled<'_> {
    fn deref_mut(&mut self) -> &mut BigUint {
        &mut self.value
    }
}

impl Drop for Pooled<'_> {
    fn drop(&mut self) {
        self.pool.put(mem::take(&mut self.value));
    }
}

#[cfg(test)]
mod tests {
    use super::BigUintPool;
    use num_bigint::BigUint;
    use num_traits::Zero;

    #[test]
    fn values_are_recycled() {
        let pool = BigUintPool::new(4);
        {
            let mut a = pool.get();
            *a += 42u32;
            assert_eq!(*a, BigUint::from(42u32));
        }
        assert_eq!(pool.available(), 1);

        let b = pool.get();
        assert!(b.is_zero());
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn capacity_is_bounded() {
        let pool = BigUintPool::new(2);
        let values: Vec<_> = (0..5).map(|_| pool.get()).collect();
        drop(values);
        assert_eq!(pool.available(), 2);
    }

    #[test]
    fn into_inner_keeps_value() {
        let pool = BigUintPool::new(2);
        let mut a = pool.get();
        *a += 7u32;
        assert_eq!(a.into_inner(), BigUint::from(7u32));
    }
}
