//! Scratch storage for neighbour enumeration and searches.
//!
//! [NeighborBuffer] holds up to [MAX_NEIGHBORS] cells inline, so filling it never touches the
//! heap. [Pool] hands out reusable scratch values (neighbour buffers, search contexts, flow
//! fields) to concurrent callers: a value is moved out of the free list on checkout and moved
//! back when its [Pooled] guard drops, so no two callers ever share one.
use grid_util::point::Point;
use smallvec::SmallVec;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::MAX_NEIGHBORS;

/// Inline buffer sized for the largest neighbourhood.
pub type NeighborBuffer = SmallVec<[Point; MAX_NEIGHBORS]>;

/// A free list of reusable `T` values.
pub struct Pool<T> {
    free: Mutex<Vec<T>>,
}

impl<T> Default for Pool<T> {
    fn default() -> Pool<T> {
        Pool::new()
    }
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Pool")
            .field("idle", &self.len_idle())
            .finish()
    }
}

impl<T> Pool<T> {
    pub fn new() -> Pool<T> {
        Pool {
            free: Mutex::new(Vec::new()),
        }
    }

    // A panic while the lock is held cannot leave the free list half-updated, so a poisoned
    // lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of values waiting in the free list.
    pub fn len_idle(&self) -> usize {
        self.lock().len()
    }

    /// Takes an idle value, or creates one with `create` if none is available.
    pub fn checkout_with<F>(&self, create: F) -> Pooled<'_, T>
    where
        F: FnOnce() -> T,
    {
        let value = self.lock().pop().unwrap_or_else(create);
        Pooled {
            pool: self,
            value: Some(value),
        }
    }

    fn give_back(&self, value: T) {
        self.lock().push(value);
    }
}

impl<T: Default> Pool<T> {
    /// Takes an idle value, or a fresh `T::default()` if none is available.
    pub fn checkout(&self) -> Pooled<'_, T> {
        self.checkout_with(T::default)
    }
}

/// Exclusive handle on a pooled value. Returns the value to its pool when dropped.
pub struct Pooled<'a, T> {
    pool: &'a Pool<T>,
    // Only None while dropping
    value: Option<T>,
}

impl<T> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value.as_ref().expect("pooled value taken before drop")
    }
}

impl<T> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.value.as_mut().expect("pooled value taken before drop")
    }
}

impl<T> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.pool.give_back(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn neighbor_buffer_stays_inline() {
        let mut buf = NeighborBuffer::new();
        for i in 0..MAX_NEIGHBORS as i32 {
            buf.push(Point::new(i, i));
        }
        assert!(!buf.spilled());
    }

    #[test]
    fn checkout_reuses_returned_values() {
        let pool: Pool<Vec<u32>> = Pool::new();
        {
            let mut v = pool.checkout();
            v.reserve(64);
            v.push(1);
        }
        assert_eq!(pool.len_idle(), 1);
        let v = pool.checkout();
        assert_eq!(pool.len_idle(), 0);
        assert!(v.capacity() >= 64);
        assert_eq!(v.as_slice(), &[1]);
    }

    #[test]
    fn concurrent_checkouts_are_distinct() {
        let pool: Pool<NeighborBuffer> = Pool::new();
        let a = pool.checkout();
        let b = pool.checkout();
        assert!(!std::ptr::eq(&*a, &*b));
        drop(a);
        drop(b);
        assert_eq!(pool.len_idle(), 2);
    }

    #[test]
    fn pool_is_shareable_between_threads() {
        let pool: Arc<Pool<Vec<usize>>> = Arc::new(Pool::new());
        let handles = (0..4)
            .map(|t| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    for i in 0..100 {
                        let mut v = pool.checkout();
                        v.clear();
                        v.push(t * 1000 + i);
                        assert_eq!(v.len(), 1);
                    }
                })
            })
            .collect::<Vec<_>>();
        for h in handles {
            h.join().unwrap();
        }
        assert!(pool.len_idle() <= 4);
    }
}
