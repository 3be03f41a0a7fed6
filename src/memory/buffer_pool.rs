//! # Buffer Pool
//!
//! Capacity-keyed cache of reusable byte buffers for list storage.
//!
//! ## Purpose
//!
//! Every list owns one contiguous buffer that grows geometrically. When a list
//! grows or is dropped its old buffer would otherwise be freed, only for the
//! next list of similar size to allocate the same capacity again. The pool
//! keeps one spare buffer per capacity so that allocation is skipped whenever
//! a capacity has been seen before.
//!
//! ## Usage
//!
//! ```ignore
//! let pool = BufferPool::new();
//!
//! // Acquire a buffer (spare of that exact capacity, or newly allocated)
//! let mut buffer = pool.acquire(4096);
//! buffer[..5].copy_from_slice(b"hello");
//!
//! // Buffer automatically returns to the pool when dropped
//! drop(buffer);
//! assert_eq!(pool.available(), 1);
//! ```
//!
//! ## Design
//!
//! The pool is an explicit object rather than process-wide state: lists
//! receive a handle at construction and tests build an isolated pool each.
//! Handles are cheap `Arc` clones sharing one map.
//!
//! A released buffer replaces any spare already cached under its capacity.
//! The map is unbounded in the number of distinct capacities; since lists grow
//! by a fixed factor from a fixed start, the set of capacities seen in practice
//! is small. Contents of reused buffers are stale, never cleared; the list only
//! reads bytes it has written itself.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::Mutex;
use tracing::{debug, trace};

/// A shared cache of spare buffers keyed by capacity.
pub struct BufferPool {
    inner: Arc<BufferPoolInner>,
}

struct BufferPoolInner {
    spares: Mutex<HashMap<usize, Vec<u8>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
    releases: AtomicUsize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferPoolStats {
    pub hits: usize,
    pub misses: usize,
    pub releases: usize,
}

impl BufferPoolInner {
    fn take(&self, capacity: usize) -> Vec<u8> {
        let spare = self.spares.lock().remove(&capacity);
        match spare {
            Some(buffer) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!(capacity, "buffer pool hit");
                buffer
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(capacity, "buffer pool miss, allocating");
                vec![0u8; capacity]
            }
        }
    }

    fn give_back(&self, buffer: Vec<u8>) {
        self.releases.fetch_add(1, Ordering::Relaxed);
        self.spares.lock().insert(buffer.len(), buffer);
    }
}

impl BufferPool {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BufferPoolInner {
                spares: Mutex::new(HashMap::new()),
                hits: AtomicUsize::new(0),
                misses: AtomicUsize::new(0),
                releases: AtomicUsize::new(0),
            }),
        }
    }

    /// Acquire a buffer of exactly `capacity` bytes.
    ///
    /// Served from the spare cached under that capacity when there is one,
    /// freshly allocated otherwise. The buffer returns to this pool when
    /// dropped.
    pub fn acquire(&self, capacity: usize) -> PooledBuffer {
        PooledBuffer {
            data: self.inner.take(capacity),
            pool: Arc::clone(&self.inner),
        }
    }

    /// Return a buffer to the pool it came from. Equivalent to dropping it.
    pub fn release(&self, buffer: PooledBuffer) {
        drop(buffer);
    }

    /// Number of spare buffers currently cached.
    pub fn available(&self) -> usize {
        self.inner.spares.lock().len()
    }

    pub fn stats(&self) -> BufferPoolStats {
        BufferPoolStats {
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
            releases: self.inner.releases.load(Ordering::Relaxed),
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for BufferPool {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferPool")
            .field("available", &self.available())
            .field("stats", &self.stats())
            .finish()
    }
}

/// A byte buffer that returns to its pool when dropped.
///
/// Dereferences to `[u8]`; its length is its capacity.
pub struct PooledBuffer {
    data: Vec<u8>,
    pool: Arc<BufferPoolInner>,
}

impl PooledBuffer {
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Swap this buffer for one of `capacity` bytes from the same pool,
    /// carrying over the first `preserve` bytes. The old buffer goes back to
    /// the pool only after the copy.
    pub fn grow(&mut self, capacity: usize, preserve: usize) {
        let mut grown = self.pool.take(capacity);
        grown[..preserve].copy_from_slice(&self.data[..preserve]);
        let old = std::mem::replace(&mut self.data, grown);
        self.pool.give_back(old);
    }
}

impl std::fmt::Debug for PooledBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl Deref for PooledBuffer {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl DerefMut for PooledBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        let data = std::mem::take(&mut self.data);
        if !data.is_empty() {
            self.pool.give_back(data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_acquire_and_return() {
        let pool = BufferPool::new();
        assert_eq!(pool.available(), 0);

        let buf1 = pool.acquire(128);
        let buf2 = pool.acquire(256);
        assert_eq!(buf1.capacity(), 128);
        assert_eq!(buf2.capacity(), 256);
        assert_eq!(pool.available(), 0);

        drop(buf1);
        assert_eq!(pool.available(), 1);

        pool.release(buf2);
        assert_eq!(pool.available(), 2);
    }

    #[test]
    fn released_buffer_is_reused_for_same_capacity() {
        let pool = BufferPool::new();

        let mut buf = pool.acquire(64);
        buf[0] = 0xAB;
        drop(buf);

        let reused = pool.acquire(64);
        assert_eq!(reused[0], 0xAB);
        assert_eq!(
            pool.stats(),
            BufferPoolStats {
                hits: 1,
                misses: 1,
                releases: 1
            }
        );
    }

    #[test]
    fn other_capacity_misses() {
        let pool = BufferPool::new();
        drop(pool.acquire(64));

        let _buf = pool.acquire(96);
        assert_eq!(pool.stats().misses, 2);
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn grow_preserves_prefix_and_releases_old() {
        let pool = BufferPool::new();
        let mut buf = pool.acquire(4);
        buf.copy_from_slice(&[1, 2, 3, 4]);

        buf.grow(6, 3);
        assert_eq!(buf.capacity(), 6);
        assert_eq!(&buf[..3], &[1, 2, 3]);
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn pool_clone_shares_buffers() {
        let pool1 = BufferPool::new();
        let pool2 = pool1.clone();

        drop(pool1.acquire(32));
        assert_eq!(pool2.available(), 1);
    }

    #[test]
    fn concurrent_acquire_release() {
        let pool = BufferPool::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let pool = pool.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let mut buf = pool.acquire(64 * (i % 2 + 1));
                        buf[0] = i as u8;
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stats = pool.stats();
        assert_eq!(stats.hits + stats.misses, 800);
        assert_eq!(stats.releases, 800);
        assert!(pool.available() <= 2);
    }
}
