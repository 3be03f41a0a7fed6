//! # Buffer Memory
//!
//! This module owns the one resource shared between lists: the pool of spare
//! storage buffers. Lists acquire their initial buffer here, swap it for a
//! larger one on growth, and give it back when dropped.
//!
//! ```text
//! ContiguousList ──acquire(cap)──> BufferPool ──> PooledBuffer
//!       │                              ^
//!       └── grow(cap * 1.5) ───────────┤  old buffer released after copy
//!       └── drop / close ──────────────┘
//! ```
//!
//! `acquire` and `release` are safe to call from any thread; a buffer is never
//! handed out twice, and one that has been released may be reused right away
//! by an unrelated list.

mod buffer_pool;

pub use buffer_pool::{BufferPool, BufferPoolStats, PooledBuffer};
