//! # List Builder
//!
//! Fluent configuration for a new [`ContiguousList`].
//!
//! ```ignore
//! let pool = BufferPool::new();
//! let list = ContiguousList::<Person>::builder()
//!     .pool(pool.clone())
//!     .initial_capacity(64 * 1024)
//!     .growth_factor(2.0)
//!     .build()?;
//! ```
//!
//! Settings are validated in `build()`, which is also where the element
//! schema is resolved, so a builder for an invalid record type fails there.

use std::marker::PhantomData;

use eyre::{ensure, Result};

use super::ContiguousList;
use crate::config::{DEFAULT_GROWTH_FACTOR, DEFAULT_INITIAL_CAPACITY, MIN_BUFFER_CAPACITY, MIN_GROWTH_FACTOR};
use crate::memory::BufferPool;
use crate::schema::{Record, SchemaRegistry};

pub struct ListBuilder<T> {
    pool: Option<BufferPool>,
    initial_capacity: usize,
    growth_factor: f64,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> Default for ListBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> ListBuilder<T> {
    pub fn new() -> Self {
        Self {
            pool: None,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            _marker: PhantomData,
        }
    }

    /// Pool to draw buffers from and return them to. Without one the list
    /// gets a private pool of its own.
    pub fn pool(mut self, pool: BufferPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Bytes to allocate up front. Raised to `MIN_BUFFER_CAPACITY` if smaller.
    pub fn initial_capacity(mut self, bytes: usize) -> Self {
        self.initial_capacity = bytes;
        self
    }

    /// Factor the buffer capacity is multiplied by when it runs out.
    pub fn growth_factor(mut self, factor: f64) -> Self {
        self.growth_factor = factor;
        self
    }

    pub fn build(self) -> Result<ContiguousList<T>> {
        ensure!(
            self.growth_factor.is_finite() && self.growth_factor >= MIN_GROWTH_FACTOR,
            "growth factor must be a finite number of at least {}, got {}",
            MIN_GROWTH_FACTOR,
            self.growth_factor
        );

        let schema = SchemaRegistry::global().schema_of::<T>()?;
        let pool = self.pool.unwrap_or_default();
        let buffer = pool.acquire(self.initial_capacity.max(MIN_BUFFER_CAPACITY));
        Ok(ContiguousList::from_parts(schema, buffer, self.growth_factor))
    }
}
