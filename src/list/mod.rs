//! # Contiguous List
//!
//! `ContiguousList<T>` is an append-only list that stores its elements as
//! encoded bytes in one growable buffer instead of as objects. An element is
//! decomposed into the scalar leaves of its schema on append and rebuilt into
//! a fresh `T` on every read.
//!
//! ## Layout
//!
//! ```text
//! buffer:  [ elem 0 leaves ][ elem 1 leaves ][ elem 2 leaves ][ free ... ]
//!          ^                ^                ^                ^
//! offsets: 0                o1               o2               write_cursor
//! ```
//!
//! `offsets[i]` is where element `i` starts; the list always keeps one more
//! offset than it has elements, the last being `write_cursor`. Elements never
//! move relative to the start of the buffer, so growth only has to copy the
//! written prefix into a larger buffer.
//!
//! ## Access Paths
//!
//! | Path | Module | Produces |
//! |------|--------|----------|
//! | `push` / `append` | `write` | encoded leaves from a record |
//! | `field_writer` | `write` | encoded leaves from loose values, no record |
//! | `get` / `iter` | `read` | a materialized `T` |
//! | `values` / `value_cursor` | `scan` | each leaf value in storage order |
//! | `render` / `json_elements` | `render` | JSON text straight from the bytes |
//!
//! ## Mutation
//!
//! Elements can only be appended and the whole list cleared. Everything that
//! would rewrite or reorder stored bytes fails with
//! `ContiguousError::UnsupportedOperation`.
//!
//! ## Thread Safety
//!
//! A list is `Send` and `Sync` but not internally synchronized; the borrow
//! checker already keeps appends from racing reads. The only shared state is
//! the buffer pool, which is thread-safe.

mod builder;
mod read;
mod render;
mod scan;
mod unsupported;
mod write;


use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use eyre::{bail, Result};
use tracing::{debug, trace};

use crate::config::MIN_BUFFER_CAPACITY;
use crate::encoding::StoredValue;
use crate::error::ContiguousError;
use crate::memory::{BufferPool, PooledBuffer};
use crate::schema::{Record, Schema};

pub use builder::ListBuilder;
pub use read::Elements;
pub use render::JsonElements;
pub use scan::{ValueCursor, Values};
pub use write::{FieldSlot, FieldWriter};

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

pub struct ContiguousList<T> {
    id: u64,
    schema: Arc<Schema>,
    buffer: PooledBuffer,
    write_cursor: usize,
    offsets: Vec<usize>,
    generation: u64,
    growth_factor: f64,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> ContiguousList<T> {
    /// Create an empty list with default settings and a private buffer pool.
    pub fn new() -> Result<Self> {
        ListBuilder::new().build()
    }

    /// Create an empty list drawing buffers from `pool`.
    pub fn with_pool(pool: &BufferPool) -> Result<Self> {
        ListBuilder::new().pool(pool.clone()).build()
    }

    pub fn builder() -> ListBuilder<T> {
        ListBuilder::new()
    }

    fn from_parts(schema: Arc<Schema>, buffer: PooledBuffer, growth_factor: f64) -> Self {
        Self {
            id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed),
            schema,
            buffer,
            write_cursor: 0,
            offsets: vec![0],
            generation: 0,
            growth_factor,
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Current buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// The written region of the buffer: every stored element, back to back.
    pub fn stored_bytes(&self) -> &[u8] {
        &self.buffer[..self.write_cursor]
    }

    /// Forget every element. The buffer and its capacity are kept.
    pub fn clear(&mut self) {
        self.write_cursor = 0;
        self.offsets.truncate(1);
        self.generation += 1;
    }

    /// Drop the list, returning its buffer to the pool.
    pub fn close(self) {
        debug!(
            len = self.len(),
            capacity = self.capacity(),
            "closing contiguous list"
        );
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.len();
        if index >= len {
            bail!(ContiguousError::IndexOutOfRange { index, len });
        }
        Ok(())
    }

    /// Byte offset where element `index` starts. `index` must be checked.
    fn element_start(&self, index: usize) -> usize {
        self.offsets[index]
    }

    fn ensure_free(&mut self, len: usize) {
        let required = self.write_cursor + len;
        let current = self.buffer.capacity();
        if required <= current {
            return;
        }

        let mut capacity = current.max(MIN_BUFFER_CAPACITY);
        while capacity < required {
            capacity = (capacity as f64 * self.growth_factor).ceil() as usize;
        }
        debug!(from = current, to = capacity, "growing list buffer");
        self.buffer.grow(capacity, self.write_cursor);
    }

    fn store(&mut self, value: &StoredValue<'_>) {
        self.ensure_free(value.encoded_len());
        let written = value.encode(&mut self.buffer[self.write_cursor..]);
        self.write_cursor += written;
    }

    fn seal_element(&mut self) {
        self.offsets.push(self.write_cursor);
        trace!(
            index = self.len() - 1,
            end = self.write_cursor,
            "sealed list element"
        );
    }
}

impl<T> std::fmt::Debug for ContiguousList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContiguousList")
            .field("type_name", &self.schema.type_name())
            .field("len", &(self.offsets.len() - 1))
            .field("stored_bytes", &self.write_cursor)
            .field("capacity", &self.buffer.capacity())
            .finish()
    }
}
