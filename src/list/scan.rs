//! # Flat Scan
//!
//! A scan yields every stored leaf value of every element, in storage order,
//! without building any `T`. The kind of each value comes from the flattened
//! leaf list of the schema, cycled once per element.
//!
//! ## Cursors
//!
//! [`ValueCursor`] is detached from the list: it records where it is and what
//! the list looked like when it started, and borrows the list only for the
//! duration of each `next` call. This lets a caller interleave appends with a
//! scan, which the cursor then detects and refuses to continue:
//!
//! ```text
//! cursor = list.value_cursor()      snapshot: len = 2, generation = 0
//! cursor.next(&list)                ok
//! list.push(&x)                     len = 3
//! cursor.next(&list)                Err(ConcurrentModification)
//! ```
//!
//! A cursor belongs to the list that created it; handing it any other list
//! is an error.
//!
//! The scan bound is fixed at creation, so values appended afterwards would
//! never be reached even if the check were skipped.
//!
//! [`Values`] wraps a cursor with a shared borrow of the list for use as a
//! plain iterator; the borrow rules out modification entirely.

use std::iter::FusedIterator;

use eyre::{eyre, Result};

use super::read::ReadCursor;
use super::ContiguousList;
use crate::error::ContiguousError;
use crate::schema::Record;
use crate::types::Value;

#[derive(Debug, Clone)]
pub struct ValueCursor {
    list_id: u64,
    expected_len: usize,
    expected_generation: u64,
    boundary: usize,
    position: usize,
    leaf: usize,
}

impl ValueCursor {
    /// True if values remain before the bound captured at creation.
    pub fn has_next(&self) -> bool {
        self.position < self.boundary
    }

    /// Decode the next leaf value of `list`.
    ///
    /// Returns `None` once every value present at creation has been yielded.
    /// If the list has been appended to or cleared since, every call fails
    /// with `ContiguousError::ConcurrentModification` and the scan must be
    /// restarted. Passing a list other than the one the cursor was taken
    /// from is an error as well.
    pub fn next<T: Record>(&mut self, list: &ContiguousList<T>) -> Option<Result<Value>> {
        if !self.has_next() {
            return None;
        }
        if list.id != self.list_id {
            return Some(Err(eyre!(
                "value cursor of list {} used on list {}",
                self.list_id,
                list.id
            )));
        }
        if list.len() != self.expected_len || list.generation != self.expected_generation {
            return Some(Err(ContiguousError::ConcurrentModification {
                expected: self.expected_len,
                actual: list.len(),
            }
            .into()));
        }
        Some(self.decode_next(list))
    }

    fn decode_next<T: Record>(&mut self, list: &ContiguousList<T>) -> Result<Value> {
        let leaves = list.schema.leaves();
        let kind = leaves
            .get(self.leaf)
            .ok_or_else(|| eyre!("leaf {} outside schema of {}", self.leaf, leaves.len()))?
            .kind();

        let mut cursor = ReadCursor::new(list.stored_bytes(), self.position);
        let value = cursor.read(kind)?;
        self.position = cursor.position();
        self.leaf = (self.leaf + 1) % leaves.len();
        Ok(value)
    }
}

/// Borrowing iterator over every stored leaf value.
pub struct Values<'a, T: Record> {
    list: &'a ContiguousList<T>,
    cursor: ValueCursor,
}

impl<T: Record> Iterator for Values<'_, T> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next(self.list)
    }
}

impl<T: Record> FusedIterator for Values<'_, T> {}

impl<T: Record> ContiguousList<T> {
    /// Start a detached scan over the values stored right now.
    pub fn value_cursor(&self) -> ValueCursor {
        ValueCursor {
            list_id: self.id,
            expected_len: self.len(),
            expected_generation: self.generation,
            boundary: self.write_cursor,
            position: 0,
            leaf: 0,
        }
    }

    /// Iterate over every stored leaf value in storage order.
    pub fn values(&self) -> Values<'_, T> {
        Values {
            list: self,
            cursor: self.value_cursor(),
        }
    }
}
