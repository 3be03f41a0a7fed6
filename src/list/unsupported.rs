//! Operations a list of encoded elements cannot offer.
//!
//! Elements are variable-length byte runs packed back to back, so replacing,
//! inserting, removing or reordering one would mean shifting every element
//! after it. Equality search would mean materializing every element. These
//! exist so callers porting code from `Vec` get a typed error instead of a
//! missing method, and all of them fail with
//! `ContiguousError::UnsupportedOperation` without touching the list.

use std::cmp::Ordering;
use std::ops::Range;

use eyre::Result;

use super::ContiguousList;
use crate::error::ContiguousError;
use crate::schema::Record;

fn unsupported<R>(operation: &'static str) -> Result<R> {
    Err(ContiguousError::UnsupportedOperation { operation }.into())
}

impl<T: Record> ContiguousList<T> {
    pub fn insert(&mut self, _index: usize, _record: &T) -> Result<()> {
        unsupported("insert")
    }

    pub fn remove(&mut self, _index: usize) -> Result<T> {
        unsupported("remove")
    }

    pub fn set(&mut self, _index: usize, _record: &T) -> Result<T> {
        unsupported("set")
    }

    pub fn contains(&self, _record: &T) -> Result<bool> {
        unsupported("contains")
    }

    pub fn index_of(&self, _record: &T) -> Result<Option<usize>> {
        unsupported("index_of")
    }

    pub fn last_index_of(&self, _record: &T) -> Result<Option<usize>> {
        unsupported("last_index_of")
    }

    pub fn retain<F: FnMut(&T) -> bool>(&mut self, _keep: F) -> Result<()> {
        unsupported("retain")
    }

    pub fn sort_by<F: FnMut(&T, &T) -> Ordering>(&mut self, _compare: F) -> Result<()> {
        unsupported("sort_by")
    }

    pub fn sub_list(&self, _range: Range<usize>) -> Result<Vec<T>> {
        unsupported("sub_list")
    }

    pub fn iter_rev(&self) -> Result<std::iter::Rev<std::vec::IntoIter<T>>> {
        unsupported("iter_rev")
    }
}
