//! # Read Path
//!
//! `get` rebuilds an element by walking the schema tree in the same order the
//! write path did, decoding one leaf per scalar node from the element's start
//! offset. Nested records are constructed blank, filled, and then attached to
//! their parent. Every call allocates a new `T`; there is no element cache.

use std::any::Any;
use std::iter::FusedIterator;

use eyre::{eyre, Result, WrapErr};

use super::ContiguousList;
use crate::encoding::StoredValue;
use crate::schema::{CompoundNode, Record, SchemaNode};
use crate::types::{ScalarKind, Value};

impl<T: Record> ContiguousList<T> {
    /// Materialize the element at `index`.
    pub fn get(&self, index: usize) -> Result<T> {
        self.check_index(index)?;
        let mut cursor = ReadCursor::new(self.stored_bytes(), self.element_start(index));
        let mut record = T::default();
        match self.schema.root() {
            SchemaNode::Scalar(leaf) => {
                let value = cursor.read(leaf.kind())?;
                leaf.accessor().write(&mut record, value)?;
            }
            SchemaNode::Compound(node) => fill_compound(&mut cursor, node, &mut record)
                .wrap_err_with(|| format!("reading element {}", index))?,
        }
        Ok(record)
    }

    /// Iterate over materialized elements in insertion order.
    pub fn iter(&self) -> Elements<'_, T> {
        Elements {
            list: self,
            index: 0,
        }
    }

    /// Materialize every element.
    pub fn to_vec(&self) -> Result<Vec<T>> {
        self.iter().collect()
    }
}

fn fill_compound(
    cursor: &mut ReadCursor<'_>,
    node: &CompoundNode,
    target: &mut dyn Any,
) -> Result<()> {
    for child in node.children() {
        match child {
            SchemaNode::Scalar(leaf) => {
                let value = cursor.read(leaf.kind())?;
                leaf.accessor()
                    .write(target, value)
                    .wrap_err_with(|| format!("field {:?}", leaf.name().unwrap_or_default()))?;
            }
            SchemaNode::Compound(nested) => {
                let accessor = nested.accessor()?;
                let mut instance = accessor.construct();
                fill_compound(cursor, nested, &mut *instance)?;
                accessor.attach(target, instance)?;
            }
        }
    }
    Ok(())
}

/// Decoding position inside the written region of a list buffer.
pub(crate) struct ReadCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ReadCursor<'a> {
    pub(crate) fn new(data: &'a [u8], position: usize) -> Self {
        Self { data, position }
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn next_stored(&mut self) -> Result<StoredValue<'a>> {
        let data: &'a [u8] = self.data;
        let remaining = data
            .get(self.position..)
            .ok_or_else(|| eyre!("read position {} past end of data", self.position))?;
        let (value, consumed) = StoredValue::decode(remaining)?;
        self.position += consumed;
        Ok(value)
    }

    pub(crate) fn read(&mut self, kind: ScalarKind) -> Result<Value> {
        Value::from_stored(kind, self.next_stored()?)
    }
}

/// Iterator over materialized elements, from [`ContiguousList::iter`].
pub struct Elements<'a, T: Record> {
    list: &'a ContiguousList<T>,
    index: usize,
}

impl<T: Record> Iterator for Elements<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.list.len() {
            return None;
        }
        let element = self.list.get(self.index);
        self.index += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<T: Record> ExactSizeIterator for Elements<'_, T> {}

impl<T: Record> FusedIterator for Elements<'_, T> {}

impl<'a, T: Record> IntoIterator for &'a ContiguousList<T> {
    type Item = Result<T>;
    type IntoIter = Elements<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
