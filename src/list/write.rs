//! # Write Path
//!
//! Two ways to get an element into the list:
//!
//! - `push`/`append` walk the schema tree over a record, reading each leaf
//!   through its accessor.
//! - [`FieldWriter`] takes leaf values one at a time from a producer that has
//!   no record at hand (a row source, a parser), coercing each to the kind of
//!   the leaf it fills.
//!
//! Either way a failure part-way through an element rewinds the write cursor
//! to where the element began, so the list holds only whole elements.

use std::any::Any;
use std::borrow::Borrow;
use std::sync::Arc;

use eyre::{ensure, eyre, Result, WrapErr};

use super::ContiguousList;
use crate::schema::{CompoundNode, Leaf, Record, ScalarNode, Schema, SchemaNode};
use crate::types::Value;

impl<T: Record> ContiguousList<T> {
    /// Append one element.
    pub fn push(&mut self, record: &T) -> Result<()> {
        let start = self.write_cursor;
        let schema = Arc::clone(&self.schema);
        let written = match schema.root() {
            SchemaNode::Scalar(leaf) => self.store_leaf(leaf, record),
            SchemaNode::Compound(node) => self.store_compound(node, record),
        };
        if let Err(err) = written {
            self.write_cursor = start;
            return Err(err);
        }
        self.seal_element();
        Ok(())
    }

    /// Append an element if there is one. `None` is rejected with `false`
    /// and leaves the list untouched.
    pub fn append(&mut self, record: Option<&T>) -> Result<bool> {
        match record {
            Some(record) => {
                self.push(record)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Append every record in order. Stops at the first failure, keeping the
    /// records appended before it.
    pub fn append_all<I>(&mut self, records: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let mut appended = 0;
        for record in records {
            self.push(record.borrow())?;
            appended += 1;
        }
        Ok(appended)
    }

    /// Start a streaming write of elements given as loose leaf values.
    pub fn field_writer(&mut self) -> FieldWriter<'_, T> {
        FieldWriter {
            schema: Arc::clone(&self.schema),
            record_start: self.write_cursor,
            next_leaf: 0,
            list: self,
        }
    }

    fn store_leaf(&mut self, leaf: &ScalarNode, record: &dyn Any) -> Result<()> {
        let value = leaf.accessor().read(record)?;
        self.store(&value.to_stored());
        Ok(())
    }

    fn store_compound(&mut self, node: &CompoundNode, record: &dyn Any) -> Result<()> {
        for child in node.children() {
            match child {
                SchemaNode::Scalar(leaf) => self.store_leaf(leaf, record)?,
                SchemaNode::Compound(nested) => {
                    let inner = nested.accessor()?.child(record)?;
                    self.store_compound(nested, inner)?;
                }
            }
        }
        Ok(())
    }
}

/// Streaming element writer.
///
/// Leaves are filled strictly in storage order; `finish_record` seals the
/// element once every leaf has a value. Dropping the writer in the middle of
/// an element discards that element.
///
/// ```ignore
/// let mut writer = list.field_writer();
/// for row in rows {
///     while let Some(field) = writer.next_field() {
///         let value = row.get(field.name().unwrap_or("value"));
///         field.set(value)?;
///     }
///     writer.finish_record()?;
/// }
/// ```
pub struct FieldWriter<'a, T: Record> {
    list: &'a mut ContiguousList<T>,
    schema: Arc<Schema>,
    next_leaf: usize,
    record_start: usize,
}

impl<'a, T: Record> FieldWriter<'a, T> {
    /// True while the current element still has leaves to fill.
    pub fn has_next(&self) -> bool {
        self.next_leaf < self.schema.leaf_count()
    }

    /// The leaf the next `set` fills.
    pub fn current(&self) -> Option<&Leaf> {
        self.schema.leaves().get(self.next_leaf)
    }

    /// Name of the leaf the next `set` fills. `None` once the element is
    /// complete, and for lists of plain values.
    pub fn field_name(&self) -> Option<&'static str> {
        self.current().and_then(Leaf::name)
    }

    /// Handle on the next unfilled leaf.
    pub fn next_field(&mut self) -> Option<FieldSlot<'_, 'a, T>> {
        if self.has_next() {
            Some(FieldSlot { writer: self })
        } else {
            None
        }
    }

    /// Fill the next leaf, coercing `value` to its kind.
    pub fn set(&mut self, value: impl Into<Value>) -> Result<()> {
        let leaf_count = self.schema.leaf_count();
        let leaf = self.schema.leaves().get(self.next_leaf).ok_or_else(|| {
            eyre!(
                "all {} fields of the element are set, call finish_record",
                leaf_count
            )
        })?;
        let value = value
            .into()
            .coerce(leaf.kind())
            .wrap_err_with(|| format!("field {:?}", leaf.path()))?;
        ensure!(
            leaf.is_nullable() || !value.is_null(),
            "field {:?} is a non-optional {} and cannot be null",
            leaf.path(),
            leaf.kind()
        );
        self.list.store(&value.to_stored());
        self.next_leaf += 1;
        Ok(())
    }

    /// Seal the current element. Fails if any leaf is still unset.
    pub fn finish_record(&mut self) -> Result<()> {
        let leaf_count = self.schema.leaf_count();
        if self.next_leaf != leaf_count {
            return Err(eyre!(
                "element incomplete: {} of {} fields set",
                self.next_leaf,
                leaf_count
            ));
        }
        self.list.seal_element();
        self.next_leaf = 0;
        self.record_start = self.list.write_cursor;
        Ok(())
    }

    /// Discard the leaves written for the current element.
    pub fn abandon_record(&mut self) {
        self.list.write_cursor = self.record_start;
        self.next_leaf = 0;
    }
}

impl<T: Record> Drop for FieldWriter<'_, T> {
    fn drop(&mut self) {
        if self.next_leaf > 0 {
            self.abandon_record();
        }
    }
}

/// One unfilled leaf of a [`FieldWriter`]; consumed by `set`.
pub struct FieldSlot<'w, 'a, T: Record> {
    writer: &'w mut FieldWriter<'a, T>,
}

impl<T: Record> FieldSlot<'_, '_, T> {
    pub fn name(&self) -> Option<&'static str> {
        self.writer.field_name()
    }

    pub fn leaf(&self) -> &Leaf {
        &self.writer.schema.leaves()[self.writer.next_leaf]
    }

    pub fn set(self, value: impl Into<Value>) -> Result<()> {
        self.writer.set(value)
    }
}
