//! # JSON Rendering
//!
//! Elements are rendered to JSON text directly from their stored bytes,
//! without materializing a `T`.
//!
//! | Element | Output |
//! |---------|--------|
//! | string | `"Douglas Adams"` (escaped) |
//! | integer, float | `42`, `1.5` |
//! | big number | canonical decimal text, unquoted |
//! | null, NaN, infinity | `null` |
//! | record | `{"name": "value", "inner": {"n": 1}}` |
//!
//! Record fields are separated by `", "` and keys by `": "`; arrays produced
//! by `to_json_array` use a bare `,`. The `Serialize` impl hands pre-rendered
//! elements to serde as raw JSON, so a list can be embedded in any
//! serde_json document without going through `T`.

use std::fmt::Write as _;
use std::iter::FusedIterator;

use eyre::{eyre, Result};
use serde::ser::{Error as _, SerializeSeq, Serializer};
use serde::Serialize;
use serde_json::value::RawValue;

use super::read::ReadCursor;
use super::ContiguousList;
use crate::config::RENDER_CAPACITY_HINT;
use crate::encoding::StoredValue;
use crate::schema::{CompoundNode, Record, SchemaNode};
use crate::types::ScalarKind;

impl<T: Record> ContiguousList<T> {
    /// Render the element at `index` as JSON text.
    pub fn render(&self, index: usize) -> Result<String> {
        let mut out = String::with_capacity(RENDER_CAPACITY_HINT);
        self.render_into(index, &mut out)?;
        Ok(out)
    }

    /// Append the JSON text of the element at `index` to `out`.
    pub fn render_into(&self, index: usize, out: &mut String) -> Result<()> {
        self.check_index(index)?;
        let mut cursor = ReadCursor::new(self.stored_bytes(), self.element_start(index));
        match self.schema.root() {
            SchemaNode::Scalar(leaf) => write_scalar(out, leaf.kind(), cursor.next_stored()?),
            SchemaNode::Compound(node) => write_compound(out, &mut cursor, node),
        }
    }

    /// Lazily render each element in order.
    pub fn json_elements(&self) -> JsonElements<'_, T> {
        JsonElements {
            list: self,
            index: 0,
        }
    }

    /// Render the whole list as one JSON array.
    pub fn to_json_array(&self) -> Result<String> {
        let mut out = String::with_capacity(2 + self.len() * RENDER_CAPACITY_HINT / 4);
        out.push('[');
        for index in 0..self.len() {
            if index > 0 {
                out.push(',');
            }
            self.render_into(index, &mut out)?;
        }
        out.push(']');
        Ok(out)
    }

    /// Render the whole list as one JSON array, then release the list.
    pub fn into_json_array(self) -> Result<String> {
        let json = self.to_json_array();
        self.close();
        json
    }
}

fn write_compound(out: &mut String, cursor: &mut ReadCursor<'_>, node: &CompoundNode) -> Result<()> {
    out.push('{');
    for (position, child) in node.children().iter().enumerate() {
        if position > 0 {
            out.push_str(", ");
        }
        let name = child
            .name()
            .ok_or_else(|| eyre!("unnamed field inside {}", node.type_name()))?;
        write_string(out, name)?;
        out.push_str(": ");
        match child {
            SchemaNode::Scalar(leaf) => write_scalar(out, leaf.kind(), cursor.next_stored()?)?,
            SchemaNode::Compound(nested) => write_compound(out, cursor, nested)?,
        }
    }
    out.push('}');
    Ok(())
}

fn write_scalar(out: &mut String, kind: ScalarKind, stored: StoredValue<'_>) -> Result<()> {
    match stored {
        StoredValue::Null => out.push_str("null"),
        StoredValue::Integer(v) => write!(out, "{}", v)?,
        StoredValue::Float(v) if v.is_finite() => write!(out, "{}", v)?,
        StoredValue::Double(v) if v.is_finite() => write!(out, "{}", v)?,
        StoredValue::Float(_) | StoredValue::Double(_) => out.push_str("null"),
        StoredValue::Text(text) if kind.is_quoted() => write_string(out, &text)?,
        StoredValue::Text(text) => out.push_str(&text),
    }
    Ok(())
}

fn write_string(out: &mut String, text: &str) -> Result<()> {
    out.push_str(&serde_json::to_string(text)?);
    Ok(())
}

/// Single-pass iterator of rendered elements, from
/// [`ContiguousList::json_elements`].
pub struct JsonElements<'a, T: Record> {
    list: &'a ContiguousList<T>,
    index: usize,
}

impl<T: Record> Iterator for JsonElements<'_, T> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.list.len() {
            return None;
        }
        let rendered = self.list.render(self.index);
        self.index += 1;
        Some(rendered)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<T: Record> ExactSizeIterator for JsonElements<'_, T> {}

impl<T: Record> FusedIterator for JsonElements<'_, T> {}

impl<T: Record> Serialize for ContiguousList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self.json_elements() {
            let text = element.map_err(S::Error::custom)?;
            let raw = RawValue::from_string(text).map_err(S::Error::custom)?;
            seq.serialize_element(&raw)?;
        }
        seq.end()
    }
}
