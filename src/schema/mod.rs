//! # Record Schemas
//!
//! A schema is the fixed layout every element of one type is stored in: the
//! ordered tree of its fields, down to scalar leaves. It is derived once per
//! type from the type's [`Record`] declaration and never changes afterwards.
//!
//! ## Components
//!
//! | Item | Role |
//! |------|------|
//! | [`Record`], [`SchemaBuilder`] | field declaration by element types |
//! | [`SchemaNode`], [`ScalarNode`], [`CompoundNode`] | the derived tree |
//! | [`Schema`], [`Leaf`] | tree root plus the flattened leaf order |
//! | [`SchemaRegistry`] | per-type cache of derived schemas |
//!
//! ## Storage Order
//!
//! Leaves are stored depth-first in declaration order. For
//!
//! ```text
//! Outer { a: String, inner: Inner { b: i32, c: f64 }, d: i64 }
//! ```
//!
//! one element is the encoded values of `a`, `b`, `c` and `d` back to back,
//! with no framing for `inner`. Readers that walk the same tree consume exactly the
//! bytes writers produced.
//!
//! ## Scalar Elements
//!
//! Every [`Scalar`](crate::types::Scalar) type and its `Option` is itself a
//! `Record` whose schema is a single unnamed leaf, so `ContiguousList<String>`
//! and `ContiguousList<Option<i64>>` work without any declaration.

mod accessor;
mod builder;
mod node;
mod registry;

pub use builder::{derive_schema, Record, SchemaBuilder};
pub use node::{CompoundNode, Leaf, ScalarNode, Schema, SchemaNode};
pub use registry::SchemaRegistry;
