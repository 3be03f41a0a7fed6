//! # Scalar Type System
//!
//! This module provides the leaf-level type system shared by the schema, the
//! value codec and the list.
//!
//! ## Module Structure
//!
//! - `kind`: `ScalarKind`, the discriminant of a schema leaf
//! - `value`: Owned `Value` with storage conversion and coercion
//! - `scalar`: The `Scalar` trait mapping Rust field types to kinds
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `ScalarKind` | What a leaf stores and how it is narrowed on read |
//! | `Value` | One typed leaf value, or `Null` |
//! | `Scalar` | Rust types usable as leaf fields or as a root element |
//!
//! ## Usage
//!
//! ```ignore
//! use contiguous::types::{Scalar, ScalarKind, Value};
//!
//! assert_eq!(i32::KIND, ScalarKind::Int);
//! assert_eq!(Value::Long(42).coerce(ScalarKind::Int)?, Value::Int(42));
//! ```

mod kind;
mod scalar;
mod value;

pub use kind::ScalarKind;
pub use scalar::Scalar;
pub use value::Value;
