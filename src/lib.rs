//! # contiguous - Packed Record Lists
//!
//! `contiguous` stores a list of structured records as encoded bytes in one
//! growable buffer instead of as individual heap objects. The layout borrows
//! from SQLite's row format: every scalar field becomes a variable-length
//! storage tag followed by a payload no wider than the value needs.
//!
//! - **One allocation per list**: elements are packed back to back and found
//!   through an offset table
//! - **Schema derived once**: each record type describes its fields once and
//!   the derived layout is shared by every list of that type
//! - **No objects on the scan paths**: values can be scanned, streamed in and
//!   rendered to JSON straight from the bytes
//!
//! ## Quick Start
//!
//! ```ignore
//! use contiguous::{ContiguousList, Record, SchemaBuilder};
//!
//! #[derive(Default)]
//! struct Hitchhiker {
//!     name: String,
//!     towel: Option<i32>,
//! }
//!
//! impl Record for Hitchhiker {
//!     fn describe(schema: &mut SchemaBuilder<Self>) {
//!         schema
//!             .scalar("name", |h| &h.name, |h, v| h.name = v)
//!             .scalar("towel", |h| &h.towel, |h, v| h.towel = v);
//!     }
//! }
//!
//! let mut list = ContiguousList::<Hitchhiker>::new()?;
//! list.push(&Hitchhiker { name: "Arthur Dent".into(), towel: Some(1) })?;
//!
//! assert_eq!(list.get(0)?.name, "Arthur Dent");
//! assert_eq!(list.render(0)?, r#"{"name": "Arthur Dent", "towel": 1}"#);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │   rows (RowSource adapters)   serde output   │
//! ├─────────────────────────────────────────────┤
//! │ list: write │ read │ scan │ render │ builder │
//! ├──────────────────────┬──────────────────────┤
//! │  schema (tree, cache) │  types (Value, kinds) │
//! ├──────────────────────┴──────────────────────┤
//! │  encoding: value tags + varints              │
//! ├─────────────────────────────────────────────┤
//! │  memory: BufferPool / PooledBuffer           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`]: capacities, growth factor, nesting limit
//! - [`encoding`]: varint and storage-class codecs
//! - [`types`]: scalar kinds, owned values, the `Scalar` trait
//! - [`schema`]: record declaration, derived schema tree, registry
//! - [`memory`]: pooled byte buffers
//! - [`list`]: the `ContiguousList` container
//! - [`rows`]: filling lists from tabular row sources
//! - [`error`]: typed errors carried inside `eyre` reports
//!
//! ## Features
//!
//! - `sqlite`: [`rows::SqliteRows`], a row source over a `rusqlite` query

pub mod config;
pub mod encoding;
pub mod error;
pub mod list;
pub mod memory;
pub mod rows;
pub mod schema;
pub mod types;

pub use error::ContiguousError;
pub use list::{ContiguousList, FieldWriter, ListBuilder, ValueCursor};
pub use memory::{BufferPool, BufferPoolStats};
pub use rows::{append_rows, append_rows_mapped, collect_rows, MemoryRows, RowSource};
pub use schema::{Record, Schema, SchemaBuilder, SchemaRegistry};
pub use types::{Scalar, ScalarKind, Value};
