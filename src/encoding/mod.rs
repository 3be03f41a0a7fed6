//! # Encoding Module
//!
//! This module provides the byte-level codecs the list writes with:
//!
//! - **Varint encoding**: SQLite-style variable-length integers for storage tags
//! - **Value encoding**: Tag-dispatched scalar payloads modelled on SQLite storage classes
//!
//! Both are pure functions over byte slices and neither allocates. Decoded
//! text is borrowed from the input.

pub mod value;
pub mod varint;

pub use value::StoredValue;
pub use varint::{decode_varint, encode_varint, varint_len};
