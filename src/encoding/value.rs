//! # Tagged Value Encoding
//!
//! Every leaf is stored as a varint tag followed by a payload. The tag alone
//! determines the storage class and the payload length, so a stored scalar can
//! be decoded without any type hint. The classes follow SQLite's record format
//! with one addition (tag 10, a 4-byte float).
//!
//! ## Tag Table
//!
//! | Tag | Storage class | Payload |
//! |-----|---------------|---------|
//! | 0 | NULL | none |
//! | 1 - 4 | integer | 1 - 4 bytes, big-endian two's complement |
//! | 5 | integer | 6 bytes |
//! | 6 | integer | 8 bytes |
//! | 7 | double | 8 bytes IEEE-754 |
//! | 8 | integer 0 | none |
//! | 9 | integer 1 | none |
//! | 10 | float | 4 bytes IEEE-754 |
//! | 11 | reserved | - |
//! | N >= 12, even | blob | (N - 12) / 2 bytes, never written |
//! | N >= 13, odd | text | (N - 13) / 2 bytes UTF-8 |
//!
//! ## Integer Width Selection
//!
//! The narrowest width in {1, 2, 3, 4, 6, 8} that holds the value is used.
//! A value needing 5 bytes is promoted to 6 and one needing 7 to 8. The values
//! 0 and 1 carry no payload at all.
//!
//! ```text
//! 42          -> [0x01, 0x2A]
//! -42         -> [0x01, 0xD6]
//! 0           -> [0x08]
//! 1           -> [0x09]
//! "hi"        -> [0x11, b'h', b'i']     tag = (2 << 1) + 13 = 17
//! ```
//!
//! ## Zero-Copy Decoding
//!
//! `StoredValue::decode` borrows text payloads straight out of the buffer. The
//! caller decides whether to allocate (`Value::from_stored`) or to render the
//! borrowed text directly.

use std::borrow::Cow;

use eyre::{bail, ensure, eyre, Result, WrapErr};

use super::varint::{decode_varint, encode_varint, varint_len};

pub const TAG_NULL: u64 = 0;
pub const TAG_INT48: u64 = 5;
pub const TAG_INT64: u64 = 6;
pub const TAG_DOUBLE: u64 = 7;
pub const TAG_ZERO: u64 = 8;
pub const TAG_ONE: u64 = 9;
pub const TAG_FLOAT: u64 = 10;
pub const TAG_BLOB_BASE: u64 = 12;
pub const TAG_TEXT_BASE: u64 = 13;

const MAX_24BITS: i64 = 8_388_607;
const MAX_48BITS: i64 = 140_737_488_355_327;

/// A scalar in its storage class, as written to or read from the buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue<'a> {
    Null,
    Integer(i64),
    Float(f32),
    Double(f64),
    Text(Cow<'a, str>),
}

/// Payload width in bytes for a stored integer; 0 for the values 0 and 1.
pub fn integer_width(value: i64) -> usize {
    if value == 0 || value == 1 {
        return 0;
    }
    let magnitude = if value < 0 { !value } else { value };
    if magnitude <= i8::MAX as i64 {
        1
    } else if magnitude <= i16::MAX as i64 {
        2
    } else if magnitude <= MAX_24BITS {
        3
    } else if magnitude <= i32::MAX as i64 {
        4
    } else if magnitude <= MAX_48BITS {
        6
    } else {
        8
    }
}

fn integer_tag(value: i64) -> u64 {
    match value {
        0 => TAG_ZERO,
        1 => TAG_ONE,
        _ => match integer_width(value) {
            6 => TAG_INT48,
            8 => TAG_INT64,
            width => width as u64,
        },
    }
}

impl<'a> StoredValue<'a> {
    pub fn storage_class(&self) -> &'static str {
        match self {
            StoredValue::Null => "null",
            StoredValue::Integer(_) => "integer",
            StoredValue::Float(_) => "float",
            StoredValue::Double(_) => "double",
            StoredValue::Text(_) => "text",
        }
    }

    pub fn tag(&self) -> u64 {
        match self {
            StoredValue::Null => TAG_NULL,
            StoredValue::Integer(v) => integer_tag(*v),
            StoredValue::Float(_) => TAG_FLOAT,
            StoredValue::Double(_) => TAG_DOUBLE,
            StoredValue::Text(text) => ((text.len() as u64) << 1) + TAG_TEXT_BASE,
        }
    }

    pub fn payload_len(&self) -> usize {
        match self {
            StoredValue::Null => 0,
            StoredValue::Integer(v) => integer_width(*v),
            StoredValue::Float(_) => 4,
            StoredValue::Double(_) => 8,
            StoredValue::Text(text) => text.len(),
        }
    }

    pub fn encoded_len(&self) -> usize {
        varint_len(self.tag()) + self.payload_len()
    }

    /// Writes tag and payload to the front of `buf`, which must hold at
    /// least `encoded_len()` bytes. Returns the number of bytes written.
    pub fn encode(&self, buf: &mut [u8]) -> usize {
        let tag_len = encode_varint(self.tag(), buf);
        let payload = &mut buf[tag_len..];
        let payload_len = match self {
            StoredValue::Null => 0,
            StoredValue::Integer(v) => {
                let width = integer_width(*v);
                payload[..width].copy_from_slice(&v.to_be_bytes()[8 - width..]);
                width
            }
            StoredValue::Float(v) => {
                payload[..4].copy_from_slice(&v.to_be_bytes());
                4
            }
            StoredValue::Double(v) => {
                payload[..8].copy_from_slice(&v.to_be_bytes());
                8
            }
            StoredValue::Text(text) => {
                payload[..text.len()].copy_from_slice(text.as_bytes());
                text.len()
            }
        };
        tag_len + payload_len
    }

    /// Reads one stored scalar from the front of `buf`. Returns the value and
    /// the number of bytes consumed.
    pub fn decode(buf: &'a [u8]) -> Result<(Self, usize)> {
        let (tag, tag_len) = decode_varint(buf)?;
        let payload = &buf[tag_len..];

        let (value, payload_len) = match tag {
            TAG_NULL => (StoredValue::Null, 0),
            1..=4 => {
                let width = tag as usize;
                (StoredValue::Integer(read_integer(payload, width)?), width)
            }
            TAG_INT48 => (StoredValue::Integer(read_integer(payload, 6)?), 6),
            TAG_INT64 => (StoredValue::Integer(read_integer(payload, 8)?), 8),
            TAG_DOUBLE => {
                let bytes = fixed::<8>(payload, "double")?;
                (StoredValue::Double(f64::from_be_bytes(bytes)), 8)
            }
            TAG_ZERO => (StoredValue::Integer(0), 0),
            TAG_ONE => (StoredValue::Integer(1), 0),
            TAG_FLOAT => {
                let bytes = fixed::<4>(payload, "float")?;
                (StoredValue::Float(f32::from_be_bytes(bytes)), 4)
            }
            t if t >= TAG_TEXT_BASE && t % 2 == 1 => {
                let len = usize::try_from((t - TAG_TEXT_BASE) >> 1)
                    .map_err(|_| eyre!("text length in tag {} overflows usize", t))?;
                ensure!(
                    payload.len() >= len,
                    "truncated text: need {} bytes, have {}",
                    len,
                    payload.len()
                );
                let text = std::str::from_utf8(&payload[..len])
                    .wrap_err("stored text is not valid UTF-8")?;
                (StoredValue::Text(Cow::Borrowed(text)), len)
            }
            t if t >= TAG_BLOB_BASE => bail!("blob storage class (tag {}) is not supported", t),
            t => bail!("unknown storage tag {}", t),
        };

        Ok((value, tag_len + payload_len))
    }

    pub fn into_owned(self) -> StoredValue<'static> {
        match self {
            StoredValue::Null => StoredValue::Null,
            StoredValue::Integer(v) => StoredValue::Integer(v),
            StoredValue::Float(v) => StoredValue::Float(v),
            StoredValue::Double(v) => StoredValue::Double(v),
            StoredValue::Text(text) => StoredValue::Text(Cow::Owned(text.into_owned())),
        }
    }
}

fn read_integer(payload: &[u8], width: usize) -> Result<i64> {
    ensure!(
        payload.len() >= width,
        "truncated {}-byte integer",
        width
    );
    let bytes = &payload[..width];
    let mut value: i64 = if bytes[0] & 0x80 != 0 { -1 } else { 0 };
    for &b in bytes {
        value = (value << 8) | b as i64;
    }
    Ok(value)
}

fn fixed<const N: usize>(payload: &[u8], what: &str) -> Result<[u8; N]> {
    ensure!(payload.len() >= N, "truncated {}", what);
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&payload[..N]);
    Ok(bytes)
}
