//! # Variable-Length Integer Encoding
//!
//! Storage tags (the leading byte(s) of every stored scalar) are written as
//! SQLite-format varints. Every tag the value codec produces for integers,
//! floats and short strings is below 128 and therefore occupies one byte; only
//! string tags for payloads of 58 bytes or more spill into a second byte.
//!
//! ## Encoding Format
//!
//! Big-endian groups of 7 bits, the high bit of each byte set when another byte
//! follows. A ninth byte, when present, contributes all 8 of its bits:
//!
//! | Value Range              | Bytes |
//! |--------------------------|-------|
//! | 0 - 127                  | 1     |
//! | 128 - 16383              | 2     |
//! | 16384 - 2097151          | 3     |
//! | 2097152 - 268435455      | 4     |
//! | ... 7 more bits per byte | 5 - 8 |
//! | 2^56 - u64::MAX          | 9     |
//!
//! ## Boundary Values
//!
//! - 127: Maximum 1-byte value
//! - 128: Minimum 2-byte value
//! - 16383: Maximum 2-byte value
//! - 2^56 - 1: Maximum 8-byte value
//! - 2^56: Minimum 9-byte value
//!
//! ## Usage Example
//!
//! ```rust
//! use contiguous::encoding::varint::{decode_varint, encode_varint, varint_len};
//!
//! let mut buf = [0u8; 9];
//! let written = encode_varint(1000, &mut buf);
//! assert_eq!(written, varint_len(1000));
//!
//! let (value, read) = decode_varint(&buf).unwrap();
//! assert_eq!((value, read), (1000, 2));
//! ```
//!
//! ## Error Handling
//!
//! `decode_varint` returns `eyre::Result` with descriptive error messages:
//! - Empty buffer: "empty buffer for varint decode"
//! - Truncated encoding: "truncated varint"

use eyre::{ensure, Result};

/// Values with any of the top 8 bits set need the 9-byte form.
const NINE_BYTE_MASK: u64 = 0xFF00_0000_0000_0000;

pub const MAX_VARINT_LEN: usize = 9;

pub fn varint_len(value: u64) -> usize {
    if value & NINE_BYTE_MASK != 0 {
        return MAX_VARINT_LEN;
    }
    let mut len = 1;
    let mut rest = value >> 7;
    while rest != 0 {
        len += 1;
        rest >>= 7;
    }
    len
}

pub fn encode_varint(value: u64, buf: &mut [u8]) -> usize {
    if value & NINE_BYTE_MASK != 0 {
        buf[8] = value as u8;
        let mut rest = value >> 8;
        for byte in buf[..8].iter_mut().rev() {
            *byte = (rest & 0x7F) as u8 | 0x80;
            rest >>= 7;
        }
        return MAX_VARINT_LEN;
    }

    let len = varint_len(value);
    let mut rest = value;
    for i in (0..len).rev() {
        let continuation = if i == len - 1 { 0 } else { 0x80 };
        buf[i] = (rest & 0x7F) as u8 | continuation;
        rest >>= 7;
    }
    len
}

pub fn decode_varint(buf: &[u8]) -> Result<(u64, usize)> {
    ensure!(!buf.is_empty(), "empty buffer for varint decode");

    let mut value = 0u64;
    for (i, &byte) in buf.iter().take(8).enumerate() {
        value = (value << 7) | (byte & 0x7F) as u64;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    ensure!(buf.len() >= MAX_VARINT_LEN, "truncated varint");
    value = (value << 8) | buf[8] as u64;
    Ok((value, MAX_VARINT_LEN))
}
