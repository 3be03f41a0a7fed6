//! Fuzz testing for the value decoder.
//!
//! This fuzz target feeds arbitrary byte sequences to the storage tag and
//! value decoders, read as a given scalar kind, to ensure malformed input is
//! rejected with an error and never panics or reads past the input.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use contiguous::encoding::{decode_varint, StoredValue};
use contiguous::{ScalarKind, Value};

#[derive(Debug, Arbitrary)]
struct DecoderInput {
    kinds: Vec<FuzzKind>,
    data: Vec<u8>,
}

#[derive(Debug, Arbitrary, Clone, Copy)]
enum FuzzKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    BigInteger,
    BigDecimal,
}

impl From<FuzzKind> for ScalarKind {
    fn from(kind: FuzzKind) -> Self {
        match kind {
            FuzzKind::Byte => ScalarKind::Byte,
            FuzzKind::Short => ScalarKind::Short,
            FuzzKind::Int => ScalarKind::Int,
            FuzzKind::Long => ScalarKind::Long,
            FuzzKind::Float => ScalarKind::Float,
            FuzzKind::Double => ScalarKind::Double,
            FuzzKind::String => ScalarKind::String,
            FuzzKind::BigInteger => ScalarKind::BigInteger,
            FuzzKind::BigDecimal => ScalarKind::BigDecimal,
        }
    }
}

fuzz_target!(|input: DecoderInput| {
    if let Ok((_, len)) = decode_varint(&input.data) {
        assert!(len <= input.data.len());
    }

    let mut position = 0;
    for kind in input.kinds.iter().copied().cycle().take(64) {
        let Some(remaining) = input.data.get(position..) else {
            break;
        };
        let Ok((stored, consumed)) = StoredValue::decode(remaining) else {
            break;
        };
        assert!(consumed > 0 && consumed <= remaining.len());
        position += consumed;

        let _ = Value::from_stored(kind.into(), stored);
    }
});
