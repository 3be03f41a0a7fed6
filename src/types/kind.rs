//! # Scalar Kinds
//!
//! `ScalarKind` is the discriminant carried by every leaf of a schema. It
//! decides how a decoded storage value is narrowed back into a typed
//! [`Value`](super::Value) and whether the renderer quotes it.
//!
//! ## Storage Mapping
//!
//! | Kind | Storage class | Decoded as |
//! |------|---------------|------------|
//! | Byte, Short, Int, Long | variable-width integer | `i64`, narrowed per kind |
//! | Float | 4-byte IEEE-754 | `f32` |
//! | Double | 8-byte IEEE-754 | `f64` |
//! | String | UTF-8 text | `String` |
//! | BigInteger, BigDecimal | UTF-8 decimal text | parsed from the text |

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Byte = 0,
    Short = 1,
    Int = 2,
    Long = 3,
    Float = 4,
    Double = 5,
    String = 6,
    BigInteger = 7,
    BigDecimal = 8,
}

impl ScalarKind {
    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::Byte => "byte",
            ScalarKind::Short => "short",
            ScalarKind::Int => "int",
            ScalarKind::Long => "long",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
            ScalarKind::String => "string",
            ScalarKind::BigInteger => "big integer",
            ScalarKind::BigDecimal => "big decimal",
        }
    }

    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            ScalarKind::Byte | ScalarKind::Short | ScalarKind::Int | ScalarKind::Long
        )
    }

    /// Kinds whose values are stored through the text storage class.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            ScalarKind::String | ScalarKind::BigInteger | ScalarKind::BigDecimal
        )
    }

    /// Only string leaves are quoted when rendered; big numbers are emitted
    /// as bare JSON numbers even though they are stored as text.
    pub fn is_quoted(&self) -> bool {
        matches!(self, ScalarKind::String)
    }

    pub(crate) fn integral_range(&self) -> Option<(i64, i64)> {
        match self {
            ScalarKind::Byte => Some((i8::MIN as i64, i8::MAX as i64)),
            ScalarKind::Short => Some((i16::MIN as i64, i16::MAX as i64)),
            ScalarKind::Int => Some((i32::MIN as i64, i32::MAX as i64)),
            ScalarKind::Long => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
