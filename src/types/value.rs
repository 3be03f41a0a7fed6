//! # Owned Scalar Values
//!
//! `Value` is the typed form of one leaf: what accessors read out of a record
//! on append, what the flat scan yields, and what producers hand to the
//! streaming writer.
//!
//! ## Conversions
//!
//! ```text
//! Value ──to_stored()──> StoredValue<'_> ──encode──> bytes
//! bytes ──decode──> StoredValue<'_> ──Value::from_stored(kind)──> Value
//! ```
//!
//! `from_stored` is where integers decoded as `i64` are narrowed back to the
//! width the leaf declares, and where big numbers are parsed back out of their
//! decimal text.
//!
//! A `BigDecimal` with a non-negative scale is stored as its plain text
//! (`1.50`). A negative scale is stored as unscaled digits and an exponent
//! (`1e2` for scale -2), since plain text would read back with scale 0.
//!
//! ## Coercion
//!
//! [`Value::coerce`] converts loosely typed input (a row source handing out
//! `Long` for every integer column, text for decimals) into the kind a leaf
//! expects. Narrowing is range checked; nothing is silently truncated.

use std::borrow::Cow;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use eyre::{bail, ensure, eyre, Result, WrapErr};
use num_bigint::BigInt;

use super::ScalarKind;
use crate::encoding::StoredValue;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    BigInteger(BigInt),
    BigDecimal(BigDecimal),
}

impl Value {
    /// Kind of a non-null value; `Null` belongs to every kind.
    pub fn kind(&self) -> Option<ScalarKind> {
        match self {
            Value::Null => None,
            Value::Byte(_) => Some(ScalarKind::Byte),
            Value::Short(_) => Some(ScalarKind::Short),
            Value::Int(_) => Some(ScalarKind::Int),
            Value::Long(_) => Some(ScalarKind::Long),
            Value::Float(_) => Some(ScalarKind::Float),
            Value::Double(_) => Some(ScalarKind::Double),
            Value::String(_) => Some(ScalarKind::String),
            Value::BigInteger(_) => Some(ScalarKind::BigInteger),
            Value::BigDecimal(_) => Some(ScalarKind::BigDecimal),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Byte(v) => Some(*v as i64),
            Value::Short(v) => Some(*v as i64),
            Value::Int(v) => Some(*v as i64),
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Storage form of this value. Strings are borrowed; big numbers are
    /// rendered to their canonical decimal text.
    pub fn to_stored(&self) -> StoredValue<'_> {
        match self {
            Value::Null => StoredValue::Null,
            Value::Byte(v) => StoredValue::Integer(*v as i64),
            Value::Short(v) => StoredValue::Integer(*v as i64),
            Value::Int(v) => StoredValue::Integer(*v as i64),
            Value::Long(v) => StoredValue::Integer(*v),
            Value::Float(v) => StoredValue::Float(*v),
            Value::Double(v) => StoredValue::Double(*v),
            Value::String(s) => StoredValue::Text(Cow::Borrowed(s)),
            Value::BigInteger(v) => StoredValue::Text(Cow::Owned(v.to_string())),
            Value::BigDecimal(v) => StoredValue::Text(Cow::Owned(decimal_text(v))),
        }
    }

    /// Rebuilds the typed value a leaf of `kind` stored.
    pub fn from_stored(kind: ScalarKind, stored: StoredValue<'_>) -> Result<Value> {
        match (kind, stored) {
            (_, StoredValue::Null) => Ok(Value::Null),
            (kind, StoredValue::Integer(v)) if kind.is_integral() => narrow_integer(kind, v),
            (ScalarKind::Float, StoredValue::Float(v)) => Ok(Value::Float(v)),
            (ScalarKind::Double, StoredValue::Double(v)) => Ok(Value::Double(v)),
            (ScalarKind::String, StoredValue::Text(text)) => Ok(Value::String(text.into_owned())),
            (ScalarKind::BigInteger, StoredValue::Text(text)) => parse_big_integer(&text),
            (ScalarKind::BigDecimal, StoredValue::Text(text)) => parse_big_decimal(&text),
            (kind, stored) => bail!(
                "stored {} value cannot be read as {}",
                stored.storage_class(),
                kind
            ),
        }
    }

    /// Converts this value into the representation a leaf of `kind` stores.
    pub fn coerce(self, kind: ScalarKind) -> Result<Value> {
        if self.is_null() || self.kind() == Some(kind) {
            return Ok(self);
        }

        match kind {
            ScalarKind::Byte | ScalarKind::Short | ScalarKind::Int | ScalarKind::Long => {
                let wide = match &self {
                    Value::BigInteger(v) => i64::try_from(v)
                        .map_err(|_| eyre!("big integer {} does not fit a {}", v, kind))?,
                    other => other
                        .as_i64()
                        .ok_or_else(|| eyre!("cannot coerce {:?} to {}", other, kind))?,
                };
                narrow_integer(kind, wide)
            }
            ScalarKind::Float => match self {
                Value::Double(v) => Ok(Value::Float(v as f32)),
                other => other
                    .as_i64()
                    .map(|v| Value::Float(v as f32))
                    .ok_or_else(|| eyre!("cannot coerce {:?} to {}", other, kind)),
            },
            ScalarKind::Double => match self {
                Value::Float(v) => Ok(Value::Double(v as f64)),
                other => other
                    .as_i64()
                    .map(|v| Value::Double(v as f64))
                    .ok_or_else(|| eyre!("cannot coerce {:?} to {}", other, kind)),
            },
            ScalarKind::String => bail!("cannot coerce {:?} to {}", self, kind),
            ScalarKind::BigInteger => match self {
                Value::String(text) => parse_big_integer(&text),
                other => other
                    .as_i64()
                    .map(|v| Value::BigInteger(BigInt::from(v)))
                    .ok_or_else(|| eyre!("cannot coerce {:?} to {}", other, kind)),
            },
            ScalarKind::BigDecimal => match self {
                Value::String(text) => parse_big_decimal(&text),
                Value::BigInteger(v) => Ok(Value::BigDecimal(BigDecimal::new(v, 0))),
                other => other
                    .as_i64()
                    .map(|v| Value::BigDecimal(BigDecimal::from(v)))
                    .ok_or_else(|| eyre!("cannot coerce {:?} to {}", other, kind)),
            },
        }
    }
}

fn narrow_integer(kind: ScalarKind, value: i64) -> Result<Value> {
    let (min, max) = kind
        .integral_range()
        .ok_or_else(|| eyre!("{} is not an integral kind", kind))?;
    ensure!(
        (min..=max).contains(&value),
        "integer {} out of range for {}",
        value,
        kind
    );
    Ok(match kind {
        ScalarKind::Byte => Value::Byte(value as i8),
        ScalarKind::Short => Value::Short(value as i16),
        ScalarKind::Int => Value::Int(value as i32),
        _ => Value::Long(value),
    })
}

fn parse_big_integer(text: &str) -> Result<Value> {
    BigInt::from_str(text)
        .map(Value::BigInteger)
        .wrap_err_with(|| format!("invalid big integer text {:?}", text))
}

fn decimal_text(value: &BigDecimal) -> String {
    let (digits, scale) = value.as_bigint_and_exponent();
    if scale < 0 {
        format!("{}e{}", digits, -scale)
    } else {
        value.to_string()
    }
}

fn parse_big_decimal(text: &str) -> Result<Value> {
    BigDecimal::from_str(text)
        .map(Value::BigDecimal)
        .wrap_err_with(|| format!("invalid big decimal text {:?}", text))
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Byte(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Short(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Value::BigInteger(v)
    }
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Value::BigDecimal(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_narrow_to_declared_width() {
        let value = Value::from_stored(ScalarKind::Byte, StoredValue::Integer(-42)).unwrap();
        assert_eq!(value, Value::Byte(-42));

        let value = Value::from_stored(ScalarKind::Long, StoredValue::Integer(1 << 40)).unwrap();
        assert_eq!(value, Value::Long(1 << 40));
    }

    #[test]
    fn out_of_range_integer_is_rejected() {
        let result = Value::from_stored(ScalarKind::Short, StoredValue::Integer(40_000));
        assert!(result.unwrap_err().to_string().contains("out of range"));
    }

    #[test]
    fn null_reads_back_for_every_kind() {
        for kind in [ScalarKind::Int, ScalarKind::Double, ScalarKind::BigDecimal] {
            assert_eq!(
                Value::from_stored(kind, StoredValue::Null).unwrap(),
                Value::Null
            );
        }
    }

    #[test]
    fn big_numbers_travel_as_text() {
        let big = BigInt::from_str("123456789012345678901234567890").unwrap();
        let value = Value::BigInteger(big.clone());
        match value.to_stored() {
            StoredValue::Text(text) => assert_eq!(text, "123456789012345678901234567890"),
            other => panic!("expected text, got {:?}", other),
        }

        let restored = Value::from_stored(
            ScalarKind::BigInteger,
            StoredValue::Text(Cow::Borrowed("123456789012345678901234567890")),
        )
        .unwrap();
        assert_eq!(restored, Value::BigInteger(big));
    }

    #[test]
    fn mismatched_storage_class_fails() {
        let result = Value::from_stored(ScalarKind::String, StoredValue::Integer(1));
        assert!(result.is_err());
    }

    #[test]
    fn coerce_narrows_long_to_int() {
        assert_eq!(
            Value::Long(42).coerce(ScalarKind::Int).unwrap(),
            Value::Int(42)
        );
        assert!(Value::Long(i64::MAX).coerce(ScalarKind::Int).is_err());
    }

    #[test]
    fn coerce_parses_decimal_text() {
        let value = Value::from("12.50").coerce(ScalarKind::BigDecimal).unwrap();
        assert_eq!(
            value,
            Value::BigDecimal(BigDecimal::from_str("12.50").unwrap())
        );
    }

    #[test]
    fn coerce_widens_float_to_double() {
        assert_eq!(
            Value::Float(0.5).coerce(ScalarKind::Double).unwrap(),
            Value::Double(0.5)
        );
    }

    #[test]
    fn coerce_refuses_numbers_for_strings() {
        assert!(Value::Int(3).coerce(ScalarKind::String).is_err());
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".to_string()));
    }
}
