//! # Scalar Field Types
//!
//! The `Scalar` trait is the registry of Rust types that can be stored as a
//! schema leaf. Every implementor names its [`ScalarKind`] and converts to and
//! from [`Value`]. `Option<T>` of any scalar is itself a scalar whose `None`
//! is stored as the null tag.
//!
//! | Rust type | Kind |
//! |-----------|------|
//! | `i8` | Byte |
//! | `i16` | Short |
//! | `i32` | Int |
//! | `i64` | Long |
//! | `f32` | Float |
//! | `f64` | Double |
//! | `String` | String |
//! | `num_bigint::BigInt` | BigInteger |
//! | `bigdecimal::BigDecimal` | BigDecimal |

use bigdecimal::BigDecimal;
use eyre::{bail, Result};
use num_bigint::BigInt;

use super::{ScalarKind, Value};

pub trait Scalar: Sized + 'static {
    const KIND: ScalarKind;

    /// Whether the null tag is a legal stored value for this type.
    const NULLABLE: bool = false;

    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! impl_scalar {
    ($ty:ty, $kind:ident, |$v:ident| $to:expr) => {
        impl Scalar for $ty {
            const KIND: ScalarKind = ScalarKind::$kind;

            fn to_value(&self) -> Value {
                let $v = self;
                $to
            }

            fn from_value(value: Value) -> Result<Self> {
                match value.coerce(Self::KIND)? {
                    Value::$kind(v) => Ok(v),
                    Value::Null => bail!(
                        "null cannot be stored in a non-optional {} field",
                        Self::KIND
                    ),
                    other => bail!("expected {} value, got {:?}", Self::KIND, other),
                }
            }
        }
    };
}

impl_scalar!(i8, Byte, |v| Value::Byte(*v));
impl_scalar!(i16, Short, |v| Value::Short(*v));
impl_scalar!(i32, Int, |v| Value::Int(*v));
impl_scalar!(i64, Long, |v| Value::Long(*v));
impl_scalar!(f32, Float, |v| Value::Float(*v));
impl_scalar!(f64, Double, |v| Value::Double(*v));
impl_scalar!(String, String, |v| Value::String(v.clone()));
impl_scalar!(BigInt, BigInteger, |v| Value::BigInteger(v.clone()));
impl_scalar!(BigDecimal, BigDecimal, |v| Value::BigDecimal(v.clone()));

impl<T: Scalar> Scalar for Option<T> {
    const KIND: ScalarKind = T::KIND;
    const NULLABLE: bool = true;

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, T::to_value)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_report_their_kind() {
        assert_eq!(i8::KIND, ScalarKind::Byte);
        assert_eq!(f32::KIND, ScalarKind::Float);
        assert_eq!(<Option<String>>::KIND, ScalarKind::String);
    }

    #[test]
    fn option_maps_none_to_null() {
        assert_eq!(None::<f32>.to_value(), Value::Null);
        assert_eq!(<Option<f32>>::from_value(Value::Null).unwrap(), None);
        assert_eq!(
            <Option<i16>>::from_value(Value::Short(7)).unwrap(),
            Some(7)
        );
    }

    #[test]
    fn only_options_are_nullable() {
        assert!(!i16::NULLABLE);
        assert!(!BigDecimal::NULLABLE);
        assert!(<Option<i16>>::NULLABLE);
    }

    #[test]
    fn non_optional_rejects_null() {
        let err = i32::from_value(Value::Null).unwrap_err();
        assert!(err.to_string().contains("non-optional"));
    }

    #[test]
    fn from_value_coerces_wider_integers() {
        assert_eq!(i16::from_value(Value::Long(300)).unwrap(), 300);
        assert!(i8::from_value(Value::Long(300)).is_err());
    }
}
