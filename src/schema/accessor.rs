//! # Accessor Handles
//!
//! A record type declares each field once, as a getter/setter pair of plain
//! function pointers. Derivation wraps each pair in a type-erased handle that
//! the schema node keeps for its whole lifetime, so the list never looks a
//! field up again: appends call `read`/`child`, materialization calls
//! `write`/`construct`/`attach`.
//!
//! Handles operate on `&dyn Any` so that one node type can describe fields of
//! any record. Each handle downcasts to the record type it was declared on; a
//! mismatch is a bug in this crate and surfaces as an error, not a panic.

use std::any::{type_name, Any};
use std::marker::PhantomData;

use eyre::{eyre, Result};

use crate::types::{Scalar, Value};

pub(crate) trait ScalarAccess: Send + Sync {
    fn read(&self, record: &dyn Any) -> Result<Value>;

    fn write(&self, record: &mut dyn Any, value: Value) -> Result<()>;
}

pub(crate) trait CompoundAccess: Send + Sync {
    fn child<'a>(&self, record: &'a dyn Any) -> Result<&'a dyn Any>;

    fn construct(&self) -> Box<dyn Any>;

    fn attach(&self, record: &mut dyn Any, child: Box<dyn Any>) -> Result<()>;
}

/// Scalar field of record `R` holding a `V`.
pub(crate) struct FieldAccessor<R, V> {
    get: fn(&R) -> &V,
    set: fn(&mut R, V),
}

impl<R, V> FieldAccessor<R, V> {
    pub(crate) fn new(get: fn(&R) -> &V, set: fn(&mut R, V)) -> Self {
        Self { get, set }
    }
}

impl<R: 'static, V: Scalar> ScalarAccess for FieldAccessor<R, V> {
    fn read(&self, record: &dyn Any) -> Result<Value> {
        let record = downcast_ref::<R>(record)?;
        Ok((self.get)(record).to_value())
    }

    fn write(&self, record: &mut dyn Any, value: Value) -> Result<()> {
        let record = downcast_mut::<R>(record)?;
        (self.set)(record, V::from_value(value)?);
        Ok(())
    }
}

/// The element itself, for lists whose element type is a scalar.
pub(crate) struct SelfAccessor<V> {
    _marker: PhantomData<fn() -> V>,
}

impl<V> SelfAccessor<V> {
    pub(crate) fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<V: Scalar> ScalarAccess for SelfAccessor<V> {
    fn read(&self, record: &dyn Any) -> Result<Value> {
        Ok(downcast_ref::<V>(record)?.to_value())
    }

    fn write(&self, record: &mut dyn Any, value: Value) -> Result<()> {
        *downcast_mut::<V>(record)? = V::from_value(value)?;
        Ok(())
    }
}

/// Nested record field of record `R` holding a `C`.
pub(crate) struct NestedAccessor<R, C> {
    get: fn(&R) -> &C,
    set: fn(&mut R, C),
}

impl<R, C> NestedAccessor<R, C> {
    pub(crate) fn new(get: fn(&R) -> &C, set: fn(&mut R, C)) -> Self {
        Self { get, set }
    }
}

impl<R: 'static, C: Default + 'static> CompoundAccess for NestedAccessor<R, C> {
    fn child<'a>(&self, record: &'a dyn Any) -> Result<&'a dyn Any> {
        let record = downcast_ref::<R>(record)?;
        let child: &'a dyn Any = (self.get)(record);
        Ok(child)
    }

    fn construct(&self) -> Box<dyn Any> {
        Box::new(C::default())
    }

    fn attach(&self, record: &mut dyn Any, child: Box<dyn Any>) -> Result<()> {
        let record = downcast_mut::<R>(record)?;
        let child = child
            .downcast::<C>()
            .map_err(|_| eyre!("nested value is not a {}", type_name::<C>()))?;
        (self.set)(record, *child);
        Ok(())
    }
}

fn downcast_ref<T: 'static>(record: &dyn Any) -> Result<&T> {
    record
        .downcast_ref::<T>()
        .ok_or_else(|| eyre!("accessor for {} applied to another type", type_name::<T>()))
}

fn downcast_mut<T: 'static>(record: &mut dyn Any) -> Result<&mut T> {
    record
        .downcast_mut::<T>()
        .ok_or_else(|| eyre!("accessor for {} applied to another type", type_name::<T>()))
}
