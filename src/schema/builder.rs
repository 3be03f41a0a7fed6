//! # Schema Derivation
//!
//! Element types opt in by implementing [`Record`]: one `describe` function
//! that lists the fields to store, in storage order, each as a getter/setter
//! pair.
//!
//! ```ignore
//! #[derive(Default)]
//! struct Person {
//!     name: String,
//!     address: Address,
//! }
//!
//! impl Record for Person {
//!     fn describe(schema: &mut SchemaBuilder<Self>) {
//!         schema
//!             .scalar("name", |p| &p.name, |p, v| p.name = v)
//!             .nested("address", |p| &p.address, |p, v| p.address = v);
//!     }
//! }
//! ```
//!
//! Fields a type does not declare are simply not stored; there is no
//! exclusion marker to honour.
//!
//! ## Validation
//!
//! Declaration methods never fail on the spot. The first problem is recorded
//! and reported when derivation finishes, as a `ContiguousError::Schema`
//! naming the outermost type:
//!
//! - a type that declares nothing
//! - a scalar type declaring fields as well as `value()`
//! - two fields with the same name
//! - a nested field whose type is itself a scalar
//! - nesting deeper than `MAX_NESTING_DEPTH`, which also stops self-recursive
//!   types

use std::any::type_name;
use std::marker::PhantomData;

use bigdecimal::BigDecimal;
use eyre::{bail, Result};
use num_bigint::BigInt;
use tracing::debug;

use super::accessor::{FieldAccessor, NestedAccessor, SelfAccessor};
use super::node::{CompoundNode, ScalarNode, Schema, SchemaNode};
use crate::config::MAX_NESTING_DEPTH;
use crate::error::ContiguousError;
use crate::types::Scalar;

/// A type that can be stored in a `ContiguousList`.
///
/// `Default` supplies the blank instance that reads populate field by field.
pub trait Record: Default + 'static {
    fn describe(schema: &mut SchemaBuilder<Self>);
}

/// Collects the field declarations of one record type.
pub struct SchemaBuilder<R> {
    depth: usize,
    value: Option<ScalarNode>,
    fields: Vec<SchemaNode>,
    problem: Option<String>,
    _marker: PhantomData<fn() -> R>,
}

enum Shape {
    Value(ScalarNode),
    Fields(Vec<SchemaNode>),
}

impl<R: Record> SchemaBuilder<R> {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            value: None,
            fields: Vec::new(),
            problem: None,
            _marker: PhantomData,
        }
    }

    /// Declare a scalar field.
    pub fn scalar<V: Scalar>(
        &mut self,
        name: &'static str,
        get: fn(&R) -> &V,
        set: fn(&mut R, V),
    ) -> &mut Self {
        if self.admit(name) {
            self.fields.push(SchemaNode::Scalar(ScalarNode::new(
                Some(name),
                V::KIND,
                V::NULLABLE,
                Box::new(FieldAccessor::new(get, set)),
            )));
        }
        self
    }

    /// Declare a field holding another record, stored inline.
    pub fn nested<C: Record>(
        &mut self,
        name: &'static str,
        get: fn(&R) -> &C,
        set: fn(&mut R, C),
    ) -> &mut Self {
        if !self.admit(name) {
            return self;
        }
        if self.depth >= MAX_NESTING_DEPTH {
            self.fail(format!(
                "field {} nests deeper than {} levels",
                name, MAX_NESTING_DEPTH
            ));
            return self;
        }

        match shape_of::<C>(self.depth + 1) {
            Ok(Shape::Fields(children)) => {
                self.fields.push(SchemaNode::Compound(CompoundNode::nested(
                    name,
                    type_name::<C>(),
                    children,
                    Box::new(NestedAccessor::new(get, set)),
                )));
            }
            Ok(Shape::Value(_)) => self.fail(format!(
                "field {} has scalar type {}, declare it with scalar()",
                name,
                type_name::<C>()
            )),
            Err(reason) => self.fail(format!("field {} ({}): {}", name, type_name::<C>(), reason)),
        }
        self
    }

    /// Declare that elements of this type are stored as a single value.
    pub fn value(&mut self) -> &mut Self
    where
        R: Scalar,
    {
        if self.value.is_some() {
            self.fail("value() declared twice".to_string());
        } else {
            self.value = Some(ScalarNode::new(
                None,
                R::KIND,
                R::NULLABLE,
                Box::new(SelfAccessor::<R>::new()),
            ));
        }
        self
    }

    fn admit(&mut self, name: &'static str) -> bool {
        if name.is_empty() {
            self.fail("empty field name".to_string());
            return false;
        }
        if self.fields.iter().any(|field| field.name() == Some(name)) {
            self.fail(format!("duplicate field name {}", name));
            return false;
        }
        true
    }

    fn fail(&mut self, reason: String) {
        if self.problem.is_none() {
            self.problem = Some(reason);
        }
    }

    fn finish(self) -> std::result::Result<Shape, String> {
        if let Some(problem) = self.problem {
            return Err(problem);
        }
        match self.value {
            Some(_) if !self.fields.is_empty() => {
                Err("declares both value() and fields".to_string())
            }
            Some(node) => Ok(Shape::Value(node)),
            None if self.fields.is_empty() => Err("declares no fields".to_string()),
            None => Ok(Shape::Fields(self.fields)),
        }
    }
}

fn shape_of<R: Record>(depth: usize) -> std::result::Result<Shape, String> {
    let mut builder = SchemaBuilder::<R>::new(depth);
    R::describe(&mut builder);
    builder.finish()
}

/// Derive the schema of `R` without caching it.
///
/// Most callers want [`SchemaRegistry::schema_of`](super::SchemaRegistry::schema_of),
/// which derives once per type.
pub fn derive_schema<R: Record>() -> Result<Schema> {
    let name = type_name::<R>();
    let root = match shape_of::<R>(0) {
        Ok(Shape::Value(node)) => SchemaNode::Scalar(node),
        Ok(Shape::Fields(children)) => SchemaNode::Compound(CompoundNode::root(name, children)),
        Err(reason) => bail!(ContiguousError::schema(name, reason)),
    };

    let schema = Schema::new(name, root);
    debug!(
        type_name = name,
        leaves = schema.leaf_count(),
        "derived record schema"
    );
    Ok(schema)
}

macro_rules! scalar_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn describe(schema: &mut SchemaBuilder<Self>) {
                    schema.value();
                }
            }
        )*
    };
}

scalar_record!(i8, i16, i32, i64, f32, f64, String, BigInt, BigDecimal);

impl<T: Scalar> Record for Option<T> {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.value();
    }
}
