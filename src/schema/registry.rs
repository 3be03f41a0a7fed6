//! # Schema Registry
//!
//! Derivation walks `describe` recursively and allocates one node per field,
//! so it runs once per element type and the result is shared by every list of
//! that type. The registry maps `TypeId` to the derived `Arc<Schema>`.
//!
//! Lookups take a read lock; a miss derives outside any lock and then inserts
//! under the write lock. Two threads missing on the same type both derive, and
//! the first insert wins; schemas are deterministic so either result is
//! correct. Failed derivations are not cached and fail again on the next
//! lookup.

use std::any::TypeId;
use std::sync::{Arc, OnceLock};

use eyre::Result;
use hashbrown::HashMap;
use parking_lot::RwLock;

use super::builder::{derive_schema, Record};
use super::node::Schema;

pub struct SchemaRegistry {
    schemas: RwLock<HashMap<TypeId, Arc<Schema>>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self {
            schemas: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry lists resolve their schema through.
    pub fn global() -> &'static SchemaRegistry {
        static GLOBAL: OnceLock<SchemaRegistry> = OnceLock::new();
        GLOBAL.get_or_init(SchemaRegistry::new)
    }

    pub fn schema_of<R: Record>(&self) -> Result<Arc<Schema>> {
        let key = TypeId::of::<R>();
        if let Some(schema) = self.schemas.read().get(&key) {
            return Ok(Arc::clone(schema));
        }

        let derived = Arc::new(derive_schema::<R>()?);
        let mut schemas = self.schemas.write();
        Ok(Arc::clone(schemas.entry(key).or_insert(derived)))
    }

    pub fn contains<R: Record>(&self) -> bool {
        self.schemas.read().contains_key(&TypeId::of::<R>())
    }

    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
