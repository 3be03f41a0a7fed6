//! # Schema Tree
//!
//! A derived schema is a tree of two node shapes:
//!
//! ```text
//! Compound "Person"            (root: no name, no accessor)
//! ├── Scalar "name"   String
//! ├── Compound "address"       (nested: name + accessor)
//! │   ├── Scalar "street"  String
//! │   └── Scalar "zip"     Int
//! └── Scalar "age"    Short
//! ```
//!
//! Leaves in depth-first declaration order are exactly the sequence of stored
//! values for one element. [`Schema`] keeps that sequence pre-flattened as
//! [`Leaf`] descriptors for the flat scan and the streaming writer, which only
//! need the kind of each slot and never walk the tree.
//!
//! A schema whose root is a scalar node describes lists of plain values; it
//! has one leaf with no name.

use smallvec::SmallVec;

use eyre::{eyre, Result};

use super::accessor::{CompoundAccess, ScalarAccess};
use crate::types::ScalarKind;

pub enum SchemaNode {
    Scalar(ScalarNode),
    Compound(CompoundNode),
}

pub struct ScalarNode {
    name: Option<&'static str>,
    kind: ScalarKind,
    nullable: bool,
    accessor: Box<dyn ScalarAccess>,
}

pub struct CompoundNode {
    name: Option<&'static str>,
    type_name: &'static str,
    children: Vec<SchemaNode>,
    accessor: Option<Box<dyn CompoundAccess>>,
}

impl SchemaNode {
    /// Field name; `None` only for the root.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            SchemaNode::Scalar(node) => node.name,
            SchemaNode::Compound(node) => node.name,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, SchemaNode::Scalar(_))
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            SchemaNode::Scalar(_) => 1,
            SchemaNode::Compound(node) => node.children.iter().map(SchemaNode::leaf_count).sum(),
        }
    }

    fn collect_leaves(&self, path: &mut SmallVec<[&'static str; 4]>, out: &mut Vec<Leaf>) {
        match self {
            SchemaNode::Scalar(node) => {
                if let Some(name) = node.name {
                    path.push(name);
                }
                out.push(Leaf {
                    name: node.name,
                    path: path.join("."),
                    kind: node.kind,
                    nullable: node.nullable,
                });
                if node.name.is_some() {
                    path.pop();
                }
            }
            SchemaNode::Compound(node) => {
                if let Some(name) = node.name {
                    path.push(name);
                }
                for child in &node.children {
                    child.collect_leaves(path, out);
                }
                if node.name.is_some() {
                    path.pop();
                }
            }
        }
    }
}

impl ScalarNode {
    pub(crate) fn new(
        name: Option<&'static str>,
        kind: ScalarKind,
        nullable: bool,
        accessor: Box<dyn ScalarAccess>,
    ) -> Self {
        Self {
            name,
            kind,
            nullable,
            accessor,
        }
    }

    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// True for `Option` fields, the only ones that may hold null.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub(crate) fn accessor(&self) -> &dyn ScalarAccess {
        self.accessor.as_ref()
    }
}

impl CompoundNode {
    pub(crate) fn root(type_name: &'static str, children: Vec<SchemaNode>) -> Self {
        Self {
            name: None,
            type_name,
            children,
            accessor: None,
        }
    }

    pub(crate) fn nested(
        name: &'static str,
        type_name: &'static str,
        children: Vec<SchemaNode>,
        accessor: Box<dyn CompoundAccess>,
    ) -> Self {
        Self {
            name: Some(name),
            type_name,
            children,
            accessor: Some(accessor),
        }
    }

    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn children(&self) -> &[SchemaNode] {
        &self.children
    }

    /// Accessor from the parent record to this nested one. The root has none.
    pub(crate) fn accessor(&self) -> Result<&dyn CompoundAccess> {
        self.accessor
            .as_deref()
            .ok_or_else(|| eyre!("compound {} has no parent accessor", self.type_name))
    }
}

impl std::fmt::Debug for SchemaNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaNode::Scalar(node) => std::fmt::Debug::fmt(node, f),
            SchemaNode::Compound(node) => std::fmt::Debug::fmt(node, f),
        }
    }
}

impl std::fmt::Debug for ScalarNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scalar")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("nullable", &self.nullable)
            .finish()
    }
}

impl std::fmt::Debug for CompoundNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compound")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("children", &self.children)
            .finish()
    }
}

/// One stored slot of an element, in storage order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    name: Option<&'static str>,
    path: String,
    kind: ScalarKind,
    nullable: bool,
}

impl Leaf {
    /// The leaf's own field name. `None` for a scalar root.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Dotted path from the root, e.g. `"address.zip"`. Empty for a scalar root.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// The derived, immutable layout of one element type.
#[derive(Debug)]
pub struct Schema {
    type_name: &'static str,
    root: SchemaNode,
    leaves: Vec<Leaf>,
}

impl Schema {
    pub(crate) fn new(type_name: &'static str, root: SchemaNode) -> Self {
        let mut leaves = Vec::with_capacity(root.leaf_count());
        root.collect_leaves(&mut SmallVec::new(), &mut leaves);
        Self {
            type_name,
            root,
            leaves,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_scalar(&self) -> bool {
        self.root.is_scalar()
    }
}
