//! Intermediate representation (IR)
//!
//! The flattened, order-annotated snapshot of a node tree that is used for
//! canonicalization and regression hashing.
//!
//! # Pipeline
//!
//! ```rust
//! use precision_field::prelude::*;
//!
//! let tree = FieldNode::op("m", OpKind::Mirror)
//!     .with_children(vec![FieldNode::circle("c", Vec2::ZERO, 0.3)]);
//!
//! let ir = compile(Some(&tree));
//! assert_eq!(ir.nodes["c"].domain_stack, vec!["m".to_string()]);
//!
//! let text = serialize(&ir);
//! let digest = hash(&text);
//! assert_eq!(digest.len(), 64);
//! ```

mod canonical;
mod compiler;
mod digest;

pub use canonical::{serialize, try_serialize};
pub use compiler::compile;
pub use digest::{check_golden, fingerprint, hash, GoldenMismatch, SNAPSHOT_PREFIX_LEN};

use crate::types::{Axis, NodeKind};
use glam::Vec2;
use serde::Serialize;
use std::collections::HashMap;

/// A single exported parameter value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Scalar
    Scalar(f32),
    /// 2D vector, encoded as a two-element array
    Vec2([f32; 2]),
    /// Axis selector, encoded as `"x"` / `"y"`
    Axis(Axis),
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Scalar(v)
    }
}

impl From<Vec2> for ParamValue {
    fn from(v: Vec2) -> Self {
        ParamValue::Vec2(v.to_array())
    }
}

impl From<Axis> for ParamValue {
    fn from(v: Axis) -> Self {
        ParamValue::Axis(v)
    }
}

/// One flattened node
#[derive(Debug, Clone, PartialEq)]
pub struct IrNode {
    /// Node identifier
    pub id: String,
    /// Node kind
    pub kind: NodeKind,
    /// Exported parameters; only those present on the source node
    pub params: HashMap<String, ParamValue>,
    /// Domain-category ancestor ids, outermost first, excluding self
    pub domain_stack: Vec<String>,
    /// Child ids in stored order
    pub children: Vec<String>,
}

/// A compiled tree
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ir {
    /// All nodes by id
    pub nodes: HashMap<String, IrNode>,
    /// Root id, empty for an empty tree
    pub root_id: String,
    /// Post-order evaluation sequence (children before parent)
    pub evaluation_order: Vec<String>,
}

impl Ir {
    /// Number of nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True for the IR of an empty tree
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node by id
    pub fn get(&self, id: &str) -> Option<&IrNode> {
        self.nodes.get(id)
    }
}
