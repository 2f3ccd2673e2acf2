//! Structural validation
//!
//! The compiler assumes a well-formed tree. `validate` checks that
//! assumption up front so malformed input fails with a descriptive error
//! instead of producing a misleading IR or shader.

use crate::types::{FieldNode, OpKind};
use std::collections::HashSet;
use thiserror::Error;

/// Maximum children of a displace node (base + source)
pub const DISPLACE_MAX_CHILDREN: usize = 2;

/// Structural defects of a node tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Two nodes share an identifier
    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    /// A node has an empty identifier
    #[error("Node with empty id (parent: {parent:?})")]
    EmptyId {
        /// Id of the parent, if any
        parent: Option<String>,
    },

    /// A displace node has more than base + source children
    #[error("Displace node {id} has {count} children (max {DISPLACE_MAX_CHILDREN})")]
    DisplaceOverflow {
        /// Displace node id
        id: String,
        /// Actual child count
        count: usize,
    },
}

/// Check a tree for duplicate or empty ids and displace overflow
pub fn validate(root: &FieldNode) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    check(root, None, &mut seen)
}

fn check<'a>(
    node: &'a FieldNode,
    parent: Option<&str>,
    seen: &mut HashSet<&'a str>,
) -> Result<(), ValidationError> {
    if node.id.is_empty() {
        return Err(ValidationError::EmptyId {
            parent: parent.map(str::to_string),
        });
    }
    if !seen.insert(node.id.as_str()) {
        return Err(ValidationError::DuplicateId(node.id.clone()));
    }
    if let Some(op) = node.as_operation() {
        if op.kind == OpKind::Displace && op.children.len() > DISPLACE_MAX_CHILDREN {
            return Err(ValidationError::DisplaceOverflow {
                id: node.id.clone(),
                count: op.children.len(),
            });
        }
    }
    for child in node.children() {
        check(child, Some(&node.id), seen)?;
    }
    Ok(())
}
