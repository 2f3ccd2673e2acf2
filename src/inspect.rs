//! Read-only traversal utilities for the canvas and debug panels

use crate::registry;
use crate::types::{Category, FieldNode};

/// Every primitive leaf, in pre-order
pub fn collect_primitives(root: Option<&FieldNode>) -> Vec<&FieldNode> {
    fn walk<'a>(node: &'a FieldNode, out: &mut Vec<&'a FieldNode>) {
        if node.is_primitive() {
            out.push(node);
        }
        for child in node.children() {
            walk(child, out);
        }
    }

    let mut out = Vec::new();
    if let Some(root) = root {
        walk(root, &mut out);
    }
    out
}

/// Domain-operator ancestors of `target_id`, outermost first, formatted as
/// `"<label> (<id>)"`. Empty when the target is missing or has none.
pub fn ancestry_of(root: &FieldNode, target_id: &str) -> Vec<String> {
    fn find(node: &FieldNode, target_id: &str, path: &mut Vec<String>) -> bool {
        if node.id == target_id {
            return true;
        }
        if node.is_primitive() {
            return false;
        }

        let is_domain = node.category() == Category::Domain;
        if is_domain {
            let meta = registry::lookup(node.kind());
            path.push(format!("{} ({})", meta.label, node.id));
        }
        if node.children().iter().any(|child| find(child, target_id, path)) {
            return true;
        }
        if is_domain {
            path.pop();
        }
        false
    }

    let mut path = Vec::new();
    find(root, target_id, &mut path);
    path
}

/// Find a node by id (pre-order)
pub fn find_node<'a>(root: &'a FieldNode, id: &str) -> Option<&'a FieldNode> {
    if root.id == id {
        return Some(root);
    }
    root.children().iter().find_map(|child| find_node(child, id))
}
