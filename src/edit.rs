//! Persistent tree edits
//!
//! Every edit takes a snapshot and returns a new one. Only the nodes on the
//! path from the root to the edited node are rebuilt; all other subtrees are
//! shared with the input through their `Arc`. An edit whose target cannot be
//! found, or which is rejected, returns the input root unchanged
//! (`Arc::ptr_eq` holds).

use crate::inspect;
use crate::registry;
use crate::types::{FieldNode, NodeBody, NodeKind, OpKind};
use std::sync::Arc;

/// Where `insert` places a node relative to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Immediately before the target, in the target's parent
    Before,
    /// Immediately after the target, in the target's parent
    After,
    /// Appended to the target's children (target must be an operation)
    Inside,
}

/// Direction for `reorder`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Swap with the previous sibling
    Up,
    /// Swap with the next sibling
    Down,
}

// === Lookup ===

/// Find a node by id
#[inline]
pub fn find<'a>(root: &'a FieldNode, id: &str) -> Option<&'a FieldNode> {
    inspect::find_node(root, id)
}

/// Find the operation that directly contains `id`
pub fn find_parent<'a>(root: &'a FieldNode, id: &str) -> Option<&'a FieldNode> {
    let children = root.children();
    if children.iter().any(|c| c.id == id) {
        return Some(root);
    }
    children.iter().find_map(|c| find_parent(c, id))
}

// === Path rewriting ===

/// Rebuild the path down to the first node matching `pred`, replacing that
/// node with `f(node)`. Returns `None` when nothing matched.
fn rewrite(
    node: &Arc<FieldNode>,
    pred: &dyn Fn(&FieldNode) -> bool,
    f: &mut dyn FnMut(&FieldNode) -> FieldNode,
) -> Option<Arc<FieldNode>> {
    let current: &FieldNode = node;
    if pred(current) {
        return Some(Arc::new(f(current)));
    }
    let op = node.as_operation()?;
    for (i, child) in op.children.iter().enumerate() {
        if let Some(new_child) = rewrite(child, pred, f) {
            return Some(Arc::new(map_children(node, |children| children[i] = new_child)));
        }
    }
    None
}

/// Shallow copy of `node` with its child list edited by `g`.
/// Primitives are copied unchanged.
fn map_children(node: &FieldNode, g: impl FnOnce(&mut Vec<Arc<FieldNode>>)) -> FieldNode {
    let mut copy = node.clone();
    if let NodeBody::Operation(op) = &mut copy.body {
        g(&mut op.children);
    }
    copy
}

fn has_child(node: &FieldNode, id: &str) -> bool {
    node.children().iter().any(|c| c.id == id)
}

fn child_index(node: &FieldNode, id: &str) -> Option<usize> {
    node.children().iter().position(|c| c.id == id)
}

// === Edits ===

/// Apply `f` to the node `id`
pub fn update(root: &Arc<FieldNode>, id: &str, f: impl FnOnce(&mut FieldNode)) -> Arc<FieldNode> {
    let mut f = Some(f);
    rewrite(root, &|n| n.id == id, &mut |n| {
        let mut copy = n.clone();
        if let Some(f) = f.take() {
            f(&mut copy);
        }
        copy
    })
    .unwrap_or_else(|| Arc::clone(root))
}

/// Remove the node `id` and its subtree. Deleting the root yields `None`.
pub fn delete(root: &Arc<FieldNode>, id: &str) -> Option<Arc<FieldNode>> {
    if root.id == id {
        return None;
    }
    let next = rewrite(root, &|n| has_child(n, id), &mut |parent| {
        map_children(parent, |children| children.retain(|c| c.id != id))
    });
    Some(next.unwrap_or_else(|| Arc::clone(root)))
}

/// Insert `node` relative to `target_id`.
///
/// `Inside` appends to the target's children; it is rejected for primitive
/// targets and for a displace that already holds base and source.
/// `Before`/`After` require the target to have a parent, under the same
/// displace limit.
pub fn insert(
    root: &Arc<FieldNode>,
    target_id: &str,
    node: impl Into<Arc<FieldNode>>,
    position: InsertPosition,
) -> Arc<FieldNode> {
    let node = node.into();
    let next = match position {
        InsertPosition::Inside => {
            let accepts = find(root, target_id).is_some_and(accepts_child);
            if !accepts {
                return Arc::clone(root);
            }
            rewrite(root, &|n| n.id == target_id, &mut |target| {
                map_children(target, |children| children.push(Arc::clone(&node)))
            })
        }
        InsertPosition::Before | InsertPosition::After => {
            let accepts = find_parent(root, target_id).is_some_and(accepts_child);
            if !accepts {
                return Arc::clone(root);
            }
            rewrite(root, &|n| has_child(n, target_id), &mut |parent| {
                map_children(parent, |children| {
                    if let Some(idx) = children.iter().position(|c| c.id == target_id) {
                        let at = if position == InsertPosition::After { idx + 1 } else { idx };
                        children.insert(at, Arc::clone(&node));
                    }
                })
            })
        }
    };
    next.unwrap_or_else(|| Arc::clone(root))
}

/// Whether `target` may take one more child
fn accepts_child(target: &FieldNode) -> bool {
    match target.as_operation() {
        Some(op) if op.kind == OpKind::Displace => op.children.len() < 2,
        Some(_) => true,
        None => false,
    }
}

/// Move `dragged_id` next to or into `target_id`.
///
/// Dropping an operation `Inside` a primitive wraps the primitive: the
/// operation takes the primitive's place with the primitive as its only
/// child. Moving a node onto itself or into its own subtree is rejected.
pub fn move_node(
    root: &Arc<FieldNode>,
    dragged_id: &str,
    target_id: &str,
    position: InsertPosition,
) -> Arc<FieldNode> {
    if dragged_id == target_id {
        return Arc::clone(root);
    }
    let (Some(dragged), Some(target)) = (find(root, dragged_id), find(root, target_id)) else {
        return Arc::clone(root);
    };
    if find(dragged, target_id).is_some() {
        return Arc::clone(root);
    }
    let wrap = position == InsertPosition::Inside && target.is_primitive() && !dragged.is_primitive();
    let dragged = dragged.clone();

    let Some(base) = delete(root, dragged_id) else {
        return Arc::clone(root);
    };
    if wrap {
        return rewrite(&base, &|n| n.id == target_id, &mut |prim| {
            map_children(&dragged, |children| *children = vec![Arc::new(prim.clone())])
        })
        .unwrap_or_else(|| Arc::clone(root));
    }
    let next = insert(&base, target_id, dragged, position);
    if Arc::ptr_eq(&next, &base) {
        // Rejected insert: keep the dragged node where it was
        return Arc::clone(root);
    }
    next
}

/// Add `node` to a tree the way the editor's "add" command does.
///
/// - Empty tree: `node` becomes the root.
/// - No selection (or selection not found): the old root and `node` are put
///   under a new union `union_id`.
/// - Selected primitive and `node` is an operation: `node` wraps it.
/// - Selected operation: `node` is appended; a full displace forwards the
///   append to its parent.
/// - Selected primitive and `node` is a primitive: appended to its parent,
///   unless the parent is a full displace.
pub fn add_node(
    root: Option<&Arc<FieldNode>>,
    selected_id: Option<&str>,
    node: FieldNode,
    union_id: &str,
) -> Arc<FieldNode> {
    let Some(root) = root else {
        return Arc::new(node);
    };
    let Some(selected) = selected_id.and_then(|id| find(root, id)) else {
        let mut union = FieldNode::create(NodeKind::Op(OpKind::Union), union_id, glam::Vec2::ZERO);
        if let NodeBody::Operation(op) = &mut union.body {
            op.children = vec![Arc::clone(root), Arc::new(node)];
        }
        return Arc::new(union);
    };
    let selected_id = selected.id.clone();

    if selected.is_primitive() && !node.is_primitive() {
        return rewrite(root, &|n| n.id == selected_id, &mut |prim| {
            map_children(&node, |children| *children = vec![Arc::new(prim.clone())])
        })
        .unwrap_or_else(|| Arc::clone(root));
    }
    if accepts_child(selected) {
        return insert(root, &selected_id, node, InsertPosition::Inside);
    }
    match find_parent(root, &selected_id) {
        Some(parent) => {
            let parent_id = parent.id.clone();
            insert(root, &parent_id, node, InsertPosition::Inside)
        }
        None => Arc::clone(root),
    }
}

/// Swap `id` with its previous (`Up`) or next (`Down`) sibling.
/// No-op at either end of the sibling list.
pub fn reorder(root: &Arc<FieldNode>, id: &str, direction: Direction) -> Arc<FieldNode> {
    let Some(parent) = find_parent(root, id) else {
        return Arc::clone(root);
    };
    let Some(idx) = child_index(parent, id) else {
        return Arc::clone(root);
    };
    let other = match direction {
        Direction::Up => idx.checked_sub(1),
        Direction::Down => Some(idx + 1),
    };
    match other {
        Some(j) => swap_children(root, &parent.id.clone(), idx, j),
        None => Arc::clone(root),
    }
}

/// Swap children `i` and `j` of operation `parent_id`.
/// Out-of-range indices or `i == j` leave the tree unchanged.
pub fn swap_children(root: &Arc<FieldNode>, parent_id: &str, i: usize, j: usize) -> Arc<FieldNode> {
    let in_range = find(root, parent_id)
        .map(|p| i != j && i < p.children().len() && j < p.children().len())
        .unwrap_or(false);
    if !in_range {
        return Arc::clone(root);
    }
    rewrite(root, &|n| n.id == parent_id, &mut |parent| {
        map_children(parent, |children| children.swap(i, j))
    })
    .unwrap_or_else(|| Arc::clone(root))
}

/// Change the kind of operation `id`.
///
/// Children, blend and parameters are kept. If the node's name is unset or
/// still the old kind's registry label, it is renamed to the new label.
pub fn set_op_kind(root: &Arc<FieldNode>, id: &str, kind: OpKind) -> Arc<FieldNode> {
    match find(root, id) {
        Some(node) if !node.is_primitive() => {}
        _ => return Arc::clone(root),
    }
    update(root, id, |node| {
        let old_label = registry::lookup(node.kind()).label;
        if node.name.as_deref().map_or(true, |name| name == old_label) {
            node.name = Some(registry::lookup(NodeKind::Op(kind)).label.to_string());
        }
        if let NodeBody::Operation(op) = &mut node.body {
            op.kind = kind;
        }
    })
}

/// Clear the `collapsed` flag on every ancestor of `id`
pub fn expand_ancestors(root: &Arc<FieldNode>, id: &str) -> Arc<FieldNode> {
    fn walk(node: &Arc<FieldNode>, id: &str) -> Option<Arc<FieldNode>> {
        if node.id == id {
            return Some(Arc::clone(node));
        }
        for (i, child) in node.children().iter().enumerate() {
            if let Some(new_child) = walk(child, id) {
                let mut copy = map_children(node, |children| children[i] = new_child);
                copy.collapsed = false;
                return Some(Arc::new(copy));
            }
        }
        None
    }
    walk(root, id).unwrap_or_else(|| Arc::clone(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShapeKind;
    use glam::Vec2;

    fn tree() -> Arc<FieldNode> {
        Arc::new(FieldNode::op("root", OpKind::Union).with_children(vec![
            FieldNode::circle("a", Vec2::ZERO, 0.1),
            FieldNode::op("g", OpKind::Group).with_children(vec![
                FieldNode::circle("b", Vec2::ZERO, 0.2),
                FieldNode::circle("c", Vec2::ZERO, 0.3),
            ]),
            FieldNode::op("d", OpKind::Displace).with_children(vec![
                FieldNode::circle("base", Vec2::ZERO, 0.4),
                FieldNode::circle("src", Vec2::ZERO, 0.5),
            ]),
        ]))
    }

    fn ids(node: &FieldNode) -> Vec<&str> {
        node.children().iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_find_parent() {
        let t = tree();
        assert_eq!(find_parent(&t, "b").map(|n| n.id.as_str()), Some("g"));
        assert_eq!(find_parent(&t, "a").map(|n| n.id.as_str()), Some("root"));
        assert!(find_parent(&t, "root").is_none());
    }

    #[test]
    fn test_update_shares_untouched_subtrees() {
        let t = tree();
        let next = update(&t, "b", |n| n.name = Some("renamed".into()));
        assert_eq!(find(&next, "b").unwrap().name.as_deref(), Some("renamed"));
        assert!(find(&t, "b").unwrap().name.is_none());
        // Siblings off the edited path are the same allocation
        assert!(Arc::ptr_eq(&t.children()[0], &next.children()[0]));
        assert!(Arc::ptr_eq(&t.children()[2], &next.children()[2]));
        assert!(!Arc::ptr_eq(&t.children()[1], &next.children()[1]));
    }

    #[test]
    fn test_update_missing_is_identity() {
        let t = tree();
        assert!(Arc::ptr_eq(&t, &update(&t, "zz", |n| n.visible = false)));
    }

    #[test]
    fn test_delete() {
        let t = tree();
        let next = delete(&t, "g").unwrap();
        assert_eq!(ids(&next), vec!["a", "d"]);
        assert!(delete(&t, "root").is_none());
        assert!(Arc::ptr_eq(&t, &delete(&t, "zz").unwrap()));
    }

    #[test]
    fn test_insert_before_after() {
        let t = tree();
        let x = FieldNode::circle("x", Vec2::ZERO, 0.1);
        let before = insert(&t, "c", x.clone(), InsertPosition::Before);
        assert_eq!(ids(find(&before, "g").unwrap()), vec!["b", "x", "c"]);
        let after = insert(&t, "c", x, InsertPosition::After);
        assert_eq!(ids(find(&after, "g").unwrap()), vec!["b", "c", "x"]);
    }

    #[test]
    fn test_insert_inside_rejections() {
        let t = tree();
        let x = FieldNode::circle("x", Vec2::ZERO, 0.1);
        // Full displace
        assert!(Arc::ptr_eq(&t, &insert(&t, "d", x.clone(), InsertPosition::Inside)));
        // Primitive target
        assert!(Arc::ptr_eq(&t, &insert(&t, "a", x.clone(), InsertPosition::Inside)));
        let next = insert(&t, "g", x, InsertPosition::Inside);
        assert_eq!(ids(find(&next, "g").unwrap()), vec!["b", "c", "x"]);
    }

    #[test]
    fn test_move_node() {
        let t = tree();
        let next = move_node(&t, "a", "c", InsertPosition::After);
        assert_eq!(ids(&next), vec!["g", "d"]);
        assert_eq!(ids(find(&next, "g").unwrap()), vec!["b", "c", "a"]);
        // Into own subtree
        assert!(Arc::ptr_eq(&t, &move_node(&t, "g", "b", InsertPosition::After)));
        // Rejected insert keeps the original tree
        assert!(Arc::ptr_eq(&t, &move_node(&t, "a", "d", InsertPosition::Inside)));
    }

    #[test]
    fn test_insert_beside_displace_child_is_rejected() {
        let t = tree();
        let x = FieldNode::circle("x", Vec2::ZERO, 0.1);
        assert!(Arc::ptr_eq(&t, &insert(&t, "src", x.clone(), InsertPosition::Before)));
        assert!(Arc::ptr_eq(&t, &insert(&t, "base", x.clone(), InsertPosition::After)));
        // Half-empty displace still takes its source
        let half = delete(&t, "src").unwrap();
        let next = insert(&half, "base", x, InsertPosition::After);
        assert_eq!(ids(find(&next, "d").unwrap()), vec!["base", "x"]);
        assert_eq!(crate::validate::validate(&next), Ok(()));
    }

    #[test]
    fn test_move_next_to_displace_child_is_rejected() {
        let t = tree();
        assert!(Arc::ptr_eq(&t, &move_node(&t, "a", "src", InsertPosition::Before)));
        assert!(Arc::ptr_eq(&t, &move_node(&t, "b", "base", InsertPosition::After)));
        // Reordering within the displace is still allowed
        let next = move_node(&t, "src", "base", InsertPosition::Before);
        assert_eq!(ids(find(&next, "d").unwrap()), vec!["src", "base"]);
    }

    #[test]
    fn test_move_operation_onto_primitive_wraps() {
        let t = tree();
        let next = move_node(&t, "g", "a", InsertPosition::Inside);
        assert_eq!(ids(&next), vec!["g", "d"]);
        assert_eq!(ids(find(&next, "g").unwrap()), vec!["a"]);
    }

    #[test]
    fn test_add_node() {
        let empty = add_node(None, None, FieldNode::circle("x", Vec2::ZERO, 0.1), "u");
        assert_eq!(empty.id, "x");

        let t = tree();
        let wrapped = add_node(Some(&t), None, FieldNode::circle("x", Vec2::ZERO, 0.1), "u");
        assert_eq!(wrapped.id, "u");
        assert_eq!(ids(&wrapped), vec!["root", "x"]);
        assert!(Arc::ptr_eq(&wrapped.children()[0], &t));

        let around = add_node(Some(&t), Some("a"), FieldNode::op("m", OpKind::Mirror), "u");
        assert_eq!(ids(&around), vec!["m", "g", "d"]);
        assert_eq!(ids(find(&around, "m").unwrap()), vec!["a"]);

        let forwarded = add_node(Some(&t), Some("d"), FieldNode::circle("x", Vec2::ZERO, 0.1), "u");
        assert_eq!(ids(&forwarded), vec!["a", "g", "d", "x"]);

        let sibling = add_node(Some(&t), Some("b"), FieldNode::circle("x", Vec2::ZERO, 0.1), "u");
        assert_eq!(ids(find(&sibling, "g").unwrap()), vec!["b", "c", "x"]);
    }

    #[test]
    fn test_add_primitive_under_full_displace_is_rejected() {
        let t = tree();
        let x = FieldNode::circle("x", Vec2::ZERO, 0.1);
        let next = add_node(Some(&t), Some("base"), x, "u");
        assert!(Arc::ptr_eq(&t, &next));
        assert_eq!(find(&next, "d").unwrap().children().len(), 2);
        assert_eq!(crate::validate::validate(&next), Ok(()));
    }

    #[test]
    fn test_reorder() {
        let t = tree();
        let up = reorder(&t, "g", Direction::Up);
        assert_eq!(ids(&up), vec!["g", "a", "d"]);
        let down = reorder(&t, "g", Direction::Down);
        assert_eq!(ids(&down), vec!["a", "d", "g"]);
        assert!(Arc::ptr_eq(&t, &reorder(&t, "a", Direction::Up)));
        assert!(Arc::ptr_eq(&t, &reorder(&t, "d", Direction::Down)));
        assert!(Arc::ptr_eq(&t, &reorder(&t, "root", Direction::Down)));
    }

    #[test]
    fn test_swap_children() {
        let t = tree();
        let next = swap_children(&t, "root", 0, 2);
        assert_eq!(ids(&next), vec!["d", "g", "a"]);
        assert!(Arc::ptr_eq(&t, &swap_children(&t, "root", 0, 3)));
        assert!(Arc::ptr_eq(&t, &swap_children(&t, "root", 1, 1)));
        assert!(Arc::ptr_eq(&t, &swap_children(&t, "a", 0, 1)));
    }

    #[test]
    fn test_set_op_kind_renames_default_label() {
        let t = Arc::new(
            FieldNode::create(NodeKind::Op(OpKind::Union), "u", Vec2::ZERO)
                .with_children(vec![FieldNode::circle("a", Vec2::ZERO, 0.1)]),
        );
        let next = set_op_kind(&t, "u", OpKind::Intersect);
        assert_eq!(next.kind(), NodeKind::Op(OpKind::Intersect));
        assert_eq!(next.name.as_deref(), Some("Intersect"));
        assert_eq!(ids(&next), vec!["a"]);

        let custom = update(&t, "u", |n| n.name = Some("Mine".into()));
        let next = set_op_kind(&custom, "u", OpKind::Xor);
        assert_eq!(next.name.as_deref(), Some("Mine"));

        let unnamed = tree();
        let next = set_op_kind(&unnamed, "g", OpKind::Union);
        assert_eq!(find(&next, "g").unwrap().name.as_deref(), Some("Union"));

        // Primitives are not operations
        assert!(Arc::ptr_eq(&unnamed, &set_op_kind(&unnamed, "a", OpKind::Union)));
        assert_eq!(find(&unnamed, "a").unwrap().kind(), NodeKind::Shape(ShapeKind::Circle));
    }

    #[test]
    fn test_expand_ancestors() {
        let t = update(&tree(), "g", |n| n.collapsed = true);
        let t = update(&t, "root", |n| n.collapsed = true);
        let next = expand_ancestors(&t, "b");
        assert!(!next.collapsed);
        assert!(!find(&next, "g").unwrap().collapsed);
        assert!(Arc::ptr_eq(&t, &expand_ancestors(&t, "zz")));
    }
}
