//! Built-in regression scenes
//!
//! The four golden fixtures exercise sibling domain inheritance, sibling
//! order, the no-domain case and nested domain stacks. `demo_scene` is the
//! editor's starting scene.

use crate::types::{Axis, FieldNode, NodeBody, NodeKind, OpKind, ShapeKind};
use glam::Vec2;
use std::sync::Arc;

/// Names accepted by [`by_name`]
pub const NAMES: [&str; 5] = [
    "mirror_siblings",
    "reorder_siblings",
    "no_domain",
    "deep_nesting",
    "demo_scene",
];

/// Look up a fixture by name
pub fn by_name(name: &str) -> Option<FieldNode> {
    match name {
        "mirror_siblings" => Some(mirror_siblings()),
        "reorder_siblings" => Some(reorder_siblings()),
        "no_domain" => Some(no_domain()),
        "deep_nesting" => Some(deep_nesting()),
        "demo_scene" => Some(demo_scene()),
        _ => None,
    }
}

fn c1() -> FieldNode {
    FieldNode::circle("c1", Vec2::new(0.2, 0.0), 0.1)
}

fn c2() -> FieldNode {
    FieldNode::rect("c2", Vec2::new(-0.2, 0.2), Vec2::new(0.1, 0.1))
}

fn mirror_x(id: &str, children: Vec<FieldNode>) -> FieldNode {
    FieldNode::op(id, OpKind::Mirror)
        .named("Golden: Mirror Siblings")
        .with_params(|p| {
            p.axis = Some(Axis::X);
            p.offset = Some(-0.5);
        })
        .with_children(children)
}

/// Mirror on x at offset -0.5 over a circle and a box
pub fn mirror_siblings() -> FieldNode {
    mirror_x("mirror-root", vec![c1(), c2()])
}

/// [`mirror_siblings`] with the two children swapped
pub fn reorder_siblings() -> FieldNode {
    mirror_x("mirror-reordered", vec![c2(), c1()])
}

/// Hard union of the same two primitives, no domain operator
pub fn no_domain() -> FieldNode {
    FieldNode::op("union-root", OpKind::Union).with_children(vec![c1(), c2()])
}

/// repeat > mirror(y) > bend > circle
pub fn deep_nesting() -> FieldNode {
    let leaf = FieldNode::circle("leaf", Vec2::new(0.1, 0.1), 0.05);
    let bend = FieldNode::op("inner-bend", OpKind::Bend)
        .with_params(|p| p.strength = Some(0.5))
        .with_children(vec![leaf]);
    let mirror = FieldNode::op("mid-mirror", OpKind::Mirror)
        .with_params(|p| p.axis = Some(Axis::Y))
        .with_children(vec![bend]);
    FieldNode::op("deep-root", OpKind::Repeat)
        .with_params(|p| p.period = Some(Vec2::new(2.0, 2.0)))
        .with_children(vec![mirror])
}

fn create_op(kind: OpKind, id: &str) -> FieldNode {
    FieldNode::create(NodeKind::Op(kind), id, Vec2::ZERO)
}

fn create_shape(kind: ShapeKind, id: &str, x: f32, y: f32) -> FieldNode {
    FieldNode::create(NodeKind::Shape(kind), id, Vec2::new(x, y))
}

fn set_mirror(node: FieldNode, axis: Axis, offset: Option<f32>) -> FieldNode {
    node.with_params(|p| {
        p.axis = Some(axis);
        if let Some(offset) = offset {
            p.offset = Some(offset);
        }
    })
}

/// Domain inheritance scene: a hard union of three mirror setups built
/// with the editor's creation defaults.
///
/// 1. mirror(x, -0.8) over a capsule and a circle
/// 2. mirror(x, 0.8) over a group of two boxes
/// 3. mirror(y, -0.4) over mirror(x) over a circle
pub fn demo_scene() -> FieldNode {
    let test1 = set_mirror(create_op(OpKind::Mirror, "test1"), Axis::X, Some(-0.8))
        .named("1: Parent Mirror + 2 Siblings")
        .with_children(vec![
            create_shape(ShapeKind::Capsule, "t1-capsule", -0.5, 0.6),
            create_shape(ShapeKind::Circle, "t1-circle", -0.6, 0.3),
        ]);

    let group = create_op(OpKind::Group, "t2-group").with_children(vec![
        create_shape(ShapeKind::Box, "t2-box1", 0.5, -0.6),
        create_shape(ShapeKind::Box, "t2-box2", 0.65, -0.4),
    ]);
    let test2 = set_mirror(create_op(OpKind::Mirror, "test2"), Axis::X, Some(0.8))
        .named("2: Parent Mirror + Nested Group")
        .with_children(vec![group]);

    let inner = set_mirror(create_op(OpKind::Mirror, "t3-mirror"), Axis::X, None)
        .with_children(vec![create_shape(ShapeKind::Circle, "t3-core", 0.2, -0.2)]);
    let test3 = set_mirror(create_op(OpKind::Mirror, "test3"), Axis::Y, Some(-0.4))
        .named("3: Composed Mirrors")
        .with_children(vec![inner]);

    let mut scene = create_op(OpKind::Union, "scene")
        .named("Domain Inheritance Regression Suite")
        .with_blend(0.0);
    if let NodeBody::Operation(op) = &mut scene.body {
        op.children = vec![Arc::new(test1), Arc::new(test2), Arc::new(test3)];
    }
    scene
}
