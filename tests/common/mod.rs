//! Common test helpers for precision-field integration tests

#![allow(dead_code)]

use precision_field::prelude::*;
use std::sync::Arc;

// ============================================================================
// Standard test scenes
// ============================================================================

/// Two overlapping circles under a union with the given blend
pub fn two_circles(kind: OpKind, blend: f32) -> FieldNode {
    FieldNode::op("u", kind).with_blend(blend).with_children(vec![
        FieldNode::circle("a", Vec2::new(-0.2, 0.0), 0.3),
        FieldNode::circle("b", Vec2::new(0.2, 0.0), 0.3),
    ])
}

/// One node of every kind, nested so every operator has children
pub fn every_kind() -> FieldNode {
    let leaf = |id: &str| FieldNode::circle(id, Vec2::new(0.1, -0.1), 0.2);
    let boolean = |id: &str, kind: OpKind| {
        FieldNode::op(id, kind)
            .with_blend(0.05)
            .with_children(vec![leaf(&format!("{id}-a")), leaf(&format!("{id}-b"))])
    };

    let booleans = FieldNode::op("booleans", OpKind::Group).with_children(vec![
        boolean("union", OpKind::Union),
        boolean("subtract", OpKind::Subtract),
        boolean("intersect", OpKind::Intersect),
        boolean("xor", OpKind::Xor),
        boolean("smooth-union", OpKind::SmoothUnion),
        boolean("smooth-subtract", OpKind::SmoothSubtract),
        boolean("smooth-intersect", OpKind::SmoothIntersect),
    ]);

    let warp = FieldNode::op("repeat", OpKind::Repeat)
        .with_params(|p| p.period = Some(Vec2::new(1.5, 1.5)))
        .with_children(vec![FieldNode::op("twist", OpKind::Twist).with_children(vec![
            FieldNode::op("bend", OpKind::Bend)
                .with_params(|p| p.axis = Some(Axis::Y))
                .with_children(vec![FieldNode::op("displace", OpKind::Displace).with_children(
                    vec![
                        FieldNode::rect("base", Vec2::ZERO, Vec2::new(0.3, 0.1)),
                        FieldNode::capsule("source", Vec2::ZERO, 0.1, 0.4),
                    ],
                )]),
        ])]);

    let metrics = FieldNode::op("clamp", OpKind::Clamp).with_children(vec![
        FieldNode::op("invert", OpKind::Invert).with_children(vec![FieldNode::op(
            "shell",
            OpKind::Shell,
        )
        .with_children(vec![FieldNode::op("erode", OpKind::Erode).with_children(vec![
            FieldNode::op("dilate", OpKind::Dilate).with_children(vec![leaf("metric-leaf")]),
        ])])]),
    ]);

    FieldNode::op("root", OpKind::Mirror).with_children(vec![booleans, warp, metrics])
}

// ============================================================================
// Deterministic mutation
// ============================================================================

/// Linear congruential generator, `seed * 1664525 + 1013904223 mod 2^32`
pub struct Lcg {
    seed: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Lcg { seed }
    }

    /// Next value in `[0, 1)`
    pub fn next(&mut self) -> f64 {
        self.seed = (self.seed * 1_664_525 + 1_013_904_223) % (1u64 << 32);
        self.seed as f64 / (1u64 << 32) as f64
    }
}

/// One mutation step on the root: with roughly a third probability each,
/// swap two random children, nudge the blend by up to ±0.05 (clamped at
/// zero), or do nothing. Only roots with more than one child are touched.
pub fn mutate(root: &Arc<FieldNode>, rng: &mut Lcg) -> Arc<FieldNode> {
    let Some(op) = root.as_operation() else {
        return Arc::clone(root);
    };
    let n = op.children.len();
    if n < 2 {
        return Arc::clone(root);
    }

    let r = rng.next();
    if r < 0.33 {
        let i = (rng.next() * n as f64) as usize;
        let j = (rng.next() * n as f64) as usize;
        let mut next = (**root).clone();
        if let NodeBody::Operation(op) = &mut next.body {
            op.children.swap(i, j);
        }
        return Arc::new(next);
    }
    if r < 0.66 {
        let delta = (rng.next() - 0.5) * 0.1;
        let blend = (op.blend as f64 + delta).max(0.0) as f32;
        return precision_field::edit::update(root, &root.id, |node| {
            if let NodeBody::Operation(op) = &mut node.body {
                op.blend = blend;
            }
        });
    }
    Arc::clone(root)
}

/// Digests of `steps` successive mutations from `start`
pub fn mutation_digests(start: &FieldNode, seed: u64, steps: usize) -> Vec<String> {
    let mut rng = Lcg::new(seed);
    let mut tree = Arc::new(start.clone());
    (0..steps)
        .map(|_| {
            tree = mutate(&tree, &mut rng);
            fingerprint(Some(&*tree))
        })
        .collect()
}

// ============================================================================
// Standard test points
// ============================================================================

/// Regular grid of points in [-1, 1]^2
pub fn test_grid_points(resolution: usize) -> Vec<Vec2> {
    let step = 2.0 / resolution as f32;
    let mut points = Vec::with_capacity(resolution * resolution);
    for j in 0..resolution {
        for i in 0..resolution {
            points.push(Vec2::new(
                -1.0 + (i as f32 + 0.5) * step,
                -1.0 + (j as f32 + 0.5) * step,
            ));
        }
    }
    points
}

// ============================================================================
// Assertion helpers
// ============================================================================

/// Assert two f32 values are close within tolerance
pub fn assert_close(a: f32, b: f32, tol: f32, msg: &str) {
    assert!(
        (a - b).abs() < tol,
        "{}: {} vs {} (diff={}, tol={})",
        msg,
        a,
        b,
        (a - b).abs(),
        tol
    );
}

/// Ids in the order `collect_primitives` returns them
pub fn primitive_ids(root: &FieldNode) -> Vec<String> {
    collect_primitives(Some(root))
        .iter()
        .map(|n| n.id.clone())
        .collect()
}
