//! CPU field evaluation
//!
//! Evaluates a node tree at a point with exactly the semantics of the
//! generated shader: the same preamble math (GLSL `mod`, column-major
//! `mat2`), the same parameter fallbacks, fold rules and sentinel.
//! Used by the canvas layer for picking and by tests to check the
//! numeric meaning of generated code.

pub mod parallel;

pub use parallel::{eval_batch, eval_batch_parallel, eval_grid};

use crate::codegen::defaults::*;
use crate::types::{Axis, FieldNode, NodeBody, OpKind, Operation, Primitive, Shape};
use glam::Vec2;

/// Evaluate a tree at a point. An empty tree is the sentinel everywhere.
#[inline]
pub fn eval(root: Option<&FieldNode>, point: Vec2) -> f32 {
    root.map_or(SENTINEL_DISTANCE, |node| eval_node(node, point))
}

/// Evaluate a single node (recursive)
pub fn eval_node(node: &FieldNode, point: Vec2) -> f32 {
    match &node.body {
        NodeBody::Primitive(prim) => eval_primitive(prim, point),
        NodeBody::Operation(op) => eval_operation(op, point),
    }
}

fn eval_primitive(prim: &Primitive, point: Vec2) -> f32 {
    let mut p = point - prim.position;
    if prim.rotation != 0.0 {
        p = rotate(p, prim.rotation);
    }
    match prim.shape {
        Shape::Circle { radius } => sd_circle(p, radius.unwrap_or(CIRCLE_RADIUS)),
        Shape::Box { size } => sd_box(p, size.unwrap_or(BOX_HALF_EXTENTS)),
        Shape::Capsule { radius, length } => sd_capsule(
            p,
            length.unwrap_or(CAPSULE_LENGTH),
            radius.unwrap_or(CAPSULE_RADIUS),
        ),
    }
}

fn eval_operation(op: &Operation, point: Vec2) -> f32 {
    if op.children.is_empty() {
        return SENTINEL_DISTANCE;
    }

    let params = &op.params;
    let is_x = params.axis.unwrap_or_default() == Axis::X;
    let p = match op.kind {
        OpKind::Repeat => op_repeat(point, params.period.unwrap_or(REPEAT_PERIOD)),
        OpKind::Mirror => op_mirror(point, params.offset.unwrap_or(MIRROR_OFFSET), is_x),
        OpKind::Bend => op_bend(point, params.strength.unwrap_or(WARP_STRENGTH), is_x),
        OpKind::Twist => op_twist(point, params.strength.unwrap_or(WARP_STRENGTH)),
        _ => point,
    };

    if op.kind == OpKind::Displace {
        let base = eval_node(&op.children[0], p);
        let strength = params.strength.unwrap_or(DISPLACE_STRENGTH);
        let height = match op.children.get(1) {
            Some(source) => eval_node(source, p),
            None => (p.x * DISPLACE_WAVE).sin() * (p.y * DISPLACE_WAVE).sin(),
        };
        return base + strength * height;
    }

    let d: Vec<f32> = op.children.iter().map(|c| eval_node(c, p)).collect();
    let k = op.blend;
    let hard = k == 0.0;

    let folded = match op.kind {
        OpKind::Subtract | OpKind::SmoothSubtract => match d.len() {
            1 => d[0],
            _ => {
                let cutter = d[1..].iter().copied().fold(f32::INFINITY, f32::min);
                if op.kind == OpKind::Subtract && hard {
                    d[0].max(-cutter)
                } else {
                    op_smooth_subtraction(cutter, d[0], k)
                }
            }
        },
        OpKind::Intersect if hard => fold(&d, f32::max),
        OpKind::Intersect | OpKind::SmoothIntersect => {
            fold(&d, |a, b| op_smooth_intersection(a, b, k))
        }
        OpKind::Xor => fold(&d, op_xor),
        OpKind::Group => fold(&d, f32::min),
        OpKind::SmoothUnion => fold(&d, |a, b| op_smooth_union(a, b, k)),
        _ if hard => fold(&d, f32::min),
        _ => fold(&d, |a, b| op_smooth_union(a, b, k)),
    };

    match op.kind {
        OpKind::Dilate => folded - params.op_radius.unwrap_or(METRIC_RADIUS),
        OpKind::Erode => folded + params.op_radius.unwrap_or(METRIC_RADIUS),
        OpKind::Shell => folded.abs() - params.thickness.unwrap_or(SHELL_THICKNESS),
        OpKind::Invert => -folded,
        OpKind::Clamp => glsl_clamp(
            folded,
            params.min_limit.unwrap_or(CLAMP_MIN),
            params.max_limit.unwrap_or(CLAMP_MAX),
        ),
        _ => folded,
    }
}

/// Left fold over a non-empty slice
#[inline]
fn fold(d: &[f32], f: impl Fn(f32, f32) -> f32) -> f32 {
    d[1..].iter().fold(d[0], |acc, &x| f(acc, x))
}

// ── Preamble functions ───────────────────────────────────────

/// GLSL `clamp`: `min(max(x, lo), hi)`; never panics on `lo > hi`
#[inline(always)]
fn glsl_clamp(x: f32, lo: f32, hi: f32) -> f32 {
    x.max(lo).min(hi)
}

/// GLSL `mix`
#[inline(always)]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// GLSL `mod`: `x - y * floor(x / y)`
#[inline(always)]
fn glsl_mod(x: Vec2, y: Vec2) -> Vec2 {
    x - y * (x / y).floor()
}

/// `sdCircle`
#[inline]
pub fn sd_circle(p: Vec2, r: f32) -> f32 {
    p.length() - r
}

/// `sdBox`
#[inline]
pub fn sd_box(p: Vec2, b: Vec2) -> f32 {
    let d = p.abs() - b;
    d.max(Vec2::ZERO).length() + d.x.max(d.y).min(0.0)
}

/// `sdCapsule`: vertical segment of length `h` centered at the origin
#[inline]
pub fn sd_capsule(p: Vec2, h: f32, r: f32) -> f32 {
    let y = p.y - glsl_clamp(p.y, -h * 0.5, h * 0.5);
    Vec2::new(p.x, y).length() - r
}

/// `opSmoothUnion`
#[inline]
pub fn op_smooth_union(d1: f32, d2: f32, k: f32) -> f32 {
    let h = glsl_clamp(0.5 + 0.5 * (d2 - d1) / k.max(0.0001), 0.0, 1.0);
    mix(d2, d1, h) - k * h * (1.0 - h)
}

/// `opSmoothSubtraction`: removes `d1` from `d2`
#[inline]
pub fn op_smooth_subtraction(d1: f32, d2: f32, k: f32) -> f32 {
    let h = glsl_clamp(0.5 - 0.5 * (d2 + d1) / k.max(0.0001), 0.0, 1.0);
    mix(d2, -d1, h) + k * h * (1.0 - h)
}

/// `opSmoothIntersection`
#[inline]
pub fn op_smooth_intersection(d1: f32, d2: f32, k: f32) -> f32 {
    let h = glsl_clamp(0.5 - 0.5 * (d2 - d1) / k.max(0.0001), 0.0, 1.0);
    mix(d2, d1, h) + k * h * (1.0 - h)
}

/// `opXor`
#[inline]
pub fn op_xor(d1: f32, d2: f32) -> f32 {
    d1.min(d2).max(-d1.max(d2))
}

/// `rotate`: `mat2(c, -s, s, c) * p` with GLSL column-major layout
#[inline]
pub fn rotate(p: Vec2, a: f32) -> Vec2 {
    let (s, c) = a.sin_cos();
    Vec2::new(c * p.x + s * p.y, -s * p.x + c * p.y)
}

/// `opRepeat`
#[inline]
pub fn op_repeat(p: Vec2, period: Vec2) -> Vec2 {
    glsl_mod(p + 0.5 * period, period) - 0.5 * period
}

/// `opMirror`
#[inline]
pub fn op_mirror(mut p: Vec2, offset: f32, is_x: bool) -> Vec2 {
    if is_x {
        p.x = (p.x - offset).abs();
    } else {
        p.y = (p.y - offset).abs();
    }
    p
}

/// `opBend`
#[inline]
pub fn op_bend(p: Vec2, k: f32, is_x: bool) -> Vec2 {
    rotate(p, k * if is_x { p.x } else { p.y })
}

/// `opTwist`
#[inline]
pub fn op_twist(p: Vec2, k: f32) -> Vec2 {
    rotate(p, k * p.length())
}
