//! Core types for precision-field
//!
//! Defines the editor node tree: primitives (leaves) and operations
//! (internal nodes), plus the operator kind and category enums.
//!
//! Trees are immutable snapshots. Children are held behind `Arc` so an
//! edit can rebuild the path to the changed node and share everything else.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

mod constructors;
mod params;

pub use params::{Axis, OpParams};

/// Category of a node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Leaf geometry (circle, box, capsule)
    Primitive,
    /// Combines sibling distances into one
    Boolean,
    /// Transforms the point before descending into children
    Domain,
    /// Post-processes the folded distance
    Metric,
    /// Pure grouping
    Utility,
}

/// Primitive shape kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Circle
    Circle,
    /// Axis-aligned box
    Box,
    /// Vertical capsule
    Capsule,
}

impl ShapeKind {
    /// Number of primitive shapes
    pub const COUNT: usize = 3;
}

/// Operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    // === Boolean ===
    /// Hard (or blended) union
    Union,
    /// First child minus the rest
    Subtract,
    /// Intersection
    Intersect,
    /// Symmetric difference
    Xor,
    /// Union that always blends
    SmoothUnion,
    /// Subtraction that always blends
    SmoothSubtract,
    /// Intersection that always blends
    SmoothIntersect,

    // === Domain ===
    /// Modulo tiling by a period vector
    Repeat,
    /// Reflection on one axis about an offset
    Mirror,
    /// Position-dependent rotation along an axis
    Bend,
    /// Rotation proportional to distance from origin
    Twist,
    /// Height-map modulation of a base field
    Displace,

    // === Metric ===
    /// Grow the surface by `op_radius`
    Dilate,
    /// Shrink the surface by `op_radius`
    Erode,
    /// Annular shell of `thickness`
    Shell,
    /// Negate the field
    Invert,
    /// Clamp the field into `[min_limit, max_limit]`
    Clamp,

    // === Utility ===
    /// Transparent grouping
    Group,
}

impl OpKind {
    /// All operation kinds, in registry order
    pub const ALL: [OpKind; 18] = [
        OpKind::Union,
        OpKind::Subtract,
        OpKind::Intersect,
        OpKind::Xor,
        OpKind::SmoothUnion,
        OpKind::SmoothSubtract,
        OpKind::SmoothIntersect,
        OpKind::Repeat,
        OpKind::Mirror,
        OpKind::Bend,
        OpKind::Twist,
        OpKind::Displace,
        OpKind::Dilate,
        OpKind::Erode,
        OpKind::Shell,
        OpKind::Invert,
        OpKind::Clamp,
        OpKind::Group,
    ];

    /// Returns the category of this operation kind
    pub fn category(self) -> Category {
        match self {
            OpKind::Union
            | OpKind::Subtract
            | OpKind::Intersect
            | OpKind::Xor
            | OpKind::SmoothUnion
            | OpKind::SmoothSubtract
            | OpKind::SmoothIntersect => Category::Boolean,
            OpKind::Repeat | OpKind::Mirror | OpKind::Bend | OpKind::Twist | OpKind::Displace => {
                Category::Domain
            }
            OpKind::Dilate | OpKind::Erode | OpKind::Shell | OpKind::Invert | OpKind::Clamp => {
                Category::Metric
            }
            OpKind::Group => Category::Utility,
        }
    }
}

/// Any node kind: the three primitive shapes plus every operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeKind {
    /// Primitive leaf
    Shape(ShapeKind),
    /// Operation
    Op(OpKind),
}

impl NodeKind {
    /// All node kinds, in registry order
    pub const ALL: [NodeKind; 21] = [
        NodeKind::Shape(ShapeKind::Circle),
        NodeKind::Shape(ShapeKind::Box),
        NodeKind::Shape(ShapeKind::Capsule),
        NodeKind::Op(OpKind::Union),
        NodeKind::Op(OpKind::Subtract),
        NodeKind::Op(OpKind::Intersect),
        NodeKind::Op(OpKind::Xor),
        NodeKind::Op(OpKind::SmoothUnion),
        NodeKind::Op(OpKind::SmoothSubtract),
        NodeKind::Op(OpKind::SmoothIntersect),
        NodeKind::Op(OpKind::Repeat),
        NodeKind::Op(OpKind::Mirror),
        NodeKind::Op(OpKind::Bend),
        NodeKind::Op(OpKind::Twist),
        NodeKind::Op(OpKind::Displace),
        NodeKind::Op(OpKind::Dilate),
        NodeKind::Op(OpKind::Erode),
        NodeKind::Op(OpKind::Shell),
        NodeKind::Op(OpKind::Invert),
        NodeKind::Op(OpKind::Clamp),
        NodeKind::Op(OpKind::Group),
    ];

    /// Position of this kind in [`NodeKind::ALL`]
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            NodeKind::Shape(kind) => kind as usize,
            NodeKind::Op(kind) => ShapeKind::COUNT + kind as usize,
        }
    }

    /// Returns the category of this kind
    pub fn category(self) -> Category {
        match self {
            NodeKind::Shape(_) => Category::Primitive,
            NodeKind::Op(op) => op.category(),
        }
    }

    /// Wire name (`"circle"`, `"smooth_union"`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Shape(ShapeKind::Circle) => "circle",
            NodeKind::Shape(ShapeKind::Box) => "box",
            NodeKind::Shape(ShapeKind::Capsule) => "capsule",
            NodeKind::Op(op) => match op {
                OpKind::Union => "union",
                OpKind::Subtract => "subtract",
                OpKind::Intersect => "intersect",
                OpKind::Xor => "xor",
                OpKind::SmoothUnion => "smooth_union",
                OpKind::SmoothSubtract => "smooth_subtract",
                OpKind::SmoothIntersect => "smooth_intersect",
                OpKind::Repeat => "repeat",
                OpKind::Mirror => "mirror",
                OpKind::Bend => "bend",
                OpKind::Twist => "twist",
                OpKind::Displace => "displace",
                OpKind::Dilate => "dilate",
                OpKind::Erode => "erode",
                OpKind::Shell => "shell",
                OpKind::Invert => "invert",
                OpKind::Clamp => "clamp",
                OpKind::Group => "group",
            },
        }
    }
}

impl From<ShapeKind> for NodeKind {
    fn from(kind: ShapeKind) -> Self {
        NodeKind::Shape(kind)
    }
}

impl From<OpKind> for NodeKind {
    fn from(kind: OpKind) -> Self {
        NodeKind::Op(kind)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = crate::registry::RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| crate::registry::RegistryError::UnknownKind(s.to_string()))
    }
}

/// Shape of a primitive with its (optional) size parameters.
///
/// Missing sizes are resolved by the code generator's fallbacks, so the IR
/// can tell "unset" apart from "set to the fallback value".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Circle of `radius`
    Circle {
        /// Radius
        radius: Option<f32>,
    },
    /// Box with half-extents `size`
    Box {
        /// Half-extents
        size: Option<Vec2>,
    },
    /// Capsule along Y of total `length` and `radius`
    Capsule {
        /// Radius
        radius: Option<f32>,
        /// Segment length
        length: Option<f32>,
    },
}

impl Shape {
    /// Kind of this shape
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Box { .. } => ShapeKind::Box,
            Shape::Capsule { .. } => ShapeKind::Capsule,
        }
    }
}

/// Primitive leaf payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    /// Center position
    pub position: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// Non-uniform scale (exported to the IR, not used by codegen)
    pub scale: Vec2,
    /// Shape and its size parameters
    pub shape: Shape,
}

/// Operation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Operator kind
    pub kind: OpKind,
    /// Ordered children
    pub children: Vec<Arc<FieldNode>>,
    /// Blend factor `k` for boolean smoothing
    pub blend: f32,
    /// Optional per-kind parameters
    pub params: OpParams,
}

/// Primitive or operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeBody {
    /// Leaf
    Primitive(Primitive),
    /// Internal node
    Operation(Operation),
}

/// A node of the editor tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldNode {
    /// Unique identifier, stable across edits
    pub id: String,
    /// Optional display name
    pub name: Option<String>,
    /// Visibility flag (UI only)
    pub visible: bool,
    /// Collapsed flag (UI only)
    pub collapsed: bool,
    /// Primitive or operation payload
    pub body: NodeBody,
}

impl FieldNode {
    /// Kind of this node
    pub fn kind(&self) -> NodeKind {
        match &self.body {
            NodeBody::Primitive(p) => NodeKind::Shape(p.shape.kind()),
            NodeBody::Operation(op) => NodeKind::Op(op.kind),
        }
    }

    /// Category of this node
    #[inline]
    pub fn category(&self) -> Category {
        self.kind().category()
    }

    /// Returns true for primitive leaves
    #[inline]
    pub fn is_primitive(&self) -> bool {
        matches!(self.body, NodeBody::Primitive(_))
    }

    /// Primitive payload, if any
    pub fn as_primitive(&self) -> Option<&Primitive> {
        match &self.body {
            NodeBody::Primitive(p) => Some(p),
            NodeBody::Operation(_) => None,
        }
    }

    /// Operation payload, if any
    pub fn as_operation(&self) -> Option<&Operation> {
        match &self.body {
            NodeBody::Operation(op) => Some(op),
            NodeBody::Primitive(_) => None,
        }
    }

    /// Children in stored order (empty for primitives)
    pub fn children(&self) -> &[Arc<FieldNode>] {
        match &self.body {
            NodeBody::Operation(op) => &op.children,
            NodeBody::Primitive(_) => &[],
        }
    }

    /// Count total nodes in the tree
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(|c| c.node_count()).sum::<usize>()
    }
}
