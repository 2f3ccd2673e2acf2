//! Operator registry
//!
//! Static, read-only metadata for every node kind: display label, category
//! and icon name. Built at compile time; there is no mutation path.

use crate::types::{Category, NodeKind, OpKind, ShapeKind};
use thiserror::Error;

/// Registry lookup errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The name does not denote any registered kind
    #[error("Unknown operator kind: {0}")]
    UnknownKind(String),
}

/// Metadata for one node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorMeta {
    /// The kind described
    pub kind: NodeKind,
    /// Human readable label
    pub label: &'static str,
    /// Semantic category
    pub category: Category,
    /// Icon name used by the editor
    pub icon: &'static str,
}

/// Label shown for kinds that cannot be resolved
pub const FALLBACK_LABEL: &str = "Node";

const fn shape(kind: ShapeKind, label: &'static str, icon: &'static str) -> OperatorMeta {
    OperatorMeta {
        kind: NodeKind::Shape(kind),
        label,
        category: Category::Primitive,
        icon,
    }
}

const fn op(kind: OpKind, label: &'static str, category: Category, icon: &'static str) -> OperatorMeta {
    OperatorMeta {
        kind: NodeKind::Op(kind),
        label,
        category,
        icon,
    }
}

/// The registry table, in `NodeKind::ALL` order
pub static REGISTRY: [OperatorMeta; 21] = [
    shape(ShapeKind::Circle, "Circle", "Circle"),
    shape(ShapeKind::Box, "Box", "Square"),
    shape(ShapeKind::Capsule, "Capsule", "CapsuleIcon"),
    op(OpKind::Union, "Union", Category::Boolean, "Combine"),
    op(OpKind::Subtract, "Subtract", Category::Boolean, "Scissors"),
    op(OpKind::Intersect, "Intersect", Category::Boolean, "Target"),
    op(OpKind::Xor, "XOR", Category::Boolean, "Layers"),
    op(OpKind::SmoothUnion, "Smooth Union", Category::Boolean, "Cloud"),
    op(OpKind::SmoothSubtract, "Smooth Subtract", Category::Boolean, "Eraser"),
    op(OpKind::SmoothIntersect, "Smooth Intersect", Category::Boolean, "Crosshair"),
    op(OpKind::Repeat, "Repeat (Modulo)", Category::Domain, "Grid"),
    op(OpKind::Mirror, "Mirror", Category::Domain, "Columns2"),
    op(OpKind::Bend, "Bend", Category::Domain, "Route"),
    op(OpKind::Twist, "Twist", Category::Domain, "Tornado"),
    op(OpKind::Displace, "Displace", Category::Domain, "Waves"),
    op(OpKind::Dilate, "Dilate (Expand)", Category::Metric, "Maximize"),
    op(OpKind::Erode, "Erode (Round)", Category::Metric, "Minimize"),
    op(OpKind::Shell, "Shell (Annular)", Category::Metric, "CircleDashed"),
    op(OpKind::Invert, "Invert Field", Category::Metric, "Contrast"),
    op(OpKind::Clamp, "Clamp Field", Category::Metric, "Lock"),
    op(OpKind::Group, "Group", Category::Utility, "FolderTree"),
];

/// Look up the metadata of a kind. Total over `NodeKind`.
pub fn lookup(kind: NodeKind) -> &'static OperatorMeta {
    &REGISTRY[kind.index()]
}

/// Look up the metadata of a kind by its wire name
pub fn lookup_name(name: &str) -> Result<&'static OperatorMeta, RegistryError> {
    let kind: NodeKind = name.parse()?;
    Ok(lookup(kind))
}

/// Label for a wire name, or [`FALLBACK_LABEL`] when the name is unknown
pub fn label_or_default(name: &str) -> &'static str {
    lookup_name(name).map_or(FALLBACK_LABEL, |meta| meta.label)
}
