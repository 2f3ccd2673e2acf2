//! Constructors and builder methods for FieldNode
//!
//! Two sets of defaults live in this crate. The ones here are what the
//! editor assigns when a node is created (`FieldNode::create`); the code
//! generator has its own fallbacks for parameters that are unset.

use glam::Vec2;
use std::sync::Arc;

use super::{FieldNode, NodeBody, NodeKind, OpKind, OpParams, Operation, Primitive, Shape, ShapeKind};
use crate::registry;

impl FieldNode {
    // === Primitive constructors ===

    /// Create a primitive with an explicit shape
    #[must_use]
    pub fn primitive(id: impl Into<String>, position: Vec2, shape: Shape) -> Self {
        FieldNode {
            id: id.into(),
            name: None,
            visible: true,
            collapsed: false,
            body: NodeBody::Primitive(Primitive {
                position,
                rotation: 0.0,
                scale: Vec2::ONE,
                shape,
            }),
        }
    }

    /// Create a circle
    #[must_use]
    #[inline]
    pub fn circle(id: impl Into<String>, position: Vec2, radius: f32) -> Self {
        Self::primitive(id, position, Shape::Circle { radius: Some(radius) })
    }

    /// Create a box with the given half-extents
    #[must_use]
    #[inline]
    pub fn rect(id: impl Into<String>, position: Vec2, half_extents: Vec2) -> Self {
        Self::primitive(id, position, Shape::Box { size: Some(half_extents) })
    }

    /// Create a capsule
    #[must_use]
    #[inline]
    pub fn capsule(id: impl Into<String>, position: Vec2, radius: f32, length: f32) -> Self {
        Self::primitive(
            id,
            position,
            Shape::Capsule {
                radius: Some(radius),
                length: Some(length),
            },
        )
    }

    // === Operation constructors ===

    /// Create an operation with no children, zero blend and no parameters
    #[must_use]
    pub fn op(id: impl Into<String>, kind: OpKind) -> Self {
        FieldNode {
            id: id.into(),
            name: None,
            visible: true,
            collapsed: false,
            body: NodeBody::Operation(Operation {
                kind,
                children: Vec::new(),
                blend: 0.0,
                params: OpParams::default(),
            }),
        }
    }

    /// Create a node the way the editor does: registry label as name and
    /// the editor's creation-time parameter defaults.
    #[must_use]
    pub fn create(kind: NodeKind, id: impl Into<String>, position: Vec2) -> Self {
        let mut node = match kind {
            NodeKind::Shape(ShapeKind::Circle) => Self::circle(id, position, 0.3),
            NodeKind::Shape(ShapeKind::Box) => Self::rect(id, position, Vec2::new(0.3, 0.2)),
            NodeKind::Shape(ShapeKind::Capsule) => Self::capsule(id, position, 0.15, 0.4),
            NodeKind::Op(op) => {
                let mut node = Self::op(id, op).with_blend(0.1);
                if let NodeBody::Operation(o) = &mut node.body {
                    o.params = OpParams::editor_defaults();
                }
                node
            }
        };
        node.name = Some(registry::lookup(kind).label.to_string());
        node
    }

    // === Builders ===

    /// Set the display name
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the rotation (primitives only)
    #[must_use]
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        if let NodeBody::Primitive(p) = &mut self.body {
            p.rotation = rotation;
        }
        self
    }

    /// Set the scale (primitives only)
    #[must_use]
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        if let NodeBody::Primitive(p) = &mut self.body {
            p.scale = scale;
        }
        self
    }

    /// Replace the children (operations only)
    #[must_use]
    pub fn with_children(mut self, children: Vec<FieldNode>) -> Self {
        if let NodeBody::Operation(op) = &mut self.body {
            op.children = children.into_iter().map(Arc::new).collect();
        }
        self
    }

    /// Set the blend factor (operations only)
    #[must_use]
    pub fn with_blend(mut self, blend: f32) -> Self {
        if let NodeBody::Operation(op) = &mut self.body {
            op.blend = blend;
        }
        self
    }

    /// Edit the optional parameters in place (operations only)
    #[must_use]
    pub fn with_params(mut self, f: impl FnOnce(&mut OpParams)) -> Self {
        if let NodeBody::Operation(op) = &mut self.body {
            f(&mut op.params);
        }
        self
    }
}
