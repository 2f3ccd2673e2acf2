//! # precision-field
//!
//! Compiler core for a 2D signed-distance-field editor.
//!
//! The editor holds a tree of primitives (circle, box, capsule) and
//! operators (booleans, domain warps, metric post-processing, groups).
//! This crate turns a snapshot of that tree into:
//!
//! - **IR**: a flat, id-keyed table where each node records the domain
//!   operators above it and the tree's post-order evaluation order
//! - **Canonical text + digest**: a key-sorted JSON encoding of the IR and
//!   its SHA-256, used as a regression fingerprint
//! - **GLSL**: a fixed helper preamble plus a generated `float map(vec2 p)`
//!
//! plus a CPU evaluator that mirrors the generated shader, structural
//! validation, persistent tree edits and inspection helpers.
//!
//! ## Example
//!
//! ```rust
//! use precision_field::prelude::*;
//!
//! let scene = FieldNode::op("m", OpKind::Mirror)
//!     .with_params(|p| p.offset = Some(-0.5))
//!     .with_children(vec![
//!         FieldNode::circle("a", Vec2::new(0.2, 0.0), 0.1),
//!         FieldNode::rect("b", Vec2::new(-0.2, 0.2), Vec2::splat(0.1)),
//!     ]);
//!
//! // Both siblings inherit the mirror
//! let ir = compile(Some(&scene));
//! assert_eq!(ir.evaluation_order, vec!["a", "b", "m"]);
//! assert_eq!(ancestry_of(&scene, "b"), vec!["Mirror (m)"]);
//!
//! // Stable fingerprint
//! assert_eq!(fingerprint(Some(&scene)), hash(&serialize(&ir)));
//!
//! // Shader text and the matching CPU distance
//! let glsl = generate(Some(&scene));
//! assert!(glsl.contains("vec2 p_m = opMirror(p, -0.5000, true);"));
//! // x = -0.3 reflects onto the circle at x = 0.2
//! let d = eval(Some(&scene), Vec2::new(-0.3, 0.0));
//! assert!(d < 0.0);
//! ```

#![warn(missing_docs)]

pub mod codegen;
pub mod edit;
pub mod eval;
pub mod fixtures;
pub mod inspect;
pub mod ir;
pub mod registry;
pub mod types;
pub mod validate;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::codegen::{generate, CodegenConfig, ShaderProgram, Statement};
    pub use crate::edit::{Direction, InsertPosition};
    pub use crate::eval::{eval, eval_batch, eval_batch_parallel, eval_grid};
    pub use crate::inspect::{ancestry_of, collect_primitives, find_node};
    pub use crate::ir::{
        check_golden, compile, fingerprint, hash, serialize, GoldenMismatch, Ir, IrNode, ParamValue,
    };
    pub use crate::registry::{OperatorMeta, RegistryError};
    pub use crate::types::{
        Axis, Category, FieldNode, NodeBody, NodeKind, OpKind, OpParams, Operation, Primitive,
        Shape, ShapeKind,
    };
    pub use crate::validate::{validate, ValidationError};
    pub use glam::Vec2;
}

// Re-exports for convenience
pub use codegen::generate;
pub use eval::eval;
pub use ir::{compile, fingerprint, hash, serialize};
pub use types::FieldNode;
