//! Compiler: FieldNode tree → IR
//!
//! Depth-first flattening that records each node's inherited domain stack,
//! its ordered child ids and a post-order evaluation sequence.

use super::{Ir, IrNode, ParamValue};
use crate::types::{Category, FieldNode, NodeBody, OpParams, Primitive, Shape};
use std::collections::HashMap;

/// Compile a tree snapshot into its IR.
///
/// An absent root yields an empty IR (no nodes, empty order, empty root id).
pub fn compile(root: Option<&FieldNode>) -> Ir {
    let Some(root) = root else {
        return Ir::default();
    };

    let mut compiler = Compiler::new();
    compiler.compile_node(root, &[]);

    log::debug!(
        "compiled IR: root={} nodes={}",
        root.id,
        compiler.evaluation_order.len()
    );

    Ir {
        nodes: compiler.nodes,
        root_id: root.id.clone(),
        evaluation_order: compiler.evaluation_order,
    }
}

/// Internal compiler state
struct Compiler {
    nodes: HashMap<String, IrNode>,
    evaluation_order: Vec<String>,
}

impl Compiler {
    fn new() -> Self {
        Compiler {
            nodes: HashMap::new(),
            evaluation_order: Vec::new(),
        }
    }

    /// Compile a single node (recursive). `inherited` excludes the node itself.
    fn compile_node(&mut self, node: &FieldNode, inherited: &[String]) {
        let mut child_stack = inherited.to_vec();
        if node.category() == Category::Domain {
            child_stack.push(node.id.clone());
        }

        let mut children = Vec::with_capacity(node.children().len());
        for child in node.children() {
            children.push(child.id.clone());
            self.compile_node(child, &child_stack);
        }

        let params = match &node.body {
            NodeBody::Primitive(p) => primitive_params(p),
            NodeBody::Operation(op) => operation_params(op.blend, &op.params),
        };

        self.nodes.insert(
            node.id.clone(),
            IrNode {
                id: node.id.clone(),
                kind: node.kind(),
                params,
                domain_stack: inherited.to_vec(),
                children,
            },
        );
        self.evaluation_order.push(node.id.clone());
    }
}

fn primitive_params(p: &Primitive) -> HashMap<String, ParamValue> {
    let mut params = HashMap::new();
    params.insert("position".to_string(), p.position.into());
    params.insert("rotation".to_string(), p.rotation.into());
    params.insert("scale".to_string(), p.scale.into());

    match p.shape {
        Shape::Circle { radius } => {
            if let Some(r) = radius {
                params.insert("radius".to_string(), r.into());
            }
        }
        Shape::Box { size } => {
            if let Some(s) = size {
                params.insert("size".to_string(), s.into());
            }
        }
        Shape::Capsule { radius, length } => {
            if let Some(r) = radius {
                params.insert("radius".to_string(), r.into());
            }
            if let Some(l) = length {
                params.insert("length".to_string(), l.into());
            }
        }
    }
    params
}

fn operation_params(blend: f32, p: &OpParams) -> HashMap<String, ParamValue> {
    let mut params = HashMap::new();
    params.insert("blend".to_string(), blend.into());

    let mut put = |name: &str, value: Option<ParamValue>| {
        if let Some(v) = value {
            params.insert(name.to_string(), v);
        }
    };
    put("opRadius", p.op_radius.map(Into::into));
    put("thickness", p.thickness.map(Into::into));
    put("period", p.period.map(Into::into));
    put("axis", p.axis.map(Into::into));
    put("offset", p.offset.map(Into::into));
    put("strength", p.strength.map(Into::into));
    put("frequency", p.frequency.map(Into::into));
    put("amplitude", p.amplitude.map(Into::into));
    put("minLimit", p.min_limit.map(Into::into));
    put("maxLimit", p.max_limit.map(Into::into));

    params
}
