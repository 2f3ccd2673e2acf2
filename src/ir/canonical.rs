//! Canonical IR serializer
//!
//! Byte-stable compact JSON. Node entries are keyed by id and parameters by
//! name through `BTreeMap`, so hash-map iteration order never leaks into the
//! output. `domainStack`, `children` and `evaluationOrder` are written in
//! stored order because that order carries meaning.

use super::{Ir, ParamValue};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CanonicalIr<'a> {
    root_id: &'a str,
    evaluation_order: &'a [String],
    nodes: BTreeMap<&'a str, CanonicalNode<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CanonicalNode<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    params: BTreeMap<&'a str, ParamValue>,
    domain_stack: &'a [String],
    children: &'a [String],
}

/// Serialize an IR to its canonical text, returning an error on failure.
pub fn try_serialize(ir: &Ir) -> Result<String, serde_json::Error> {
    let nodes = ir
        .nodes
        .iter()
        .map(|(id, node)| {
            let params = node.params.iter().map(|(k, v)| (k.as_str(), *v)).collect();
            (
                id.as_str(),
                CanonicalNode {
                    kind: node.kind.as_str(),
                    params,
                    domain_stack: &node.domain_stack,
                    children: &node.children,
                },
            )
        })
        .collect();

    serde_json::to_string(&CanonicalIr {
        root_id: &ir.root_id,
        evaluation_order: &ir.evaluation_order,
        nodes,
    })
}

/// Serialize an IR to its canonical text.
///
/// # Panics
///
/// Never in practice: every map key is a string, which is the only way
/// `serde_json` can fail on an in-memory value.
pub fn serialize(ir: &Ir) -> String {
    try_serialize(ir).expect("canonical IR encoding only uses string keys")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{compile, IrNode};
    use crate::types::{FieldNode, OpKind};
    use glam::Vec2;
    use std::collections::HashMap;

    #[test]
    fn test_empty_ir() {
        let text = serialize(&compile(None));
        assert_eq!(text, r#"{"rootId":"","evaluationOrder":[],"nodes":{}}"#);
    }

    #[test]
    fn test_single_circle_text() {
        let c = FieldNode::circle("c", Vec2::new(0.5, 0.0), 0.25);
        let text = serialize(&compile(Some(&c)));
        assert_eq!(
            text,
            concat!(
                r#"{"rootId":"c","evaluationOrder":["c"],"nodes":{"c":{"type":"circle","#,
                r#""params":{"position":[0.5,0.0],"radius":0.25,"rotation":0.0,"scale":[1.0,1.0]},"#,
                r#""domainStack":[],"children":[]}}}"#
            )
        );
    }

    #[test]
    fn test_map_order_insensitive() {
        let tree = FieldNode::op("u", OpKind::Union).with_children(vec![
            FieldNode::circle("z", Vec2::ZERO, 0.1),
            FieldNode::circle("a", Vec2::ONE, 0.2),
        ]);
        let ir = compile(Some(&tree));

        // Rebuild both maps with reversed insertion order
        let mut ids: Vec<&String> = ir.nodes.keys().collect();
        ids.sort();
        ids.reverse();
        let mut nodes = HashMap::new();
        for id in ids {
            let node = &ir.nodes[id];
            let mut keys: Vec<&String> = node.params.keys().collect();
            keys.sort();
            keys.reverse();
            let mut params = HashMap::with_capacity(keys.len());
            for k in keys {
                params.insert(k.clone(), node.params[k]);
            }
            nodes.insert(id.clone(), IrNode { params, ..node.clone() });
        }
        let permuted = crate::ir::Ir { nodes, ..ir.clone() };

        assert_eq!(serialize(&ir), serialize(&permuted));
    }

    #[test]
    fn test_children_order_is_kept() {
        let ab = FieldNode::op("u", OpKind::Union).with_children(vec![
            FieldNode::circle("a", Vec2::ZERO, 0.1),
            FieldNode::circle("b", Vec2::ZERO, 0.1),
        ]);
        let ba = FieldNode::op("u", OpKind::Union).with_children(vec![
            FieldNode::circle("b", Vec2::ZERO, 0.1),
            FieldNode::circle("a", Vec2::ZERO, 0.1),
        ]);
        let t1 = serialize(&compile(Some(&ab)));
        let t2 = serialize(&compile(Some(&ba)));
        assert_ne!(t1, t2);
        assert!(t1.contains(r#""children":["a","b"]"#));
        assert!(t2.contains(r#""children":["b","a"]"#));
    }
}
