//! GLSL transpiler: FieldNode tree → `map` statements
//!
//! Each node appends the statements it needs and returns the expression
//! holding its distance. Domain operators rebind the point before their
//! children are emitted; boolean folds run left to right over the children
//! in stored order; metric operators post-process the folded value once.
//!
//! Variable prefixes: `p_` point, `d_` primitive distance, `mod_` displace
//! result, `res_` subtract/metric result, `tmp_<id>_<i>` fold step,
//! `cut_<id>_<i>` cutter accumulator.

use super::defaults::*;
use super::{CodegenConfig, ShaderProgram, ShaderType, Statement};
use crate::types::{Axis, FieldNode, NodeBody, OpKind, Operation, Primitive, Shape};
use glam::Vec2;

/// Turn a node id into an identifier fragment: every character that is not
/// ASCII alphanumeric becomes `_`.
pub fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Internal transpiler state
pub(super) struct Transpiler<'c> {
    config: &'c CodegenConfig,
    statements: Vec<Statement>,
}

impl<'c> Transpiler<'c> {
    pub(super) fn new(config: &'c CodegenConfig) -> Self {
        Transpiler {
            config,
            statements: Vec::new(),
        }
    }

    pub(super) fn run(mut self, root: Option<&FieldNode>) -> ShaderProgram {
        let result = match root {
            Some(node) => self.emit_node(node, "p"),
            None => self.sentinel(),
        };
        ShaderProgram {
            statements: self.statements,
            result,
        }
    }

    fn num(&self, v: f32) -> String {
        format!("{:.*}", self.config.precision, v)
    }

    fn vec2(&self, v: Vec2) -> String {
        format!("vec2({}, {})", self.num(v.x), self.num(v.y))
    }

    fn sentinel(&self) -> String {
        format!("{:.1}", self.config.sentinel)
    }

    fn declare(&mut self, ty: ShaderType, name: String, expr: String) -> String {
        self.statements.push(Statement::Declare {
            ty,
            name: name.clone(),
            expr,
        });
        name
    }

    fn emit_node(&mut self, node: &FieldNode, point: &str) -> String {
        let id = sanitize_id(&node.id);
        match &node.body {
            NodeBody::Primitive(prim) => self.emit_primitive(&id, prim, point),
            NodeBody::Operation(op) => self.emit_operation(&id, op, point),
        }
    }

    // ============ Primitives ============

    fn emit_primitive(&mut self, id: &str, prim: &Primitive, point: &str) -> String {
        let p_var = format!("p_{id}");
        let local = format!("{} - {}", point, self.vec2(prim.position));
        self.declare(ShaderType::Vec2, p_var.clone(), local);

        if prim.rotation != 0.0 {
            let expr = format!("rotate({}, {})", p_var, self.num(prim.rotation));
            self.statements.push(Statement::Assign {
                name: p_var.clone(),
                expr,
            });
        }

        let dist = match prim.shape {
            Shape::Circle { radius } => {
                format!("sdCircle({}, {})", p_var, self.num(radius.unwrap_or(CIRCLE_RADIUS)))
            }
            Shape::Box { size } => {
                format!("sdBox({}, {})", p_var, self.vec2(size.unwrap_or(BOX_HALF_EXTENTS)))
            }
            Shape::Capsule { radius, length } => format!(
                "sdCapsule({}, {}, {})",
                p_var,
                self.num(length.unwrap_or(CAPSULE_LENGTH)),
                self.num(radius.unwrap_or(CAPSULE_RADIUS))
            ),
        };
        self.declare(ShaderType::Float, format!("d_{id}"), dist)
    }

    // ============ Operations ============

    fn emit_operation(&mut self, id: &str, op: &Operation, point: &str) -> String {
        if op.children.is_empty() {
            return self.sentinel();
        }

        let point = self.emit_domain(id, op, point);

        if op.kind == OpKind::Displace {
            return self.emit_displace(id, op, &point);
        }

        let child_vars: Vec<String> = op
            .children
            .iter()
            .map(|child| self.emit_node(child, &point))
            .collect();

        let folded = self.emit_fold(id, op, child_vars);
        self.emit_metric(id, op, folded)
    }

    /// Rebind the point for warp operators; returns the point variable the
    /// children should see.
    fn emit_domain(&mut self, id: &str, op: &Operation, point: &str) -> String {
        let params = &op.params;
        let is_x = |axis: Option<Axis>| axis.unwrap_or_default() == Axis::X;
        let expr = match op.kind {
            OpKind::Repeat => format!(
                "opRepeat({}, {})",
                point,
                self.vec2(params.period.unwrap_or(REPEAT_PERIOD))
            ),
            OpKind::Mirror => format!(
                "opMirror({}, {}, {})",
                point,
                self.num(params.offset.unwrap_or(MIRROR_OFFSET)),
                is_x(params.axis)
            ),
            OpKind::Bend => format!(
                "opBend({}, {}, {})",
                point,
                self.num(params.strength.unwrap_or(WARP_STRENGTH)),
                is_x(params.axis)
            ),
            OpKind::Twist => format!(
                "opTwist({}, {})",
                point,
                self.num(params.strength.unwrap_or(WARP_STRENGTH))
            ),
            _ => return point.to_string(),
        };
        self.declare(ShaderType::Vec2, format!("p_{id}"), expr)
    }

    fn emit_displace(&mut self, id: &str, op: &Operation, point: &str) -> String {
        if op.children.len() > 2 {
            log::warn!(
                "displace {} has {} children; only base and source are used",
                id,
                op.children.len()
            );
        }

        let base = self.emit_node(&op.children[0], point);
        let strength = self.num(op.params.strength.unwrap_or(DISPLACE_STRENGTH));
        let expr = match op.children.get(1) {
            Some(source) => {
                let source = self.emit_node(source, point);
                format!("{base} + {strength} * {source}")
            }
            None => {
                let wave = format!("{DISPLACE_WAVE:.1}");
                format!("{base} + {strength} * sin({point}.x * {wave}) * sin({point}.y * {wave})")
            }
        };
        self.declare(ShaderType::Float, format!("mod_{id}"), expr)
    }

    fn emit_fold(&mut self, id: &str, op: &Operation, vars: Vec<String>) -> String {
        let k = self.num(op.blend);
        let hard = op.blend == 0.0;
        match op.kind {
            OpKind::Subtract | OpKind::SmoothSubtract => {
                let smooth = !(op.kind == OpKind::Subtract && hard);
                self.fold_subtract(id, vars, smooth.then_some(k))
            }
            OpKind::Intersect | OpKind::SmoothIntersect => {
                if op.kind == OpKind::Intersect && hard {
                    self.fold_pairwise(id, vars, |a, b| format!("max({a}, {b})"))
                } else {
                    self.fold_pairwise(id, vars, |a, b| format!("opSmoothIntersection({a}, {b}, {k})"))
                }
            }
            OpKind::Xor => self.fold_pairwise(id, vars, |a, b| format!("opXor({a}, {b})")),
            OpKind::Group => self.fold_pairwise(id, vars, |a, b| format!("min({a}, {b})")),
            _ => {
                if op.kind == OpKind::SmoothUnion || !hard {
                    self.fold_pairwise(id, vars, |a, b| format!("opSmoothUnion({a}, {b}, {k})"))
                } else {
                    self.fold_pairwise(id, vars, |a, b| format!("min({a}, {b})"))
                }
            }
        }
    }

    /// Left fold binding each step to `tmp_<id>_<i>`
    fn fold_pairwise(
        &mut self,
        id: &str,
        vars: Vec<String>,
        combine: impl Fn(&str, &str) -> String,
    ) -> String {
        let mut vars = vars.into_iter();
        let Some(mut acc) = vars.next() else {
            return self.sentinel();
        };
        for (i, next) in vars.enumerate() {
            let expr = combine(&acc, &next);
            acc = self.declare(ShaderType::Float, format!("tmp_{}_{}", id, i + 1), expr);
        }
        acc
    }

    /// First child minus the union of the rest. `smooth_k` selects the
    /// smooth combinator.
    fn fold_subtract(&mut self, id: &str, vars: Vec<String>, smooth_k: Option<String>) -> String {
        let mut vars = vars.into_iter();
        let Some(base) = vars.next() else {
            return self.sentinel();
        };
        let Some(mut cutter) = vars.next() else {
            return base;
        };
        for (i, next) in vars.enumerate() {
            let expr = format!("min({cutter}, {next})");
            cutter = self.declare(ShaderType::Float, format!("cut_{}_{}", id, i + 2), expr);
        }
        let expr = match smooth_k {
            Some(k) => format!("opSmoothSubtraction({cutter}, {base}, {k})"),
            None => format!("max({base}, -{cutter})"),
        };
        self.declare(ShaderType::Float, format!("res_{id}"), expr)
    }

    fn emit_metric(&mut self, id: &str, op: &Operation, folded: String) -> String {
        let params = &op.params;
        let expr = match op.kind {
            OpKind::Dilate => format!(
                "{} - {}",
                folded,
                self.num(params.op_radius.unwrap_or(METRIC_RADIUS))
            ),
            OpKind::Erode => format!(
                "{} + {}",
                folded,
                self.num(params.op_radius.unwrap_or(METRIC_RADIUS))
            ),
            OpKind::Shell => format!(
                "abs({}) - {}",
                folded,
                self.num(params.thickness.unwrap_or(SHELL_THICKNESS))
            ),
            OpKind::Invert => format!("-{folded}"),
            OpKind::Clamp => format!(
                "clamp({}, {}, {})",
                folded,
                self.num(params.min_limit.unwrap_or(CLAMP_MIN)),
                self.num(params.max_limit.unwrap_or(CLAMP_MAX))
            ),
            _ => return folded,
        };
        self.declare(ShaderType::Float, format!("res_{id}"), expr)
    }
}
