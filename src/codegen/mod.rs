//! Shader code generation
//!
//! Walks a node tree and emits GLSL: the fixed [`PREAMBLE`] followed by a
//! generated `float map(vec2 p)` whose statements follow the tree's
//! evaluation order.
//!
//! # Usage
//!
//! ```rust
//! use precision_field::prelude::*;
//!
//! let shape = FieldNode::op("u", OpKind::SmoothUnion)
//!     .with_blend(0.2)
//!     .with_children(vec![
//!         FieldNode::circle("a", Vec2::new(-0.2, 0.0), 0.3),
//!         FieldNode::rect("b", Vec2::new(0.2, 0.0), Vec2::splat(0.2)),
//!     ]);
//!
//! let source = generate(Some(&shape));
//! assert!(source.contains("opSmoothUnion(d_a, d_b, 0.2000)"));
//!
//! // Structured access for statement-level inspection
//! let program = ShaderProgram::transpile(Some(&shape));
//! assert_eq!(program.result, "tmp_u_1");
//! ```
//!
//! Variable names derive from node ids, so two compiles of the same tree
//! produce identical text.

pub(crate) mod defaults;
mod preamble;
mod transpiler;

pub use defaults::SENTINEL_DISTANCE;
pub use preamble::{HELPER_NAMES, PREAMBLE};
pub use transpiler::sanitize_id;

use crate::types::FieldNode;
use std::fmt;

/// Code generation settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodegenConfig {
    /// Decimal places of every numeric literal
    pub precision: usize,
    /// Distance returned where there is no surface
    pub sentinel: f32,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        CodegenConfig {
            precision: 4,
            sentinel: SENTINEL_DISTANCE,
        }
    }
}

/// GLSL value type of a declared variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderType {
    /// `float`
    Float,
    /// `vec2`
    Vec2,
}

impl fmt::Display for ShaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderType::Float => "float",
            ShaderType::Vec2 => "vec2",
        })
    }
}

/// One line of the generated `map` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `ty name = expr;`
    Declare {
        /// Declared type
        ty: ShaderType,
        /// Fresh variable name
        name: String,
        /// Initializer
        expr: String,
    },
    /// `name = expr;`
    Assign {
        /// Existing variable
        name: String,
        /// New value
        expr: String,
    },
}

impl Statement {
    /// Variable bound or rebound by this statement
    pub fn name(&self) -> &str {
        match self {
            Statement::Declare { name, .. } | Statement::Assign { name, .. } => name,
        }
    }

    /// Right-hand side
    pub fn expr(&self) -> &str {
        match self {
            Statement::Declare { expr, .. } | Statement::Assign { expr, .. } => expr,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Declare { ty, name, expr } => write!(f, "    {ty} {name} = {expr};"),
            Statement::Assign { name, expr } => write!(f, "    {name} = {expr};"),
        }
    }
}

/// A generated `map` function before text assembly
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderProgram {
    /// Body statements in emission order
    pub statements: Vec<Statement>,
    /// Expression returned by `map` (a variable name or the sentinel literal)
    pub result: String,
}

impl ShaderProgram {
    /// Transpile a tree with the default configuration
    pub fn transpile(root: Option<&FieldNode>) -> Self {
        Self::transpile_with_config(root, &CodegenConfig::default())
    }

    /// Transpile a tree with an explicit configuration
    pub fn transpile_with_config(root: Option<&FieldNode>, config: &CodegenConfig) -> Self {
        let program = transpiler::Transpiler::new(config).run(root);
        log::debug!(
            "generated map(): {} statements, result {}",
            program.statements.len(),
            program.result
        );
        program
    }

    /// Find the statement that binds `name`
    pub fn statement(&self, name: &str) -> Option<&Statement> {
        self.statements.iter().find(|s| s.name() == name)
    }

    /// The `map` function alone
    pub fn map_function(&self) -> String {
        let mut out = String::from("float map(vec2 p) {\n");
        for stmt in &self.statements {
            out.push_str(&stmt.to_string());
            out.push('\n');
        }
        out.push_str("    return ");
        out.push_str(&self.result);
        out.push_str(";\n}");
        out
    }

    /// Preamble followed by the `map` function
    pub fn source(&self) -> String {
        format!("{}\n{}", PREAMBLE, self.map_function())
    }

    /// A complete fragment shader that draws the field over a world-space
    /// grid. `uDebugMode == 0` shades the shape, any other value shows
    /// animated distance bands.
    pub fn to_fragment_shader(&self) -> String {
        format!(
            r#"varying vec2 vWorldPos;
uniform vec2 uResolution;
uniform float uTime;
uniform int uDebugMode;

{}

float grid(vec2 uv, float scale) {{
    vec2 grid = abs(fract(uv * scale - 0.5) - 0.5) / scale;
    return 1.0 - smoothstep(0.0, 1.0 * length(fwidth(uv)), min(grid.x, grid.y));
}}

void main() {{
    vec2 p = vWorldPos;
    float d = map(p);

    vec3 baseColor = vec3(0.02, 0.03, 0.05);
    vec3 gridColor = vec3(0.1) * grid(p, 5.0) + vec3(0.05) * grid(p, 1.0);
    vec3 col = baseColor + gridColor;

    if (uDebugMode == 0) {{
        col = mix(col, vec3(0.1, 0.4, 0.8), (1.0 - smoothstep(0.0, 0.02, d)) * 0.5);
        col = mix(col, vec3(1.0), 1.0 - smoothstep(0.0, 1.5 * length(fwidth(p)), abs(d)));
    }} else {{
        col = vec3(0.5 + 0.5 * sin(d * 20.0 - uTime * 2.0));
        col *= exp(-abs(d) * 0.5);
        col = mix(col, vec3(1.0, 0.0, 0.0), 1.0 - smoothstep(0.0, 0.02, abs(d)));
    }}

    gl_FragColor = vec4(col, 1.0);
}}
"#,
            self.source()
        )
    }
}

/// Generate the full shader source for a tree (default configuration)
pub fn generate(root: Option<&FieldNode>) -> String {
    ShaderProgram::transpile(root).source()
}
