//! Optional operation parameters
//!
//! Every field is optional; which ones matter depends on the operator kind.
//! Defaults are applied by the code generator, never stored here.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis selector for mirror and bend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// X axis
    #[default]
    X,
    /// Y axis
    Y,
}

impl Axis {
    /// Wire name (`"x"` or `"y"`)
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sparse parameter set of an operation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpParams {
    /// Dilate/erode radius
    pub op_radius: Option<f32>,
    /// Shell thickness
    pub thickness: Option<f32>,
    /// Repeat period
    pub period: Option<Vec2>,
    /// Mirror/bend axis
    pub axis: Option<Axis>,
    /// Mirror offset
    pub offset: Option<f32>,
    /// Bend/twist/displace strength
    pub strength: Option<f32>,
    /// Noise frequency
    pub frequency: Option<f32>,
    /// Noise amplitude
    pub amplitude: Option<f32>,
    /// Clamp lower bound
    pub min_limit: Option<f32>,
    /// Clamp upper bound
    pub max_limit: Option<f32>,
}

impl OpParams {
    /// Parameters the editor assigns to a freshly created operation
    pub fn editor_defaults() -> Self {
        OpParams {
            op_radius: Some(0.1),
            thickness: Some(0.05),
            period: Some(Vec2::ONE),
            axis: Some(Axis::X),
            offset: Some(0.0),
            strength: Some(0.5),
            frequency: Some(2.0),
            amplitude: Some(0.05),
            min_limit: Some(-1.0),
            max_limit: Some(1.0),
        }
    }

    /// True when no parameter is set
    pub fn is_empty(&self) -> bool {
        *self == OpParams::default()
    }
}
