//! Fallbacks for unset parameters, shared by the transpiler and the CPU
//! evaluator. These are independent of the editor's creation defaults in
//! `types::constructors`; changing one set must not change the other.

use glam::Vec2;

/// Distance meaning "no surface here"
pub const SENTINEL_DISTANCE: f32 = 100.0;

/// Circle radius
pub const CIRCLE_RADIUS: f32 = 0.5;
/// Box half-extents
pub const BOX_HALF_EXTENTS: Vec2 = Vec2::splat(0.5);
/// Capsule segment length
pub const CAPSULE_LENGTH: f32 = 0.5;
/// Capsule radius
pub const CAPSULE_RADIUS: f32 = 0.1;
/// Repeat period
pub const REPEAT_PERIOD: Vec2 = Vec2::ONE;
/// Mirror offset
pub const MIRROR_OFFSET: f32 = 0.0;
/// Bend and twist strength
pub const WARP_STRENGTH: f32 = 1.0;
/// Displace strength
pub const DISPLACE_STRENGTH: f32 = 0.5;
/// Procedural displacement frequency
pub const DISPLACE_WAVE: f32 = 4.0;
/// Dilate and erode radius
pub const METRIC_RADIUS: f32 = 0.1;
/// Shell thickness
pub const SHELL_THICKNESS: f32 = 0.05;
/// Clamp lower bound
pub const CLAMP_MIN: f32 = -1.0;
/// Clamp upper bound
pub const CLAMP_MAX: f32 = 1.0;
