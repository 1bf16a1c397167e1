//! Fragments: screen-space pixel candidates.

use lume_core::Color;
use lume_math::{IVec2, Vec2, Vec4};

/// One pixel candidate produced by scan conversion.
///
/// Attributes are already perspective-corrected when the fragment is built;
/// the write stage only has to depth-test and pack the color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    /// Integer pixel position; may be outside the framebuffer when clipping
    /// is disabled, in which case the write stage drops it.
    pub position: IVec2,
    /// Depth for the nearest-wins test (smaller is closer).
    pub depth: f32,
    pub color: Color,
    pub normal: Vec4,
    pub uv: Vec2,
}
