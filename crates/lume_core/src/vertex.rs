//! The vertex type shared by both rendering cores.

use crate::color::Color;
use lume_math::{Vec2, Vec4};

/// A single vertex of the input triangle stream.
///
/// `position` is homogeneous; `normal` carries w = 0 so transforms ignore
/// translation. `hyp_interp` starts at 1.0 and, once the rasterizer performs
/// the perspective divide, holds `1/w` of the original clip-space vertex.
/// Interpolating it alongside the other attributes is what lets the
/// rasterizer undo the division and recover perspective-correct values:
/// `attr = sum(bary_i * attr_i / w_i) / sum(bary_i / w_i)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec4,
    pub normal: Vec4,
    pub color: Color,
    pub uv: Vec2,
    pub hyp_interp: f32,
}

impl Vertex {
    pub fn new(position: Vec4, normal: Vec4, color: Color, uv: Vec2) -> Self {
        Self {
            position,
            normal,
            color,
            uv,
            hyp_interp: 1.0,
        }
    }

    /// Linearly interpolate every attribute between two vertices.
    ///
    /// Clipping uses this to synthesize the vertex where an edge crosses a
    /// clip plane; interpolating the full attribute set (not just position)
    /// keeps color, normal and uv consistent on the new edge point.
    pub fn lerp(a: &Vertex, b: &Vertex, t: f32) -> Vertex {
        Vertex {
            position: a.position + (b.position - a.position) * t,
            normal: a.normal + (b.normal - a.normal) * t,
            color: a.color + (b.color - a.color) * t,
            uv: a.uv + (b.uv - a.uv) * t,
            hyp_interp: a.hyp_interp + (b.hyp_interp - a.hyp_interp) * t,
        }
    }

    /// Divide the position and every attribute by `w`.
    ///
    /// Called with the clip-space w during the perspective divide; since
    /// `hyp_interp` starts at 1.0 it ends up holding `1/w`.
    pub fn divide_attributes(&mut self, w: f32) {
        self.position /= w;
        self.normal /= w;
        self.color /= w;
        self.uv /= w;
        self.hyp_interp /= w;
    }
}
