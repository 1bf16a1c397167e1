//! The six canonical clip planes, shared by the primitive pipelines.
//!
//! Visibility in clip space is `-w <= x, y, z <= w`. Rewriting the negative
//! bound as `-coord > w` lets one test cover both signs: multiply the
//! coordinate by `w_mult` (+1 for the positive planes, -1 for the negative
//! ones) and compare against w.

use lume_core::Vertex;
use lume_math::Vec4;

/// One clip plane: `position[axis] * w_mult <= w` is the visible side.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ClipPlane {
    axis: usize, // 0 = x, 1 = y, 2 = z
    w_mult: f32,
}

/// The planes in evaluation order: +x, +y, +z, -x, -y, -z.
pub(crate) const CLIP_PLANES: [ClipPlane; 6] = [
    ClipPlane { axis: 0, w_mult: 1.0 },
    ClipPlane { axis: 1, w_mult: 1.0 },
    ClipPlane { axis: 2, w_mult: 1.0 },
    ClipPlane { axis: 0, w_mult: -1.0 },
    ClipPlane { axis: 1, w_mult: -1.0 },
    ClipPlane { axis: 2, w_mult: -1.0 },
];

impl ClipPlane {
    /// True if the clip-space position lies outside this plane's half-space.
    pub(crate) fn is_outside(&self, position: Vec4) -> bool {
        position[self.axis] * self.w_mult > position.w
    }

    /// The vertex where the edge from `inside` to `outside` crosses the
    /// plane. All attributes are interpolated, not just the position.
    pub(crate) fn intersect_edge(&self, inside: &Vertex, outside: &Vertex) -> Vertex {
        let delta = outside.position - inside.position;
        let t = (inside.position[self.axis] - inside.position.w * self.w_mult)
            / (delta.w * self.w_mult - delta[self.axis]);
        Vertex::lerp(inside, outside, t)
    }
}
