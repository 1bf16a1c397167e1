//! Triangle primitives and their pipeline.
//!
//! Winding convention, used consistently by backface culling and by the
//! triangle emitted when clipping cuts one corner off: counter-clockwise in
//! y-up screen space faces the camera; a negative z cross product of the
//! screen-space edge vectors rejects the triangle.

use crate::clip::{ClipPlane, CLIP_PLANES};
use crate::fragment::Fragment;
use crate::pipeline::{round_pixel, viewport_matrix, Pipeline, W_EPSILON};
use crate::scan::triangle_pixels;
use lume_core::Vertex;
use lume_math::{Mat2, Vec2, Vec3};

/// A 2x2 system whose determinant is below this is treated as a zero-area
/// triangle and produces no fragments.
const DEGENERATE_EPSILON: f32 = 1e-6;

/// A triangle flowing through the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub v1: Vertex,
    pub v2: Vertex,
    pub v3: Vertex,
    pub rejected: bool,
    // cached barycentric system, built on first query in screen space and
    // never shared across primitives
    inverse: Option<Mat2>,
}

impl Triangle {
    pub fn new(v1: Vertex, v2: Vertex, v3: Vertex) -> Self {
        Self {
            v1,
            v2,
            v3,
            rejected: false,
            inverse: None,
        }
    }

    /// The cached 2x2 inverse used for barycentric queries, computed from
    /// two screen-space edge vectors on first use. `None` means the
    /// triangle is degenerate.
    fn barycentric_inverse(&mut self) -> Option<Mat2> {
        if self.inverse.is_none() {
            let columns = Mat2::from_cols(
                Vec2::new(
                    self.v1.position.x - self.v3.position.x,
                    self.v1.position.y - self.v3.position.y,
                ),
                Vec2::new(
                    self.v2.position.x - self.v3.position.x,
                    self.v2.position.y - self.v3.position.y,
                ),
            );
            if columns.determinant().abs() < DEGENERATE_EPSILON {
                return None;
            }
            self.inverse = Some(columns.inverse());
        }
        self.inverse
    }

    /// Barycentric coordinates of a screen-space point, (v1, v2, v3) order.
    fn barycentric_at(&self, inverse: Mat2, at: Vec2) -> Vec3 {
        let b = inverse * (at - Vec2::new(self.v3.position.x, self.v3.position.y));
        Vec3::new(b.x, b.y, 1.0 - b.x - b.y)
    }
}

/// Clip one triangle against one plane.
///
/// Mutates the triangle in place; a one-corner cut also returns the extra
/// triangle that completes the resulting quadrilateral, wound to match the
/// original so backface culling treats both alike.
fn clip_triangle(triangle: &mut Triangle, plane: ClipPlane) -> Option<Triangle> {
    let mut corners = [triangle.v1, triangle.v2, triangle.v3];
    let outside = [
        plane.is_outside(corners[0].position),
        plane.is_outside(corners[1].position),
        plane.is_outside(corners[2].position),
    ];

    match outside.iter().filter(|&&out| out).count() {
        0 => None,
        3 => {
            triangle.rejected = true;
            None
        }
        2 => {
            // one corner survives; pull both others onto the plane
            let keep = outside.iter().position(|&out| !out).unwrap();
            let inside = corners[keep];
            for (i, corner) in corners.iter_mut().enumerate() {
                if i != keep {
                    *corner = plane.intersect_edge(&inside, corner);
                }
            }
            [triangle.v1, triangle.v2, triangle.v3] = corners;
            None
        }
        _ => {
            // one corner cut off: the visible region is a quadrilateral,
            // covered by the repaired triangle plus one new one
            let cut = outside.iter().position(|&out| out).unwrap();
            let kept: Vec<usize> = (0..3).filter(|&i| i != cut).collect();
            let first_crossing = plane.intersect_edge(&corners[kept[0]], &corners[cut]);
            let second_crossing = plane.intersect_edge(&corners[kept[1]], &corners[cut]);
            let second_inside = corners[kept[1]];

            corners[cut] = first_crossing;
            [triangle.v1, triangle.v2, triangle.v3] = corners;

            let extra = match cut {
                0 => Triangle::new(second_inside, second_crossing, first_crossing),
                1 => Triangle::new(second_inside, first_crossing, second_crossing),
                _ => Triangle::new(first_crossing, second_inside, second_crossing),
            };
            Some(extra)
        }
    }
}

/// The triangle pipeline.
///
/// Holds its primitive buffer across frames to avoid reallocating every
/// render call. `clip_to_frustum` can be disabled for debugging; the write
/// stage then discards whatever falls outside the framebuffer.
pub struct TriangleRenderer {
    pub clip_to_frustum: bool,
    primitives: Vec<Triangle>,
}

impl TriangleRenderer {
    pub fn new() -> Self {
        Self {
            clip_to_frustum: true,
            primitives: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn primitives(&self) -> &[Triangle] {
        &self.primitives
    }
}

impl Default for TriangleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline for TriangleRenderer {
    fn assemble(&mut self, vertices: &[Vertex]) {
        self.primitives.clear();
        self.primitives.reserve(vertices.len() / 3);
        for triple in vertices.chunks_exact(3) {
            self.primitives
                .push(Triangle::new(triple[0], triple[1], triple[2]));
        }
    }

    fn clip(&mut self) {
        if !self.clip_to_frustum {
            return;
        }
        for plane in CLIP_PLANES {
            // triangles split by this plane are appended and picked up by
            // the remaining planes; this plane already leaves them inside
            let count = self.primitives.len();
            for i in 0..count {
                if self.primitives[i].rejected {
                    continue;
                }
                if let Some(extra) = clip_triangle(&mut self.primitives[i], plane) {
                    self.primitives.push(extra);
                }
            }
        }
    }

    fn perspective_divide(&mut self) {
        for triangle in &mut self.primitives {
            if triangle.rejected {
                continue;
            }
            let ws = [
                triangle.v1.position.w,
                triangle.v2.position.w,
                triangle.v3.position.w,
            ];
            if ws.iter().any(|w| w.abs() < W_EPSILON) {
                triangle.rejected = true;
                continue;
            }
            triangle.v1.divide_attributes(ws[0]);
            triangle.v2.divide_attributes(ws[1]);
            triangle.v3.divide_attributes(ws[2]);
        }
    }

    fn to_screen_space(&mut self, width: u32, height: u32) {
        let to_window = viewport_matrix(width, height);
        for triangle in &mut self.primitives {
            triangle.v1.position = to_window * triangle.v1.position;
            triangle.v2.position = to_window * triangle.v2.position;
            triangle.v3.position = to_window * triangle.v3.position;
        }
    }

    fn cull_backfaces(&mut self) {
        for triangle in &mut self.primitives {
            if triangle.rejected {
                continue;
            }
            let e1 = triangle.v2.position - triangle.v1.position;
            let e2 = triangle.v3.position - triangle.v1.position;
            let nz = e1.x * e2.y - e1.y * e2.x;
            if nz < 0.0 {
                triangle.rejected = true;
            }
        }
    }

    fn rasterize(&mut self, fragments: &mut Vec<Fragment>) {
        for triangle in &mut self.primitives {
            if triangle.rejected {
                continue;
            }
            let Some(inverse) = triangle.barycentric_inverse() else {
                continue; // zero area
            };

            let p1 = round_pixel(triangle.v1.position);
            let p2 = round_pixel(triangle.v2.position);
            let p3 = round_pixel(triangle.v3.position);

            for pixel in triangle_pixels(p1, p2, p3) {
                let raw = triangle.barycentric_at(inverse, pixel.as_vec2());
                // undo the perspective divide on the interpolated weights
                let correction = raw.x * triangle.v1.hyp_interp
                    + raw.y * triangle.v2.hyp_interp
                    + raw.z * triangle.v3.hyp_interp;
                let bary = raw / correction;

                fragments.push(Fragment {
                    position: pixel,
                    depth: bary.x * triangle.v1.position.z
                        + bary.y * triangle.v2.position.z
                        + bary.z * triangle.v3.position.z,
                    color: triangle.v1.color * bary.x
                        + triangle.v2.color * bary.y
                        + triangle.v3.color * bary.z,
                    normal: triangle.v1.normal * bary.x
                        + triangle.v2.normal * bary.y
                        + triangle.v3.normal * bary.z,
                    uv: triangle.v1.uv * bary.x
                        + triangle.v2.uv * bary.y
                        + triangle.v3.uv * bary.z,
                });
            }
        }
    }
}
