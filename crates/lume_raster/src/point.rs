//! Point primitives and their pipeline.

use crate::clip::CLIP_PLANES;
use crate::fragment::Fragment;
use crate::pipeline::{round_pixel, viewport_matrix, Pipeline, W_EPSILON};
use lume_core::Vertex;

/// A point flowing through the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    pub v1: Vertex,
    pub rejected: bool,
}

impl Point {
    pub fn new(v1: Vertex) -> Self {
        Self {
            v1,
            rejected: false,
        }
    }
}

/// The point pipeline: one pixel per vertex.
pub struct PointRenderer {
    primitives: Vec<Point>,
}

impl PointRenderer {
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn primitives(&self) -> &[Point] {
        &self.primitives
    }
}

impl Default for PointRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline for PointRenderer {
    fn assemble(&mut self, vertices: &[Vertex]) {
        self.primitives.clear();
        self.primitives.reserve(vertices.len());
        for &vertex in vertices {
            self.primitives.push(Point::new(vertex));
        }
    }

    fn clip(&mut self) {
        for plane in CLIP_PLANES {
            for point in &mut self.primitives {
                if !point.rejected && plane.is_outside(point.v1.position) {
                    point.rejected = true;
                }
            }
        }
    }

    fn perspective_divide(&mut self) {
        for point in &mut self.primitives {
            if point.rejected {
                continue;
            }
            let w = point.v1.position.w;
            if w.abs() < W_EPSILON {
                point.rejected = true;
                continue;
            }
            point.v1.divide_attributes(w);
        }
    }

    fn to_screen_space(&mut self, width: u32, height: u32) {
        let to_window = viewport_matrix(width, height);
        for point in &mut self.primitives {
            point.v1.position = to_window * point.v1.position;
        }
    }

    fn rasterize(&mut self, fragments: &mut Vec<Fragment>) {
        for point in &self.primitives {
            if point.rejected {
                continue;
            }
            // a point interpolates nothing; dividing by its own 1/w undoes
            // the perspective division of the attributes outright
            let correction = point.v1.hyp_interp;
            fragments.push(Fragment {
                position: round_pixel(point.v1.position),
                depth: point.v1.position.z / correction,
                color: point.v1.color / correction,
                normal: point.v1.normal / correction,
                uv: point.v1.uv / correction,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lume_core::{color, unpack_rgba32, Framebuffer};
    use lume_math::{IVec2, Mat4, Vec2, Vec4};

    fn vertex(x: f32, y: f32, z: f32, w: f32, color: Vec4) -> Vertex {
        Vertex::new(Vec4::new(x, y, z, w), Vec4::ZERO, color, Vec2::ZERO)
    }

    #[test]
    fn test_clip_rejects_outside_points() {
        let vertices = vec![
            vertex(0.5, 0.0, 0.0, 1.0, color::RED),
            vertex(0.0, -1.5, 0.0, 1.0, color::RED),
        ];
        let mut renderer = PointRenderer::new();
        renderer.assemble(&vertices);
        renderer.clip();

        assert!(!renderer.primitives()[0].rejected);
        assert!(renderer.primitives()[1].rejected);
    }

    #[test]
    fn test_attributes_survive_perspective_divide() {
        // w = 2 halves every attribute in NDC; the fragment must carry the
        // original values anyway
        let vertices = vec![vertex(0.0, 0.0, 0.5, 2.0, color::GREEN)];
        let mut renderer = PointRenderer::new();
        renderer.assemble(&vertices);
        renderer.clip();
        renderer.perspective_divide();
        renderer.to_screen_space(8, 8);
        let mut fragments = Vec::new();
        renderer.rasterize(&mut fragments);

        assert_eq!(fragments.len(), 1);
        let fragment = &fragments[0];
        assert_eq!(fragment.position, IVec2::new(4, 4));
        assert!((fragment.color - color::GREEN).abs().max_element() < 1e-6);
        assert!((fragment.depth - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_render_paints_single_pixel() {
        let vertices = vec![vertex(0.0, 0.0, 0.0, 1.0, color::BLUE)];
        let mut color_buffer = Framebuffer::new(8, 8, 0u32);
        let mut depth_buffer = Framebuffer::new(8, 8, f32::INFINITY);
        let mut renderer = PointRenderer::new();
        renderer.render(
            &vertices,
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            &mut color_buffer,
            &mut depth_buffer,
        );

        let painted = unpack_rgba32(color_buffer.value_at(4, 4));
        assert!((painted - color::BLUE).abs().max_element() < 1.0 / 255.0 + 1e-6);
        assert_eq!(
            color_buffer.data().iter().filter(|&&px| px != 0).count(),
            1
        );
    }
}
