//! The fixed-order pipeline driver shared by all primitive kinds.

use crate::fragment::Fragment;
use lume_core::{pack_rgba32, Framebuffer, Vertex};
use lume_math::{IVec2, Mat4, Vec3, Vec4};

/// Below this |w| the perspective divide would explode; such primitives are
/// rejected rather than allowed to spray NaNs into the framebuffer.
pub(crate) const W_EPSILON: f32 = 1e-6;

/// A rendering pipeline for one primitive kind.
///
/// Implementations supply the per-primitive stages; the provided [`render`]
/// method fixes their order. Stage methods mutate the primitive list built
/// by `assemble`, so a primitive split by one clip plane is re-clipped by
/// the following planes, exactly like the single-primitive case.
///
/// [`render`]: Pipeline::render
pub trait Pipeline {
    /// Group the transformed vertex stream into primitives.
    fn assemble(&mut self, vertices: &[Vertex]);

    /// Clip primitives against the six canonical planes, one plane at a
    /// time across all surviving primitives.
    fn clip(&mut self);

    /// Divide positions and attributes by w, recording `1/w` per vertex.
    fn perspective_divide(&mut self);

    /// Map normalized device coordinates to pixel coordinates.
    fn to_screen_space(&mut self, width: u32, height: u32);

    /// Reject primitives facing away from the camera. Only triangles have
    /// a facing, so the default keeps everything.
    fn cull_backfaces(&mut self) {}

    /// Scan-convert surviving primitives into fragments.
    fn rasterize(&mut self, fragments: &mut Vec<Fragment>);

    /// Per-fragment hook, the fragment-shader seat. Identity by default.
    fn process_fragments(&mut self, _fragments: &mut [Fragment]) {}

    /// Run the whole pipeline: transform `vertices` by
    /// `view_projection * model` and draw into the two buffers.
    ///
    /// The caller's vertex data is copied, never mutated. Both buffers must
    /// share dimensions; the depth buffer should be cleared to
    /// `f32::INFINITY` (or 1.0) before the first primitive of a frame.
    fn render(
        &mut self,
        vertices: &[Vertex],
        model: Mat4,
        view_projection: Mat4,
        color_buffer: &mut Framebuffer<u32>,
        depth_buffer: &mut Framebuffer<f32>,
    ) {
        // vertex shader equivalent: bring a private copy into clip space
        let mvp = view_projection * model;
        let mut transformed = vertices.to_vec();
        for vertex in &mut transformed {
            vertex.position = mvp * vertex.position;
        }

        self.assemble(&transformed);
        self.clip();
        self.perspective_divide();
        self.to_screen_space(color_buffer.width(), color_buffer.height());
        self.cull_backfaces();

        let mut fragments = Vec::new();
        self.rasterize(&mut fragments);
        self.process_fragments(&mut fragments);
        write_fragments(&fragments, color_buffer, depth_buffer);

        log::trace!(
            "pipeline pass: {} vertices in, {} fragments out",
            vertices.len(),
            fragments.len()
        );
    }
}

/// NDC [-1,1] to pixel coordinates: scale(W/2, H/2, 1) * translate(1, 1, 0).
pub(crate) fn viewport_matrix(width: u32, height: u32) -> Mat4 {
    Mat4::from_scale(Vec3::new(width as f32 / 2.0, height as f32 / 2.0, 1.0))
        * Mat4::from_translation(Vec3::new(1.0, 1.0, 0.0))
}

/// Round a screen-space position to its pixel.
pub(crate) fn round_pixel(position: Vec4) -> IVec2 {
    IVec2::new(
        (position.x + 0.5).floor() as i32,
        (position.y + 0.5).floor() as i32,
    )
}

/// Depth-tested fragment write: nearer (smaller depth) fragments win,
/// ties keep the incumbent. Fragments outside the buffer are silently
/// dropped - with clipping disabled they are expected, not an error.
pub(crate) fn write_fragments(
    fragments: &[Fragment],
    color_buffer: &mut Framebuffer<u32>,
    depth_buffer: &mut Framebuffer<f32>,
) {
    assert_eq!(color_buffer.width(), depth_buffer.width());
    assert_eq!(color_buffer.height(), depth_buffer.height());
    let width = color_buffer.width() as i32;
    let height = color_buffer.height() as i32;

    for fragment in fragments {
        let position = fragment.position;
        if position.x < 0 || position.x >= width || position.y < 0 || position.y >= height {
            continue;
        }
        let (x, y) = (position.x as u32, position.y as u32);
        if fragment.depth < depth_buffer.value_at(x, y) {
            color_buffer.paint_at(x, y, pack_rgba32(fragment.color));
            depth_buffer.paint_at(x, y, fragment.depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LineMode, LineRenderer, TriangleRenderer};
    use lume_core::{color, unpack_rgba32};
    use lume_math::Vec2;

    fn colored_vertex(x: f32, y: f32, z: f32, color: Vec4) -> Vertex {
        Vertex::new(
            Vec4::new(x, y, z, 1.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            color,
            Vec2::ZERO,
        )
    }

    fn buffers(size: u32) -> (Framebuffer<u32>, Framebuffer<f32>) {
        (
            Framebuffer::new(size, size, 0u32),
            Framebuffer::new(size, size, f32::INFINITY),
        )
    }

    /// counter-clockwise test triangle spanning NDC (0, .5), (-.5, -.5), (.5, -.5)
    fn rgb_triangle(z: f32) -> Vec<Vertex> {
        vec![
            colored_vertex(0.0, 0.5, z, color::RED),
            colored_vertex(-0.5, -0.5, z, color::GREEN),
            colored_vertex(0.5, -0.5, z, color::BLUE),
        ]
    }

    #[test]
    fn test_viewport_matrix_corners() {
        let m = viewport_matrix(8, 8);
        assert_eq!(m * Vec4::new(-1.0, -1.0, 0.0, 1.0), Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(m * Vec4::new(1.0, 1.0, 0.0, 1.0), Vec4::new(8.0, 8.0, 0.0, 1.0));
        assert_eq!(m * Vec4::new(0.0, 0.0, 0.5, 1.0), Vec4::new(4.0, 4.0, 0.5, 1.0));
    }

    #[test]
    fn test_round_pixel() {
        assert_eq!(round_pixel(Vec4::new(3.4, 3.6, 0.0, 1.0)), IVec2::new(3, 4));
        assert_eq!(round_pixel(Vec4::new(3.5, -0.4, 0.0, 1.0)), IVec2::new(4, 0));
    }

    #[test]
    fn test_end_to_end_rgb_triangle() {
        let (mut color_buffer, mut depth_buffer) = buffers(8);
        let mut renderer = TriangleRenderer::new();
        renderer.render(
            &rgb_triangle(0.0),
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            &mut color_buffer,
            &mut depth_buffer,
        );

        // the centroid pixel blends all three vertex colors
        let center = unpack_rgba32(color_buffer.value_at(4, 3));
        assert!(center.x > 0.15 && center.x < 0.45, "red {}", center.x);
        assert!(center.y > 0.25 && center.y < 0.5, "green {}", center.y);
        assert!(center.z > 0.25 && center.z < 0.5, "blue {}", center.z);
        assert!((center.x + center.y + center.z - 1.0).abs() < 0.05);

        // pixels clearly outside stay the clear value
        for (x, y) in [(0, 0), (7, 0), (0, 7), (7, 7)] {
            assert_eq!(color_buffer.value_at(x, y), 0);
            assert_eq!(depth_buffer.value_at(x, y), f32::INFINITY);
        }
    }

    #[test]
    fn test_depth_test_is_draw_order_independent() {
        let near = {
            let mut vs = rgb_triangle(0.2);
            for v in &mut vs {
                v.color = color::RED;
            }
            vs
        };
        let far = {
            let mut vs = rgb_triangle(0.8);
            for v in &mut vs {
                v.color = color::GREEN;
            }
            vs
        };

        let mut renderer = TriangleRenderer::new();
        for order in [[&near, &far], [&far, &near]] {
            let (mut color_buffer, mut depth_buffer) = buffers(8);
            for vertices in order {
                renderer.render(
                    vertices,
                    Mat4::IDENTITY,
                    Mat4::IDENTITY,
                    &mut color_buffer,
                    &mut depth_buffer,
                );
            }
            let center = unpack_rgba32(color_buffer.value_at(4, 3));
            assert!(center.x > 0.9, "near triangle must win: {center}");
            assert!(center.y < 0.1, "far triangle must lose: {center}");
            assert!((depth_buffer.value_at(4, 3) - 0.2).abs() < 1e-5);
        }
    }

    #[test]
    fn test_out_of_bounds_fragments_dropped_without_clipping() {
        // half the triangle hangs off the left edge of the buffer
        let vertices = vec![
            colored_vertex(-1.5, 0.5, 0.0, color::WHITE),
            colored_vertex(-2.0, -0.5, 0.0, color::WHITE),
            colored_vertex(0.5, -0.5, 0.0, color::WHITE),
        ];
        let (mut color_buffer, mut depth_buffer) = buffers(8);
        let mut renderer = TriangleRenderer::new();
        renderer.clip_to_frustum = false;
        renderer.render(
            &vertices,
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            &mut color_buffer,
            &mut depth_buffer,
        );
        // no panic, and something still landed inside the buffer
        assert!(color_buffer.data().iter().any(|&px| px != 0));
    }

    #[test]
    fn test_wireframe_and_fill_share_depth_space() {
        // wireframe drawn after the fill at the same depth must not be
        // wholly rejected by the depth test of its own triangle
        let (mut color_buffer, mut depth_buffer) = buffers(16);
        let mut fill = TriangleRenderer::new();
        fill.render(
            &rgb_triangle(0.0),
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            &mut color_buffer,
            &mut depth_buffer,
        );

        let before = color_buffer.data().to_vec();
        let mut wire = LineRenderer::new(LineMode::Wireframe);
        let white = {
            let mut vs = rgb_triangle(-0.001);
            for v in &mut vs {
                v.color = color::WHITE;
            }
            vs
        };
        wire.render(
            &white,
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            &mut color_buffer,
            &mut depth_buffer,
        );
        assert_ne!(before, color_buffer.data());
    }

    #[test]
    fn test_empty_vertex_stream_is_a_no_op() {
        let (mut color_buffer, mut depth_buffer) = buffers(4);
        let mut renderer = TriangleRenderer::new();
        renderer.render(
            &[],
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            &mut color_buffer,
            &mut depth_buffer,
        );
        assert!(color_buffer.data().iter().all(|&px| px == 0));
    }
}
