//! The recursive ray tracer.

use crate::camera::ViewPlane;
use crate::config::TracerConfig;
use crate::intersect::{nearest_hit, TriangleHit};
use lume_core::{pack_rgba32, Color, Framebuffer, Vertex};
use lume_math::{Interval, Mat4, Ray, Vec3, Vec4};
use rayon::prelude::*;

/// Hard bound on recursion depth. Requested depths are clamped to this at
/// every `trace_ray` entry; it bounds stack usage, it is not a quality knob.
pub const MAX_TRACE_DEPTH: u32 = 5;

/// Recursive Whitted-style ray tracer over non-indexed triangle streams.
#[derive(Debug, Clone, Default)]
pub struct RayTracer {
    pub config: TracerConfig,
}

impl RayTracer {
    pub fn new(config: TracerConfig) -> Self {
        Self { config }
    }

    /// Trace one frame into `color_buffer`.
    ///
    /// `vertices` is the model-space triangle stream; `view` positions the
    /// camera; `fov_degrees` is the vertical field of view. `depth` is the
    /// requested recursion depth, clamped to [`MAX_TRACE_DEPTH`].
    pub fn render(
        &self,
        vertices: &[Vertex],
        model: Mat4,
        view: Mat4,
        fov_degrees: f32,
        depth: u32,
        color_buffer: &mut Framebuffer<u32>,
    ) {
        let width = color_buffer.width();
        let height = color_buffer.height();
        let plane = ViewPlane::new(model, view, fov_degrees, width, height);

        for y in 0..height {
            for x in 0..width {
                let ray = plane.primary_ray(x, y);
                let color = self.trace_ray(&ray, depth, vertices);
                color_buffer.paint_at(x, y, pack_rgba32(color));
            }
        }
        log::debug!(
            "traced {}x{} pixels against {} triangles",
            width,
            height,
            vertices.len() / 3
        );
    }

    /// Like [`render`](RayTracer::render), with scanlines fanned out across
    /// threads. Pixels never share mutable state, so the output is
    /// identical to the serial path.
    pub fn render_parallel(
        &self,
        vertices: &[Vertex],
        model: Mat4,
        view: Mat4,
        fov_degrees: f32,
        depth: u32,
        color_buffer: &mut Framebuffer<u32>,
    ) {
        let width = color_buffer.width();
        let height = color_buffer.height();
        let plane = ViewPlane::new(model, view, fov_degrees, width, height);

        let rows: Vec<Vec<u32>> = (0..height)
            .into_par_iter()
            .map(|y| {
                (0..width)
                    .map(|x| {
                        let ray = plane.primary_ray(x, y);
                        pack_rgba32(self.trace_ray(&ray, depth, vertices))
                    })
                    .collect()
            })
            .collect();

        for (y, row) in rows.iter().enumerate() {
            for (x, &packed) in row.iter().enumerate() {
                color_buffer.paint_at(x as u32, y as u32, packed);
            }
        }
    }

    /// Trace a single ray and return its unclamped color.
    ///
    /// Clamping to displayable range happens only when the color is packed
    /// into the framebuffer.
    pub fn trace_ray(&self, ray: &Ray, depth: u32, vertices: &[Vertex]) -> Color {
        let depth = depth.min(MAX_TRACE_DEPTH);

        let Some(hit) = nearest_hit(ray, vertices, Interval::new(0.0, f32::INFINITY)) else {
            return self.config.background;
        };
        let (normal, base) = interpolate_surface(&hit, vertices);
        let position = ray.at(hit.t);

        let lighting = self.config.lighting;
        let mut color = base * lighting.ambient;

        // diffuse and specular only reach surfaces the light can see
        if !self.occluded(position, normal, vertices) {
            let to_light = (lighting.light_position - position).normalize_or_zero();
            let n_dot_l = to_light.dot(normal).max(0.0);
            color += base * (lighting.diffuse * n_dot_l)
                + Vec4::splat(lighting.specular * n_dot_l.powf(lighting.shininess));
        }

        if depth > 1 {
            let reflected = Ray::new(
                // nudge the origin against the incoming direction so the
                // reflection cannot re-hit its own surface
                position - ray.direction * self.config.bias,
                reflect(ray.direction, normal),
            );
            color += self.trace_ray(&reflected, depth - 1, vertices) * self.config.reflectivity;
        }

        color
    }

    /// Shadow query: does any triangle block the light from `position`?
    fn occluded(&self, position: Vec3, normal: Vec3, vertices: &[Vertex]) -> bool {
        let origin = position + normal * self.config.bias;
        let to_light = self.config.lighting.light_position - origin;
        let distance = to_light.length();
        if distance <= self.config.bias {
            return false; // sitting on the light itself
        }
        let shadow_ray = Ray::new(origin, to_light / distance);
        nearest_hit(&shadow_ray, vertices, Interval::new(0.0, distance)).is_some()
    }
}

/// Barycentric surface attributes at a hit: unit normal and base color.
fn interpolate_surface(hit: &TriangleHit, vertices: &[Vertex]) -> (Vec3, Color) {
    let v1 = &vertices[hit.index];
    let v2 = &vertices[hit.index + 1];
    let v3 = &vertices[hit.index + 2];
    let bary = hit.barycentric;

    let normal = (v1.normal * bary.x + v2.normal * bary.y + v3.normal * bary.z)
        .truncate()
        .normalize_or_zero();
    let color = v1.color * bary.x + v2.color * bary.y + v3.color * bary.z;
    (normal, color)
}

/// Mirror reflection of `incoming` about `normal`.
fn reflect(incoming: Vec3, normal: Vec3) -> Vec3 {
    incoming - 2.0 * incoming.dot(normal) * normal
}
