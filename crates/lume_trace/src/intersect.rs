//! Brute-force ray/triangle intersection queries.

use lume_core::Vertex;
use lume_math::{Interval, Ray, Vec3};

/// Geometric tolerance: rays this close to parallel, or barycentric
/// coordinates this far negative, count as misses rather than risking a
/// division blow-up.
const TOLERANCE: f32 = 1e-6;

/// A ray hit on one triangle of a vertex stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Index of the triangle's first vertex in the stream.
    pub index: usize,
    /// Ray parameter at the hit point.
    pub t: f32,
    /// Barycentric weights of (v1, v2, v3) at the hit.
    pub barycentric: Vec3,
}

/// Möller-Trumbore ray/triangle intersection.
///
/// Returns the ray parameter and barycentric weights, or `None` when the ray
/// parallels the triangle plane, the plane hit falls outside the triangle,
/// or `t` falls outside `ray_t`.
pub fn ray_triangle_intersection(
    ray: &Ray,
    v1: &Vertex,
    v2: &Vertex,
    v3: &Vertex,
    ray_t: Interval,
) -> Option<(f32, Vec3)> {
    let p1 = v1.position.truncate();
    let e1 = v2.position.truncate() - p1;
    let e2 = v3.position.truncate() - p1;

    let q = ray.direction.cross(e2);
    let a = e1.dot(q);
    if a.abs() < TOLERANCE {
        return None; // parallel to the triangle plane
    }

    let f = 1.0 / a;
    let s = ray.origin - p1;
    let u = f * s.dot(q);
    if u < -TOLERANCE {
        return None;
    }

    let r = s.cross(e1);
    let v = f * ray.direction.dot(r);
    if v < -TOLERANCE || u + v > 1.0 {
        return None;
    }

    let t = f * e2.dot(r);
    if !ray_t.contains(t) {
        return None;
    }

    Some((t, Vec3::new(1.0 - u - v, u, v)))
}

/// Nearest hit across every triangle of the stream (consecutive triples).
///
/// "No intersection" is `None`, never a sentinel distance. The search
/// narrows the valid interval as hits come in, the brute-force equivalent
/// of a closest-so-far scan.
pub fn nearest_hit(ray: &Ray, vertices: &[Vertex], ray_t: Interval) -> Option<TriangleHit> {
    let mut nearest = None;
    let mut closest = ray_t.max;

    for (i, triple) in vertices.chunks_exact(3).enumerate() {
        let window = Interval::new(ray_t.min, closest);
        if let Some((t, barycentric)) =
            ray_triangle_intersection(ray, &triple[0], &triple[1], &triple[2], window)
        {
            closest = t;
            nearest = Some(TriangleHit {
                index: i * 3,
                t,
                barycentric,
            });
        }
    }
    nearest
}
