//! Triangle-list validation and procedural test geometry.
//!
//! The renderers consume flat, non-indexed triangle lists (three vertices
//! per triangle). Model loading is an external concern; this module only
//! validates shape and provides the canonical cube used by examples and
//! integration tests.

use crate::color::Color;
use crate::vertex::Vertex;
use lume_math::{Vec2, Vec3, Vec4};
use thiserror::Error;

/// Errors for malformed triangle-list input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("triangle list holds {0} vertices, which is not a multiple of 3")]
    IncompleteTriangle(usize),
}

/// Check that a vertex slice forms whole triangles.
///
/// The renderers assume consecutive triples; a trailing partial triangle is
/// a caller bug worth surfacing before any rendering happens.
pub fn validate_triangle_list(vertices: &[Vertex]) -> Result<(), GeometryError> {
    if vertices.len() % 3 != 0 {
        return Err(GeometryError::IncompleteTriangle(vertices.len()));
    }
    Ok(())
}

// Cube corner layout:
//
//    v7----- v6
//   /|      /|
//  v3------v2|
//  | |     | |
//  | |v4---|-|v5
//  |/      |/
//  v0------v1
const FACES: [[usize; 6]; 6] = [
    [0, 1, 2, 0, 2, 3], // front  (+z)
    [1, 5, 6, 1, 6, 2], // right  (+x)
    [5, 4, 7, 5, 7, 6], // back   (-z)
    [4, 0, 3, 4, 3, 7], // left   (-x)
    [3, 2, 6, 3, 6, 7], // top    (+y)
    [1, 0, 4, 1, 4, 5], // bottom (-y)
];

/// Build an axis-aligned cube centered on the origin as a 36-vertex
/// triangle list, with one color per corner, face normals and per-face uvs.
pub fn cube(side: f32) -> Vec<Vertex> {
    let h = side * 0.5;
    let positions = [
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, h),
        Vec3::new(h, h, h),
        Vec3::new(-h, h, h),
        Vec3::new(-h, -h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, h, -h),
    ];
    let colors: [Color; 8] = [
        Vec4::new(0.9, 0.1, 0.1, 1.0),
        Vec4::new(0.1, 0.9, 0.1, 1.0),
        Vec4::new(0.1, 0.1, 0.9, 1.0),
        Vec4::new(0.9, 0.9, 0.1, 1.0),
        Vec4::new(0.9, 0.1, 0.9, 1.0),
        Vec4::new(0.1, 0.9, 0.9, 1.0),
        Vec4::new(0.1, 0.1, 0.1, 1.0),
        Vec4::new(0.9, 0.9, 0.9, 1.0),
    ];
    let normals = [
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
    ];
    let uv_corners = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];
    // both face triangles share corner 0: (0,1,2) then (0,2,3)
    let face_uvs = [0usize, 1, 2, 0, 2, 3];

    let mut vertices = Vec::with_capacity(36);
    for (face, corner_indices) in FACES.iter().enumerate() {
        for (corner, &pi) in corner_indices.iter().enumerate() {
            vertices.push(Vertex::new(
                positions[pi].extend(1.0),
                normals[face].extend(0.0),
                colors[pi],
                uv_corners[face_uvs[corner]],
            ));
        }
    }
    vertices
}
