//! lume core - shared data model for the lume CPU renderers.
//!
//! This crate provides the types both rendering cores agree on:
//!
//! - **`Framebuffer<T>`**: an owned, fixed-size 2D grid of pixel values
//! - **`Color` + packing**: 32-bit RGBA packing in GPU-upload byte order
//! - **`Vertex`**: position/normal/color/uv plus the perspective-correction
//!   weight used by the rasterizer
//! - **`mesh`**: triangle-list validation and procedural test geometry
//!
//! The renderers themselves live in `lume_raster` (pipeline rasterizer) and
//! `lume_trace` (recursive ray tracer).

pub mod color;
pub mod framebuffer;
pub mod mesh;
pub mod vertex;

// Re-export commonly used types
pub use color::{pack_rgba32, unpack_rgba32, Color};
pub use framebuffer::Framebuffer;
pub use mesh::{cube, validate_triangle_list, GeometryError};
pub use vertex::Vertex;
