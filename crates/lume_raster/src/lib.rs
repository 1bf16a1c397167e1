//! lume software rasterizer.
//!
//! A CPU reimplementation of the fixed-function GPU pipeline. Vertices go in,
//! depth-tested packed pixels come out, and every stage in between is explicit:
//!
//! 1. vertex transform (clip space)
//! 2. primitive assembly (points, lines or triangles)
//! 3. frustum clipping against the six `±x, ±y, ±z <= w` planes
//! 4. perspective divide (plus recording `1/w` for perspective-correct
//!    attribute interpolation)
//! 5. viewport transform to screen space
//! 6. backface culling (triangles)
//! 7. scan conversion to fragments
//! 8. fragment processing hook
//! 9. depth-tested framebuffer write
//!
//! The three primitive kinds implement the [`Pipeline`] trait, which supplies
//! the fixed stage ordering as a provided `render` method.

mod clip;
mod fragment;
mod line;
mod pipeline;
mod point;
mod scan;
mod triangle;

pub use fragment::Fragment;
pub use line::{Line, LineMode, LineRenderer};
pub use pipeline::Pipeline;
pub use point::{Point, PointRenderer};
pub use scan::{line_pixels, triangle_pixels};
pub use triangle::{Triangle, TriangleRenderer};

/// Re-export the shared data model for convenience
pub use lume_core::{Framebuffer, Vertex};
