//! Line primitives and their pipeline.

use crate::clip::CLIP_PLANES;
use crate::fragment::Fragment;
use crate::pipeline::{round_pixel, viewport_matrix, Pipeline, W_EPSILON};
use crate::scan::line_pixels;
use lume_core::Vertex;

/// How the vertex stream turns into lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    /// Consecutive vertex pairs, one line each.
    Segments,
    /// Consecutive vertex triples, three closing edges each - draws the
    /// outline of a triangle stream.
    Wireframe,
}

/// A line flowing through the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    pub v1: Vertex,
    pub v2: Vertex,
    pub rejected: bool,
}

impl Line {
    pub fn new(v1: Vertex, v2: Vertex) -> Self {
        Self {
            v1,
            v2,
            rejected: false,
        }
    }
}

/// The line pipeline.
pub struct LineRenderer {
    pub mode: LineMode,
    primitives: Vec<Line>,
}

impl LineRenderer {
    pub fn new(mode: LineMode) -> Self {
        Self {
            mode,
            primitives: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn primitives(&self) -> &[Line] {
        &self.primitives
    }
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self::new(LineMode::Wireframe)
    }
}

impl Pipeline for LineRenderer {
    fn assemble(&mut self, vertices: &[Vertex]) {
        self.primitives.clear();
        match self.mode {
            LineMode::Segments => {
                self.primitives.reserve(vertices.len() / 2);
                for pair in vertices.chunks_exact(2) {
                    self.primitives.push(Line::new(pair[0], pair[1]));
                }
            }
            LineMode::Wireframe => {
                self.primitives.reserve(vertices.len());
                for triple in vertices.chunks_exact(3) {
                    self.primitives.push(Line::new(triple[0], triple[1]));
                    self.primitives.push(Line::new(triple[1], triple[2]));
                    self.primitives.push(Line::new(triple[2], triple[0]));
                }
            }
        }
    }

    fn clip(&mut self) {
        for plane in CLIP_PLANES {
            for line in &mut self.primitives {
                if line.rejected {
                    continue;
                }
                let out1 = plane.is_outside(line.v1.position);
                let out2 = plane.is_outside(line.v2.position);
                match (out1, out2) {
                    (true, true) => line.rejected = true,
                    (true, false) => line.v1 = plane.intersect_edge(&line.v2, &line.v1),
                    (false, true) => line.v2 = plane.intersect_edge(&line.v1, &line.v2),
                    (false, false) => {}
                }
            }
        }
    }

    fn perspective_divide(&mut self) {
        for line in &mut self.primitives {
            if line.rejected {
                continue;
            }
            let w1 = line.v1.position.w;
            let w2 = line.v2.position.w;
            if w1.abs() < W_EPSILON || w2.abs() < W_EPSILON {
                line.rejected = true;
                continue;
            }
            line.v1.divide_attributes(w1);
            line.v2.divide_attributes(w2);
        }
    }

    fn to_screen_space(&mut self, width: u32, height: u32) {
        let to_window = viewport_matrix(width, height);
        for line in &mut self.primitives {
            line.v1.position = to_window * line.v1.position;
            line.v2.position = to_window * line.v2.position;
        }
    }

    fn rasterize(&mut self, fragments: &mut Vec<Fragment>) {
        for line in &self.primitives {
            if line.rejected {
                continue;
            }
            let p1 = round_pixel(line.v1.position);
            let p2 = round_pixel(line.v2.position);
            let length = (p2 - p1).as_vec2().length();

            for pixel in line_pixels(p1, p2) {
                // screen-space interpolation factor along the segment
                let t = if length > 0.0 {
                    (pixel - p1).as_vec2().length() / length
                } else {
                    0.0
                };
                // hyperbolic correction factor at this pixel
                let correction = t * line.v2.hyp_interp + (1.0 - t) * line.v1.hyp_interp;

                fragments.push(Fragment {
                    position: pixel,
                    depth: (t * line.v2.position.z + (1.0 - t) * line.v1.position.z)
                        / correction,
                    color: (line.v2.color * t + line.v1.color * (1.0 - t)) / correction,
                    normal: (line.v2.normal * t + line.v1.normal * (1.0 - t)) / correction,
                    uv: (line.v2.uv * t + line.v1.uv * (1.0 - t)) / correction,
                });
            }
        }
    }
}
