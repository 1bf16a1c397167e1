//! Integer scan conversion: line walking and triangle edge filling.
//!
//! Both converters work purely on integer pixel coordinates with
//! error-accumulator DDAs, so the pixel set they produce is exact and
//! deterministic - no per-pixel floating point thresholds.

use lume_math::IVec2;

/// All pixels on the segment from `a` to `b`, endpoints included.
///
/// Walks from the lower to the upper endpoint along the dominant axis,
/// stepping the minor axis whenever the accumulated numerator crosses the
/// denominator (Bresenham-style).
pub fn line_pixels(a: IVec2, b: IVec2) -> Vec<IVec2> {
    let delta = b - a;
    if delta.y.abs() >= delta.x.abs() {
        // y-major (ties walk by y)
        let (lo, hi) = if a.y <= b.y { (a, b) } else { (b, a) };
        let dy = hi.y - lo.y;
        let dx = (hi.x - lo.x).abs();
        let step_x = if hi.x >= lo.x { 1 } else { -1 };
        let mut pixels = Vec::with_capacity((dy + 1) as usize);
        let mut x = lo.x;
        let mut err = dy / 2;
        for y in lo.y..=hi.y {
            pixels.push(IVec2::new(x, y));
            err += dx;
            if dy > 0 && err >= dy {
                x += step_x;
                err -= dy;
            }
        }
        pixels
    } else {
        // x-major
        let (lo, hi) = if a.x <= b.x { (a, b) } else { (b, a) };
        let dx = hi.x - lo.x;
        let dy = (hi.y - lo.y).abs();
        let step_y = if hi.y >= lo.y { 1 } else { -1 };
        let mut pixels = Vec::with_capacity((dx + 1) as usize);
        let mut y = lo.y;
        let mut err = dx / 2;
        for x in lo.x..=hi.x {
            pixels.push(IVec2::new(x, y));
            err += dy;
            if err >= dx {
                y += step_y;
                err -= dx;
            }
        }
        pixels
    }
}

/// Walks one y-monotonic edge a scanline at a time, tracking the x the edge
/// passes through on the current row. Shallow edges advance x by more than
/// one per row; the accumulator keeps the division exact.
struct EdgeWalker {
    x: i32,
    rows_left: i32,
    dx: i32, // abs
    dy: i32,
    step_x: i32,
    num: i32,
}

impl EdgeWalker {
    /// Edge from `lo` up to `hi`; requires `hi.y > lo.y`.
    fn new(lo: IVec2, hi: IVec2) -> Self {
        debug_assert!(hi.y > lo.y);
        let dy = hi.y - lo.y;
        Self {
            x: lo.x,
            rows_left: dy,
            dx: (hi.x - lo.x).abs(),
            dy,
            step_x: if hi.x >= lo.x { 1 } else { -1 },
            num: dy / 2,
        }
    }

    fn exhausted(&self) -> bool {
        self.rows_left == 0
    }

    fn step(&mut self) {
        self.num += self.dx;
        self.x += self.step_x * (self.num / self.dy);
        self.num %= self.dy;
        self.rows_left -= 1;
    }
}

/// A left or right triangle boundary: either the single long edge, or the
/// two shorter edges joined at the middle vertex. Zero-height sub-edges are
/// dropped at construction so flat-top and flat-bottom triangles need no
/// special casing later.
struct EdgeChain {
    lower: Option<EdgeWalker>,
    upper: Option<EdgeWalker>,
}

impl EdgeChain {
    fn long(lo: IVec2, hi: IVec2) -> Self {
        Self {
            lower: (hi.y > lo.y).then(|| EdgeWalker::new(lo, hi)),
            upper: None,
        }
    }

    fn split(lo: IVec2, mid: IVec2, hi: IVec2) -> Self {
        Self {
            lower: (mid.y > lo.y).then(|| EdgeWalker::new(lo, mid)),
            upper: (hi.y > mid.y).then(|| EdgeWalker::new(mid, hi)),
        }
    }

    /// Boundary x on the current scanline.
    fn x(&self) -> i32 {
        match (&self.lower, &self.upper) {
            (Some(lower), _) if !lower.exhausted() => lower.x,
            (_, Some(upper)) => upper.x,
            (Some(lower), None) => lower.x,
            (None, None) => unreachable!("empty edge chain is never queried"),
        }
    }

    /// Advance to the next scanline.
    fn advance(&mut self) {
        if let Some(lower) = &mut self.lower {
            if !lower.exhausted() {
                lower.step();
                return;
            }
        }
        if let Some(upper) = &mut self.upper {
            if !upper.exhausted() {
                upper.step();
            }
        }
    }
}

/// The filled pixel set of a screen-space triangle.
///
/// Vertices are classified into lower, middle and upper by (y, then x); the
/// side the middle vertex falls on (sign of the 2D cross product against the
/// long edge) decides which boundary is the split one. Each scanline fills
/// `left.x ..= right.x - 1`; rows where the boundaries meet or cross are
/// skipped, which makes zero-area triangles produce zero pixels instead of
/// misbehaving.
pub fn triangle_pixels(a: IVec2, b: IVec2, c: IVec2) -> Vec<IVec2> {
    let mut sorted = [a, b, c];
    sorted.sort_by_key(|p| (p.y, p.x));
    let [lo, mid, hi] = sorted;

    if lo.y == hi.y {
        return Vec::new(); // all three on one row
    }

    let long = hi - lo;
    let to_mid = mid - lo;
    let cross = long.x * to_mid.y - long.y * to_mid.x;
    if cross == 0 {
        return Vec::new(); // collinear
    }

    // negative cross: middle vertex is right of the long edge (y up)
    let (mut left, mut right) = if cross < 0 {
        (EdgeChain::long(lo, hi), EdgeChain::split(lo, mid, hi))
    } else {
        (EdgeChain::split(lo, mid, hi), EdgeChain::long(lo, hi))
    };

    let mut pixels = Vec::new();
    for y in lo.y..hi.y {
        for x in left.x()..right.x() {
            pixels.push(IVec2::new(x, y));
        }
        left.advance();
        right.advance();
    }
    pixels
}
