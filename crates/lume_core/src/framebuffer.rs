//! Owned 2D pixel grids for render output.
//!
//! A render pass works against two of these in parallel: a color buffer
//! (`Framebuffer<u32>`, packed RGBA) and a depth buffer (`Framebuffer<f32>`,
//! cleared to `f32::INFINITY`). The buffers are caller-owned and passed to
//! the renderers by mutable reference; the renderers never resize them.

use bytemuck::Pod;
use std::path::Path;

/// A fixed-size, row-major grid of pixel values.
///
/// Out-of-range access is a programmer error and panics; renderers are
/// responsible for discarding fragments that fall outside the buffer before
/// painting. Row 0 is the bottom of the image (normalized device y = -1
/// maps to it), matching the texture orientation the buffer is uploaded in.
pub struct Framebuffer<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

impl<T: Copy> Framebuffer<T> {
    /// Create a buffer of `width * height` cells, every cell set to `fill`.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(width: u32, height: u32, fill: T) -> Self {
        assert!(width > 0 && height > 0, "framebuffer dimensions must be non-zero");
        Self {
            width,
            height,
            data: vec![fill; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Set every cell to `value`.
    pub fn clear(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Write `value` at (x, y).
    ///
    /// # Panics
    /// Panics if the position is outside the buffer.
    pub fn paint_at(&mut self, x: u32, y: u32, value: T) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} framebuffer",
            self.width,
            self.height
        );
        self.data[(x + y * self.width) as usize] = value;
    }

    /// Read the value at (x, y).
    ///
    /// # Panics
    /// Panics if the position is outside the buffer.
    pub fn value_at(&self, x: u32, y: u32) -> T {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} framebuffer",
            self.width,
            self.height
        );
        self.data[(x + y * self.width) as usize]
    }

    /// The flat cell storage, row-major from the bottom row up.
    pub fn data(&self) -> &[T] {
        &self.data
    }
}

impl<T: Copy + Pod> Framebuffer<T> {
    /// Reinterpret the cell storage as raw bytes, e.g. for GPU texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

impl Framebuffer<u32> {
    /// Write a packed-RGBA color buffer to a PNG file.
    ///
    /// The buffer stores its bottom row first, PNG its top row, so rows are
    /// flipped on the way out.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                bytes.extend_from_slice(&self.value_at(x, y).to_le_bytes());
            }
        }
        image::save_buffer(
            path.as_ref(),
            &bytes,
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )?;
        log::debug!(
            "wrote {}x{} framebuffer to {}",
            self.width,
            self.height,
            path.as_ref().display()
        );
        Ok(())
    }
}
