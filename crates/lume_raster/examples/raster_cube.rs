//! Renders the demo cube with the software rasterizer and saves a PNG.
//!
//! Stands in for the windowing layer a real driver would provide: it owns
//! the buffers and matrices and hands them to the pipeline.

use anyhow::Result;
use lume_core::{cube, validate_triangle_list, Framebuffer};
use lume_math::{Mat4, Vec3};
use lume_raster::{LineMode, LineRenderer, Pipeline, TriangleRenderer};

fn main() -> Result<()> {
    env_logger::init();

    let vertices = cube(1.0);
    validate_triangle_list(&vertices)?;

    let (width, height) = (512, 512);
    let mut color_buffer = Framebuffer::new(width, height, 0u32);
    let mut depth_buffer = Framebuffer::new(width, height, f32::INFINITY);

    let projection = Mat4::perspective_rh_gl(
        45f32.to_radians(),
        width as f32 / height as f32,
        0.1,
        100.0,
    );
    let view = Mat4::look_at_rh(Vec3::new(1.2, 1.0, 2.0), Vec3::ZERO, Vec3::Y);
    let model = Mat4::from_rotation_y(0.6);

    let start = std::time::Instant::now();
    let mut solid = TriangleRenderer::new();
    solid.render(
        &vertices,
        model,
        projection * view,
        &mut color_buffer,
        &mut depth_buffer,
    );
    let mut wireframe = LineRenderer::new(LineMode::Wireframe);
    wireframe.render(
        &vertices,
        model,
        projection * view,
        &mut color_buffer,
        &mut depth_buffer,
    );
    println!("rasterized {}x{} in {:?}", width, height, start.elapsed());

    color_buffer.write_png("raster_cube.png")?;
    println!("saved to raster_cube.png");
    Ok(())
}
