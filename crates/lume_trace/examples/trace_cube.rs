//! Ray-traces the demo cube and saves a PNG.

use anyhow::Result;
use lume_core::{cube, validate_triangle_list, Framebuffer};
use lume_math::{Mat4, Vec3};
use lume_trace::{RayTracer, TracerConfig, MAX_TRACE_DEPTH};

fn main() -> Result<()> {
    env_logger::init();

    let vertices = cube(1.0);
    validate_triangle_list(&vertices)?;

    let (width, height) = (512, 512);
    let mut color_buffer = Framebuffer::new(width, height, 0u32);

    let view = Mat4::look_at_rh(Vec3::new(1.2, 1.0, 2.0), Vec3::ZERO, Vec3::Y);
    let tracer = RayTracer::new(TracerConfig::default());

    let start = std::time::Instant::now();
    tracer.render_parallel(
        &vertices,
        Mat4::IDENTITY,
        view,
        45.0,
        MAX_TRACE_DEPTH,
        &mut color_buffer,
    );
    println!("traced {}x{} in {:?}", width, height, start.elapsed());

    color_buffer.write_png("trace_cube.png")?;
    println!("saved to trace_cube.png");
    Ok(())
}
