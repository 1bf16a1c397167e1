// Re-export glam for convenience
pub use glam::*;

// lume math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec4_reexport() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.w, 4.0);
    }

    #[test]
    fn test_mat4_vec4_transform() {
        let m = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let p = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(p, Vec4::new(1.0, 0.0, 0.0, 1.0));
    }
}
