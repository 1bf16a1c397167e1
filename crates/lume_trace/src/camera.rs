//! Per-frame camera setup for ray generation.

use lume_math::{Mat4, Ray, Vec3, Vec4};

/// The image plane of one frame, precomputed so per-pixel work stays cheap.
///
/// The plane sits at unit distance along the camera's -z axis; its half
/// height is `tan(fov/2)` and its half width follows the aspect ratio.
/// Rays are built in model space: the camera-to-model transform is applied
/// once here, instead of transforming every triangle every frame.
pub(crate) struct ViewPlane {
    view_to_model: Mat4,
    /// Camera position in model space.
    origin: Vec3,
    /// Camera-space lower-left corner of the image plane.
    lower_left: Vec4,
    pixel_size: f32,
}

impl ViewPlane {
    pub(crate) fn new(model: Mat4, view: Mat4, fov_degrees: f32, width: u32, height: u32) -> Self {
        let view_to_model = (view * model).inverse();
        let aspect = width as f32 / height as f32;
        let bottom = -(fov_degrees.to_radians().abs() * 0.5).tan();
        Self {
            view_to_model,
            origin: (view_to_model * Vec4::new(0.0, 0.0, 0.0, 1.0)).truncate(),
            lower_left: Vec4::new(bottom * aspect, bottom, -1.0, 1.0),
            pixel_size: bottom.abs() * 2.0 / height as f32,
        }
    }

    /// The model-space ray through the center of pixel (x, y).
    ///
    /// Row 0 is the bottom of the image, matching the framebuffer layout.
    pub(crate) fn primary_ray(&self, x: u32, y: u32) -> Ray {
        let pixel = self.lower_left
            + Vec4::new(
                (x as f32 + 0.5) * self.pixel_size,
                (y as f32 + 0.5) * self.pixel_size,
                0.0,
                0.0,
            );
        let pixel = (self.view_to_model * pixel).truncate();
        Ray::new(self.origin, (pixel - self.origin).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_camera_rays_point_down_negative_z() {
        let plane = ViewPlane::new(Mat4::IDENTITY, Mat4::IDENTITY, 90.0, 4, 4);
        for y in 0..4 {
            for x in 0..4 {
                let ray = plane.primary_ray(x, y);
                assert_eq!(ray.origin, Vec3::ZERO);
                assert!(ray.direction.z < 0.0);
                assert!((ray.direction.length() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_rays_spread_symmetrically_around_the_axis() {
        let plane = ViewPlane::new(Mat4::IDENTITY, Mat4::IDENTITY, 60.0, 4, 4);
        let low_left = plane.primary_ray(0, 0);
        let high_right = plane.primary_ray(3, 3);
        assert!((low_left.direction.x + high_right.direction.x).abs() < 1e-5);
        assert!((low_left.direction.y + high_right.direction.y).abs() < 1e-5);
        assert!(low_left.direction.y < 0.0);
        assert!(high_right.direction.y > 0.0);
    }

    #[test]
    fn test_wide_buffer_widens_the_plane() {
        let wide = ViewPlane::new(Mat4::IDENTITY, Mat4::IDENTITY, 60.0, 8, 4);
        let square = ViewPlane::new(Mat4::IDENTITY, Mat4::IDENTITY, 60.0, 4, 4);
        // leftmost column of a 2:1 buffer looks further sideways
        let wide_left = wide.primary_ray(0, 2);
        let square_left = square.primary_ray(0, 2);
        assert!(wide_left.direction.x < square_left.direction.x);
    }

    #[test]
    fn test_view_transform_moves_the_origin() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y);
        let plane = ViewPlane::new(Mat4::IDENTITY, view, 60.0, 4, 4);
        let ray = plane.primary_ray(2, 2);
        assert!((ray.origin - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-4);
        assert!(ray.direction.z < 0.0);
    }
}
