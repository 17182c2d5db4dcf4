//! Capture camera - pure data plus view/projection operations.
//!
//! The baker keeps six of these alive for the whole bake, one per principal
//! direction, and re-orients them per sample instead of reallocating.

use cgmath::{Deg, Matrix4, Point3, Vector3};

use super::settings::BakeSettings;

/// Capture camera state - pure data structure
#[derive(Debug, Clone, Copy)]
pub struct CaptureCameraData {
    /// Camera position in world space
    pub position: Point3<f32>,

    /// View direction (unit, world space)
    pub direction: Vector3<f32>,

    /// Up vector (unit, world space)
    pub up: Vector3<f32>,

    /// Left vector; kept explicit so query-buffer slot layout stays
    /// consistent across captures of the same cell
    pub left: Vector3<f32>,

    /// Vertical field of view, degrees
    pub fov_degrees: f32,

    /// Aspect ratio (width / height)
    pub aspect_ratio: f32,

    /// Near clipping plane distance
    pub near_plane: f32,

    /// Far clipping plane distance
    pub far_plane: f32,
}

/// Initialize a capture camera from bake settings
pub fn init_capture_camera(settings: &BakeSettings) -> CaptureCameraData {
    CaptureCameraData {
        position: Point3::new(0.0, 0.0, 0.0),
        direction: Vector3::new(1.0, 0.0, 0.0),
        up: Vector3::new(0.0, 0.0, 1.0),
        left: Vector3::new(1.0, 0.0, 0.0),
        fov_degrees: settings.camera_fov_degrees,
        // Square aspect: anything else opens gaps between adjacent side
        // captures of the same cell
        aspect_ratio: 1.0,
        near_plane: settings.camera_near,
        far_plane: settings.camera_far,
    }
}

/// Re-orient a camera for one capture
pub fn orient_camera(
    camera: &mut CaptureCameraData,
    position: Point3<f32>,
    direction: Vector3<f32>,
    up: Vector3<f32>,
    left: Vector3<f32>,
) {
    camera.position = position;
    camera.direction = direction;
    camera.up = up;
    camera.left = left;
}

/// Build view matrix from camera data
pub fn build_view_matrix(camera: &CaptureCameraData) -> Matrix4<f32> {
    Matrix4::look_to_rh(camera.position, camera.direction, camera.up)
}

/// Build projection matrix from camera data
pub fn build_projection_matrix(camera: &CaptureCameraData) -> Matrix4<f32> {
    cgmath::perspective(
        Deg(camera.fov_degrees),
        camera.aspect_ratio,
        camera.near_plane,
        camera.far_plane,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn test_view_matrix_looks_along_direction() {
        let settings = BakeSettings::default();
        let mut camera = init_capture_camera(&settings);
        orient_camera(
            &mut camera,
            Point3::new(5.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.0, 0.0, 0.0),
        );

        // A point one unit ahead of the camera lands on the -z eye axis
        let view = build_view_matrix(&camera);
        let eye = view * Vector4::new(6.0, 0.0, 0.0, 1.0);
        assert!(eye.x.abs() < 1e-5);
        assert!(eye.y.abs() < 1e-5);
        assert!((eye.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_projection_uses_settings() {
        let settings = BakeSettings {
            camera_fov_degrees: 90.0,
            ..Default::default()
        };
        let camera = init_capture_camera(&settings);
        let proj = build_projection_matrix(&camera);
        // With a 90 degree vertical FOV and aspect 1.0, focal length is 1
        assert!((proj.x.x - 1.0).abs() < 1e-5);
        assert!((proj.y.y - 1.0).abs() < 1e-5);
    }
}
