//! Core types: math re-exports, Transform, Camera, per-frame matrices.

pub use glam::{EulerRot, Mat4, Quat, Vec3, Vec4, vec3};

pub mod camera;
pub mod error;
pub mod frame;
pub mod transform;

pub use error::{CoreError, CoreResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_is_identity_matrix() {
        let t = transform::Transform::identity();
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn floor_transform_is_pure_translation() {
        let t = transform::Transform::on_floor(transform::DEFAULT_FLOOR_HEIGHT);
        let m = t.matrix().to_cols_array();
        assert!((m[13] + 1.6).abs() < 1e-6);
        assert_eq!(m[12], 0.0);
        assert_eq!(m[14], 0.0);
        assert_eq!([m[0], m[5], m[10], m[15]], [1.0; 4]);
    }

    #[test]
    fn camera_pv_is_finite() {
        let mut cam = camera::Camera::room_default();
        cam.set_viewport(1280, 720).unwrap();
        let pv = cam.proj() * cam.view();
        let a = pv.to_cols_array();
        assert!(a.iter().all(|f| f.is_finite()));
    }
}
