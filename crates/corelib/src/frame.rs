//! Matrices recomputed once per frame.

use crate::Mat4;

/// Full transform chain for one draw. Composition is always
/// `projection * (view * model)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameMatrices {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub model_view: Mat4,
    pub mvp: Mat4,
}

impl FrameMatrices {
    pub fn compose(model: Mat4, view: Mat4, projection: Mat4) -> Self {
        let model_view = view * model;
        let mvp = projection * model_view;
        Self {
            model,
            view,
            projection,
            model_view,
            mvp,
        }
    }
}

impl Default for FrameMatrices {
    fn default() -> Self {
        Self::compose(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Vec3, Vec4, camera::Camera};

    #[test]
    fn mvp_is_projection_times_view_times_model() {
        let mut cam = Camera::room_default();
        cam.set_viewport(1920, 1080).unwrap();
        let model = Mat4::from_translation(Vec3::new(0.0, -1.6, 0.0));
        let m = FrameMatrices::compose(model, cam.view(), cam.proj());

        assert_eq!(m.model_view, cam.view() * model);
        let expected = (cam.proj() * (cam.view() * model)).to_cols_array();
        for (a, b) in m.mvp.to_cols_array().iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn order_matters_for_non_commuting_inputs() {
        let model = Mat4::from_translation(Vec3::X);
        let view = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let m = FrameMatrices::compose(model, view, Mat4::IDENTITY);
        let p = m.mvp * Vec4::new(0.0, 0.0, 0.0, 1.0);
        // translate first, then rotate +X onto -Z
        assert!((p.z + 1.0).abs() < 1e-6);
        assert!(p.x.abs() < 1e-6);
    }
}
