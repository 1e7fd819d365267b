use crate::error::{CoreError, CoreResult};
use crate::{Mat4, Vec3, Vec4};

/// Near clip plane distance used by the room view.
pub const Z_NEAR: f32 = 0.01;
/// Far clip plane distance used by the room view.
pub const Z_FAR: f32 = 10.0;
/// Horizontal half-extent of the near plane in units of `z_near` (tan 60°).
pub const HALF_EXTENT: f32 = 1.732;

/// Fixed perspective camera (right-handed) with an off-axis capable frustum.
///
/// The projection is stored instead of recomputed every frame: it only
/// changes when the viewport does.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub z_near: f32,
    pub z_far: f32,
    pub half_extent: f32,
    projection: Mat4,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, up: Vec3, z_near: f32, z_far: f32, half_extent: f32) -> Self {
        Self {
            eye,
            target,
            up,
            z_near,
            z_far,
            half_extent,
            projection: Mat4::IDENTITY,
        }
    }

    /// Camera standing at the origin looking down -Z, as the room scene expects.
    pub fn room_default() -> Self {
        Self::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, Z_NEAR, Z_FAR, HALF_EXTENT)
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// NOTE: This returns OpenGL-style projection (z ∈ [-1,1]).
    /// Renderer multiplies by OPENGL_TO_WGPU to match z ∈ [0,1].
    #[inline]
    pub fn proj(&self) -> Mat4 {
        self.projection
    }

    /// Recompute the projection for a new viewport size.
    ///
    /// On error the previous projection is left untouched.
    pub fn set_viewport(&mut self, width: u32, height: u32) -> CoreResult<()> {
        self.projection = self.projection_for(width, height)?;
        Ok(())
    }

    /// Projection for the given viewport without mutating the camera.
    pub fn projection_for(&self, width: u32, height: u32) -> CoreResult<Mat4> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidViewport { width, height });
        }
        let ratio = width as f32 / height as f32;
        let left = -self.z_near * self.half_extent;
        let right = self.z_near * self.half_extent;
        let top = right / ratio;
        let bottom = left / ratio;
        frustum(left, right, bottom, top, self.z_near, self.z_far)
    }
}

/// OpenGL-convention perspective frustum (column-major, clip z ∈ [-1,1]).
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> CoreResult<Mat4> {
    if left == right {
        return Err(CoreError::InvalidFrustum(format!("left == right ({left})")));
    }
    if bottom == top {
        return Err(CoreError::InvalidFrustum(format!("bottom == top ({bottom})")));
    }
    if !(near > 0.0) {
        return Err(CoreError::InvalidFrustum(format!("near must be positive, got {near}")));
    }
    if !(far > near) {
        return Err(CoreError::InvalidFrustum(format!(
            "far ({far}) must be greater than near ({near})"
        )));
    }

    let r_width = 1.0 / (right - left);
    let r_height = 1.0 / (top - bottom);
    let r_depth = 1.0 / (near - far);

    let x = 2.0 * near * r_width;
    let y = 2.0 * near * r_height;
    let a = (right + left) * r_width;
    let b = (top + bottom) * r_height;
    let c = (far + near) * r_depth;
    let d = 2.0 * far * near * r_depth;

    Ok(Mat4::from_cols(
        Vec4::new(x, 0.0, 0.0, 0.0),
        Vec4::new(0.0, y, 0.0, 0.0),
        Vec4::new(a, b, c, -1.0),
        Vec4::new(0.0, 0.0, d, 0.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip_to_ndc(m: Mat4, p: Vec3) -> Vec3 {
        let c = m * p.extend(1.0);
        c.truncate() / c.w
    }

    #[test]
    fn projection_is_deterministic() {
        let mut a = Camera::room_default();
        let mut b = Camera::room_default();
        a.set_viewport(1280, 720).unwrap();
        b.set_viewport(1280, 720).unwrap();
        assert_eq!(a.proj().to_cols_array(), b.proj().to_cols_array());
    }

    #[test]
    fn near_and_far_planes_map_to_gl_clip_range() {
        let mut cam = Camera::room_default();
        cam.set_viewport(800, 600).unwrap();
        let near = clip_to_ndc(cam.proj(), Vec3::new(0.0, 0.0, -Z_NEAR));
        let far = clip_to_ndc(cam.proj(), Vec3::new(0.0, 0.0, -Z_FAR));
        assert!((near.z + 1.0).abs() < 1e-4, "near z = {}", near.z);
        assert!((far.z - 1.0).abs() < 1e-4, "far z = {}", far.z);
    }

    #[test]
    fn near_plane_corners_hit_ndc_edges() {
        let mut cam = Camera::room_default();
        cam.set_viewport(1000, 500).unwrap();
        let right = Z_NEAR * HALF_EXTENT;
        let top = right / 2.0;
        let corner = clip_to_ndc(cam.proj(), Vec3::new(right, top, -Z_NEAR));
        assert!((corner.x - 1.0).abs() < 1e-4);
        assert!((corner.y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn zero_viewport_keeps_previous_projection() {
        let mut cam = Camera::room_default();
        cam.set_viewport(640, 480).unwrap();
        let before = cam.proj();
        let err = cam.set_viewport(0, 480).unwrap_err();
        assert_eq!(err, CoreError::InvalidViewport { width: 0, height: 480 });
        assert_eq!(cam.proj(), before);
    }

    #[test]
    fn frustum_rejects_degenerate_planes() {
        assert!(frustum(-1.0, 1.0, -1.0, 1.0, 0.0, 10.0).is_err());
        assert!(frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 1.0).is_err());
        assert!(frustum(1.0, 1.0, -1.0, 1.0, 0.1, 10.0).is_err());
        assert!(frustum(-1.0, 1.0, 2.0, 2.0, 0.1, 10.0).is_err());
    }

    #[test]
    fn view_looks_down_negative_z() {
        let cam = Camera::room_default();
        let p = cam.view() * Vec4::new(0.0, 0.0, -1.0, 1.0);
        assert!((p.z + 1.0).abs() < 1e-6);
        assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6);
    }
}
