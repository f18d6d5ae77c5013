use glam::{Mat4, Vec3};

use super::framing::CameraFrame;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Camera for a computed frame. The clip planes bracket the framed
    /// sphere with some slack.
    #[must_use]
    pub fn from_frame(frame: &CameraFrame, aspect: f32) -> Self {
        let distance = frame.distance();
        Self {
            eye: frame.position,
            target: frame.target,
            up: frame.up,
            aspect,
            fovy: frame.fovy,
            znear: (distance - frame.radius_max * 1.5).max(0.1),
            zfar: distance + frame.radius_max * 1.5,
        }
    }

    /// World-to-view transform.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Projection matrix. `perspective_rh` uses a [0,1] depth range.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy.to_radians(), self.aspect, self.znear, self.zfar)
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// Project a world-space point to pixel coordinates (origin top-left)
    /// and view-space depth. `None` when the point is behind the eye.
    #[must_use]
    pub fn project(&self, view_proj: &Mat4, point: Vec3, width: u32, height: u32) -> Option<(f32, f32, f32)> {
        let clip = *view_proj * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let x = (ndc.x * 0.5 + 0.5) * width as f32;
        let y = (0.5 - ndc.y * 0.5) * height as f32;
        Some((x, y, clip.w))
    }

    /// Pixels per world unit at view depth `depth`.
    #[must_use]
    pub fn pixels_per_unit(&self, depth: f32, height: u32) -> f32 {
        let half = (self.fovy.to_radians() / 2.0).tan();
        height as f32 / (2.0 * depth.max(f32::EPSILON) * half)
    }
}
