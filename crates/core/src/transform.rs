//! Matrix composition and coordinate-space conversions.
//!
//! All matrices are column-major `glam` types, matching what GLSL expects
//! when uploaded without transposition.

use glam::{Mat3, Mat4, Quat, Vec2, Vec3};

/// Near clipping distance shared by the perspective and orthographic setups.
pub const DEFAULT_NEAR: f32 = 0.1;
/// Far clipping distance shared by the perspective and orthographic setups.
pub const DEFAULT_FAR: f32 = 100.0;
/// Visible world height of the orthographic 2D scene.
pub const DEFAULT_ORTHO_HEIGHT: f32 = 6.0;

/// Translation, rotation and scale of one object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// World-from-local matrix: scale first, then rotate, then translate.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_quat(self.rotation)
            * Mat4::from_scale(self.scale)
    }

    /// Matrix for transforming normals: inverse-transpose of the upper 3x3.
    pub fn normal_matrix(&self) -> Mat3 {
        normal_matrix(&self.matrix())
    }
}

/// Inverse-transpose of the upper-left 3x3 of `m`.
///
/// Returns the identity when `m` is singular, e.g. for a zero scale.
pub fn normal_matrix(m: &Mat4) -> Mat3 {
    let upper = Mat3::from_mat4(*m);
    if upper.determinant().abs() <= f32::EPSILON {
        return Mat3::IDENTITY;
    }
    upper.inverse().transpose()
}

/// Projection-from-world matrix for a perspective camera at `eye` looking at
/// the origin with +Y up.
pub fn perspective_view_projection(
    eye: Vec3,
    aspect: f32,
    fov_y: f32,
    near: f32,
    far: f32,
) -> Mat4 {
    let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
    let projection = Mat4::perspective_rh_gl(fov_y, aspect, near, far);
    projection * view
}

/// Projection-from-world matrix for the orthographic 2D scene.
///
/// The camera sits at (0, 0, 3) looking at the origin; `height` world units
/// are visible vertically and `aspect * height` horizontally.
pub fn orthographic_view_projection(aspect: f32, height: f32) -> Mat4 {
    let half = ortho_half_extent(aspect, height);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y);
    let projection =
        Mat4::orthographic_rh_gl(-half.x, half.x, -half.y, half.y, DEFAULT_NEAR, DEFAULT_FAR);
    projection * view
}

/// Half width and half height of the orthographic view volume.
pub fn ortho_half_extent(aspect: f32, height: f32) -> Vec2 {
    Vec2::new(aspect * height * 0.5, height * 0.5)
}

/// Converts a mouse position in viewport space (origin top-left, y down)
/// to clip space (origin centre, y up, range [-1, 1]).
pub fn viewport_to_clip(mouse: Vec2, width: f32, height: f32) -> Vec2 {
    // GL viewport space has its origin at the bottom left.
    let gl_viewport = Vec2::new(mouse.x, height - mouse.y - 1.0);
    let normalized = gl_viewport / Vec2::new(width, height);
    Vec2::splat(-1.0) + normalized * 2.0
}

/// Maps a clip-space point into the orthographic scene's world space.
pub fn clip_to_world(clip: Vec2, half_extent: Vec2) -> Vec2 {
    clip * half_extent
}
