//! Orbit camera driven by drag and wheel input.
//!
//! The camera always looks at the origin. Dragging changes yaw and pitch
//! (pitch stays strictly inside ±90° so the look-at basis never degenerates)
//! and the wheel scales the orbit distance proportionally.

use glam::{Mat3, Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::transform::{perspective_view_projection, DEFAULT_FAR, DEFAULT_NEAR};
use crate::uniform::NamedUniform;

/// Degrees of rotation per pixel of mouse movement.
pub const DRAG_DEGREES_PER_PIXEL: f32 = -0.5;
/// Pitch limit in degrees.
pub const MAX_PITCH_DEGREES: f32 = 89.9;
/// Fraction of the current distance added or removed per wheel notch.
pub const ZOOM_FACTOR: f32 = 0.075;
/// Starting orbit distance.
pub const DEFAULT_ORBIT_DISTANCE: f32 = 5.0;
/// Default vertical field of view in degrees.
pub const DEFAULT_FOV_Y_DEGREES: f32 = 60.0;

/// Projection settings for the orbit camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub orbit_distance: f32,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            orbit_distance: DEFAULT_ORBIT_DISTANCE,
            fov_y_degrees: DEFAULT_FOV_Y_DEGREES,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }
}

/// Eye position and ray-generation basis for a full-screen ray tracing pass.
///
/// The basis columns are `right` (scaled to the half width of the image
/// plane), `up` (scaled to the half height) and `look` (from the eye to the
/// origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayBasis {
    pub eye: Vec3,
    pub basis: Mat3,
}

impl RayBasis {
    /// `eyePosition` and `cameraBasis` uniforms of a ray-tracing fragment shader.
    pub fn to_named(&self) -> Vec<NamedUniform> {
        vec![
            NamedUniform::new("eyePosition", self.eye),
            NamedUniform::new("cameraBasis", self.basis),
        ]
    }
}

/// Camera orbiting the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Rotation about +Y in radians.
    pub yaw: f32,
    /// Rotation about +X in radians, clamped to ±89.9°.
    pub pitch: f32,
    /// Distance from the origin.
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(DEFAULT_ORBIT_DISTANCE)
    }
}

impl OrbitCamera {
    pub fn new(distance: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance,
        }
    }

    /// Applies a pointer movement of `(dx, dy)` pixels.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        let limit = MAX_PITCH_DEGREES.to_radians();
        self.yaw += (dx * DRAG_DEGREES_PER_PIXEL).to_radians();
        self.pitch = (self.pitch + (dy * DRAG_DEGREES_PER_PIXEL).to_radians()).clamp(-limit, limit);
    }

    /// Applies one wheel event. Only the sign of `delta_y` matters.
    pub fn zoom(&mut self, delta_y: f32) {
        if delta_y == 0.0 || delta_y.is_nan() {
            return;
        }
        self.distance += delta_y.signum() * self.distance * ZOOM_FACTOR;
    }

    /// Rotation applied to the camera's rest frame: pitch about X, then yaw about Y.
    pub fn orientation(&self) -> Mat3 {
        Mat3::from_rotation_y(self.yaw) * Mat3::from_rotation_x(self.pitch)
    }

    /// Eye position in world space.
    pub fn eye(&self) -> Vec3 {
        self.orientation() * Vec3::new(0.0, 0.0, self.distance)
    }

    /// Projection-from-world matrix for a viewport of the given aspect ratio.
    pub fn view_projection(&self, aspect: f32, config: &CameraConfig) -> Mat4 {
        perspective_view_projection(
            self.eye(),
            aspect,
            config.fov_y_degrees.to_radians(),
            config.near,
            config.far,
        )
    }

    /// Eye and image-plane basis for generating primary rays in a shader.
    pub fn ray_basis(&self, aspect: f32, fov_y: f32) -> RayBasis {
        let half_height = (fov_y * 0.5).tan() * self.distance;
        let half_width = aspect * half_height;

        let rotation = self.orientation();
        let right = rotation * Vec3::new(half_width, 0.0, 0.0);
        let up = rotation * Vec3::new(0.0, half_height, 0.0);
        let look = rotation * Vec3::new(0.0, 0.0, -self.distance);

        RayBasis {
            eye: self.eye(),
            basis: Mat3::from_cols(right, up, look),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn ray_basis_uniform_names() {
        let basis = OrbitCamera::default().ray_basis(1.0, 60f32.to_radians());
        let named = basis.to_named();
        assert_eq!(named[0].name, "eyePosition");
        assert_eq!(named[1].value.glsl_type(), "mat3");
    }

    #[test]
    fn default_eye_is_on_positive_z() {
        let camera = OrbitCamera::default();
        assert!(approx(camera.eye(), Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn drag_right_yaws_negative() {
        let mut camera = OrbitCamera::default();
        camera.drag(10.0, 0.0);
        assert!((camera.yaw - (-5_f32).to_radians()).abs() < 1e-6, "got {}", camera.yaw);
        assert_eq!(camera.pitch, 0.0);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = OrbitCamera::default();
        camera.drag(0.0, -1000.0);
        assert!((camera.pitch - 89.9_f32.to_radians()).abs() < 1e-6);
        camera.drag(0.0, 5000.0);
        assert!((camera.pitch + 89.9_f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn zoom_scales_distance_by_sign_only() {
        let mut camera = OrbitCamera::default();
        camera.zoom(120.0);
        assert!((camera.distance - 5.375).abs() < 1e-5, "got {}", camera.distance);
        camera.zoom(-3.0);
        assert!((camera.distance - 5.375 * 0.925).abs() < 1e-5, "got {}", camera.distance);
    }

    #[test]
    fn zero_wheel_delta_is_ignored() {
        let mut camera = OrbitCamera::default();
        camera.zoom(0.0);
        assert_eq!(camera.distance, DEFAULT_ORBIT_DISTANCE);
    }

    #[test]
    fn quarter_yaw_moves_eye_to_positive_x() {
        let camera = OrbitCamera {
            yaw: std::f32::consts::FRAC_PI_2,
            ..OrbitCamera::default()
        };
        assert!(approx(camera.eye(), Vec3::new(5.0, 0.0, 0.0)), "got {:?}", camera.eye());
    }

    #[test]
    fn ray_basis_look_points_at_origin() {
        let mut camera = OrbitCamera::default();
        camera.drag(37.0, -21.0);
        let rays = camera.ray_basis(1.5, 60_f32.to_radians());
        assert!(approx(rays.eye + rays.basis.z_axis, Vec3::ZERO));
    }

    #[test]
    fn ray_basis_half_extents_follow_fov_and_aspect() {
        let camera = OrbitCamera::default();
        let rays = camera.ray_basis(2.0, 90_f32.to_radians());
        // tan(45°) * 5 = 5 half height, 10 half width
        assert!(approx(rays.basis.x_axis, Vec3::new(10.0, 0.0, 0.0)));
        assert!(approx(rays.basis.y_axis, Vec3::new(0.0, 5.0, 0.0)));
    }

    #[test]
    fn view_projection_keeps_origin_centred() {
        let mut camera = OrbitCamera::default();
        camera.drag(-40.0, 15.0);
        let m = camera.view_projection(1.0, &CameraConfig::default());
        let ndc = m.project_point3(Vec3::ZERO);
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4, "got {ndc:?}");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn pitch_never_leaves_limit(moves in prop::collection::vec((-500.0_f32..500.0, -500.0_f32..500.0), 0..50)) {
                let mut camera = OrbitCamera::default();
                let limit = MAX_PITCH_DEGREES.to_radians();
                for (dx, dy) in moves {
                    camera.drag(dx, dy);
                    prop_assert!(camera.pitch.abs() <= limit + 1e-6, "pitch {}", camera.pitch);
                }
            }

            #[test]
            fn eye_distance_matches_orbit_distance(yaw in -10.0_f32..10.0, dy in -500.0_f32..500.0) {
                let mut camera = OrbitCamera { yaw, ..OrbitCamera::default() };
                camera.drag(0.0, dy);
                prop_assert!((camera.eye().length() - camera.distance).abs() < 1e-3);
            }
        }
    }
}
