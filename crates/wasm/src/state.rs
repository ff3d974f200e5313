//! Per-canvas interaction state, kept free of browser types so it can be
//! tested natively.

use glam::{Mat4, Vec2};
use glsandbox_core::{
    DragInput, DragTracker, FrameUniforms, Interactions, NamedUniform, OrbitCamera, SandboxConfig, Transform,
};

/// Side length of the generated checkerboard texture.
pub const CHECKERBOARD_SIZE: u32 = 8;

/// Camera, pointer and viewport state of one sandbox canvas.
#[derive(Debug, Clone)]
pub struct SandboxState {
    pub config: SandboxConfig,
    pub camera: OrbitCamera,
    pub model: Transform,
    tracker: DragTracker,
    width: u32,
    height: u32,
}

impl SandboxState {
    pub fn new(config: SandboxConfig, width: u32, height: u32) -> Self {
        let camera = OrbitCamera::new(config.camera.orbit_distance);
        Self {
            config,
            camera,
            model: Transform::IDENTITY,
            tracker: DragTracker::new(),
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Records a new canvas size. Zero sizes are clamped to one pixel.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn pointer_down(&mut self, position: Vec2, interactions: Interactions) {
        self.tracker.press(position, interactions);
    }

    /// Feeds a pointer move; while a button is held the camera orbits.
    pub fn pointer_move(&mut self, position: Vec2) {
        if let Some(delta) = self.tracker.moved(position) {
            self.camera.drag(delta.x, delta.y);
        }
    }

    pub fn pointer_up(&mut self) {
        self.tracker.release();
    }

    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    /// The active drag in clip space, with the modifiers held at press time.
    pub fn drag_input(&self) -> Option<DragInput> {
        self.tracker
            .drag_input(Vec2::new(self.width as f32, self.height as f32))
    }

    pub fn projection_from_world(&self) -> Mat4 {
        self.camera.view_projection(self.aspect(), &self.config.camera)
    }

    /// Uniforms for the mesh pipeline at the current camera and size.
    pub fn frame_uniforms(&self) -> Vec<NamedUniform> {
        FrameUniforms {
            world_from_local: self.model.matrix(),
            projection_from_world: self.projection_from_world(),
            material: self.config.material,
        }
        .to_named()
    }
}

/// RGBA8 checkerboard of `size` x `size` single-pixel cells.
pub fn checkerboard(size: u32) -> Vec<u8> {
    (0..size * size)
        .flat_map(|i| {
            let (x, y) = (i % size, i / size);
            let v = if (x + y) % 2 == 0 { 255 } else { 64 };
            [v, v, v, 255]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glsandbox_core::UniformValue;

    #[test]
    fn camera_starts_at_configured_distance() {
        let mut config = SandboxConfig::default();
        config.camera.orbit_distance = 7.0;
        let state = SandboxState::new(config, 640, 480);
        assert_eq!(state.camera.distance, 7.0);
        assert!((state.aspect() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn zero_size_is_clamped() {
        let mut state = SandboxState::new(SandboxConfig::default(), 0, 0);
        assert_eq!(state.size(), (1, 1));
        state.resize(300, 0);
        assert_eq!(state.size(), (300, 1));
    }

    #[test]
    fn dragging_orbits_camera() {
        let mut state = SandboxState::new(SandboxConfig::default(), 100, 100);
        state.pointer_down(Vec2::ZERO, Interactions::default());
        state.pointer_move(Vec2::new(10.0, 0.0));
        state.pointer_move(Vec2::new(20.0, 0.0));
        assert!(
            (state.camera.yaw - (-5.0f32).to_radians()).abs() < 1e-6,
            "expected -5 degrees of yaw, got: {}",
            state.camera.yaw.to_degrees()
        );
        state.pointer_up();
        state.pointer_move(Vec2::new(90.0, 0.0));
        assert!((state.camera.yaw - (-5.0f32).to_radians()).abs() < 1e-6);
    }

    #[test]
    fn drag_input_reports_press_modifiers_in_clip_space() {
        let mut state = SandboxState::new(SandboxConfig::default(), 200, 100);
        assert!(state.drag_input().is_none());
        state.pointer_down(Vec2::new(100.0, 49.0), Interactions::from_modifiers(false, true, false));
        state.pointer_move(Vec2::new(0.0, 99.0));
        let drag = state.drag_input().unwrap();
        // viewport rows count down from the top; the bottom-left pixel is (-1, -1)
        assert_eq!(drag.initial_clip, Vec2::ZERO);
        assert_eq!(drag.current_clip, Vec2::splat(-1.0));
        assert_eq!(drag.interactions.bits(), 2);
        state.pointer_up();
        assert!(state.drag_input().is_none());
    }

    #[test]
    fn frame_uniforms_use_configured_material() {
        let state = SandboxState::new(SandboxConfig::default(), 100, 100);
        let uniforms = state.frame_uniforms();
        let color = uniforms
            .iter()
            .find(|u| u.name == "uniformColor")
            .map(|u| u.value);
        assert_eq!(
            color,
            Some(UniformValue::Vec3(state.config.material.uniform_color))
        );
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let pixels = checkerboard(2);
        assert_eq!(pixels.len(), 16);
        assert_eq!(&pixels[0..4], &[255, 255, 255, 255]);
        assert_eq!(&pixels[4..8], &[64, 64, 64, 255]);
        assert_eq!(&pixels[12..16], &[255, 255, 255, 255]);
    }
}
