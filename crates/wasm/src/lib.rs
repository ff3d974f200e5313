#![deny(unsafe_code)]
//! Browser entry point: binds a canvas' WebGL2 context to the core mesh
//! pipeline.
//!
//! JavaScript owns the event listeners and the animation loop; it forwards
//! pointer and wheel events to [`Sandbox`] and calls `render` once per frame.

pub mod state;

pub use state::{checkerboard, SandboxState, CHECKERBOARD_SIZE};

#[cfg(target_arch = "wasm32")]
mod bindings {
    use glam::Vec2;
    use glsandbox_core::render::{GpuContext, GraphicsError, Pipeline, Texture};
    use glsandbox_core::{primitives, Coloring, Interactions, SandboxConfig, SandboxError};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{HtmlCanvasElement, WebGl2RenderingContext, WebGlContextAttributes};

    use crate::state::{checkerboard, SandboxState, CHECKERBOARD_SIZE};

    fn error(message: &str) -> JsValue {
        JsValue::from_str(message)
    }

    fn graphics_error(e: GraphicsError) -> JsValue {
        error(&e.to_string())
    }

    fn sandbox_error(e: SandboxError) -> JsValue {
        error(&e.to_string())
    }

    /// Called when the module loads.
    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_ok() {
            log::info!("glsandbox initialized");
        }
    }

    /// A canvas rendering one configured primitive with an orbit camera.
    #[wasm_bindgen]
    pub struct Sandbox {
        ctx: GpuContext,
        pipeline: Option<Pipeline>,
        state: SandboxState,
    }

    #[wasm_bindgen]
    impl Sandbox {
        /// Binds to the canvas with id `canvas_id`. `config_json` may be
        /// empty for defaults.
        #[wasm_bindgen(constructor)]
        pub fn new(canvas_id: &str, config_json: &str) -> Result<Sandbox, JsValue> {
            let mut config = if config_json.trim().is_empty() {
                SandboxConfig::default()
            } else {
                SandboxConfig::from_json(config_json).map_err(sandbox_error)?
            };

            let window = web_sys::window().ok_or_else(|| error("missing window"))?;
            let document = window.document().ok_or_else(|| error("missing document"))?;
            let canvas = document
                .get_element_by_id(canvas_id)
                .ok_or_else(|| error("canvas not found"))?
                .dyn_into::<HtmlCanvasElement>()?;

            let attributes = WebGlContextAttributes::new();
            attributes.set_antialias(config.context.antialias);
            let webgl: WebGl2RenderingContext = canvas
                .get_context_with_context_options("webgl2", &attributes)?
                .ok_or_else(|| error("webgl2 context unavailable"))?
                .dyn_into()?;

            let gl = glow::Context::from_webgl2_context(webgl);
            let ctx = GpuContext::new(gl, &config.context);

            let mesh = primitives::from_name(&config.primitive.name, &config.primitive.params)
                .map_err(sandbox_error)?;
            config.material = config.material.for_mesh(&mesh);
            let mut pipeline = Pipeline::mesh(ctx.gl()).map_err(graphics_error)?;
            if let Err(e) = pipeline.add_geometry(ctx.gl(), &mesh) {
                pipeline.destroy(ctx.gl());
                return Err(graphics_error(e));
            }
            if config.material.coloring.needs_texture() {
                let pixels = checkerboard(CHECKERBOARD_SIZE);
                match Texture::new(ctx.gl(), CHECKERBOARD_SIZE, CHECKERBOARD_SIZE, Some(&pixels)) {
                    Ok(texture) => {
                        pipeline.set_texture(Some(texture));
                    }
                    Err(e) => {
                        pipeline.destroy(ctx.gl());
                        return Err(graphics_error(e));
                    }
                }
            }

            log::info!("loaded {} into #{canvas_id}", config.primitive.name);
            let state = SandboxState::new(config, canvas.width(), canvas.height());
            Ok(Sandbox {
                ctx,
                pipeline: Some(pipeline),
                state,
            })
        }

        pub fn resize(&mut self, width: u32, height: u32) {
            self.state.resize(width, height);
        }

        /// Orbits the camera by a pointer delta in pixels.
        pub fn drag(&mut self, dx: f32, dy: f32) {
            self.state.camera.drag(dx, dy);
        }

        /// Zooms by one wheel step in the direction of `delta_y`.
        pub fn zoom(&mut self, delta_y: f32) {
            self.state.camera.zoom(delta_y);
        }

        /// Starts a drag. The modifiers only select the reported
        /// [`Interactions`]; the sandbox itself always orbits, and hosts read
        /// the drag back through `drag_clip` and `drag_interactions`.
        pub fn pointer_down(&mut self, x: f32, y: f32, shift: bool, ctrl: bool, alt: bool) {
            self.state
                .pointer_down(Vec2::new(x, y), Interactions::from_modifiers(shift, ctrl, alt));
        }

        /// Clip-space `[initial_x, initial_y, current_x, current_y]` of the
        /// active drag.
        pub fn drag_clip(&self) -> Option<Vec<f32>> {
            self.state.drag_input().map(|drag| {
                vec![
                    drag.initial_clip.x,
                    drag.initial_clip.y,
                    drag.current_clip.x,
                    drag.current_clip.y,
                ]
            })
        }

        /// Interaction bits of the active drag: 1 rotate, 2 scale, 4 translate.
        pub fn drag_interactions(&self) -> u8 {
            self.state
                .drag_input()
                .map_or(0, |drag| drag.interactions.bits())
        }

        pub fn pointer_move(&mut self, x: f32, y: f32) {
            self.state.pointer_move(Vec2::new(x, y));
        }

        pub fn pointer_up(&mut self) {
            self.state.pointer_up();
        }

        /// Replaces the sampled texture with `width` x `height` RGBA8 pixels
        /// and switches the material to texture coloring.
        pub fn set_texture(&mut self, width: u32, height: u32, pixels: &[u8]) -> Result<(), JsValue> {
            let Some(pipeline) = self.pipeline.as_mut() else {
                return Err(error("sandbox has been released"));
            };
            match pipeline.texture_mut() {
                Some(texture) => texture
                    .update(self.ctx.gl(), width, height, pixels)
                    .map_err(graphics_error)?,
                None => {
                    let mut texture =
                        Texture::new(self.ctx.gl(), 1, 1, None).map_err(graphics_error)?;
                    texture
                        .update(self.ctx.gl(), width, height, pixels)
                        .map_err(graphics_error)?;
                    pipeline.set_texture(Some(texture));
                }
            }
            self.state.config.material.coloring = Coloring::Texture;
            Ok(())
        }

        pub fn render(&self) {
            let (width, height) = self.state.size();
            self.ctx.begin_frame(width, height);
            if let Some(pipeline) = &self.pipeline {
                pipeline.render(self.ctx.gl(), &self.state.frame_uniforms());
            }
        }
    }

    impl Drop for Sandbox {
        fn drop(&mut self) {
            if let Some(pipeline) = self.pipeline.take() {
                pipeline.destroy(self.ctx.gl());
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use bindings::Sandbox;
