//! A render pass: one program, an optional texture and target, and the
//! geometry drawn with them.

use super::buffer::Buffer;
use super::error::GraphicsError;
use super::framebuffer::Framebuffer;
use super::shader::Program;
use super::texture::Texture;
use super::vertex_array::VertexArray;
use crate::layout::{pack_mesh, PackedMesh};
use crate::mesh::{Mesh, PrimitiveType};
use crate::primitives::screen_quad;
use crate::shaders::{MESH_FRAGMENT_SHADER, MESH_VERTEX_SHADER, SCREENSPACE_VERTEX_SHADER};
use crate::uniform::NamedUniform;

/// Sampler name the pipeline binds its texture to.
pub const TEXTURE_UNIFORM: &str = "tex";

/// Uploaded geometry ready to be drawn.
#[derive(Debug)]
pub struct GeometryBuffer {
    pub vertex_array: VertexArray,
    pub index_buffer: Option<Buffer>,
    /// Indices to draw when indexed, vertices otherwise.
    pub draw_count: usize,
    pub primitive: PrimitiveType,
}

impl GeometryBuffer {
    /// Uploads `packed` and binds its attributes to `program`.
    ///
    /// # Errors
    ///
    /// Propagates buffer creation and attribute lookup failures.
    pub fn new(
        gl: &glow::Context,
        program: &Program,
        packed: &PackedMesh,
    ) -> Result<Self, GraphicsError> {
        let vertex_buffer = Buffer::from_f32(gl, &packed.vertex_data)?;
        let vertex_array = VertexArray::new(gl, program, vertex_buffer, &packed.attributes)?;
        let index_buffer = match &packed.indices {
            Some(indices) => match Buffer::from_u16(gl, indices) {
                Ok(buffer) => Some(buffer),
                Err(e) => {
                    vertex_array.destroy(gl);
                    return Err(e);
                }
            },
            None => None,
        };
        let draw_count = packed
            .indices
            .as_ref()
            .map_or(packed.vertex_count, Vec::len);

        Ok(Self {
            vertex_array,
            index_buffer,
            draw_count,
            primitive: packed.primitive_type,
        })
    }

    pub fn render(&self, gl: &glow::Context) {
        self.vertex_array.render(
            gl,
            self.primitive,
            0,
            self.draw_count,
            self.index_buffer.as_ref(),
        );
    }

    pub fn destroy(self, gl: &glow::Context) {
        self.vertex_array.destroy(gl);
        if let Some(indices) = self.index_buffer {
            indices.destroy(gl);
        }
    }
}

/// Program, texture, target and geometry of one render pass.
#[derive(Debug)]
pub struct Pipeline {
    program: Program,
    texture: Option<Texture>,
    framebuffer: Option<Framebuffer>,
    geometry: Vec<GeometryBuffer>,
}

impl Pipeline {
    /// Wraps an already linked program.
    pub fn new(program: Program) -> Self {
        Self {
            program,
            texture: None,
            framebuffer: None,
            geometry: Vec::new(),
        }
    }

    /// Pipeline running the built-in mesh shaders.
    ///
    /// # Errors
    ///
    /// Returns `GraphicsError::Shader` if the built-in shaders fail to build.
    pub fn mesh(gl: &glow::Context) -> Result<Self, GraphicsError> {
        let program = Program::from_sources(gl, MESH_VERTEX_SHADER, MESH_FRAGMENT_SHADER)?;
        Ok(Self::new(program))
    }

    /// Full-screen pass running `fragment_src` over a screen quad.
    ///
    /// # Errors
    ///
    /// Returns `GraphicsError::Shader` if `fragment_src` fails to compile or
    /// link, or `AttributeNotFound` if the quad cannot be bound.
    pub fn screen_space(gl: &glow::Context, fragment_src: &str) -> Result<Self, GraphicsError> {
        let program = Program::from_sources(gl, SCREENSPACE_VERTEX_SHADER, fragment_src)?;
        let mut pipeline = Self::new(program);
        if let Err(e) = pipeline.add_packed(gl, &screen_quad()) {
            pipeline.destroy(gl);
            return Err(e);
        }
        Ok(pipeline)
    }

    /// Sets the texture bound to the `tex` sampler, returning the previous one.
    pub fn set_texture(&mut self, texture: Option<Texture>) -> Option<Texture> {
        std::mem::replace(&mut self.texture, texture)
    }

    /// Renders into `framebuffer` instead of the default framebuffer,
    /// returning the previous target.
    pub fn set_framebuffer(&mut self, framebuffer: Option<Framebuffer>) -> Option<Framebuffer> {
        std::mem::replace(&mut self.framebuffer, framebuffer)
    }

    pub fn texture_mut(&mut self) -> Option<&mut Texture> {
        self.texture.as_mut()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Validates, packs and uploads `mesh`.
    ///
    /// # Errors
    ///
    /// Returns `GraphicsError::Sandbox` for invalid meshes and propagates
    /// upload failures.
    pub fn add_geometry(&mut self, gl: &glow::Context, mesh: &Mesh) -> Result<(), GraphicsError> {
        let packed = pack_mesh(mesh)?;
        self.add_packed(gl, &packed)
    }

    /// Uploads already packed geometry.
    ///
    /// # Errors
    ///
    /// Propagates buffer creation and attribute lookup failures.
    pub fn add_packed(&mut self, gl: &glow::Context, packed: &PackedMesh) -> Result<(), GraphicsError> {
        let geometry = GeometryBuffer::new(gl, &self.program, packed)?;
        log::debug!(
            "added {} geometry with {} vertices",
            geometry.primitive.name(),
            packed.vertex_count
        );
        self.geometry.push(geometry);
        Ok(())
    }

    /// Deletes all uploaded geometry.
    pub fn clear_geometry(&mut self, gl: &glow::Context) {
        for geometry in self.geometry.drain(..) {
            geometry.destroy(gl);
        }
    }

    pub fn geometry_count(&self) -> usize {
        self.geometry.len()
    }

    /// Draws every geometry with `uniforms` applied.
    ///
    /// Targets the pipeline's framebuffer when one is set. Uniforms the
    /// program does not declare are skipped with a warning.
    pub fn render(&self, gl: &glow::Context, uniforms: &[NamedUniform]) {
        let draw = || {
            self.program.scope(gl, || {
                for uniform in uniforms {
                    self.program.set_uniform(gl, &uniform.name, &uniform.value);
                }
                if let Some(texture) = &self.texture {
                    self.program.set_texture(gl, TEXTURE_UNIFORM, texture, 0);
                }
                for geometry in &self.geometry {
                    geometry.render(gl);
                }
                if let Some(texture) = &self.texture {
                    texture.unbind(gl);
                }
            });
        };

        match &self.framebuffer {
            Some(framebuffer) => framebuffer.scope(gl, draw),
            None => draw(),
        }
    }

    /// Deletes the program, geometry, texture and framebuffer.
    pub fn destroy(mut self, gl: &glow::Context) {
        self.clear_geometry(gl);
        if let Some(framebuffer) = self.framebuffer.take() {
            framebuffer.destroy(gl);
        }
        if let Some(texture) = self.texture.take() {
            texture.destroy(gl);
        }
        self.program.destroy(gl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_fragment_shader_declares_texture_sampler() {
        assert!(
            MESH_FRAGMENT_SHADER.contains(&format!("uniform sampler2D {TEXTURE_UNIFORM};")),
            "expected sampler '{TEXTURE_UNIFORM}' in mesh fragment shader"
        );
    }

    #[test]
    fn pipeline_struct_compiles_with_expected_api() {
        fn _assert_api(gl: &glow::Context, pipeline: &mut Pipeline, mesh: &Mesh) {
            let _: Result<(), GraphicsError> = pipeline.add_geometry(gl, mesh);
            pipeline.render(gl, &[]);
            pipeline.clear_geometry(gl);
            let _: usize = pipeline.geometry_count();
        }
    }

    #[test]
    #[ignore = "requires GL context"]
    fn mesh_pipeline_draws_cube() {
        // Would test: Pipeline::mesh(gl) + add_geometry(cube()) renders
        // non-clear pixels at the viewport centre.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn screen_space_pipeline_has_quad() {
        // Would test: Pipeline::screen_space(gl, src).geometry_count() == 1.
    }
}
