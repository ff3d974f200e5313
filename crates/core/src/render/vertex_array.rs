//! Attribute bindings from a vertex buffer to a program.

use super::buffer::Buffer;
use super::error::GraphicsError;
use super::shader::Program;
use crate::layout::{AttributeLayout, NUM_BYTES_IN_UNSIGNED_SHORT};
use crate::mesh::PrimitiveType;

/// GL draw mode for a primitive type.
pub fn primitive_mode(primitive: PrimitiveType) -> u32 {
    match primitive {
        PrimitiveType::Points => glow::POINTS,
        PrimitiveType::Lines => glow::LINES,
        PrimitiveType::LineLoop => glow::LINE_LOOP,
        PrimitiveType::LineStrip => glow::LINE_STRIP,
        PrimitiveType::Triangles => glow::TRIANGLES,
        PrimitiveType::TriangleStrip => glow::TRIANGLE_STRIP,
        PrimitiveType::TriangleFan => glow::TRIANGLE_FAN,
    }
}

/// Byte offset of index `start` in a `u16` element buffer.
pub fn index_byte_offset(start: usize) -> i32 {
    (start * NUM_BYTES_IN_UNSIGNED_SHORT) as i32
}

#[derive(Debug, Clone)]
struct BoundAttribute {
    location: u32,
    size: i32,
    offset: i32,
}

/// A vertex buffer together with the program locations of its attributes.
#[derive(Debug)]
pub struct VertexArray {
    vao: glow::VertexArray,
    buffer: Buffer,
    attributes: Vec<BoundAttribute>,
}

impl VertexArray {
    /// Resolves every attribute of `layout` in `program`.
    ///
    /// Takes ownership of `buffer`; it is deleted with the vertex array.
    ///
    /// # Errors
    ///
    /// Returns `GraphicsError::AttributeNotFound` naming the first attribute
    /// the program does not declare (or the compiler optimized away), or
    /// `ResourceCreation` if the vertex array object cannot be created.
    #[allow(unsafe_code)]
    pub fn new(
        gl: &glow::Context,
        program: &Program,
        buffer: Buffer,
        layout: &[AttributeLayout],
    ) -> Result<Self, GraphicsError> {
        use glow::HasContext;

        let mut attributes = Vec::with_capacity(layout.len());
        for attribute in layout {
            let Some(location) = program.attribute_location(gl, &attribute.name) else {
                buffer.destroy(gl);
                return Err(GraphicsError::AttributeNotFound(attribute.name.clone()));
            };
            attributes.push(BoundAttribute {
                location,
                size: attribute.size as i32,
                offset: attribute.offset as i32,
            });
        }

        // SAFETY: glow wraps raw GL calls as unsafe; the buffer is deleted
        // if the vertex array cannot be created.
        let vao = match unsafe { gl.create_vertex_array() } {
            Ok(vao) => vao,
            Err(reason) => {
                buffer.destroy(gl);
                return Err(GraphicsError::ResourceCreation {
                    resource: "vertex array",
                    reason,
                });
            }
        };

        Ok(Self {
            vao,
            buffer,
            attributes,
        })
    }

    /// Binds the vertex buffer and points every resolved attribute into it.
    ///
    /// Streams are planar, so the stride is 0 and each attribute starts at
    /// its own byte offset.
    #[allow(unsafe_code)]
    pub fn prepare_for_render(&self, gl: &glow::Context) {
        use glow::HasContext;

        self.buffer.bind(gl);
        for attribute in &self.attributes {
            // SAFETY: locations were resolved against the program in new();
            // offsets lie within the bound buffer.
            unsafe {
                gl.enable_vertex_attrib_array(attribute.location);
                gl.vertex_attrib_pointer_f32(
                    attribute.location,
                    attribute.size,
                    glow::FLOAT,
                    false,
                    0,
                    attribute.offset,
                );
            }
        }
    }

    /// Draws `count` vertices starting at `start`.
    ///
    /// With an index buffer, `start` and `count` address indices and
    /// `draw_elements` is used; otherwise they address vertices.
    #[allow(unsafe_code)]
    pub fn render(
        &self,
        gl: &glow::Context,
        primitive: PrimitiveType,
        start: usize,
        count: usize,
        index_buffer: Option<&Buffer>,
    ) {
        use glow::HasContext;

        let mode = primitive_mode(primitive);
        // SAFETY: self.vao is a valid vertex array; the draw ranges come
        // from the packed mesh the buffers were uploaded from.
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            self.prepare_for_render(gl);
            match index_buffer {
                Some(indices) => {
                    indices.bind(gl);
                    gl.draw_elements(
                        mode,
                        count as i32,
                        glow::UNSIGNED_SHORT,
                        index_byte_offset(start),
                    );
                }
                None => gl.draw_arrays(mode, start as i32, count as i32),
            }
            gl.bind_vertex_array(None);
        }
        self.buffer.unbind(gl);
    }

    /// Number of resolved attributes.
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Deletes the vertex array object and its vertex buffer.
    #[allow(unsafe_code)]
    pub fn destroy(self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.vao is valid; consuming self prevents reuse.
        unsafe { gl.delete_vertex_array(self.vao) };
        self.buffer.destroy(gl);
    }
}
