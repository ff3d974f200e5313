//! Static vertex and index buffers.

use super::error::GraphicsError;

/// Binding point of a [`Buffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    /// Vertex attribute data (`ARRAY_BUFFER`).
    Array,
    /// Element indices (`ELEMENT_ARRAY_BUFFER`).
    ElementArray,
}

impl BufferTarget {
    pub fn gl_target(self) -> u32 {
        match self {
            Self::Array => glow::ARRAY_BUFFER,
            Self::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// A GPU buffer uploaded once with `STATIC_DRAW`.
#[derive(Debug)]
pub struct Buffer {
    handle: glow::Buffer,
    target: BufferTarget,
    len: usize,
}

impl Buffer {
    /// Uploads `data` as an array buffer.
    ///
    /// # Errors
    ///
    /// Returns `GraphicsError::ResourceCreation` if the driver refuses the buffer.
    pub fn from_f32(gl: &glow::Context, data: &[f32]) -> Result<Self, GraphicsError> {
        Self::upload(gl, BufferTarget::Array, bytemuck::cast_slice(data), data.len())
    }

    /// Uploads `indices` as an element array buffer.
    ///
    /// # Errors
    ///
    /// Returns `GraphicsError::ResourceCreation` if the driver refuses the buffer.
    pub fn from_u16(gl: &glow::Context, indices: &[u16]) -> Result<Self, GraphicsError> {
        Self::upload(
            gl,
            BufferTarget::ElementArray,
            bytemuck::cast_slice(indices),
            indices.len(),
        )
    }

    #[allow(unsafe_code)]
    fn upload(
        gl: &glow::Context,
        target: BufferTarget,
        bytes: &[u8],
        len: usize,
    ) -> Result<Self, GraphicsError> {
        use glow::HasContext;

        // SAFETY: glow wraps raw GL calls as unsafe. The buffer is bound
        // for the upload only and `bytes` outlives the call.
        let handle = unsafe { gl.create_buffer().map_err(GraphicsError::creation("buffer"))? };
        let buffer = Self {
            handle,
            target,
            len,
        };
        buffer.scope(gl, || unsafe {
            gl.buffer_data_u8_slice(target.gl_target(), bytes, glow::STATIC_DRAW);
        });
        log::debug!("uploaded {} bytes to {target:?} buffer", bytes.len());
        Ok(buffer)
    }

    /// Number of elements (floats or indices) uploaded.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn target(&self) -> BufferTarget {
        self.target
    }

    #[allow(unsafe_code)]
    pub fn bind(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.handle is a valid buffer created in upload().
        unsafe { gl.bind_buffer(self.target.gl_target(), Some(self.handle)) };
    }

    #[allow(unsafe_code)]
    pub fn unbind(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: unbinding a buffer target is always valid.
        unsafe { gl.bind_buffer(self.target.gl_target(), None) };
    }

    /// Runs `f` with this buffer bound to its target, then unbinds it.
    pub fn scope<R>(&self, gl: &glow::Context, f: impl FnOnce() -> R) -> R {
        self.bind(gl);
        let result = f();
        self.unbind(gl);
        result
    }

    #[allow(unsafe_code)]
    pub fn destroy(self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.handle is a valid buffer; consuming self prevents reuse.
        unsafe { gl.delete_buffer(self.handle) };
    }
}
