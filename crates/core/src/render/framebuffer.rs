//! Off-screen render targets.
//!
//! A `Framebuffer` renders into a caller-owned [`Texture`] (color) and its
//! own 16-bit depth renderbuffer, so a pass can be sampled by a later one.

use super::error::{FramebufferStatus, GraphicsError};
use super::texture::Texture;

/// Framebuffer object with a texture color attachment and a depth renderbuffer.
#[derive(Debug)]
pub struct Framebuffer {
    fbo: glow::Framebuffer,
    depth: glow::Renderbuffer,
    width: u32,
    height: u32,
}

impl Framebuffer {
    /// Creates a framebuffer of `width` x `height` drawing into `texture`.
    ///
    /// # Errors
    ///
    /// Returns `GraphicsError::ResourceCreation` if either GL object cannot
    /// be created, or `IncompleteFramebuffer` with the reported status.
    #[allow(unsafe_code)]
    pub fn new(
        gl: &glow::Context,
        width: u32,
        height: u32,
        texture: &Texture,
    ) -> Result<Self, GraphicsError> {
        use glow::HasContext;

        // SAFETY: glow wraps raw GL calls as unsafe. Every handle passed
        // below comes from a successful create call, and both objects are
        // deleted on the failure paths.
        let depth = unsafe {
            gl.create_renderbuffer()
                .map_err(GraphicsError::creation("renderbuffer"))?
        };
        unsafe {
            gl.bind_renderbuffer(glow::RENDERBUFFER, Some(depth));
            gl.renderbuffer_storage(
                glow::RENDERBUFFER,
                glow::DEPTH_COMPONENT16,
                width as i32,
                height as i32,
            );
            gl.bind_renderbuffer(glow::RENDERBUFFER, None);
        }

        let fbo = match unsafe { gl.create_framebuffer() } {
            Ok(fbo) => fbo,
            Err(reason) => {
                unsafe { gl.delete_renderbuffer(depth) };
                return Err(GraphicsError::ResourceCreation {
                    resource: "framebuffer",
                    reason,
                });
            }
        };

        let status = unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));
            gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(texture.handle()),
                0,
            );
            gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                glow::DEPTH_ATTACHMENT,
                glow::RENDERBUFFER,
                Some(depth),
            );
            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            FramebufferStatus::from_gl(status)
        };

        if !status.is_complete() {
            unsafe {
                gl.delete_framebuffer(fbo);
                gl.delete_renderbuffer(depth);
            }
            return Err(GraphicsError::IncompleteFramebuffer(status));
        }

        log::debug!("created {width}x{height} framebuffer");
        Ok(Self {
            fbo,
            depth,
            width,
            height,
        })
    }

    /// Binds this framebuffer as the draw target and sets the viewport to its size.
    #[allow(unsafe_code)]
    pub fn bind(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.fbo is a valid framebuffer handle created in new().
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.fbo));
            gl.viewport(0, 0, self.width as i32, self.height as i32);
        }
    }

    /// Restores the default framebuffer. The viewport is left for the caller.
    #[allow(unsafe_code)]
    pub fn unbind(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: binding the default framebuffer is always valid.
        unsafe { gl.bind_framebuffer(glow::FRAMEBUFFER, None) };
    }

    /// Runs `f` with this framebuffer bound, then restores the default one.
    pub fn scope<R>(&self, gl: &glow::Context, f: impl FnOnce() -> R) -> R {
        self.bind(gl);
        let result = f();
        self.unbind(gl);
        result
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Deletes the framebuffer and its depth renderbuffer. The color texture
    /// belongs to the caller and is left alone.
    #[allow(unsafe_code)]
    pub fn destroy(self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: both handles are valid; consuming self prevents reuse.
        unsafe {
            gl.delete_framebuffer(self.fbo);
            gl.delete_renderbuffer(self.depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framebuffer_struct_has_expected_fields() {
        // Compile-time verification of the owned handles.
        fn _assert_fields(fb: &Framebuffer) {
            let _fbo = fb.fbo;
            let _depth = fb.depth;
            let _w = fb.width;
            let _h = fb.height;
        }
    }

    #[test]
    #[ignore = "requires GL context"]
    fn new_creates_complete_framebuffer() {
        // Would test: Framebuffer::new(gl, 256, 256, &texture) succeeds
        // and width()/height() match.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn mismatched_texture_size_is_incomplete() {
        // Would test: a 0x0 texture yields IncompleteFramebuffer.
    }
}
