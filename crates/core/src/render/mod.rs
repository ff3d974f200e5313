//! WebGL2 / OpenGL resource wrappers.
//!
//! This module is only available when the `render` feature is enabled.
//! Every wrapper owns its GL handle, exposes `bind`/`unbind` plus a `scope`
//! helper that binds around a closure, and is released with an explicit
//! `destroy` on the context that created it.
//!
//! # Module overview
//!
//! - [`context`] -- GPU context wrapper applying [`crate::config::ContextConfig`].
//! - [`shader`] -- Shader compilation, program linking, uniform upload.
//! - [`buffer`] -- Static vertex and index buffers.
//! - [`texture`] -- RGBA8 textures with optional mipmaps.
//! - [`framebuffer`] -- Texture + depth render targets.
//! - [`vertex_array`] -- Attribute bindings and draw calls.
//! - [`pipeline`] -- Program, texture, target and geometry of one pass.
//! - [`error`] -- `GraphicsError` and framebuffer status codes.

pub mod buffer;
pub mod context;
pub mod error;
pub mod framebuffer;
pub mod pipeline;
pub mod shader;
pub mod texture;
pub mod vertex_array;

// Re-export key types at the render module level for convenience.
pub use buffer::{Buffer, BufferTarget};
pub use context::GpuContext;
pub use error::{FramebufferStatus, GraphicsError};
pub use framebuffer::Framebuffer;
pub use pipeline::{GeometryBuffer, Pipeline, TEXTURE_UNIFORM};
pub use shader::{format_shader_error, Program, Shader, ShaderError, ShaderStage};
pub use texture::{pixel_type_for_format, Texture, TextureConfig};
pub use vertex_array::{primitive_mode, VertexArray};
