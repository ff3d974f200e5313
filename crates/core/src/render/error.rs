//! Errors raised by GPU resource creation and use.

use std::fmt;

use thiserror::Error;

use super::shader::ShaderError;
use crate::error::SandboxError;

/// Completeness status reported by `glCheckFramebufferStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferStatus {
    Complete,
    IncompleteAttachment,
    MissingAttachment,
    IncompleteDimensions,
    Unsupported,
    /// Any status code without a dedicated variant.
    Unknown(u32),
}

impl FramebufferStatus {
    /// Maps a GL status code to a status.
    pub fn from_gl(code: u32) -> Self {
        match code {
            glow::FRAMEBUFFER_COMPLETE => Self::Complete,
            glow::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => Self::IncompleteAttachment,
            glow::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => Self::MissingAttachment,
            glow::FRAMEBUFFER_INCOMPLETE_DIMENSIONS => Self::IncompleteDimensions,
            glow::FRAMEBUFFER_UNSUPPORTED => Self::Unsupported,
            other => Self::Unknown(other),
        }
    }

    pub fn is_complete(self) -> bool {
        self == Self::Complete
    }
}

impl fmt::Display for FramebufferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "FRAMEBUFFER_COMPLETE"),
            Self::IncompleteAttachment => write!(f, "FRAMEBUFFER_INCOMPLETE_ATTACHMENT"),
            Self::MissingAttachment => write!(f, "FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT"),
            Self::IncompleteDimensions => write!(f, "FRAMEBUFFER_INCOMPLETE_DIMENSIONS"),
            Self::Unsupported => write!(f, "FRAMEBUFFER_UNSUPPORTED"),
            Self::Unknown(code) => write!(f, "unknown status 0x{code:04X}"),
        }
    }
}

/// Errors produced by the GPU wrappers.
#[derive(Debug, Error)]
pub enum GraphicsError {
    /// The driver refused to allocate an object.
    #[error("couldn't create {resource}: {reason}")]
    ResourceCreation {
        /// Kind of object, e.g. "buffer" or "framebuffer".
        resource: &'static str,
        reason: String,
    },

    /// Shader compilation or program linking failed.
    #[error(transparent)]
    Shader(#[from] ShaderError),

    /// A vertex attribute is not active in the linked program.
    #[error("failed to find attribute location for: {0}")]
    AttributeNotFound(String),

    /// A framebuffer could not be completed with its attachments.
    #[error("incomplete framebuffer: {0}")]
    IncompleteFramebuffer(FramebufferStatus),

    /// Uploaded pixel data does not match the texture size.
    #[error("pixel data has {got} bytes, expected {expected} for {width}x{height} RGBA")]
    PixelDataSize {
        width: u32,
        height: u32,
        expected: usize,
        got: usize,
    },

    /// A CPU-side step (mesh packing, dimensions) failed.
    #[error(transparent)]
    Sandbox(#[from] SandboxError),
}

impl GraphicsError {
    pub(crate) fn creation(resource: &'static str) -> impl FnOnce(String) -> Self {
        move |reason| Self::ResourceCreation { resource, reason }
    }
}
