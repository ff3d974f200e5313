//! Error types for the glsandbox core.

use thiserror::Error;

/// Errors produced by geometry, uniform and configuration operations.
///
/// GPU-side failures live in [`crate::render::GraphicsError`], which wraps
/// this type when a pure step (mesh packing, uniform parsing) fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SandboxError {
    /// A primitive or render target was requested with a zero dimension.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A uniform vector slice had a length with no matching GLSL type.
    #[error("GLSL {kind}{len} does not exist")]
    InvalidVectorLength {
        /// GLSL vector prefix, `"ivec"` or `"vec"`.
        kind: &'static str,
        /// Number of components that was supplied.
        len: usize,
    },

    /// A uniform matrix slice was not 4, 9 or 16 elements long.
    #[error("GLSL matrix data must contain 4, 9, or 16 elements, got {0}")]
    InvalidMatrixLength(usize),

    /// A mesh attribute stream does not have one entry per position.
    #[error("attribute '{attribute}' has {got} entries, expected {expected}")]
    MismatchedAttribute {
        attribute: &'static str,
        expected: usize,
        got: usize,
    },

    /// A mesh index points past the end of the vertex data.
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// A mesh index does not fit in an unsigned short index buffer.
    #[error("index {0} does not fit in a 16-bit index buffer")]
    IndexOverflow(u32),

    /// A primitive name was not recognized.
    #[error("unknown primitive: {0}")]
    UnknownPrimitive(String),

    /// A configuration value was out of range or could not be parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_vector_length_names_missing_glsl_type() {
        let err = SandboxError::InvalidVectorLength {
            kind: "ivec",
            len: 5,
        };
        let msg = format!("{err}");
        assert_eq!(msg, "GLSL ivec5 does not exist");
    }

    #[test]
    fn invalid_matrix_length_includes_count() {
        let msg = SandboxError::InvalidMatrixLength(7).to_string();
        assert!(msg.contains('7'), "missing length in: {msg}");
        assert!(msg.contains("4, 9, or 16"), "missing accepted sizes in: {msg}");
    }

    #[test]
    fn mismatched_attribute_includes_all_fields() {
        let err = SandboxError::MismatchedAttribute {
            attribute: "localNormal",
            expected: 24,
            got: 12,
        };
        let msg = format!("{err}");
        assert!(msg.contains("localNormal"), "missing attribute in: {msg}");
        assert!(msg.contains("24"), "missing expected count in: {msg}");
        assert!(msg.contains("12"), "missing actual count in: {msg}");
    }

    #[test]
    fn index_out_of_range_includes_index_and_count() {
        let msg = SandboxError::IndexOutOfRange {
            index: 40,
            vertex_count: 24,
        }
        .to_string();
        assert!(msg.contains("40") && msg.contains("24"), "got: {msg}");
    }

    #[test]
    fn unknown_primitive_includes_name() {
        let msg = SandboxError::UnknownPrimitive("torus".into()).to_string();
        assert!(msg.contains("torus"), "missing name in: {msg}");
    }

    #[test]
    fn sandbox_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SandboxError>();
    }

    #[test]
    fn sandbox_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<SandboxError>();
    }
}
