//! CPU-side mesh description.
//!
//! A [`Mesh`] holds separate attribute streams (positions, normals, texture
//! coordinates, vertex colors) plus optional indices and the primitive type
//! used to rasterize them. Streams other than positions may be empty; a
//! non-empty stream must have exactly one entry per position.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::SandboxError;

/// How vertices are assembled into primitives during rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// All primitive type names, in declaration order.
const PRIMITIVE_TYPE_NAMES: &[&str] = &[
    "points",
    "lines",
    "line_loop",
    "line_strip",
    "triangles",
    "triangle_strip",
    "triangle_fan",
];

impl PrimitiveType {
    /// Parses a snake_case primitive type name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "points" => Some(Self::Points),
            "lines" => Some(Self::Lines),
            "line_loop" => Some(Self::LineLoop),
            "line_strip" => Some(Self::LineStrip),
            "triangles" => Some(Self::Triangles),
            "triangle_strip" => Some(Self::TriangleStrip),
            "triangle_fan" => Some(Self::TriangleFan),
            _ => None,
        }
    }

    /// Returns the snake_case name of this primitive type.
    pub fn name(self) -> &'static str {
        PRIMITIVE_TYPE_NAMES[self as usize]
    }

    /// Returns all recognized primitive type names.
    pub fn list_names() -> &'static [&'static str] {
        PRIMITIVE_TYPE_NAMES
    }
}

/// Geometry ready to be packed into GPU buffers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub texture_coordinates: Vec<Vec2>,
    pub vertex_colors: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub primitive_type: PrimitiveType,
}

impl Mesh {
    /// Creates an empty mesh rasterized as `primitive_type`.
    pub fn new(primitive_type: PrimitiveType) -> Self {
        Self {
            primitive_type,
            ..Self::default()
        }
    }

    /// Whether the mesh is drawn through an index buffer.
    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Number of vertices submitted to a draw call.
    ///
    /// Indexed meshes draw `indices.len()` vertices, others draw every position.
    pub fn vertex_count(&self) -> usize {
        if self.is_indexed() {
            self.indices.len()
        } else {
            self.positions.len()
        }
    }

    /// Checks stream lengths and index bounds.
    ///
    /// # Errors
    ///
    /// Returns `SandboxError::MismatchedAttribute` when a non-empty stream
    /// does not match the position count, or `SandboxError::IndexOutOfRange`
    /// when an index points past the last position.
    pub fn validate(&self) -> Result<(), SandboxError> {
        let expected = self.positions.len();
        let streams = [
            ("localNormal", self.normals.len()),
            ("textureCoordinates", self.texture_coordinates.len()),
            ("color", self.vertex_colors.len()),
        ];

        if let Some(&(attribute, got)) = streams
            .iter()
            .find(|&&(_, len)| len != 0 && len != expected)
        {
            return Err(SandboxError::MismatchedAttribute {
                attribute,
                expected,
                got,
            });
        }

        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= expected) {
            return Err(SandboxError::IndexOutOfRange {
                index,
                vertex_count: expected,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        let mut mesh = Mesh::new(PrimitiveType::Triangles);
        mesh.positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE];
        mesh.indices = vec![0, 1, 2, 2, 1, 3];
        mesh
    }

    #[test]
    fn vertex_count_uses_indices_when_present() {
        assert_eq!(quad().vertex_count(), 6);
    }

    #[test]
    fn vertex_count_falls_back_to_positions() {
        let mut mesh = quad();
        mesh.indices.clear();
        assert_eq!(mesh.vertex_count(), 4);
        assert!(!mesh.is_indexed());
    }

    #[test]
    fn validate_accepts_empty_optional_streams() {
        assert!(quad().validate().is_ok());
    }

    #[test]
    fn validate_rejects_short_normal_stream() {
        let mut mesh = quad();
        mesh.normals = vec![Vec3::Z; 3];
        let err = mesh.validate().unwrap_err();
        assert_eq!(
            err,
            SandboxError::MismatchedAttribute {
                attribute: "localNormal",
                expected: 4,
                got: 3
            }
        );
    }

    #[test]
    fn validate_rejects_index_past_last_position() {
        let mut mesh = quad();
        mesh.indices.push(4);
        assert!(
            matches!(
                mesh.validate(),
                Err(SandboxError::IndexOutOfRange { index: 4, vertex_count: 4 })
            ),
            "expected IndexOutOfRange"
        );
    }

    #[test]
    fn primitive_type_names_round_trip() {
        for &name in PrimitiveType::list_names() {
            let parsed = PrimitiveType::from_name(name).unwrap();
            assert_eq!(parsed.name(), name);
        }
        assert!(PrimitiveType::from_name("quads").is_none());
    }

    #[test]
    fn primitive_type_serializes_snake_case() {
        let json = serde_json::to_string(&PrimitiveType::TriangleStrip).unwrap();
        assert_eq!(json, "\"triangle_strip\"");
    }
}
