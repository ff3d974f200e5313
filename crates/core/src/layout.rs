//! Packing of a [`Mesh`] into GPU-ready vertex and index data.
//!
//! Vertex data is planar: every position first, then every normal, texture
//! coordinate and vertex color. Each non-empty stream gets an
//! [`AttributeLayout`] whose byte offset points at the start of its block,
//! so the attributes are read with a stride of zero.

use crate::error::SandboxError;
use crate::mesh::{Mesh, PrimitiveType};

pub const NUM_BYTES_IN_FLOAT: usize = 4;
pub const NUM_BYTES_IN_UNSIGNED_SHORT: usize = 2;
pub const VECTOR_2_SIZE: usize = 2;
pub const VECTOR_3_SIZE: usize = 3;

pub const POSITION_ATTRIBUTE: &str = "localPosition";
pub const NORMAL_ATTRIBUTE: &str = "localNormal";
pub const TEXTURE_COORDINATES_ATTRIBUTE: &str = "textureCoordinates";
pub const COLOR_ATTRIBUTE: &str = "color";

/// Where one vertex attribute lives inside a vertex buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeLayout {
    /// Attribute name in the vertex shader.
    pub name: String,
    /// Number of float components per vertex (1 to 4).
    pub size: usize,
    /// Byte offset of the first component in the buffer.
    pub offset: usize,
}

impl AttributeLayout {
    pub fn new(name: &str, size: usize, offset: usize) -> Self {
        Self {
            name: name.to_owned(),
            size,
            offset,
        }
    }
}

/// A mesh flattened into buffers plus the metadata needed to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedMesh {
    pub vertex_data: Vec<f32>,
    pub attributes: Vec<AttributeLayout>,
    /// `None` for meshes drawn with `draw_arrays`.
    pub indices: Option<Vec<u16>>,
    pub vertex_count: usize,
    pub primitive_type: PrimitiveType,
}

impl PackedMesh {
    /// Size of the vertex data in bytes.
    pub fn vertex_bytes(&self) -> usize {
        self.vertex_data.len() * NUM_BYTES_IN_FLOAT
    }

    /// Finds an attribute by shader name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeLayout> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// Validates and packs a mesh.
///
/// # Errors
///
/// Propagates [`Mesh::validate`] errors and returns
/// `SandboxError::IndexOverflow` for indices above `u16::MAX`.
pub fn pack_mesh(mesh: &Mesh) -> Result<PackedMesh, SandboxError> {
    mesh.validate()?;

    let streams: [(&str, usize, Vec<f32>); 4] = [
        (
            POSITION_ATTRIBUTE,
            VECTOR_3_SIZE,
            mesh.positions.iter().flat_map(|v| v.to_array()).collect(),
        ),
        (
            NORMAL_ATTRIBUTE,
            VECTOR_3_SIZE,
            mesh.normals.iter().flat_map(|v| v.to_array()).collect(),
        ),
        (
            TEXTURE_COORDINATES_ATTRIBUTE,
            VECTOR_2_SIZE,
            mesh.texture_coordinates
                .iter()
                .flat_map(|v| v.to_array())
                .collect(),
        ),
        (
            COLOR_ATTRIBUTE,
            VECTOR_3_SIZE,
            mesh.vertex_colors.iter().flat_map(|v| v.to_array()).collect(),
        ),
    ];

    let mut vertex_data = Vec::with_capacity(streams.iter().map(|s| s.2.len()).sum());
    let mut attributes = Vec::with_capacity(streams.len());

    for (name, size, data) in streams {
        if data.is_empty() {
            continue;
        }
        attributes.push(AttributeLayout::new(
            name,
            size,
            vertex_data.len() * NUM_BYTES_IN_FLOAT,
        ));
        vertex_data.extend(data);
    }

    let indices = if mesh.is_indexed() {
        let narrowed = mesh
            .indices
            .iter()
            .map(|&i| u16::try_from(i).map_err(|_| SandboxError::IndexOverflow(i)))
            .collect::<Result<Vec<u16>, _>>()?;
        Some(narrowed)
    } else {
        None
    };

    Ok(PackedMesh {
        vertex_data,
        attributes,
        indices,
        vertex_count: mesh.vertex_count(),
        primitive_type: mesh.primitive_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    fn textured_triangle() -> Mesh {
        let mut mesh = Mesh::new(PrimitiveType::Triangles);
        mesh.positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        mesh.normals = vec![Vec3::Z; 3];
        mesh.texture_coordinates = vec![Vec2::ZERO, Vec2::X, Vec2::Y];
        mesh
    }

    #[test]
    fn offsets_follow_planar_stream_order() {
        let packed = pack_mesh(&textured_triangle()).unwrap();
        let names: Vec<&str> = packed.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, [POSITION_ATTRIBUTE, NORMAL_ATTRIBUTE, TEXTURE_COORDINATES_ATTRIBUTE]);

        assert_eq!(packed.attribute(POSITION_ATTRIBUTE).unwrap().offset, 0);
        assert_eq!(packed.attribute(NORMAL_ATTRIBUTE).unwrap().offset, 3 * 3 * 4);
        assert_eq!(
            packed.attribute(TEXTURE_COORDINATES_ATTRIBUTE).unwrap().offset,
            2 * 3 * 3 * 4
        );
    }

    #[test]
    fn empty_streams_are_skipped() {
        let packed = pack_mesh(&textured_triangle()).unwrap();
        assert!(packed.attribute(COLOR_ATTRIBUTE).is_none());
        assert_eq!(packed.vertex_data.len(), 9 + 9 + 6);
        assert_eq!(packed.vertex_bytes(), 24 * NUM_BYTES_IN_FLOAT);
    }

    #[test]
    fn normals_block_starts_after_positions() {
        let packed = pack_mesh(&textured_triangle()).unwrap();
        // First normal is +Z, stored right after the nine position floats.
        assert_eq!(&packed.vertex_data[9..12], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn unindexed_mesh_has_no_index_data() {
        let packed = pack_mesh(&textured_triangle()).unwrap();
        assert!(packed.indices.is_none());
        assert_eq!(packed.vertex_count, 3);
    }

    #[test]
    fn indices_are_narrowed_to_u16() {
        let mut mesh = textured_triangle();
        mesh.indices = vec![2, 1, 0];
        let packed = pack_mesh(&mesh).unwrap();
        assert_eq!(packed.indices, Some(vec![2, 1, 0]));
        assert_eq!(packed.vertex_count, 3);
    }

    #[test]
    fn index_above_u16_max_is_rejected() {
        let mut mesh = Mesh::new(PrimitiveType::Points);
        mesh.positions = vec![Vec3::ZERO; 70_000];
        mesh.indices = vec![0, 65_536];
        assert_eq!(pack_mesh(&mesh), Err(SandboxError::IndexOverflow(65_536)));
    }

    #[test]
    fn invalid_mesh_is_rejected_before_packing() {
        let mut mesh = textured_triangle();
        mesh.vertex_colors = vec![Vec3::ONE];
        assert!(matches!(
            pack_mesh(&mesh),
            Err(SandboxError::MismatchedAttribute { attribute: "color", .. })
        ));
    }
}
