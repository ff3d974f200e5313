//! Material settings and the per-frame uniform set of the mesh shader.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::mesh::Mesh;
use crate::transform::normal_matrix;
use crate::uniform::NamedUniform;

/// Where the fragment's base color comes from.
///
/// The discriminants are the integer codes the mesh fragment shader switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Coloring {
    Positions = 0,
    Normals = 1,
    TextureCoordinates = 2,
    VertexColors = 3,
    #[default]
    UniformColor = 4,
    Texture = 5,
    White = 6,
}

/// Lighting model applied on top of the base color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Shading {
    None = 0,
    #[default]
    Lambertian = 1,
}

impl Coloring {
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Whether this coloring samples the pipeline texture.
    pub fn needs_texture(self) -> bool {
        self == Self::Texture
    }
}

impl Shading {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Surface appearance of the meshes drawn by one pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub coloring: Coloring,
    pub shading: Shading,
    pub uniform_color: Vec3,
    pub opacity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            coloring: Coloring::default(),
            shading: Shading::default(),
            uniform_color: Vec3::new(1.0, 0.85, 0.7),
            opacity: 1.0,
        }
    }
}

impl Material {
    /// The material as it can be drawn on `mesh`.
    ///
    /// Lighting and normal coloring need per-vertex normals; on meshes
    /// without them shading is dropped and normal coloring becomes white.
    pub fn for_mesh(self, mesh: &Mesh) -> Self {
        if !mesh.normals.is_empty() {
            return self;
        }
        let coloring = match self.coloring {
            Coloring::Normals => Coloring::White,
            other => other,
        };
        Self {
            coloring,
            shading: Shading::None,
            ..self
        }
    }
}

/// Everything the mesh shader reads per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub world_from_local: Mat4,
    pub projection_from_world: Mat4,
    pub material: Material,
}

impl FrameUniforms {
    /// Uniform list in upload order, named as declared in the mesh shaders.
    pub fn to_named(&self) -> Vec<NamedUniform> {
        vec![
            NamedUniform::new("worldFromLocal", self.world_from_local),
            NamedUniform::new("worldFromLocalNormal", normal_matrix(&self.world_from_local)),
            NamedUniform::new("projectionFromWorld", self.projection_from_world),
            NamedUniform::new("coloring", self.material.coloring.code()),
            NamedUniform::new("shading", self.material.shading.code()),
            NamedUniform::new("uniformColor", self.material.uniform_color),
            NamedUniform::new("opacity", self.material.opacity),
        ]
    }
}
