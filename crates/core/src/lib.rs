#![deny(unsafe_code)]
//! Core types for the glsandbox graphics sandbox.
//!
//! Provides `Mesh` geometry and the built-in primitives, planar vertex
//! packing (`PackedMesh`), typed uniforms, model/view/projection transforms,
//! the `OrbitCamera`, pointer drag tracking, the quadratic solver behind
//! ray/circle intersection, `Material` settings and the JSON `SandboxConfig`.
//! GPU wrappers (`Program`, `Buffer`, `Texture`, `Framebuffer`,
//! `VertexArray`, `Pipeline`) live in [`render`] behind the `render` feature.

pub mod camera;
pub mod config;
pub mod error;
pub mod input;
pub mod intersect;
pub mod layout;
pub mod material;
pub mod mesh;
pub mod primitives;
pub mod shaders;
pub mod transform;
pub mod uniform;

#[cfg(feature = "render")]
pub mod render;

pub use camera::{CameraConfig, OrbitCamera, RayBasis};
pub use config::{ContextConfig, PrimitiveConfig, SandboxConfig};
pub use error::SandboxError;
pub use input::{DragInput, DragTracker, Interactions};
pub use intersect::{intersect_circle, solve_quadratic, QuadraticRoots, Ray2};
pub use layout::{pack_mesh, AttributeLayout, PackedMesh};
pub use material::{Coloring, FrameUniforms, Material, Shading};
pub use mesh::{Mesh, PrimitiveType};
pub use primitives::PrimitiveParams;
pub use transform::Transform;
pub use uniform::{NamedUniform, UniformValue};
