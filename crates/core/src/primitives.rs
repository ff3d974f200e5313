//! Procedural primitives: cube, plane, sphere point cloud, circle outline,
//! the single triangle and the attribute-less screen quad.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::SandboxError;
use crate::layout::{AttributeLayout, PackedMesh};
use crate::mesh::{Mesh, PrimitiveType};

/// Attribute name read by the screen-space vertex shader.
pub const VERTEX_INDEX_ATTRIBUTE: &str = "vertex_index";

/// Names accepted by [`from_name`].
const PRIMITIVE_NAMES: &[&str] = &["cube", "plane", "sphere", "circle", "triangle"];

/// Tunables for the parameterised primitives.
///
/// Only the fields relevant to the requested primitive are read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimitiveParams {
    pub rows: u32,
    pub columns: u32,
    pub vertical_divisions: u32,
    pub horizontal_divisions: u32,
    pub radius: f32,
    pub segments: u32,
}

impl Default for PrimitiveParams {
    fn default() -> Self {
        Self {
            rows: 1,
            columns: 1,
            vertical_divisions: 10,
            horizontal_divisions: 10,
            radius: 2.0,
            segments: 100,
        }
    }
}

/// Builds a primitive by name.
///
/// # Errors
///
/// Returns `SandboxError::UnknownPrimitive` for unrecognized names and
/// `SandboxError::InvalidDimensions` for zero subdivisions.
pub fn from_name(name: &str, params: &PrimitiveParams) -> Result<Mesh, SandboxError> {
    match name {
        "cube" => Ok(cube()),
        "plane" => plane(params.rows, params.columns),
        "sphere" => sphere(params.vertical_divisions, params.horizontal_divisions),
        "circle" => circle(params.radius, params.segments),
        "triangle" => Ok(triangle()),
        _ => Err(SandboxError::UnknownPrimitive(name.to_string())),
    }
}

/// Returns the names accepted by [`from_name`].
pub fn list_primitives() -> &'static [&'static str] {
    PRIMITIVE_NAMES
}

/// Unit cube centred on the origin with flat per-face normals.
///
/// Four vertices per face so each face carries its own normal and texture
/// coordinates. Faces are ordered +Z, -Z, +X, -X, -Y, +Y.
pub fn cube() -> Mesh {
    //      G ________ H
    //       /|      /|
    //    F /_|____E/ |
    //     |  |B___|__|C
    //     | /     | /
    //     |/______|/
    //     A       D
    let a = Vec3::new(-0.5, -0.5, 0.5);
    let b = Vec3::new(-0.5, -0.5, -0.5);
    let c = Vec3::new(0.5, -0.5, -0.5);
    let d = Vec3::new(0.5, -0.5, 0.5);
    let e = Vec3::new(0.5, 0.5, 0.5);
    let f = Vec3::new(-0.5, 0.5, 0.5);
    let g = Vec3::new(-0.5, 0.5, -0.5);
    let h = Vec3::new(0.5, 0.5, -0.5);

    let faces: [([Vec3; 4], Vec3); 6] = [
        ([a, d, f, e], Vec3::Z),
        ([c, b, h, g], Vec3::NEG_Z),
        ([d, c, e, h], Vec3::X),
        ([b, a, g, f], Vec3::NEG_X),
        ([b, c, a, d], Vec3::NEG_Y),
        ([f, e, g, h], Vec3::Y),
    ];

    let mut mesh = Mesh::new(PrimitiveType::Triangles);
    for (i, (corners, normal)) in faces.iter().enumerate() {
        mesh.positions.extend_from_slice(corners);
        mesh.normals.extend_from_slice(&[*normal; 4]);
        mesh.texture_coordinates.extend_from_slice(&[
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
        ]);

        let offset = (i * 4) as u32;
        mesh.indices.extend_from_slice(&[
            offset,
            offset + 1,
            offset + 2,
            offset + 2,
            offset + 1,
            offset + 3,
        ]);
    }
    mesh
}

/// Subdivided unit plane in the XY plane, facing +Z.
///
/// # Errors
///
/// Returns `SandboxError::InvalidDimensions` if `rows` or `columns` is zero.
pub fn plane(rows: u32, columns: u32) -> Result<Mesh, SandboxError> {
    if rows == 0 || columns == 0 {
        return Err(SandboxError::InvalidDimensions);
    }

    let mut mesh = Mesh::new(PrimitiveType::Triangles);

    for yi in 0..=rows {
        let y = yi as f32 / rows as f32;
        for xi in 0..=columns {
            let x = xi as f32 / columns as f32;
            mesh.positions.push(Vec3::new(x - 0.5, y - 0.5, 0.0));
            mesh.texture_coordinates.push(Vec2::new(x, 1.0 - y));
        }
    }

    mesh.normals = vec![Vec3::Z; mesh.positions.len()];

    let stride = columns + 1;
    for yi in 0..rows {
        for xi in 0..columns {
            let bottom_left = yi * stride + xi;
            let bottom_right = bottom_left + 1;
            let top_left = bottom_left + stride;
            let top_right = top_left + 1;

            mesh.indices
                .extend_from_slice(&[bottom_left, bottom_right, top_left]);
            mesh.indices
                .extend_from_slice(&[top_right, top_left, bottom_right]);
        }
    }

    Ok(mesh)
}

/// Unit sphere sampled as a point cloud.
///
/// Produces `horizontal * (vertical + 1)` points; the poles are repeated for
/// every horizontal slice.
///
/// # Errors
///
/// Returns `SandboxError::InvalidDimensions` if either division count is zero.
pub fn sphere(vertical: u32, horizontal: u32) -> Result<Mesh, SandboxError> {
    if vertical == 0 || horizontal == 0 {
        return Err(SandboxError::InvalidDimensions);
    }

    let mut mesh = Mesh::new(PrimitiveType::Points);
    for hi in 0..horizontal {
        let phi = (hi as f32 / horizontal as f32) * PI * 2.0;
        for vi in 0..=vertical {
            let theta = (vi as f32 / vertical as f32) * PI;
            mesh.positions.push(Vec3::new(
                theta.sin() * phi.cos(),
                theta.sin() * phi.sin(),
                theta.cos(),
            ));
        }
    }
    Ok(mesh)
}

/// Circle outline of `radius` in the XY plane, drawn as a closed line strip.
///
/// The first point is repeated at the end, giving `segments + 1` points.
///
/// # Errors
///
/// Returns `SandboxError::InvalidDimensions` if `segments` is zero.
pub fn circle(radius: f32, segments: u32) -> Result<Mesh, SandboxError> {
    if segments == 0 {
        return Err(SandboxError::InvalidDimensions);
    }

    let step = 2.0 * PI / segments as f32;
    let mut mesh = Mesh::new(PrimitiveType::LineStrip);
    mesh.positions = (0..=segments)
        .map(|i| {
            let a = step * i as f32;
            Vec3::new(a.cos() * radius, a.sin() * radius, 0.0)
        })
        .collect();
    Ok(mesh)
}

/// A single counter-clockwise triangle in clip space.
pub fn triangle() -> Mesh {
    let mut mesh = Mesh::new(PrimitiveType::Triangles);
    mesh.positions = vec![
        Vec3::new(-0.5, -0.5, 0.0),
        Vec3::new(0.5, -0.5, 0.0),
        Vec3::new(0.0, 0.5, 0.0),
    ];
    mesh
}

/// Four scalar vertex indices drawn as a triangle strip.
///
/// The screen-space vertex shader turns `vertex_index` into the corners of a
/// full-screen quad, so no positions are uploaded.
pub fn screen_quad() -> PackedMesh {
    PackedMesh {
        vertex_data: vec![0.0, 1.0, 2.0, 3.0],
        attributes: vec![AttributeLayout::new(VERTEX_INDEX_ATTRIBUTE, 1, 0)],
        indices: None,
        vertex_count: 4,
        primitive_type: PrimitiveType::TriangleStrip,
    }
}
