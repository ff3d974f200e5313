//! GLSL ES 3.00 sources shared by the built-in pipelines.
//!
//! The mesh pair reads the attributes produced by [`crate::layout`] and the
//! uniforms produced by [`crate::material::FrameUniforms`]. The screen-space
//! vertex shader expands the four `vertex_index` values of
//! [`crate::primitives::screen_quad`] into a full-screen triangle strip.

/// Vertex shader for meshes packed by [`crate::layout::pack_mesh`].
pub const MESH_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;
precision highp int;

in vec3 localPosition;
in vec3 localNormal;
in vec2 textureCoordinates;
in vec3 color;

uniform mat4 worldFromLocal;
uniform mat3 worldFromLocalNormal;
uniform mat4 projectionFromWorld;

out vec3 v_localPosition;
out vec3 v_worldNormal;
out vec2 v_textureCoordinates;
out vec3 v_color;

void main() {
    v_localPosition = localPosition;
    v_worldNormal = worldFromLocalNormal * localNormal;
    v_textureCoordinates = textureCoordinates;
    v_color = color;

    gl_PointSize = 3.0;
    gl_Position = projectionFromWorld * worldFromLocal * vec4(localPosition, 1.0);
}
"#;

/// Fragment shader selecting a base color by `coloring` and lighting it by `shading`.
pub const MESH_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;
precision highp int;

const int COLORING_POSITIONS = 0;
const int COLORING_NORMALS = 1;
const int COLORING_TEXTURE_COORDINATES = 2;
const int COLORING_VERTEX_COLORS = 3;
const int COLORING_UNIFORM_COLOR = 4;
const int COLORING_TEXTURE = 5;
const int COLORING_WHITE = 6;

const int SHADING_NONE = 0;
const int SHADING_LAMBERTIAN = 1;

in vec3 v_localPosition;
in vec3 v_worldNormal;
in vec2 v_textureCoordinates;
in vec3 v_color;

uniform int coloring;
uniform int shading;
uniform vec3 uniformColor;
uniform float opacity;
uniform sampler2D tex;

out vec4 fragColor;

void main() {
    vec3 base = vec3(1.0);
    // Meshes without normals leave localNormal disabled, which reads as zero.
    bool hasNormal = dot(v_worldNormal, v_worldNormal) > 0.0;

    if (coloring == COLORING_POSITIONS) {
        base = v_localPosition + 0.5;
    } else if (coloring == COLORING_NORMALS) {
        if (hasNormal) {
            base = normalize(v_worldNormal) * 0.5 + 0.5;
        }
    } else if (coloring == COLORING_TEXTURE_COORDINATES) {
        base = vec3(v_textureCoordinates, 1.0);
    } else if (coloring == COLORING_VERTEX_COLORS) {
        base = v_color;
    } else if (coloring == COLORING_UNIFORM_COLOR) {
        base = uniformColor;
    } else if (coloring == COLORING_TEXTURE) {
        base = texture(tex, v_textureCoordinates).rgb;
    }

    if (shading == SHADING_LAMBERTIAN && hasNormal) {
        vec3 toLight = normalize(vec3(1.0, 2.0, 3.0));
        float diffuse = max(dot(normalize(v_worldNormal), toLight), 0.0);
        base *= 0.2 + 0.8 * diffuse;
    }

    fragColor = vec4(base, opacity);
}
"#;

/// Vertex shader turning `vertex_index` 0..3 into a full-screen triangle strip.
pub const SCREENSPACE_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

in float vertex_index;

out vec2 v_uv;

void main() {
    float x = mod(vertex_index, 2.0);
    float y = floor(vertex_index / 2.0);
    v_uv = vec2(x, y);
    gl_Position = vec4(v_uv * 2.0 - 1.0, 0.0, 1.0);
}
"#;
