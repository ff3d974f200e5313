//! Shader stages and linked programs.
//!
//! [`Shader`] and [`Program`] own their GL handles and must be released with
//! `destroy` on the context that created them. Compile and link failures
//! carry the driver log, with the offending source numbered line by line via
//! [`format_shader_error`].

use thiserror::Error;

use super::texture::Texture;
use crate::uniform::UniformValue;

/// Errors that can occur during shader compilation or program linking.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    /// A shader stage failed to compile.
    #[error("shader compile error ({stage}):\n{log}")]
    CompileError {
        /// The shader stage that failed (e.g. "vertex", "fragment").
        stage: String,
        /// The driver's info log describing the error.
        log: String,
    },
    /// A program failed to link.
    #[error("shader link error:\n{0}")]
    LinkError(String),
    /// A shader was passed where the other stage was expected.
    #[error("expected a {expected} shader, got a {got} shader")]
    StageMismatch {
        expected: ShaderStage,
        got: ShaderStage,
    },
}

/// Programmable pipeline stage of a [`Shader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// GL enum passed to `glCreateShader`.
    pub fn gl_type(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Numbers each line of `source` and appends the driver `log`.
///
/// Driver logs cite GLSL line numbers, so the numbered listing is what makes
/// a compile failure readable. Numbers are right-aligned to the widest one.
pub fn format_shader_error(source: &str, log: &str) -> String {
    let width = source.lines().count().max(1).to_string().len();
    let mut out = String::new();
    for (i, line) in source.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{:>width$}: {line}", i + 1));
    }
    if !log.is_empty() {
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(log);
    }
    out
}

/// A compiled shader stage.
#[derive(Debug)]
pub struct Shader {
    handle: glow::Shader,
    stage: ShaderStage,
}

impl Shader {
    /// Compiles `source` for `stage`.
    ///
    /// # Errors
    ///
    /// Returns `ShaderError::CompileError` with the numbered source and the
    /// driver's info log if the GLSL fails to compile.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context, stage: ShaderStage, source: &str) -> Result<Self, ShaderError> {
        use glow::HasContext;

        // SAFETY: glow wraps raw GL calls as unsafe. We pass a valid stage
        // constant and delete the handle on the failure path.
        let handle = unsafe {
            gl.create_shader(stage.gl_type())
                .map_err(|e| ShaderError::CompileError {
                    stage: stage.name().to_string(),
                    log: e,
                })?
        };

        unsafe {
            gl.shader_source(handle, source);
            gl.compile_shader(handle);
        }

        let compiled = unsafe { gl.get_shader_compile_status(handle) };

        if compiled {
            log::debug!("compiled {stage} shader ({} lines)", source.lines().count());
            Ok(Self { handle, stage })
        } else {
            let info_log = unsafe { gl.get_shader_info_log(handle) };
            unsafe { gl.delete_shader(handle) };
            Err(ShaderError::CompileError {
                stage: stage.name().to_string(),
                log: format_shader_error(source, &info_log),
            })
        }
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Deletes the shader object. Programs already linked against it keep working.
    #[allow(unsafe_code)]
    pub fn destroy(self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.handle is a valid shader from new(); consuming self
        // prevents reuse after deletion.
        unsafe { gl.delete_shader(self.handle) };
    }
}

/// A linked vertex + fragment program.
#[derive(Debug)]
pub struct Program {
    handle: glow::Program,
}

impl Program {
    /// Links `vertex` and `fragment` into a program.
    ///
    /// Both shaders are detached after linking; the caller still owns them.
    ///
    /// # Errors
    ///
    /// Returns `ShaderError::StageMismatch` if the shaders are swapped, or
    /// `ShaderError::LinkError` with the driver's info log if linking fails.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context, vertex: &Shader, fragment: &Shader) -> Result<Self, ShaderError> {
        use glow::HasContext;

        for (shader, expected) in [(vertex, ShaderStage::Vertex), (fragment, ShaderStage::Fragment)] {
            if shader.stage != expected {
                return Err(ShaderError::StageMismatch {
                    expected,
                    got: shader.stage,
                });
            }
        }

        // SAFETY: glow wraps raw GL calls as unsafe. We pass valid shader/program
        // handles obtained from prior glow calls. Resources are cleaned up on error.
        let handle = unsafe { gl.create_program().map_err(ShaderError::LinkError)? };

        unsafe {
            gl.attach_shader(handle, vertex.handle);
            gl.attach_shader(handle, fragment.handle);
            gl.link_program(handle);

            // Detach shaders regardless of link success -- the program owns copies.
            gl.detach_shader(handle, vertex.handle);
            gl.detach_shader(handle, fragment.handle);
        }

        let linked = unsafe { gl.get_program_link_status(handle) };

        if linked {
            Ok(Self { handle })
        } else {
            let info_log = unsafe { gl.get_program_info_log(handle) };
            unsafe { gl.delete_program(handle) };
            Err(ShaderError::LinkError(info_log))
        }
    }

    /// Compiles both stages and links them. The intermediate shaders are
    /// deleted whether or not linking succeeds.
    ///
    /// # Errors
    ///
    /// Returns `ShaderError::CompileError` if either shader fails to compile,
    /// or `ShaderError::LinkError` if linking fails.
    pub fn from_sources(
        gl: &glow::Context,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, ShaderError> {
        let vertex = Shader::new(gl, ShaderStage::Vertex, vertex_src)?;
        let fragment = match Shader::new(gl, ShaderStage::Fragment, fragment_src) {
            Ok(f) => f,
            Err(e) => {
                vertex.destroy(gl);
                return Err(e);
            }
        };

        let result = Self::new(gl, &vertex, &fragment);
        vertex.destroy(gl);
        fragment.destroy(gl);
        result
    }

    pub fn handle(&self) -> glow::Program {
        self.handle
    }

    /// Makes this the current program.
    #[allow(unsafe_code)]
    pub fn bind(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.handle is a valid linked program.
        unsafe { gl.use_program(Some(self.handle)) };
    }

    #[allow(unsafe_code)]
    pub fn unbind(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: clearing the current program is always valid.
        unsafe { gl.use_program(None) };
    }

    /// Runs `f` with this program current, then clears the binding.
    pub fn scope<R>(&self, gl: &glow::Context, f: impl FnOnce() -> R) -> R {
        self.bind(gl);
        let result = f();
        self.unbind(gl);
        result
    }

    /// Location of an active vertex attribute.
    #[allow(unsafe_code)]
    pub fn attribute_location(&self, gl: &glow::Context, name: &str) -> Option<u32> {
        use glow::HasContext;

        // SAFETY: self.handle is a valid linked program.
        unsafe { gl.get_attrib_location(self.handle, name) }
    }

    /// Uploads `value` to the uniform `name` of this program, which must be current.
    ///
    /// Returns `false` and logs a warning when the program has no active
    /// uniform of that name (the GLSL compiler strips unused uniforms).
    #[allow(unsafe_code)]
    pub fn set_uniform(&self, gl: &glow::Context, name: &str, value: &UniformValue) -> bool {
        use glow::HasContext;

        // SAFETY: self.handle is a valid linked program; the location is
        // only used with the program it was queried from.
        let Some(location) = (unsafe { gl.get_uniform_location(self.handle, name) }) else {
            log::warn!("couldn't find uniform location for: {name}");
            return false;
        };
        let loc = Some(&location);

        // SAFETY: each setter matches the GLSL type carried by the value.
        unsafe {
            match *value {
                UniformValue::Int(x) => gl.uniform_1_i32(loc, x),
                UniformValue::IVec2(v) => gl.uniform_2_i32(loc, v.x, v.y),
                UniformValue::IVec3(v) => gl.uniform_3_i32(loc, v.x, v.y, v.z),
                UniformValue::IVec4(v) => gl.uniform_4_i32(loc, v.x, v.y, v.z, v.w),
                UniformValue::Float(x) => gl.uniform_1_f32(loc, x),
                UniformValue::Vec2(v) => gl.uniform_2_f32(loc, v.x, v.y),
                UniformValue::Vec3(v) => gl.uniform_3_f32(loc, v.x, v.y, v.z),
                UniformValue::Vec4(v) => gl.uniform_4_f32(loc, v.x, v.y, v.z, v.w),
                UniformValue::Mat2(m) => {
                    gl.uniform_matrix_2_f32_slice(loc, false, &m.to_cols_array())
                }
                UniformValue::Mat3(m) => {
                    gl.uniform_matrix_3_f32_slice(loc, false, &m.to_cols_array())
                }
                UniformValue::Mat4(m) => {
                    gl.uniform_matrix_4_f32_slice(loc, false, &m.to_cols_array())
                }
                UniformValue::Sampler(unit) => gl.uniform_1_i32(loc, unit as i32),
            }
        }
        true
    }

    /// Binds `texture` to texture unit `unit` and points the sampler `name` at it.
    #[allow(unsafe_code)]
    pub fn set_texture(&self, gl: &glow::Context, name: &str, texture: &Texture, unit: u32) -> bool {
        use glow::HasContext;

        // SAFETY: TEXTURE0 + unit stays within the GL enum range for the
        // small unit counts used here.
        unsafe { gl.active_texture(glow::TEXTURE0 + unit) };
        texture.bind(gl);
        self.set_uniform(gl, name, &UniformValue::Sampler(unit))
    }

    /// Deletes the program object.
    #[allow(unsafe_code)]
    pub fn destroy(self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.handle is a valid program; consuming self prevents reuse.
        unsafe { gl.delete_program(self.handle) };
    }
}
