//! Typed uniform values.
//!
//! A [`UniformValue`] is what a program setter uploads. The slice
//! constructors pick the GLSL type from the slice length, so callers holding
//! raw `[f32]`/`[i32]` data get a descriptive error instead of a silent
//! mismatch.

use glam::{IVec2, IVec3, IVec4, Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::error::SandboxError;

/// A value that can be bound to a GLSL uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    IVec2(IVec2),
    IVec3(IVec3),
    IVec4(IVec4),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat2(Mat2),
    Mat3(Mat3),
    Mat4(Mat4),
    /// Texture unit index for a `sampler2D`.
    Sampler(u32),
}

impl UniformValue {
    /// Builds an `int`/`ivecN` value from 1 to 4 integers.
    ///
    /// # Errors
    ///
    /// Returns `SandboxError::InvalidVectorLength` for any other length.
    pub fn ints(values: &[i32]) -> Result<Self, SandboxError> {
        match *values {
            [x] => Ok(Self::Int(x)),
            [x, y] => Ok(Self::IVec2(IVec2::new(x, y))),
            [x, y, z] => Ok(Self::IVec3(IVec3::new(x, y, z))),
            [x, y, z, w] => Ok(Self::IVec4(IVec4::new(x, y, z, w))),
            _ => Err(SandboxError::InvalidVectorLength {
                kind: "ivec",
                len: values.len(),
            }),
        }
    }

    /// Builds a `float`/`vecN` value from 1 to 4 floats.
    ///
    /// # Errors
    ///
    /// Returns `SandboxError::InvalidVectorLength` for any other length.
    pub fn floats(values: &[f32]) -> Result<Self, SandboxError> {
        match *values {
            [x] => Ok(Self::Float(x)),
            [x, y] => Ok(Self::Vec2(Vec2::new(x, y))),
            [x, y, z] => Ok(Self::Vec3(Vec3::new(x, y, z))),
            [x, y, z, w] => Ok(Self::Vec4(Vec4::new(x, y, z, w))),
            _ => Err(SandboxError::InvalidVectorLength {
                kind: "vec",
                len: values.len(),
            }),
        }
    }

    /// Builds a `matN` value from column-major data of 4, 9 or 16 floats.
    ///
    /// # Errors
    ///
    /// Returns `SandboxError::InvalidMatrixLength` for any other length.
    pub fn matrix(values: &[f32]) -> Result<Self, SandboxError> {
        match values.len() {
            4 => Ok(Self::Mat2(Mat2::from_cols_slice(values))),
            9 => Ok(Self::Mat3(Mat3::from_cols_slice(values))),
            16 => Ok(Self::Mat4(Mat4::from_cols_slice(values))),
            len => Err(SandboxError::InvalidMatrixLength(len)),
        }
    }

    /// GLSL type name this value binds to.
    pub fn glsl_type(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::IVec2(_) => "ivec2",
            Self::IVec3(_) => "ivec3",
            Self::IVec4(_) => "ivec4",
            Self::Float(_) => "float",
            Self::Vec2(_) => "vec2",
            Self::Vec3(_) => "vec3",
            Self::Vec4(_) => "vec4",
            Self::Mat2(_) => "mat2",
            Self::Mat3(_) => "mat3",
            Self::Mat4(_) => "mat4",
            Self::Sampler(_) => "sampler2D",
        }
    }
}

macro_rules! impl_from_uniform {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for UniformValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_uniform! {
    i32 => Int,
    IVec2 => IVec2,
    IVec3 => IVec3,
    IVec4 => IVec4,
    f32 => Float,
    Vec2 => Vec2,
    Vec3 => Vec3,
    Vec4 => Vec4,
    Mat2 => Mat2,
    Mat3 => Mat3,
    Mat4 => Mat4,
}

/// A uniform value paired with the name it is bound to.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedUniform {
    pub name: String,
    pub value: UniformValue,
}

impl NamedUniform {
    pub fn new(name: &str, value: impl Into<UniformValue>) -> Self {
        Self {
            name: name.to_owned(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ints_picks_type_from_length() {
        assert_eq!(UniformValue::ints(&[3]).unwrap(), UniformValue::Int(3));
        assert_eq!(
            UniformValue::ints(&[1, 2, 3]).unwrap(),
            UniformValue::IVec3(IVec3::new(1, 2, 3))
        );
    }

    #[test]
    fn ints_rejects_five_components() {
        let err = UniformValue::ints(&[0; 5]).unwrap_err();
        assert_eq!(err.to_string(), "GLSL ivec5 does not exist");
    }

    #[test]
    fn floats_rejects_empty_slice() {
        let err = UniformValue::floats(&[]).unwrap_err();
        assert_eq!(err.to_string(), "GLSL vec0 does not exist");
    }

    #[test]
    fn floats_builds_vec4() {
        let v = UniformValue::floats(&[1.0, 0.85, 0.7, 1.0]).unwrap();
        assert_eq!(v, UniformValue::Vec4(Vec4::new(1.0, 0.85, 0.7, 1.0)));
        assert_eq!(v.glsl_type(), "vec4");
    }

    #[test]
    fn matrix_reads_column_major_data() {
        let identity = Mat3::IDENTITY.to_cols_array();
        assert_eq!(
            UniformValue::matrix(&identity).unwrap(),
            UniformValue::Mat3(Mat3::IDENTITY)
        );

        let translation = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        match UniformValue::matrix(&translation.to_cols_array()).unwrap() {
            UniformValue::Mat4(m) => assert_eq!(m.w_axis, Vec4::new(1.0, 2.0, 3.0, 1.0)),
            other => panic!("expected mat4, got {other:?}"),
        }
    }

    #[test]
    fn matrix_rejects_odd_sizes() {
        assert_eq!(
            UniformValue::matrix(&[0.0; 6]),
            Err(SandboxError::InvalidMatrixLength(6))
        );
    }

    #[test]
    fn from_impls_cover_glam_types() {
        assert_eq!(UniformValue::from(Vec2::ONE).glsl_type(), "vec2");
        assert_eq!(UniformValue::from(Mat4::IDENTITY).glsl_type(), "mat4");
        assert_eq!(UniformValue::from(7).glsl_type(), "int");
        assert_eq!(UniformValue::Sampler(0).glsl_type(), "sampler2D");
    }

    #[test]
    fn named_uniform_converts_value() {
        let u = NamedUniform::new("opacity", 0.5_f32);
        assert_eq!(u.name, "opacity");
        assert_eq!(u.value, UniformValue::Float(0.5));
    }
}
