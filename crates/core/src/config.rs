//! Sandbox configuration loaded from JSON.
//!
//! Every field has a default, so `{}` is a valid configuration. Values are
//! checked by [`SandboxConfig::validate`] rather than during parsing so that
//! all problems are reported with the offending field name.

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::camera::CameraConfig;
use crate::error::SandboxError;
use crate::material::Material;
use crate::primitives::{self, PrimitiveParams};

/// GPU context options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    pub antialias: bool,
    pub clear_color: Vec4,
    /// Render closer fragments on top of farther ones.
    pub depth_test: bool,
    /// Skip back-facing triangles.
    pub cull_face: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            antialias: true,
            clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            depth_test: true,
            cull_face: true,
        }
    }
}

/// Which primitive the sandbox loads and how it is subdivided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimitiveConfig {
    pub name: String,
    #[serde(flatten)]
    pub params: PrimitiveParams,
}

impl Default for PrimitiveConfig {
    fn default() -> Self {
        Self {
            name: "cube".to_string(),
            params: PrimitiveParams::default(),
        }
    }
}

/// Top-level sandbox configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub context: ContextConfig,
    pub camera: CameraConfig,
    pub material: Material,
    pub primitive: PrimitiveConfig,
}

impl SandboxConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `SandboxError::InvalidConfig` for malformed JSON or
    /// out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, SandboxError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SandboxError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SandboxError> {
        serde_json::to_string_pretty(self).map_err(|e| SandboxError::InvalidConfig(e.to_string()))
    }

    /// Checks value ranges of every section, including primitive params.
    ///
    /// # Errors
    ///
    /// Returns `SandboxError::InvalidConfig` naming the first bad field, or
    /// `SandboxError::UnknownPrimitive` for an unrecognized primitive name.
    pub fn validate(&self) -> Result<(), SandboxError> {
        let camera = &self.camera;
        if !(camera.orbit_distance.is_finite() && camera.orbit_distance > 0.0) {
            return Err(invalid("camera.orbit_distance must be positive"));
        }
        if !(camera.fov_y_degrees > 0.0 && camera.fov_y_degrees < 180.0) {
            return Err(invalid("camera.fov_y_degrees must be in (0, 180)"));
        }
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(invalid("camera.near must be positive and less than camera.far"));
        }
        if !(0.0..=1.0).contains(&self.material.opacity) {
            return Err(invalid("material.opacity must be in [0, 1]"));
        }
        if !self
            .context
            .clear_color
            .to_array()
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
        {
            return Err(invalid("context.clear_color components must be in [0, 1]"));
        }
        if !primitives::list_primitives().contains(&self.primitive.name.as_str()) {
            return Err(SandboxError::UnknownPrimitive(self.primitive.name.clone()));
        }
        let params = &self.primitive.params;
        for (field, count) in [
            ("rows", params.rows),
            ("columns", params.columns),
            ("vertical_divisions", params.vertical_divisions),
            ("horizontal_divisions", params.horizontal_divisions),
            ("segments", params.segments),
        ] {
            if count == 0 {
                return Err(invalid(&format!("primitive.{field} must be at least 1")));
            }
        }
        if !(params.radius.is_finite() && params.radius > 0.0) {
            return Err(invalid("primitive.radius must be positive"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> SandboxError {
    SandboxError::InvalidConfig(msg.to_string())
}
