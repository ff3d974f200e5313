//! Failures of `glsandbox` subcommands and the exit code each one maps to.
//!
//! | code | cause |
//! |------|-------|
//! | 2    | argument parsing (reported by clap) |
//! | 10   | mesh or config rejected by `glsandbox-core` |
//! | 11   | config file could not be read or written |
//! | 12   | flag values that make no geometric sense |
//! | 13   | report could not be rendered as JSON |

use glsandbox_core::SandboxError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// `glsandbox-core` rejected the requested primitive or configuration.
    Sandbox(SandboxError),
    /// Reading `--config` or writing `config --write` failed.
    Io(String),
    /// A flag value is degenerate: coincident ray points, a zero aspect or
    /// orbit distance.
    Input(String),
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Sandbox(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Sandbox(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) => f.write_str(msg),
            CliError::Serialization(msg) => write!(f, "couldn't encode report: {msg}"),
        }
    }
}

// Core I/O failures come from config files, so they share the I/O exit code.
impl From<SandboxError> for CliError {
    fn from(e: SandboxError) -> Self {
        match e {
            SandboxError::Io(msg) => CliError::Io(msg),
            other => CliError::Sandbox(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_failure_kind_has_its_own_exit_code() {
        let codes = [
            CliError::Sandbox(SandboxError::InvalidDimensions).exit_code(),
            CliError::Io("couldn't read sandbox.json".into()).exit_code(),
            CliError::Input("--aspect must be positive, got 0".into()).exit_code(),
            CliError::Serialization("key must be a string".into()).exit_code(),
        ];
        assert_eq!(codes, [10, 11, 12, 13]);
    }

    #[test]
    fn unknown_primitive_keeps_core_message() {
        let err = CliError::from(SandboxError::UnknownPrimitive("teapot".into()));
        assert_eq!(err.exit_code(), 10);
        assert_eq!(err.to_string(), SandboxError::UnknownPrimitive("teapot".into()).to_string());
    }

    #[test]
    fn config_file_failure_is_io() {
        let err = CliError::from(SandboxError::Io("sandbox.json: permission denied".into()));
        assert_eq!(err.exit_code(), 11);
        assert_eq!(err.to_string(), "sandbox.json: permission denied");
    }

    #[test]
    fn invalid_config_value_is_sandbox_failure() {
        let err = CliError::from(SandboxError::InvalidConfig("material.opacity must be in [0, 1]".into()));
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("material.opacity"), "got: {err}");
    }

    #[test]
    fn json_failure_names_the_report() {
        let Err(e) = serde_json::from_str::<serde_json::Value>("{\"hits\": [") else {
            panic!("expected truncated JSON to fail");
        };
        let err = CliError::from(e);
        assert_eq!(err.exit_code(), 13);
        assert!(err.to_string().starts_with("couldn't encode report"), "got: {err}");
    }
}
