#![deny(unsafe_code)]
//! CLI binary for the glsandbox graphics sandbox.
//!
//! Subcommands:
//! - `mesh [name]` -- build a primitive and print its packed layout
//! - `intersect --from x,y --to x,y` -- intersect a ray with a circle
//! - `camera` -- print orbit camera matrices and the ray-tracing basis
//! - `config` -- validate, print or write a sandbox configuration
//! - `list` -- print available primitives and primitive types

mod error;
mod logging;

use clap::{Parser, Subcommand};
use error::CliError;
use glam::{Mat4, Vec2, Vec3};
use glsandbox_core::camera::DRAG_DEGREES_PER_PIXEL;
use glsandbox_core::{
    intersect_circle, pack_mesh, primitives, OrbitCamera, PrimitiveType, Ray2, SandboxConfig,
};
use logging::{init_logging, LoggingConfig};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "glsandbox", about = "Graphics sandbox geometry and camera inspector")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Sandbox configuration file (JSON). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a primitive and print its packed vertex layout.
    Mesh {
        /// Primitive name (cube, plane, sphere, circle, triangle).
        /// Defaults to the configured primitive.
        name: Option<String>,

        /// Plane rows.
        #[arg(long)]
        rows: Option<u32>,

        /// Plane columns.
        #[arg(long)]
        columns: Option<u32>,

        /// Sphere vertical divisions.
        #[arg(long)]
        vertical: Option<u32>,

        /// Sphere horizontal divisions.
        #[arg(long)]
        horizontal: Option<u32>,

        /// Circle radius.
        #[arg(long)]
        radius: Option<f32>,

        /// Circle segments.
        #[arg(long)]
        segments: Option<u32>,
    },
    /// Intersect the ray from one point through another with a circle at the origin.
    Intersect {
        /// Ray origin as "x,y".
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: Vec2,

        /// Point the ray passes through, as "x,y".
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Vec2,

        /// Circle radius.
        #[arg(long, default_value_t = 2.0)]
        radius: f32,
    },
    /// Print the orbit camera's eye, view-projection and ray basis.
    Camera {
        /// Yaw in degrees.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        yaw: f32,

        /// Pitch in degrees (clamped to ±89.9).
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        pitch: f32,

        /// Orbit distance. Defaults to the configured distance.
        #[arg(long)]
        distance: Option<f32>,

        /// Viewport aspect ratio (width / height).
        #[arg(long, default_value_t = 1.0)]
        aspect: f32,
    },
    /// Validate and print the configuration, optionally writing it to a file.
    Config {
        /// Write the effective configuration to this path.
        #[arg(long)]
        write: Option<PathBuf>,
    },
    /// List available primitives and primitive types.
    List,
}

/// Parses "x,y" into a point.
fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got \"{s}\""))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|e| format!("invalid coordinate \"{}\": {e}", v.trim()))
    };
    Ok(Vec2::new(parse(x)?, parse(y)?))
}

/// Reads and validates the configuration at `path`, or returns defaults.
fn load_config(path: Option<&Path>) -> Result<SandboxConfig, CliError> {
    let Some(path) = path else {
        return Ok(SandboxConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("couldn't read {}: {e}", path.display())))?;
    let config = SandboxConfig::from_json(&text)?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

fn mat4_rows(m: &Mat4) -> [[f32; 4]; 4] {
    let t = m.transpose();
    [
        t.x_axis.to_array(),
        t.y_axis.to_array(),
        t.z_axis.to_array(),
        t.w_axis.to_array(),
    ]
}

struct MeshOverrides {
    rows: Option<u32>,
    columns: Option<u32>,
    vertical: Option<u32>,
    horizontal: Option<u32>,
    radius: Option<f32>,
    segments: Option<u32>,
}

fn mesh_report(
    config: &SandboxConfig,
    name: Option<&str>,
    overrides: &MeshOverrides,
) -> Result<serde_json::Value, CliError> {
    let name = name.unwrap_or(config.primitive.name.as_str());
    let mut params = config.primitive.params;
    params.rows = overrides.rows.unwrap_or(params.rows);
    params.columns = overrides.columns.unwrap_or(params.columns);
    params.vertical_divisions = overrides.vertical.unwrap_or(params.vertical_divisions);
    params.horizontal_divisions = overrides.horizontal.unwrap_or(params.horizontal_divisions);
    params.radius = overrides.radius.unwrap_or(params.radius);
    params.segments = overrides.segments.unwrap_or(params.segments);

    let mesh = primitives::from_name(name, &params)?;
    let packed = pack_mesh(&mesh)?;

    let (min, max) = mesh.positions.iter().fold(
        (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
        |(lo, hi), p| (lo.min(*p), hi.max(*p)),
    );
    let attributes: Vec<_> = packed
        .attributes
        .iter()
        .map(|a| json!({"name": a.name, "size": a.size, "offset": a.offset}))
        .collect();

    Ok(json!({
        "primitive": name,
        "primitive_type": packed.primitive_type.name(),
        "vertex_count": packed.vertex_count,
        "index_count": packed.indices.as_ref().map(Vec::len),
        "vertex_bytes": packed.vertex_bytes(),
        "attributes": attributes,
        "bounds": {"min": min.to_array(), "max": max.to_array()},
    }))
}

fn intersect_report(from: Vec2, to: Vec2, radius: f32) -> Result<serde_json::Value, CliError> {
    let ray = Ray2::through(from, to)
        .ok_or_else(|| CliError::Input("--from and --to must be different points".into()))?;
    let hits: Vec<[f32; 2]> = intersect_circle(&ray, radius)
        .into_iter()
        .map(|p| p.to_array())
        .collect();
    Ok(json!({
        "origin": from.to_array(),
        "direction": ray.direction.to_array(),
        "radius": radius,
        "hits": hits,
    }))
}

fn camera_report(
    config: &SandboxConfig,
    yaw_degrees: f32,
    pitch_degrees: f32,
    distance: Option<f32>,
    aspect: f32,
) -> Result<serde_json::Value, CliError> {
    if !(aspect.is_finite() && aspect > 0.0) {
        return Err(CliError::Input(format!("--aspect must be positive, got {aspect}")));
    }
    let distance = distance.unwrap_or(config.camera.orbit_distance);
    if !(distance.is_finite() && distance > 0.0) {
        return Err(CliError::Input(format!("--distance must be positive, got {distance}")));
    }
    let mut camera = OrbitCamera::new(distance);
    // Pitch goes through drag so it is clamped like interactive input.
    camera.drag(
        yaw_degrees / DRAG_DEGREES_PER_PIXEL,
        pitch_degrees / DRAG_DEGREES_PER_PIXEL,
    );
    let view_projection = camera.view_projection(aspect, &config.camera);
    let basis = camera.ray_basis(aspect, config.camera.fov_y_degrees.to_radians());

    Ok(json!({
        "yaw_degrees": camera.yaw.to_degrees(),
        "pitch_degrees": camera.pitch.to_degrees(),
        "distance": camera.distance,
        "eye": camera.eye().to_array(),
        "view_projection": mat4_rows(&view_projection),
        "ray_basis": {
            "right": basis.basis.x_axis.to_array(),
            "up": basis.basis.y_axis.to_array(),
            "look": basis.basis.z_axis.to_array(),
        },
    }))
}

fn print_text(value: &serde_json::Value) {
    if let Some(map) = value.as_object() {
        for (key, v) in map {
            println!("{key}: {v}");
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;

    let report = match cli.command {
        Command::List => {
            let primitives = primitives::list_primitives();
            let types = PrimitiveType::list_names();
            if cli.json {
                let info = json!({
                    "primitives": primitives,
                    "primitive_types": types,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Primitives:");
                for name in primitives {
                    println!("  {name}");
                }
                println!("Primitive types:");
                println!("  {}", types.join(", "));
            }
            return Ok(());
        }
        Command::Config { write } => {
            let text = config.to_json_pretty()?;
            if let Some(path) = &write {
                std::fs::write(path, &text)
                    .map_err(|e| CliError::Io(format!("couldn't write {}: {e}", path.display())))?;
                eprintln!("wrote config -> {}", path.display());
            }
            println!("{text}");
            return Ok(());
        }
        Command::Mesh {
            name,
            rows,
            columns,
            vertical,
            horizontal,
            radius,
            segments,
        } => mesh_report(
            &config,
            name.as_deref(),
            &MeshOverrides {
                rows,
                columns,
                vertical,
                horizontal,
                radius,
                segments,
            },
        )?,
        Command::Intersect { from, to, radius } => intersect_report(from, to, radius)?,
        Command::Camera {
            yaw,
            pitch,
            distance,
            aspect,
        } => camera_report(&config, yaw, pitch, distance, aspect)?,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(LoggingConfig::from_verbosity(cli.verbose));
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
