//! Command-line argument parsing for the heightmap viewer.

use std::path::PathBuf;

use clap::Parser;
use relief_terrain::ControlPoint;

use crate::Config;
use crate::error::ConfigError;

/// Relief command-line arguments.
///
/// CLI values override settings loaded from `relief.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "relief", about = "Chunked diamond-square heightmap generator")]
pub struct CliArgs {
    /// Random seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Chunk side is 2^exponent.
    #[arg(long)]
    pub chunk_exponent: Option<u32>,

    /// Displacement roughness R.
    #[arg(long, allow_negative_numbers = true)]
    pub roughness: Option<f64>,

    /// Height substituted for missing neighbors.
    #[arg(long, allow_negative_numbers = true)]
    pub outside_baseline: Option<f64>,

    /// Median filter window width.
    #[arg(long)]
    pub filter_window: Option<u32>,

    /// Image width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Horizontal pan offset in samples.
    #[arg(long, allow_negative_numbers = true)]
    pub offset_x: Option<i32>,

    /// Vertical pan offset in samples.
    #[arg(long, allow_negative_numbers = true)]
    pub offset_y: Option<i32>,

    /// Output PNG path.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Additional control point as `x,y,height` (repeatable).
    #[arg(long = "point", value_parser = parse_control_point, allow_hyphen_values = true)]
    pub points: Vec<ControlPoint>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Parses a control point written as `x,y,height`.
pub fn parse_control_point(s: &str) -> Result<ControlPoint, ConfigError> {
    let invalid = || ConfigError::InvalidControlPoint(s.to_string());
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, height] = parts.as_slice() else {
        return Err(invalid());
    };
    Ok(ControlPoint::new(
        x.parse().map_err(|_| invalid())?,
        y.parse().map_err(|_| invalid())?,
        height.parse().map_err(|_| invalid())?,
    ))
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.generator.seed = seed;
        }
        if let Some(exp) = args.chunk_exponent {
            self.generator.chunk_exponent = exp;
        }
        if let Some(r) = args.roughness {
            self.generator.roughness = r;
        }
        if let Some(base) = args.outside_baseline {
            self.generator.outside_baseline = base;
        }
        if let Some(w) = args.filter_window {
            self.generator.filter_window = w;
        }
        if let Some(w) = args.width {
            self.view.width = w;
        }
        if let Some(h) = args.height {
            self.view.height = h;
        }
        if let Some(x) = args.offset_x {
            self.view.offset_x = x;
        }
        if let Some(y) = args.offset_y {
            self.view.offset_y = y;
        }
        if let Some(ref out) = args.output {
            self.view.output = out.clone();
        }
        self.control_points.extend_from_slice(&args.points);
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
