//! Heightmap viewer: generates a diamond-square height field and writes it as a PNG.
//!
//! Configuration is loaded from `relief.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p relief-viewer -- --seed 7 --width 800 --height 600`.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use glam::IVec2;
use relief_config::{CliArgs, Config};
use relief_terrain::{Color, ColorScale, Engine};
use relief_viewer::Canvas;
use tracing::info;

fn main() {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(Config::default_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    relief_log::init_logging(Some(&log_dir), config.debug.log_to_file, Some(&config));

    if let Err(e) = run(&config) {
        tracing::error!("heightmap generation failed: {e}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    let params = config.generator.to_params()?;
    info!(
        chunk_size = params.chunk_size,
        seed = params.seed,
        roughness = params.roughness,
        control_points = config.control_points.len(),
        "Starting relief viewer"
    );

    let mut engine = Engine::new(params, &config.control_points)?;
    if config.generator.pregenerate_extent > 0 {
        engine.pregenerate(config.generator.pregenerate_extent);
    }

    let view = &config.view;
    let background = Color::parse(&view.background)?;
    let mut canvas = Canvas::new(view.width, view.height);
    canvas.set_offset(IVec2::new(view.offset_x, view.offset_y));
    canvas.clear(background);

    let scale = ColorScale::terrain_default();
    let stats = engine.draw(&mut canvas, &scale);
    if view.legend {
        canvas.draw_legend(&scale);
    }

    canvas.save(&view.output)?;

    if let Some((min, max)) = engine.extremes() {
        info!(min, max, "Height range");
    }
    info!(
        points = stats.points_drawn,
        chunks = engine.generated_chunks(),
        output = %view.output.display(),
        "Heightmap written"
    );
    Ok(())
}
