//! Headless NOVA driver.
//!
//! Builds the universe from `config.ron` plus CLI overrides, runs it for a
//! fixed number of simulated 60 Hz refreshes, logs group angles and tears it
//! down again.
//!
//! Run with: `cargo run -p nova-app -- --frames 300`

mod headless;

use std::process::ExitCode;

use clap::Parser;
use nova_animation::ManualRefreshHost;
use nova_config::{CliArgs, Config, default_config_dir};
use nova_universe::Universe;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone().map_or_else(default_config_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to resolve config directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    nova_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    info!("NOVA universe");
    info!(
        "Surface: radius={}, segments={}x{}, threshold={}",
        config.surface.base_radius,
        config.surface.width_segments,
        config.surface.height_segments,
        config.surface.threshold
    );

    let mut universe = match Universe::build(&config) {
        Ok(universe) => universe,
        Err(e) => {
            error!("Failed to build universe: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut host = ManualRefreshHost::new();
    let summary = headless::run_frames(
        &mut universe,
        &mut host,
        config.render_loop.frames,
        config.render_loop.refresh_rate_hz,
    );
    info!(
        frames = summary.frames,
        seconds = summary.simulated_seconds,
        planet = summary.planet_angle,
        starfield = summary.starfield_angle,
        ring = summary.ring_angle,
        "run finished"
    );

    universe.teardown(&mut host);
    info!("Universe torn down");
    ExitCode::SUCCESS
}
