//! Command-line argument parsing for the `nova` driver.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// NOVA command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "nova", about = "NOVA procedural universe")]
pub struct CliArgs {
    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Frames to run before tearing down.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Number of stars in the star box.
    #[arg(long)]
    pub star_count: Option<usize>,

    /// Land/sea threshold of the planet surface.
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Seed for both particle fields.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(frames) = args.frames {
            self.render_loop.frames = frames;
        }
        if let Some(count) = args.star_count {
            self.starfield.count = count;
        }
        if let Some(threshold) = args.threshold {
            self.surface.threshold = threshold;
        }
        if let Some(seed) = args.seed {
            self.starfield.seed = Some(seed);
            // The sky draws from its own stream.
            self.sky.seed = Some(seed.wrapping_add(1));
        }
    }
}
