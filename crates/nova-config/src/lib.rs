//! Configuration system for NOVA.
//!
//! Surface, field, motion and loop settings persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod color;
mod config;
mod error;

pub use cli::CliArgs;
pub use color::{parse_hex_color, parse_palette};
pub use config::{
    Config, DebugConfig, MotionConfig, PlanetsConfig, RenderLoopConfig, SkyConfig,
    StarFieldConfig, SurfaceConfig, default_config_dir,
};
pub use error::ConfigError;
