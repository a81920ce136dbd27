//! Scene construction errors.

use nova_config::ConfigError;
use nova_planet::MAX_SEGMENTS;

/// Errors raised while turning configuration into a scene.
#[derive(Debug, thiserror::Error)]
pub enum UniverseError {
    /// A configured value could not be parsed.
    #[error("invalid scene configuration: {0}")]
    Config(#[from] ConfigError),

    /// Sphere segment counts outside the supported tessellation range.
    #[error(
        "surface needs between 3x2 and {max}x{max} segments, got {width}x{height}",
        max = MAX_SEGMENTS
    )]
    Segments { width: u32, height: u32 },
}
