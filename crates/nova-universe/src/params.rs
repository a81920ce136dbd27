//! Configuration to build-parameter conversion.

use glam::Vec3;
use nova_config::{Config, SkyConfig, StarFieldConfig, SurfaceConfig};
use nova_planet::{MAX_SEGMENTS, SurfaceStyle};
use nova_space::{FieldBounds, FieldStyle};
use nova_terrain::TerrainParams;

use crate::error::UniverseError;

pub fn surface_style(config: &SurfaceConfig) -> Result<SurfaceStyle, UniverseError> {
    Ok(SurfaceStyle {
        base_radius: config.base_radius,
        threshold: config.threshold,
        land_gain: config.land_gain,
        sea_offset: config.sea_offset,
        land_color: config.land_rgb()?,
        sea_color: config.sea_rgb()?,
    })
}

/// Default octaves with the configured polar bias.
pub fn terrain_params(config: &SurfaceConfig) -> TerrainParams {
    TerrainParams {
        polar_weight: config.polar_weight,
        polar_exponent: config.polar_exponent,
        ..TerrainParams::default()
    }
}

pub fn star_bounds(config: &StarFieldConfig) -> FieldBounds {
    FieldBounds::Box {
        half_extents: Vec3::from_array(config.half_extents).abs(),
    }
}

pub fn star_style(config: &StarFieldConfig) -> Result<FieldStyle, UniverseError> {
    Ok(FieldStyle::uniform(config.min_size, config.max_size)
        .with_palette(config.palette_rgb()?)
        .with_emissive(config.emissive))
}

pub fn sky_bounds(config: &SkyConfig) -> FieldBounds {
    FieldBounds::shell(config.radius, config.depth)
}

pub fn sky_style(config: &SkyConfig) -> Result<FieldStyle, UniverseError> {
    Ok(FieldStyle::uniform(config.min_size, config.max_size)
        .with_base_color(config.color_rgb()?)
        .with_emissive(config.emissive))
}

/// Reject configs the scene cannot be built from.
pub fn validate(config: &Config) -> Result<(), UniverseError> {
    let surface = &config.surface;
    if !(3..=MAX_SEGMENTS).contains(&surface.width_segments)
        || !(2..=MAX_SEGMENTS).contains(&surface.height_segments)
    {
        return Err(UniverseError::Segments {
            width: surface.width_segments,
            height: surface.height_segments,
        });
    }
    config.validate_colors()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_matches_surface_defaults() {
        let style = surface_style(&SurfaceConfig::default()).unwrap();
        assert_eq!(style, SurfaceStyle::default());
    }

    #[test]
    fn test_terrain_keeps_default_octaves() {
        let mut config = SurfaceConfig::default();
        config.polar_weight = 0.0;
        let params = terrain_params(&config);
        assert_eq!(params.octaves, TerrainParams::default().octaves);
        assert_eq!(params.polar_weight, 0.0);
    }

    #[test]
    fn test_star_box_uses_half_extents() {
        let bounds = star_bounds(&StarFieldConfig::default());
        assert_eq!(
            bounds,
            FieldBounds::Box {
                half_extents: Vec3::new(60.0, 45.0, 60.0)
            }
        );
        let style = star_style(&StarFieldConfig::default()).unwrap();
        assert_eq!(style.palette.len(), 6);
        assert_eq!(style.emissive, 2.5);
    }

    #[test]
    fn test_sky_is_untinted_shell() {
        let config = SkyConfig::default();
        assert_eq!(sky_bounds(&config), FieldBounds::shell(150.0, 90.0));
        let style = sky_style(&config).unwrap();
        assert!(style.palette.is_empty());
        assert_eq!(style.base_color, [1.0; 3]);
    }

    #[test]
    fn test_validate_rejects_bad_segments_and_colors() {
        let mut config = Config::default();
        config.surface.width_segments = 2;
        assert!(matches!(
            validate(&config),
            Err(UniverseError::Segments { width: 2, .. })
        ));

        let mut config = Config::default();
        config.surface.height_segments = 100_000;
        assert!(matches!(
            validate(&config),
            Err(UniverseError::Segments { height: 100_000, .. })
        ));
        config.surface.height_segments = MAX_SEGMENTS;
        config.surface.width_segments = MAX_SEGMENTS;
        assert!(validate(&config).is_ok());

        let mut config = Config::default();
        config.sky.color = "white".to_string();
        assert!(matches!(validate(&config), Err(UniverseError::Config(_))));
        assert!(validate(&Config::default()).is_ok());
    }
}
