//! `#rrggbb` color strings.

use crate::error::ConfigError;

/// Parse `#rrggbb` (the `#` is optional) into RGB components in `[0, 1]`.
///
/// Components are the raw sRGB bytes divided by 255; no linearization.
pub fn parse_hex_color(s: &str) -> Result<[f32; 3], ConfigError> {
    let trimmed = s.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidColor(s.to_string()));
    }

    let mut rgb = [0.0; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|_| ConfigError::InvalidColor(s.to_string()))?;
        *channel = byte as f32 / 255.0;
    }
    Ok(rgb)
}

/// Parse every entry of a palette, failing on the first bad one.
pub fn parse_palette<S: AsRef<str>>(entries: &[S]) -> Result<Vec<[f32; 3]>, ConfigError> {
    entries.iter().map(|e| parse_hex_color(e.as_ref())).collect()
}
