//! Terrain error types.

/// Errors raised while constructing a terrain field.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TerrainError {
    /// The luminance buffer does not match the declared mask dimensions.
    #[error("mask buffer holds {actual} bytes, expected {width}x{height} = {expected}")]
    MaskSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// A mask must have at least one pixel.
    #[error("mask dimensions must be non-zero, got {width}x{height}")]
    EmptyMask { width: u32, height: u32 },
}
