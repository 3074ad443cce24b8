use std::path::PathBuf;

use thiserror::Error;

/// A track configuration that would produce degenerate geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("slope_length must be a positive finite number, got {0}")]
    SlopeLength(f32),
    #[error("segments_per_slope must be at least 1")]
    ZeroSegments,
    #[error("segments_per_slope must be below {max}, got {value}")]
    TooManySegments { value: u32, max: usize },
    #[error("texture_width must be at least 1")]
    ZeroTextureWidth,
    #[error("slope_min_height ({min}) is greater than slope_max_height ({max})")]
    InvertedHeightRange { min: f32, max: f32 },
    #[error("{name} must be a non-negative finite number, got {value}")]
    Thickness { name: &'static str, value: f32 },
    #[error("{name} must lie in [0, 1], got {value}")]
    Chance { name: &'static str, value: f32 },
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },
    #[error("a {width}-unit viewport needs more than {max_keys} keys of slope_length {slope_length}")]
    WindowTooLarge {
        width: f64,
        slope_length: f32,
        max_keys: usize,
    },
}

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("invalid track configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse track configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
