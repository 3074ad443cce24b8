// src/terrain/config.rs

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use slope_terrain::mesh::MeshLayout;

use crate::terrain::error::{ConfigurationError, TrackError};
use crate::terrain::generator::MAX_WINDOW_SAMPLES;

/// Shape, tessellation and spawning knobs for one terrain track.
///
/// Usually loaded from a TOML table; every key is optional and falls back to
/// [`TrackConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Seed of the positional generator. Picked at random when absent.
    pub seed: Option<i32>,

    // Slope management
    pub slope_length: f32,
    pub slope_max_height: f32,
    pub slope_min_height: f32,

    // Mesh modifiers
    pub y_thickness: f32,
    pub z_thickness: f32,
    pub segments_per_slope: u32,

    /// Texture tiling: U advances `segments_per_slope / texture_width` per
    /// sample.
    pub texture_width: u32,

    /// Flat front face only; `false` adds a top strip receding in depth.
    pub two_dimensional: bool,
    /// Prune spawned objects against the camera X instead of the projected
    /// left viewport edge.
    pub use_camera_x: bool,

    pub obstacle_chance: f32,
    pub decoration_chance: f32,

    /// World-space height of the first key's baseline.
    pub base_height: f32,
    /// World-space depth of the front face.
    pub base_depth: f32,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            seed: None,
            slope_length: 10.0,
            slope_max_height: 2.0,
            slope_min_height: -2.0,
            y_thickness: 10.0,
            z_thickness: 5.0,
            segments_per_slope: 50,
            texture_width: 200,
            two_dimensional: true,
            use_camera_x: false,
            obstacle_chance: 0.0,
            decoration_chance: 0.0,
            base_height: 0.0,
            base_depth: 0.0,
        }
    }
}

impl TrackConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, TrackError> {
        let config: TrackConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TrackError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| TrackError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.slope_length.is_finite() && self.slope_length > 0.0) {
            return Err(ConfigurationError::SlopeLength(self.slope_length));
        }
        if self.segments_per_slope == 0 {
            return Err(ConfigurationError::ZeroSegments);
        }
        if self.segments_per_slope as usize >= MAX_WINDOW_SAMPLES {
            return Err(ConfigurationError::TooManySegments {
                value: self.segments_per_slope,
                max: MAX_WINDOW_SAMPLES,
            });
        }
        if self.texture_width == 0 {
            return Err(ConfigurationError::ZeroTextureWidth);
        }
        for (name, value) in [
            ("slope_min_height", self.slope_min_height),
            ("slope_max_height", self.slope_max_height),
            ("base_height", self.base_height),
            ("base_depth", self.base_depth),
        ] {
            if !value.is_finite() {
                return Err(ConfigurationError::NotFinite { name, value });
            }
        }
        if self.slope_min_height > self.slope_max_height {
            return Err(ConfigurationError::InvertedHeightRange {
                min: self.slope_min_height,
                max: self.slope_max_height,
            });
        }
        for (name, value) in [("y_thickness", self.y_thickness), ("z_thickness", self.z_thickness)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigurationError::Thickness { name, value });
            }
        }
        for (name, value) in [
            ("obstacle_chance", self.obstacle_chance),
            ("decoration_chance", self.decoration_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigurationError::Chance { name, value });
            }
        }
        Ok(())
    }

    pub fn layout(&self) -> MeshLayout {
        MeshLayout::from_two_dimensional(self.two_dimensional)
    }

    /// Horizontal width of one slope subdivision.
    pub fn segment_width(&self) -> f64 {
        self.slope_length as f64 / self.segments_per_slope as f64
    }

    /// The configured seed, or a fresh random one.
    pub fn resolve_seed(&self) -> i32 {
        self.seed.unwrap_or_else(rand::random::<i32>)
    }
}
