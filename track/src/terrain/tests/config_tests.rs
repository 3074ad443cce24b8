use crate::terrain::{
    config::TrackConfig,
    error::{ConfigurationError, TrackError},
    generator::MAX_WINDOW_SAMPLES,
};
use slope_terrain::mesh::MeshLayout;
use test_case::test_case;

fn rejected(mutate: impl FnOnce(&mut TrackConfig)) -> ConfigurationError {
    let mut config = TrackConfig::default();
    mutate(&mut config);
    config.validate().unwrap_err()
}

#[test]
fn test_default_config() {
    let config = TrackConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.seed, None);
    assert_eq!(config.slope_length, 10.0);
    assert_eq!(config.segments_per_slope, 50);
    assert_eq!(config.texture_width, 200);
    assert_eq!(config.layout(), MeshLayout::Flat);
    assert_eq!(config.segment_width(), 0.2);
}

#[test]
fn test_partial_toml_falls_back_to_defaults() {
    let config = TrackConfig::from_toml_str(
        r#"
        seed = 7
        slope_length = 4.0
        two_dimensional = false
        obstacle_chance = 0.25
        "#,
    )
    .unwrap();

    assert_eq!(config.seed, Some(7));
    assert_eq!(config.resolve_seed(), 7);
    assert_eq!(config.slope_length, 4.0);
    assert_eq!(config.layout(), MeshLayout::Extruded);
    assert_eq!(config.obstacle_chance, 0.25);
    assert_eq!(config.y_thickness, 10.0);
    assert_eq!(config.slope_min_height, -2.0);
}

#[test_case(0.0 ; "zero")]
#[test_case(-3.0 ; "negative")]
#[test_case(f32::NAN ; "nan")]
#[test_case(f32::INFINITY ; "infinite")]
fn test_rejects_slope_length(length: f32) {
    let error = rejected(|c| c.slope_length = length);
    assert!(matches!(error, ConfigurationError::SlopeLength(_)));
}

#[test]
fn test_rejects_zero_counts() {
    assert_eq!(rejected(|c| c.segments_per_slope = 0), ConfigurationError::ZeroSegments);
    assert_eq!(rejected(|c| c.texture_width = 0), ConfigurationError::ZeroTextureWidth);
}

#[test]
fn test_rejects_segments_beyond_window_cap() {
    let error = rejected(|c| c.segments_per_slope = u32::MAX);
    assert_eq!(
        error,
        ConfigurationError::TooManySegments {
            value: u32::MAX,
            max: MAX_WINDOW_SAMPLES
        }
    );
}

#[test]
fn test_rejects_inverted_height_range() {
    let error = rejected(|c| {
        c.slope_min_height = 3.0;
        c.slope_max_height = 1.0;
    });
    assert_eq!(error, ConfigurationError::InvertedHeightRange { min: 3.0, max: 1.0 });
}

#[test]
fn test_accepts_flat_height_range() {
    let mut config = TrackConfig::default();
    config.slope_min_height = 0.5;
    config.slope_max_height = 0.5;
    assert!(config.validate().is_ok());
}

#[test]
fn test_rejects_thickness_and_chance() {
    assert_eq!(
        rejected(|c| c.y_thickness = -1.0),
        ConfigurationError::Thickness { name: "y_thickness", value: -1.0 }
    );
    assert_eq!(
        rejected(|c| c.decoration_chance = 1.5),
        ConfigurationError::Chance { name: "decoration_chance", value: 1.5 }
    );
    assert!(matches!(
        rejected(|c| c.base_height = f32::INFINITY),
        ConfigurationError::NotFinite { name: "base_height", .. }
    ));
}

#[test]
fn test_toml_errors() {
    let invalid = TrackConfig::from_toml_str("segments_per_slope = 0");
    assert!(matches!(
        invalid,
        Err(TrackError::Configuration(ConfigurationError::ZeroSegments))
    ));

    let malformed = TrackConfig::from_toml_str("slope_length = \"long\"");
    assert!(matches!(malformed, Err(TrackError::Parse(_))));
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("slope-track-{}.toml", std::process::id()));
    std::fs::write(&path, "seed = 11\nsegments_per_slope = 8\n").unwrap();
    let config = TrackConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.seed, Some(11));
    assert_eq!(config.segments_per_slope, 8);

    let missing = TrackConfig::load(&path);
    assert!(matches!(missing, Err(TrackError::Io { .. })));
}
