use std::sync::Arc;

use crate::terrain::{
    config::TrackConfig,
    error::{ConfigurationError, TrackError},
    scroll::{ScrollController, TerrainSlot},
    viewport::{OrthographicViewport, PerspectiveViewport, Viewport},
};
use approx::assert_relative_eq;
use log::info;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Slope length 10 split into 4 segments of 2.5.
fn config() -> TrackConfig {
    TrackConfig {
        seed: Some(42),
        slope_length: 10.0,
        slope_min_height: -1.0,
        slope_max_height: 1.0,
        segments_per_slope: 4,
        ..TrackConfig::default()
    }
}

fn controller(config: TrackConfig, viewport: &impl Viewport) -> ScrollController<u32> {
    ScrollController::new(config, viewport).unwrap()
}

#[test]
fn test_initial_window() {
    init_logger();
    let viewport = OrthographicViewport::new(5.0, 10.0);
    let controller = controller(config(), &viewport);

    let xs: Vec<f64> = controller.keys().keys().iter().map(|k| k.x).collect();
    assert_eq!(xs.len(), 3);
    assert_relative_eq!(xs[0], -5.0);
    assert_relative_eq!(xs[1], 5.0);
    assert_relative_eq!(xs[2], 15.0);

    let mesh = controller.mesh();
    assert_eq!(mesh.vertex_count(), 18);
    assert_eq!(mesh.front_indices().len(), 48);
    assert_eq!(controller.outline().len(), 18);
    assert_eq!(controller.rng().seed(), 42);
}

#[test]
fn test_first_tick_publishes_without_movement() {
    let viewport = OrthographicViewport::new(5.0, 10.0);
    let mut controller = controller(config(), &viewport);
    let mut slot = TerrainSlot::default();

    assert!(!controller.tick(&viewport, &mut slot));
    assert_eq!(slot.uploads, 1);
    assert!(slot.outline.is_some());
    assert!(Arc::ptr_eq(slot.mesh.as_ref().unwrap(), &controller.mesh()));

    // Nothing moved: nothing to do.
    assert!(!controller.tick(&viewport, &mut slot));
    assert!(!controller.tick(&viewport, &mut slot));
    assert_eq!(slot.uploads, 1);
}

#[test]
fn test_movement_regenerates() {
    init_logger();
    let viewport = OrthographicViewport::new(5.0, 10.0);
    let mut controller = controller(config(), &viewport);
    let mut slot = TerrainSlot::default();
    controller.tick(&viewport, &mut slot);

    // 2.5 segments right.
    let moved = viewport.with_camera_x(11.25);
    assert!(controller.tick(&moved, &mut slot));
    assert_eq!(slot.uploads, 2);
    assert_relative_eq!(controller.segments_moved(), 0.5);

    let first = controller.keys().keys()[0];
    assert_relative_eq!(first.x, 5.0);
    assert_relative_eq!(slot.mesh.as_ref().unwrap().bounds.min.x, 5.0);

    // 3 segments left.
    let back = viewport.with_camera_x(3.75);
    assert!(controller.tick(&back, &mut slot));
    assert_relative_eq!(controller.segments_moved(), -0.5);
}

#[test]
fn test_resize_regenerates() {
    let viewport = OrthographicViewport::new(5.0, 10.0);
    let mut controller = controller(config(), &viewport);
    let mut slot = TerrainSlot::default();
    controller.tick(&viewport, &mut slot);

    let wider = viewport.with_width(30.0);
    assert!(controller.tick(&wider, &mut slot));
    assert_eq!(controller.keys().len(), 5);
    assert_eq!(slot.uploads, 2);
}

#[test]
fn test_published_mesh_is_never_mutated() {
    let viewport = OrthographicViewport::new(5.0, 10.0);
    let mut controller = controller(config(), &viewport);
    let mut slot = TerrainSlot::default();
    controller.tick(&viewport, &mut slot);

    let held = slot.mesh.clone().unwrap();
    let snapshot = (*held).clone();

    controller.tick(&viewport.with_camera_x(17.3), &mut slot);
    let current = slot.mesh.clone().unwrap();
    assert!(!Arc::ptr_eq(&held, &current));
    assert_eq!(*held, snapshot);
    assert_ne!(*current, snapshot);
}

#[test]
fn test_same_seed_same_terrain() {
    let viewport = OrthographicViewport::new(-40.0, 64.0);
    let a = controller(config(), &viewport);
    let b = controller(config(), &viewport);
    assert_eq!(*a.mesh(), *b.mesh());
    assert_eq!(*a.outline(), *b.outline());
}

#[test]
fn test_extruded_outline_skips_back_row() {
    let viewport = OrthographicViewport::new(5.0, 10.0);
    let config = TrackConfig {
        two_dimensional: false,
        ..config()
    };
    let controller = controller(config, &viewport);

    let mesh = controller.mesh();
    assert_eq!(mesh.vertex_count(), 27);
    assert_eq!(mesh.submeshes.len(), 2);
    assert_eq!(controller.outline().len(), 18);
}

#[test]
fn test_perspective_window_covers_back_plane() {
    init_logger();
    let viewport = PerspectiveViewport {
        camera_x: 0.0,
        camera_z: 20.0,
        fov_y: std::f64::consts::FRAC_PI_3,
        aspect_ratio: 16.0 / 9.0,
    };
    let controller = controller(config(), &viewport);

    // Back plane sits at z = -5, 25 units from the camera.
    let (left, right) = viewport.edges_at_depth(25.0);
    let keys = controller.keys().keys();
    info!("edges [{}, {}], keys [{}, {}]", left, right, keys[0].x, keys[keys.len() - 1].x);
    assert!(keys[0].x <= left);
    assert!(keys[keys.len() - 1].x >= right);
}

#[test]
fn test_surface_height_follows_window() {
    let viewport = OrthographicViewport::new(5.0, 10.0);
    let controller = controller(config(), &viewport);
    let keys = controller.keys().keys();

    assert_relative_eq!(controller.surface_height(5.0).unwrap(), keys[1].y, epsilon = 1e-9);
    assert_eq!(controller.surface_height(100.0), None);
}

#[test]
fn test_invalid_config_is_rejected() {
    let viewport = OrthographicViewport::new(0.0, 10.0);
    let config = TrackConfig {
        slope_length: 0.0,
        ..config()
    };
    let result = ScrollController::<u32>::new(config, &viewport);
    assert!(matches!(
        result,
        Err(TrackError::Configuration(ConfigurationError::SlopeLength(_)))
    ));
}

#[test]
fn test_tiny_slope_length_fails_fast() {
    let viewport = OrthographicViewport::new(40.0, 80.0);
    let config = TrackConfig {
        slope_length: 1e-30,
        ..config()
    };
    assert!(config.validate().is_ok());

    let result = ScrollController::<u32>::new(config, &viewport);
    assert!(matches!(
        result,
        Err(TrackError::Configuration(ConfigurationError::WindowTooLarge { .. }))
    ));
}
