use std::sync::Arc;

use bevy::prelude::*;
use slope_track::{
    ChanceSpawnPolicy, CollisionOutline, OrthographicViewport, PerspectiveViewport,
    ScrollController, TrackConfig, Viewport,
};

/// Optional track configuration next to the executable's working directory.
pub const CONFIG_PATH: &str = "terrain.toml";

pub const OBSTACLE_VARIANTS: u32 = 3;
pub const DECORATION_VARIANTS: u32 = 4;

/// Track configuration, read once when the plugin is built.
#[derive(Resource, Clone, Debug, Default)]
pub struct TerrainSettings(pub TrackConfig);

/// The running track. Absent when the configuration was rejected.
#[derive(Resource)]
pub struct TerrainState {
    pub controller: ScrollController<Entity>,
    pub policy: ChanceSpawnPolicy,
    pub front: Handle<Mesh>,
    /// Top strip; only the extruded layout has one.
    pub top: Option<Handle<Mesh>>,
    /// Depth the rider travels at.
    pub rider_z: f32,
}

#[derive(Resource)]
pub struct TerrainOutline {
    pub outline: Option<Arc<CollisionOutline>>,
    pub visible: bool,
}

impl Default for TerrainOutline {
    fn default() -> Self {
        Self {
            outline: None,
            visible: true,
        }
    }
}

#[derive(Resource)]
pub struct SpawnAssets {
    pub obstacle_mesh: Handle<Mesh>,
    pub decoration_mesh: Handle<Mesh>,
    pub obstacle_materials: Vec<Handle<StandardMaterial>>,
    pub decoration_materials: Vec<Handle<StandardMaterial>>,
}

/// Viewport of the follow camera, in either projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraViewport {
    Perspective(PerspectiveViewport),
    Orthographic(OrthographicViewport),
}

impl CameraViewport {
    pub fn from_camera(transform: &Transform, projection: &Projection) -> Option<Self> {
        let camera_x = transform.translation.x as f64;
        let camera_z = transform.translation.z as f64;
        match projection {
            Projection::Perspective(p) => Some(Self::Perspective(PerspectiveViewport {
                camera_x,
                camera_z,
                fov_y: p.fov as f64,
                aspect_ratio: p.aspect_ratio as f64,
            })),
            Projection::Orthographic(o) => Some(Self::Orthographic(OrthographicViewport {
                camera_x,
                camera_z,
                half_width: o.area.width() as f64 / 2.0,
            })),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}

impl Viewport for CameraViewport {
    fn camera_x(&self) -> f64 {
        match self {
            Self::Perspective(v) => v.camera_x(),
            Self::Orthographic(v) => v.camera_x(),
        }
    }

    fn camera_z(&self) -> f64 {
        match self {
            Self::Perspective(v) => v.camera_z(),
            Self::Orthographic(v) => v.camera_z(),
        }
    }

    fn edges_at_depth(&self, depth: f64) -> (f64, f64) {
        match self {
            Self::Perspective(v) => v.edges_at_depth(depth),
            Self::Orthographic(v) => v.edges_at_depth(depth),
        }
    }
}
