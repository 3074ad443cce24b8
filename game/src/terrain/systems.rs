use std::path::Path;
use std::sync::Arc;

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::view::NoFrustumCulling;
use colorgrad::Gradient;
use slope_track::{
    ChanceSpawnPolicy, CollisionOutline, MeshLayout, RenderableTerrain, ScrollController,
    SpawnKind, SpawnRequest, Spawner, TerrainMesh, TrackConfig,
};

use crate::player::FollowCamera;
use crate::terrain::types::{
    CameraViewport, SpawnAssets, TerrainOutline, TerrainSettings, TerrainState, CONFIG_PATH,
    DECORATION_VARIANTS, OBSTACLE_VARIANTS,
};

const OUTLINE_COLOR: Color = Color::srgb(1.0, 0.1, 0.1);

pub fn load_settings() -> TrackConfig {
    let path = Path::new(CONFIG_PATH);
    if !path.exists() {
        info!("No {} found, using default terrain settings", CONFIG_PATH);
        return TrackConfig::default();
    }
    match TrackConfig::load(path) {
        Ok(config) => {
            info!("Loaded terrain settings from {}", CONFIG_PATH);
            config
        }
        Err(e) => {
            error!("Ignoring {}: {}", CONFIG_PATH, e);
            TrackConfig::default()
        }
    }
}

/// Uploads a shared vertex buffer with one submesh's indices.
fn to_bevy_mesh(mesh: &TerrainMesh, indices: &[u32]) -> Mesh {
    let positions: Vec<[f32; 3]> = mesh.vertices.iter().map(|v| v.to_array()).collect();
    let normals: Vec<[f32; 3]> = mesh.normals.iter().map(|n| n.to_array()).collect();
    let uvs: Vec<[f32; 2]> = mesh.uvs.iter().map(|uv| [uv.x, uv.y]).collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices.to_vec()))
}

/// Engine side of the published terrain: mesh assets and the outline.
struct EngineTerrain<'a> {
    meshes: &'a mut Assets<Mesh>,
    front: &'a Handle<Mesh>,
    top: Option<&'a Handle<Mesh>>,
    outline: &'a mut TerrainOutline,
}

impl RenderableTerrain for EngineTerrain<'_> {
    fn replace_mesh(&mut self, mesh: Arc<TerrainMesh>) {
        if let Some(front) = self.meshes.get_mut(self.front) {
            *front = to_bevy_mesh(&mesh, mesh.front_indices());
        }
        if let (Some(handle), Some(indices)) = (self.top, mesh.top_indices()) {
            if let Some(top) = self.meshes.get_mut(handle) {
                *top = to_bevy_mesh(&mesh, indices);
            }
        }
    }

    fn replace_outline(&mut self, outline: Arc<CollisionOutline>) {
        self.outline.outline = Some(outline);
    }
}

struct EngineSpawner<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    assets: &'a SpawnAssets,
}

impl Spawner for EngineSpawner<'_, '_, '_> {
    type Handle = Entity;

    fn spawn(&mut self, request: &SpawnRequest) -> Option<Entity> {
        let (mesh, materials, lift) = match request.kind {
            SpawnKind::Obstacle => (&self.assets.obstacle_mesh, &self.assets.obstacle_materials, 0.5),
            SpawnKind::Decoration => (&self.assets.decoration_mesh, &self.assets.decoration_materials, 0.75),
        };
        let material = materials.get(request.variant as usize)?.clone();
        let p = request.position;
        let entity = self
            .commands
            .spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material),
                Transform::from_xyz(p.x, p.y + lift, p.z),
                Name::new(format!("{:?}", request.kind)),
            ))
            .id();
        Some(entity)
    }

    fn destroy(&mut self, entity: Entity) {
        self.commands.entity(entity).despawn();
    }
}

fn palette(gradient: &Gradient, count: u32, materials: &mut Assets<StandardMaterial>) -> Vec<Handle<StandardMaterial>> {
    (0..count)
        .map(|i| {
            let c = gradient.at((i as f64 + 0.5) / count as f64);
            materials.add(StandardMaterial {
                base_color: Color::srgb(c.r as f32, c.g as f32, c.b as f32),
                perceptual_roughness: 0.8,
                ..default()
            })
        })
        .collect()
}

pub fn setup_spawn_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let obstacle_materials = palette(&colorgrad::inferno(), OBSTACLE_VARIANTS, &mut materials);
    let decoration_materials = palette(&colorgrad::viridis(), DECORATION_VARIANTS, &mut materials);
    commands.insert_resource(SpawnAssets {
        obstacle_mesh: meshes.add(Cuboid::new(1.0, 1.0, 1.0)),
        decoration_mesh: meshes.add(Cone::new(0.5, 1.5)),
        obstacle_materials,
        decoration_materials,
    });
}

/// Starts the track once the follow camera exists.
pub fn start_track(
    mut commands: Commands,
    settings: Res<TerrainSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    camera_q: Query<(&Transform, &Projection), With<FollowCamera>>,
) {
    let Ok((transform, projection)) = camera_q.single() else {
        error!("Terrain disabled: no follow camera");
        return;
    };
    let Some(viewport) = CameraViewport::from_camera(transform, projection) else {
        error!("Terrain disabled: unsupported camera projection");
        return;
    };

    let controller = match ScrollController::new(settings.0.clone(), &viewport) {
        Ok(controller) => controller,
        Err(e) => {
            error!("Terrain disabled: {}", e);
            return;
        }
    };
    let config = controller.config();
    let mesh = controller.mesh();

    let front = meshes.add(to_bevy_mesh(&mesh, mesh.front_indices()));
    commands.spawn((
        Mesh3d(front.clone()),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.45, 0.32, 0.16),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::IDENTITY,
        // Bounds change every regeneration
        NoFrustumCulling,
        Name::new("TerrainFront"),
    ));

    let top = match (config.layout(), mesh.top_indices()) {
        (MeshLayout::Extruded, Some(indices)) => {
            let top = meshes.add(to_bevy_mesh(&mesh, indices));
            commands.spawn((
                Mesh3d(top.clone()),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(0.3, 0.62, 0.2),
                    perceptual_roughness: 0.9,
                    ..default()
                })),
                Transform::IDENTITY,
                NoFrustumCulling,
                Name::new("TerrainTop"),
            ));
            Some(top)
        }
        _ => None,
    };

    let rider_z = if config.two_dimensional {
        config.base_depth + 1.0
    } else {
        config.base_depth - config.z_thickness / 2.0
    };
    let policy = ChanceSpawnPolicy::new(controller.rng(), config)
        .with_variants(OBSTACLE_VARIANTS, DECORATION_VARIANTS);

    info!("Terrain started with {} keys", controller.keys().len());
    commands.insert_resource(TerrainState {
        controller,
        policy,
        front,
        top,
        rider_z,
    });
}

/// Ticks the track against the follow camera, then spawns and prunes.
pub fn scroll_terrain(
    mut commands: Commands,
    state: Option<ResMut<TerrainState>>,
    spawn_assets: Res<SpawnAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut outline: ResMut<TerrainOutline>,
    camera_q: Query<(&Transform, &Projection), With<FollowCamera>>,
) {
    let Some(mut state) = state else {
        return;
    };
    let Ok((transform, projection)) = camera_q.single() else {
        return;
    };
    let Some(viewport) = CameraViewport::from_camera(transform, projection) else {
        return;
    };

    let state = &mut *state;
    let mut target = EngineTerrain {
        meshes: &mut meshes,
        front: &state.front,
        top: state.top.as_ref(),
        outline: &mut outline,
    };
    if state.controller.tick(&viewport, &mut target) {
        trace!("Terrain regenerated at camera x {}", transform.translation.x);
    }

    let mut spawner = EngineSpawner {
        commands: &mut commands,
        assets: &spawn_assets,
    };
    let spawned = state.controller.populate(&mut state.policy, &mut spawner);
    let pruned = state.controller.prune_spawned(&viewport, &mut spawner);
    if spawned > 0 || pruned > 0 {
        debug!("Spawned {}, pruned {}", spawned, pruned);
    }
}

pub fn draw_outline(mut gizmos: Gizmos, outline: Res<TerrainOutline>, state: Option<Res<TerrainState>>) {
    if !outline.visible {
        return;
    }
    let Some(shape) = outline.outline.as_deref() else {
        return;
    };
    // Just in front of the front face.
    let z = state.map_or(0.0, |s| s.controller.config().base_depth) + 0.05;
    let closed = shape
        .points
        .iter()
        .chain(shape.points.first())
        .map(|p| Vec3::new(p.x, p.y, z));
    gizmos.linestrip(closed, OUTLINE_COLOR);
}
