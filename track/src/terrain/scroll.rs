// src/terrain/scroll.rs

use std::sync::Arc;

use log::{debug, info, trace};
use slope_terrain::{mesh::TerrainMesh, outline::CollisionOutline};

use crate::terrain::{
    config::TrackConfig,
    error::{ConfigurationError, TrackError},
    generator::{
        extract_outline, KeyTrack, KeyTrackSettings, MesherSettings, PositionalRng, SlopeCurve,
        SlopeMesher,
    },
    spawn::{SpawnKind, SpawnPolicy, SpawnQueue, SpawnRequest, Spawned, Spawner},
    viewport::Viewport,
};

/// Receives regenerated geometry.
///
/// Each call hands over a complete buffer; implementations swap their handle
/// rather than patching in place.
pub trait RenderableTerrain {
    fn replace_mesh(&mut self, mesh: Arc<TerrainMesh>);

    fn replace_outline(&mut self, outline: Arc<CollisionOutline>);
}

/// Holds the most recently published mesh and outline.
#[derive(Clone, Debug, Default)]
pub struct TerrainSlot {
    pub mesh: Option<Arc<TerrainMesh>>,
    pub outline: Option<Arc<CollisionOutline>>,
    /// Number of mesh replacements received.
    pub uploads: usize,
}

impl RenderableTerrain for TerrainSlot {
    fn replace_mesh(&mut self, mesh: Arc<TerrainMesh>) {
        self.mesh = Some(mesh);
        self.uploads += 1;
    }

    fn replace_outline(&mut self, outline: Arc<CollisionOutline>) {
        self.outline = Some(outline);
    }
}

/// Per-frame driver of one terrain track.
///
/// `H` is the engine's handle type for spawned obstacles and decorations.
pub struct ScrollController<H> {
    config: TrackConfig,
    rng: PositionalRng,
    keys: KeyTrack,
    mesher: SlopeMesher,
    mesh: Arc<TerrainMesh>,
    outline: Arc<CollisionOutline>,
    published: bool,
    previous_camera_x: f64,
    segments_moved: f64,
    spawn_frontier: Option<f32>,
    obstacles: SpawnQueue<H>,
    decorations: SpawnQueue<H>,
}

impl<H> ScrollController<H> {
    pub fn new(config: TrackConfig, viewport: &impl Viewport) -> Result<Self, TrackError> {
        config.validate()?;

        let seed = config.resolve_seed();
        let rng = PositionalRng::new(seed);
        let (left, right) = viewport.edges_at_depth(view_depth(&config, viewport));
        let settings = KeyTrackSettings::from_config(&config);
        let width = right - left;
        if settings.window_keys(width.max(0.0)).is_none() {
            return Err(ConfigurationError::WindowTooLarge {
                width,
                slope_length: config.slope_length,
                max_keys: settings.max_window_keys(),
            }
            .into());
        }

        let keys = KeyTrack::new(rng, settings, left, right);
        let mesher = SlopeMesher::new(MesherSettings::from_config(&config));
        let mesh = mesher.build(keys.keys());
        let outline = extract_outline(&mesh);

        info!(
            "Terrain track seeded with {} over [{}, {}] ({:?} layout)",
            seed,
            left,
            right,
            config.layout()
        );

        Ok(Self {
            rng,
            keys,
            mesher,
            mesh: Arc::new(mesh),
            outline: Arc::new(outline),
            published: false,
            previous_camera_x: viewport.camera_x(),
            segments_moved: 0.0,
            spawn_frontier: None,
            obstacles: SpawnQueue::new(),
            decorations: SpawnQueue::new(),
            config,
        })
    }

    /// Advances one frame.
    ///
    /// Re-anchors the key window on the viewport and, when the camera moved
    /// or the viewport was resized, rebuilds the mesh and outline and hands
    /// them to `target`. Returns whether geometry was regenerated.
    pub fn tick(&mut self, viewport: &impl Viewport, target: &mut impl RenderableTerrain) -> bool {
        let camera_x = viewport.camera_x();
        let delta_x = camera_x - self.previous_camera_x;
        self.segments_moved += delta_x / self.config.segment_width();

        let (left, right) = viewport.edges_at_depth(view_depth(&self.config, viewport));
        self.keys.rebuild(left, right);

        let regenerate = self.segments_moved != 0.0 || self.keys.additional_segments() != 0.0;
        if regenerate {
            self.regenerate();
        }
        if regenerate || !self.published {
            target.replace_mesh(Arc::clone(&self.mesh));
            target.replace_outline(Arc::clone(&self.outline));
            self.published = true;
        }

        trace!(
            "tick: camera_x={} moved={} drift={} regenerated={}",
            camera_x,
            self.segments_moved,
            self.keys.additional_segments(),
            regenerate
        );

        self.segments_moved = self.segments_moved.fract();
        self.keys.settle_drift();
        self.previous_camera_x = camera_x;

        regenerate
    }

    fn regenerate(&mut self) {
        let mesh = self.mesher.build(self.keys.keys());
        let outline = extract_outline(&mesh);
        self.mesh = Arc::new(mesh);
        self.outline = Arc::new(outline);
    }

    /// Offers every sample beyond the spawn frontier to `policy` and spawns
    /// what it asks for. Returns the number of objects spawned.
    pub fn populate<P, S>(&mut self, policy: &mut P, spawner: &mut S) -> usize
    where
        P: SpawnPolicy,
        S: Spawner<Handle = H>,
    {
        let curve = SlopeCurve::new(self.keys.keys(), self.config.segments_per_slope);
        let frontier = self.spawn_frontier;
        let mut requests: Vec<SpawnRequest> = Vec::new();
        let mut newest = frontier;

        for sample in curve.samples().filter(|s| frontier.map_or(true, |f| s.x > f)) {
            policy.on_sample(sample, &mut requests);
            newest = Some(sample.x);
        }
        self.spawn_frontier = newest;

        let mut spawned = 0;
        for request in requests {
            let Some(handle) = spawner.spawn(&request) else {
                continue;
            };
            let entry = Spawned {
                kind: request.kind,
                position: request.position,
                handle,
            };
            match request.kind {
                SpawnKind::Obstacle => self.obstacles.push(entry),
                SpawnKind::Decoration => self.decorations.push(entry),
            }
            spawned += 1;
        }

        if spawned > 0 {
            debug!("Spawned {} objects up to x={:?}", spawned, self.spawn_frontier);
        }
        spawned
    }

    /// Destroys spawned objects that fell behind the camera's trailing edge.
    /// Returns the number destroyed.
    pub fn prune_spawned<S>(&mut self, viewport: &impl Viewport, spawner: &mut S) -> usize
    where
        S: Spawner<Handle = H>,
    {
        let slope_length = self.config.slope_length as f64;
        let use_camera_x = self.config.use_camera_x;

        let expired = |entry: &Spawned<H>| {
            let x = entry.position.x as f64;
            if use_camera_x {
                viewport.camera_x() > x + slope_length
            } else {
                let depth = viewport.camera_z() - entry.position.z as f64;
                let (trailing_edge, _) = viewport.edges_at_depth(depth);
                trailing_edge > x + slope_length / 2.0
            }
        };

        let mut removed = 0;
        for queue in [&mut self.obstacles, &mut self.decorations] {
            while let Some(entry) = queue.pop_expired(expired) {
                spawner.destroy(entry.handle);
                removed += 1;
            }
        }

        if removed > 0 {
            debug!("Pruned {} spawned objects", removed);
        }
        removed
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    pub fn rng(&self) -> PositionalRng {
        self.rng
    }

    pub fn keys(&self) -> &KeyTrack {
        &self.keys
    }

    pub fn mesh(&self) -> Arc<TerrainMesh> {
        Arc::clone(&self.mesh)
    }

    pub fn outline(&self) -> Arc<CollisionOutline> {
        Arc::clone(&self.outline)
    }

    /// Height of the terrain surface at `x`, if the current window covers it.
    pub fn surface_height(&self, x: f64) -> Option<f64> {
        self.keys.surface_height(x)
    }

    pub fn obstacles(&self) -> &SpawnQueue<H> {
        &self.obstacles
    }

    pub fn decorations(&self) -> &SpawnQueue<H> {
        &self.decorations
    }

    /// Fractional camera movement, in segments, not yet settled.
    pub fn segments_moved(&self) -> f64 {
        self.segments_moved
    }
}

// Distance from the camera to the back plane of the track.
fn view_depth(config: &TrackConfig, viewport: &impl Viewport) -> f64 {
    viewport.camera_z() - (config.base_depth as f64 - config.z_thickness as f64)
}
