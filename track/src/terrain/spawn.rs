// src/terrain/spawn.rs

use std::collections::VecDeque;

use slope_terrain::coords::Vec3;

use crate::terrain::config::TrackConfig;
use crate::terrain::generator::PositionalRng;

const OBSTACLE_SALT: i32 = 0x5EED_0B57;
const DECORATION_SALT: i32 = 0x0DEC_0A7E;
const VARIANT_SALT: i32 = 0x7A12_1A27;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpawnKind {
    Obstacle,
    Decoration,
}

/// Something the engine should place in the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnRequest {
    pub kind: SpawnKind,
    pub position: Vec3,
    /// Which of the engine's prefabs of this kind to use.
    pub variant: u32,
}

/// Decides what to spawn at a freshly generated surface sample.
///
/// Called once per sample, left to right, and never twice for the same X.
pub trait SpawnPolicy {
    fn on_sample(&mut self, sample: Vec3, requests: &mut Vec<SpawnRequest>);
}

/// Engine side of spawned-object lifetimes.
pub trait Spawner {
    type Handle;

    /// Constructs the object; `None` when the engine declines.
    fn spawn(&mut self, request: &SpawnRequest) -> Option<Self::Handle>;

    fn destroy(&mut self, handle: Self::Handle);
}

#[derive(Clone, Debug, PartialEq)]
pub struct Spawned<H> {
    pub kind: SpawnKind,
    pub position: Vec3,
    pub handle: H,
}

/// Spawned objects in spawn order, which is also ascending X.
#[derive(Clone, Debug)]
pub struct SpawnQueue<H> {
    entries: VecDeque<Spawned<H>>,
}

impl<H> Default for SpawnQueue<H> {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }
}

impl<H> SpawnQueue<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: Spawned<H>) {
        self.entries.push_back(entry);
    }

    pub fn front(&self) -> Option<&Spawned<H>> {
        self.entries.front()
    }

    /// Pops the front entry if `expired` says so.
    pub fn pop_expired(&mut self, expired: impl FnOnce(&Spawned<H>) -> bool) -> Option<Spawned<H>> {
        if self.entries.front().is_some_and(expired) {
            self.entries.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spawned<H>> {
        self.entries.iter()
    }
}

/// Spawns with fixed per-sample probabilities.
///
/// Rolls come from [`PositionalRng`] keyed by the sample X, so the same
/// terrain always gets the same obstacles and decorations. Obstacles sit
/// halfway into the track's depth; decorations sit on its front or back edge.
#[derive(Clone, Debug)]
pub struct ChanceSpawnPolicy {
    obstacle_rng: PositionalRng,
    decoration_rng: PositionalRng,
    variant_rng: PositionalRng,
    obstacle_chance: f64,
    decoration_chance: f64,
    obstacle_variants: u32,
    decoration_variants: u32,
    z_thickness: f32,
}

impl ChanceSpawnPolicy {
    pub fn new(rng: PositionalRng, config: &TrackConfig) -> Self {
        Self {
            obstacle_rng: rng.salted(OBSTACLE_SALT),
            decoration_rng: rng.salted(DECORATION_SALT),
            variant_rng: rng.salted(VARIANT_SALT),
            obstacle_chance: config.obstacle_chance as f64,
            decoration_chance: config.decoration_chance as f64,
            obstacle_variants: 1,
            decoration_variants: 1,
            z_thickness: config.z_thickness,
        }
    }

    /// Number of prefabs the engine has for each kind.
    pub fn with_variants(mut self, obstacles: u32, decorations: u32) -> Self {
        self.obstacle_variants = obstacles.max(1);
        self.decoration_variants = decorations.max(1);
        self
    }

    fn variant(&self, x: f64, variants: u32) -> u32 {
        let pick = self.variant_rng.range_int(x, 0, variants as i32);
        (pick.max(0) as u32).min(variants - 1)
    }
}

fn rolls_under(rng: &PositionalRng, x: f64, chance: f64) -> bool {
    chance > 0.0 && rng.range_float(x, 0.0, 1.0) < chance
}

impl SpawnPolicy for ChanceSpawnPolicy {
    fn on_sample(&mut self, sample: Vec3, requests: &mut Vec<SpawnRequest>) {
        let x = sample.x as f64;

        if rolls_under(&self.obstacle_rng, x, self.obstacle_chance) {
            requests.push(SpawnRequest {
                kind: SpawnKind::Obstacle,
                position: Vec3::new(sample.x, sample.y, sample.z - self.z_thickness / 2.0),
                variant: self.variant(x, self.obstacle_variants),
            });
        }

        if rolls_under(&self.decoration_rng, x, self.decoration_chance) {
            let back = self.variant_rng.range_int(x + 0.5, 0, 2) == 1;
            let z = if back { sample.z - self.z_thickness } else { sample.z };
            requests.push(SpawnRequest {
                kind: SpawnKind::Decoration,
                position: Vec3::new(sample.x, sample.y, z),
                variant: self.variant(x, self.decoration_variants),
            });
        }
    }
}
