//! Position-seeded scrolling slope terrain.
//!
//! [`ScrollController`] owns a sliding window of key points, re-tessellates
//! the slope mesh as the viewport moves and derives a collision outline from
//! it. Rendering, physics and spawned-object lifetimes stay with the caller
//! behind [`RenderableTerrain`], [`Spawner`] and [`Viewport`].

pub mod terrain;

pub use slope_terrain::prelude::*;
pub use terrain::{
    config::TrackConfig,
    error::{ConfigurationError, TrackError},
    generator::{
        extract_outline, KeyTrack, KeyTrackSettings, MesherSettings, PositionalRng, SlopeCurve,
        SlopeMesher,
    },
    scroll::{RenderableTerrain, ScrollController, TerrainSlot},
    spawn::{ChanceSpawnPolicy, SpawnKind, SpawnPolicy, SpawnQueue, SpawnRequest, Spawned, Spawner},
    viewport::{OrthographicViewport, PerspectiveViewport, Viewport},
};
