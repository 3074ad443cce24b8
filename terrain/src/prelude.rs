// src/prelude.rs
//! A convenient prelude re-exporting common terrain types.

pub use crate::coords::{KeyPoint, Vec2, Vec3};
pub use crate::mesh::{Bounds, MeshLayout, TerrainMesh};
pub use crate::outline::CollisionOutline;
