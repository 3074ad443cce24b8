// src/mesh.rs

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coords::{Vec2, Vec3};

/// Vertex layout of a generated slope mesh.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshLayout {
    /// Front face only: `[top, bottom]` per sample, one submesh.
    Flat,
    /// Front face plus a top strip receding in depth: `[top, bottom, back]`
    /// per sample, two submeshes (front, top).
    Extruded,
}

impl MeshLayout {
    pub fn from_two_dimensional(two_dimensional: bool) -> Self {
        if two_dimensional {
            MeshLayout::Flat
        } else {
            MeshLayout::Extruded
        }
    }

    /// Vertices emitted per curve sample.
    pub fn stride(self) -> usize {
        match self {
            MeshLayout::Flat => 2,
            MeshLayout::Extruded => 3,
        }
    }

    pub fn submesh_count(self) -> usize {
        match self {
            MeshLayout::Flat => 1,
            MeshLayout::Extruded => 2,
        }
    }
}

/// Axis-aligned bounds of a vertex buffer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// Smallest box enclosing `points`, or `None` when there are none.
    pub fn enclosing<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(Bounds { min: first, max: first }, |b, p| Bounds {
            min: Vec3::new(b.min.x.min(p.x), b.min.y.min(p.y), b.min.z.min(p.z)),
            max: Vec3::new(b.max.x.max(p.x), b.max.y.max(p.y), b.max.z.max(p.z)),
        }))
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// One fully tessellated terrain ribbon.
///
/// Every submesh indexes into the shared `vertices`/`normals`/`uvs` buffers.
/// Submesh 0 is the front face; submesh 1 (extruded layout only) is the top.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMesh {
    pub layout: MeshLayout,
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub submeshes: Vec<Vec<u32>>,
    pub bounds: Bounds,
}

impl TerrainMesh {
    /// A mesh with no geometry and the layout's submesh count.
    pub fn empty(layout: MeshLayout) -> Self {
        Self {
            layout,
            vertices: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            submeshes: vec![Vec::new(); layout.submesh_count()],
            bounds: Bounds::default(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn front_indices(&self) -> &[u32] {
        self.submeshes.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn top_indices(&self) -> Option<&[u32]> {
        self.submeshes.get(1).map(Vec::as_slice)
    }

    /// Number of curve samples the vertex buffer was built from.
    pub fn sample_count(&self) -> usize {
        self.vertices.len() / self.layout.stride()
    }
}
