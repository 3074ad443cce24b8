use std::f64::consts::PI;
use std::iter;

use log::debug;
use nalgebra::Vector3;
use slope_terrain::{
    coords::{KeyPoint, Vec2, Vec3},
    mesh::{Bounds, MeshLayout, TerrainMesh},
};

use crate::terrain::config::TrackConfig;

/// Top-surface samples along a key window.
///
/// Each pair of adjacent keys is one half-cosine arch,
/// `y(s) = y_mid + amplitude * cos(pi * s / S)`, which meets both key
/// heights with zero slope. Neighbouring arches share their boundary sample.
#[derive(Clone, Copy, Debug)]
pub struct SlopeCurve<'a> {
    keys: &'a [KeyPoint],
    segments_per_slope: u32,
}

impl<'a> SlopeCurve<'a> {
    pub fn new(keys: &'a [KeyPoint], segments_per_slope: u32) -> Self {
        Self {
            keys,
            segments_per_slope: segments_per_slope.max(1),
        }
    }

    pub fn sample_count(&self) -> usize {
        match self.keys.len() {
            0 | 1 => 0,
            n => self.segments_per_slope as usize * (n - 1) + 1,
        }
    }

    /// Samples from left to right.
    pub fn samples(&self) -> impl Iterator<Item = Vec3> + 'a {
        let segments = self.segments_per_slope;
        self.keys.windows(2).enumerate().flat_map(move |(interval, pair)| {
            let (from, to) = (pair[0], pair[1]);
            let first = if interval == 0 { 0 } else { 1 };
            (first..=segments).map(move |s| arch_sample(from, to, s, segments))
        })
    }
}

fn arch_sample(from: KeyPoint, to: KeyPoint, s: u32, segments: u32) -> Vec3 {
    let t = s as f64 / segments as f64;
    let y_mid = (to.y + from.y) / 2.0;
    let amplitude = (from.y - to.y) / 2.0;
    let x = from.x + (to.x - from.x) * t;
    let y = y_mid + amplitude * (PI * t).cos();
    Vec3::new(x as f32, y as f32, from.z as f32)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MesherSettings {
    pub slope_length: f32,
    pub segments_per_slope: u32,
    pub y_thickness: f32,
    pub z_thickness: f32,
    pub texture_width: u32,
    pub layout: MeshLayout,
}

impl MesherSettings {
    pub fn from_config(config: &TrackConfig) -> Self {
        Self {
            slope_length: config.slope_length,
            segments_per_slope: config.segments_per_slope,
            y_thickness: config.y_thickness,
            z_thickness: config.z_thickness,
            texture_width: config.texture_width,
            layout: config.layout(),
        }
    }

    /// Texture U per world unit of X: one sample advances U by
    /// `segments_per_slope / texture_width`.
    pub fn u_per_unit(&self) -> f32 {
        let segments = self.segments_per_slope.max(1) as f32;
        segments * segments / (self.slope_length * self.texture_width.max(1) as f32)
    }
}

/// Tessellates a key window into a [`TerrainMesh`].
pub struct SlopeMesher {
    settings: MesherSettings,
}

impl SlopeMesher {
    pub fn new(settings: MesherSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &MesherSettings {
        &self.settings
    }

    pub fn build(&self, keys: &[KeyPoint]) -> TerrainMesh {
        let layout = self.settings.layout;
        let curve = SlopeCurve::new(keys, self.settings.segments_per_slope);
        let samples = curve.sample_count();
        if samples < 2 {
            return TerrainMesh::empty(layout);
        }

        let stride = layout.stride();
        // U depends on world X only, so it stays put when the window moves.
        let u_per_unit = self.settings.u_per_unit();
        let mut vertices = Vec::with_capacity(samples * stride);
        let mut uvs = Vec::with_capacity(samples * stride);

        for top in curve.samples() {
            let u = top.x * u_per_unit;

            vertices.push(top);
            uvs.push(Vec2::new(u, 0.5));

            vertices.push(Vec3::new(top.x, top.y - self.settings.y_thickness, top.z));
            uvs.push(Vec2::new(u, 0.0));

            if layout == MeshLayout::Extruded {
                vertices.push(Vec3::new(top.x, top.y, top.z - self.settings.z_thickness));
                uvs.push(Vec2::new(u, 1.0));
            }
        }

        let submeshes = triangulate(layout, samples);
        let normals = vertex_normals(&vertices, &submeshes);
        let bounds = Bounds::enclosing(&vertices).unwrap_or_default();

        debug!(
            "Built slope mesh: {} vertices, {} front indices, x in [{}, {}]",
            vertices.len(),
            submeshes[0].len(),
            bounds.min.x,
            bounds.max.x
        );

        TerrainMesh {
            layout,
            vertices,
            normals,
            uvs,
            submeshes,
            bounds,
        }
    }
}

// Front faces wind counter-clockwise seen from +Z; top faces face +Y.
fn triangulate(layout: MeshLayout, samples: usize) -> Vec<Vec<u32>> {
    let stride = layout.stride() as u32;
    let quads = samples.saturating_sub(1);
    let mut front = Vec::with_capacity(quads * 6);
    let mut top = match layout {
        MeshLayout::Flat => None,
        MeshLayout::Extruded => Some(Vec::with_capacity(quads * 6)),
    };

    for j in 0..quads as u32 {
        let t0 = j * stride;
        let b0 = t0 + 1;
        let t1 = t0 + stride;
        let b1 = t1 + 1;
        front.extend([t0, b0, t1, b0, b1, t1]);

        if let Some(top) = top.as_mut() {
            let k0 = t0 + 2;
            let k1 = t1 + 2;
            top.extend([t0, t1, k0, k0, t1, k1]);
        }
    }

    iter::once(front).chain(top).collect()
}

// Area-weighted average of the adjacent face normals.
fn vertex_normals(vertices: &[Vec3], submeshes: &[Vec<u32>]) -> Vec<Vec3> {
    let point = |i: usize| {
        let v = vertices[i];
        Vector3::new(v.x, v.y, v.z)
    };

    let mut sums = vec![Vector3::<f32>::zeros(); vertices.len()];
    for tri in submeshes.iter().flat_map(|indices| indices.chunks_exact(3)) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let face = (point(b) - point(a)).cross(&(point(c) - point(a)));
        for i in [a, b, c] {
            sums[i] += face;
        }
    }

    sums.into_iter()
        .map(|n| n.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::z))
        .map(|n| Vec3::new(n.x, n.y, n.z))
        .collect()
}
