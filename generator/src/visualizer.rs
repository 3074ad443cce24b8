use anyhow::{anyhow, bail, Result};
use colorgrad::Gradient;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use nalgebra::Vector2;
use slope_track::{CollisionOutline, SpawnKind, SpawnRequest, TerrainMesh, Vec3};

const SKY: Rgb<u8> = Rgb([150, 200, 235]);
const OUTLINE: Rgb<u8> = Rgb([255, 0, 0]);
const WIRE: Rgb<u8> = Rgb([30, 30, 30]);
const OBSTACLE: Rgb<u8> = Rgb([190, 20, 20]);
const DECORATION: Rgb<u8> = Rgb([20, 120, 40]);

/// Sky above the highest vertex, in world units.
const HEADROOM: f32 = 2.0;

/// World XY to image pixels; X grows right, Y grows up.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    origin: Vector2<f32>,
    scale: f32,
    height: u32,
}

impl Projection {
    pub fn new(origin: Vector2<f32>, scale: f32, height: u32) -> Self {
        Self { origin, scale, height }
    }

    pub fn to_pixel(&self, x: f32, y: f32) -> (f32, f32) {
        let p = (Vector2::new(x, y) - self.origin) * self.scale;
        (p.x, self.height as f32 - p.y)
    }

    /// World coordinates of a pixel centre.
    pub fn to_world(&self, px: u32, py: u32) -> Vector2<f32> {
        let offset = Vector2::new(px as f32 + 0.5, self.height as f32 - py as f32 - 0.5);
        self.origin + offset / self.scale
    }
}

/// Linear interpolation along top-surface samples sorted by X.
pub fn surface_at(tops: &[Vec3], x: f32) -> Option<f32> {
    let i = tops.partition_point(|p| p.x <= x);
    match i {
        0 => None,
        i if i == tops.len() => tops.last().filter(|p| p.x == x).map(|p| p.y),
        i => {
            let (a, b) = (tops[i - 1], tops[i]);
            let t = (x - a.x) / (b.x - a.x);
            Some(a.y + (b.y - a.y) * t)
        }
    }
}

pub struct TerrainVisualizer {
    gradient: Gradient,
    scale: u32,
}

impl TerrainVisualizer {
    pub fn new(scale: u32) -> Result<Self> {
        let gradient = colorgrad::CustomGradient::new()
            .colors(&[
                colorgrad::Color::new(0.25, 0.65, 0.15, 1.0), // Grass
                colorgrad::Color::new(0.45, 0.32, 0.12, 1.0), // Topsoil
                colorgrad::Color::new(0.36, 0.26, 0.16, 1.0), // Clay
                colorgrad::Color::new(0.28, 0.26, 0.25, 1.0), // Bedrock
            ])
            .domain(&[0.0, 0.08, 0.4, 1.0])
            .build()
            .map_err(|e| anyhow!("invalid terrain gradient: {}", e))?;

        Ok(Self {
            gradient,
            scale: scale.max(1),
        })
    }

    /// Side view of the front face: filled ground, the collision outline and
    /// a marker per spawned object.
    pub fn render<'a>(
        &self,
        mesh: &TerrainMesh,
        outline: &CollisionOutline,
        spawned: impl IntoIterator<Item = &'a SpawnRequest>,
        wireframe: bool,
    ) -> Result<RgbImage> {
        if mesh.is_empty() {
            bail!("nothing to render: the terrain mesh is empty");
        }

        let scale = self.scale as f32;
        let bounds = mesh.bounds;
        let img_w = (bounds.width() * scale).ceil().max(1.0) as u32;
        let img_h = ((bounds.height() + HEADROOM) * scale).ceil().max(1.0) as u32;
        let projection = Projection::new(Vector2::new(bounds.min.x, bounds.min.y), scale, img_h);

        let stride = mesh.layout.stride();
        let tops: Vec<Vec3> = mesh.vertices.iter().step_by(stride).copied().collect();
        let thickness = (mesh.vertices[0].y - mesh.vertices[1].y).max(f32::EPSILON);

        let mut img = RgbImage::from_pixel(img_w, img_h, SKY);
        for px in 0..img_w {
            let Some(surface) = surface_at(&tops, projection.to_world(px, 0).x) else {
                continue;
            };
            for py in 0..img_h {
                let y = projection.to_world(px, py).y;
                if y > surface || y < surface - thickness {
                    continue;
                }
                let c = self.gradient.at(((surface - y) / thickness) as f64);
                img.put_pixel(
                    px,
                    py,
                    Rgb([(c.r * 255.0) as u8, (c.g * 255.0) as u8, (c.b * 255.0) as u8]),
                );
            }
        }

        if wireframe {
            let p = |i: u32| {
                let v = mesh.vertices[i as usize];
                projection.to_pixel(v.x, v.y)
            };
            for tri in mesh.front_indices().chunks_exact(3) {
                for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                    draw_line_segment_mut(&mut img, p(a), p(b), WIRE);
                }
            }
        }

        for (a, b) in outline.edges() {
            draw_line_segment_mut(
                &mut img,
                projection.to_pixel(a.x, a.y),
                projection.to_pixel(b.x, b.y),
                OUTLINE,
            );
        }

        let radius = (self.scale as i32 / 2).max(2);
        for request in spawned {
            let (x, y) = projection.to_pixel(request.position.x, request.position.y);
            let color = match request.kind {
                SpawnKind::Obstacle => OBSTACLE,
                SpawnKind::Decoration => DECORATION,
            };
            draw_filled_circle_mut(&mut img, (x as i32, y as i32 - radius), radius, color);
        }

        Ok(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use slope_track::{KeyPoint, MeshLayout, MesherSettings, SlopeMesher};

    fn mesh(layout: MeshLayout) -> TerrainMesh {
        let keys = [
            KeyPoint::new(0.0, 1.0, 0.0),
            KeyPoint::new(10.0, -1.0, 0.0),
            KeyPoint::new(20.0, 0.5, 0.0),
        ];
        SlopeMesher::new(MesherSettings {
            slope_length: 10.0,
            segments_per_slope: 10,
            y_thickness: 4.0,
            z_thickness: 2.0,
            texture_width: 200,
            layout,
        })
        .build(&keys)
    }

    #[test]
    fn test_surface_at_interpolates() {
        let tops = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 0.0), Vec3::new(4.0, 0.0, 0.0)];
        assert_relative_eq!(surface_at(&tops, 1.0).unwrap(), 2.0);
        assert_relative_eq!(surface_at(&tops, 3.0).unwrap(), 2.0);
        assert_eq!(surface_at(&tops, 4.0), Some(0.0));
        assert_eq!(surface_at(&tops, -0.1), None);
        assert_eq!(surface_at(&tops, 4.1), None);
    }

    #[test]
    fn test_projection_round_trip() {
        let projection = Projection::new(Vector2::new(-5.0, -2.0), 10.0, 100);
        let world = projection.to_world(30, 40);
        let (px, py) = projection.to_pixel(world.x, world.y);
        assert_relative_eq!(px, 30.5, epsilon = 1e-4);
        assert_relative_eq!(py, 40.5, epsilon = 1e-4);
    }

    #[test]
    fn test_render_size_and_fill() {
        let visualizer = TerrainVisualizer::new(4).unwrap();
        for layout in [MeshLayout::Flat, MeshLayout::Extruded] {
            let mesh = mesh(layout);
            let outline = slope_track::extract_outline(&mesh);
            let img = visualizer.render(&mesh, &outline, std::iter::empty(), true).unwrap();

            assert_eq!(img.width(), 80);
            assert_eq!(img.height(), ((mesh.bounds.height() + HEADROOM) * 4.0).ceil() as u32);
            assert_eq!(*img.get_pixel(40, 0), SKY);
            assert_ne!(*img.get_pixel(40, img.height() - 2), SKY);
        }
    }

    #[test]
    fn test_render_rejects_empty_mesh() {
        let visualizer = TerrainVisualizer::new(4).unwrap();
        let empty = TerrainMesh::empty(MeshLayout::Flat);
        assert!(visualizer
            .render(&empty, &CollisionOutline::default(), std::iter::empty(), false)
            .is_err());
    }
}
