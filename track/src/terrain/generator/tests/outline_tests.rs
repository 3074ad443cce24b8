use crate::terrain::generator::{extract_outline, MesherSettings, SlopeMesher};
use approx::assert_relative_eq;
use slope_terrain::{
    coords::KeyPoint,
    mesh::{MeshLayout, TerrainMesh},
};
use test_case::test_case;

fn mesh(layout: MeshLayout, segments: u32) -> TerrainMesh {
    let keys = [
        KeyPoint::new(-5.0, 0.3, 0.0),
        KeyPoint::new(5.0, -0.8, 0.0),
        KeyPoint::new(15.0, 0.1, 0.0),
        KeyPoint::new(25.0, 1.4, 0.0),
    ];
    SlopeMesher::new(MesherSettings {
        slope_length: 10.0,
        segments_per_slope: segments,
        y_thickness: 10.0,
        z_thickness: 5.0,
        texture_width: 200,
        layout,
    })
    .build(&keys)
}

#[test_case(MeshLayout::Flat, 4)]
#[test_case(MeshLayout::Flat, 50)]
#[test_case(MeshLayout::Extruded, 4)]
#[test_case(MeshLayout::Extruded, 50)]
fn test_outline_has_two_points_per_sample(layout: MeshLayout, segments: u32) {
    let mesh = mesh(layout, segments);
    let outline = extract_outline(&mesh);
    assert_eq!(outline.len(), 2 * mesh.sample_count());
    assert_eq!(outline.edges().count(), outline.len());
}

#[test]
fn test_flat_outline_uses_every_vertex() {
    let mesh = mesh(MeshLayout::Flat, 4);
    let outline = extract_outline(&mesh);
    assert_eq!(outline.len(), mesh.vertex_count());
}

#[test_case(MeshLayout::Flat)]
#[test_case(MeshLayout::Extruded)]
fn test_outline_walks_tops_then_bottoms(layout: MeshLayout) {
    let mesh = mesh(layout, 8);
    let outline = extract_outline(&mesh);
    let samples = mesh.sample_count();
    let stride = layout.stride();
    let (tops, bottoms) = outline.points.split_at(samples);

    for (j, top) in tops.iter().enumerate() {
        assert_eq!(*top, mesh.vertices[j * stride].xy());
    }
    // Bottoms run right to left, ten units under their tops.
    for (k, bottom) in bottoms.iter().enumerate() {
        let top = tops[samples - 1 - k];
        assert_eq!(bottom.x, top.x);
        assert_relative_eq!(bottom.y, top.y - 10.0, epsilon = 1e-4);
    }
}

#[test]
fn test_outline_closes_on_first_bottom() {
    let mesh = mesh(MeshLayout::Extruded, 4);
    let outline = extract_outline(&mesh);
    let (last, first) = outline.edges().last().unwrap();
    assert_eq!(last, mesh.vertices[1].xy());
    assert_eq!(first, mesh.vertices[0].xy());
}

#[test]
fn test_empty_mesh_has_empty_outline() {
    for layout in [MeshLayout::Flat, MeshLayout::Extruded] {
        let outline = extract_outline(&TerrainMesh::empty(layout));
        assert!(outline.is_empty());
        assert_eq!(outline.edges().count(), 0);
    }
}

#[test]
fn test_extruded_outline_skips_back_vertices() {
    let mesh = mesh(MeshLayout::Extruded, 4);
    let outline = extract_outline(&mesh);
    assert_eq!(outline.len(), 2 * mesh.vertex_count() / 3);
    for point in &outline.points {
        let matched = mesh
            .vertices
            .chunks_exact(3)
            .any(|group| *point == group[0].xy() || *point == group[1].xy());
        assert!(matched, "{:?} is not a top or bottom vertex", point);
    }
}
