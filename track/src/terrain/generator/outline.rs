use slope_terrain::{coords::Vec2, mesh::TerrainMesh, outline::CollisionOutline};

/// Closed 2D outline of a slope mesh for a polygon collider.
///
/// Walks the top vertex of every sample left to right, then the bottom
/// vertex of every sample right to left, dropping depth. Vertex groups are
/// read with the stride of `mesh.layout`. The polygon is only simple while the
/// slope amplitude stays below the mesh's `y_thickness`; that is not checked
/// here.
pub fn extract_outline(mesh: &TerrainMesh) -> CollisionOutline {
    let stride = mesh.layout.stride();
    let count = mesh.vertices.len();
    if count < stride {
        return CollisionOutline::default();
    }

    let tops = (0..count).step_by(stride);
    // Groups are [top, bottom] or [top, bottom, back].
    let last_bottom = count - (stride - 1);
    let bottoms = (1..=last_bottom).rev().step_by(stride);

    let points: Vec<Vec2> = tops
        .chain(bottoms)
        .map(|i| mesh.vertices[i].xy())
        .collect();

    CollisionOutline { points }
}
