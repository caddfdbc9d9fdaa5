//! Nearest boundary vertex lookup.

use kiddo::{ImmutableKdTree, SquaredEuclidean};
use nalgebra::Point3;

use crate::boundary::BoundaryVertexSet;

/// K-d tree over the positions of boundary vertices.
///
/// Built once per mesh and queried once per vertex. Read-only after
/// construction, so queries can run from several threads.
pub struct BoundaryIndex {
    tree: ImmutableKdTree<f64, 3>,
    /// Mesh vertex index for each tree item.
    vertex_ids: Vec<usize>,
}

impl BoundaryIndex {
    /// Build the index. Returns `None` if the mesh has no boundary vertices.
    #[must_use]
    pub fn build(positions: &[Point3<f64>], boundary: &BoundaryVertexSet) -> Option<Self> {
        let vertex_ids: Vec<usize> = boundary
            .indices()
            .filter(|&i| i < positions.len())
            .collect();
        if vertex_ids.is_empty() {
            return None;
        }

        let points: Vec<[f64; 3]> = vertex_ids
            .iter()
            .map(|&i| {
                let p = positions[i];
                [p.x, p.y, p.z]
            })
            .collect();

        Some(Self {
            tree: ImmutableKdTree::new_from_slice(&points),
            vertex_ids,
        })
    }

    /// Number of boundary vertices in the index. Never zero.
    #[must_use]
    pub fn boundary_count(&self) -> usize {
        self.vertex_ids.len()
    }

    /// Nearest boundary vertex to `point`: its mesh index and the Euclidean
    /// distance.
    #[must_use]
    pub fn nearest(&self, point: &Point3<f64>) -> (usize, f64) {
        let nearest = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[point.x, point.y, point.z]);
        #[allow(clippy::cast_possible_truncation)]
        let item = nearest.item as usize;
        (self.vertex_ids[item], nearest.distance.sqrt())
    }
}

impl std::fmt::Debug for BoundaryIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundaryIndex")
            .field("boundary_count", &self.vertex_ids.len())
            .finish_non_exhaustive()
    }
}
