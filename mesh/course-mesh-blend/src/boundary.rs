//! Boundary vertex classification.

use tracing::{debug, warn};

use crate::adjacency::EdgeUsage;
use crate::error::{BlendError, BlendResult};

/// One flag per vertex: true if the vertex touches an open edge.
///
/// An open edge is used by exactly one triangle, so boundary vertices sit on
/// holes or on the outer rim of an open surface patch. Non-manifold edges
/// (used by three or more triangles) do not make their endpoints boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryVertexSet {
    flags: Vec<bool>,
}

impl BoundaryVertexSet {
    /// Classify the vertices of a triangle mesh.
    ///
    /// # Errors
    ///
    /// Returns [`BlendError::InvalidIndex`] if a face references a vertex
    /// `>= vertex_count`.
    ///
    /// # Example
    ///
    /// ```
    /// use course_mesh_blend::BoundaryVertexSet;
    ///
    /// // A quad split into two triangles: every vertex is on the rim
    /// let set = BoundaryVertexSet::from_faces(4, &[[0, 1, 2], [0, 2, 3]]).unwrap();
    /// assert_eq!(set.count(), 4);
    /// ```
    pub fn from_faces(vertex_count: usize, faces: &[[u32; 3]]) -> BlendResult<Self> {
        if let Some(&index) = faces
            .iter()
            .flatten()
            .find(|&&i| i as usize >= vertex_count)
        {
            return Err(BlendError::InvalidIndex {
                index,
                vertex_count,
            });
        }

        let usage = EdgeUsage::build(faces);
        let non_manifold = usage.non_manifold_edge_count();
        if non_manifold > 0 {
            warn!(
                count = non_manifold,
                "Mesh has non-manifold edges; they are not treated as boundary"
            );
        }

        Ok(Self::from_edge_usage(vertex_count, &usage))
    }

    /// Classify from precomputed edge usage.
    ///
    /// Edges referencing vertices `>= vertex_count` are ignored.
    #[must_use]
    pub fn from_edge_usage(vertex_count: usize, usage: &EdgeUsage) -> Self {
        let mut flags = vec![false; vertex_count];
        for (a, b) in usage.boundary_edges() {
            for v in [a, b] {
                if let Some(flag) = flags.get_mut(v as usize) {
                    *flag = true;
                }
            }
        }
        let set = Self { flags };
        debug!(
            vertices = vertex_count,
            boundary = set.count(),
            "Classified boundary vertices"
        );
        set
    }

    /// True if vertex `index` is a boundary vertex.
    #[inline]
    #[must_use]
    pub fn is_boundary(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Number of boundary vertices.
    #[must_use]
    pub fn count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    /// True if there are no boundary vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.flags.iter().any(|&f| f)
    }

    /// Number of vertices classified (boundary or not).
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.flags.len()
    }

    /// Indices of boundary vertices, ascending.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f)
            .map(|(i, _)| i)
    }

    /// The per-vertex flags.
    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.flags
    }
}
