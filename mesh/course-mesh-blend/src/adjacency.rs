//! Edge usage counts over a triangle list.

use hashbrown::HashMap;

/// How many triangles use each undirected edge.
///
/// Edges are keyed `(min, max)` so both directions map to the same entry.
/// An edge used once is open (boundary); used twice it is interior; used more
/// often it is non-manifold.
#[derive(Debug, Clone, Default)]
pub struct EdgeUsage {
    counts: HashMap<(u32, u32), u32>,
}

impl EdgeUsage {
    /// Count edge usage over a list of triangles.
    ///
    /// # Example
    ///
    /// ```
    /// use course_mesh_blend::EdgeUsage;
    ///
    /// let faces = vec![[0, 1, 2], [1, 3, 2]];
    /// let usage = EdgeUsage::build(&faces);
    ///
    /// assert_eq!(usage.edge_count(), 5);
    /// assert_eq!(usage.boundary_edge_count(), 4); // (1, 2) is shared
    /// ```
    #[must_use]
    pub fn build(faces: &[[u32; 3]]) -> Self {
        let mut counts: HashMap<(u32, u32), u32> = HashMap::with_capacity(faces.len() * 3 / 2);

        for face in faces {
            let edges = [
                normalize_edge(face[0], face[1]),
                normalize_edge(face[1], face[2]),
                normalize_edge(face[2], face[0]),
            ];
            for edge in edges {
                *counts.entry(edge).or_default() += 1;
            }
        }

        Self { counts }
    }

    /// Usage count for an edge, in either direction. 0 if absent.
    #[must_use]
    pub fn usage(&self, v0: u32, v1: u32) -> u32 {
        self.counts
            .get(&normalize_edge(v0, v1))
            .copied()
            .unwrap_or(0)
    }

    /// Iterate over edges used by exactly one triangle.
    pub fn boundary_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.counts
            .iter()
            .filter(|&(_, &n)| n == 1)
            .map(|(&edge, _)| edge)
    }

    /// Count edges used by exactly one triangle.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.counts.values().filter(|&&n| n == 1).count()
    }

    /// Count edges used by more than two triangles.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.counts.values().filter(|&&n| n > 2).count()
    }

    /// True if no edge is open.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.counts.values().all(|&n| n >= 2)
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.counts.len()
    }
}

/// Normalize edge direction so v0 < v1.
#[inline]
fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 < v1 { (v0, v1) } else { (v1, v0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_triangle_is_all_boundary() {
        let usage = EdgeUsage::build(&[[0, 1, 2]]);
        assert_eq!(usage.edge_count(), 3);
        assert_eq!(usage.boundary_edge_count(), 3);
        assert!(!usage.is_watertight());
    }

    #[test]
    fn shared_edge_counts_twice() {
        let usage = EdgeUsage::build(&[[0, 1, 2], [1, 3, 2]]);
        assert_eq!(usage.usage(1, 2), 2);
        assert_eq!(usage.usage(2, 1), 2);
        assert_eq!(usage.usage(0, 1), 1);
        assert_eq!(usage.usage(0, 3), 0);
    }

    #[test]
    fn boundary_edges_are_normalized() {
        let usage = EdgeUsage::build(&[[2, 1, 0]]);
        let mut edges: Vec<_> = usage.boundary_edges().collect();
        edges.sort_unstable();
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn non_manifold_edge() {
        // Three triangles sharing edge (0, 1)
        let usage = EdgeUsage::build(&[[0, 1, 2], [0, 1, 3], [0, 1, 4]]);
        assert_eq!(usage.usage(0, 1), 3);
        assert_eq!(usage.non_manifold_edge_count(), 1);
    }

    #[test]
    fn tetrahedron_is_watertight() {
        let usage = EdgeUsage::build(&[[0, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]]);
        assert_eq!(usage.edge_count(), 6);
        assert_eq!(usage.boundary_edge_count(), 0);
        assert!(usage.is_watertight());
    }

    #[test]
    fn face_order_does_not_matter() {
        let a = EdgeUsage::build(&[[0, 1, 2], [1, 3, 2], [3, 4, 2]]);
        let b = EdgeUsage::build(&[[3, 4, 2], [0, 1, 2], [1, 3, 2]]);
        let mut ea: Vec<_> = a.boundary_edges().collect();
        let mut eb: Vec<_> = b.boundary_edges().collect();
        ea.sort_unstable();
        eb.sort_unstable();
        assert_eq!(ea, eb);
    }
}
