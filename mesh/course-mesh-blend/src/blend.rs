//! Boundary-distance blend weights.

use course_mesh_types::SurfaceMesh;
use nalgebra::Point3;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::adjacency::EdgeUsage;
use crate::boundary::BoundaryVertexSet;
use crate::error::{BlendError, BlendResult};
use crate::spatial::BoundaryIndex;

/// Default blend radius in mesh units.
pub const DEFAULT_BLEND_RADIUS: f64 = 0.2;

/// Parameters for the boundary blend.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BlendParams {
    /// Distance over which the weight falls from 1.0 at the boundary to 0.0.
    /// Must be finite and positive. Default: 0.2
    pub radius: f64,
}

impl Default for BlendParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_BLEND_RADIUS,
        }
    }
}

impl BlendParams {
    /// Set the blend radius.
    #[must_use]
    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Check that the radius is usable.
    ///
    /// # Errors
    ///
    /// Returns [`BlendError::InvalidRadius`] if the radius is not finite or
    /// not greater than zero.
    pub fn validate(&self) -> BlendResult<()> {
        if self.radius.is_finite() && self.radius > 0.0 {
            Ok(())
        } else {
            Err(BlendError::InvalidRadius {
                radius: self.radius,
            })
        }
    }

    /// Weight for a vertex at `distance` from the nearest boundary vertex.
    #[inline]
    #[must_use]
    pub fn weight_at(&self, distance: f64) -> f64 {
        1.0 - (distance / self.radius).clamp(0.0, 1.0)
    }
}

/// Distance from each position to the nearest boundary vertex.
///
/// Boundary vertices get exactly 0.0. Returns `None` if there are no
/// boundary vertices.
#[must_use]
pub fn nearest_boundary_distances(
    positions: &[Point3<f64>],
    boundary: &BoundaryVertexSet,
) -> Option<Vec<f64>> {
    let index = BoundaryIndex::build(positions, boundary)?;
    debug!(boundary = index.boundary_count(), "Built boundary k-d tree");

    let distances = positions
        .par_iter()
        .enumerate()
        .map(|(i, p)| {
            if boundary.is_boundary(i) {
                0.0
            } else {
                index.nearest(p).1
            }
        })
        .collect();
    Some(distances)
}

/// Compute one blend weight per position.
///
/// # Errors
///
/// Returns [`BlendError::InvalidRadius`] if `params` fails validation.
///
/// # Example
///
/// ```
/// use course_mesh_blend::{compute_blend_weights, BlendParams, BoundaryVertexSet};
/// use nalgebra::Point3;
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
/// ];
/// let boundary = BoundaryVertexSet::from_faces(3, &[[0, 1, 2]]).unwrap();
/// let weights = compute_blend_weights(&positions, &boundary, &BlendParams::default()).unwrap();
/// assert_eq!(weights, vec![1.0, 1.0, 1.0]);
/// ```
pub fn compute_blend_weights(
    positions: &[Point3<f64>],
    boundary: &BoundaryVertexSet,
    params: &BlendParams,
) -> BlendResult<Vec<f32>> {
    params.validate()?;

    let Some(distances) = nearest_boundary_distances(positions, boundary) else {
        debug!("No boundary vertices, all blend weights are zero");
        return Ok(vec![0.0; positions.len()]);
    };

    #[allow(clippy::cast_possible_truncation)]
    let weights = distances
        .into_iter()
        .enumerate()
        .map(|(i, d)| {
            if boundary.is_boundary(i) {
                1.0
            } else {
                params.weight_at(d) as f32
            }
        })
        .collect();
    Ok(weights)
}

/// What [`apply_boundary_blend`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlendSummary {
    /// Vertices in the mesh.
    pub vertex_count: usize,
    /// Vertices on an open edge.
    pub boundary_vertex_count: usize,
    /// Edges used by exactly one triangle.
    pub boundary_edge_count: usize,
    /// Edges used by three or more triangles.
    pub non_manifold_edge_count: usize,
    /// Vertices with a weight above zero (boundary vertices included).
    pub weighted_vertex_count: usize,
}

impl BlendSummary {
    /// True if the mesh has no open edges.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.boundary_edge_count == 0
    }
}

impl std::fmt::Display for BlendSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} vertices, {} on boundary ({} open edges), {} weighted",
            self.vertex_count,
            self.boundary_vertex_count,
            self.boundary_edge_count,
            self.weighted_vertex_count
        )
    }
}

/// Classify the boundary of `mesh` and fill its blend weights.
///
/// Replaces any weights already present.
///
/// # Errors
///
/// Returns [`BlendError::InvalidRadius`] for a bad radius and
/// [`BlendError::InvalidIndex`] if a face references a missing vertex. The
/// mesh is left unchanged on error.
pub fn apply_boundary_blend(
    mesh: &mut SurfaceMesh,
    params: &BlendParams,
) -> BlendResult<BlendSummary> {
    params.validate()?;

    let vertex_count = mesh.vertex_count();
    if let Some(&index) = mesh
        .faces
        .iter()
        .flatten()
        .find(|&&i| i as usize >= vertex_count)
    {
        return Err(BlendError::InvalidIndex {
            index,
            vertex_count,
        });
    }

    let usage = EdgeUsage::build(&mesh.faces);
    let boundary = BoundaryVertexSet::from_edge_usage(vertex_count, &usage);
    let positions = mesh.positions();
    let weights = compute_blend_weights(&positions, &boundary, params)?;

    let summary = BlendSummary {
        vertex_count,
        boundary_vertex_count: boundary.count(),
        boundary_edge_count: usage.boundary_edge_count(),
        non_manifold_edge_count: usage.non_manifold_edge_count(),
        weighted_vertex_count: weights.iter().filter(|&&w| w > 0.0).count(),
    };
    mesh.blend_weights = weights;

    info!(mesh = %mesh.name, radius = params.radius, "Blend: {summary}");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use course_mesh_types::Vertex;

    /// Flat `n x n` grid of quads in the XZ plane with the given spacing.
    fn grid(n: u32, spacing: f64) -> SurfaceMesh {
        let mut vertices = Vec::new();
        for z in 0..=n {
            for x in 0..=n {
                vertices.push(Vertex::from_coords(
                    f64::from(x) * spacing,
                    0.0,
                    f64::from(z) * spacing,
                ));
            }
        }
        let row = n + 1;
        let mut faces = Vec::new();
        for z in 0..n {
            for x in 0..n {
                let i = z * row + x;
                faces.push([i, i + 1, i + row + 1]);
                faces.push([i, i + row + 1, i + row]);
            }
        }
        SurfaceMesh::from_parts("grid", vertices, faces)
    }

    fn icosahedron() -> SurfaceMesh {
        let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
        let coords = [
            [-1.0, t, 0.0],
            [1.0, t, 0.0],
            [-1.0, -t, 0.0],
            [1.0, -t, 0.0],
            [0.0, -1.0, t],
            [0.0, 1.0, t],
            [0.0, -1.0, -t],
            [0.0, 1.0, -t],
            [t, 0.0, -1.0],
            [t, 0.0, 1.0],
            [-t, 0.0, -1.0],
            [-t, 0.0, 1.0],
        ];
        let faces = vec![
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];
        let vertices = coords.iter().map(|&c| Vertex::from(c)).collect();
        SurfaceMesh::from_parts("ico", vertices, faces)
    }

    #[test]
    fn default_radius() {
        assert_relative_eq!(BlendParams::default().radius, 0.2);
    }

    #[test]
    fn rejects_bad_radius() {
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let params = BlendParams::default().with_radius(radius);
            assert!(matches!(
                params.validate(),
                Err(BlendError::InvalidRadius { .. })
            ));
        }
    }

    #[test]
    fn weight_falloff() {
        let params = BlendParams::default().with_radius(2.0);
        assert_relative_eq!(params.weight_at(0.0), 1.0);
        assert_relative_eq!(params.weight_at(0.5), 0.75);
        assert_relative_eq!(params.weight_at(2.0), 0.0);
        assert_relative_eq!(params.weight_at(5.0), 0.0);
    }

    #[test]
    fn quad_is_fully_weighted() {
        let mut mesh = grid(1, 1.0);
        let summary = apply_boundary_blend(&mut mesh, &BlendParams::default()).unwrap();
        assert_eq!(summary.boundary_vertex_count, 4);
        assert_eq!(summary.boundary_edge_count, 4);
        assert_eq!(mesh.blend_weights, vec![1.0; 4]);
    }

    #[test]
    fn closed_mesh_has_zero_weights() {
        let mut mesh = icosahedron();
        let summary = apply_boundary_blend(&mut mesh, &BlendParams::default()).unwrap();
        assert!(summary.is_closed());
        assert_eq!(summary.boundary_vertex_count, 0);
        assert_eq!(summary.weighted_vertex_count, 0);
        assert_eq!(mesh.blend_weights, vec![0.0; 12]);
    }

    #[test]
    fn interior_beyond_radius_is_zero() {
        // 4x4 grid, spacing 1: the center vertex (2, 2) is 2 units from the rim
        let mut mesh = grid(4, 1.0);
        let params = BlendParams::default().with_radius(1.5);
        apply_boundary_blend(&mut mesh, &params).unwrap();

        let center = 2 * 5 + 2;
        assert_eq!(mesh.blend_weights[center], 0.0);

        // One step in from the rim: 1 - 1/1.5
        let inner = 5 + 1;
        assert_relative_eq!(mesh.blend_weights[inner], 1.0 - 1.0 / 1.5, epsilon = 1e-6);

        for (i, &w) in mesh.blend_weights.iter().enumerate() {
            let (x, z) = (i % 5, i / 5);
            if x == 0 || x == 4 || z == 0 || z == 4 {
                assert_eq!(w, 1.0, "rim vertex {i}");
            }
        }
    }

    #[test]
    fn replaces_existing_weights() {
        let mut mesh = grid(2, 1.0);
        mesh.blend_weights = vec![0.5; 3];
        apply_boundary_blend(&mut mesh, &BlendParams::default()).unwrap();
        assert_eq!(mesh.blend_weights.len(), mesh.vertex_count());
    }

    #[test]
    fn invalid_index_leaves_mesh_untouched() {
        let mut mesh = grid(1, 1.0);
        mesh.faces.push([0, 1, 9]);
        let err = apply_boundary_blend(&mut mesh, &BlendParams::default()).unwrap_err();
        assert!(matches!(err, BlendError::InvalidIndex { index: 9, .. }));
        assert!(mesh.blend_weights.is_empty());
    }

    #[test]
    fn empty_mesh_is_fine() {
        let mut mesh = SurfaceMesh::new("empty");
        let summary = apply_boundary_blend(&mut mesh, &BlendParams::default()).unwrap();
        assert_eq!(summary, BlendSummary::default());
        assert!(mesh.blend_weights.is_empty());
    }

    #[test]
    fn distances_without_boundary() {
        let mesh = icosahedron();
        let boundary = BoundaryVertexSet::from_faces(12, &mesh.faces).unwrap();
        assert!(nearest_boundary_distances(&mesh.positions(), &boundary).is_none());
    }

    /// Weights by scanning every boundary vertex for every vertex.
    fn brute_force_weights(mesh: &SurfaceMesh, params: &BlendParams) -> Vec<f32> {
        let boundary = BoundaryVertexSet::from_faces(mesh.vertex_count(), &mesh.faces).unwrap();
        let positions = mesh.positions();
        let rim: Vec<_> = boundary.indices().map(|i| positions[i]).collect();
        #[allow(clippy::cast_possible_truncation)]
        positions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if boundary.is_boundary(i) {
                    return 1.0;
                }
                let d = rim
                    .iter()
                    .map(|q| (p - q).norm())
                    .fold(f64::INFINITY, f64::min);
                params.weight_at(d) as f32
            })
            .collect()
    }

    fn assert_matches_brute_force(mesh: &mut SurfaceMesh, params: &BlendParams) {
        let expected = brute_force_weights(mesh, params);
        apply_boundary_blend(mesh, params).unwrap();
        assert_eq!(mesh.blend_weights.len(), expected.len());
        for (i, (&got, &want)) in mesh.blend_weights.iter().zip(&expected).enumerate() {
            assert!((got - want).abs() <= 1e-6, "vertex {i}: {got} vs {want}");
        }
    }

    #[test]
    fn large_flat_grid_matches_brute_force() {
        // Exactly planar: every boundary vertex shares y = 0, and whole rows
        // share x or z.
        let mut mesh = grid(100, 0.01);
        assert_eq!(mesh.vertex_count(), 101 * 101);
        let params = BlendParams::default().with_radius(0.05);
        assert_matches_brute_force(&mut mesh, &params);

        let rim = mesh.blend_weights.iter().filter(|&&w| w == 1.0).count();
        assert_eq!(rim, 400);
    }

    #[test]
    fn coincident_patches_match_brute_force() {
        // Two copies of the same flat patch sharing no vertices, so every
        // boundary position appears twice.
        let patch = grid(40, 0.025);
        let offset = u32::try_from(patch.vertex_count()).unwrap();
        let mut vertices = patch.vertices.clone();
        vertices.extend_from_slice(&patch.vertices);
        let mut faces = patch.faces.clone();
        faces.extend(patch.faces.iter().map(|f| f.map(|i| i + offset)));
        let mut mesh = SurfaceMesh::from_parts("doubled", vertices, faces);

        assert_matches_brute_force(&mut mesh, &BlendParams::default());
    }
}
