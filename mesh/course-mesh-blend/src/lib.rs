//! Boundary classification and boundary-distance blend weights.
//!
//! Course surfaces are authored as separate open patches. Where two patches
//! meet (fairway into rough, green into fringe) the renderer blends their
//! materials using a per-vertex weight that is 1.0 on the patch rim and falls
//! to 0.0 at [`BlendParams::radius`] inside it.
//!
//! - [`EdgeUsage`] - how many triangles use each undirected edge
//! - [`BoundaryVertexSet`] - vertices touching an edge used exactly once
//! - [`BoundaryIndex`] - k-d tree over boundary positions
//! - [`apply_boundary_blend`] - the whole pass on a [`SurfaceMesh`]
//!
//! Distance queries run in parallel with rayon. The tree is read-only during
//! queries, so the result does not depend on thread count.
//!
//! # Example
//!
//! ```
//! use course_mesh_blend::{apply_boundary_blend, BlendParams};
//! use course_mesh_types::{SurfaceMesh, Vertex};
//!
//! let mut mesh = SurfaceMesh::from_parts(
//!     "tee",
//!     vec![
//!         Vertex::from_coords(0.0, 0.0, 0.0),
//!         Vertex::from_coords(1.0, 0.0, 0.0),
//!         Vertex::from_coords(1.0, 1.0, 0.0),
//!         Vertex::from_coords(0.0, 1.0, 0.0),
//!     ],
//!     vec![[0, 1, 2], [0, 2, 3]],
//! );
//!
//! let summary = apply_boundary_blend(&mut mesh, &BlendParams::default()).unwrap();
//! assert_eq!(summary.boundary_vertex_count, 4);
//! assert_eq!(mesh.blend_weights, vec![1.0; 4]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adjacency;
mod blend;
mod boundary;
mod error;
mod spatial;

pub use adjacency::EdgeUsage;
pub use blend::{
    BlendParams, BlendSummary, DEFAULT_BLEND_RADIUS, apply_boundary_blend, compute_blend_weights,
    nearest_boundary_distances,
};
pub use boundary::BoundaryVertexSet;
pub use error::{BlendError, BlendResult};
pub use spatial::BoundaryIndex;

pub use course_mesh_types::SurfaceMesh;
