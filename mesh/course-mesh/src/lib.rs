//! Golf course surface import.
//!
//! This umbrella crate re-exports the course-mesh-* crates and adds the
//! one-call pipeline on top of them: parse an OBJ file, triangulate each
//! segment, classify its open boundary and fill per-vertex blend weights.
//!
//! # Quick Start
//!
//! ```no_run
//! use course_mesh::prelude::*;
//!
//! let params = ImportParams::default()
//!     .with_axis(AxisConvention::FlipZ)
//!     .with_blend_radius(0.5);
//!
//! for imported in import_obj("fairway_01.obj", &params).unwrap() {
//!     println!("{}", imported.summary());
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - `SurfaceMesh`, `Vertex`, `Aabb`, `IndexFormat`
//! - [`io`] - OBJ parsing, deduplication and fan triangulation
//! - [`blend`] - Boundary classification and blend weights
//!
//! # Feature Flags
//!
//! - `serde` (default) - Serialize parameters and summaries

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `SurfaceMesh`, `Vertex`, `Aabb`.
pub use course_mesh_types as types;

/// OBJ import.
pub use course_mesh_io as io;

/// Boundary classification and blend weights.
pub use course_mesh_blend as blend;

mod course;
mod params;
mod pipeline;

pub use course::{
    ImportGroup, ImportedFile, ImportedGroup, SurfaceKind, group_prefix, import_course,
    scan_course_folder,
};
pub use params::ImportParams;
pub use pipeline::{
    ImportError, ImportResult, ImportedMesh, MeshSummary, import_obj, import_obj_from_reader,
};

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for course import.
///
/// # Usage
///
/// ```
/// use course_mesh::prelude::*;
/// ```
pub mod prelude {
    pub use course_mesh_types::{Aabb, IndexFormat, SurfaceMesh, Vertex, VertexColor};

    pub use course_mesh_io::{AxisConvention, ObjOptions, load_obj, parse_obj};

    pub use course_mesh_blend::{BlendParams, BlendSummary, apply_boundary_blend};

    pub use crate::{
        ImportError, ImportParams, ImportedMesh, SurfaceKind, import_course, import_obj,
        scan_course_folder,
    };
}
