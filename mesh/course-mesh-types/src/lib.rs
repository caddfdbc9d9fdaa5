//! Core mesh types for golf course surface meshes.
//!
//! This crate provides the data model shared by the importer and the
//! boundary blend pass:
//!
//! - [`Vertex`] - A fully resolved vertex (position, normal, uv, color)
//! - [`SurfaceMesh`] - A named triangle mesh with per-vertex blend weights
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`IndexFormat`] - Index buffer width a host needs for a mesh
//!
//! # Layer 0 Crate
//!
//! No engine dependencies. Meshes produced here are plain buffers that a host
//! (game engine, viewer, exporter) copies into its own representation.
//!
//! # Coordinate System
//!
//! Coordinates are stored exactly as the importer produced them. The importer
//! decides the axis convention (see `course-mesh-io`); this crate is
//! convention-agnostic. Face winding is **counter-clockwise (CCW) when viewed
//! from the front** for meshes imported with the default convention.
//!
//! # Example
//!
//! ```
//! use course_mesh_types::{SurfaceMesh, Vertex};
//!
//! let mut mesh = SurfaceMesh::new("green");
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(mesh.validate_indices().is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod mesh;
mod vertex;

pub use bounds::Aabb;
pub use mesh::{IndexFormat, InvalidIndex, SurfaceMesh, U16_VERTEX_LIMIT};
pub use vertex::{Vertex, VertexColor};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector2, Vector3};
