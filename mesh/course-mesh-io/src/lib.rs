//! Wavefront OBJ import for golf course surface meshes.
//!
//! Course surfaces (fairways, greens, bunkers, ...) arrive as OBJ exports
//! from terrain tools. This crate turns one file into one [`SurfaceMesh`] per
//! `o`/`g` segment:
//!
//! - **Tokenizer** - one [`Directive`] per line, locale-independent numbers
//! - **Tables** - positions (with optional colors), uvs and normals
//! - **Deduplicator** - one output vertex per distinct (position, uv, normal)
//! - **Triangulator** - fan triangulation from each face's first corner
//!
//! # Layer 0 Crate
//!
//! No engine dependencies. Output buffers are plain `Vec`s.
//!
//! # Axis Convention
//!
//! By default coordinates and winding are kept as authored. See
//! [`AxisConvention`] for the mirrored conventions used by left-handed hosts.
//!
//! # Example
//!
//! ```no_run
//! use course_mesh_io::{load_obj, AxisConvention, ObjOptions};
//!
//! let options = ObjOptions::default().with_axis(AxisConvention::FlipZ);
//! let meshes = load_obj("green_03.obj", &options).unwrap();
//! println!("{} meshes", meshes.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod obj;
mod options;
mod segment;
mod tables;
mod tokenize;

pub use error::{IoError, IoResult};
pub use obj::{
    FALLBACK_NAME_PREFIX, ObjDocument, ObjParser, load_obj, parse_obj, read_obj_document,
};
pub use options::{AxisConvention, ObjOptions};
pub use segment::{FaceRecord, FaceSegment, SegmentBuilder, VertexKey, build_segment};
pub use tables::RawGeometryTables;
pub use tokenize::{Directive, RawCorner, parse_line};

pub use course_mesh_types::SurfaceMesh;
