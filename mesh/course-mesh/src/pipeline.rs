//! Parse, classify and blend in one call.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use course_mesh_blend::{BlendError, BlendSummary, apply_boundary_blend};
use course_mesh_io::{IoError, load_obj, parse_obj};
use course_mesh_types::{Aabb, IndexFormat, SurfaceMesh};
use thiserror::Error;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::params::ImportParams;

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Errors that can occur during a full import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Reading or parsing an OBJ file failed.
    #[error(transparent)]
    Obj(#[from] IoError),

    /// Boundary classification or weighting failed.
    #[error(transparent)]
    Blend(#[from] BlendError),

    /// A course folder path is not a directory.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// Listing a course folder failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One imported mesh and what the blend pass found on it.
#[derive(Debug, Clone)]
pub struct ImportedMesh {
    /// The mesh, with blend weights filled in.
    pub mesh: SurfaceMesh,
    /// Boundary statistics.
    pub blend: BlendSummary,
}

impl ImportedMesh {
    /// Condensed, serializable description of this mesh.
    #[must_use]
    pub fn summary(&self) -> MeshSummary {
        let bounds = self.mesh.bounds();
        MeshSummary {
            name: self.mesh.name.clone(),
            vertex_count: self.mesh.vertex_count(),
            triangle_count: self.mesh.face_count(),
            index_format: self.mesh.index_format(),
            bounds: (!bounds.is_empty()).then_some(bounds),
            blend: self.blend,
        }
    }
}

/// Report line for one imported mesh.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MeshSummary {
    /// Mesh name.
    pub name: String,
    /// Output vertex count.
    pub vertex_count: usize,
    /// Triangle count.
    pub triangle_count: usize,
    /// Index buffer width a host needs.
    pub index_format: IndexFormat,
    /// Bounding box, `None` for a mesh without vertices.
    pub bounds: Option<Aabb>,
    /// Boundary statistics.
    pub blend: BlendSummary,
}

impl std::fmt::Display for MeshSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} vertices, {} triangles ({} indices), {} boundary vertices",
            self.name,
            self.vertex_count,
            self.triangle_count,
            self.index_format,
            self.blend.boundary_vertex_count
        )
    }
}

/// Blend every mesh in place and pair it with its summary.
fn blend_all(meshes: Vec<SurfaceMesh>, params: &ImportParams) -> ImportResult<Vec<ImportedMesh>> {
    let blend_params = params.blend_params();
    meshes
        .into_iter()
        .map(|mut mesh| {
            let blend = apply_boundary_blend(&mut mesh, &blend_params)?;
            debug!(mesh = %mesh.name, "Blended");
            Ok(ImportedMesh { mesh, blend })
        })
        .collect()
}

/// Import OBJ text from a reader.
///
/// # Errors
///
/// Returns [`ImportError::Blend`] for an invalid blend radius (checked before
/// parsing) and [`ImportError::Obj`] for any parse error.
///
/// # Example
///
/// ```
/// use course_mesh::{import_obj_from_reader, ImportParams};
///
/// let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
/// let imported = import_obj_from_reader(obj.as_bytes(), &ImportParams::default()).unwrap();
///
/// assert_eq!(imported.len(), 1);
/// assert_eq!(imported[0].mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
/// assert_eq!(imported[0].mesh.blend_weights, vec![1.0; 4]);
/// ```
pub fn import_obj_from_reader<R: BufRead>(
    reader: R,
    params: &ImportParams,
) -> ImportResult<Vec<ImportedMesh>> {
    params.blend_params().validate()?;
    let meshes = parse_obj(reader, &params.obj_options())?;
    blend_all(meshes, params)
}

/// Import an OBJ file: parse, triangulate, classify boundaries and compute
/// blend weights for each segment.
///
/// # Errors
///
/// Returns [`ImportError::Obj`] wrapping [`IoError::FileNotFound`] if the
/// file does not exist, and otherwise the same errors as
/// [`import_obj_from_reader`].
///
/// # Example
///
/// ```no_run
/// use course_mesh::{import_obj, ImportParams};
///
/// for imported in import_obj("green_07.obj", &ImportParams::default()).unwrap() {
///     println!("{}", imported.summary());
/// }
/// ```
pub fn import_obj<P: AsRef<Path>>(
    path: P,
    params: &ImportParams,
) -> ImportResult<Vec<ImportedMesh>> {
    params.blend_params().validate()?;
    let path = path.as_ref();
    let meshes = load_obj(path, &params.obj_options())?;
    let imported = blend_all(meshes, params)?;
    info!(
        path = %path.display(),
        meshes = imported.len(),
        boundary_vertices = imported
            .iter()
            .map(|m| m.blend.boundary_vertex_count)
            .sum::<usize>(),
        "Imported"
    );
    Ok(imported)
}
