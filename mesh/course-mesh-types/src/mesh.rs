//! Named triangle mesh with per-vertex blend weights.

use std::fmt;

use crate::{Aabb, Vertex};
use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest vertex count that still fits a 16-bit index buffer.
///
/// Matches the threshold hosts use before switching to 32-bit indices.
pub const U16_VERTEX_LIMIT: usize = 65_000;

/// Index buffer width a host needs to render a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IndexFormat {
    /// 16-bit indices.
    U16,
    /// 32-bit indices.
    U32,
}

impl IndexFormat {
    /// Pick the narrowest format for `vertex_count` vertices.
    #[must_use]
    pub const fn for_vertex_count(vertex_count: usize) -> Self {
        if vertex_count > U16_VERTEX_LIMIT {
            Self::U32
        } else {
            Self::U16
        }
    }
}

impl fmt::Display for IndexFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U16 => f.write_str("u16"),
            Self::U32 => f.write_str("u32"),
        }
    }
}

/// A triangle references a vertex slot that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidIndex {
    /// Face containing the bad index.
    pub face: usize,
    /// The out-of-range index.
    pub index: u32,
    /// Number of vertices in the mesh.
    pub vertex_count: usize,
}

/// A named triangle mesh.
///
/// This is the unit the importer hands to its caller: one per OBJ object or
/// group. Ownership passes to the caller.
///
/// # Invariants
///
/// - Every index in `faces` is `< vertices.len()`.
/// - `blend_weights` is either empty (not computed yet) or holds exactly one
///   weight in `[0, 1]` per vertex.
///
/// # Example
///
/// ```
/// use course_mesh_types::{IndexFormat, SurfaceMesh, Vertex};
///
/// let mesh = SurfaceMesh::from_parts(
///     "tee",
///     vec![
///         Vertex::from_coords(0.0, 0.0, 0.0),
///         Vertex::from_coords(1.0, 0.0, 0.0),
///         Vertex::from_coords(0.0, 0.0, 1.0),
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.index_format(), IndexFormat::U16);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfaceMesh {
    /// Mesh name, taken from the OBJ `o`/`g` line or generated.
    pub name: String,

    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    pub faces: Vec<[u32; 3]>,

    /// Per-vertex proximity to the nearest open boundary, in `[0, 1]`.
    pub blend_weights: Vec<f32>,
}

impl SurfaceMesh {
    /// Create a new empty mesh.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            faces: Vec::new(),
            blend_weights: Vec::new(),
        }
    }

    /// Create a mesh from vertices and faces, without blend weights.
    #[must_use]
    pub fn from_parts(
        name: impl Into<String>,
        vertices: Vec<Vertex>,
        faces: Vec<[u32; 3]>,
    ) -> Self {
        Self {
            name: name.into(),
            vertices,
            faces,
            blend_weights: Vec::new(),
        }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// True if the mesh has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Index buffer width needed for this mesh.
    #[inline]
    #[must_use]
    pub fn index_format(&self) -> IndexFormat {
        IndexFormat::for_vertex_count(self.vertices.len())
    }

    /// Vertex positions in slot order.
    #[must_use]
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Bounding box of all vertex positions.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }

    /// Check that every face index refers to an existing vertex.
    ///
    /// # Errors
    ///
    /// Returns the first offending face and index.
    pub fn validate_indices(&self) -> Result<(), InvalidIndex> {
        let vertex_count = self.vertices.len();
        for (face, tri) in self.faces.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(InvalidIndex {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Count vertices that no face references.
    #[must_use]
    pub fn unreferenced_vertex_count(&self) -> usize {
        let mut used = vec![false; self.vertices.len()];
        for &i in self.faces.iter().flatten() {
            if let Some(slot) = used.get_mut(i as usize) {
                *slot = true;
            }
        }
        used.iter().filter(|&&u| !u).count()
    }
}
