//! Vertex deduplication and fan triangulation for one mesh segment.
//!
//! A segment is the run of faces between two `o`/`g` markers. Each segment
//! becomes one [`SurfaceMesh`] with its own vertex slots.

use hashbrown::HashMap;
use tracing::debug;

use course_mesh_types::{SurfaceMesh, Vertex};

use crate::error::{IoError, IoResult};
use crate::options::AxisConvention;
use crate::tables::RawGeometryTables;

/// Identity of an output vertex: the (position, uv, normal) table indices of
/// a face corner, 0-based. Two corners with equal keys share one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexKey {
    /// Index into the position table.
    pub position: u32,
    /// Index into the texture coordinate table, if the corner has one.
    pub uv: Option<u32>,
    /// Index into the normal table, if the corner has one.
    pub normal: Option<u32>,
}

impl VertexKey {
    /// Key with only a position reference.
    #[must_use]
    pub const fn position_only(position: u32) -> Self {
        Self {
            position,
            uv: None,
            normal: None,
        }
    }
}

/// One polygonal face: its corner keys and the source line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceRecord {
    /// 1-based source line, for error reporting.
    pub line: usize,
    /// Corner keys in source order.
    pub corners: Vec<VertexKey>,
}

impl FaceRecord {
    /// Number of triangles fan triangulation produces for this face.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.corners.len().saturating_sub(2)
    }
}

/// The faces of one named segment, before deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaceSegment {
    /// Segment name.
    pub name: String,
    /// Faces in source order.
    pub faces: Vec<FaceRecord>,
}

impl FaceSegment {
    /// Create an empty segment.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            faces: Vec::new(),
        }
    }

    /// Total triangles this segment will produce.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(FaceRecord::triangle_count).sum()
    }

    /// Total face corners across all faces.
    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.faces.iter().map(|f| f.corners.len()).sum()
    }
}

/// Accumulates deduplicated vertices and triangles for one segment.
///
/// # Example
///
/// ```
/// use course_mesh_io::{
///     AxisConvention, FaceRecord, RawGeometryTables, SegmentBuilder, VertexKey,
/// };
/// use nalgebra::Point3;
///
/// let mut tables = RawGeometryTables::new();
/// for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
///     tables.push_position(Point3::new(x, y, 0.0), None);
/// }
///
/// let mut builder = SegmentBuilder::new(&tables, AxisConvention::AsAuthored);
/// builder
///     .add_face(&FaceRecord {
///         line: 5,
///         corners: (0..4).map(VertexKey::position_only).collect(),
///     })
///     .unwrap();
///
/// let mesh = builder.finish("quad").unwrap();
/// assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
/// ```
#[derive(Debug)]
pub struct SegmentBuilder<'a> {
    tables: &'a RawGeometryTables,
    reverse_winding: bool,
    slots: HashMap<VertexKey, u32>,
    vertices: Vec<Vertex>,
    faces: Vec<[u32; 3]>,
}

impl<'a> SegmentBuilder<'a> {
    /// Create a builder reading from `tables`.
    ///
    /// The tables must already hold coordinates in the output convention;
    /// `axis` only decides the triangle winding here.
    #[must_use]
    pub fn new(tables: &'a RawGeometryTables, axis: AxisConvention) -> Self {
        Self {
            tables,
            reverse_winding: axis.reverses_winding(),
            slots: HashMap::new(),
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Add a face, fan-triangulated from its first corner.
    ///
    /// Faces with fewer than 3 corners are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Malformed`] if a corner references a position,
    /// texture coordinate or normal that does not exist.
    pub fn add_face(&mut self, face: &FaceRecord) -> IoResult<()> {
        if face.corners.len() < 3 {
            return Ok(());
        }

        let mut slots = Vec::with_capacity(face.corners.len());
        for key in &face.corners {
            slots.push(self.slot_for(*key, face.line)?);
        }

        let anchor = slots[0];
        for pair in slots[1..].windows(2) {
            let tri = if self.reverse_winding {
                [anchor, pair[1], pair[0]]
            } else {
                [anchor, pair[0], pair[1]]
            };
            self.faces.push(tri);
        }
        Ok(())
    }

    /// Number of distinct vertices created so far.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles emitted so far.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Finish the segment and hand out the mesh.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::EmptyMesh`] if no triangles were produced.
    pub fn finish(self, name: impl Into<String>) -> IoResult<SurfaceMesh> {
        let name = name.into();
        if self.faces.is_empty() {
            return Err(IoError::EmptyMesh { name });
        }
        debug!(
            name = %name,
            vertices = self.vertices.len(),
            triangles = self.faces.len(),
            "Built mesh segment"
        );
        Ok(SurfaceMesh::from_parts(name, self.vertices, self.faces))
    }

    fn slot_for(&mut self, key: VertexKey, line: usize) -> IoResult<u32> {
        if let Some(&slot) = self.slots.get(&key) {
            return Ok(slot);
        }

        let vertex = self.resolve(key, line)?;
        let slot = u32::try_from(self.vertices.len())
            .map_err(|_| IoError::malformed(line, "f", "segment exceeds u32 vertex slots"))?;
        self.vertices.push(vertex);
        self.slots.insert(key, slot);
        Ok(slot)
    }

    fn resolve(&self, key: VertexKey, line: usize) -> IoResult<Vertex> {
        let tables = self.tables;
        let position = tables.position(key.position).ok_or_else(|| {
            out_of_range(line, "position", key.position, tables.position_count())
        })?;
        let mut vertex = Vertex::new(position);

        if let Some(color) = tables.color(key.position) {
            vertex.color = color;
        }
        if let Some(i) = key.uv {
            vertex.uv = tables
                .uv(i)
                .ok_or_else(|| out_of_range(line, "texture coordinate", i, tables.uv_count()))?;
        }
        if let Some(i) = key.normal {
            vertex.normal = tables
                .normal(i)
                .ok_or_else(|| out_of_range(line, "normal", i, tables.normal_count()))?;
        }
        Ok(vertex)
    }
}

fn out_of_range(line: usize, table: &str, index: u32, len: usize) -> IoError {
    IoError::malformed(
        line,
        "f",
        format!(
            "{table} index {} out of range (file has {len})",
            u64::from(index) + 1
        ),
    )
}

/// Deduplicate and triangulate a whole segment.
///
/// # Errors
///
/// Returns [`IoError::Malformed`] for out-of-range references and
/// [`IoError::EmptyMesh`] if the segment yields no triangles.
pub fn build_segment(
    segment: &FaceSegment,
    tables: &RawGeometryTables,
    axis: AxisConvention,
) -> IoResult<SurfaceMesh> {
    let mut builder = SegmentBuilder::new(tables, axis);
    for face in &segment.faces {
        builder.add_face(face)?;
    }
    builder.finish(segment.name.clone())
}
