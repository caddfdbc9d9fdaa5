//! Raw geometry tables read from an OBJ file.

use nalgebra::{Point3, Vector2, Vector3};

use course_mesh_types::VertexColor;

/// Positions, texture coordinates and normals in file order, 0-based.
///
/// The three tables are independent: a face corner picks one entry from each.
/// Tables only grow while the file is read and are not modified afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGeometryTables {
    positions: Vec<Point3<f64>>,
    colors: Vec<Option<VertexColor>>,
    uvs: Vec<Vector2<f64>>,
    normals: Vec<Vector3<f64>>,
}

impl RawGeometryTables {
    /// Create empty tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a position with its optional color.
    pub fn push_position(&mut self, position: Point3<f64>, color: Option<VertexColor>) {
        self.positions.push(position);
        self.colors.push(color);
    }

    /// Append a texture coordinate.
    pub fn push_uv(&mut self, uv: Vector2<f64>) {
        self.uvs.push(uv);
    }

    /// Append a normal.
    pub fn push_normal(&mut self, normal: Vector3<f64>) {
        self.normals.push(normal);
    }

    /// Number of positions read so far.
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of texture coordinates read so far.
    #[must_use]
    pub fn uv_count(&self) -> usize {
        self.uvs.len()
    }

    /// Number of normals read so far.
    #[must_use]
    pub fn normal_count(&self) -> usize {
        self.normals.len()
    }

    /// Position at a 0-based index.
    #[must_use]
    pub fn position(&self, index: u32) -> Option<Point3<f64>> {
        self.positions.get(index as usize).copied()
    }

    /// Color of the position at a 0-based index, if the file gave one.
    #[must_use]
    pub fn color(&self, index: u32) -> Option<VertexColor> {
        self.colors.get(index as usize).copied().flatten()
    }

    /// Texture coordinate at a 0-based index.
    #[must_use]
    pub fn uv(&self, index: u32) -> Option<Vector2<f64>> {
        self.uvs.get(index as usize).copied()
    }

    /// Normal at a 0-based index.
    #[must_use]
    pub fn normal(&self, index: u32) -> Option<Vector3<f64>> {
        self.normals.get(index as usize).copied()
    }

    /// True if any position carried a color.
    #[must_use]
    pub fn has_colors(&self) -> bool {
        self.colors.iter().any(Option::is_some)
    }
}
