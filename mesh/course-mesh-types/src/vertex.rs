//! Vertex types and attributes.

use nalgebra::{Point3, Vector2, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGB color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexColor {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
}

impl VertexColor {
    /// Create a new color from RGB components.
    ///
    /// # Example
    ///
    /// ```
    /// use course_mesh_types::VertexColor;
    ///
    /// let red = VertexColor::new(255, 0, 0);
    /// assert_eq!(red.r, 255);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from floating point values in [0, 1] range.
    ///
    /// Values are clamped to the valid range.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Truncation and sign loss are safe: values are clamped to [0.0, 1.0] before * 255.0
    pub fn from_float(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: (r.clamp(0.0, 1.0) * 255.0).round() as u8,
            g: (g.clamp(0.0, 1.0) * 255.0).round() as u8,
            b: (b.clamp(0.0, 1.0) * 255.0).round() as u8,
        }
    }

    /// Create a color from the channel values found on an OBJ `v` line.
    ///
    /// Exporters write either normalized floats or 0-255 bytes. If any
    /// channel exceeds 1 all three are treated as bytes and divided by 255.
    ///
    /// # Example
    ///
    /// ```
    /// use course_mesh_types::VertexColor;
    ///
    /// assert_eq!(VertexColor::from_obj_channels(1.0, 0.0, 0.0), VertexColor::RED);
    /// assert_eq!(VertexColor::from_obj_channels(255.0, 0.0, 0.0), VertexColor::RED);
    /// ```
    #[must_use]
    pub fn from_obj_channels(r: f64, g: f64, b: f64) -> Self {
        if r > 1.0 || g > 1.0 || b > 1.0 {
            Self::from_float(r / 255.0, g / 255.0, b / 255.0)
        } else {
            Self::from_float(r, g, b)
        }
    }

    /// White color (255, 255, 255).
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Red color (255, 0, 0).
    pub const RED: Self = Self::new(255, 0, 0);
}

impl Default for VertexColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A fully resolved mesh vertex.
///
/// Unlike raw OBJ data every attribute is present: the importer substitutes
/// [`Vertex::DEFAULT_NORMAL`], a zero uv and [`VertexColor::WHITE`] for
/// attributes the source file does not provide.
///
/// # Example
///
/// ```
/// use course_mesh_types::{Vertex, Point3};
///
/// let v1 = Vertex::new(Point3::new(1.0, 2.0, 3.0));
/// let v2 = Vertex::from_coords(1.0, 2.0, 3.0);
///
/// assert_eq!(v1.position, v2.position);
/// assert_eq!(v1.normal, Vertex::DEFAULT_NORMAL);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// 3D position.
    pub position: Point3<f64>,

    /// Normal vector. Not renormalized; taken as-is from the source.
    pub normal: Vector3<f64>,

    /// Texture coordinates (U, V).
    pub uv: Vector2<f64>,

    /// Vertex color.
    pub color: VertexColor,
}

impl Vertex {
    /// Normal used when the source does not provide one ("up").
    pub const DEFAULT_NORMAL: Vector3<f64> = Vector3::new(0.0, 1.0, 0.0);

    /// Create a vertex at `position` with default attributes.
    #[inline]
    #[must_use]
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: Self::DEFAULT_NORMAL,
            uv: Vector2::zeros(),
            color: VertexColor::WHITE,
        }
    }

    /// Create a vertex from raw coordinates with default attributes.
    #[inline]
    #[must_use]
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Replace the normal.
    #[inline]
    #[must_use]
    pub const fn with_normal(mut self, normal: Vector3<f64>) -> Self {
        self.normal = normal;
        self
    }

    /// Replace the texture coordinates.
    #[inline]
    #[must_use]
    pub const fn with_uv(mut self, uv: Vector2<f64>) -> Self {
        self.uv = uv;
        self
    }

    /// Replace the color.
    #[inline]
    #[must_use]
    pub const fn with_color(mut self, color: VertexColor) -> Self {
        self.color = color;
        self
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_defaults() {
        let v = Vertex::from_coords(1.0, 2.0, 3.0);
        assert!((v.position.x - 1.0).abs() < f64::EPSILON);
        assert!((v.position.y - 2.0).abs() < f64::EPSILON);
        assert!((v.position.z - 3.0).abs() < f64::EPSILON);
        assert_eq!(v.normal, Vector3::y());
        assert_eq!(v.uv, Vector2::zeros());
        assert_eq!(v.color, VertexColor::WHITE);
    }

    #[test]
    fn vertex_builders() {
        let v = Vertex::from_coords(0.0, 0.0, 0.0)
            .with_normal(Vector3::z())
            .with_uv(Vector2::new(0.25, 0.75))
            .with_color(VertexColor::RED);
        assert_eq!(v.normal, Vector3::z());
        assert!((v.uv.y - 0.75).abs() < f64::EPSILON);
        assert_eq!(v.color, VertexColor::RED);
    }

    #[test]
    fn vertex_from_array() {
        let v: Vertex = [1.0, 2.0, 3.0].into();
        assert!((v.position.z - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn color_from_float() {
        let c = VertexColor::from_float(1.0, 0.5, 0.0);
        assert_eq!(c.r, 255);
        assert!((i32::from(c.g) - 127).abs() <= 1);
        assert_eq!(c.b, 0);
    }

    #[test]
    fn color_clamps_values() {
        let c = VertexColor::from_float(2.0, -1.0, 0.5);
        assert_eq!(c.r, 255);
        assert_eq!(c.g, 0);
    }

    #[test]
    fn obj_channels_normalized_floats() {
        let c = VertexColor::from_obj_channels(0.0, 1.0, 0.0);
        assert_eq!(c, VertexColor::new(0, 255, 0));
    }

    #[test]
    fn obj_channels_byte_range() {
        // One channel above 1 switches the whole triple to byte scale
        let c = VertexColor::from_obj_channels(128.0, 1.0, 0.0);
        assert_eq!(c.r, 128);
        assert_eq!(c.g, 1);
        assert_eq!(c.b, 0);
    }
}
