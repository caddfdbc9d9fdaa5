//! Import options.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How OBJ coordinates map onto the output coordinate system.
///
/// OBJ files are authored right-handed. Hosts with a left-handed Y-up
/// system mirror one axis on import. A mirror turns counter-clockwise faces
/// clockwise, so the flip conventions also reverse triangle winding to keep
/// faces front-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AxisConvention {
    /// Keep coordinates as written. Triangles are `(c0, ci, ci+1)`.
    #[default]
    AsAuthored,
    /// Negate Z of positions and normals. Triangles are `(c0, ci+1, ci)`.
    FlipZ,
    /// Negate Y of positions and normals. Triangles are `(c0, ci+1, ci)`.
    FlipY,
}

impl AxisConvention {
    /// Map a source position into the output system.
    #[inline]
    #[must_use]
    pub fn apply_point(self, p: Point3<f64>) -> Point3<f64> {
        match self {
            Self::AsAuthored => p,
            Self::FlipZ => Point3::new(p.x, p.y, -p.z),
            Self::FlipY => Point3::new(p.x, -p.y, p.z),
        }
    }

    /// Map a source normal into the output system.
    #[inline]
    #[must_use]
    pub fn apply_normal(self, n: Vector3<f64>) -> Vector3<f64> {
        match self {
            Self::AsAuthored => n,
            Self::FlipZ => Vector3::new(n.x, n.y, -n.z),
            Self::FlipY => Vector3::new(n.x, -n.y, n.z),
        }
    }

    /// Whether fan triangles must be emitted with reversed winding.
    #[inline]
    #[must_use]
    pub const fn reverses_winding(self) -> bool {
        !matches!(self, Self::AsAuthored)
    }
}

/// Options controlling OBJ import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ObjOptions {
    /// Coordinate convention applied to positions, normals and winding.
    pub axis: AxisConvention,
}

impl ObjOptions {
    /// Set the axis convention.
    #[must_use]
    pub const fn with_axis(mut self, axis: AxisConvention) -> Self {
        self.axis = axis;
        self
    }
}
