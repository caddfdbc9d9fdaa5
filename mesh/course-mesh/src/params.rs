//! Parameters for a full import.

use course_mesh_blend::{BlendParams, DEFAULT_BLEND_RADIUS};
use course_mesh_io::{AxisConvention, ObjOptions};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for [`import_obj`](crate::import_obj) and
/// [`import_course`](crate::import_course).
///
/// With the `serde` feature this reads from JSON such as
/// `{ "axis": "flip-z", "blend_radius": 0.5 }`; missing fields keep their
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImportParams {
    /// Axis convention applied while parsing. Default: as authored
    pub axis: AxisConvention,

    /// Blend radius in mesh units. Default: 0.2
    pub blend_radius: f64,
}

impl Default for ImportParams {
    fn default() -> Self {
        Self {
            axis: AxisConvention::default(),
            blend_radius: DEFAULT_BLEND_RADIUS,
        }
    }
}

impl ImportParams {
    /// Set the axis convention.
    #[must_use]
    pub const fn with_axis(mut self, axis: AxisConvention) -> Self {
        self.axis = axis;
        self
    }

    /// Set the blend radius.
    #[must_use]
    pub const fn with_blend_radius(mut self, radius: f64) -> Self {
        self.blend_radius = radius;
        self
    }

    /// Parser options.
    #[must_use]
    pub const fn obj_options(&self) -> ObjOptions {
        ObjOptions { axis: self.axis }
    }

    /// Blend parameters.
    #[must_use]
    pub const fn blend_params(&self) -> BlendParams {
        BlendParams {
            radius: self.blend_radius,
        }
    }
}
