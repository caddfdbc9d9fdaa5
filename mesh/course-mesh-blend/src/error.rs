//! Error types for boundary blending.

use thiserror::Error;

/// Result type for blend operations.
pub type BlendResult<T> = Result<T, BlendError>;

/// Errors that can occur while classifying boundaries or computing weights.
#[derive(Debug, Error)]
pub enum BlendError {
    /// Blend radius must be finite and greater than zero.
    #[error("invalid blend radius {radius}: must be finite and > 0")]
    InvalidRadius {
        /// The rejected radius.
        radius: f64,
    },

    /// A face references a vertex that does not exist.
    #[error("invalid vertex index {index} (mesh has {vertex_count} vertices)")]
    InvalidIndex {
        /// The invalid index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },
}
