//! Error types for mesh processing and body configuration.

use thiserror::Error;

/// Errors from centroid computation and mesh validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Triangle index list does not describe whole triangles
    #[error("triangle index count {count} is not a multiple of 3")]
    InvalidIndexCount {
        /// Number of indices supplied
        count: usize,
    },

    /// A triangle references a vertex that does not exist
    #[error("index {index} at position {position} is out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds {
        /// Offending index value
        index: u32,
        /// Position of the index in the triangle list
        position: usize,
        /// Number of vertices in the mesh
        vertex_count: usize,
    },

    /// Total surface area is zero, so the centroid is undefined
    #[error("mesh with {triangles} triangles has zero total area")]
    Degenerate {
        /// Number of triangles that were summed
        triangles: usize,
    },
}

/// Errors from loading a body configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
