//! Error types for KD-tree construction.

use thiserror::Error;

/// Errors that can occur while building a [`KdTree`](crate::KdTree).
///
/// Queries never fail: a query against an empty tree, or with a degenerate
/// ray, simply reports no intersection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KdTreeError {
    /// The triangle set or the configuration cannot be used.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A safety cutoff stopped recursion before the leaf size was reached.
    #[error("construction limit exceeded at depth {depth} with {triangles} triangles left")]
    ConstructionLimitExceeded {
        /// Depth of the node where construction stopped.
        depth: usize,
        /// Number of triangles that would have been forced into that leaf.
        triangles: usize,
    },
}

/// Result type alias for KD-tree operations.
pub type Result<T> = std::result::Result<T, KdTreeError>;
