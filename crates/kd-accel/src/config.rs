//! Construction parameters for the KD-tree.

use crate::{KdTreeError, Result};

/// Default number of triangles a node may hold before it is split.
pub const DEFAULT_LEAF_SIZE: usize = 4;

/// Upper bound for an explicit `max_depth`; recursion depth equals stack depth.
pub const MAX_DEPTH_LIMIT: usize = 128;

/// Configuration for [`KdTree`](crate::KdTree) construction.
///
/// ```ignore
/// let config = KdTreeConfig::default().with_leaf_size(2).with_max_depth(16);
/// let tree = KdTree::build_with(&triangles, &config, &VertexContainment)?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KdTreeConfig {
    /// Nodes holding at most this many triangles become leaves.
    pub leaf_size: usize,

    /// Maximum node depth (root is depth 0). `None` picks a depth from the
    /// triangle count, see [`KdTreeConfig::depth_limit`].
    pub max_depth: Option<usize>,

    /// Nodes whose longest extent is at most this become leaves.
    pub min_extent: f32,

    /// Fail with [`KdTreeError::ConstructionLimitExceeded`] instead of
    /// falling back to an oversized leaf when a cutoff fires.
    pub strict: bool,
}

impl Default for KdTreeConfig {
    fn default() -> Self {
        Self {
            leaf_size: DEFAULT_LEAF_SIZE,
            max_depth: None,
            min_extent: 0.0,
            strict: false,
        }
    }
}

impl KdTreeConfig {
    /// Sets the leaf size threshold.
    pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    /// Sets an explicit maximum depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Sets the minimum box extent below which nodes are not split.
    pub fn with_min_extent(mut self, min_extent: f32) -> Self {
        self.min_extent = min_extent;
        self
    }

    /// Enables or disables strict cutoff handling.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Returns the depth limit used for a tree over `triangle_count` triangles.
    ///
    /// Without an explicit `max_depth` this is `round(8 + 1.3 * log2(n))`.
    pub fn depth_limit(&self, triangle_count: usize) -> usize {
        match self.max_depth {
            Some(depth) => depth,
            None => {
                let n = triangle_count.max(1) as f32;
                ((8.0 + 1.3 * n.log2()).round() as usize).min(MAX_DEPTH_LIMIT)
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.leaf_size == 0 {
            return Err(KdTreeError::InvalidInput(
                "leaf_size must be positive".to_string(),
            ));
        }
        if let Some(depth) = self.max_depth {
            if depth > MAX_DEPTH_LIMIT {
                return Err(KdTreeError::InvalidInput(format!(
                    "max_depth {} exceeds the limit of {}",
                    depth, MAX_DEPTH_LIMIT
                )));
            }
        }
        if !self.min_extent.is_finite() || self.min_extent < 0.0 {
            return Err(KdTreeError::InvalidInput(
                "min_extent must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
