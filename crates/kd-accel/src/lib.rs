//! KD-tree ray acceleration structure.
//!
//! Builds an axis-aligned spatial partition over a fixed set of triangles and
//! answers "which triangle does this ray hit first" without testing every
//! triangle in the scene.

mod bounds;
mod config;
mod error;
mod primitive;
mod ray;
mod stats;
mod triangle;

pub mod kd;

pub use bounds::{Axis, BoundingBox};
pub use config::{KdTreeConfig, DEFAULT_LEAF_SIZE, MAX_DEPTH_LIMIT};
pub use error::{KdTreeError, Result};
pub use kd::{
    BuildReport, CollectingVisitor, ContainmentTest, FnVisitor, Intersection, KdNode, KdTree,
    KdVisitor, OverlapContainment, TreeSummary, VertexContainment,
};
pub use primitive::Primitive;
pub use ray::{Ray, RayHit};
pub use stats::{StatsSnapshot, TraversalStats};
pub use triangle::{Triangle, HIT_EPSILON, PARALLEL_EPSILON};
