//! KD-tree for nearest-hit ray queries over triangle meshes.
//!
//! This module provides a KD-tree that recursively halves 3D space along the
//! longest axis of each node's bounding box. The tree enables:
//!
//! - Nearest-intersection queries that skip subtrees the ray cannot reach
//! - Any-hit (occlusion) queries for shadow rays
//! - Structural inspection through visitors
//!
//! # Example
//!
//! ```ignore
//! use kd_accel::{KdTree, Ray, TraversalStats, Triangle};
//! use nalgebra::{Point3, Vector3};
//!
//! // Build a tree over triangles owned by the scene
//! let triangles: Vec<Triangle> = /* load scene */;
//! let tree = KdTree::build(&triangles)?;
//!
//! // Find the closest hit along a ray
//! let stats = TraversalStats::new();
//! let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), -Vector3::z());
//! if let Some(hit) = tree.nearest_intersection(&ray, f32::INFINITY, &stats) {
//!     println!("hit at t = {}", hit.t);
//! }
//! ```
//!
//! # Architecture
//!
//! - [`KdTree`]: The main container holding the root node
//! - [`KdNode`]: Nodes storing a bounding box, straddling triangles and two optional children
//! - [`ContainmentTest`]: Strategy trait for classifying triangles against child boxes
//! - [`KdVisitor`]: Visitor trait for walking the tree structure

mod containment;
mod node;
mod tree;
mod visitor;

pub use containment::{ContainmentTest, OverlapContainment, VertexContainment};
pub use node::KdNode;
pub use tree::{BuildReport, Intersection, KdTree, TreeSummary};
pub use visitor::{CollectingVisitor, FnVisitor, KdVisitor};
