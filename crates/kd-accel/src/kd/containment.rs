//! Triangle classification strategies for KD-tree construction.
//!
//! When a node is split, every triangle is tested against both child boxes.
//! Triangles accepted by exactly one child move down into it, triangles
//! accepted by both stay at the node. The strategy decides what "accepted"
//! means, trading build speed for classification accuracy.

use crate::{BoundingBox, Primitive};

/// Strategy for deciding whether a triangle belongs to a box.
pub trait ContainmentTest {
    /// Returns `true` if `triangle` should be assigned to `bounds`.
    fn contains<T: Primitive + ?Sized>(&self, bounds: &BoundingBox, triangle: &T) -> bool;
}

/// Accepts a triangle when at least one of its vertices lies in the box.
///
/// Cheap, and exact for the common case of small triangles. A triangle that
/// crosses a box without any vertex inside it is not assigned to that box.
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexContainment;

impl ContainmentTest for VertexContainment {
    #[inline]
    fn contains<T: Primitive + ?Sized>(&self, bounds: &BoundingBox, triangle: &T) -> bool {
        bounds.contains_triangle(triangle)
    }
}

/// Accepts a triangle when any part of it overlaps the box.
///
/// Uses a separating axis test, so large triangles spanning several cells are
/// classified correctly at the cost of more arithmetic per test.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapContainment;

impl ContainmentTest for OverlapContainment {
    #[inline]
    fn contains<T: Primitive + ?Sized>(&self, bounds: &BoundingBox, triangle: &T) -> bool {
        bounds.overlaps_triangle(triangle)
    }
}
