//! The primitive interface consumed by the KD-tree.

use nalgebra::Point3;

use crate::{Ray, RayHit};

/// A triangle-like primitive that can be stored in a [`KdTree`](crate::KdTree).
///
/// The tree only looks at the three vertices (to classify the primitive
/// against boxes during construction) and at the ray predicate (to test hits
/// during queries). Everything else about the primitive is opaque to it.
pub trait Primitive {
    /// Returns the three vertices `p1, p2, p3`.
    fn vertices(&self) -> [Point3<f32>; 3];

    /// Intersects the primitive with a ray.
    ///
    /// Implementations must only report hits with `t` strictly below
    /// `max_t`, and above a small positive epsilon. Returning `None` for an
    /// exact tie with `max_t` is what keeps the first discovered primitive
    /// when two primitives are hit at the same distance.
    fn intersect(&self, ray: &Ray, max_t: f32) -> Option<RayHit>;
}

