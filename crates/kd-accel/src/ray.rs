//! Rays and ray hit parameters.

use nalgebra::{Point3, Vector3};

/// A ray in 3D space, `origin + t * direction`.
///
/// The direction does not need to be normalized. Hit distances `t` are
/// expressed in multiples of the direction's length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Creates a new ray from an origin and a direction.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }

    /// Returns the point at parameter `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }

    /// Returns `true` if the ray can be traced at all.
    ///
    /// Zero-length directions and non-finite origin or direction components
    /// never hit anything.
    #[inline]
    pub fn is_traceable(&self) -> bool {
        self.direction.iter().all(|c| c.is_finite())
            && self.origin.iter().all(|c| c.is_finite())
            && self.direction != Vector3::zeros()
    }
}

/// Parameters of a ray/triangle hit.
///
/// `t` is the distance along the ray, `u` and `v` are the barycentric
/// coordinates of the hit point within the triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub t: f32,
    pub u: f32,
    pub v: f32,
}

impl RayHit {
    pub fn new(t: f32, u: f32, v: f32) -> Self {
        Self { t, u, v }
    }
}
