//! Triangle primitive with a Möller–Trumbore ray predicate.

use nalgebra::{Point3, Vector3};

use crate::{BoundingBox, Primitive, Ray, RayHit};

/// Determinants below this magnitude mean the ray is parallel to the triangle.
pub const PARALLEL_EPSILON: f32 = 1e-9;

/// Hits closer than this to the ray origin are ignored (self-intersection guard).
pub const HIT_EPSILON: f32 = 1e-6;

/// A triangle in 3D space, defined by three vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    vertices: [Point3<f32>; 3],
}

impl Triangle {
    /// Creates a new triangle from three points.
    ///
    /// The winding order determines the normal direction via the right-hand rule:
    /// normal = (b - a) × (c - a)
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    #[inline]
    pub fn p1(&self) -> Point3<f32> {
        self.vertices[0]
    }

    #[inline]
    pub fn p2(&self) -> Point3<f32> {
        self.vertices[1]
    }

    #[inline]
    pub fn p3(&self) -> Point3<f32> {
        self.vertices[2]
    }

    /// Computes the (unnormalized) normal vector of the triangle.
    pub fn normal(&self) -> Vector3<f32> {
        let [a, b, c] = &self.vertices;
        (b - a).cross(&(c - a))
    }

    /// Computes the unit normal vector of the triangle.
    ///
    /// Returns `None` if the triangle is degenerate (zero area).
    pub fn unit_normal(&self) -> Option<Vector3<f32>> {
        let n = self.normal();
        let len = n.norm();
        if len > f32::EPSILON {
            Some(n / len)
        } else {
            None
        }
    }

    /// Computes the centroid (center of mass) of the triangle.
    pub fn centroid(&self) -> Point3<f32> {
        let [a, b, c] = &self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Returns the tight bounding box of the triangle.
    pub fn bounds(&self) -> BoundingBox {
        let [a, b, c] = self.vertices;
        BoundingBox::new(a, a).union_point(b).union_point(c)
    }
}

impl Primitive for Triangle {
    #[inline]
    fn vertices(&self) -> [Point3<f32>; 3] {
        self.vertices
    }

    fn intersect(&self, ray: &Ray, max_t: f32) -> Option<RayHit> {
        let [a, b, c] = &self.vertices;
        let e1 = b - a;
        let e2 = c - a;

        let pvec = ray.direction.cross(&e2);
        let det = e1.dot(&pvec);
        if det.abs() < PARALLEL_EPSILON || !det.is_finite() {
            return None;
        }
        let inv_det = 1.0 / det;

        let tvec = ray.origin - a;
        let u = tvec.dot(&pvec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(&e1);
        let v = ray.direction.dot(&qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = e2.dot(&qvec) * inv_det;
        if t > HIT_EPSILON && t < max_t {
            Some(RayHit::new(t, u, v))
        } else {
            None
        }
    }
}
