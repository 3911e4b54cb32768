//! Axis-aligned bounding boxes.

use nalgebra::{Point3, Vector3};

use crate::{Primitive, Ray};

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes, in tie-breaking priority order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the component index of this axis.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// An axis-aligned box in 3D space.
///
/// For every axis, `min <= max`. Boxes are plain values: they are built once
/// (from scene geometry or by [`split`](Self::split)) and copied around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min: Point3<f32>,
    max: Point3<f32>,
}

impl BoundingBox {
    /// Creates a box spanning two corner points.
    ///
    /// The corners may be given in any order; each axis is normalized so
    /// that `min <= max`.
    pub fn new(a: Point3<f32>, b: Point3<f32>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Returns the smallest box containing every point, or `None` if there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3<f32>>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |bounds, p| bounds.union_point(p)))
    }

    /// Returns the smallest box containing every vertex of every primitive.
    ///
    /// Returns `None` if the iterator is empty.
    pub fn from_primitives<'a, T, I>(primitives: I) -> Option<Self>
    where
        T: Primitive + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        Self::from_points(primitives.into_iter().flat_map(|p| p.vertices()))
    }

    /// Returns the minimum corner.
    #[inline]
    pub fn min(&self) -> Point3<f32> {
        self.min
    }

    /// Returns the maximum corner.
    #[inline]
    pub fn max(&self) -> Point3<f32> {
        self.max
    }

    /// Returns the size of the box along each axis.
    #[inline]
    pub fn extent(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Returns the center point of the box.
    #[inline]
    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns the volume of the box (zero for flat boxes).
    pub fn volume(&self) -> f32 {
        let e = self.extent();
        e.x * e.y * e.z
    }

    /// Returns the axis with the greatest extent.
    ///
    /// Ties are resolved in the order X, then Y, then Z.
    pub fn longest_axis(&self) -> Axis {
        let e = self.extent();
        if e.x >= e.y && e.x >= e.z {
            Axis::X
        } else if e.y >= e.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Returns the smallest box containing both boxes.
    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Returns the smallest box containing this box and a point.
    pub fn union_point(&self, point: Point3<f32>) -> Self {
        Self {
            min: self.min.inf(&point),
            max: self.max.sup(&point),
        }
    }

    /// Splits the box in half along its longest axis.
    ///
    /// Returns `(left, right)`: `left` keeps `min` and ends at the midpoint,
    /// `right` starts at the midpoint and keeps `max`. The two halves share
    /// the splitting plane and tile the original box exactly.
    pub fn split(&self) -> (BoundingBox, BoundingBox) {
        let axis = self.longest_axis().index();
        let mid = self.min[axis] + (self.max[axis] - self.min[axis]) / 2.0;

        let mut left_max = self.max;
        left_max[axis] = mid;
        let mut right_min = self.min;
        right_min[axis] = mid;

        (
            Self {
                min: self.min,
                max: left_max,
            },
            Self {
                min: right_min,
                max: self.max,
            },
        )
    }

    /// Returns `true` if the point lies inside the box or on its boundary.
    #[inline]
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        (0..3).all(|i| self.min[i] <= point[i] && point[i] <= self.max[i])
    }

    /// Returns `true` if at least one vertex of the triangle lies in the box.
    ///
    /// This is a vertex-only approximation: a triangle crossing the box
    /// without any vertex inside it is not detected. See
    /// [`overlaps_triangle`](Self::overlaps_triangle) for the exact test.
    pub fn contains_triangle<P: Primitive + ?Sized>(&self, triangle: &P) -> bool {
        triangle
            .vertices()
            .into_iter()
            .any(|v| self.contains_point(v))
    }

    /// Returns `true` if the triangle and the box share at least one point.
    ///
    /// Separating axis test over the three box face normals, the triangle
    /// normal, and the nine cross products of box axes with triangle edges.
    /// Touching counts as overlapping.
    pub fn overlaps_triangle<P: Primitive + ?Sized>(&self, triangle: &P) -> bool {
        let center = self.center();
        let half = self.extent() / 2.0;
        let [a, b, c] = triangle.vertices();
        let v = [a - center, b - center, c - center];

        // Box face normals.
        for i in 0..3 {
            let lo = v[0][i].min(v[1][i]).min(v[2][i]);
            let hi = v[0][i].max(v[1][i]).max(v[2][i]);
            if lo > half[i] || hi < -half[i] {
                return false;
            }
        }

        let edges = [v[1] - v[0], v[2] - v[1], v[0] - v[2]];

        // Triangle normal.
        let normal = edges[0].cross(&edges[1]);
        if separated_on(&normal, &v, &half) {
            return false;
        }

        // Box axes crossed with triangle edges.
        for unit in [Vector3::x(), Vector3::y(), Vector3::z()] {
            for edge in &edges {
                if separated_on(&unit.cross(edge), &v, &half) {
                    return false;
                }
            }
        }

        true
    }

    /// Slab test: returns `true` if the ray's supporting line passes through the box.
    ///
    /// Per-axis entry and exit distances are intersected across the three
    /// axes; the box is hit when the latest entry is not after the earliest
    /// exit. Zero direction components yield infinite distances that order
    /// correctly against finite ones. An axis whose distances are NaN (origin
    /// exactly on a slab plane of a parallel ray) lies inside the closed slab
    /// and does not constrain the interval.
    ///
    /// Degenerate rays (see [`Ray::is_traceable`]) never hit.
    pub fn intersects(&self, ray: &Ray) -> bool {
        if !ray.is_traceable() {
            return false;
        }

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        for i in 0..3 {
            let t0 = (self.min[i] - ray.origin[i]) / ray.direction[i];
            let t1 = (self.max[i] - ray.origin[i]) / ray.direction[i];
            if t0.is_nan() || t1.is_nan() {
                continue;
            }
            t_near = t_near.max(t0.min(t1));
            t_far = t_far.min(t0.max(t1));
        }

        t_far >= t_near
    }
}

/// Projects the triangle and the box onto `axis` and checks for a gap.
fn separated_on(axis: &Vector3<f32>, vertices: &[Vector3<f32>; 3], half: &Vector3<f32>) -> bool {
    let p = [axis.dot(&vertices[0]), axis.dot(&vertices[1]), axis.dot(&vertices[2])];
    let radius = half.x * axis.x.abs() + half.y * axis.y.abs() + half.z * axis.z.abs();
    let lo = p[0].min(p[1]).min(p[2]);
    let hi = p[0].max(p[1]).max(p[2]);
    lo > radius || hi < -radius
}
