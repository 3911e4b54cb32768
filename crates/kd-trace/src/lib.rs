//! Synthetic scene generators for the KD-tree driver.

use kd_accel::Triangle;
use nalgebra::{Point3, Vector3};

/// Generates an `n` x `n` grid of unit right triangles in the XY plane.
///
/// Cell `(col, row)` holds the triangle with its right angle at `(col, row, 0)`.
/// Triangles are ordered row by row.
pub fn grid_scene(n: usize) -> Vec<Triangle> {
    let mut triangles = Vec::with_capacity(n * n);
    for row in 0..n {
        for col in 0..n {
            let (x, y) = (col as f32, row as f32);
            triangles.push(Triangle::new(
                Point3::new(x, y, 0.0),
                Point3::new(x + 1.0, y, 0.0),
                Point3::new(x, y + 1.0, 0.0),
            ));
        }
    }
    triangles
}

/// Generates the 12 triangles of an axis-aligned cube.
pub fn cube_triangles(center: Point3<f32>, size: f32) -> Vec<Triangle> {
    let half = size / 2.0;

    // 8 corners of the cube
    let corners = [
        center + Vector3::new(-half, -half, -half), // 0: left-bottom-back
        center + Vector3::new(half, -half, -half),  // 1: right-bottom-back
        center + Vector3::new(half, half, -half),   // 2: right-top-back
        center + Vector3::new(-half, half, -half),  // 3: left-top-back
        center + Vector3::new(-half, -half, half),  // 4: left-bottom-front
        center + Vector3::new(half, -half, half),   // 5: right-bottom-front
        center + Vector3::new(half, half, half),    // 6: right-top-front
        center + Vector3::new(-half, half, half),   // 7: left-top-front
    ];

    // 6 faces with counter-clockwise winding (viewed from outside)
    let faces: [[usize; 4]; 6] = [
        [4, 5, 6, 7], // front (+Z)
        [1, 0, 3, 2], // back (-Z)
        [0, 4, 7, 3], // left (-X)
        [5, 1, 2, 6], // right (+X)
        [7, 6, 2, 3], // top (+Y)
        [0, 1, 5, 4], // bottom (-Y)
    ];

    faces
        .iter()
        .flat_map(|[a, b, c, d]| {
            [
                Triangle::new(corners[*a], corners[*b], corners[*c]),
                Triangle::new(corners[*a], corners[*c], corners[*d]),
            ]
        })
        .collect()
}

/// Places `count` cubes of size 0.5 on a diagonal above a grid of size `n`.
pub fn cubes_above_grid(n: usize, count: usize) -> Vec<Triangle> {
    (0..count)
        .flat_map(|i| {
            let t = (i as f32 + 0.5) / count as f32;
            let center = Point3::new(t * n as f32, t * n as f32, 1.0 + i as f32 * 0.25);
            cube_triangles(center, 0.5)
        })
        .collect()
}
