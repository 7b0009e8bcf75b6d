//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use nalgebra::Point3;
use sdforge::{float_types::Real, mesh::Mesh, sdf::Sdf3};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Returns the bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// of every vertex in the mesh.
pub fn bounding_box(mesh: &Mesh) -> [Real; 6] {
    let bb = mesh.bounding_box();
    [bb.mins.x, bb.mins.y, bb.mins.z, bb.maxs.x, bb.maxs.y, bb.maxs.z]
}

/// True when both boxes agree on every bound within `eps`.
pub fn boxes_close(a: [Real; 6], b: [Real; 6], eps: Real) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| approx_eq(*x, *y, eps))
}

/// A regular `n^3` grid of points spanning `[-half, half]^3`.
pub fn sample_grid(half: Real, n: usize) -> Vec<Point3<Real>> {
    let step = 2.0 * half / (n - 1) as Real;
    let mut points = Vec::with_capacity(n * n * n);
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                points.push(Point3::new(
                    -half + i as Real * step,
                    -half + j as Real * step,
                    -half + k as Real * step,
                ));
            }
        }
    }
    points
}

/// Largest `|field(v)|` over every mesh vertex.
pub fn max_surface_deviation<F: Sdf3 + ?Sized>(field: &F, mesh: &Mesh) -> Real {
    mesh.triangles
        .iter()
        .flat_map(|t| t.vertices)
        .map(|v| field.evaluate(&v).abs())
        .fold(0.0, Real::max)
}
