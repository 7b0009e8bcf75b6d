//! `Mesh`: the explicit triangle soup produced by rendering and consumed by
//! the STL codec and [`MeshSdf`].

pub mod sdf;

pub use sdf::MeshSdf;

use crate::float_types::{Aabb, Real, tolerance};
use nalgebra::{Point3, Vector3};
use std::sync::OnceLock;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One facet: three vertex positions and an outward unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3<Real>; 3],
    pub normal: Vector3<Real>,
}

impl Triangle {
    pub const fn new(vertices: [Point3<Real>; 3], normal: Vector3<Real>) -> Self {
        Triangle { vertices, normal }
    }

    /// Triangle whose normal follows the counter-clockwise winding of
    /// `vertices`; zero for degenerate triangles.
    pub fn from_vertices(vertices: [Point3<Real>; 3]) -> Self {
        let n = (vertices[1] - vertices[0]).cross(&(vertices[2] - vertices[0]));
        let normal = n.try_normalize(tolerance()).unwrap_or_else(Vector3::zeros);
        Triangle { vertices, normal }
    }

    /// Unnormalized winding normal; its length is twice the area.
    pub fn geometric_normal(&self) -> Vector3<Real> {
        let [a, b, c] = self.vertices;
        (b - a).cross(&(c - a))
    }

    pub fn area(&self) -> Real {
        self.geometric_normal().norm() * 0.5
    }

    pub fn centroid(&self) -> Point3<Real> {
        let [a, b, c] = self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    pub fn bounding_box(&self) -> Aabb {
        let [a, b, c] = self.vertices;
        Aabb::new(a.inf(&b).inf(&c), a.sup(&b).sup(&c))
    }
}

/// Unordered triangles; consumers must not rely on their order, and
/// vertices shared by neighbouring triangles are not welded.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,

    /// Lazily calculated AABB that spans `triangles`.
    pub bounding_box: OnceLock<Aabb>,
}

impl Mesh {
    pub fn new() -> Self {
        Mesh { triangles: Vec::new(), bounding_box: OnceLock::new() }
    }

    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Mesh { triangles, bounding_box: OnceLock::new() }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Append another mesh's triangles.
    pub fn extend(&mut self, other: Mesh) {
        self.triangles.extend(other.triangles);
        self.invalidate_bounding_box();
    }

    /// Box spanning every vertex; a degenerate box at the origin when empty.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut vertices = self.triangles.iter().flat_map(|t| t.vertices);
            let Some(first) = vertices.next() else {
                return Aabb::new(Point3::origin(), Point3::origin());
            };
            let (mins, maxs) =
                vertices.fold((first, first), |(lo, hi), v| (lo.inf(&v), hi.sup(&v)));
            Aabb::new(mins, maxs)
        })
    }

    /// Flat vertex and index buffers, three unshared vertices per triangle.
    pub fn vertices_and_indices(&self) -> (Vec<Point3<Real>>, Vec<[u32; 3]>) {
        let vertices = self.triangles.iter().flat_map(|t| t.vertices).collect();
        let indices = (0..self.triangles.len() as u32)
            .map(|i| [3 * i, 3 * i + 1, 3 * i + 2])
            .collect();
        (vertices, indices)
    }

    /// Invalidates the cached bounding box after editing `triangles`.
    pub fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }

    /// Total surface area.
    #[cfg(not(feature = "parallel"))]
    pub fn surface_area(&self) -> Real {
        self.triangles.iter().map(Triangle::area).sum()
    }

    /// Total surface area.
    #[cfg(feature = "parallel")]
    pub fn surface_area(&self) -> Real {
        self.triangles.par_iter().map(Triangle::area).sum()
    }

    /// Enclosed volume by the divergence theorem; only meaningful for
    /// closed, consistently wound meshes.
    pub fn volume(&self) -> Real {
        self.triangles
            .iter()
            .map(|t| {
                let [a, b, c] = t.vertices;
                a.coords.dot(&b.coords.cross(&c.coords))
            })
            .sum::<Real>()
            / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tetrahedron() -> Mesh {
        let o = Point3::origin();
        let x = Point3::new(1.0, 0.0, 0.0);
        let y = Point3::new(0.0, 1.0, 0.0);
        let z = Point3::new(0.0, 0.0, 1.0);
        Mesh::from_triangles(vec![
            Triangle::from_vertices([o, y, x]),
            Triangle::from_vertices([o, x, z]),
            Triangle::from_vertices([o, z, y]),
            Triangle::from_vertices([x, y, z]),
        ])
    }

    #[test]
    fn tetrahedron_volume_and_normals() {
        let m = tetrahedron();
        assert!((m.volume() - 1.0 / 6.0).abs() < 1e-12);
        assert_eq!(m.triangles[0].normal, -Vector3::z());
        let bb = m.bounding_box();
        assert_eq!(bb.mins, Point3::origin());
        assert_eq!(bb.maxs, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn extend_invalidates_cached_box() {
        let mut m = tetrahedron();
        let _ = m.bounding_box();
        let far = Triangle::from_vertices([
            Point3::new(5.0, 0.0, 0.0),
            Point3::new(6.0, 0.0, 0.0),
            Point3::new(5.0, 1.0, 0.0),
        ]);
        m.extend(Mesh::from_triangles(vec![far]));
        assert_eq!(m.len(), 5);
        assert_eq!(m.bounding_box().maxs.x, 6.0);
    }

    #[test]
    fn flat_buffers_keep_triangle_order() {
        let m = tetrahedron();
        let (vertices, indices) = m.vertices_and_indices();
        assert_eq!(vertices.len(), 12);
        assert_eq!(indices[3], [9, 10, 11]);
        assert_eq!(vertices[9], m.triangles[3].vertices[0]);
    }

    #[test]
    fn degenerate_triangle_has_zero_normal() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let t = Triangle::from_vertices([p, p, Point3::origin()]);
        assert_eq!(t.normal, Vector3::zeros());
        assert_eq!(t.area(), 0.0);
    }
}
