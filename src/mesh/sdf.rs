//! Signed distance to an explicit triangle mesh.
//!
//! The mesh is indexed as a parry [`TriMesh`], whose bounding volume tree
//! answers both queries. The magnitude is exact (projection onto the nearest
//! triangle). The sign is a majority vote of three ray-parity tests, which is
//! only reliable for closed, manifold meshes; on open or self-intersecting
//! input the sign may be wrong near the defects.

use crate::errors::ValidationError;
use crate::float_types::parry3d::query::visitors::RayIntersectionsVisitor;
use crate::float_types::parry3d::query::{PointQuery, Ray, RayCast};
use crate::float_types::parry3d::shape::TriMesh;
use crate::float_types::{Aabb, Real};
use crate::mesh::Mesh;
use crate::sdf::Sdf3;
use nalgebra::{Point3, Vector3};
use std::fmt;

/// Ray directions for the inside test; off-axis and mutually skewed so a
/// single grazing hit on an edge or vertex is outvoted.
const RAY_DIRECTIONS: [[Real; 3]; 3] = [[0.38, 0.53, 0.76], [-0.61, 0.27, 0.74], [0.47, -0.71, 0.52]];

#[derive(Clone)]
pub struct MeshSdf {
    trimesh: TriMesh,
    bounds: Aabb,
}

impl MeshSdf {
    /// Index `mesh` for distance queries; fails on a mesh with no triangles.
    pub fn new(mesh: Mesh) -> Result<Self, ValidationError> {
        if mesh.is_empty() {
            return Err(ValidationError::EmptyMesh);
        }
        let bounds = mesh.bounding_box();
        let (vertices, indices) = mesh.vertices_and_indices();
        // without topology flags the only builder failure is an empty index buffer
        let trimesh = TriMesh::new(vertices, indices).map_err(|_| ValidationError::EmptyMesh)?;
        Ok(MeshSdf { trimesh, bounds })
    }

    pub fn triangle_count(&self) -> usize {
        self.trimesh.num_triangles()
    }

    /// Unsigned distance to the nearest triangle.
    pub fn unsigned_distance(&self, p: &Point3<Real>) -> Real {
        self.trimesh.distance_to_local_point(p, false)
    }

    /// Number of triangles crossed by the ray from `origin` along `dir`.
    fn crossings(&self, origin: &Point3<Real>, dir: &Vector3<Real>) -> usize {
        let ray = Ray::new(*origin, dir.normalize());
        let reach = (self.bounds.center() - origin).norm() + self.bounds.half_extents().norm() + 1.0;
        let mut hits = 0;
        let mut count = |index: &u32| {
            if self.trimesh.triangle(*index).intersects_local_ray(&ray, reach) {
                hits += 1;
            }
            true
        };
        let mut visitor = RayIntersectionsVisitor::new(&ray, reach, &mut count);
        self.trimesh.qbvh().traverse_depth_first(&mut visitor);
        hits
    }

    /// Ray-parity majority vote.
    pub fn contains(&self, p: &Point3<Real>) -> bool {
        let b = &self.bounds;
        let outside_box = (0..3).any(|a| p[a] < b.mins[a] || p[a] > b.maxs[a]);
        if outside_box {
            return false;
        }
        let votes = RAY_DIRECTIONS
            .iter()
            .filter(|d| self.crossings(p, &Vector3::from(**d)) % 2 == 1)
            .count();
        votes >= 2
    }
}

impl fmt::Debug for MeshSdf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeshSdf")
            .field("triangles", &self.triangle_count())
            .field("bounds", &self.bounds)
            .finish()
    }
}

impl Sdf3 for MeshSdf {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        let d = self.unsigned_distance(p);
        if self.contains(p) { -d } else { d }
    }

    fn bounding_box(&self) -> Aabb {
        self.bounds
    }
}

impl TryFrom<Mesh> for MeshSdf {
    type Error = ValidationError;

    fn try_from(mesh: Mesh) -> Result<Self, Self::Error> {
        MeshSdf::new(mesh)
    }
}
