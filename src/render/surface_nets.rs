//! Surface-nets meshing of the full corner grid of a lattice.

use crate::errors::RenderError;
use crate::float_types::Real;
use crate::mesh::Triangle;
use crate::render::lattice::Lattice;
use crate::render::marching_cubes::oriented_triangle;
use crate::render::traits::CellCounts;
use crate::sdf::Sdf3;
use fast_surface_nets::{SurfaceNetsBuffer, surface_nets};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Corners per axis of a lattice, one more than its cells, laid out x-fastest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CornerGrid([u32; 3]);

impl CornerGrid {
    /// Corner grid of `lattice`; fails when the corners do not fit `u32`
    /// linear indices.
    pub fn of(lattice: &Lattice<3>) -> Result<Self, RenderError> {
        let dims = lattice.counts().map(|c| c + 1);
        let corners: u64 = dims.iter().map(|&n| n as u64).product();
        if corners > u32::MAX as u64 {
            return Err(RenderError::ResolutionTooFine {
                cells: corners as usize,
                limit: u32::MAX as usize,
            });
        }
        Ok(CornerGrid(dims))
    }

    /// Index of the last corner along each axis.
    fn last(&self) -> [u32; 3] {
        self.0.map(|n| n - 1)
    }
}

impl fast_surface_nets::ndshape::Shape<3> for CornerGrid {
    type Coord = u32;

    fn as_array(&self) -> [u32; 3] {
        self.0
    }

    fn size(&self) -> u32 {
        self.0.iter().product()
    }

    fn usize(&self) -> usize {
        self.0.iter().map(|&n| n as usize).product()
    }

    fn linearize(&self, [x, y, z]: [u32; 3]) -> u32 {
        let [nx, ny, _] = self.0;
        x + nx * (y + ny * z)
    }

    fn delinearize(&self, i: u32) -> [u32; 3] {
        let [nx, ny, _] = self.0;
        let (x, rest) = (i % nx, i / nx);
        [x, rest % ny, rest / ny]
    }
}

/// Sample every lattice corner and mesh the grid with surface nets.
///
/// Vertex positions come from the surface-nets solve; normals and winding
/// come from the field gradient, as in marching cubes.
pub(crate) fn mesh<F: Sdf3 + ?Sized>(
    field: &F,
    lattice: &Lattice<3>,
    normal_epsilon: Real,
) -> Result<(Vec<Triangle>, CellCounts), RenderError> {
    use fast_surface_nets::ndshape::Shape;

    let shape = CornerGrid::of(lattice)?;
    let mut values = vec![0.0_f32; shape.usize()];

    #[cfg(feature = "parallel")]
    let iter = values.par_iter_mut().enumerate();
    #[cfg(not(feature = "parallel"))]
    let iter = values.iter_mut().enumerate();

    iter.for_each(|(i, value)| {
        let [x, y, z] = shape.delinearize(i as u32);
        let d = field.evaluate(&Point3::from(lattice.corner([x, y, z])));
        *value = if d.is_finite() { d as f32 } else { 1e10_f32 };
    });

    let mut buffer = SurfaceNetsBuffer::default();
    surface_nets(
        &values,
        &shape,
        [0, 0, 0],
        shape.last(),
        &mut buffer,
    );

    let area_scale = lattice.cell_size().powi(2);
    let triangles = buffer
        .indices
        .chunks_exact(3)
        .filter_map(|tri| {
            let vertices = [0, 1, 2].map(|k| {
                let [x, y, z] = buffer.positions[tri[k] as usize];
                Point3::from(lattice.position([x as Real, y as Real, z as Real]))
            });
            let [nx, ny, nz] = buffer.normals[tri[0] as usize];
            let fallback = Vector3::new(nx as Real, ny as Real, nz as Real)
                .try_normalize(0.0)
                .unwrap_or_else(Vector3::z);
            oriented_triangle(field, vertices, fallback, normal_epsilon, area_scale)
        })
        .collect();

    let cells = lattice.cell_count();
    Ok((triangles, CellCounts { visited: cells, leaves: cells }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fast_surface_nets::ndshape::Shape;

    #[test]
    fn corner_grid_linearization_round_trips() {
        let g = CornerGrid([3, 4, 5]);
        assert_eq!(g.usize(), 60);
        assert_eq!(g.last(), [2, 3, 4]);
        assert_eq!(g.linearize([1, 2, 3]), 1 + 3 * (2 + 4 * 3));
        for i in 0..g.size() {
            assert_eq!(g.linearize(g.delinearize(i)), i);
        }
    }
}
