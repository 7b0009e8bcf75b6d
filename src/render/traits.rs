//! Traits separating the traversal strategy (serial or parallel) from the
//! per-cell polygonizer.

use crate::float_types::Real;
use crate::render::lattice::Lattice;

/// A polygonizer bound to the field it samples.
///
/// `D` is the dimension of the lattice; cells have `2^D` corners, passed to
/// [`mesh_cell`](Self::mesh_cell) in binary order (bit `a` of the corner
/// number selects the far side along axis `a`).
pub trait CellMesher<const D: usize>: Sync {
    /// Primitives produced by a traversal (triangles, segments).
    type Output: Default + Send;

    fn lattice(&self) -> &Lattice<D>;

    /// Field value at a world-space point.
    fn distance(&self, p: &[Real; D]) -> Real;

    /// Polygonize lattice cell `index` from its corner values.
    fn mesh_cell(&self, index: [u32; D], corners: &[Real], out: &mut Self::Output);

    /// Append the output of another traversal branch.
    fn merge(into: &mut Self::Output, other: Self::Output);
}

/// Work counters of one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellCounts {
    /// Cells whose field value was tested (tree cells or lattice cells).
    pub visited: u64,
    /// Lattice cells handed to the polygonizer.
    pub leaves: u64,
}

impl CellCounts {
    pub const fn merged(self, other: Self) -> Self {
        CellCounts {
            visited: self.visited + other.visited,
            leaves: self.leaves + other.leaves,
        }
    }
}

/// Traversal strategies over a lattice.
pub trait SamplerOps {
    /// Octree (quadtree) descent that discards cells the field proves empty
    /// or solid.
    fn adaptive<const D: usize, M: CellMesher<D>>(&self, mesher: &M) -> (M::Output, CellCounts);

    /// Visit every lattice cell.
    fn uniform<const D: usize, M: CellMesher<D>>(&self, mesher: &M) -> (M::Output, CellCounts);
}
