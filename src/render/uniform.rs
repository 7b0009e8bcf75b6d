//! Exhaustive sweep over every lattice cell.
//!
//! The lattice is processed in slabs along its last axis. A slab only needs
//! the two corner layers bounding it, so memory stays at two layers no
//! matter how many cells the lattice has.

use crate::float_types::Real;
use crate::render::lattice::Lattice;
use crate::render::traits::{CellCounts, CellMesher};

/// Field values at every corner of layer `k`.
pub(crate) fn sample_layer<const D: usize, M: CellMesher<D>>(mesher: &M, k: u32) -> Vec<Real> {
    let lattice = mesher.lattice();
    (0..lattice.layer_len())
        .map(|offset| mesher.distance(&lattice.corner(lattice.layer_corner(offset, k))))
        .collect()
}

/// Polygonize every cell of slab `k`, lying between corner layers `lower`
/// (index `k`) and `upper` (index `k + 1`).
pub(crate) fn sweep_slab<const D: usize, M: CellMesher<D>>(
    mesher: &M,
    k: u32,
    lower: &[Real],
    upper: &[Real],
    out: &mut M::Output,
    counts: &mut CellCounts,
) {
    let lattice = mesher.lattice();
    let mut corners = [0.0; 8];
    for offset in 0..lattice.slab_len() {
        let index = lattice.slab_cell(offset, k);
        for (corner, value) in corners.iter_mut().enumerate().take(1 << D) {
            let at = Lattice::<D>::cell_corner(index, corner);
            let layer = if (corner >> (D - 1)) & 1 == 1 { upper } else { lower };
            *value = layer[lattice.layer_offset(&at)];
        }
        counts.visited += 1;
        counts.leaves += 1;
        mesher.mesh_cell(index, &corners[..1 << D], out);
    }
}
