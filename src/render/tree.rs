//! Octree / quadtree cells laid over a [`Lattice`](crate::render::Lattice).

use crate::float_types::Real;
use crate::render::traits::{CellCounts, CellMesher};

/// A tree cell addressed by its minimum lattice corner and its level.
///
/// The root (level 0) spans `2^depth` lattice cells per axis; a cell at the
/// lattice depth is exactly one lattice cell. Cells are plain values, so
/// traversal keeps them on an explicit stack rather than the call stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeCell<const D: usize> {
    pub index: [u32; D],
    pub level: u32,
}

impl<const D: usize> TreeCell<D> {
    pub const fn root() -> Self {
        TreeCell { index: [0; D], level: 0 }
    }

    /// Edge length in lattice cells.
    #[inline]
    pub const fn span(&self, depth: u32) -> u32 {
        1 << (depth - self.level)
    }

    /// The `2^D` children that overlap a lattice with `counts` cells per axis.
    pub fn children(&self, depth: u32, counts: [u32; D]) -> impl Iterator<Item = Self> + '_ {
        let half = self.span(depth) / 2;
        let level = self.level + 1;
        (0..1usize << D).filter_map(move |child| {
            let index: [u32; D] =
                std::array::from_fn(|a| self.index[a] + ((child >> a) & 1) as u32 * half);
            (0..D)
                .all(|a| index[a] < counts[a])
                .then_some(TreeCell { index, level })
        })
    }
}

/// Test one tree cell.
///
/// A cell whose centre distance is at least its half-diagonal cannot contain
/// a sign change and is dropped. Lattice-sized cells that survive go to the
/// polygonizer; larger ones push their children onto `pending`.
///
/// Pruning is `d >= r` outside but `d < -r` inside: corner values of exactly
/// zero classify as outside, so only the strict test keeps the pruned cells'
/// corners all on one side.
pub(crate) fn visit<const D: usize, M: CellMesher<D>>(
    mesher: &M,
    cell: TreeCell<D>,
    out: &mut M::Output,
    counts: &mut CellCounts,
    pending: &mut Vec<TreeCell<D>>,
) {
    let lattice = mesher.lattice();
    let depth = lattice.depth();
    let half = cell.span(depth) as Real * 0.5;
    counts.visited += 1;

    let center = lattice.position(std::array::from_fn(|a| cell.index[a] as Real + half));
    let radius = half * lattice.cell_size() * (D as Real).sqrt();
    let d = mesher.distance(&center);
    if d >= radius || d < -radius {
        return;
    }

    if cell.level == depth {
        counts.leaves += 1;
        let mut corners = [0.0; 8];
        lattice.corner_values(cell.index, |p| mesher.distance(p), &mut corners);
        mesher.mesh_cell(cell.index, &corners[..1 << D], out);
        return;
    }

    pending.extend(cell.children(depth, lattice.counts()));
}

/// Depth-first descent of the subtree under `root`.
pub(crate) fn descend<const D: usize, M: CellMesher<D>>(
    mesher: &M,
    root: TreeCell<D>,
    out: &mut M::Output,
    counts: &mut CellCounts,
) {
    let mut stack = vec![root];
    while let Some(cell) = stack.pop() {
        visit(mesher, cell, out, counts, &mut stack);
    }
}
