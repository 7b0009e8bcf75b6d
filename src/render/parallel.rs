//! Parallel implementation of the samplers

use crate::render::traits::{CellCounts, CellMesher, SamplerOps};
use crate::render::tree::{TreeCell, descend, visit};
use crate::render::uniform::{sample_layer, sweep_slab};
use rayon::prelude::*;

/// Rayon-backed traversal.
///
/// The adaptive descent first expands the tree breadth-first on the calling
/// thread until there are at least `min_tasks` live cells, then hands each
/// subtree to the pool. Every task fills its own buffer; buffers are merged
/// after the join, so the field is the only thing the workers share.
#[derive(Debug, Clone, Copy)]
pub struct ParallelSampler {
    min_tasks: usize,
}

impl ParallelSampler {
    pub const fn new() -> Self {
        Self { min_tasks: 64 }
    }

    /// Override how many subtrees the breadth-first phase aims for.
    pub const fn with_min_tasks(min_tasks: usize) -> Self {
        Self { min_tasks }
    }
}

impl Default for ParallelSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl SamplerOps for ParallelSampler {
    fn adaptive<const D: usize, M: CellMesher<D>>(&self, mesher: &M) -> (M::Output, CellCounts) {
        let mut out = M::Output::default();
        let mut counts = CellCounts::default();

        let mut frontier = vec![TreeCell::root()];
        while !frontier.is_empty() && frontier.len() < self.min_tasks {
            let mut next = Vec::with_capacity(frontier.len() << D);
            for cell in std::mem::take(&mut frontier) {
                visit(mesher, cell, &mut out, &mut counts, &mut next);
            }
            frontier = next;
        }

        let (branches, branch_counts) = frontier
            .into_par_iter()
            .map(|cell| {
                let mut out = M::Output::default();
                let mut counts = CellCounts::default();
                descend(mesher, cell, &mut out, &mut counts);
                (out, counts)
            })
            .reduce(
                || (M::Output::default(), CellCounts::default()),
                |(mut a, ca), (b, cb)| {
                    M::merge(&mut a, b);
                    (a, ca.merged(cb))
                },
            );

        M::merge(&mut out, branches);
        (out, counts.merged(branch_counts))
    }

    fn uniform<const D: usize, M: CellMesher<D>>(&self, mesher: &M) -> (M::Output, CellCounts) {
        let slabs = mesher.lattice().counts()[D - 1];
        (0..slabs)
            .into_par_iter()
            .map(|k| {
                let mut out = M::Output::default();
                let mut counts = CellCounts::default();
                let lower = sample_layer(mesher, k);
                let upper = sample_layer(mesher, k + 1);
                sweep_slab(mesher, k, &lower, &upper, &mut out, &mut counts);
                (out, counts)
            })
            .reduce(
                || (M::Output::default(), CellCounts::default()),
                |(mut a, ca), (b, cb)| {
                    M::merge(&mut a, b);
                    (a, ca.merged(cb))
                },
            )
    }
}
