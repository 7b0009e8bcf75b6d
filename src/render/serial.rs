//! Serial implementation of the samplers

use crate::render::traits::{CellCounts, CellMesher, SamplerOps};
use crate::render::tree::{TreeCell, descend};
use crate::render::uniform::{sample_layer, sweep_slab};

/// Single-threaded traversal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialSampler;

impl SerialSampler {
    pub const fn new() -> Self {
        Self
    }
}

impl SamplerOps for SerialSampler {
    fn adaptive<const D: usize, M: CellMesher<D>>(&self, mesher: &M) -> (M::Output, CellCounts) {
        let mut out = M::Output::default();
        let mut counts = CellCounts::default();
        descend(mesher, TreeCell::root(), &mut out, &mut counts);
        (out, counts)
    }

    fn uniform<const D: usize, M: CellMesher<D>>(&self, mesher: &M) -> (M::Output, CellCounts) {
        let mut out = M::Output::default();
        let mut counts = CellCounts::default();
        let slabs = mesher.lattice().counts()[D - 1];

        // slide a two-layer window along the last axis
        let mut lower = sample_layer(mesher, 0);
        for k in 0..slabs {
            let upper = sample_layer(mesher, k + 1);
            sweep_slab(mesher, k, &lower, &upper, &mut out, &mut counts);
            lower = upper;
        }
        (out, counts)
    }
}
