//! The sample lattice shared by every sampling mode.
//!
//! A lattice covers a field's bounding box, padded by one cell on every side
//! so the outermost corner samples are guaranteed to lie outside the solid.
//! Cells are cubes (squares in 2D) of edge `cell_size`; lattice corner
//! `i` sits at `origin + i * cell_size` along each axis. Adaptive and uniform
//! sampling both evaluate the field at exactly these corner positions, which
//! is what makes their outputs identical.

use crate::errors::RenderError;
use crate::float_types::Real;
use crate::render::RenderConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lattice<const D: usize> {
    origin: [Real; D],
    cell_size: Real,
    counts: [u32; D],
    depth: u32,
}

impl<const D: usize> Lattice<D> {
    /// Lay a lattice over the box `[mins, maxs]`.
    ///
    /// Fails on non-finite or inverted boxes, on invalid configurations and
    /// when the lattice would need more than `2^max_depth` cells along an axis.
    pub fn new(
        mins: [Real; D],
        maxs: [Real; D],
        config: &RenderConfig,
    ) -> Result<Self, RenderError> {
        config.validate()?;
        if mins.iter().chain(maxs.iter()).any(|c| !c.is_finite())
            || (0..D).any(|a| maxs[a] < mins[a])
        {
            return Err(RenderError::UnboundedField);
        }

        let extents: [Real; D] = std::array::from_fn(|a| maxs[a] - mins[a]);
        let longest = extents.iter().copied().fold(0.0, Real::max);
        let cell_size = config.resolution.cell_size(longest)?;

        let limit = 1u64 << config.max_depth;
        let mut counts = [0u32; D];
        for a in 0..D {
            let cells = (extents[a] / cell_size).ceil() as u64 + 2;
            if cells > limit {
                return Err(RenderError::ResolutionTooFine {
                    cells: cells as usize,
                    limit: limit as usize,
                });
            }
            counts[a] = cells as u32;
        }

        let widest = counts.iter().copied().max().unwrap_or(1);
        let depth = widest.next_power_of_two().trailing_zeros();
        let origin = std::array::from_fn(|a| mins[a] - cell_size);

        Ok(Lattice { origin, cell_size, counts, depth })
    }

    pub const fn cell_size(&self) -> Real {
        self.cell_size
    }

    /// Number of cells along each axis.
    pub const fn counts(&self) -> [u32; D] {
        self.counts
    }

    /// Tree depth at which octree (quadtree) cells coincide with lattice cells.
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    pub const fn origin(&self) -> [Real; D] {
        self.origin
    }

    /// Total number of lattice cells.
    pub fn cell_count(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).product()
    }

    /// World position of the lattice corner with integer coordinates `index`.
    #[inline]
    pub fn corner(&self, index: [u32; D]) -> [Real; D] {
        self.position(index.map(|i| i as Real))
    }

    /// World position of a point given in (fractional) lattice coordinates.
    #[inline]
    pub fn position(&self, coords: [Real; D]) -> [Real; D] {
        std::array::from_fn(|a| self.origin[a] + coords[a] * self.cell_size)
    }

    /// Corner of cell `index` selected by the bits of `corner`: bit `a` set
    /// means the far side along axis `a`.
    #[inline]
    pub fn cell_corner(index: [u32; D], corner: usize) -> [u32; D] {
        std::array::from_fn(|a| index[a] + ((corner >> a) & 1) as u32)
    }

    /// Sample `distance` at the `2^D` corners of cell `index` into `out`.
    pub(crate) fn corner_values<F>(&self, index: [u32; D], distance: F, out: &mut [Real])
    where
        F: Fn(&[Real; D]) -> Real,
    {
        for (corner, value) in out.iter_mut().enumerate().take(1 << D) {
            *value = distance(&self.corner(Self::cell_corner(index, corner)));
        }
    }

    /* ---------- corner layers, used by the uniform sweep ---------- */

    /// Corners in one layer perpendicular to the last axis.
    pub(crate) fn layer_len(&self) -> usize {
        self.counts[..D - 1].iter().map(|&c| c as usize + 1).product()
    }

    /// Offset of a corner inside its layer (the last coordinate is ignored).
    #[inline]
    pub(crate) fn layer_offset(&self, index: &[u32; D]) -> usize {
        let mut offset = 0;
        let mut stride = 1;
        for a in 0..D - 1 {
            offset += index[a] as usize * stride;
            stride *= self.counts[a] as usize + 1;
        }
        offset
    }

    /// Inverse of [`layer_offset`](Self::layer_offset) for layer `k`.
    pub(crate) fn layer_corner(&self, mut offset: usize, k: u32) -> [u32; D] {
        let mut index = [0u32; D];
        for a in 0..D - 1 {
            let n = self.counts[a] as usize + 1;
            index[a] = (offset % n) as u32;
            offset /= n;
        }
        index[D - 1] = k;
        index
    }

    /// Cell `offset` (row-major over all axes but the last) of slab `k`.
    pub(crate) fn slab_cell(&self, mut offset: usize, k: u32) -> [u32; D] {
        let mut index = [0u32; D];
        for a in 0..D - 1 {
            let n = self.counts[a] as usize;
            index[a] = (offset % n) as u32;
            offset /= n;
        }
        index[D - 1] = k;
        index
    }

    /// Cells in one slab between two consecutive corner layers.
    pub(crate) fn slab_len(&self) -> usize {
        self.counts[..D - 1].iter().map(|&c| c as usize).product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Resolution;

    fn config(cell: Real) -> RenderConfig {
        RenderConfig::new(Resolution::CellSize(cell))
    }

    #[test]
    fn lattice_is_padded_by_one_cell() {
        let l = Lattice::<3>::new([-1.0; 3], [1.0, 1.0, 0.5], &config(0.5)).unwrap();
        assert_eq!(l.counts(), [6, 6, 5]);
        assert_eq!(l.origin(), [-1.5, -1.5, -1.5]);
        assert_eq!(l.corner([6, 6, 5]), [1.5, 1.5, 1.0]);
        assert_eq!(l.depth(), 3);
        assert_eq!(l.cell_count(), 180);
    }

    #[test]
    fn cell_count_resolution_uses_longest_axis() {
        let c = RenderConfig::new(Resolution::Cells(8));
        let l = Lattice::<2>::new([0.0, 0.0], [4.0, 2.0], &c).unwrap();
        assert_eq!(l.cell_size(), 0.5);
        assert_eq!(l.counts(), [10, 6]);
    }

    #[test]
    fn too_fine_resolution_is_rejected_up_front() {
        let c = config(1e-3).with_max_depth(8);
        let err = Lattice::<3>::new([0.0; 3], [1.0; 3], &c).unwrap_err();
        assert_eq!(err, RenderError::ResolutionTooFine { cells: 1002, limit: 256 });
    }

    #[test]
    fn non_finite_boxes_are_rejected() {
        let err = Lattice::<2>::new([0.0, Real::NEG_INFINITY], [1.0, 1.0], &config(0.1));
        assert_eq!(err.unwrap_err(), RenderError::UnboundedField);
        let inverted = Lattice::<2>::new([1.0, 0.0], [0.0, 1.0], &config(0.1));
        assert_eq!(inverted.unwrap_err(), RenderError::UnboundedField);
    }

    #[test]
    fn layer_indexing_round_trips() {
        let l = Lattice::<3>::new([0.0; 3], [1.0, 2.0, 3.0], &config(1.0)).unwrap();
        for offset in 0..l.layer_len() {
            let idx = l.layer_corner(offset, 2);
            assert_eq!(idx[2], 2);
            assert_eq!(l.layer_offset(&idx), offset);
        }
        assert_eq!(l.slab_len(), (l.counts()[0] * l.counts()[1]) as usize);
    }
}
