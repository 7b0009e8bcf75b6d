//! Marching squares over lattice cells.
//!
//! Table corners run counter-clockwise from the cell minimum (0: `(0, 0)`,
//! 1: `(1, 0)`, 2: `(1, 1)`, 3: `(0, 1)`) and edge `e` joins corners `e` and
//! `e + 1`. Segments are emitted with the inside on their left, so closed
//! contours wind counter-clockwise around solid regions.

use crate::float_types::{Real, tolerance};
use crate::render::lattice::Lattice;
use crate::render::traits::CellMesher;
use crate::sketch::{Sdf2, Segment};
use nalgebra::Point2;

/// Polygonizes the cells of one 2D lattice for one profile.
#[derive(Debug)]
pub struct SquareMesher<'a, F: Sdf2 + ?Sized> {
    field: &'a F,
    lattice: Lattice<2>,
}

impl<'a, F: Sdf2 + ?Sized> SquareMesher<'a, F> {
    pub const fn new(field: &'a F, lattice: Lattice<2>) -> Self {
        SquareMesher { field, lattice }
    }
}

/// Offsets of the table corners, counter-clockwise.
const CORNER_OFFSETS: [[u32; 2]; 4] = [[0, 0], [1, 0], [1, 1], [0, 1]];

/// Edge pairs (from, to) for each corner classification.
///
/// The two saddle cases depend on whether the cell centre is inside.
fn segments(case: usize, center_inside: bool) -> &'static [(usize, usize)] {
    match case {
        1 => &[(0, 3)],
        2 => &[(1, 0)],
        3 => &[(1, 3)],
        4 => &[(2, 1)],
        5 if center_inside => &[(0, 1), (2, 3)],
        5 => &[(0, 3), (2, 1)],
        6 => &[(2, 0)],
        7 => &[(2, 3)],
        8 => &[(3, 2)],
        9 => &[(0, 2)],
        10 if center_inside => &[(3, 0), (1, 2)],
        10 => &[(1, 0), (3, 2)],
        11 => &[(1, 2)],
        12 => &[(3, 1)],
        13 => &[(0, 1)],
        14 => &[(3, 0)],
        _ => &[],
    }
}

impl<F: Sdf2 + ?Sized> CellMesher<2> for SquareMesher<'_, F> {
    type Output = Vec<Segment>;

    fn lattice(&self) -> &Lattice<2> {
        &self.lattice
    }

    #[inline]
    fn distance(&self, p: &[Real; 2]) -> Real {
        self.field.evaluate(&Point2::from(*p))
    }

    fn mesh_cell(&self, index: [u32; 2], corners: &[Real], out: &mut Vec<Segment>) {
        let mut values = [0.0; 4];
        let mut positions = [Point2::origin(); 4];
        for (i, [dx, dy]) in CORNER_OFFSETS.iter().enumerate() {
            values[i] = corners[(dx | dy << 1) as usize];
            positions[i] = Point2::from(self.lattice.corner([index[0] + dx, index[1] + dy]));
        }

        let case = values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v < 0.0)
            .fold(0usize, |acc, (i, _)| acc | 1 << i);
        if case == 0 || case == 15 {
            return;
        }

        let center_inside = (case == 5 || case == 10) && {
            let c = self
                .lattice
                .position([index[0] as Real + 0.5, index[1] as Real + 0.5]);
            self.distance(&c) < 0.0
        };

        let crossing = |e: usize| {
            let (a, b) = (e, (e + 1) % 4);
            let t = (values[a] / (values[a] - values[b])).clamp(0.0, 1.0);
            positions[a] + (positions[b] - positions[a]) * t
        };

        let min_length = self.lattice.cell_size() * tolerance();
        for &(from, to) in segments(case, center_inside) {
            let segment = Segment::new(crossing(from), crossing(to));
            if segment.length() > min_length {
                out.push(segment);
            }
        }
    }

    fn merge(into: &mut Vec<Segment>, other: Vec<Segment>) {
        into.extend(other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RenderConfig, Resolution};
    use crate::sketch::Profile;

    fn mesher(profile: &Profile) -> SquareMesher<'_, Profile> {
        let config = RenderConfig::new(Resolution::CellSize(1.0));
        let lattice = Lattice::new([0.0; 2], [1.0; 2], &config).unwrap();
        SquareMesher::new(profile, lattice)
    }

    fn corner(i: usize) -> Point2<Real> {
        Point2::new(CORNER_OFFSETS[i][0] as Real, CORNER_OFFSETS[i][1] as Real)
    }

    fn edge_midpoint(e: usize) -> Point2<Real> {
        nalgebra::center(&corner(e), &corner((e + 1) % 4))
    }

    #[test]
    fn every_case_keeps_the_inside_on_the_left() {
        for case in 1..15usize {
            let inside = |i: usize| case >> i & 1 == 1;
            for center_inside in [false, true] {
                for &(from, to) in segments(case, center_inside) {
                    let (a, b) = (edge_midpoint(from), edge_midpoint(to));
                    let d = b - a;
                    // each crossed edge has exactly one inside corner; it must be left of the segment
                    for e in [from, to] {
                        let (c0, c1) = (e, (e + 1) % 4);
                        assert_ne!(inside(c0), inside(c1), "case {case} edge {e}");
                        let c = corner(if inside(c0) { c0 } else { c1 });
                        let side = d.x * (c.y - a.y) - d.y * (c.x - a.x);
                        assert!(side > 0.0, "case {case} segment {from}->{to}");
                    }
                }
            }
        }
    }

    #[test]
    fn saddle_resolution_uses_the_centre_sample() {
        assert_eq!(segments(5, true).len(), 2);
        assert_ne!(segments(5, true), segments(5, false));
        assert_ne!(segments(10, true), segments(10, false));
    }

    #[test]
    fn horizontal_edge_crossing() {
        let half_plane = Profile::rectangle(10.0, 1.0, 0.0).unwrap();
        let m = mesher(&half_plane);
        let mut corners = [0.0; 4];
        m.lattice().corner_values([1, 0], |p| m.distance(p), &mut corners);
        let mut out = Vec::new();
        m.mesh_cell([1, 0], &corners, &mut out);
        assert_eq!(out.len(), 1);
        let s = out[0];
        // cell [0,1]x[-1,0]; the rectangle's lower edge is y = -0.5
        assert!((s.start.y + 0.5).abs() < 1e-12 && (s.end.y + 0.5).abs() < 1e-12);
        // inside is above, so the segment runs towards +x
        assert!(s.end.x > s.start.x);
    }
}
