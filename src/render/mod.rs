//! Turning fields into explicit geometry.
//!
//! Every render lays a [`Lattice`] over the field's bounding box and
//! polygonizes the lattice cells whose corners straddle the surface, with
//! marching cubes in 3D and marching squares in 2D. How the straddling
//! cells are found depends on the [`SamplingMode`]:
//!
//! - **Adaptive** descends an octree (quadtree) over the lattice and
//!   discards any cell whose centre distance is at least its half-diagonal.
//!   Empty and solid space cost one sample per discarded cell.
//! - **Uniform** visits every lattice cell.
//!
//! Both modes evaluate the field at the same lattice corners, so they emit
//! the same set of primitives; adaptive just visits far fewer cells.
//!
//! ```no_run
//! use sdforge::render::{render, RenderConfig, Resolution};
//! use sdforge::sdf::Solid;
//! use sdforge::traits::FieldOps;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scene = Solid::sphere(5.0)?.union(&Solid::box3(8.0, 8.0, 8.0)?);
//! let mesh = render(&scene, &RenderConfig::new(Resolution::CellSize(0.5)))?;
//! println!("{} triangles", mesh.len());
//! # Ok(())
//! # }
//! ```

pub mod lattice;
pub mod marching_cubes;
pub mod marching_squares;
pub mod serial;
pub mod traits;
pub mod tree;
pub mod uniform;

#[cfg(feature = "parallel")]
pub mod parallel;

#[cfg(feature = "surface-nets")]
pub mod surface_nets;

pub use lattice::Lattice;
pub use marching_cubes::CubeMesher;
pub use marching_squares::SquareMesher;
pub use serial::SerialSampler;
pub use traits::{CellCounts, CellMesher, SamplerOps};

#[cfg(feature = "parallel")]
pub use parallel::ParallelSampler;

use crate::errors::{RenderError, ValidationError, positive};
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::sdf::Sdf3;
use crate::sketch::{Outline, Sdf2};

/// Target size of the lattice cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Edge length of a cell in model units.
    CellSize(Real),
    /// Number of cells along the longest axis of the field's bounding box.
    Cells(u32),
}

impl Resolution {
    /// Cell edge length for a bounding box whose longest extent is `longest`.
    pub fn cell_size(&self, longest: Real) -> Result<Real, ValidationError> {
        match *self {
            Resolution::CellSize(s) => positive("cell size", s),
            Resolution::Cells(0) => Err(ValidationError::InvalidResolution(
                "cell count must be at least 1".to_string(),
            )),
            Resolution::Cells(n) => {
                let s = longest / n as Real;
                if s > 0.0 && s.is_finite() {
                    Ok(s)
                } else {
                    Err(ValidationError::InvalidResolution(format!(
                        "cannot divide an extent of {longest} into {n} cells"
                    )))
                }
            }
        }
    }
}

/// How straddling cells are located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingMode {
    /// Octree / quadtree descent with distance-bound pruning.
    #[default]
    Adaptive,
    /// Every lattice cell, no pruning.
    Uniform,
    /// Every lattice corner, meshed with surface nets instead of marching
    /// cubes. 3D only; 2D renders treat it as `Uniform`.
    #[cfg(feature = "surface-nets")]
    SurfaceNets,
}

/// Immutable parameters of one render call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub resolution: Resolution,
    pub mode: SamplingMode,
    /// Upper bound on the tree depth; the lattice may have at most
    /// `2^max_depth` cells along any axis.
    pub max_depth: u32,
    /// Step of the central differences used for vertex normals; defaults to
    /// one hundredth of the cell size.
    pub normal_epsilon: Option<Real>,
}

impl RenderConfig {
    pub const DEFAULT_MAX_DEPTH: u32 = 12;
    /// Deepest tree the lattice indices can address.
    pub const MAX_DEPTH_LIMIT: u32 = 21;

    pub const fn new(resolution: Resolution) -> Self {
        RenderConfig {
            resolution,
            mode: SamplingMode::Adaptive,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            normal_epsilon: None,
        }
    }

    pub const fn with_mode(mut self, mode: SamplingMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub const fn with_normal_epsilon(mut self, eps: Real) -> Self {
        self.normal_epsilon = Some(eps);
        self
    }

    /// Check everything that does not depend on the field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Resolution::CellSize(s) = self.resolution {
            positive("cell size", s)?;
        }
        if let Resolution::Cells(0) = self.resolution {
            return Err(ValidationError::InvalidResolution(
                "cell count must be at least 1".to_string(),
            ));
        }
        if self.max_depth == 0 || self.max_depth > Self::MAX_DEPTH_LIMIT {
            return Err(ValidationError::InvalidResolution(format!(
                "max_depth must be in 1..={}, got {}",
                Self::MAX_DEPTH_LIMIT,
                self.max_depth
            )));
        }
        if let Some(eps) = self.normal_epsilon {
            positive("normal epsilon", eps)?;
        }
        Ok(())
    }

    fn normal_epsilon_for(&self, cell_size: Real) -> Real {
        self.normal_epsilon.unwrap_or(cell_size * 0.01)
    }
}

/// What a render did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Tree or lattice cells whose field value was tested.
    pub cells_visited: u64,
    /// Lattice cells handed to the polygonizer.
    pub leaf_cells: u64,
    /// Primitives emitted (segments for 2D renders).
    pub triangles: usize,
}

impl RenderStats {
    fn new(counts: CellCounts, primitives: usize) -> Self {
        RenderStats {
            cells_visited: counts.visited,
            leaf_cells: counts.leaves,
            triangles: primitives,
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn sampler() -> SerialSampler {
    SerialSampler::new()
}

#[cfg(feature = "parallel")]
fn sampler() -> ParallelSampler {
    ParallelSampler::new()
}

/// Render a 3D field into a triangle mesh.
pub fn render<F: Sdf3 + ?Sized>(field: &F, config: &RenderConfig) -> Result<Mesh, RenderError> {
    render_with_stats(field, config).map(|(mesh, _)| mesh)
}

/// [`render`], also reporting how much work the sampler did.
pub fn render_with_stats<F: Sdf3 + ?Sized>(
    field: &F,
    config: &RenderConfig,
) -> Result<(Mesh, RenderStats), RenderError> {
    render_with_sampler(field, config, &sampler())
}

/// [`render_with_stats`] with an explicit traversal strategy.
pub fn render_with_sampler<F: Sdf3 + ?Sized, S: SamplerOps>(
    field: &F,
    config: &RenderConfig,
    sampler: &S,
) -> Result<(Mesh, RenderStats), RenderError> {
    config.validate()?;
    let bb = field.bounding_box();
    let mins = [bb.mins.x, bb.mins.y, bb.mins.z];
    let maxs = [bb.maxs.x, bb.maxs.y, bb.maxs.z];
    if has_no_volume(&mins, &maxs) {
        return Ok((Mesh::new(), RenderStats::default()));
    }

    let lattice = Lattice::new(mins, maxs, config)?;
    let eps = config.normal_epsilon_for(lattice.cell_size());
    let mesher = CubeMesher::new(field, lattice, eps);

    let (triangles, counts) = match config.mode {
        SamplingMode::Adaptive => sampler.adaptive(&mesher),
        SamplingMode::Uniform => sampler.uniform(&mesher),
        #[cfg(feature = "surface-nets")]
        SamplingMode::SurfaceNets => surface_nets::mesh(field, &lattice, eps)?,
    };
    let stats = RenderStats::new(counts, triangles.len());
    Ok((Mesh::from_triangles(triangles), stats))
}

/// Render a 2D profile into its outline.
pub fn render_2d<F: Sdf2 + ?Sized>(
    profile: &F,
    config: &RenderConfig,
) -> Result<Outline, RenderError> {
    render_2d_with_stats(profile, config).map(|(outline, _)| outline)
}

/// [`render_2d`], also reporting how much work the sampler did.
pub fn render_2d_with_stats<F: Sdf2 + ?Sized>(
    profile: &F,
    config: &RenderConfig,
) -> Result<(Outline, RenderStats), RenderError> {
    config.validate()?;
    let bb = profile.bounding_box();
    let mins = [bb.mins.x, bb.mins.y];
    let maxs = [bb.maxs.x, bb.maxs.y];
    if has_no_volume(&mins, &maxs) {
        return Ok((Outline::default(), RenderStats::default()));
    }

    let lattice = Lattice::new(mins, maxs, config)?;
    let mesher = SquareMesher::new(profile, lattice);
    let sampler = sampler();
    let (segments, counts) = match config.mode {
        SamplingMode::Adaptive => sampler.adaptive(&mesher),
        _ => sampler.uniform(&mesher),
    };
    let stats = RenderStats::new(counts, segments.len());
    Ok((Outline::new(segments), stats))
}

/// Render a field and write it as a binary STL file.
#[cfg(feature = "stl-io")]
pub fn render_to_stl<F: Sdf3 + ?Sized, P: AsRef<std::path::Path>>(
    field: &F,
    config: &RenderConfig,
    path: P,
) -> Result<RenderStats, crate::io::IoError> {
    let (mesh, stats) = render_with_stats(field, config)?;
    mesh.save_stl(path)?;
    Ok(stats)
}

/// A finite box that is flat along some axis encloses no solid; anything
/// non-finite or inverted is left for [`Lattice::new`] to reject.
fn has_no_volume<const D: usize>(mins: &[Real; D], maxs: &[Real; D]) -> bool {
    mins.iter().chain(maxs.iter()).all(|c| c.is_finite())
        && (0..D).all(|a| maxs[a] >= mins[a])
        && (0..D).any(|a| maxs[a] == mins[a])
}

impl Mesh {
    /// Mesh a field; see [`render`].
    pub fn from_sdf<F: Sdf3 + ?Sized>(field: &F, config: &RenderConfig) -> Result<Mesh, RenderError> {
        render(field, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdf::Solid;
    use crate::sketch::Profile;
    use crate::traits::FieldOps;

    #[test]
    fn config_validation() {
        assert!(RenderConfig::new(Resolution::CellSize(0.1)).validate().is_ok());
        assert!(RenderConfig::new(Resolution::CellSize(0.0)).validate().is_err());
        assert!(RenderConfig::new(Resolution::CellSize(Real::NAN)).validate().is_err());
        assert!(RenderConfig::new(Resolution::Cells(0)).validate().is_err());
        assert!(
            RenderConfig::new(Resolution::Cells(4))
                .with_max_depth(0)
                .validate()
                .is_err()
        );
        assert!(
            RenderConfig::new(Resolution::Cells(4))
                .with_max_depth(RenderConfig::MAX_DEPTH_LIMIT + 1)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn invalid_config_is_reported_before_sampling() {
        let s = Solid::sphere(1.0).unwrap();
        let err = render(&s, &RenderConfig::new(Resolution::CellSize(-1.0))).unwrap_err();
        assert!(matches!(err, RenderError::InvalidConfig(ValidationError::NonPositive { .. })));
    }

    #[test]
    fn serial_and_default_samplers_agree() {
        let s = Solid::sphere(1.0).unwrap();
        let config = RenderConfig::new(Resolution::Cells(10));
        let (a, sa) = render_with_sampler(&s, &config, &SerialSampler::new()).unwrap();
        let (b, sb) = render_with_stats(&s, &config).unwrap();
        assert_eq!(sa, sb);
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn flat_box_renders_nothing() {
        let a = Solid::sphere(1.0).unwrap();
        let b = Solid::sphere(1.0).unwrap().translate(10.0, 0.0, 0.0);
        let none = a.intersection(&b);
        let (mesh, stats) =
            render_with_stats(&none, &RenderConfig::new(Resolution::Cells(8))).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(stats, RenderStats::default());
    }

    #[test]
    fn circle_outline_is_closed_and_round() {
        let c = Profile::circle(2.0).unwrap();
        let outline = render_2d(&c, &RenderConfig::new(Resolution::CellSize(0.1))).unwrap();
        assert!(!outline.is_empty());
        for s in &outline.segments {
            assert!((s.start.coords.norm() - 2.0).abs() < 0.01);
        }
        let circumference = 2.0 * crate::float_types::PI * 2.0;
        assert!((outline.perimeter() - circumference).abs() < 0.05 * circumference);
    }
}
