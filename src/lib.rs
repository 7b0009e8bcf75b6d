//! **Signed distance field** modelling with adaptive meshing.
//!
//! Solids are built as immutable trees of distance fields ([`sdf::Solid`],
//! combined through [`traits::FieldOps`]), sampled on an octree whose leaves
//! are the cells of a uniform lattice, and polygonized with marching cubes
//! into a [`mesh::Mesh`] that can be written as STL. Imported meshes come
//! back in as fields through [`mesh::MeshSdf`]. The 2D counterparts
//! ([`sketch::Profile`], quadtree + marching squares) produce outlines.
//!
//! ```rust
//! use sdforge::render::{render, RenderConfig, Resolution};
//! use sdforge::sdf::Solid;
//! use sdforge::traits::FieldOps;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let part = Solid::sphere(5.0)?.intersection(&Solid::box3(8.0, 8.0, 8.0)?);
//! let mesh = render(&part, &RenderConfig::new(Resolution::CellSize(0.5)))?;
//! assert!(!mesh.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **parallel**: use rayon to fan sampling out over worker threads
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` import/export
//! - **svg-io**: write 2D outlines as SVG
//! - **surface-nets**: an extra sampling mode using [fast-surface-nets](https://crates.io/crates/fast-surface-nets)
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod aabb;
pub mod errors;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod render;
pub mod sdf;
pub mod sketch;
pub mod traits;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::{RenderError, ValidationError};
pub use mesh::{Mesh, MeshSdf, Triangle};
pub use render::{RenderConfig, RenderStats, Resolution, SamplingMode, render, render_2d};
pub use sdf::{Sdf3, Solid};
pub use sketch::{Outline, Profile, Sdf2};
pub use traits::FieldOps;
