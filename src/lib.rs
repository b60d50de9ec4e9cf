//! Builders and renderers for toy nanostructures: single-walled and nested
//! nanotubes, hexagonal nanotube bundles and graphene nanoribbons.
//!
//! ```no_run
//! use nanoview::physics::generators::{nanotube, tube_diameter, TubeParams};
//! use nanoview::physics::operations::{pack_hexagonal_bundle, BundleParams};
//!
//! let tube = nanotube(&TubeParams::carbon(10, 0, 1)).unwrap();
//! let params = BundleParams::hexagonal(tube_diameter(10, 0, 1.42), 3.4, 6, 3);
//! let bundle = pack_hexagonal_bundle(&tube, &params).unwrap().repeat(1, 1, 4);
//! nanoview::io::save_structure("bundle.xyz", &bundle).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod physics;
pub mod rendering;

pub use error::{BuildError, Result};
pub use model::{Atom, Axis, RotationCenter, Structure};
