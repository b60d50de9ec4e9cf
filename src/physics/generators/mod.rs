pub mod nanoribbon;
pub mod nanotube;

pub use nanoribbon::{graphene_nanoribbon, EdgeKind, RibbonParams};
pub use nanotube::{nanotube, tube_diameter, tube_period, TubeParams};
