//src/model/mod.rs
pub mod elements;
pub mod structure;

// Re-exports for cleaner imports
pub use elements::get_atom_properties;
pub use structure::{Atom, Axis, RotationCenter, Structure};
