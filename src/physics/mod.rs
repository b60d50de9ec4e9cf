// src/physics/mod.rs
pub mod generators;
pub mod operations;
