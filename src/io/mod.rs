// src/io/mod.rs
pub mod cif;
pub mod poscar;
pub mod xyz;

use crate::error::{BuildError, Result};
use crate::model::Structure;

/// Structure file formats the writers understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFormat {
    Xyz,
    Poscar,
    Cif,
}

impl StructureFormat {
    pub fn from_path(path: &str) -> Option<Self> {
        let p = path.to_lowercase();
        let name = p.rsplit(['/', '\\']).next().unwrap_or(&p);
        if name.ends_with(".xyz") || name.ends_with(".extxyz") {
            Some(StructureFormat::Xyz)
        } else if name.ends_with(".cif") {
            Some(StructureFormat::Cif)
        } else if name.ends_with(".vasp") || name.starts_with("poscar") || name.starts_with("contcar") {
            Some(StructureFormat::Poscar)
        } else {
            None
        }
    }
}

pub fn load_structure(path: &str) -> Result<Structure> {
    match StructureFormat::from_path(path) {
        Some(StructureFormat::Xyz) => xyz::parse(path),
        _ => Err(BuildError::UnsupportedFormat(path.to_string())),
    }
}

pub fn save_structure(path: &str, structure: &Structure) -> Result<()> {
    match StructureFormat::from_path(path) {
        Some(StructureFormat::Xyz) => xyz::write(path, structure),
        Some(StructureFormat::Poscar) => poscar::write(path, structure),
        Some(StructureFormat::Cif) => cif::write(path, structure),
        None => Err(BuildError::UnsupportedFormat(path.to_string())),
    }?;
    log::info!("Wrote {} ({} atoms) to {}", structure.formula(), structure.len(), path);
    Ok(())
}

/// Vacuum added along non-periodic directions that have no cell vector.
const PAD: f64 = 10.0;

/// Lattice for formats that need a full cell: zero vectors are replaced by the
/// atom extent plus padding along that Cartesian axis.
pub(crate) fn padded_cell(structure: &Structure) -> [[f64; 3]; 3] {
    let mut cell = structure.lattice;
    let lengths = structure.cell_lengths();
    let extent = structure
        .bounding_box()
        .map(|(min, max)| [max[0] - min[0], max[1] - min[1], max[2] - min[2]])
        .unwrap_or([0.0; 3]);
    for k in 0..3 {
        if lengths[k] < 1e-12 {
            cell[k] = [0.0; 3];
            cell[k][k] = extent[k] + PAD;
        }
    }
    cell
}
