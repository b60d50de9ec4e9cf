// src/io/poscar.rs

use std::fs::File;
use std::io::{BufWriter, Write};

use super::padded_cell;
use crate::error::Result;
use crate::model::Structure;

pub fn write(path: &str, structure: &Structure) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, structure)?;
    writer.flush()?;
    Ok(())
}

/// VASP 5 POSCAR in Cartesian coordinates, grouped by element in first-appearance order.
pub fn write_to<W: Write>(file: &mut W, structure: &Structure) -> Result<()> {
    // 1. Header
    let title = if structure.title.is_empty() { "Exported by nanoview" } else { &structure.title };
    writeln!(file, "{}", title)?;
    writeln!(file, "1.0")?; // Universal scaling factor

    // 2. Lattice Vectors
    for vec in &padded_cell(structure) {
        writeln!(file, " {:14.8} {:14.8} {:14.8}", vec[0], vec[1], vec[2])?;
    }

    // 3. Group Atoms by Element
    let mut order: Vec<&str> = Vec::new();
    for atom in &structure.atoms {
        if !order.contains(&atom.element.as_str()) {
            order.push(&atom.element);
        }
    }
    let groups: Vec<Vec<usize>> = order
        .iter()
        .map(|el| (0..structure.atoms.len()).filter(|&i| structure.atoms[i].element == *el).collect())
        .collect();

    for label in &order {
        write!(file, " {:<4}", label)?;
    }
    writeln!(file)?;
    for group in &groups {
        write!(file, " {:<4}", group.len())?;
    }
    writeln!(file)?;

    // 4. Atomic Positions
    let selective = structure.atoms.iter().any(|a| a.fixed);
    if selective {
        writeln!(file, "Selective dynamics")?;
    }
    writeln!(file, "Cartesian")?;

    for i in groups.iter().flatten() {
        let atom = &structure.atoms[*i];
        let p = atom.position;
        if selective {
            let f = if atom.fixed { "F" } else { "T" };
            writeln!(file, " {:14.8} {:14.8} {:14.8} {f} {f} {f}", p[0], p[1], p[2])?;
        } else {
            writeln!(file, " {:14.8} {:14.8} {:14.8}", p[0], p[1], p[2])?;
        }
    }

    Ok(())
}
