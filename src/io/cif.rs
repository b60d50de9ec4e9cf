// src/io/cif.rs

use nalgebra::{Matrix3, Vector3};
use std::fs::File;
use std::io::{BufWriter, Write};

use super::padded_cell;
use crate::error::{BuildError, Result};
use crate::model::Structure;

pub fn write(path: &str, structure: &Structure) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, structure)?;
    writer.flush()?;
    Ok(())
}

/// P1 CIF with fractional coordinates. Missing cell vectors are padded the
/// same way as in POSCAR output.
pub fn write_to<W: Write>(file: &mut W, structure: &Structure) -> Result<()> {
    let cell = padded_cell(structure);
    let lat = Matrix3::from_row_slice(&[
        cell[0][0], cell[0][1], cell[0][2], cell[1][0], cell[1][1], cell[1][2], cell[2][0], cell[2][1],
        cell[2][2],
    ]);
    // Cartesian = Lattice^T x Fractional
    let inv = lat.transpose().try_inverse().ok_or_else(|| BuildError::invalid("lattice", "cell vectors are coplanar"))?;

    let name: String = structure.formula().chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    writeln!(file, "data_{}", if name.is_empty() { "nanoview" } else { &name })?;
    writeln!(file, "_symmetry_space_group_name_H-M 'P 1'")?;
    writeln!(file, "_symmetry_Int_Tables_number 1")?;

    let a = Vector3::from(cell[0]);
    let b = Vector3::from(cell[1]);
    let c = Vector3::from(cell[2]);
    let angle = |u: &Vector3<f64>, v: &Vector3<f64>| u.angle(v).to_degrees();

    writeln!(file, "_cell_length_a    {:.6}", a.norm())?;
    writeln!(file, "_cell_length_b    {:.6}", b.norm())?;
    writeln!(file, "_cell_length_c    {:.6}", c.norm())?;
    writeln!(file, "_cell_angle_alpha {:.6}", angle(&b, &c))?;
    writeln!(file, "_cell_angle_beta  {:.6}", angle(&a, &c))?;
    writeln!(file, "_cell_angle_gamma {:.6}", angle(&a, &b))?;

    writeln!(file, "loop_")?;
    writeln!(file, " _atom_site_label")?;
    writeln!(file, " _atom_site_type_symbol")?;
    writeln!(file, " _atom_site_fract_x")?;
    writeln!(file, " _atom_site_fract_y")?;
    writeln!(file, " _atom_site_fract_z")?;

    for (i, atom) in structure.atoms.iter().enumerate() {
        let f = inv * Vector3::from(atom.position);
        writeln!(file, " {}{} {} {:.6} {:.6} {:.6}", atom.element, i + 1, atom.element, f.x, f.y, f.z)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Atom;
    use approx::assert_relative_eq;

    #[test]
    fn test_fractional_coordinates_in_padded_cell() {
        let s = Structure::new(
            [[0.0; 3], [0.0; 3], [0.0, 0.0, 4.0]],
            vec![Atom::new("C", [0.0, 0.0, 0.0]), Atom::new("C", [2.0, 1.0, 2.0])],
            [false, false, true],
        );
        let mut buf = Vec::new();
        write_to(&mut buf, &s).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("data_C2"));
        assert!(text.contains("_cell_angle_gamma 90.000000"));
        let last: Vec<&str> = text.lines().last().unwrap().split_whitespace().collect();
        assert_eq!(last[0], "C2");
        // x extent 2 + 10 padding, y extent 1 + 10
        assert_relative_eq!(last[2].parse::<f64>().unwrap(), 2.0 / 12.0, epsilon = 1e-6);
        assert_relative_eq!(last[3].parse::<f64>().unwrap(), 1.0 / 11.0, epsilon = 1e-6);
        assert_relative_eq!(last[4].parse::<f64>().unwrap(), 0.5, epsilon = 1e-6);
    }
}
