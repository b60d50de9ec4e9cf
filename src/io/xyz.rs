use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};

use crate::error::{BuildError, Result};
use crate::model::elements::symbol_from_z;
use crate::model::{Atom, Structure};

pub fn parse(path: &str) -> Result<Structure> {
    let file = File::open(path)?;
    read(io::BufReader::new(file))
}

/// Reads one (extended) XYZ frame.
pub fn read<R: BufRead>(reader: R) -> Result<Structure> {
    let mut lines = reader.lines();

    // 1. Number of Atoms
    let n_atoms_str = lines.next().ok_or(BuildError::Parse { line: 1, reason: "empty XYZ file".into() })??;
    let n_atoms: usize = n_atoms_str.trim().parse().map_err(|_| BuildError::Parse {
        line: 1,
        reason: format!("invalid atom count `{}`", n_atoms_str.trim()),
    })?;

    // 2. Comment Line (Try to find "Lattice=..." and "pbc=...")
    let comment = lines.next().transpose()?.unwrap_or_default();

    // Default Lattice (20.0 Angstrom Identity)
    let mut lattice = [[20.0, 0.0, 0.0], [0.0, 20.0, 0.0], [0.0, 0.0, 20.0]];
    let mut pbc = [false; 3];

    if let Some(lat_str) = quoted_value(&comment, "Lattice") {
        let parts: Vec<f64> = lat_str.split_whitespace().filter_map(|s| s.parse().ok()).collect();
        if parts.len() == 9 {
            lattice = [
                [parts[0], parts[1], parts[2]],
                [parts[3], parts[4], parts[5]],
                [parts[6], parts[7], parts[8]],
            ];
            pbc = [true; 3];
        }
    }
    if let Some(pbc_str) = quoted_value(&comment, "pbc") {
        for (k, flag) in pbc_str.split_whitespace().take(3).enumerate() {
            pbc[k] = matches!(flag, "T" | "t" | "True" | "true" | "1");
        }
    }

    // 3. Atoms
    let mut atoms = Vec::with_capacity(n_atoms);
    for (i, line) in lines.enumerate().take(n_atoms) {
        let line = line?;
        let line_no = i + 3;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(BuildError::Parse { line: line_no, reason: "expected `symbol x y z`".into() });
        }

        let coord = |s: &str| -> Result<f64> {
            s.parse().map_err(|_| BuildError::Parse { line: line_no, reason: format!("invalid coordinate `{s}`") })
        };
        // Some writers store the atomic number instead of the symbol.
        let element = match parts[0].parse::<u32>() {
            Ok(z) => symbol_from_z(z).ok_or_else(|| BuildError::Parse {
                line: line_no,
                reason: format!("unknown atomic number {z}"),
            })?,
            Err(_) => parts[0],
        };
        atoms.push(Atom::new(element, [coord(parts[1])?, coord(parts[2])?, coord(parts[3])?]));
    }

    if atoms.len() != n_atoms {
        return Err(BuildError::Parse {
            line: atoms.len() + 3,
            reason: format!("expected {} atoms, found {}", n_atoms, atoms.len()),
        });
    }

    let mut structure = Structure::new(lattice, atoms, pbc);
    structure.title = "XYZ Import".to_string();
    Ok(structure)
}

pub fn write(path: &str, structure: &Structure) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, structure)?;
    writer.flush()?;
    Ok(())
}

pub fn write_to<W: Write>(w: &mut W, structure: &Structure) -> Result<()> {
    writeln!(w, "{}", structure.len())?;

    let l = structure.lattice;
    let flag = |b: bool| if b { "T" } else { "F" };
    writeln!(
        w,
        "Lattice=\"{:.8} {:.8} {:.8} {:.8} {:.8} {:.8} {:.8} {:.8} {:.8}\" Properties=species:S:1:pos:R:3 pbc=\"{} {} {}\"",
        l[0][0], l[0][1], l[0][2], l[1][0], l[1][1], l[1][2], l[2][0], l[2][1], l[2][2],
        flag(structure.pbc[0]),
        flag(structure.pbc[1]),
        flag(structure.pbc[2]),
    )?;

    for atom in &structure.atoms {
        let p = atom.position;
        writeln!(w, "{:<3} {:14.8} {:14.8} {:14.8}", atom.element, p[0], p[1], p[2])?;
    }
    Ok(())
}

fn quoted_value<'a>(comment: &'a str, key: &str) -> Option<&'a str> {
    let pattern = format!("{key}=\"");
    let start = comment.find(&pattern)? + pattern.len();
    let rest = &comment[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Structure {
        Structure::new(
            [[0.0; 3], [0.0; 3], [0.0, 0.0, 2.46]],
            vec![Atom::new("B", [1.0, 0.0, 0.5]), Atom::new("N", [-1.0, 0.25, 1.7])],
            [false, false, true],
        )
    }

    #[test]
    fn test_write_header() {
        let mut buf = Vec::new();
        write_to(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("2"));
        let comment = lines.next().unwrap();
        assert!(comment.contains("pbc=\"F F T\""));
        assert!(comment.contains("2.46000000\""));
        assert!(lines.next().unwrap().starts_with("B "));
    }

    #[test]
    fn test_read_written_frame() {
        let mut buf = Vec::new();
        write_to(&mut buf, &sample()).unwrap();
        let s = read(buf.as_slice()).unwrap();
        assert_eq!(s.pbc, [false, false, true]);
        assert_relative_eq!(s.lattice[2][2], 2.46);
        assert_eq!(s.atoms[1].element, "N");
        assert_relative_eq!(s.atoms[1].position[1], 0.25);
    }

    #[test]
    fn test_plain_xyz_gets_default_cell() {
        let text = "1\nplain\nC 0.0 1.0 2.0\n";
        let s = read(text.as_bytes()).unwrap();
        assert_eq!(s.lattice[0][0], 20.0);
        assert_eq!(s.pbc, [false; 3]);
    }

    #[test]
    fn test_atomic_numbers_become_symbols() {
        let s = read("2\n\n5 0.0 0.0 0.0\n7 1.45 0.0 0.0\n".as_bytes()).unwrap();
        assert_eq!(s.formula(), "BN");
        assert!(matches!(read("1\n\n250 0 0 0\n".as_bytes()), Err(BuildError::Parse { line: 3, .. })));
    }

    #[test]
    fn test_truncated_file_is_an_error() {
        let text = "3\n\nC 0 0 0\n";
        assert!(matches!(read(text.as_bytes()), Err(BuildError::Parse { .. })));
        assert!(matches!(read("x\n".as_bytes()), Err(BuildError::Parse { line: 1, .. })));
    }
}
