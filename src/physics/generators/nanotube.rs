// src/physics/generators/nanotube.rs
//
// Single-walled (n, m) nanotubes rolled from a honeycomb sheet. The tube axis
// is z and the tube is centered on the z axis.

use crate::error::{BuildError, Result};
use crate::model::{Atom, Structure};
use std::f64::consts::PI;

#[derive(Clone, Debug)]
pub struct TubeParams {
  pub n: u32,
  pub m: u32,
  /// Number of translational units along z.
  pub length: u32,
  /// Nearest-neighbor bond length (Angstrom).
  pub bond: f64,
  pub symbol: String,
  /// Optional vacuum padding on x and y; the cell is then made periodic-ready.
  pub vacuum: Option<f64>,
}

impl TubeParams {
  pub fn carbon(n: u32, m: u32, length: u32) -> Self {
    Self {
      n,
      m,
      length,
      bond: 1.42,
      symbol: "C".to_string(),
      vacuum: None,
    }
  }
}

/// Tube diameter in Angstrom: |C_h| / pi with |C_h| = sqrt(3) * bond * sqrt(n^2 + m^2 + nm).
pub fn tube_diameter(n: u32, m: u32, bond: f64) -> f64 {
  let (n, m) = (n as f64, m as f64);
  3f64.sqrt() * bond * (n * n + m * m + n * m).sqrt() / PI
}

fn gcd(a: i64, b: i64) -> i64 {
  if b == 0 {
    a.abs()
  } else {
    gcd(b, a % b)
  }
}

/// Builds an (n, m) nanotube.
///
/// One translational unit holds `2 * 2(n^2 + m^2 + nm) / d_R` atoms where
/// `d_R = gcd(2n + m, 2m + n)`. Swapping n and m gives the mirror-handed tube.
pub fn nanotube(params: &TubeParams) -> Result<Structure> {
  if params.n == 0 && params.m == 0 {
    return Err(BuildError::invalid("n, m", "chiral indices cannot both be zero"));
  }
  if params.length == 0 {
    return Err(BuildError::invalid("length", "must be at least 1"));
  }
  if !(params.bond > 0.0) {
    return Err(BuildError::invalid("bond", format!("must be positive, got {}", params.bond)));
  }

  let (n, m, sign) = if params.n < params.m {
    (params.m as i64, params.n as i64, -1.0)
  } else {
    (params.n as i64, params.m as i64, 1.0)
  };

  let sq3 = 3f64.sqrt();
  let bond = params.bond;
  let a = sq3 * bond;
  let l2 = n * n + m * m + n * m;
  let l1 = (l2 as f64).sqrt();

  let nd = gcd(n, m);
  let ndr = if (n - m) % (3 * nd) == 0 { 3 * nd } else { nd };

  // Translation vector T = (nr, ns) in graphene basis, nn hexagons per unit.
  let nr = (2 * m + n) / ndr;
  let ns = -(2 * n + m) / ndr;
  let nn = 2 * l2 / ndr;

  // Symmetry vector R = (p, q): the unique lattice vector with T x R = 1 inside the unit.
  let search = if nr == 0 { 1 } else { (nr * 4).abs() };
  let mut candidates = Vec::new();
  for i in -search..=search {
    for j in -search..=search {
      if nr * j - ns * i == 1 {
        let j1 = m * i - n * j;
        if j1 > 0 && j1 < nn {
          candidates.push((i, j));
        }
      }
    }
  }
  let (p, q) = match candidates.as_slice() {
    [single] => *single,
    [] => return Err(BuildError::invalid("n, m", "no symmetry vector found")),
    _ => return Err(BuildError::invalid("n, m", "symmetry vector is not unique")),
  };

  let lp = p * p + q * q + p * q;
  let r = a * (lp as f64).sqrt();
  let c = a * l1;
  let t = sq3 * c / ndr as f64;
  let rs = c / (2.0 * PI);

  let q1 = ((sq3 * m as f64) / (2 * n + m) as f64).atan();
  let q2 = ((sq3 * q as f64) / (2 * p + q) as f64).atan();
  let q3 = q1 - q2;
  let q4 = 2.0 * PI / nn as f64;
  let q5 = bond * (PI / 6.0 - q1).cos() / c * 2.0 * PI;

  let h1 = t.abs() / q3.sin().abs();
  let h2 = bond * (PI / 6.0 - q1).sin();

  let wrap = |z: f64, kk: f64| -> f64 {
    if z >= t - 1e-4 {
      z - t * kk
    } else if z < 0.0 {
      z + t * kk
    } else {
      z
    }
  };

  let mut unit: Vec<[f64; 3]> = Vec::with_capacity(2 * nn as usize);
  for i in 0..nn {
    let fi = i as f64;
    let k = (fi * r.abs() / h1).floor();

    let z1 = (fi * r.abs() - k * h1) * q3.sin();
    let z1 = wrap(z1, ((z1 + 1e-4) / t).floor().abs());
    unit.push([rs * (fi * q4).cos(), rs * (fi * q4).sin(), z1]);

    let x2 = rs * (fi * q4 + q5).cos();
    let y2 = rs * (fi * q4 + q5).sin();
    let z3 = (fi * r.abs() - k * h1) * q3.sin() - h2;
    let z2 = if (0.0..t).contains(&z3) {
      z3
    } else {
      let z2 = (fi * r.abs() - (k + 1.0) * h1) * q3.sin() - h2;
      wrap(z2, (z2 / t).floor().abs())
    };
    unit.push([x2, y2, z2]);
  }

  let mut atoms = Vec::with_capacity(unit.len() * params.length as usize);
  for cell in 0..params.length {
    let shift = cell as f64 * t;
    for p in &unit {
      // Mirror-handed tubes are reflected in z and shifted back into the cell.
      let z = if sign < 0.0 { t - p[2] } else { p[2] };
      atoms.push(Atom::new(params.symbol.clone(), [p[0], p[1], z + shift]));
    }
  }

  let mut tube = Structure::new(
    [[0.0; 3], [0.0; 3], [0.0, 0.0, params.length as f64 * t]],
    atoms,
    [false, false, true],
  );
  tube.title = format!("({},{}) nanotube", params.n, params.m);

  if let Some(vacuum) = params.vacuum {
    tube.center_with_vacuum(vacuum, &[0, 1])?;
  }

  let chiral_angle = (sq3 * n as f64 / (2 * m + n) as f64).atan().to_degrees();
  log::debug!(
    "{}: {} atoms, diameter {:.3} A, period {:.3} A, chiral angle {:.2} deg",
    tube.title,
    tube.len(),
    2.0 * rs,
    t,
    chiral_angle
  );

  Ok(tube)
}

/// Translational period of an (n, m) tube along its axis.
pub fn tube_period(n: u32, m: u32, bond: f64) -> f64 {
  let (n, m) = (n.max(m) as i64, n.min(m) as i64);
  let nd = gcd(n, m);
  let ndr = if nd != 0 && (n - m) % (3 * nd) == 0 { 3 * nd } else { nd.max(1) };
  let c = 3f64.sqrt() * bond * ((n * n + m * m + n * m) as f64).sqrt();
  3f64.sqrt() * c / ndr as f64
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;

  fn radial(p: [f64; 3]) -> f64 {
    (p[0] * p[0] + p[1] * p[1]).sqrt()
  }

  fn nearest(tube: &Structure, idx: usize) -> f64 {
    let p = tube.atoms[idx].position;
    let period = tube.lattice[2][2];
    tube
      .atoms
      .iter()
      .enumerate()
      .filter(|(i, _)| *i != idx)
      .map(|(_, a)| {
        let dx = a.position[0] - p[0];
        let dy = a.position[1] - p[1];
        let mut dz = a.position[2] - p[2];
        dz -= period * (dz / period).round();
        (dx * dx + dy * dy + dz * dz).sqrt()
      })
      .fold(f64::MAX, f64::min)
  }

  #[test]
  fn test_zigzag_counts_and_period() {
    let tube = nanotube(&TubeParams::carbon(10, 0, 1)).unwrap();
    assert_eq!(tube.len(), 40);
    assert_relative_eq!(tube.lattice[2][2], 3.0 * 1.42, epsilon = 1e-9);
    assert_eq!(tube.pbc, [false, false, true]);
  }

  #[test]
  fn test_armchair_counts_and_period() {
    let tube = nanotube(&TubeParams::carbon(5, 5, 3)).unwrap();
    assert_eq!(tube.len(), 60);
    assert_relative_eq!(tube.lattice[2][2], 3.0 * 3f64.sqrt() * 1.42, epsilon = 1e-9);
    assert_relative_eq!(tube_period(5, 5, 1.42) * 3.0, tube.lattice[2][2], epsilon = 1e-9);
  }

  #[test]
  fn test_chiral_count() {
    // N = 2(36 + 16 + 24) / 2 = 76 hexagons -> 152 atoms
    let tube = nanotube(&TubeParams::carbon(6, 4, 1)).unwrap();
    assert_eq!(tube.len(), 152);
  }

  #[test]
  fn test_all_atoms_on_cylinder() {
    for (n, m) in [(10, 0), (5, 5), (6, 4)] {
      let tube = nanotube(&TubeParams::carbon(n, m, 1)).unwrap();
      let radius = tube_diameter(n, m, 1.42) / 2.0;
      for a in &tube.atoms {
        assert_relative_eq!(radial(a.position), radius, epsilon = 1e-9);
      }
    }
  }

  #[test]
  fn test_zigzag_atoms_inside_cell_and_bonded() {
    let tube = nanotube(&TubeParams::carbon(10, 0, 1)).unwrap();
    let period = tube.lattice[2][2];
    for a in &tube.atoms {
      assert!(a.position[2] > -1e-3 && a.position[2] < period + 1e-3);
    }
    let d = nearest(&tube, 0);
    assert!(d > 1.3 && d < 1.43, "nearest neighbor {d}");
  }

  #[test]
  fn test_mirror_handed_tube() {
    let right = nanotube(&TubeParams::carbon(6, 4, 1)).unwrap();
    let left = nanotube(&TubeParams::carbon(4, 6, 1)).unwrap();
    assert_eq!(right.len(), left.len());
    assert_relative_eq!(right.lattice[2][2], left.lattice[2][2], epsilon = 1e-9);
  }

  #[test]
  fn test_diameter() {
    assert_relative_eq!(tube_diameter(10, 0, 1.42), 7.8289, epsilon = 1e-3);
  }

  #[test]
  fn test_vacuum_sets_cell() {
    let mut params = TubeParams::carbon(5, 5, 1);
    params.vacuum = Some(5.0);
    let tube = nanotube(&params).unwrap();
    let d = tube_diameter(5, 5, 1.42);
    assert!(tube.lattice[0][0] > d + 9.9 && tube.lattice[0][0] <= d + 10.0 + 1e-9);
  }

  #[test]
  fn test_rejects_bad_params() {
    assert!(nanotube(&TubeParams::carbon(0, 0, 1)).is_err());
    assert!(nanotube(&TubeParams::carbon(5, 5, 0)).is_err());
    let mut p = TubeParams::carbon(5, 5, 1);
    p.bond = -1.0;
    assert!(nanotube(&p).is_err());
  }
}
