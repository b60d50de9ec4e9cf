// src/model/structure.rs

use nalgebra::{Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};

use super::elements::atomic_mass;
use crate::error::{BuildError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Atom {
  pub element: String,
  pub position: [f64; 3],
  // Constraint flag: fixed atoms are written with "F F F" selective dynamics.
  #[serde(default)]
  pub fixed: bool,
}

impl Atom {
  pub fn new(element: impl Into<String>, position: [f64; 3]) -> Self {
    Self {
      element: element.into(),
      position,
      fixed: false,
    }
  }
}

/// Rotation axis, either a Cartesian axis or an arbitrary direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Axis {
  X,
  Y,
  Z,
  Vector([f64; 3]),
}

impl Axis {
  pub fn direction(self) -> [f64; 3] {
    match self {
      Axis::X => [1.0, 0.0, 0.0],
      Axis::Y => [0.0, 1.0, 0.0],
      Axis::Z => [0.0, 0.0, 1.0],
      Axis::Vector(v) => v,
    }
  }
}

/// Point a rotation is performed about.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RotationCenter {
  Origin,
  CenterOfPositions,
  CenterOfMass,
  Point([f64; 3]),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Structure {
  // Lattice vectors: [a_vec, b_vec, c_vec]. A zero row marks a non-periodic direction.
  pub lattice: [[f64; 3]; 3],
  pub atoms: Vec<Atom>,
  #[serde(default)]
  pub pbc: [bool; 3],
  #[serde(default)]
  pub title: String,
}

impl Default for Structure {
  fn default() -> Self {
    Self {
      lattice: [[0.0; 3]; 3],
      atoms: Vec::new(),
      pbc: [false; 3],
      title: String::new(),
    }
  }
}

impl Structure {
  pub fn new(lattice: [[f64; 3]; 3], atoms: Vec<Atom>, pbc: [bool; 3]) -> Self {
    Self {
      lattice,
      atoms,
      pbc,
      title: String::new(),
    }
  }

  pub fn len(&self) -> usize {
    self.atoms.len()
  }

  pub fn is_empty(&self) -> bool {
    self.atoms.is_empty()
  }

  /// Rejects structures with no atoms or with NaN/infinite coordinates.
  pub fn validate(&self) -> Result<()> {
    if self.atoms.is_empty() {
      return Err(BuildError::EmptyStructure);
    }
    for (index, atom) in self.atoms.iter().enumerate() {
      if atom.position.iter().any(|c| !c.is_finite()) {
        return Err(BuildError::NonFinitePosition {
          index,
          position: atom.position,
        });
      }
    }
    Ok(())
  }

  pub fn positions(&self) -> Vec<[f64; 3]> {
    self.atoms.iter().map(|a| a.position).collect()
  }

  pub fn translate(&mut self, v: [f64; 3]) {
    for atom in &mut self.atoms {
      atom.position[0] += v[0];
      atom.position[1] += v[1];
      atom.position[2] += v[2];
    }
  }

  /// Rotates all atoms by `angle_deg` (right-handed) about `axis` through `center`.
  /// The cell is left untouched.
  pub fn rotate(&mut self, axis: Axis, angle_deg: f64, center: RotationCenter) -> Result<()> {
    let dir = axis.direction();
    let v = Vector3::from(dir);
    if v.norm() < 1e-12 {
      return Err(BuildError::InvalidAxis(dir));
    }
    let rot = Rotation3::from_axis_angle(&Unit::new_normalize(v), angle_deg.to_radians());

    let c = match center {
      RotationCenter::Origin => [0.0; 3],
      RotationCenter::CenterOfPositions => self.center_of_positions(),
      RotationCenter::CenterOfMass => self.center_of_mass(),
      RotationCenter::Point(p) => p,
    };
    let c = Vector3::from(c);

    for atom in &mut self.atoms {
      let p = rot * (Vector3::from(atom.position) - c) + c;
      atom.position = [p.x, p.y, p.z];
    }
    Ok(())
  }

  /// Appends the atoms of `other`. The cell and pbc of `self` are kept.
  pub fn extend(&mut self, other: &Structure) {
    self.atoms.extend(other.atoms.iter().cloned());
  }

  /// Arithmetic mean of atom positions; the origin for an empty structure.
  pub fn center_of_positions(&self) -> [f64; 3] {
    let mut sum = [0.0; 3];
    for a in &self.atoms {
      sum[0] += a.position[0];
      sum[1] += a.position[1];
      sum[2] += a.position[2];
    }
    let n = self.atoms.len() as f64;
    if n > 0.0 {
      [sum[0] / n, sum[1] / n, sum[2] / n]
    } else {
      [0.0; 3]
    }
  }

  pub fn center_of_mass(&self) -> [f64; 3] {
    let mut sum = [0.0; 3];
    let mut total = 0.0;
    for a in &self.atoms {
      let m = atomic_mass(&a.element);
      sum[0] += m * a.position[0];
      sum[1] += m * a.position[1];
      sum[2] += m * a.position[2];
      total += m;
    }
    if total > 0.0 {
      [sum[0] / total, sum[1] / total, sum[2] / total]
    } else {
      self.center_of_positions()
    }
  }

  /// Axis-aligned (min, max) corners of the atom positions.
  pub fn bounding_box(&self) -> Option<([f64; 3], [f64; 3])> {
    let first = self.atoms.first()?.position;
    let mut min = first;
    let mut max = first;
    for a in &self.atoms {
      for k in 0..3 {
        min[k] = min[k].min(a.position[k]);
        max[k] = max[k].max(a.position[k]);
      }
    }
    Some((min, max))
  }

  /// Lengths |a|, |b|, |c| of the lattice vectors.
  pub fn cell_lengths(&self) -> [f64; 3] {
    let l = |v: [f64; 3]| (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [l(self.lattice[0]), l(self.lattice[1]), l(self.lattice[2])]
  }

  /// Moves the bounding-box midpoint to the middle of the cell.
  ///
  /// Along degenerate (zero-length) lattice directions the midpoint goes to
  /// the origin instead. Repeated calls do not move atoms further.
  pub fn center(&mut self) {
    let Some((min, max)) = self.bounding_box() else {
      return;
    };
    let mid = [
      (min[0] + max[0]) * 0.5,
      (min[1] + max[1]) * 0.5,
      (min[2] + max[2]) * 0.5,
    ];

    let lengths = self.cell_lengths();
    let mut target = [0.0; 3];
    for (k, vec) in self.lattice.iter().enumerate() {
      if lengths[k] > 1e-12 {
        target[0] += vec[0] * 0.5;
        target[1] += vec[1] * 0.5;
        target[2] += vec[2] * 0.5;
      }
    }

    self.translate([target[0] - mid[0], target[1] - mid[1], target[2] - mid[2]]);
  }

  /// Resizes the cell along the given Cartesian `axes` to the atom extent
  /// plus `vacuum` on each side, then centers.
  ///
  /// Only meaningful for cells whose vectors are aligned with x, y and z.
  pub fn center_with_vacuum(&mut self, vacuum: f64, axes: &[usize]) -> Result<()> {
    if vacuum < 0.0 {
      return Err(BuildError::invalid("vacuum", format!("must be >= 0, got {vacuum}")));
    }
    let (min, max) = self.bounding_box().ok_or(BuildError::EmptyStructure)?;
    for &k in axes {
      if k > 2 {
        return Err(BuildError::invalid("axes", format!("axis index {k} out of range")));
      }
      let mut vec = [0.0; 3];
      vec[k] = max[k] - min[k] + 2.0 * vacuum;
      self.lattice[k] = vec;
    }
    self.center();
    Ok(())
  }

  /// Tiles the structure `nx * ny * nz` times along the lattice vectors.
  pub fn repeat(&self, nx: u32, ny: u32, nz: u32) -> Structure {
    let vec_a = self.lattice[0];
    let vec_b = self.lattice[1];
    let vec_c = self.lattice[2];

    let cells = nx as usize * ny as usize * nz as usize;
    let mut atoms = Vec::with_capacity(self.atoms.len() * cells);
    // Empty structures or zero counts tile to nothing.
    if !self.atoms.is_empty() && cells > 0 {
      for x in 0..nx {
        for y in 0..ny {
          for z in 0..nz {
            let (fx, fy, fz) = (x as f64, y as f64, z as f64);
            let shift = [
              vec_a[0] * fx + vec_b[0] * fy + vec_c[0] * fz,
              vec_a[1] * fx + vec_b[1] * fy + vec_c[1] * fz,
              vec_a[2] * fx + vec_b[2] * fy + vec_c[2] * fz,
            ];
            for atom in &self.atoms {
              let mut a = atom.clone();
              a.position[0] += shift[0];
              a.position[1] += shift[1];
              a.position[2] += shift[2];
              atoms.push(a);
            }
          }
        }
      }
    }

    let scale = |v: [f64; 3], n: u32| [v[0] * n as f64, v[1] * n as f64, v[2] * n as f64];
    Structure {
      lattice: [scale(vec_a, nx), scale(vec_b, ny), scale(vec_c, nz)],
      atoms,
      pbc: self.pbc,
      title: self.title.clone(),
    }
  }

  /// Element counts in first-appearance order, e.g. `B60N60`.
  pub fn formula(&self) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for atom in &self.atoms {
      match counts.iter_mut().find(|(el, _)| *el == atom.element) {
        Some((_, n)) => *n += 1,
        None => counts.push((&atom.element, 1)),
      }
    }
    counts
      .iter()
      .map(|(el, n)| if *n == 1 { el.to_string() } else { format!("{el}{n}") })
      .collect()
  }

  pub fn set_fixed(&mut self, indices: &[usize], fixed: bool) {
    for &i in indices {
      if let Some(a) = self.atoms.get_mut(i) {
        a.fixed = fixed;
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;

  fn dimer() -> Structure {
    Structure::new(
      [[10.0, 0.0, 0.0], [0.0, 10.0, 0.0], [0.0, 0.0, 5.0]],
      vec![Atom::new("C", [1.0, 0.0, 0.0]), Atom::new("H", [2.0, 0.0, 0.0])],
      [true, true, true],
    )
  }

  #[test]
  fn test_translate() {
    let mut s = dimer();
    s.translate([1.0, 2.0, 3.0]);
    assert_eq!(s.atoms[0].position, [2.0, 2.0, 3.0]);
    assert_eq!(s.atoms[1].position, [3.0, 2.0, 3.0]);
  }

  #[test]
  fn test_rotate_about_origin() {
    let mut s = dimer();
    s.rotate(Axis::Z, 90.0, RotationCenter::Origin).unwrap();
    assert_relative_eq!(s.atoms[0].position[0], 0.0, epsilon = 1e-12);
    assert_relative_eq!(s.atoms[0].position[1], 1.0, epsilon = 1e-12);
  }

  #[test]
  fn test_rotate_about_cop_keeps_center() {
    let mut s = dimer();
    let before = s.center_of_positions();
    s.rotate(Axis::Z, 30.0, RotationCenter::CenterOfPositions).unwrap();
    let after = s.center_of_positions();
    for k in 0..3 {
      assert_relative_eq!(before[k], after[k], epsilon = 1e-12);
    }
  }

  #[test]
  fn test_rotate_rejects_zero_axis() {
    let mut s = dimer();
    let err = s.rotate(Axis::Vector([0.0; 3]), 10.0, RotationCenter::Origin);
    assert!(matches!(err, Err(BuildError::InvalidAxis(_))));
  }

  #[test]
  fn test_center_of_mass_weighted() {
    let s = dimer();
    let com = s.center_of_mass();
    // Carbon is ~12x heavier than hydrogen.
    assert!(com[0] < 1.1 && com[0] > 1.0);
  }

  #[test]
  fn test_repeat_counts_and_cell() {
    let s = dimer().repeat(1, 2, 3);
    assert_eq!(s.len(), 12);
    assert_eq!(s.lattice[1], [0.0, 20.0, 0.0]);
    assert_eq!(s.lattice[2], [0.0, 0.0, 15.0]);
    assert_relative_eq!(s.atoms[11].position[2], 10.0);
    assert_relative_eq!(s.atoms[11].position[1], 10.0);
  }

  #[test]
  fn test_repeat_large_counts_do_not_overflow_u32() {
    // 70_000^2 overflows u32
    let big = dimer().repeat(70_000, 70_000, 0);
    assert!(big.is_empty());
    assert_relative_eq!(big.lattice[0][0], 700_000.0);
    assert_eq!(big.lattice[2], [0.0; 3]);
  }

  #[test]
  fn test_center_is_idempotent() {
    let mut s = dimer();
    s.center();
    assert_relative_eq!(s.atoms[0].position[0], 4.5, epsilon = 1e-12);
    assert_relative_eq!(s.atoms[0].position[2], 2.5, epsilon = 1e-12);
    let once = s.positions();
    s.center();
    for (a, b) in once.iter().zip(s.positions()) {
      for k in 0..3 {
        assert_relative_eq!(a[k], b[k], epsilon = 1e-12);
      }
    }
  }

  #[test]
  fn test_center_degenerate_cell_goes_to_origin() {
    let mut s = dimer();
    s.lattice = [[0.0; 3]; 3];
    s.center();
    assert_relative_eq!(s.atoms[0].position[0], -0.5, epsilon = 1e-12);
    assert_relative_eq!(s.atoms[1].position[0], 0.5, epsilon = 1e-12);
  }

  #[test]
  fn test_center_with_vacuum() {
    let mut s = dimer();
    s.center_with_vacuum(5.0, &[0]).unwrap();
    assert_relative_eq!(s.lattice[0][0], 11.0);
    assert_relative_eq!(s.atoms[0].position[0], 5.0, epsilon = 1e-12);
  }

  #[test]
  fn test_formula_first_appearance_order() {
    let mut s = dimer();
    s.atoms.push(Atom::new("C", [0.0; 3]));
    assert_eq!(s.formula(), "C2H");
  }

  #[test]
  fn test_validate() {
    assert!(dimer().validate().is_ok());
    assert!(matches!(Structure::default().validate(), Err(BuildError::EmptyStructure)));
    let mut s = dimer();
    s.atoms[1].position[2] = f64::NAN;
    assert!(matches!(s.validate(), Err(BuildError::NonFinitePosition { index: 1, .. })));
  }
}
