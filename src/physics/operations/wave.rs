// src/physics/operations/wave.rs
//
// Sinusoidal out-of-plane deformation of ribbons and sheets.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{BuildError, Result};
use crate::model::Structure;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveParams {
  /// Peak displacement (Angstrom).
  pub amplitude: f64,
  /// Full wavelengths per cell length. Integer values keep the structure periodic.
  pub periods: f64,
  /// Phase in radians.
  pub phase: f64,
  /// Cartesian axis the wave travels along (index into x, y, z).
  pub along: usize,
  /// Cartesian axis the atoms are displaced along.
  pub displace: usize,
}

impl Default for WaveParams {
  fn default() -> Self {
    // Ribbons lie in xz and repeat along z, so the natural wave displaces y.
    Self {
      amplitude: 1.0,
      periods: 1.0,
      phase: 0.0,
      along: 2,
      displace: 1,
    }
  }
}

/// Returns a displaced copy: `u_displace += A * sin(2 pi * periods * u_along / L + phase)`.
pub fn wave(structure: &Structure, params: &WaveParams) -> Result<Structure> {
  if params.along > 2 || params.displace > 2 {
    return Err(BuildError::invalid("along, displace", "axis index must be 0, 1 or 2"));
  }
  if params.along == params.displace {
    return Err(BuildError::invalid(
      "along, displace",
      "the wave cannot displace atoms along its own direction",
    ));
  }
  let length = structure.cell_lengths()[params.along];
  if length < 1e-12 {
    return Err(BuildError::DegenerateCell(params.along));
  }

  let k = 2.0 * PI * params.periods / length;
  let mut out = structure.clone();
  for atom in &mut out.atoms {
    let u = atom.position[params.along];
    atom.position[params.displace] += params.amplitude * (k * u + params.phase).sin();
  }
  Ok(out)
}

/// One structure per animation frame, with the phase advancing by 2 pi / frames.
pub fn wave_frames(structure: &Structure, params: &WaveParams, frames: usize) -> Result<Vec<Structure>> {
  if frames == 0 {
    return Err(BuildError::invalid("frames", "must be at least 1"));
  }
  (0..frames)
    .map(|f| {
      let p = WaveParams {
        phase: params.phase + 2.0 * PI * f as f64 / frames as f64,
        ..params.clone()
      };
      wave(structure, &p)
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::physics::generators::nanoribbon::{graphene_nanoribbon, RibbonParams};
  use approx::assert_relative_eq;

  fn ribbon() -> Structure {
    graphene_nanoribbon(&RibbonParams { n: 3, m: 8, ..Default::default() }).unwrap()
  }

  #[test]
  fn test_zero_amplitude_is_identity() {
    let r = ribbon();
    let w = wave(&r, &WaveParams { amplitude: 0.0, ..Default::default() }).unwrap();
    assert_eq!(w.positions(), r.positions());
  }

  #[test]
  fn test_displacement_bounded_and_one_axis() {
    let r = ribbon();
    let w = wave(&r, &WaveParams { amplitude: 2.0, periods: 2.0, ..Default::default() }).unwrap();
    for (a, b) in r.atoms.iter().zip(&w.atoms) {
      assert_eq!(a.position[0], b.position[0]);
      assert_eq!(a.position[2], b.position[2]);
      assert!((b.position[1] - a.position[1]).abs() <= 2.0 + 1e-12);
    }
  }

  #[test]
  fn test_integer_periods_are_periodic() {
    let r = ribbon();
    let params = WaveParams { amplitude: 1.5, periods: 3.0, phase: 0.4, ..Default::default() };
    let l = r.lattice[2][2];
    let k = 2.0 * PI * params.periods / l;
    let f = |z: f64| params.amplitude * (k * z + params.phase).sin();
    assert_relative_eq!(f(0.7), f(0.7 + l), epsilon = 1e-9);
  }

  #[test]
  fn test_frames_advance_phase() {
    let r = ribbon();
    let frames = wave_frames(&r, &WaveParams::default(), 4).unwrap();
    assert_eq!(frames.len(), 4);
    assert_ne!(frames[0].positions(), frames[1].positions());
    // half a cycle apart -> opposite displacement
    for (a, b) in frames[0].atoms.iter().zip(&frames[2].atoms) {
      assert_relative_eq!(a.position[1], -b.position[1], epsilon = 1e-9);
    }
  }

  #[test]
  fn test_rejects_degenerate_axis() {
    let r = ribbon();
    let p = WaveParams { along: 0, ..Default::default() };
    assert!(matches!(wave(&r, &p), Err(BuildError::DegenerateCell(0))));
    let p = WaveParams { along: 1, displace: 1, ..Default::default() };
    assert!(wave(&r, &p).is_err());
  }
}
