// src/physics/operations/scan.rs
//
// Concentric tube pairs and the inner-tube rotation sweep used for animations.

use crate::error::{BuildError, Result};
use crate::model::{Axis, RotationCenter, Structure};

/// Upper bound on the number of frames a single sweep may produce.
pub const MAX_SCAN_FRAMES: usize = 100_000;

#[derive(Clone, Debug)]
pub struct ScanFrame {
  /// Rotation of the inner tube in degrees.
  pub angle: f64,
  pub structure: Structure,
}

/// Places `inner` on the axis of `outer` and merges them. The outer cell is kept.
pub fn concentric_pair(inner: &Structure, outer: &Structure) -> Result<Structure> {
  inner.validate()?;
  outer.validate()?;

  let ci = inner.center_of_positions();
  let co = outer.center_of_positions();
  let mut shifted = inner.clone();
  shifted.translate([co[0] - ci[0], co[1] - ci[1], 0.0]);

  let mut pair = outer.clone();
  pair.extend(&shifted);
  pair.title = format!("{} inside {}", inner.title, outer.title);
  Ok(pair)
}

/// Rotates `inner` about the tube axis through `start..stop` (exclusive) in `step` degrees,
/// pairing every orientation with the unchanged `outer` tube.
pub fn rotation_scan(
  inner: &Structure,
  outer: &Structure,
  start: f64,
  stop: f64,
  step: f64,
) -> Result<Vec<ScanFrame>> {
  if !(step > 0.0) {
    return Err(BuildError::invalid("step", format!("must be positive, got {step}")));
  }

  let count = ((stop - start) / step).ceil().max(0.0);
  if !(count <= MAX_SCAN_FRAMES as f64) {
    return Err(BuildError::invalid(
      "step",
      format!("{start}..{stop} in steps of {step} exceeds {MAX_SCAN_FRAMES} frames"),
    ));
  }
  let count = count as usize;
  let mut frames = Vec::with_capacity(count);
  for k in 0..count {
    let angle = start + k as f64 * step;
    let mut rotated = inner.clone();
    rotated.rotate(Axis::Z, angle, RotationCenter::CenterOfPositions)?;
    let structure = concentric_pair(&rotated, outer)?;
    frames.push(ScanFrame { angle, structure });
  }

  log::debug!("rotation scan: {} frames from {start} to {stop} deg", frames.len());
  Ok(frames)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::physics::generators::nanotube::{nanotube, TubeParams};
  use crate::physics::operations::relabel::boron_nitride;
  use approx::assert_relative_eq;

  fn pair_parts() -> (Structure, Structure) {
    let inner = boron_nitride(&nanotube(&TubeParams::carbon(5, 5, 2)).unwrap());
    let outer = boron_nitride(&nanotube(&TubeParams::carbon(10, 10, 2)).unwrap());
    (inner, outer)
  }

  #[test]
  fn test_pair_keeps_outer_cell_and_counts() {
    let (inner, outer) = pair_parts();
    let pair = concentric_pair(&inner, &outer).unwrap();
    assert_eq!(pair.len(), inner.len() + outer.len());
    assert_eq!(pair.lattice, outer.lattice);
  }

  #[test]
  fn test_scan_frame_angles() {
    let (inner, outer) = pair_parts();
    let frames = rotation_scan(&inner, &outer, 0.0, 36.0, 6.0).unwrap();
    let angles: Vec<f64> = frames.iter().map(|f| f.angle).collect();
    assert_eq!(angles, vec![0.0, 6.0, 12.0, 18.0, 24.0, 30.0]);
  }

  #[test]
  fn test_scan_rotates_only_inner() {
    let (inner, outer) = pair_parts();
    let frames = rotation_scan(&inner, &outer, 0.0, 20.0, 10.0).unwrap();
    let (a, b) = (&frames[0].structure, &frames[1].structure);
    let n_out = outer.len();
    assert_eq!(a.atoms[..n_out], b.atoms[..n_out]);
    assert_ne!(a.atoms[n_out].position, b.atoms[n_out].position);
    // radius about the axis is preserved
    let r = |p: [f64; 3]| (p[0] * p[0] + p[1] * p[1]).sqrt();
    let c = inner.center_of_positions();
    let shift = |p: [f64; 3]| [p[0] - c[0], p[1] - c[1], p[2]];
    assert_relative_eq!(
      r(shift(a.atoms[n_out].position)),
      r(shift(b.atoms[n_out].position)),
      epsilon = 1e-9
    );
  }

  #[test]
  fn test_scan_rejects_bad_step() {
    let (inner, outer) = pair_parts();
    assert!(rotation_scan(&inner, &outer, 0.0, 10.0, 0.0).is_err());
    assert!(rotation_scan(&inner, &outer, 10.0, 0.0, 1.0).unwrap().is_empty());
  }

  #[test]
  fn test_scan_rejects_runaway_frame_count() {
    let (inner, outer) = pair_parts();
    let err = rotation_scan(&inner, &outer, 0.0, 1e300, 1e-300);
    assert!(matches!(err, Err(BuildError::InvalidParameter { name: "step", .. })));
    let err = rotation_scan(&inner, &outer, 0.0, f64::INFINITY, 1.0);
    assert!(err.is_err());
  }
}
