// src/physics/operations/bundle.rs
//
// Hexagonal packing of parallel tubes. Every copy is the seed rotated by 30
// degrees about the tube axis (z) and shifted onto a site of a hexagonal grid.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Axis, RotationCenter, Structure};

/// Orientation offset of every packed copy relative to the seed, in degrees.
pub const COPY_ROTATION_DEG: f64 = 30.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BundleParams {
  /// Outer tube diameter d.
  pub diameter: f64,
  /// Row-to-row separation s: rows sit at y = +-j * (d + s).
  pub separation: f64,
  /// Same-row separation s2: row j = 0 has pitch d + s2, rows j > 0 use d + 2 * s2.
  pub near_separation: f64,
  /// Highest row index i scanned (i in 1..=row_count).
  pub row_count: u32,
  /// Highest column index j scanned (j in 0..=col_count).
  pub col_count: u32,
}

impl BundleParams {
  /// Spacings derived from a single wall-to-wall `gap`.
  ///
  /// `near_separation` is the gap itself. `separation` puts the j = 1 rows
  /// at a center distance of `d + 2 * gap` from the seed, so the off-axis
  /// rows form equilateral triangles with their own pitch.
  pub fn hexagonal(diameter: f64, gap: f64, row_count: u32, col_count: u32) -> Self {
    let offset_pitch = diameter + 2.0 * gap;
    Self {
      diameter,
      separation: offset_pitch * 3f64.sqrt() / 2.0 - diameter,
      near_separation: gap,
      row_count,
      col_count,
    }
  }

  /// Pitch along x of the j = 0 row.
  pub fn pitch(&self) -> f64 {
    self.diameter + self.near_separation
  }

  /// Pitch along x of the mirrored rows (j > 0).
  pub fn offset_pitch(&self) -> f64 {
    self.diameter + 2.0 * self.near_separation
  }
}

/// One accepted position in the packing grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatticeSite {
  pub i: u32,
  pub j: u32,
  /// (x, |y|) offset of the site; sites with j > 0 are used at +y and -y.
  pub offset: [f64; 2],
}

impl LatticeSite {
  pub fn copies(&self) -> usize {
    if self.j == 0 {
      1
    } else {
      2
    }
  }
}

/// Corner-cutting rule that turns the rectangular (i, j) scan into a hexagonal footprint.
///
/// Reproduced literally: the two inequalities are the two cut edges.
pub fn is_excluded(i: u32, j: u32) -> bool {
  (j > 1 && i < 2) || (j > 2 && i < 3)
}

/// Accepted sites in scan order (i outer, j inner).
pub fn accepted_sites(params: &BundleParams) -> Vec<LatticeSite> {
  let pitch = params.pitch();
  let offset_pitch = params.offset_pitch();
  let row_step = params.diameter + params.separation;

  let mut sites = Vec::new();
  for i in 1..=params.row_count {
    for j in 0..=params.col_count {
      if is_excluded(i, j) {
        continue;
      }
      let x = if j == 0 {
        i as f64 * pitch
      } else {
        i as f64 * offset_pitch - j as f64 * (offset_pitch / 2.0)
      };
      let y = j as f64 * row_step;
      sites.push(LatticeSite { i, j, offset: [x, y] });
    }
  }
  sites
}

/// Number of tube copies a bundle will hold, the seed included.
pub fn tube_count(params: &BundleParams) -> usize {
  copy_count(&accepted_sites(params)) + 1
}

fn copy_count(sites: &[LatticeSite]) -> usize {
  sites.iter().map(LatticeSite::copies).sum()
}

/// Packs copies of `seed` onto a hexagonal grid and centers the result.
///
/// The seed itself is the (0, 0) instance. Overlapping copies are neither
/// detected nor merged: spacings that are too small give interpenetrating tubes.
/// `row_count == 0` returns the centered seed.
pub fn pack_hexagonal_bundle(seed: &Structure, params: &BundleParams) -> Result<Structure> {
  seed.validate()?;

  let mut rotated = seed.clone();
  rotated.rotate(Axis::Z, COPY_ROTATION_DEG, RotationCenter::CenterOfPositions)?;

  let sites = accepted_sites(params);
  let copies = copy_count(&sites);
  let mut bundle = seed.clone();
  bundle.atoms.reserve(seed.len() * copies);

  for site in &sites {
    let [x, y] = site.offset;
    if site.j == 0 {
      let mut copy = rotated.clone();
      copy.translate([x, 0.0, 0.0]);
      bundle.extend(&copy);
    } else {
      for sy in [y, -y] {
        let mut copy = rotated.clone();
        copy.translate([x, sy, 0.0]);
        bundle.extend(&copy);
      }
    }
  }

  bundle.center();
  bundle.title = format!("hexagonal bundle of {} tubes", copies + 1);

  log::debug!(
    "bundle: {} sites accepted from a {}x{} scan, {} atoms",
    sites.len(),
    params.row_count,
    params.col_count + 1,
    bundle.len()
  );
  Ok(bundle)
}
