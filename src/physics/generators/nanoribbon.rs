// src/physics/generators/nanoribbon.rs
//
// Graphene nanoribbons in the xz plane (y = 0), periodic along z.

use serde::{Deserialize, Serialize};

use crate::error::{BuildError, Result};
use crate::model::{Atom, Structure};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
  Zigzag,
  Armchair,
}

#[derive(Clone, Debug)]
pub struct RibbonParams {
  /// Width in unit columns.
  pub n: u32,
  /// Repeats of the unit along z.
  pub m: u32,
  pub kind: EdgeKind,
  /// Terminate both edges with `saturate_element`.
  pub saturated: bool,
  pub c_c: f64,
  pub c_h: f64,
  pub vacuum: Option<f64>,
  /// Make the ribbon periodic along x as well (an infinite sheet).
  pub sheet: bool,
  pub main_element: String,
  pub saturate_element: String,
}

impl Default for RibbonParams {
  fn default() -> Self {
    Self {
      n: 3,
      m: 6,
      kind: EdgeKind::Zigzag,
      saturated: false,
      c_c: 1.42,
      c_h: 1.09,
      vacuum: None,
      sheet: false,
      main_element: "C".to_string(),
      saturate_element: "H".to_string(),
    }
  }
}

fn unit(element: &str, positions: &[[f64; 3]], period: f64) -> Structure {
  Structure::new(
    [[0.0; 3], [0.0; 3], [0.0, 0.0, period]],
    positions.iter().map(|&p| Atom::new(element, p)).collect(),
    [false, false, true],
  )
}

pub fn graphene_nanoribbon(params: &RibbonParams) -> Result<Structure> {
  if params.n == 0 || params.m == 0 {
    return Err(BuildError::invalid(
      "n, m",
      format!("ribbon extent must be at least 1x1, got {}x{}", params.n, params.m),
    ));
  }
  if !(params.c_c > 0.0) || !(params.c_h > 0.0) {
    return Err(BuildError::invalid("c_c, c_h", "bond lengths must be positive"));
  }

  let (n, m) = (params.n, params.m);
  let c_c = params.c_c;
  let c_h = params.c_h;
  let b = 3f64.sqrt() * c_c / 4.0;
  let el = params.main_element.as_str();
  let h = params.saturate_element.as_str();

  let mut ribbon = Structure::default();

  let (period, width) = match params.kind {
    EdgeKind::Zigzag => {
      let zz = unit(el, &[[0.0, 0.0, 0.0], [c_c / 2.0, 0.0, b * 2.0]], b * 4.0);
      for i in 0..n {
        let mut layer = zz.repeat(1, 1, m);
        layer.translate([1.5 * c_c * i as f64, 0.0, 0.0]);
        if i % 2 == 1 {
          layer.translate([0.0, 0.0, 2.0 * b]);
          if let Some(last) = layer.atoms.last_mut() {
            last.position[2] -= b * 4.0 * m as f64;
          }
        }
        ribbon.extend(&layer);
      }

      if params.saturated {
        let m = m as usize;
        let left: Vec<usize> = (0..m).map(|k| 2 * k).collect();
        let right: Vec<usize> = (0..m).map(|k| (n as usize - 1) * m * 2 + 2 * k + 1).collect();
        let mut caps = Vec::with_capacity(2 * m);
        for &i in &left {
          let p = ribbon.atoms[i].position;
          caps.push(Atom::new(h, [p[0] - c_h, p[1], p[2]]));
        }
        for &i in &right {
          let p = ribbon.atoms[i].position;
          caps.push(Atom::new(h, [p[0] + c_h, p[1], p[2]]));
        }
        ribbon.atoms.extend(caps);
      }
      (b * 4.0 * m as f64, 1.5 * c_c * n as f64)
    }
    EdgeKind::Armchair => {
      let arm = unit(
        el,
        &[
          [0.0, 0.0, 0.0],
          [b * 2.0, 0.0, c_c / 2.0],
          [b * 2.0, 0.0, 1.5 * c_c],
          [0.0, 0.0, 2.0 * c_c],
        ],
        3.0 * c_c,
      );
      for i in 0..n {
        let mut layer = arm.repeat(1, 1, m);
        layer.translate([-4.0 * b * i as f64, 0.0, 0.0]);
        ribbon.extend(&layer);
      }

      if params.saturated {
        let dx = 3f64.sqrt() / 2.0 * c_h;
        let mut right = unit(
          h,
          &[[-dx, 0.0, c_h * 0.5], [-dx, 0.0, 2.0 * c_c - c_h * 0.5]],
          3.0 * c_c,
        );
        right.translate([-4.0 * b * (n - 1) as f64, 0.0, 0.0]);
        let left = unit(
          h,
          &[
            [b * 2.0 + dx, 0.0, c_c / 2.0 - c_h * 0.5],
            [b * 2.0 + dx, 0.0, 1.5 * c_c + c_h * 0.5],
          ],
          3.0 * c_c,
        );
        ribbon.extend(&right.repeat(1, 1, m));
        ribbon.extend(&left.repeat(1, 1, m));
      }
      (3.0 * c_c * m as f64, 4.0 * b * n as f64)
    }
  };

  ribbon.lattice = [[0.0; 3], [0.0; 3], [0.0, 0.0, period]];
  if params.sheet {
    ribbon.lattice[0] = [width, 0.0, 0.0];
  }
  ribbon.pbc = [params.sheet, false, true];
  ribbon.title = format!(
    "{:?} graphene nanoribbon {}x{}{}",
    params.kind,
    n,
    m,
    if params.saturated { " (saturated)" } else { "" }
  );

  if let Some(vacuum) = params.vacuum {
    let axes: &[usize] = if params.sheet { &[1] } else { &[0, 1] };
    ribbon.center_with_vacuum(vacuum, axes)?;
  }

  log::debug!("{}: {} atoms, {}", ribbon.title, ribbon.len(), ribbon.formula());
  Ok(ribbon)
}
