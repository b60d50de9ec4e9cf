// src/rendering/camera.rs

use nalgebra::{Rotation3, Unit, Vector3};

use crate::error::{BuildError, Result};
use crate::model::Axis;

/// View orientation as an ordered list of rotations about the Cartesian axes.
///
/// Written as `"-90x,10y,0z"`: each token is an angle in degrees followed by an
/// axis letter, applied left to right to the atom positions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Camera {
  pub steps: Vec<(Axis, f64)>,
}

impl Camera {
  pub fn parse(spec: &str) -> Result<Self> {
    let err = |reason: String| BuildError::Camera {
      spec: spec.to_string(),
      reason,
    };

    let mut steps = Vec::new();
    for token in spec.split(',').map(str::trim).filter(|t| !t.is_empty()) {
      let Some((split, letter)) = token.char_indices().last() else {
        continue;
      };
      let angle = &token[..split];
      let axis = match letter {
        'x' | 'X' => Axis::X,
        'y' | 'Y' => Axis::Y,
        'z' | 'Z' => Axis::Z,
        other => return Err(err(format!("unknown axis `{other}` in `{token}`"))),
      };
      let angle: f64 = angle
        .trim()
        .parse()
        .map_err(|_| err(format!("invalid angle in `{token}`")))?;
      steps.push((axis, angle));
    }
    Ok(Self { steps })
  }

  /// Combined rotation; later steps act after earlier ones.
  pub fn rotation(&self) -> Rotation3<f64> {
    self.steps.iter().fold(Rotation3::identity(), |acc, (axis, angle)| {
      let dir = Unit::new_normalize(Vector3::from(axis.direction()));
      let r = Rotation3::from_axis_angle(&dir, angle.to_radians());
      r * acc
    })
  }
}
