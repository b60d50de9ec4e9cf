// src/rendering/scene.rs

use nalgebra::Vector3;

use super::camera::Camera;
use crate::config::{Config, RenderStyle};
use crate::error::Result;
use crate::model::elements::covalent_radius;
use crate::model::{get_atom_properties, Structure};

/// Everything needed to turn a structure into an image.
#[derive(Clone, Debug)]
pub struct RenderOptions {
  pub camera: Camera,
  pub show_unit_cell: bool,
  pub pixels_per_angstrom: f64,
  pub style: RenderStyle,
}

impl RenderOptions {
  pub fn from_config(config: &Config) -> Result<Self> {
    Ok(Self {
      camera: Camera::parse(&config.camera)?,
      show_unit_cell: config.show_unit_cell,
      pixels_per_angstrom: config.pixels_per_angstrom,
      style: config.style.clone(),
    })
  }
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self {
      camera: Camera::default(),
      show_unit_cell: true,
      pixels_per_angstrom: 40.0,
      style: RenderStyle::default(),
    }
  }
}

pub struct RenderAtom {
  /// x, y in pixels, z = depth (larger is closer to the viewer)
  pub screen_pos: [f64; 3],
  /// Rotated position in Angstrom, used for bond detection.
  pub world_pos: [f64; 3],
  pub element: String,
  pub radius_px: f64,
  pub color: (f64, f64, f64),
}

pub struct Scene {
  /// Sorted far to near for the painter's algorithm.
  pub atoms: Vec<RenderAtom>,
  /// Eight projected cell corners, indexed by (x << 2 | y << 1 | z), when the cell is drawn.
  pub cell_corners: Option<Vec<[f64; 2]>>,
  pub scale: f64,
  pub width: f64,
  pub height: f64,
}

/// Rotates the structure about its center of positions with the camera and
/// maps it to pixel coordinates (y pointing up on screen).
pub fn calculate_scene(structure: &Structure, options: &RenderOptions) -> Scene {
  let scale = options.pixels_per_angstrom;
  let rot = options.camera.rotation();
  let center = Vector3::from(structure.center_of_positions());
  let rotate = |p: [f64; 3]| -> [f64; 3] {
    let r = rot * (Vector3::from(p) - center);
    [r.x, r.y, r.z]
  };

  let mut min_x = f64::MAX;
  let mut max_x = f64::MIN;
  let mut min_y = f64::MAX;
  let mut max_y = f64::MIN;
  let mut grow = |p: [f64; 3], pad: f64| {
    min_x = min_x.min(p[0] - pad);
    max_x = max_x.max(p[0] + pad);
    min_y = min_y.min(p[1] - pad);
    max_y = max_y.max(p[1] + pad);
  };

  // --- 1. Lattice Corners ---
  let lattice = structure.lattice;
  let degenerate = structure.cell_lengths().iter().any(|&l| l < 1e-12);
  let rotated_corners: Option<Vec<[f64; 3]>> = (options.show_unit_cell && !degenerate).then(|| {
    let mut corners = Vec::with_capacity(8);
    for x in 0..=1 {
      for y in 0..=1 {
        for z in 0..=1 {
          let (fx, fy, fz) = (x as f64, y as f64, z as f64);
          let cx = fx * lattice[0][0] + fy * lattice[1][0] + fz * lattice[2][0];
          let cy = fx * lattice[0][1] + fy * lattice[1][1] + fz * lattice[2][1];
          let cz = fx * lattice[0][2] + fy * lattice[1][2] + fz * lattice[2][2];
          corners.push(rotate([cx, cy, cz]));
        }
      }
    }
    corners
  });
  if let Some(corners) = &rotated_corners {
    for &c in corners {
      grow(c, 0.0);
    }
  }

  // --- 2. Atoms ---
  let mut atoms: Vec<RenderAtom> = structure
    .atoms
    .iter()
    .map(|atom| {
      let world = rotate(atom.position);
      let (radius, default_rgb) = get_atom_properties(&atom.element);
      let r = radius * options.style.atom_scale;
      grow(world, r);
      RenderAtom {
        screen_pos: world,
        world_pos: world,
        element: atom.element.clone(),
        radius_px: r * scale,
        color: options
          .style
          .element_colors
          .get(&atom.element)
          .copied()
          .unwrap_or(default_rgb),
      }
    })
    .collect();

  if min_x > max_x {
    // nothing to draw
    min_x = 0.0;
    max_x = 0.0;
    min_y = 0.0;
    max_y = 0.0;
  }

  // --- 3. Screen Transform (World -> Pixel) ---
  let margin = 0.5 * scale;
  let width = (max_x - min_x) * scale + 2.0 * margin;
  let height = (max_y - min_y) * scale + 2.0 * margin;
  let to_screen = |p: [f64; 3]| -> [f64; 2] { [(p[0] - min_x) * scale + margin, (max_y - p[1]) * scale + margin] };

  for atom in &mut atoms {
    let [sx, sy] = to_screen(atom.world_pos);
    atom.screen_pos = [sx, sy, atom.world_pos[2]];
  }

  // Sort by Depth (Z) for Painter's Algorithm
  atoms.sort_by(|a, b| a.screen_pos[2].total_cmp(&b.screen_pos[2]));

  Scene {
    atoms,
    cell_corners: rotated_corners.map(|c| c.into_iter().map(to_screen).collect()),
    scale,
    width: width.ceil().max(1.0),
    height: height.ceil().max(1.0),
  }
}

/// Bond length cutoff for a pair of elements.
pub fn bond_cutoff(a: &str, b: &str, tolerance: f64) -> f64 {
  (covalent_radius(a) + covalent_radius(b)) * tolerance
}
