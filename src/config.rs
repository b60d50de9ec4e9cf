// src/config.rs

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};

// --- RenderStyle ---

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
  /// Sphere radius as a fraction of the covalent radius.
  pub atom_scale: f64,
  /// Bond cylinder radius (Angstrom).
  pub bond_radius: f64,
  pub bond_color: (f64, f64, f64),
  /// None renders a transparent background (PNG only).
  pub background_color: Option<(f64, f64, f64)>,
  /// Two atoms are bonded below (r_cov1 + r_cov2) * tolerance.
  pub bond_tolerance: f64,
  pub show_bonds: bool,
  pub element_colors: HashMap<String, (f64, f64, f64)>,
}

impl Default for RenderStyle {
  fn default() -> Self {
    Self {
      atom_scale: 0.4,
      bond_radius: 0.12,
      bond_color: (0.5, 0.5, 0.5),
      background_color: Some((1.0, 1.0, 1.0)),
      bond_tolerance: 1.15,
      show_bonds: true,
      element_colors: HashMap::new(),
    }
  }
}

// --- Animation ---

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
  /// External image tool, invoked as `<command> -delay <delay> -loop 0 frames... out.gif`.
  pub command: String,
  /// Frame delay in hundredths of a second.
  pub delay: u32,
  pub loop_forever: bool,
}

impl Default for AnimationConfig {
  fn default() -> Self {
    Self {
      command: "convert".to_string(),
      delay: 10,
      loop_forever: true,
    }
  }
}

// --- Main Config Struct ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
  /// Camera rotation, e.g. "-90x,0y,0z".
  #[serde(default)]
  pub camera: String,

  #[serde(default = "default_true")]
  pub show_unit_cell: bool,

  /// Image resolution in pixels per Angstrom.
  #[serde(default = "default_pixels")]
  pub pixels_per_angstrom: f64,

  #[serde(default)]
  pub style: RenderStyle,

  #[serde(default)]
  pub animation: AnimationConfig,
}

fn default_true() -> bool {
  true
}

fn default_pixels() -> f64 {
  40.0
}

impl Default for Config {
  fn default() -> Self {
    Self {
      camera: String::new(),
      show_unit_cell: true,
      pixels_per_angstrom: default_pixels(),
      style: RenderStyle::default(),
      animation: AnimationConfig::default(),
    }
  }
}

impl Config {
  /// Loads config from standard OS location (e.g., ~/.config/nanoview/settings.json).
  /// Falls back to defaults when the file is missing or unreadable.
  pub fn load() -> Self {
    let path = Self::get_path();
    if !path.exists() {
      log::debug!("No config found at {:?}. Using defaults.", path);
      return Self::default();
    }
    match Self::load_from(&path) {
      Ok(cfg) => {
        log::info!("Config loaded from {:?}", path);
        cfg
      }
      Err(e) => {
        log::warn!("Error reading config {:?}: {}. Using defaults.", path, e);
        Self::default()
      }
    }
  }

  pub fn load_from(path: &Path) -> Result<Self> {
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(|e| BuildError::Parse {
      line: e.line(),
      reason: e.to_string(),
    })
  }

  /// Saves config to standard OS location.
  pub fn save(&self) -> Result<PathBuf> {
    let path = Self::get_path();
    self.save_to(&path)?;
    log::info!("Config saved to {:?}", path);
    Ok(path)
  }

  pub fn save_to(&self, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, self).map_err(|e| BuildError::Io(e.into()))
  }

  fn get_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "nanoview", "nanoview") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_partial_json_fills_defaults() {
    let cfg: Config = serde_json::from_str(r#"{ "camera": "-90x", "style": { "atom_scale": 0.6 } }"#).unwrap();
    assert_eq!(cfg.camera, "-90x");
    assert!(cfg.show_unit_cell);
    assert_eq!(cfg.style.atom_scale, 0.6);
    assert_eq!(cfg.style.bond_radius, 0.12);
    assert_eq!(cfg.animation.command, "convert");
  }

  #[test]
  fn test_roundtrip_through_json() {
    let mut cfg = Config::default();
    cfg.style.element_colors.insert("B".into(), (1.0, 0.5, 0.5));
    let text = serde_json::to_string(&cfg).unwrap();
    let back: Config = serde_json::from_str(&text).unwrap();
    assert_eq!(back, cfg);
  }
}
