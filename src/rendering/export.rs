use cairo::{Context, Format, ImageSurface, PdfSurface, SvgSurface};
use rayon::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use super::painter;
use super::scene::{calculate_scene, RenderOptions, Scene};
use crate::error::{BuildError, Result};
use crate::model::Structure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
    Pdf,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "png" => Some(ImageFormat::Png),
            "svg" => Some(ImageFormat::Svg),
            "pdf" => Some(ImageFormat::Pdf),
            _ => None,
        }
    }
}

fn paint(cr: &Context, scene: &Scene, options: &RenderOptions) -> Result<()> {
    painter::draw_background(cr, &options.style)?;
    if let Some(corners) = &scene.cell_corners {
        painter::draw_unit_cell(cr, corners)?;
    }
    painter::draw_structure(cr, scene, &options.style)
}

// --- File Export Entry Point ---
pub fn export_image(structure: &Structure, path: &Path, options: &RenderOptions) -> Result<()> {
    let format = ImageFormat::from_path(path)
        .ok_or_else(|| BuildError::UnsupportedFormat(path.display().to_string()))?;
    let scene = calculate_scene(structure, options);

    match format {
        ImageFormat::Png => {
            let surface = ImageSurface::create(Format::ARgb32, scene.width as i32, scene.height as i32)?;
            let cr = Context::new(&surface)?;
            paint(&cr, &scene, options)?;
            drop(cr);
            let mut file = File::create(path)?;
            surface.write_to_png(&mut file)?;
        }
        ImageFormat::Svg => {
            let surface = SvgSurface::new(scene.width, scene.height, Some(path))?;
            let cr = Context::new(&surface)?;
            paint(&cr, &scene, options)?;
            surface.finish();
        }
        ImageFormat::Pdf => {
            let surface = PdfSurface::new(scene.width, scene.height, path)?;
            let cr = Context::new(&surface)?;
            paint(&cr, &scene, options)?;
            surface.finish();
        }
    }

    log::debug!(
        "Rendered {} atoms to {} ({}x{} px)",
        structure.len(),
        path.display(),
        scene.width,
        scene.height
    );
    Ok(())
}

/// Renders every structure to `<dir>/<prefix>_NNNN.png` in parallel and returns the paths in order.
pub fn export_frames(
    structures: &[Structure],
    dir: &Path,
    prefix: &str,
    options: &RenderOptions,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let paths: Vec<PathBuf> = (0..structures.len())
        .map(|i| dir.join(format!("{prefix}_{i:04}.png")))
        .collect();

    structures
        .par_iter()
        .zip(paths.par_iter())
        .try_for_each(|(s, p)| export_image(s, p, options))?;

    log::info!("Rendered {} frames into {}", paths.len(), dir.display());
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::generators::nanotube::{nanotube, TubeParams};

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_path(Path::new("a/b.PNG")), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_path(Path::new("b.svg")), Some(ImageFormat::Svg));
        assert_eq!(ImageFormat::from_path(Path::new("b.xyz")), None);
    }

    #[test]
    fn test_png_export_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tube.png");
        let tube = nanotube(&TubeParams::carbon(5, 5, 2)).unwrap();
        export_image(&tube, &path, &RenderOptions::default()).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn test_frames_are_numbered_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let tube = nanotube(&TubeParams::carbon(4, 4, 1)).unwrap();
        let frames = vec![tube.clone(), tube.clone(), tube];
        let paths = export_frames(&frames, dir.path(), "f", &RenderOptions::default()).unwrap();
        assert_eq!(paths.len(), 3);
        assert!(paths[2].ends_with("f_0002.png"));
        assert!(paths.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_frames_create_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("sweep").join("frames");
        let tube = nanotube(&TubeParams::carbon(4, 4, 1)).unwrap();
        let paths = export_frames(&[tube], &nested, "scan", &RenderOptions::default()).unwrap();
        assert_eq!(paths, vec![nested.join("scan_0000.png")]);
        assert!(paths[0].exists());
    }

    #[test]
    fn test_unknown_image_format() {
        let tube = nanotube(&TubeParams::carbon(4, 4, 1)).unwrap();
        let err = export_image(&tube, Path::new("tube.bmp"), &RenderOptions::default());
        assert!(matches!(err, Err(BuildError::UnsupportedFormat(_))));
    }
}
