//! nanoview command-line interface.
//!
//! ```sh
//! nanoview tube --n 10 --m 0 -o tube.xyz
//! nanoview bundle --n 10 --m 0 --rows 6 --cols 3 --repeat 4 -o bundle.png
//! nanoview wave --width 4 --length 12 --out-dir frames --gif wave.gif
//! nanoview scan --bn --out-dir scan --gif scan.gif
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::{Path, PathBuf};

use nanoview::config::Config;
use nanoview::io::save_structure;
use nanoview::model::Structure;
use nanoview::physics::generators::{graphene_nanoribbon, nanotube, tube_diameter, EdgeKind, RibbonParams, TubeParams};
use nanoview::physics::operations::{boron_nitride, pack_hexagonal_bundle, rotation_scan, wave, wave_frames, BundleParams, WaveParams};
use nanoview::rendering::{assemble_gif, export_frames, export_image, Camera, ImageFormat, RenderOptions};

#[derive(Parser)]
#[command(name = "nanoview")]
#[command(about = "Build and render nanotubes, nanotube bundles and nanoribbons")]
#[command(version)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (defaults to the per-user config location).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Camera rotation for image output, e.g. "-90x,0y,0z".
    #[arg(long, global = true, allow_hyphen_values = true)]
    camera: Option<String>,

    /// Do not draw the unit cell in images.
    #[arg(long, global = true)]
    no_cell: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct TubeArgs {
    /// First chiral index.
    #[arg(long, default_value_t = 10)]
    n: u32,
    /// Second chiral index.
    #[arg(long, default_value_t = 0)]
    m: u32,
    /// Translational units along the axis.
    #[arg(long, default_value_t = 1)]
    length: u32,
    /// Bond length in Angstrom.
    #[arg(long, default_value_t = 1.42)]
    bond: f64,
    /// Element of the tube wall.
    #[arg(long, default_value = "C")]
    symbol: String,
    /// Alternate B and N on the two sublattices.
    #[arg(long)]
    bn: bool,
}

impl TubeArgs {
    fn build(&self) -> Result<Structure> {
        let params = TubeParams {
            n: self.n,
            m: self.m,
            length: self.length,
            bond: self.bond,
            symbol: self.symbol.clone(),
            vacuum: None,
        };
        let tube = nanotube(&params)?;
        Ok(if self.bn { boron_nitride(&tube) } else { tube })
    }
}

#[derive(Args, Clone)]
struct RibbonArgs {
    /// Width in unit columns.
    #[arg(long, default_value_t = 3)]
    width: u32,
    /// Unit repeats along the ribbon axis.
    #[arg(long, default_value_t = 6)]
    length: u32,
    /// Armchair edges instead of zigzag.
    #[arg(long)]
    armchair: bool,
    /// Hydrogen-terminate both edges.
    #[arg(long)]
    saturated: bool,
    /// Periodic along the width as well.
    #[arg(long)]
    sheet: bool,
    /// Vacuum padding in Angstrom.
    #[arg(long)]
    vacuum: Option<f64>,
}

impl RibbonArgs {
    fn build(&self) -> Result<Structure> {
        let params = RibbonParams {
            n: self.width,
            m: self.length,
            kind: if self.armchair { EdgeKind::Armchair } else { EdgeKind::Zigzag },
            saturated: self.saturated,
            sheet: self.sheet,
            vacuum: self.vacuum,
            ..Default::default()
        };
        Ok(graphene_nanoribbon(&params)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build a single (n, m) nanotube.
    Tube {
        #[command(flatten)]
        tube: TubeArgs,
        /// Vacuum padding around the tube in Angstrom.
        #[arg(long)]
        vacuum: Option<f64>,
        /// Output file (.xyz, .vasp, POSCAR, .png, .svg, .pdf).
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Pack copies of a tube into a hexagonal bundle.
    Bundle {
        #[command(flatten)]
        tube: TubeArgs,
        /// Wall-to-wall gap for ideal hexagonal packing.
        #[arg(long, default_value_t = 3.4)]
        gap: f64,
        /// Row-to-row separation (overrides the value derived from --gap).
        #[arg(long)]
        separation: Option<f64>,
        /// Same-row separation (overrides --gap).
        #[arg(long)]
        near_separation: Option<f64>,
        #[arg(long, default_value_t = 6)]
        rows: u32,
        #[arg(long, default_value_t = 3)]
        cols: u32,
        /// Repeat the bundle along the tube axis.
        #[arg(long, default_value_t = 1)]
        repeat: u32,
        #[arg(long, default_value_t = 5.0)]
        vacuum: f64,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Build a graphene nanoribbon.
    Ribbon {
        #[command(flatten)]
        ribbon: RibbonArgs,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Sinusoidal wave on a nanoribbon, one frame per phase step.
    Wave {
        #[command(flatten)]
        ribbon: RibbonArgs,
        #[arg(long, default_value_t = 1.0)]
        amplitude: f64,
        /// Wavelengths per cell length.
        #[arg(long, default_value_t = 1.0)]
        periods: f64,
        #[arg(long, default_value_t = 20)]
        frames: usize,
        /// Write a single deformed structure instead of frames.
        #[arg(short, long, conflicts_with = "out_dir")]
        output: Option<PathBuf>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Assemble the frames into this GIF.
        #[arg(long, requires = "out_dir")]
        gif: Option<PathBuf>,
    },
    /// Rotate an inner tube inside an outer tube and render each step.
    Scan {
        #[arg(long, default_value_t = 5)]
        inner_n: u32,
        #[arg(long, default_value_t = 5)]
        inner_m: u32,
        #[arg(long, default_value_t = 10)]
        outer_n: u32,
        #[arg(long, default_value_t = 10)]
        outer_m: u32,
        #[arg(long, default_value_t = 2)]
        length: u32,
        /// Boron-nitride walls.
        #[arg(long)]
        bn: bool,
        #[arg(long, default_value_t = 5.0)]
        step: f64,
        #[arg(long, default_value_t = 60.0)]
        stop: f64,
        #[arg(long)]
        out_dir: PathBuf,
        #[arg(long)]
        gif: Option<PathBuf>,
    },
}

fn write_output(structure: &Structure, path: &Path, options: &RenderOptions) -> Result<()> {
    if ImageFormat::from_path(path).is_some() {
        export_image(structure, path, options).with_context(|| format!("rendering {}", path.display()))?;
        log::info!("Rendered {} to {}", structure.formula(), path.display());
    } else {
        let p = path.to_str().context("output path is not valid UTF-8")?;
        save_structure(p, structure).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path).with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load(),
    };
    if let Some(camera) = &cli.camera {
        config.camera = camera.clone();
    }
    if cli.no_cell {
        config.show_unit_cell = false;
    }
    let options = RenderOptions::from_config(&config)?;

    match cli.command {
        Commands::Tube { tube, vacuum, output } => {
            let mut s = tube.build()?;
            if let Some(v) = vacuum {
                s.center_with_vacuum(v, &[0, 1])?;
            }
            write_output(&s, &output, &options)
        }
        Commands::Bundle { tube, gap, separation, near_separation, rows, cols, repeat, vacuum, output } => {
            let seed = tube.build()?;
            let d = tube_diameter(tube.n, tube.m, tube.bond);
            let mut params = BundleParams::hexagonal(d, gap, rows, cols);
            if let Some(s) = separation {
                params.separation = s;
            }
            if let Some(s2) = near_separation {
                params.near_separation = s2;
            }
            log::info!(
                "Packing ({},{}) tubes, d = {:.3} A, s = {:.3} A, s2 = {:.3} A",
                tube.n,
                tube.m,
                params.diameter,
                params.separation,
                params.near_separation
            );
            let mut bundle = pack_hexagonal_bundle(&seed, &params)?.repeat(1, 1, repeat.max(1));
            bundle.center_with_vacuum(vacuum, &[0, 1])?;
            write_output(&bundle, &output, &options)
        }
        Commands::Ribbon { ribbon, output } => write_output(&ribbon.build()?, &output, &options),
        Commands::Wave { ribbon, amplitude, periods, frames, output, out_dir, gif } => {
            let base = ribbon.build()?;
            let params = WaveParams { amplitude, periods, ..Default::default() };
            if let Some(path) = output {
                return write_output(&wave(&base, &params)?, &path, &options);
            }
            let dir = out_dir.context("either --output or --out-dir is required")?;
            let structures = wave_frames(&base, &params, frames)?;
            let paths = export_frames(&structures, &dir, "wave", &options)?;
            if let Some(gif) = gif {
                assemble_gif(&paths, &gif, &config.animation)?;
            }
            Ok(())
        }
        Commands::Scan { inner_n, inner_m, outer_n, outer_m, length, bn, step, stop, out_dir, gif } => {
            let make = |n, m| -> Result<Structure> {
                let tube = nanotube(&TubeParams::carbon(n, m, length))?;
                Ok(if bn { boron_nitride(&tube) } else { tube })
            };
            let inner = make(inner_n, inner_m)?;
            let outer = make(outer_n, outer_m)?;
            let frames = rotation_scan(&inner, &outer, 0.0, stop, step)?;
            let structures: Vec<Structure> = frames.into_iter().map(|f| f.structure).collect();

            // Looking down the tube axis shows the relative rotation best.
            let scan_options = if cli.camera.is_some() {
                options
            } else {
                RenderOptions { camera: Camera::default(), show_unit_cell: false, ..options }
            };
            let paths = export_frames(&structures, &out_dir, "scan", &scan_options)?;
            if let Some(gif) = gif {
                assemble_gif(&paths, &gif, &config.animation)?;
            }
            Ok(())
        }
    }
}
