pub mod bundle;
pub mod relabel;
pub mod scan;
pub mod wave;

pub use bundle::{accepted_sites, is_excluded, pack_hexagonal_bundle, BundleParams, LatticeSite};
pub use relabel::{alternating, boron_nitride, relabel};
pub use scan::{concentric_pair, rotation_scan, ScanFrame};
pub use wave::{wave, wave_frames, WaveParams};
