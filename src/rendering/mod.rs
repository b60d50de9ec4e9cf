pub mod animation;
pub mod camera;
pub mod export;
pub mod painter;
pub mod primitives;
pub mod scene;

// Re-export specific functions to keep the API clean for the rest of the app
pub use animation::assemble_gif;
pub use camera::Camera;
pub use export::{export_frames, export_image, ImageFormat};
pub use scene::RenderOptions;
