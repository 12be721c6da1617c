pub mod camera;
pub mod color;
pub mod renderer;
pub mod texture;

pub use camera::Camera2D;
pub use color::Color;
pub use renderer::{DrawCommand, DrawParams, Flip, RecordingRenderer, Renderer};
pub use texture::Texture;
