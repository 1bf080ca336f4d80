//! 2D rendering module
//!
//! The scene is painted through the [`DrawSurface`] trait. In the browser
//! that is a canvas 2D context; elsewhere draw calls are recorded.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;
pub mod scene;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};
pub use scene::render;
pub use surface::{DrawSurface, Paint, RadialGradient, Rgba, Stroke};
