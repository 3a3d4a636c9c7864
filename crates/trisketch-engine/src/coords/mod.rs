//! Coordinate and color types shared by the runtime and renderers.
//!
//! Viewports are in physical framebuffer pixels; vertex positions are in
//! normalized device coordinates (-1..1, +Y up).

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
