//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the GPU layer
//! and the application.

mod error;
mod runtime;

pub use error::FatalError;
pub use runtime::{Runtime, RuntimeConfig};
