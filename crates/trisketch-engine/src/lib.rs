//! trisketch engine crate.
//!
//! The platform + GPU pieces behind the `demo01` triangle program: window
//! and event pump, device loading, shader compile/link, vertex upload, and
//! the frame loop.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
