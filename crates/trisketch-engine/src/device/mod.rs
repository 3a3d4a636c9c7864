//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue ("loading" the driver)
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and presenting them

mod error;
mod frame;
mod gpu;
mod headless;
mod init;
mod surface;

pub use error::{LoaderError, SurfaceErrorAction};
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use headless::HeadlessGpu;
pub use init::{GpuInit, GraphicsProfile};
pub use surface::choose_surface_format;
