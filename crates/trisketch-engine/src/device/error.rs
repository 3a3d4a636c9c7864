use thiserror::Error;

/// Failure to acquire the graphics entry points for a window.
///
/// All variants are fatal for the program.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("window has zero size")]
    ZeroSize,

    #[error("failed to create wgpu surface")]
    Surface(#[source] wgpu::CreateSurfaceError),

    #[error("failed to find a suitable GPU adapter")]
    Adapter(#[source] wgpu::RequestAdapterError),

    #[error("failed to create wgpu device/queue")]
    Device(#[source] wgpu::RequestDeviceError),

    #[error("no supported surface formats")]
    NoSurfaceFormat,
}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}
