use thiserror::Error;
use winit::error::{EventLoopError, OsError};

use crate::device::LoaderError;

/// Failures that end the program.
///
/// Everything here is reported once and turns into a non-zero exit status.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("failed to initialize the windowing library")]
    ContextInit(#[source] EventLoopError),

    #[error("failed to start the window")]
    WindowCreation(#[source] OsError),

    #[error("failed to load graphics entry points")]
    Loader(#[from] LoaderError),

    #[error("application setup failed: {0:#}")]
    AppSetup(anyhow::Error),

    #[error("event loop terminated with error")]
    EventLoop(#[source] EventLoopError),
}
