use super::ctx::FrameCtx;
use crate::device::Gpu;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by the runtime.
///
/// Call order: `setup` once after the GPU context exists, then per poll
/// cycle any number of `on_framebuffer_resize` calls followed by at most one
/// `on_frame`.
pub trait App {
    /// One-shot GPU resource setup.
    ///
    /// An error here is fatal: the runtime stops and reports it.
    fn setup(&mut self, gpu: &Gpu<'_>) -> anyhow::Result<()>;

    /// Framebuffer size changed.
    ///
    /// Invoked synchronously from the event pump, after the surface has been
    /// reconfigured and before the next frame. Must only update state.
    fn on_framebuffer_resize(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// Called once per loop iteration while the loop is running.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
