use winit::window::Window;

use crate::device::Gpu;
use crate::input::InputState;
use crate::render::{DrawBindings, GpuSink};

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
    pub frame_index: u64,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Returns a sink that renders into this window's surface.
    pub fn sink<'s>(&'s mut self, bindings: DrawBindings<'s>) -> GpuSink<'s, 'w> {
        GpuSink::new(self.gpu, self.window, bindings)
    }
}
