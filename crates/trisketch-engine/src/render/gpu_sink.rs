use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};

use super::encode::{encode_plan, DrawBindings};
use super::frame::{FramePlan, FrameSink, SubmitOutcome};

/// Sink that renders plans into the window surface and presents them.
pub struct GpuSink<'a, 'w> {
    gpu: &'a mut Gpu<'w>,
    window: &'a Window,
    bindings: DrawBindings<'a>,
}

impl<'a, 'w> GpuSink<'a, 'w> {
    pub fn new(gpu: &'a mut Gpu<'w>, window: &'a Window, bindings: DrawBindings<'a>) -> Self {
        Self {
            gpu,
            window,
            bindings,
        }
    }
}

impl FrameSink for GpuSink<'_, '_> {
    fn submit(&mut self, plan: &FramePlan) -> SubmitOutcome {
        let size = self.gpu.size();
        if plan.viewport.is_empty() || size.width == 0 || size.height == 0 {
            return SubmitOutcome::Skipped;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => SubmitOutcome::Fatal,
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        SubmitOutcome::Skipped
                    }
                };
            }
        };

        encode_plan(
            &mut frame.encoder,
            &frame.view,
            (size.width, size.height),
            plan,
            self.bindings,
        );

        self.window.pre_present_notify();
        self.gpu.present(frame);

        SubmitOutcome::Presented
    }
}
