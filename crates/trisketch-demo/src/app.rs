use anyhow::Context;

use trisketch_engine::coords::{ColorRgba, Viewport};
use trisketch_engine::core::{App, AppControl, FrameCtx};
use trisketch_engine::device::Gpu;
use trisketch_engine::render::{
    build_triangle_program, DrawBindings, DrawCall, FramePlan, FrameSink, SubmitOutcome,
    TrianglePipeline, Vertex, VertexBuffer, TRIANGLE_VERTICES,
};

/// Greenish-blue background.
pub const CLEAR_COLOR: ColorRgba = ColorRgba::new(0.2, 0.3, 0.3, 1.0);

/// GPU-independent part of the program: what each frame looks like.
#[derive(Debug, Clone)]
pub struct TriangleScene {
    viewport: Viewport,
    clear: ColorRgba,
    vertex_count: u32,
}

impl TriangleScene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::full(width, height),
            clear: CLEAR_COLOR,
            vertex_count: TRIANGLE_VERTICES.len() as u32,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn on_framebuffer_resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::full(width, height);
    }

    pub fn frame_plan(&self) -> FramePlan {
        FramePlan {
            viewport: self.viewport,
            clear: self.clear,
            draw: Some(DrawCall::triangles(self.vertex_count)),
        }
    }

    /// Clears, draws the triangle once, presents.
    pub fn render<S: FrameSink>(&self, sink: &mut S) -> AppControl {
        match sink.submit(&self.frame_plan()) {
            SubmitOutcome::Fatal => AppControl::Exit,
            SubmitOutcome::Presented | SubmitOutcome::Skipped => AppControl::Continue,
        }
    }
}

struct SceneResources {
    vertices: VertexBuffer,
    /// `None` when the shaders failed to compile or link.
    pipeline: Option<TrianglePipeline>,
}

/// The `Demo01` program.
pub struct TriangleApp {
    scene: TriangleScene,
    resources: Option<SceneResources>,
}

impl TriangleApp {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            scene: TriangleScene::new(width, height),
            resources: None,
        }
    }

    #[cfg(test)]
    pub fn scene(&self) -> &TriangleScene {
        &self.scene
    }
}

impl App for TriangleApp {
    fn setup(&mut self, gpu: &Gpu<'_>) -> anyhow::Result<()> {
        // The window manager may not honor the requested size.
        let size = gpu.size();
        self.scene.on_framebuffer_resize(size.width, size.height);

        let vertices = VertexBuffer::upload(gpu.device(), &TRIANGLE_VERTICES);

        if cfg!(debug_assertions) {
            let same = vertices
                .verify_contents(gpu.device(), gpu.queue(), &TRIANGLE_VERTICES)
                .context("failed to read back the vertex buffer")?;
            anyhow::ensure!(same, "vertex buffer contents differ from the uploaded data");
        }

        let program = build_triangle_program().and_then(|program| {
            program.check_vertex_layout(&Vertex::layout())?;
            Ok(program)
        });

        let pipeline = match program {
            Ok(program) => Some(TrianglePipeline::new(
                gpu.device(),
                gpu.surface_format(),
                &program,
            )),
            Err(err) => {
                log::error!("{err}");
                log::warn!("continuing without a shader program; frames will be blank");
                None
            }
        };

        self.resources = Some(SceneResources { vertices, pipeline });
        log::info!("triangle resources ready (viewport {:?})", self.scene.viewport());
        Ok(())
    }

    fn on_framebuffer_resize(&mut self, width: u32, height: u32) {
        self.scene.on_framebuffer_resize(width, height);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(res) = self.resources.as_ref() else {
            return AppControl::Continue;
        };

        let mut sink = ctx.sink(DrawBindings {
            pipeline: res.pipeline.as_ref(),
            vertices: &res.vertices,
        });
        self.scene.render(&mut sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trisketch_engine::core::{FrameLoop, LoopStep};
    use trisketch_engine::input::{InputEvent, InputState, Key, KeyState};
    use trisketch_engine::render::RecordingSink;

    #[test]
    fn startup_viewport_matches_requested_size() {
        for (w, h) in [(400, 300), (1, 1), (1920, 1080)] {
            let app = TriangleApp::new(w, h);
            assert_eq!(app.scene().viewport(), Viewport::new(0, 0, w, h));
        }
    }

    #[test]
    fn resize_handler_updates_viewport() {
        let mut app = TriangleApp::new(400, 300);
        app.on_framebuffer_resize(800, 600);
        assert_eq!(app.scene().viewport(), Viewport::new(0, 0, 800, 600));

        app.on_framebuffer_resize(0, 0);
        assert!(app.scene().viewport().is_empty());
    }

    #[test]
    fn frame_draws_three_triangle_vertices_over_clear_color() {
        let scene = TriangleScene::new(400, 300);
        let mut sink = RecordingSink::new();

        assert_eq!(scene.render(&mut sink), AppControl::Continue);

        assert_eq!(sink.frames.len(), 1);
        let plan = sink.frames[0];
        assert_eq!(plan.viewport, Viewport::full(400, 300));
        assert_eq!(plan.clear, ColorRgba::new(0.2, 0.3, 0.3, 1.0));

        let draw = plan.draw.unwrap();
        assert_eq!(draw, DrawCall::triangles(3));
        assert_eq!(draw.vertices(), 0..3);
    }

    #[test]
    fn fatal_surface_state_requests_exit() {
        struct Broken;
        impl FrameSink for Broken {
            fn submit(&mut self, _plan: &FramePlan) -> SubmitOutcome {
                SubmitOutcome::Fatal
            }
        }

        assert_eq!(TriangleScene::new(4, 4).render(&mut Broken), AppControl::Exit);
    }

    #[test]
    fn loop_renders_until_one_cycle_after_close_key() {
        let scene = TriangleScene::new(400, 300);
        let mut sink = RecordingSink::new();
        let mut frame_loop = FrameLoop::new(Key::CapsLock);
        let mut input = InputState::default();

        let mut cycles = 0;
        loop {
            if cycles == 3 {
                input.apply_event(&InputEvent::key(Key::CapsLock, KeyState::Pressed));
            }
            match frame_loop.begin_iteration(&input) {
                LoopStep::Exit => break,
                LoopStep::Render { .. } => {
                    scene.render(&mut sink);
                }
            }
            cycles += 1;
            assert!(cycles < 100, "loop never closed");
        }

        // Frames 0..=2 before the key, frame 3 observes it, cycle 4 exits.
        assert_eq!(sink.frames.len(), 4);
        assert_eq!(cycles, 4);
    }
}
