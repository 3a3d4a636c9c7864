use std::error::Error as _;

use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, FrameLoop, LoopState, LoopStep};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::{InputState, Key};

use super::FatalError;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Requested framebuffer size in physical pixels.
    pub size: PhysicalSize<u32>,
    pub resizable: bool,
    /// Key that requests the window to close.
    pub close_key: Key,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Demo01".to_string(),
            size: PhysicalSize::new(400, 300),
            resizable: true,
            close_key: Key::CapsLock,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Creates the window, loads the GPU context, runs `app` until closed.
    ///
    /// Every window and GPU object is dropped before this returns, on the
    /// error paths included.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<(), FatalError>
    where
        A: App,
    {
        let event_loop = EventLoop::new().map_err(FatalError::ContextInit)?;
        // Poll: the loop spins like a game loop; present() paces it to vsync.
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = AppState::new(config, gpu_init, app);
        let result = event_loop.run_app(&mut state);

        let fatal = state.fatal.take();
        drop(state);
        log::debug!("runtime torn down");

        if let Some(err) = fatal {
            return Err(err);
        }
        result.map_err(FatalError::EventLoop)
    }
}

#[self_referencing]
struct WindowEntry {
    input: InputState,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A: App> {
    config: RuntimeConfig,
    gpu_init: GpuInit,

    // Declared before `entry` so app-owned GPU resources drop first.
    app: A,
    entry: Option<WindowEntry>,

    frame_loop: FrameLoop,
    fatal: Option<FatalError>,
}

impl<A: App> AppState<A> {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        let frame_loop = FrameLoop::new(config.close_key);
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            frame_loop,
            fatal: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: FatalError) {
        log::error!("{err}");
        let mut source = err.source();
        while let Some(cause) = source {
            log::error!("  caused by: {cause}");
            source = cause.source();
        }
        self.fatal = Some(err);
        self.frame_loop.request_close();
        event_loop.exit();
    }

    fn create_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<(), FatalError> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_inner_size(self.config.size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .map_err(FatalError::WindowCreation)?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            input: InputState::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()?;

        let (size, adapter) = entry.with_gpu(|gpu| (gpu.size(), gpu.adapter_info().clone()));
        log::info!(
            "window `{}` created ({}x{}) on {} ({:?}), closes on {}",
            self.config.title,
            size.width,
            size.height,
            adapter.name,
            adapter.backend,
            self.config.close_key
        );

        entry
            .with_gpu(|gpu| self.app.setup(gpu))
            .map_err(FatalError::AppSetup)?;

        self.entry = Some(entry);
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let Some(entry) = self.entry.as_mut() else { return };
        entry.with_gpu_mut(|gpu| gpu.resize(size));
        self.app.on_framebuffer_resize(size.width, size.height);
    }

    /// One loop iteration: close check, input, then the app's frame.
    fn iterate(&mut self, event_loop: &ActiveEventLoop) {
        let (app, frame_loop) = (&mut self.app, &mut self.frame_loop);
        let Some(entry) = self.entry.as_mut() else { return };

        let control = entry.with_mut(|fields| match frame_loop.begin_iteration(fields.input) {
            LoopStep::Exit => None,
            LoopStep::Render { frame_index } => {
                let mut ctx = FrameCtx {
                    window: fields.window,
                    gpu: fields.gpu,
                    input: fields.input,
                    frame_index,
                };
                Some(app.on_frame(&mut ctx))
            }
        });

        match control {
            None => event_loop.exit(),
            Some(AppControl::Exit) => self.frame_loop.request_close(),
            Some(AppControl::Continue) => {}
        }
    }
}

impl<A: App> ApplicationHandler for AppState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.fatal.is_some() {
            return;
        }

        if let Err(err) = self.create_entry(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.frame_loop.state() == LoopState::Closing {
            event_loop.exit();
            return;
        }

        // One redraw per poll cycle.
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if self.fatal.is_some() {
            event_loop.exit();
            return;
        }

        if let Some(ev) = translate_window_event(&event) {
            if let Some(entry) = self.entry.as_mut() {
                entry.with_input_mut(|input| input.apply_event(&ev));
            }
        }

        match event {
            WindowEvent::CloseRequested => self.frame_loop.request_close(),

            WindowEvent::Resized(size) => self.resize(size),

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(size) = self.entry.as_ref().map(|e| e.with_window(|w| w.inner_size())) {
                    self.resize(size);
                }
            }

            WindowEvent::RedrawRequested => self.iterate(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::debug!(
            "event loop exiting after {} frames",
            self.frame_loop.frames_rendered()
        );
    }
}
