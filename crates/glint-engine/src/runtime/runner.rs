use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::device::{DiagnosticsSink, Gpu, GpuInit, LogSink};
use crate::time::FrameClock;

use super::app::{App, AppControl};
use super::ctx::FrameCtx;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "glint".to_string(),
            width: 640,
            height: 480,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the frame loop with the default diagnostics sink.
    ///
    /// Returns when the window closes; any initialization failure (event loop,
    /// window, surface, adapter, device) is propagated to the caller.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        Self::run_with_sink(config, gpu_init, app, Arc::new(LogSink))
    }

    /// Like [`Runtime::run`], with an injected diagnostics sink.
    pub fn run_with_sink<A>(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        app: A,
        sink: Arc<dyn DiagnosticsSink>,
    ) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = LoopState::new(config, gpu_init, app, sink);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        // Initialization happens inside `resumed`, which cannot return an
        // error; surface it here so `main` exits non-zero.
        if let Some(err) = state.init_error.take() {
            return Err(err);
        }

        Ok(())
    }
}

struct LoopState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    sink: Arc<dyn DiagnosticsSink>,
    app: A,

    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    clock: FrameClock,

    exit_requested: bool,
    init_error: Option<anyhow::Error>,
}

impl<A> LoopState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A, sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self {
            config,
            gpu_init,
            sink,
            app,
            window: None,
            gpu: None,
            clock: FrameClock::new(),
            exit_requested: false,
            init_error: None,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        // Adapter/device negotiation is async under wgpu; block here so the
        // frame loop never observes a partially-initialized context.
        let gpu = pollster::block_on(Gpu::new(
            Arc::clone(&window),
            self.gpu_init.clone(),
            Arc::clone(&self.sink),
        ))?;

        self.app.on_ready(&gpu);

        self.window = Some(window);
        self.gpu = Some(gpu);
        Ok(())
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for LoopState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.initialize(event_loop) {
            log::error!("initialization failed: {e:#}");
            self.init_error = Some(e);
            self.request_exit(event_loop);
            return;
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; each frame schedules the next.
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let (Some(gpu), Some(window)) = (self.gpu.as_mut(), self.window.as_ref()) {
                    gpu.resize(window.inner_size());
                    window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                let (Some(gpu), Some(window)) = (self.gpu.as_mut(), self.window.as_ref()) else {
                    return;
                };

                let mut ctx = FrameCtx {
                    window: window.as_ref(),
                    gpu,
                    clock: &mut self.clock,
                };

                if self.app.on_frame(&mut ctx) == AppControl::Exit {
                    self.request_exit(event_loop);
                }
            }

            _ => {}
        }
    }
}
