use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface;
use super::{DiagnosticsSink, GpuFrame, GpuInit, SurfaceAction, diagnostics};

/// Owns wgpu core objects and the surface configuration.
///
/// This type is the low-level rendering context:
/// - negotiates and stores Instance/Adapter/Device/Queue
/// - creates and configures the Surface (swapchain)
/// - acquires frames and provides an encoder + view for rendering
/// - submits, presents, and pumps the device callback queue
pub struct Gpu {
    /// wgpu instance used to create the adapter and surface.
    ///
    /// Kept alive for the lifetime of every object negotiated through it.
    instance: wgpu::Instance,

    /// Surface bound to the window. The `Arc<Window>` keeps the window alive
    /// for as long as the surface exists.
    surface: wgpu::Surface<'static>,

    /// Negotiated adapter. Immutable after acquisition; retained for
    /// capability queries and surface reconfiguration.
    adapter: wgpu::Adapter,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,
}

impl Gpu {
    /// Negotiates a GPU context bound to a window.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu; callers bridge
    /// with `pollster::block_on`. A failed negotiation is a checked error, not
    /// a null handle carried forward.
    ///
    /// `sink` receives device-lost and uncaptured-error notifications for the
    /// lifetime of the device. Both are diagnostic only.
    pub async fn new(
        window: Arc<Window>,
        init: GpuInit,
        sink: Arc<dyn DiagnosticsSink>,
    ) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let GpuInit {
            prefer_srgb,
            present_mode,
            alpha_mode,
            required_features,
            required_limits,
            desired_maximum_frame_latency,
        } = init;

        // Use all backends to allow wgpu to select the optimal platform backend.
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(Arc::clone(&window))
            .context("failed to create wgpu surface")?;

        log::info!("requesting adapter");
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        log_adapter(&adapter);

        log::info!("requesting device");
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("glint device"),
                required_features,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        diagnostics::install(&device, sink);

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps.formats, prefer_srgb)
            .context("no supported surface formats")?;
        let alpha_mode = surface::choose_alpha_mode(&caps.alpha_modes, alpha_mode);

        log::info!("surface format {format:?}, alpha mode {alpha_mode:?}");

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        // Configuration must precede the first frame acquisition.
        surface.configure(&device, &config);

        Ok(Self {
            instance,
            surface,
            adapter,
            device,
            queue,
            config,
            size,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns a reference to the negotiated adapter.
    pub fn adapter(&self) -> &wgpu::Adapter {
        &self.adapter
    }

    /// Returns a reference to the instance the context was negotiated from.
    pub fn instance(&self) -> &wgpu::Instance {
        &self.instance
    }

    /// Reconfigures the surface after a resize.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
    }

    /// Acquires the current surface texture and creates an encoder.
    ///
    /// On error the frame must be skipped or the surface reconfigured; see
    /// [`Gpu::handle_surface_error`].
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;

        // Full-mip, full-layer 2D view over the texture's native format.
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor {
                label: Some("glint surface view"),
                format: Some(surface_texture.texture.format()),
                dimension: Some(wgpu::TextureViewDimension::D2),
                ..Default::default()
            });

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("glint frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands, presents the frame, and pumps callbacks.
    ///
    /// Consuming the frame finishes its encoder exactly once; a second finish
    /// is unrepresentable.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();

        self.pump();
    }

    /// Dispatches any device callbacks queued since the last pump
    /// (device-lost, uncaptured-error, buffer-map completion).
    pub fn pump(&self) {
        let _ = self.device.poll(wgpu::PollType::Poll);
    }

    /// Classifies a surface error and applies the reconfiguration when the
    /// classification asks for one.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceAction {
        let action = SurfaceAction::classify(&err);
        match action {
            SurfaceAction::Reconfigure => {
                log::debug!("surface {err:?}; reconfiguring");
                if self.size.width > 0 && self.size.height > 0 {
                    self.surface.configure(&self.device, &self.config);
                }
            }
            SurfaceAction::SkipFrame => log::debug!("surface {err:?}; skipping frame"),
            SurfaceAction::Fatal => log::error!("surface error: {err}"),
        }
        action
    }
}

fn log_adapter(adapter: &wgpu::Adapter) {
    let info = adapter.get_info();
    log::info!(
        "adapter: {} ({:?}, {:?})",
        info.name,
        info.device_type,
        info.backend
    );

    let limits = adapter.limits();
    log::debug!(
        "adapter limits: max texture 2D {}, max buffer size {}",
        limits.max_texture_dimension_2d,
        limits.max_buffer_size
    );
}
