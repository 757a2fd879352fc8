use winit::window::Window;

use crate::device::{Gpu, SurfaceAction};
use crate::time::FrameClock;

use super::app::AppControl;

/// Per-frame context passed to [`App::on_frame`].
///
/// [`App::on_frame`]: super::App::on_frame
pub struct FrameCtx<'a> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu,
    pub(super) clock: &'a mut FrameClock,
}

impl<'a> FrameCtx<'a> {
    /// Records one render pass clearing the frame to `clear`, hands the active
    /// pass to `draw`, then submits and presents.
    ///
    /// A transient acquisition failure skips the frame without touching loop
    /// state (no submit, no present, no clock tick); only a fatal surface
    /// error requests exit.
    pub fn render<F>(&mut self, clear: wgpu::Color, draw: F) -> AppControl
    where
        F: FnOnce(&mut wgpu::RenderPass<'_>),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceAction::Fatal => AppControl::Exit,
                    SurfaceAction::Reconfigure | SurfaceAction::SkipFrame => AppControl::Continue,
                };
            }
        };

        // One pass: clear, then whatever `draw` records. Dropped before the
        // encoder is moved into submit().
        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("glint frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            draw(&mut rpass);
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);

        let ft = self.clock.tick();
        log::trace!("frame {} presented, dt {:.3} ms", ft.frame_index, ft.dt * 1e3);

        AppControl::Continue
    }
}
