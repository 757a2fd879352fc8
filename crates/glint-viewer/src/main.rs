//! Triangle + readback demo for the glint harness.
//!
//! Opens a window, clears it and draws a fixed triangle every frame, and runs
//! one upload → copy → mapped-readback round trip at startup.

use std::time::Duration;

use anyhow::Result;

use glint_engine::device::{Gpu, GpuInit};
use glint_engine::logging::{LoggingConfig, init_logging};
use glint_engine::render;
use glint_engine::runtime::{App, AppControl, FrameCtx, Runtime, RuntimeConfig};
use glint_engine::transfer;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.9,
    g: 0.1,
    b: 0.2,
    a: 1.0,
};

const READBACK_LEN: usize = 16;
const READBACK_BUDGET: Duration = Duration::from_secs(5);

#[derive(Default)]
struct TriangleApp {
    pipeline: Option<wgpu::RenderPipeline>,
}

impl App for TriangleApp {
    fn on_ready(&mut self, gpu: &Gpu) {
        self.pipeline = Some(render::build_triangle_pipeline(
            gpu.device(),
            render::TRIANGLE_SHADER,
            gpu.surface_format(),
        ));

        // One-shot upload/copy/readback demo, before the first frame.
        let pattern = transfer::fill_pattern(READBACK_LEN);
        match transfer::round_trip(gpu.device(), gpu.queue(), &pattern, READBACK_BUDGET) {
            Ok(bytes) => {
                log::info!("readback bytes: {bytes:?}");
                if bytes != pattern {
                    log::error!("readback mismatch, wrote {pattern:?}");
                }
            }
            // Non-fatal: the frame loop runs regardless.
            Err(err) => log::warn!("buffer round trip failed: {err:#}"),
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let Some(pipeline) = self.pipeline.as_ref() else {
            return AppControl::Continue;
        };

        ctx.render(CLEAR_COLOR, |rpass| {
            rpass.set_pipeline(pipeline);
            rpass.draw(0..3, 0..1);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    Runtime::run(
        RuntimeConfig {
            title: "glint".to_string(),
            width: 640,
            height: 480,
        },
        GpuInit::default(),
        TriangleApp::default(),
    )
}
