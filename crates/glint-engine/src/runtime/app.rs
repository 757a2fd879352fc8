use crate::device::Gpu;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the harness user.
pub trait App {
    /// Called once, after the GPU context is fully negotiated and the surface
    /// configured, before the first frame. One-shot setup (pipelines, demo
    /// uploads) belongs here; the frame loop never observes partial state.
    fn on_ready(&mut self, gpu: &Gpu) {
        let _ = gpu;
    }

    /// Called once per frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
