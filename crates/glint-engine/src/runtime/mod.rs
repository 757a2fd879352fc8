//! Windowed frame-loop runtime.
//!
//! Wraps winit's `ApplicationHandler` into a single-window loop: poll events,
//! acquire the frame, record one pass, submit, present, pump callbacks, until
//! the window is closed.

mod app;
mod ctx;
mod runner;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
pub use runner::{Runtime, RuntimeConfig};
