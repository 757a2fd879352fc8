//! GPU device + surface management.
//!
//! This module is responsible for:
//! - negotiating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and submitting/presenting them
//! - bridging driver callbacks back into blocking callers
//!
//! The presentation binding is released by dropping [`Gpu`]; the window must
//! outlive it.

mod bridge;
mod diagnostics;
mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use bridge::{BridgeTimeout, Completion, Resolver};
pub use diagnostics::{DiagnosticsSink, LogSink};
pub use error::SurfaceAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
