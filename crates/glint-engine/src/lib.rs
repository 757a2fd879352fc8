//! Glint engine crate.
//!
//! A minimal real-time rendering harness: GPU capability negotiation,
//! surface configuration, pipeline construction, a frame loop, and a
//! buffer upload/copy/readback demo.

pub mod device;
pub mod logging;
pub mod render;
pub mod runtime;
pub mod time;
pub mod transfer;
