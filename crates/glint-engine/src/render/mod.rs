//! Render pipeline construction.

mod pipeline;

pub use pipeline::{PipelineSpec, TRIANGLE_SHADER, build_triangle_pipeline};
