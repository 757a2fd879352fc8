//! Triangle pipeline construction.
//!
//! The pipeline's fixed-function state is described by [`PipelineSpec`], a
//! plain value that can be inspected without a device. Realizing it on a
//! device is the only side-effecting step; shader rejection surfaces through
//! the device's uncaptured-error channel rather than a return code.

/// WGSL source for the demo triangle (vertex + fragment entry points in one
/// module; positions generated from the vertex index).
pub const TRIANGLE_SHADER: &str = include_str!("shaders/triangle.wgsl");

/// Fixed-function state for the triangle pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSpec {
    pub topology: wgpu::PrimitiveTopology,
    pub front_face: wgpu::FrontFace,
    pub cull_mode: Option<wgpu::Face>,
    pub blend: wgpu::BlendState,
    pub sample_count: u32,
}

impl PipelineSpec {
    /// The harness's single pipeline: triangle list, CCW front face, no
    /// culling, alpha-over blending, single sample.
    pub fn triangle() -> Self {
        Self {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            blend: alpha_over_blend(),
            sample_count: 1,
        }
    }
}

/// Standard straight-alpha "over" blending: source-alpha / one-minus-source-alpha
/// for color, zero / one for alpha.
fn alpha_over_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::Zero,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

/// Compiles `shader_src` and assembles the render pipeline described by
/// [`PipelineSpec::triangle`] over a single color target at `color_format`.
///
/// Zero vertex buffers; the vertex stage reads only the built-in vertex index.
/// No depth/stencil target.
pub fn build_triangle_pipeline(
    device: &wgpu::Device,
    shader_src: &str,
    color_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let spec = PipelineSpec::triangle();

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("glint triangle shader"),
        source: wgpu::ShaderSource::Wgsl(shader_src.into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("glint triangle pipeline layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("glint triangle pipeline"),
        layout: Some(&layout),

        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[],
        },

        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(spec.blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: spec.topology,
            strip_index_format: None,
            front_face: spec.front_face,
            cull_mode: spec.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: spec.sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },

        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_spec_matches_fixed_function_state() {
        let spec = PipelineSpec::triangle();
        assert_eq!(spec.topology, wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(spec.front_face, wgpu::FrontFace::Ccw);
        assert_eq!(spec.cull_mode, None);
        assert_eq!(spec.sample_count, 1);
    }

    #[test]
    fn blend_is_alpha_over() {
        let blend = PipelineSpec::triangle().blend;
        assert_eq!(blend.color.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(blend.color.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
        assert_eq!(blend.color.operation, wgpu::BlendOperation::Add);
        assert_eq!(blend.alpha.src_factor, wgpu::BlendFactor::Zero);
        assert_eq!(blend.alpha.dst_factor, wgpu::BlendFactor::One);
        assert_eq!(blend.alpha.operation, wgpu::BlendOperation::Add);
    }

    #[test]
    fn shader_contains_both_entry_points() {
        assert!(TRIANGLE_SHADER.contains("fn vs_main"));
        assert!(TRIANGLE_SHADER.contains("fn fs_main"));
    }

    #[test]
    fn spec_is_deterministic() {
        assert_eq!(PipelineSpec::triangle(), PipelineSpec::triangle());
    }
}
