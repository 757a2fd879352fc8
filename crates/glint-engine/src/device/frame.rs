/// Represents a single acquired frame.
///
/// This object is short-lived and must be finalized promptly. Holding the surface
/// texture prevents acquisition of subsequent frames.
///
/// The encoder is finished exactly once, inside [`Gpu::submit`], which consumes
/// the frame by value. There is no way to finish it twice or to keep recording
/// into a finished encoder.
///
/// [`Gpu::submit`]: super::Gpu::submit
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
