/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceAction {
    /// Surface must be reconfigured; rendering may resume next frame.
    Reconfigure,
    /// Transient error; skip the current frame and retry on the next pass.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

impl SurfaceAction {
    /// Classifies a surface acquisition error.
    ///
    /// Pure classification; applying the reconfiguration is the caller's job.
    pub fn classify(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigure,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            wgpu::SurfaceError::Timeout => Self::SkipFrame,
            wgpu::SurfaceError::Other => Self::SkipFrame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lost_and_outdated_reconfigure() {
        assert_eq!(
            SurfaceAction::classify(&wgpu::SurfaceError::Lost),
            SurfaceAction::Reconfigure
        );
        assert_eq!(
            SurfaceAction::classify(&wgpu::SurfaceError::Outdated),
            SurfaceAction::Reconfigure
        );
    }

    #[test]
    fn timeout_and_other_skip_the_frame() {
        assert_eq!(
            SurfaceAction::classify(&wgpu::SurfaceError::Timeout),
            SurfaceAction::SkipFrame
        );
        assert_eq!(
            SurfaceAction::classify(&wgpu::SurfaceError::Other),
            SurfaceAction::SkipFrame
        );
    }

    #[test]
    fn out_of_memory_is_fatal() {
        assert_eq!(
            SurfaceAction::classify(&wgpu::SurfaceError::OutOfMemory),
            SurfaceAction::Fatal
        );
    }
}
