//! Device-level diagnostic callbacks.
//!
//! wgpu reports device loss and uncaptured validation errors through long-lived
//! callbacks installed on the device. Both channels are diagnostic only: they
//! never abort the process or halt the frame loop.

use std::sync::Arc;

/// Receiver for asynchronous device-level faults.
///
/// Injected at device-creation time so the core logic stays testable without a
/// real GPU backend.
pub trait DiagnosticsSink: Send + Sync + 'static {
    /// Device was lost. Fires at most once, any time after acquisition.
    fn on_device_lost(&self, reason: wgpu::DeviceLostReason, message: &str);

    /// Device-side validation failed outside a captured-error scope.
    /// Fires zero or more times.
    fn on_uncaptured_error(&self, error: &wgpu::Error);
}

/// Default sink writing through `log`.
#[derive(Debug, Default)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn on_device_lost(&self, reason: wgpu::DeviceLostReason, message: &str) {
        if message.is_empty() {
            log::warn!("device lost: {reason:?}");
        } else {
            log::warn!("device lost: {reason:?} ({message})");
        }
    }

    fn on_uncaptured_error(&self, error: &wgpu::Error) {
        match error {
            wgpu::Error::Validation { description, .. } => {
                log::error!("uncaptured validation error: {description}");
            }
            wgpu::Error::OutOfMemory { .. } => {
                log::error!("device out of memory: {error}");
            }
            _ => {
                log::error!("uncaptured device error: {error}");
            }
        }
    }
}

/// Installs both long-lived callbacks on `device`.
pub(crate) fn install(device: &wgpu::Device, sink: Arc<dyn DiagnosticsSink>) {
    device.set_device_lost_callback({
        let sink = Arc::clone(&sink);
        move |reason, message| sink.on_device_lost(reason, &message)
    });

    device.on_uncaptured_error(Arc::new(move |error| {
        sink.on_uncaptured_error(&error);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        lost: Mutex<Vec<String>>,
        errors: Mutex<usize>,
    }

    impl DiagnosticsSink for RecordingSink {
        fn on_device_lost(&self, _reason: wgpu::DeviceLostReason, message: &str) {
            self.lost.lock().unwrap().push(message.to_string());
        }

        fn on_uncaptured_error(&self, _error: &wgpu::Error) {
            *self.errors.lock().unwrap() += 1;
        }
    }

    #[test]
    fn sink_is_usable_as_a_shared_trait_object() {
        let sink = Arc::new(RecordingSink::default());
        let dyn_sink: Arc<dyn DiagnosticsSink> = sink.clone();

        dyn_sink.on_device_lost(wgpu::DeviceLostReason::Unknown, "driver gone");
        dyn_sink.on_device_lost(wgpu::DeviceLostReason::Unknown, "");

        assert_eq!(
            *sink.lost.lock().unwrap(),
            vec!["driver gone".to_string(), String::new()]
        );
        assert_eq!(*sink.errors.lock().unwrap(), 0);
    }
}
