//! Buffer upload → device copy → asynchronous mapped readback.
//!
//! The readback protocol is encoded in types: mapping yields a [`PendingMap`],
//! and the bytes become readable only through the [`MappedBytes`] it produces
//! after the map-completion callback has been observed. Unmapping happens when
//! the view drops, returning the buffer to GPU ownership.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::device::Completion;

/// Deterministic test pattern: byte `i` = `i mod 256`.
pub fn fill_pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 256) as u8).collect()
}

/// A source/destination buffer pair for one round trip.
pub struct Transfer {
    upload: wgpu::Buffer,
    readback: wgpu::Buffer,
    len: u64,
}

impl Transfer {
    /// Allocates buffer A (copy source/destination) and buffer B
    /// (copy destination, map-read) of `len` bytes each.
    ///
    /// `len` must satisfy wgpu's copy alignment (a multiple of 4 bytes).
    pub fn new(device: &wgpu::Device, len: u64) -> Self {
        let upload = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glint upload buffer"),
            size: len,
            usage: wgpu::BufferUsages::COPY_SRC | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glint readback buffer"),
            size: len,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        Self {
            upload,
            readback,
            len,
        }
    }

    /// Writes `data` into the upload buffer via a direct queue write.
    pub fn upload(&self, queue: &wgpu::Queue, data: &[u8]) {
        debug_assert_eq!(data.len() as u64, self.len);
        queue.write_buffer(&self.upload, 0, data);
    }

    /// Records and submits a single buffer-to-buffer copy A → B.
    ///
    /// The copy's submission precedes any later map request on the readback
    /// buffer, which is what orders the two on the queue's timeline.
    pub fn copy(&self, device: &wgpu::Device, queue: &wgpu::Queue) {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("glint transfer encoder"),
        });
        encoder.copy_buffer_to_buffer(&self.upload, 0, &self.readback, 0, self.len);
        queue.submit(std::iter::once(encoder.finish()));
    }

    /// Issues the asynchronous map-for-read request over the full range.
    ///
    /// Consumes the pair so nothing can touch the readback buffer while the
    /// request is in flight.
    pub fn begin_map(self) -> PendingMap {
        let completion = Completion::new();
        let resolver = completion.resolver();

        self.readback
            .slice(..)
            .map_async(wgpu::MapMode::Read, move |result| {
                resolver.resolve(result);
            });

        PendingMap {
            buffer: self.readback,
            completion,
        }
    }
}

/// An in-flight map request. The buffer's memory is not readable yet.
pub struct PendingMap {
    buffer: wgpu::Buffer,
    completion: Completion<std::result::Result<(), wgpu::BufferAsyncError>>,
}

impl PendingMap {
    /// Pumps the device callback queue until the map completes, then returns
    /// the readable view.
    ///
    /// Errors on timeout or when the driver reports a failed map; in both
    /// cases the buffer is released without being read.
    pub fn wait(self, device: &wgpu::Device, timeout: Duration) -> Result<MappedBytes> {
        let map_result = self
            .completion
            .wait_with(timeout, || {
                let _ = device.poll(wgpu::PollType::Poll);
            })
            .context("buffer map did not complete")?;

        map_result.context("buffer map failed")?;

        Ok(MappedBytes {
            buffer: self.buffer,
        })
    }
}

/// A successfully mapped readback buffer.
///
/// Only constructible after the completion callback reported success, so a
/// read-before-map is unrepresentable. Dropping unmaps, returning the buffer
/// to GPU ownership.
pub struct MappedBytes {
    buffer: wgpu::Buffer,
}

impl MappedBytes {
    /// Copies the mapped range out.
    pub fn to_vec(&self) -> Vec<u8> {
        self.buffer.slice(..).get_mapped_range().to_vec()
    }
}

impl Drop for MappedBytes {
    fn drop(&mut self) {
        self.buffer.unmap();
    }
}

/// Full round trip: upload `data`, copy device-side, map, read, release.
///
/// The returned bytes equal `data` byte-for-byte when the driver honors
/// submission order.
pub fn round_trip(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    data: &[u8],
    timeout: Duration,
) -> Result<Vec<u8>> {
    let transfer = Transfer::new(device, data.len() as u64);
    transfer.upload(queue, data);
    transfer.copy(device, queue);

    let mapped = transfer.begin_map().wait(device, timeout)?;
    Ok(mapped.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_is_length_exact() {
        assert_eq!(fill_pattern(0).len(), 0);
        assert_eq!(fill_pattern(16).len(), 16);
        assert_eq!(fill_pattern(1000).len(), 1000);
    }

    #[test]
    fn pattern_counts_up_and_wraps() {
        let p = fill_pattern(600);
        assert_eq!(p[0], 0);
        assert_eq!(p[15], 15);
        assert_eq!(p[255], 255);
        assert_eq!(p[256], 0);
        assert_eq!(p[511], 255);
        assert_eq!(p[512], 0);
    }
}
