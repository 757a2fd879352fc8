//! Device-backed tests.
//!
//! These need a real wgpu adapter; on machines without one (bare CI runners)
//! each test prints a note and returns early.

use std::time::Duration;

use glint_engine::render;
use glint_engine::transfer;

const MAP_BUDGET: Duration = Duration::from_secs(10);

fn request_test_device() -> Option<(wgpu::Device, wgpu::Queue)> {
    pollster::block_on(async {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions::default())
            .await
        {
            Ok(adapter) => adapter,
            Err(_) => return None,
        };

        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("glint test device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .ok()
    })
}

#[test]
fn round_trip_preserves_the_fill_pattern() {
    let Some((device, queue)) = request_test_device() else {
        eprintln!("skipping round_trip_preserves_the_fill_pattern: no wgpu adapter available");
        return;
    };

    let pattern = transfer::fill_pattern(256);
    let bytes = transfer::round_trip(&device, &queue, &pattern, MAP_BUDGET)
        .expect("round trip should complete");

    assert_eq!(bytes, pattern);
}

#[test]
fn round_trip_preserves_arbitrary_bytes() {
    let Some((device, queue)) = request_test_device() else {
        eprintln!("skipping round_trip_preserves_arbitrary_bytes: no wgpu adapter available");
        return;
    };

    // Not the counting pattern; catches an accidental pattern-regeneration.
    let data: Vec<u8> = (0..64u32).map(|i| (i.wrapping_mul(37) ^ 0xa5) as u8).collect();
    let bytes =
        transfer::round_trip(&device, &queue, &data, MAP_BUDGET).expect("round trip should complete");

    assert_eq!(bytes, data);
}

#[test]
fn readback_can_be_rerun_on_fresh_buffers() {
    let Some((device, queue)) = request_test_device() else {
        eprintln!("skipping readback_can_be_rerun_on_fresh_buffers: no wgpu adapter available");
        return;
    };

    for len in [8usize, 16, 64, 256] {
        let pattern = transfer::fill_pattern(len);
        let bytes = transfer::round_trip(&device, &queue, &pattern, MAP_BUDGET)
            .expect("round trip should complete");
        assert_eq!(bytes, pattern, "length {len}");
    }
}

#[test]
fn triangle_pipeline_builds_without_validation_errors() {
    let Some((device, _queue)) = request_test_device() else {
        eprintln!("skipping triangle_pipeline_builds_without_validation_errors: no wgpu adapter available");
        return;
    };

    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let _pipeline = render::build_triangle_pipeline(
        &device,
        render::TRIANGLE_SHADER,
        wgpu::TextureFormat::Rgba8Unorm,
    );

    let error = pollster::block_on(scope.pop());
    assert!(error.is_none(), "pipeline creation raised: {error:?}");
}
