//! Criterion benchmarks for the input routing hot path.
//!
//! Every captured event takes a focus snapshot, reads the policy and sends
//! through the sink, so these measure the router with a no-op sink and with
//! the real framing sink.
//!
//! Run with:
//! ```bash
//! cargo bench --package vdm-client --bench routing_bench
//! ```

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vdm_client::application::route_input::RemoteEventSink;
use vdm_client::application::session::ClientSession;
use vdm_client::application::settings::InputPolicy;
use vdm_client::infrastructure::transport::FramedEventSink;
use vdm_core::input::codes::{key_action, motion_action};
use vdm_core::{DisplayId, InputDeviceType, KeyEvent, MotionEvent, PointerSample, RawInputEvent, RemoteEvent};

struct DiscardSink;

impl RemoteEventSink for DiscardSink {
    fn send_event(&self, event: RemoteEvent) {
        black_box(event);
    }
}

fn enabled_policy() -> InputPolicy {
    InputPolicy {
        dpad_enabled: true,
        nav_touchpad_enabled: true,
        external_keyboard_enabled: true,
        external_mouse_enabled: true,
    }
}

fn touch_frame(pointers: i32) -> RawInputEvent {
    MotionEvent::touch(
        motion_action::MOVE,
        0,
        (0..pointers)
            .map(|i| PointerSample::new(i, i as f32 * 10.0, 100.0, 1.0))
            .collect(),
    )
    .into()
}

fn bench_route_to_focused(c: &mut Criterion) {
    let session = ClientSession::new(enabled_policy(), Arc::new(DiscardSink));
    session.focus().add_focusable_display(DisplayId(1));
    let router = session.router();
    let key: RawInputEvent = KeyEvent::new(key_action::DOWN, 30, 0).into();
    let hover: RawInputEvent = MotionEvent::hover(motion_action::HOVER_MOVE, 0, 1.0, 2.0).into();

    let mut group = c.benchmark_group("route_to_focused_display");
    group.bench_function("key", |b| {
        b.iter(|| router.route_to_focused_display(InputDeviceType::Keyboard, black_box(&key)))
    });
    group.bench_function("mouse_hover", |b| {
        b.iter(|| router.route_to_focused_display(InputDeviceType::Mouse, black_box(&hover)))
    });
    group.finish();
}

fn bench_touch_fan_out(c: &mut Criterion) {
    let session = ClientSession::new(enabled_policy(), Arc::new(DiscardSink));
    let router = session.router();

    let mut group = c.benchmark_group("touch_fan_out");
    for pointers in [1, 5, 10] {
        let frame = touch_frame(pointers);
        group.bench_with_input(BenchmarkId::from_parameter(pointers), &frame, |b, frame| {
            b.iter(|| router.route(InputDeviceType::Touchscreen, black_box(frame), DisplayId(1)))
        });
    }
    group.finish();
}

fn bench_framed_sink(c: &mut Criterion) {
    let (sink, mut frames) = FramedEventSink::new();
    let session = ClientSession::new(enabled_policy(), Arc::new(sink));
    session.focus().add_focusable_display(DisplayId(1));
    let router = session.router();
    let key: RawInputEvent = KeyEvent::new(key_action::DOWN, 30, 0).into();

    c.bench_function("framed_sink_key", |b| {
        b.iter(|| {
            router.route_to_focused_display(InputDeviceType::Keyboard, black_box(&key));
            // Keep the queue from growing across iterations.
            while frames.try_recv().is_ok() {}
        })
    });
}

criterion_group!(benches, bench_route_to_focused, bench_touch_fan_out, bench_framed_sink);
criterion_main!(benches);
