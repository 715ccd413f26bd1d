//! Integration tests for the input routing pipeline.
//!
//! These tests drive a `ClientSession` through its public API the way the
//! binary does: captured input goes into a `ChannelInputSource`, the input
//! pump routes it, and the transport sink frames it.  The frames are then
//! decoded and checked on the "remote" side.

use std::sync::{Arc, Mutex};
use std::thread;

use vdm_client::application::route_input::RemoteEventSink;
use vdm_client::application::session::ClientSession;
use vdm_client::application::settings::InputPolicy;
use vdm_client::infrastructure::input_capture::channel::ChannelInputSource;
use vdm_client::infrastructure::input_capture::{pump_events, CapturedInput, InputSource};
use vdm_client::infrastructure::transport::{run_writer, FramedEventSink};
use vdm_core::input::codes::{key_action, keycode, motion_action};
use vdm_core::protocol::messages::{InputPayload, KeyPayload, TouchPayload};
use vdm_core::{decode_event, DisplayId, InputDeviceType, KeyEvent, MotionEvent, PointerSample, RemoteEvent};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<RemoteEvent>>,
}

impl RemoteEventSink for RecordingSink {
    fn send_event(&self, event: RemoteEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn keyboard_and_mouse() -> InputPolicy {
    InputPolicy {
        external_keyboard_enabled: true,
        external_mouse_enabled: true,
        ..Default::default()
    }
}

fn untargeted_key(action: i32, key_code: i32) -> CapturedInput {
    CapturedInput::Event {
        device_type: InputDeviceType::Keyboard,
        event: KeyEvent::new(action, key_code, 100).into(),
        target: None,
    }
}

fn decode_all(mut bytes: &[u8]) -> Vec<RemoteEvent> {
    let mut events = Vec::new();
    while !bytes.is_empty() {
        let (event, used) = decode_event(bytes).expect("valid frame");
        events.push(event);
        bytes = &bytes[used..];
    }
    events
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_captured_input_reaches_the_wire_in_order() {
    // Arrange
    let (sink, frames) = FramedEventSink::new();
    let session = ClientSession::new(keyboard_and_mouse(), Arc::new(sink));
    session.focus().add_focusable_display(DisplayId(1));
    session.focus().add_focusable_display(DisplayId(2));

    let source = ChannelInputSource::new();
    let events = source.start().expect("start");
    let injector = source.injector();

    // Act
    injector.inject(untargeted_key(key_action::DOWN, keycode::ENTER)).unwrap();
    injector
        .inject(CapturedInput::Event {
            device_type: InputDeviceType::Touchscreen,
            event: MotionEvent::touch(
                motion_action::DOWN,
                200,
                vec![PointerSample::new(0, 10.0, 20.0, 1.0)],
            )
            .into(),
            target: Some(DisplayId(2)),
        })
        .unwrap();
    injector.inject(untargeted_key(key_action::UP, keycode::ENTER)).unwrap();
    injector.inject(CapturedInput::Home(DisplayId(1))).unwrap();
    source.stop();

    let router = Arc::clone(session.router());
    let routed = tokio::task::spawn_blocking(move || pump_events(events, &router))
        .await
        .unwrap();
    drop(session);

    let mut wire = Vec::new();
    run_writer(&mut wire, frames).await.expect("writer");

    // Assert
    assert_eq!(routed, 4);
    let received = decode_all(&wire);
    let targets: Vec<_> = received.iter().map(RemoteEvent::display_id).collect();
    // The touch on display 2 moves focus there, so the key release follows it.
    assert_eq!(
        targets,
        vec![DisplayId(1), DisplayId(2), DisplayId(2), DisplayId(1)]
    );
    assert!(matches!(
        received[1].as_input().map(|m| m.payload),
        Some(InputPayload::Touch(TouchPayload { action: motion_action::DOWN, .. }))
    ));
    assert_eq!(received[3], RemoteEvent::Home { display_id: DisplayId(1) });
}

#[test]
fn test_policy_update_gates_untargeted_input() {
    // Arrange
    let sink = Arc::new(RecordingSink::default());
    let session = ClientSession::new(InputPolicy::default(), Arc::clone(&sink) as _);
    session.focus().add_focusable_display(DisplayId(5));
    let router = session.router();

    // Act
    router.dispatch(untargeted_key(key_action::DOWN, 30));
    session.update_policy(keyboard_and_mouse());
    router.dispatch(untargeted_key(key_action::DOWN, 31));
    session.update_policy(InputPolicy::default());
    router.dispatch(untargeted_key(key_action::DOWN, 32));

    // Assert
    let events = sink.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].as_input().map(|m| m.payload),
        Some(InputPayload::Key(KeyPayload {
            action: key_action::DOWN,
            key_code: 31,
        }))
    );
}

#[test]
fn test_removing_focused_display_redirects_untargeted_input() {
    let sink = Arc::new(RecordingSink::default());
    let session = ClientSession::new(keyboard_and_mouse(), Arc::clone(&sink) as _);
    for id in [4, 2, 9] {
        session.focus().add_focusable_display(DisplayId(id));
    }
    session.focus().set_focus(DisplayId(9));

    session.focus().remove_focusable_display(DisplayId(9));
    session.router().dispatch(untargeted_key(key_action::DOWN, 30));
    for id in [2, 4] {
        session.focus().remove_focusable_display(DisplayId(id));
    }
    session.router().dispatch(untargeted_key(key_action::DOWN, 30));

    let targets: Vec<_> = sink
        .events
        .lock()
        .unwrap()
        .iter()
        .map(RemoteEvent::display_id)
        .collect();
    assert_eq!(targets, vec![DisplayId(2)]);
}

#[test]
fn test_back_and_home_focus_their_display_and_notify_once() {
    // Arrange
    let sink = Arc::new(RecordingSink::default());
    let session = ClientSession::new(keyboard_and_mouse(), Arc::clone(&sink) as _);
    session.focus().add_focusable_display(DisplayId(1));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    session
        .focus()
        .add_listener(Arc::new(move |id: DisplayId| log.lock().unwrap().push(id)));

    // Act
    session.router().dispatch(CapturedInput::Back(DisplayId(7)));
    session.router().dispatch(CapturedInput::Home(DisplayId(7)));
    session.router().dispatch(CapturedInput::Home(DisplayId(3)));

    // Assert
    assert_eq!(*seen.lock().unwrap(), vec![DisplayId(7), DisplayId(3)]);
    assert_eq!(sink.events.lock().unwrap().len(), 4);
}

#[test]
fn test_concurrent_routing_and_focus_changes_only_target_valid_displays() {
    // Arrange
    let sink = Arc::new(RecordingSink::default());
    let session = Arc::new(ClientSession::new(keyboard_and_mouse(), Arc::clone(&sink) as _));
    session.focus().add_focusable_display(DisplayId(1));

    // Act
    let mut handles = Vec::new();
    for worker in 0..4 {
        let session = Arc::clone(&session);
        handles.push(thread::spawn(move || {
            for i in 0..200 {
                match (worker + i) % 4 {
                    0 => session.focus().add_focusable_display(DisplayId(i % 5)),
                    1 => session.focus().remove_focusable_display(DisplayId(i % 5)),
                    2 => session.focus().set_focus(DisplayId(i % 5)),
                    _ => session.router().dispatch(untargeted_key(key_action::DOWN, 30)),
                }
            }
        }));
    }
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    // Assert
    for event in sink.events.lock().unwrap().iter() {
        assert!(event.display_id().is_valid());
    }
}
