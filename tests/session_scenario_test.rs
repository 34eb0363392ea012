//! End-to-end session scenarios: controller driven by a transport.

mod common;

use common::{expect_closed, next_event, Behavior, FakeServer, ServerFrame};
use serde_json::json;
use sockview::adapters::{MockTransport, SocketIoTransport};
use sockview::session::{ClientIdentity, ConnectionState, ServerSnapshot, SessionController};
use sockview::socketio::OutboundEvent;
use sockview::traits::TransportEvent;
use std::time::Duration;

#[test]
fn test_mount_open_snapshot_toggle_close_toggle() {
    let mock = MockTransport::new();
    let mut session = SessionController::new();
    session.initialize(Box::new(mock.clone())).unwrap();

    session.handle_event(TransportEvent::Open);
    session.handle_event(TransportEvent::Snapshot(ServerSnapshot::new(1.23456, false)));
    assert_eq!(session.snapshot(), &ServerSnapshot::new(1.23456, false));

    assert!(session.toggle_button());
    let emitted = mock.emitted();
    assert_eq!(emitted.len(), 1);
    assert!(matches!(&emitted[0], OutboundEvent::ButtonToggle(t) if t.button_state));

    session.handle_event(TransportEvent::Close);
    assert!(!session.toggle_button());
    assert!(!session.controls().button_state);
    assert_eq!(mock.emitted().len(), 1);
}

#[test]
fn test_scenario_with_mock_transport() {
    let mock = MockTransport::new();
    let mut session = SessionController::with_client_id(ClientIdentity::from("abc123xyz"));
    session.initialize(Box::new(mock.clone())).unwrap();

    // Nothing is sent before the connection opens
    assert!(!session.toggle_button());
    assert!(session.controls().button_state);
    assert!(mock.emitted().is_empty());

    session.handle_event(TransportEvent::Open);
    assert_eq!(session.connection_state(), ConnectionState::Connected);

    session.handle_event(TransportEvent::Snapshot(ServerSnapshot::new(4.5, true)));
    assert_eq!(session.snapshot(), &ServerSnapshot::new(4.5, true));

    assert!(session.toggle_button());
    assert!(session.set_datetime("2024-01-01T10:00"));
    let emitted = mock.emitted();
    assert_eq!(emitted.len(), 2);
    match &emitted[0] {
        OutboundEvent::ButtonToggle(toggle) => {
            assert!(!toggle.button_state);
            assert_eq!(toggle.client_id, "abc123xyz");
        }
        other => panic!("Expected ButtonToggle, got {:?}", other),
    }
    match &emitted[1] {
        OutboundEvent::DatetimeChange(change) => {
            assert_eq!(change.datetime_value, "2024-01-01T10:00");
            assert_eq!(change.input_type, "datetime-local");
        }
        other => panic!("Expected DatetimeChange, got {:?}", other),
    }

    session.handle_event(TransportEvent::Close);
    assert_eq!(session.connection_state(), ConnectionState::Disconnected);
    // Last snapshot survives a disconnect
    assert_eq!(session.snapshot().random_number, 4.5);

    session.teardown();
    assert_eq!(mock.shutdown_count(), 1);
    assert!(!session.handle_event(TransportEvent::Open));
    assert_eq!(session.connection_state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn test_scenario_with_live_server() {
    let mut server = FakeServer::start(Behavior::Normal).await;
    let (transport, mut events) =
        SocketIoTransport::connect(server.config().with_reconnect_attempts(0));
    let mut session = SessionController::with_client_id(ClientIdentity::from("live00001"));
    session.initialize(Box::new(transport)).unwrap();

    let event = next_event(&mut events).await;
    assert!(session.handle_event(event));
    assert!(session.is_connected());
    assert_eq!(server.next_frame().await, ServerFrame::Connected);

    server.send_event("message", json!({"randomNumber": 7.25, "boolean": true}));
    let event = next_event(&mut events).await;
    session.handle_event(event);
    assert_eq!(session.snapshot(), &ServerSnapshot::new(7.25, true));

    assert!(session.toggle_button());
    let ServerFrame::Text(frame) = server.next_frame().await else {
        panic!("Expected toggle frame");
    };
    assert!(frame.starts_with(r#"42["toggle_button","#));
    assert!(frame.contains(r#""clientId":"live00001""#));

    server.send_event("button_ack", json!({"ok": true}));
    let event = next_event(&mut events).await;
    assert_eq!(event, TransportEvent::ButtonAck(json!({"ok": true})));
    session.handle_event(event);

    session.teardown();
    assert_eq!(server.next_frame().await, ServerFrame::Text("41".to_string()));
    expect_closed(&mut events).await;
    assert!(!session.is_connected());
}

#[tokio::test]
async fn test_teardown_before_connection_opens() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = sockview::startup::ServerConfig::default()
        .with_url(format!("http://{}", addr))
        .with_reconnect_delay(Duration::from_secs(30));
    let (transport, mut events) = SocketIoTransport::connect(config);
    let mut session = SessionController::new();
    session.initialize(Box::new(transport)).unwrap();

    // First attempt fails, then the task waits out the long delay
    let event = next_event(&mut events).await;
    assert!(matches!(event, TransportEvent::Error { .. }));
    session.handle_event(event);
    assert!(!session.is_connected());

    session.teardown();
    session.teardown();
    expect_closed(&mut events).await;
    assert!(session.is_disposed());
}
