//! Common test utilities for integration tests.
//!
//! Provides an in-process Socket.IO server and helpers for awaiting
//! transport events with a deadline.
//!
//! # Example
//!
//! ```ignore
//! let mut server = FakeServer::start(Behavior::Normal).await;
//! let (transport, mut events) = SocketIoTransport::connect(server.config());
//! assert_eq!(next_event(&mut events).await, TransportEvent::Open);
//! ```

pub mod server;

#[allow(unused_imports)]
pub use server::{Behavior, FakeServer, ServerFrame};

use sockview::traits::TransportEvent;
use std::time::Duration;
use tokio::sync::mpsc;

/// Upper bound for anything a test waits on.
pub const DEADLINE: Duration = Duration::from_secs(5);

/// Next transport event, panicking if none arrives in time.
#[allow(dead_code)]
pub async fn next_event(events: &mut mpsc::UnboundedReceiver<TransportEvent>) -> TransportEvent {
    tokio::time::timeout(DEADLINE, events.recv())
        .await
        .expect("timed out waiting for transport event")
        .expect("transport event channel closed")
}

/// Wait until the connection task ends and the channel closes.
#[allow(dead_code)]
pub async fn expect_closed(events: &mut mpsc::UnboundedReceiver<TransportEvent>) {
    let next = tokio::time::timeout(DEADLINE, events.recv())
        .await
        .expect("timed out waiting for transport to stop");
    assert!(next.is_none(), "expected closed channel, got {:?}", next);
}
