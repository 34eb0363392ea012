//! Socket.IO transport adapter.
//!
//! Wraps [`SocketIoClient`] and implements the [`Transport`] trait.

use tokio::sync::mpsc;

use crate::socketio::{OutboundEvent, SocketIoClient};
use crate::startup::ServerConfig;
use crate::traits::{Transport, TransportError, TransportEvent};

/// Transport backed by a live Socket.IO connection.
///
/// # Example
///
/// ```ignore
/// use sockview::adapters::SocketIoTransport;
/// use sockview::session::SessionController;
/// use sockview::startup::ServerConfig;
///
/// let (transport, mut events) = SocketIoTransport::connect(ServerConfig::from_env());
/// let mut session = SessionController::new();
/// session.initialize(Box::new(transport))?;
///
/// while let Some(event) = events.recv().await {
///     session.handle_event(event);
/// }
/// ```
pub struct SocketIoTransport {
    client: SocketIoClient,
}

impl SocketIoTransport {
    /// Start connecting in the background.
    ///
    /// Returns immediately; progress arrives on the event receiver.
    pub fn connect(config: ServerConfig) -> (Self, mpsc::UnboundedReceiver<TransportEvent>) {
        let (client, events) = SocketIoClient::spawn(config);
        (Self { client }, events)
    }
}

impl Transport for SocketIoTransport {
    fn emit(&self, event: OutboundEvent) -> Result<(), TransportError> {
        self.client.emit(event)
    }

    fn shutdown(&self) {
        self.client.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_connect_failure_surfaces_as_error_event() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = ServerConfig::default()
            .with_url(format!("http://{}", addr))
            .with_reconnect_attempts(0);
        let (_transport, mut events) = SocketIoTransport::connect(config);

        let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
            .await
            .unwrap();
        assert!(matches!(event, Some(TransportEvent::Error { .. })));
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent() {
        let config = ServerConfig::default().with_url("http://127.0.0.1:1");
        let (transport, _events) = SocketIoTransport::connect(config);
        transport.shutdown();
        transport.shutdown();
        assert!(transport.client.is_shut_down());
    }
}
