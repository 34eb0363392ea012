//! Transport trait abstraction.
//!
//! The session controller talks to the network only through [`Transport`],
//! enabling dependency injection and mocking in tests. Inbound traffic flows
//! the other way as [`TransportEvent`] values on a channel owned by the
//! caller's event loop.

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::session::ServerSnapshot;
use crate::socketio::OutboundEvent;

/// Transport failures.
///
/// Every variant is a flavour of "the server is unavailable"; the
/// controller handles them all by demoting to `Disconnected`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// Connect failed or the session dropped
    #[error("transport unavailable: {0}")]
    Unavailable(String),
    /// Handshake did not finish in time
    #[error("handshake timed out after {}ms", .0.as_millis())]
    HandshakeTimeout(Duration),
    /// Server refused the namespace connection
    #[error("connection rejected: {0}")]
    Rejected(String),
    /// Outbound queue is gone
    #[error("send failed: {0}")]
    SendFailed(String),
}

impl TransportError {
    pub fn is_transport_unavailable(&self) -> bool {
        !matches!(self, TransportError::SendFailed(_))
    }
}

/// Events delivered by the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// Session established
    Open,
    /// Established session ended
    Close,
    /// Connection attempt failed
    Error { message: String },
    Snapshot(ServerSnapshot),
    ButtonAck(Value),
    DatetimeAck(Value),
}

impl TransportEvent {
    pub fn error(err: &TransportError) -> Self {
        TransportEvent::Error {
            message: err.to_string(),
        }
    }
}

/// Outbound half of a connection.
///
/// Emits are fire-and-forget: `emit` only queues the event and never waits
/// for the network.
pub trait Transport: Send {
    fn emit(&self, event: OutboundEvent) -> Result<(), TransportError>;

    /// Close the connection and stop reconnecting. Idempotent.
    fn shutdown(&self);
}
