//! Concrete implementations of trait abstractions.
//!
//! - [`SocketIoTransport`] - Socket.IO over tokio-tungstenite
//! - [`MockTransport`] - captures emits for tests

pub mod mock;
pub mod socketio_transport;

pub use mock::MockTransport;
pub use socketio_transport::SocketIoTransport;
