//! Trait abstractions for dependency injection and testability.
//!
//! - [`Transport`] - outbound half of a server connection

pub mod transport;

pub use transport::{Transport, TransportError, TransportEvent};
