//! Mock implementations for testing.
//!
//! Enables unit testing of the session controller without network access.

pub mod transport;

pub use transport::MockTransport;
