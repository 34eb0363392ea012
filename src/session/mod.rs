//! Session state machine.
//!
//! [`SessionController`] owns the view's single transport handle, tracks
//! whether the server is reachable, mirrors server snapshots and forwards
//! user intents.
//!
//! ```text
//!            open
//!   Disconnected ──────▶ Connected
//!        ▲                  │
//!        └──── close/error ─┘
//! ```

mod controller;
mod types;

pub use controller::{SessionController, SessionError};
pub use types::{ClientIdentity, ConnectionState, LocalControlState, ServerSnapshot};
