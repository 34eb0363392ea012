//! Session data model.
//!
//! Two state families live side by side and are updated from disjoint
//! sources: [`ServerSnapshot`] only changes on inbound events, while
//! [`LocalControlState`] only changes on user actions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the generated client identity token.
const CLIENT_ID_LEN: usize = 9;

/// Connection state as observed by the session controller.
///
/// There is no "connecting" or "reconnecting" state: anything that is not
/// a live session renders as `Disconnected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

impl ConnectionState {
    pub fn is_connected(self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    /// Label shown by the status badge.
    pub fn label(self) -> &'static str {
        match self {
            ConnectionState::Connected => "Connected",
            ConnectionState::Disconnected => "Disconnected",
        }
    }
}

/// Opaque token tagging every outbound event from this view.
///
/// Generated once per controller. Collisions between clients are possible
/// and accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    /// Generate a short random token.
    pub fn generate() -> Self {
        let token = uuid::Uuid::new_v4().simple().to_string();
        Self(token[..CLIENT_ID_LEN].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClientIdentity {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Last values pushed by the server. Replaced wholesale on every update.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerSnapshot {
    #[serde(rename = "randomNumber")]
    pub random_number: f64,
    #[serde(rename = "boolean")]
    pub boolean_value: bool,
}

impl ServerSnapshot {
    pub fn new(random_number: f64, boolean_value: bool) -> Self {
        Self {
            random_number,
            boolean_value,
        }
    }
}

/// Values owned by the user and echoed to the server on change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalControlState {
    pub button_state: bool,
    /// `YYYY-MM-DDTHH:MM` local date-time, or empty for "no selection".
    pub datetime_value: String,
}
