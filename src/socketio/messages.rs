use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use super::packet::{PacketError, SocketPacket};
use crate::session::{ClientIdentity, ServerSnapshot};

/// Server event carrying a new snapshot.
pub const EVENT_SNAPSHOT: &str = "message";
pub const EVENT_BUTTON_ACK: &str = "button_ack";
pub const EVENT_DATETIME_ACK: &str = "datetime_ack";
pub const EVENT_TOGGLE_BUTTON: &str = "toggle_button";
pub const EVENT_DATETIME_CHANGE: &str = "datetime_change";

/// `inputType` tag sent with every datetime change.
pub const DATETIME_INPUT_TYPE: &str = "datetime-local";

/// Format a timestamp the way browsers do for `Date.toISOString()`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Typed view of a server-originated Socket.IO event.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Snapshot(ServerSnapshot),
    ButtonAck(Value),
    DatetimeAck(Value),
    /// Event this client does not handle.
    Unknown { name: String },
}

impl InboundEvent {
    pub fn from_packet(packet: &SocketPacket) -> Result<Self, PacketError> {
        let name = packet
            .event_name()
            .ok_or_else(|| PacketError::Malformed("not an event packet".to_string()))?;
        let first_arg = packet.event_args().first().cloned().unwrap_or(Value::Null);

        match name {
            EVENT_SNAPSHOT => Ok(InboundEvent::Snapshot(serde_json::from_value(first_arg)?)),
            EVENT_BUTTON_ACK => Ok(InboundEvent::ButtonAck(first_arg)),
            EVENT_DATETIME_ACK => Ok(InboundEvent::DatetimeAck(first_arg)),
            other => Ok(InboundEvent::Unknown {
                name: other.to_string(),
            }),
        }
    }
}

/// Payload of `toggle_button`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonToggle {
    pub button_state: bool,
    pub client_id: String,
    pub timestamp: String,
}

impl ButtonToggle {
    pub fn new(button_state: bool, client_id: &ClientIdentity, at: DateTime<Utc>) -> Self {
        Self {
            button_state,
            client_id: client_id.to_string(),
            timestamp: iso_timestamp(at),
        }
    }
}

/// Payload of `datetime_change`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatetimeChange {
    pub datetime_value: String,
    pub client_id: String,
    pub input_type: String,
    pub timestamp: String,
}

impl DatetimeChange {
    pub fn new(datetime_value: String, client_id: &ClientIdentity, at: DateTime<Utc>) -> Self {
        Self {
            datetime_value,
            client_id: client_id.to_string(),
            input_type: DATETIME_INPUT_TYPE.to_string(),
            timestamp: iso_timestamp(at),
        }
    }
}

/// Client-originated events.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundEvent {
    ButtonToggle(ButtonToggle),
    DatetimeChange(DatetimeChange),
}

impl OutboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::ButtonToggle(_) => EVENT_TOGGLE_BUTTON,
            OutboundEvent::DatetimeChange(_) => EVENT_DATETIME_CHANGE,
        }
    }

    pub fn payload(&self) -> Result<Value, serde_json::Error> {
        match self {
            OutboundEvent::ButtonToggle(toggle) => serde_json::to_value(toggle),
            OutboundEvent::DatetimeChange(change) => serde_json::to_value(change),
        }
    }

    pub fn to_packet(&self) -> Result<SocketPacket, serde_json::Error> {
        Ok(SocketPacket::event(self.name(), self.payload()?))
    }
}
