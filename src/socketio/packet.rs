//! Engine.IO v4 and Socket.IO v5 text packet codec.
//!
//! Engine.IO frames a single character packet type followed by an optional
//! payload. Socket.IO packets travel inside Engine.IO `message` packets and
//! have the shape `<type>[<namespace>,][<ack id>][<json>]`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Default Socket.IO namespace.
pub const DEFAULT_NAMESPACE: &str = "/";

/// Errors produced while decoding packets.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PacketError {
    #[error("empty packet")]
    Empty,
    #[error("unknown engine.io packet type '{0}'")]
    UnknownEngineType(char),
    #[error("unknown socket.io packet type '{0}'")]
    UnknownSocketType(char),
    #[error("binary socket.io packets are not supported")]
    BinaryUnsupported,
    #[error("invalid json payload: {0}")]
    InvalidJson(String),
    #[error("malformed packet: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for PacketError {
    fn from(err: serde_json::Error) -> Self {
        PacketError::InvalidJson(err.to_string())
    }
}

/// Handshake data carried by the Engine.IO `open` packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    /// Milliseconds between server pings.
    pub ping_interval: u64,
    /// Milliseconds the server waits for a pong.
    pub ping_timeout: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_payload: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping(String),
    Pong(String),
    Message(String),
    Upgrade,
    Noop,
}

impl EnginePacket {
    pub fn decode(text: &str) -> Result<Self, PacketError> {
        let mut chars = text.chars();
        let kind = chars.next().ok_or(PacketError::Empty)?;
        let payload = chars.as_str();

        match kind {
            '0' => Ok(EnginePacket::Open(serde_json::from_str(payload)?)),
            '1' => Ok(EnginePacket::Close),
            '2' => Ok(EnginePacket::Ping(payload.to_string())),
            '3' => Ok(EnginePacket::Pong(payload.to_string())),
            '4' => Ok(EnginePacket::Message(payload.to_string())),
            '5' => Ok(EnginePacket::Upgrade),
            '6' => Ok(EnginePacket::Noop),
            other => Err(PacketError::UnknownEngineType(other)),
        }
    }

    pub fn encode(&self) -> String {
        match self {
            EnginePacket::Open(handshake) => {
                // Handshake only holds strings and integers.
                let json = serde_json::to_string(handshake).unwrap_or_default();
                format!("0{}", json)
            }
            EnginePacket::Close => "1".to_string(),
            EnginePacket::Ping(payload) => format!("2{}", payload),
            EnginePacket::Pong(payload) => format!("3{}", payload),
            EnginePacket::Message(payload) => format!("4{}", payload),
            EnginePacket::Upgrade => "5".to_string(),
            EnginePacket::Noop => "6".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketPacketKind {
    Connect,
    Disconnect,
    Event,
    Ack,
    ConnectError,
}

impl SocketPacketKind {
    fn from_char(c: char) -> Result<Self, PacketError> {
        match c {
            '0' => Ok(SocketPacketKind::Connect),
            '1' => Ok(SocketPacketKind::Disconnect),
            '2' => Ok(SocketPacketKind::Event),
            '3' => Ok(SocketPacketKind::Ack),
            '4' => Ok(SocketPacketKind::ConnectError),
            '5' | '6' => Err(PacketError::BinaryUnsupported),
            other => Err(PacketError::UnknownSocketType(other)),
        }
    }

    fn as_char(self) -> char {
        match self {
            SocketPacketKind::Connect => '0',
            SocketPacketKind::Disconnect => '1',
            SocketPacketKind::Event => '2',
            SocketPacketKind::Ack => '3',
            SocketPacketKind::ConnectError => '4',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SocketPacket {
    pub kind: SocketPacketKind,
    pub namespace: String,
    pub ack_id: Option<u64>,
    pub data: Option<Value>,
}

impl SocketPacket {
    /// CONNECT request for a namespace.
    pub fn connect(namespace: &str) -> Self {
        Self {
            kind: SocketPacketKind::Connect,
            namespace: namespace.to_string(),
            ack_id: None,
            data: None,
        }
    }

    pub fn disconnect(namespace: &str) -> Self {
        Self {
            kind: SocketPacketKind::Disconnect,
            namespace: namespace.to_string(),
            ack_id: None,
            data: None,
        }
    }

    /// EVENT on the default namespace carrying a single argument.
    pub fn event(name: &str, payload: Value) -> Self {
        Self {
            kind: SocketPacketKind::Event,
            namespace: DEFAULT_NAMESPACE.to_string(),
            ack_id: None,
            data: Some(Value::Array(vec![Value::String(name.to_string()), payload])),
        }
    }

    pub fn decode(text: &str) -> Result<Self, PacketError> {
        let mut chars = text.chars();
        let kind = SocketPacketKind::from_char(chars.next().ok_or(PacketError::Empty)?)?;
        let mut rest = chars.as_str();

        let namespace = if rest.starts_with('/') {
            match rest.find(',') {
                Some(idx) => {
                    let ns = &rest[..idx];
                    rest = &rest[idx + 1..];
                    ns.to_string()
                }
                None => {
                    let ns = rest.to_string();
                    rest = "";
                    ns
                }
            }
        } else {
            DEFAULT_NAMESPACE.to_string()
        };

        let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
        let ack_id = if digits > 0 {
            let id = rest[..digits]
                .parse::<u64>()
                .map_err(|e| PacketError::Malformed(format!("ack id: {}", e)))?;
            rest = &rest[digits..];
            Some(id)
        } else {
            None
        };

        let data = if rest.is_empty() {
            None
        } else {
            Some(serde_json::from_str::<Value>(rest)?)
        };

        if kind == SocketPacketKind::Event && !matches!(&data, Some(Value::Array(items)) if !items.is_empty())
        {
            return Err(PacketError::Malformed(
                "event payload must be a non-empty array".to_string(),
            ));
        }

        Ok(Self {
            kind,
            namespace,
            ack_id,
            data,
        })
    }

    pub fn encode(&self) -> String {
        let mut out = String::new();
        out.push(self.kind.as_char());
        if self.namespace != DEFAULT_NAMESPACE && !self.namespace.is_empty() {
            out.push_str(&self.namespace);
            out.push(',');
        }
        if let Some(id) = self.ack_id {
            out.push_str(&id.to_string());
        }
        if let Some(data) = &self.data {
            out.push_str(&data.to_string());
        }
        out
    }

    /// Event name, for EVENT packets.
    pub fn event_name(&self) -> Option<&str> {
        match (&self.kind, &self.data) {
            (SocketPacketKind::Event, Some(Value::Array(items))) => items.first()?.as_str(),
            _ => None,
        }
    }

    /// Event arguments following the name, for EVENT packets.
    pub fn event_args(&self) -> &[Value] {
        match (&self.kind, &self.data) {
            (SocketPacketKind::Event, Some(Value::Array(items))) if !items.is_empty() => &items[1..],
            _ => &[],
        }
    }

    /// `message` field of a CONNECT_ERROR payload.
    pub fn error_message(&self) -> Option<String> {
        if self.kind != SocketPacketKind::ConnectError {
            return None;
        }
        match &self.data {
            Some(Value::Object(map)) => map
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            Some(Value::String(message)) => Some(message.clone()),
            _ => None,
        }
    }

    /// Wrap into the Engine.IO `message` packet that carries it.
    pub fn into_engine(self) -> EnginePacket {
        EnginePacket::Message(self.encode())
    }
}
