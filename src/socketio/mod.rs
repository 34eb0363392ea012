//! Socket.IO client for the live value server.
//!
//! Speaks Engine.IO v4 over the WebSocket transport, joins the default
//! namespace and reconnects on a fixed delay. Inbound events are surfaced
//! as [`TransportEvent`](crate::traits::TransportEvent)s; outbound events
//! are queued through [`SocketIoClient::emit`].

pub mod client;
pub mod messages;
pub mod packet;

pub use client::SocketIoClient;
pub use messages::{
    iso_timestamp, ButtonToggle, DatetimeChange, InboundEvent, OutboundEvent,
    DATETIME_INPUT_TYPE, EVENT_BUTTON_ACK, EVENT_DATETIME_ACK, EVENT_DATETIME_CHANGE,
    EVENT_SNAPSHOT, EVENT_TOGGLE_BUTTON,
};
pub use packet::{EnginePacket, Handshake, PacketError, SocketPacket, SocketPacketKind};
