use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout, Instant};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use super::messages::{InboundEvent, OutboundEvent};
use super::packet::{EnginePacket, Handshake, SocketPacket, SocketPacketKind, DEFAULT_NAMESPACE};
use crate::startup::ServerConfig;
use crate::traits::{TransportError, TransportEvent};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;

/// Instructions from the handle to the connection task.
#[derive(Debug)]
enum Command {
    Emit(OutboundEvent),
    Close,
}

/// How an established session ended.
#[derive(Debug)]
enum SessionEnd {
    /// Local shutdown or the event receiver went away
    Shutdown,
    /// Server disconnected the namespace on purpose; do not reconnect
    ServerDisconnect,
    /// Transport dropped; reconnect policy applies
    Dropped(String),
}

/// Handle to a Socket.IO client running on a background task.
///
/// The task connects, reconnects on a fixed delay up to the configured
/// attempt cap, and reports progress as [`TransportEvent`]s. Dropping the
/// handle shuts the connection down.
pub struct SocketIoClient {
    command_tx: mpsc::UnboundedSender<Command>,
    shutdown: Arc<AtomicBool>,
}

impl SocketIoClient {
    /// Start connecting. Must be called inside a tokio runtime.
    pub fn spawn(config: ServerConfig) -> (Self, mpsc::UnboundedReceiver<TransportEvent>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));

        tokio::spawn(run_connection_loop(
            config,
            command_rx,
            event_tx,
            shutdown.clone(),
        ));

        (
            Self {
                command_tx,
                shutdown,
            },
            event_rx,
        )
    }

    /// Queue an event for the live session.
    ///
    /// Events queued while no session is established are dropped by the
    /// connection task.
    pub fn emit(&self, event: OutboundEvent) -> Result<(), TransportError> {
        if self.shutdown.load(Ordering::SeqCst) {
            return Err(TransportError::SendFailed("client shut down".to_string()));
        }
        self.command_tx
            .send(Command::Emit(event))
            .map_err(|_| TransportError::SendFailed("connection task ended".to_string()))
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Close the connection and stop reconnecting.
    pub fn shutdown(&self) {
        if self.shutdown.swap(true, Ordering::SeqCst) {
            return;
        }
        info!("Shutting down Socket.IO client");
        let _ = self.command_tx.send(Command::Close);
    }
}

impl Drop for SocketIoClient {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run_connection_loop(
    config: ServerConfig,
    mut command_rx: mpsc::UnboundedReceiver<Command>,
    event_tx: mpsc::UnboundedSender<TransportEvent>,
    shutdown: Arc<AtomicBool>,
) {
    let url = config.endpoint_url();
    let mut attempt: u32 = 0;

    loop {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }

        debug!("Connecting to {}", url);
        let result = tokio::select! {
            result = establish(&url, config.handshake_timeout) => result,
            _ = wait_for_close(&mut command_rx) => break,
        };

        match result {
            Ok(session) => {
                attempt = 0;
                info!("Connected to {} (sid {})", url, session.handshake.sid);
                if event_tx.send(TransportEvent::Open).is_err() {
                    break;
                }

                match run_session(session, &mut command_rx, &event_tx).await {
                    SessionEnd::Shutdown => break,
                    SessionEnd::ServerDisconnect => {
                        info!("Server closed the session, not reconnecting");
                        let _ = event_tx.send(TransportEvent::Close);
                        break;
                    }
                    SessionEnd::Dropped(reason) => {
                        info!("Disconnected from server: {}", reason);
                        if event_tx.send(TransportEvent::Close).is_err() {
                            break;
                        }
                    }
                }
            }
            Err(e) => {
                warn!("Connection error: {}", e);
                if event_tx.send(TransportEvent::error(&e)).is_err() {
                    break;
                }
            }
        }

        if attempt >= config.reconnect_attempts {
            error!(
                "Failed to reconnect after {} attempts, giving up",
                config.reconnect_attempts
            );
            break;
        }
        attempt += 1;
        info!(
            "Reconnection attempt {} of {} in {}ms",
            attempt,
            config.reconnect_attempts,
            config.reconnect_delay.as_millis()
        );

        tokio::select! {
            _ = sleep(config.reconnect_delay) => {}
            _ = wait_for_close(&mut command_rx) => break,
        }
    }

    info!("Connection loop ended");
}

/// Resolve once a close is requested, dropping emits that arrive meanwhile.
async fn wait_for_close(command_rx: &mut mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = command_rx.recv().await {
        match command {
            Command::Emit(event) => {
                debug!("Not connected, dropping '{}' emit", event.name());
            }
            Command::Close => return,
        }
    }
}

struct Session {
    ws: WsStream,
    handshake: Handshake,
    /// Events the server sent before acknowledging the namespace
    buffered: Vec<SocketPacket>,
}

async fn establish(url: &str, budget: Duration) -> Result<Session, TransportError> {
    timeout(budget, handshake(url))
        .await
        .map_err(|_| TransportError::HandshakeTimeout(budget))?
}

/// Open the WebSocket, read the Engine.IO handshake and join the default
/// namespace.
async fn handshake(url: &str) -> Result<Session, TransportError> {
    let (mut ws, _) = connect_async(url)
        .await
        .map_err(|e| TransportError::Unavailable(e.to_string()))?;

    let handshake = loop {
        match next_engine_packet(&mut ws).await? {
            EnginePacket::Open(handshake) => break handshake,
            other => debug!("Ignoring {:?} before open", other),
        }
    };
    debug!(
        "Engine.IO open: sid={} pingInterval={}ms pingTimeout={}ms",
        handshake.sid, handshake.ping_interval, handshake.ping_timeout
    );

    send_engine(&mut ws, SocketPacket::connect(DEFAULT_NAMESPACE).into_engine()).await?;

    let mut buffered = Vec::new();
    loop {
        match next_engine_packet(&mut ws).await? {
            EnginePacket::Ping(payload) => {
                send_engine(&mut ws, EnginePacket::Pong(payload)).await?;
            }
            EnginePacket::Message(payload) => {
                let packet = match SocketPacket::decode(&payload) {
                    Ok(packet) => packet,
                    Err(e) => {
                        warn!("Skipping malformed packet during handshake: {}", e);
                        continue;
                    }
                };
                match packet.kind {
                    SocketPacketKind::Connect => {
                        return Ok(Session {
                            ws,
                            handshake,
                            buffered,
                        })
                    }
                    SocketPacketKind::ConnectError => {
                        let message = packet
                            .error_message()
                            .unwrap_or_else(|| "connect_error".to_string());
                        return Err(TransportError::Rejected(message));
                    }
                    SocketPacketKind::Event => {
                        debug!("Buffering event received before connect ack");
                        buffered.push(packet);
                    }
                    _ => debug!("Ignoring {:?} packet before connect ack", packet.kind),
                }
            }
            EnginePacket::Close => {
                return Err(TransportError::Unavailable(
                    "server closed during handshake".to_string(),
                ));
            }
            _ => {}
        }
    }
}

async fn next_engine_packet(ws: &mut WsStream) -> Result<EnginePacket, TransportError> {
    loop {
        match ws.next().await {
            Some(Ok(Message::Text(text))) => match EnginePacket::decode(&text) {
                Ok(packet) => return Ok(packet),
                Err(e) => warn!("Skipping malformed frame: {} - {}", e, text),
            },
            Some(Ok(Message::Close(_))) | None => {
                return Err(TransportError::Unavailable(
                    "connection closed during handshake".to_string(),
                ));
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => return Err(TransportError::Unavailable(e.to_string())),
        }
    }
}

async fn send_engine(ws: &mut WsStream, packet: EnginePacket) -> Result<(), TransportError> {
    ws.send(Message::Text(packet.encode()))
        .await
        .map_err(|e| TransportError::Unavailable(e.to_string()))
}

/// Pump an established session until it ends.
async fn run_session(
    session: Session,
    command_rx: &mut mpsc::UnboundedReceiver<Command>,
    event_tx: &mpsc::UnboundedSender<TransportEvent>,
) -> SessionEnd {
    let Session {
        ws,
        handshake,
        buffered,
    } = session;
    let (mut sink, mut source) = ws.split();

    for packet in buffered {
        if let Some(end) = dispatch_packet(packet, event_tx) {
            return end;
        }
    }

    let window = heartbeat_window(&handshake);
    let heartbeat = sleep(window);
    tokio::pin!(heartbeat);

    loop {
        tokio::select! {
            frame = source.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    let packet = match EnginePacket::decode(&text) {
                        Ok(packet) => packet,
                        Err(e) => {
                            warn!("Skipping malformed frame: {} - {}", e, text);
                            continue;
                        }
                    };
                    match packet {
                        EnginePacket::Ping(payload) => {
                            heartbeat.as_mut().reset(Instant::now() + window);
                            if let Err(e) = sink.send(Message::Text(EnginePacket::Pong(payload).encode())).await {
                                return SessionEnd::Dropped(format!("pong failed: {}", e));
                            }
                        }
                        EnginePacket::Message(payload) => {
                            if let Some(end) = dispatch_socket_payload(&payload, event_tx) {
                                return end;
                            }
                        }
                        EnginePacket::Close => {
                            return SessionEnd::Dropped("server closed the transport".to_string());
                        }
                        other => debug!("Ignoring engine packet {:?}", other),
                    }
                }
                Some(Ok(Message::Close(_))) => {
                    return SessionEnd::Dropped("received close frame".to_string());
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return SessionEnd::Dropped(e.to_string()),
                None => return SessionEnd::Dropped("stream ended".to_string()),
            },
            command = command_rx.recv() => match command {
                Some(Command::Emit(event)) => {
                    if let Err(end) = send_event(&mut sink, &event).await {
                        return end;
                    }
                }
                Some(Command::Close) | None => {
                    close_session(&mut sink).await;
                    return SessionEnd::Shutdown;
                }
            },
            _ = &mut heartbeat => {
                return SessionEnd::Dropped("ping timeout".to_string());
            }
        }
    }
}

/// Upper bound for the heartbeat window so deadline arithmetic cannot overflow.
const MAX_HEARTBEAT_WINDOW_MS: u64 = 24 * 60 * 60 * 1000;

/// Time allowed between server pings before the session counts as dropped.
fn heartbeat_window(handshake: &Handshake) -> Duration {
    let window = handshake
        .ping_interval
        .saturating_add(handshake.ping_timeout)
        .min(MAX_HEARTBEAT_WINDOW_MS);
    Duration::from_millis(window)
}

/// Decode and handle one Socket.IO payload. Returns `Some` when the session
/// is over.
fn dispatch_socket_payload(
    payload: &str,
    event_tx: &mpsc::UnboundedSender<TransportEvent>,
) -> Option<SessionEnd> {
    match SocketPacket::decode(payload) {
        Ok(packet) => dispatch_packet(packet, event_tx),
        Err(e) => {
            warn!("Failed to parse packet: {} - {}", e, payload);
            None
        }
    }
}

fn dispatch_packet(
    packet: SocketPacket,
    event_tx: &mpsc::UnboundedSender<TransportEvent>,
) -> Option<SessionEnd> {
    let event = match packet.kind {
        SocketPacketKind::Event => match InboundEvent::from_packet(&packet) {
            Ok(InboundEvent::Snapshot(snapshot)) => TransportEvent::Snapshot(snapshot),
            Ok(InboundEvent::ButtonAck(data)) => TransportEvent::ButtonAck(data),
            Ok(InboundEvent::DatetimeAck(data)) => TransportEvent::DatetimeAck(data),
            Ok(InboundEvent::Unknown { name }) => {
                debug!("Ignoring unhandled event '{}'", name);
                return None;
            }
            Err(e) => {
                warn!("Failed to parse event payload: {} - {:?}", e, packet.data);
                return None;
            }
        },
        SocketPacketKind::Disconnect => return Some(SessionEnd::ServerDisconnect),
        SocketPacketKind::ConnectError => {
            let message = packet.error_message().unwrap_or_default();
            return Some(SessionEnd::Dropped(format!("connect_error: {}", message)));
        }
        kind => {
            debug!("Ignoring {:?} packet", kind);
            return None;
        }
    };

    if event_tx.send(event).is_err() {
        return Some(SessionEnd::Shutdown);
    }
    None
}

async fn send_event(sink: &mut WsSink, event: &OutboundEvent) -> Result<(), SessionEnd> {
    let packet = match event.to_packet() {
        Ok(packet) => packet,
        Err(e) => {
            error!("Failed to serialize '{}': {}", event.name(), e);
            return Ok(());
        }
    };
    let frame = packet.into_engine().encode();
    debug!("Sending: {}", frame);
    sink.send(Message::Text(frame))
        .await
        .map_err(|e| SessionEnd::Dropped(format!("send failed: {}", e)))
}

async fn close_session(sink: &mut WsSink) {
    let disconnect = SocketPacket::disconnect(DEFAULT_NAMESPACE).into_engine();
    let _ = sink.send(Message::Text(disconnect.encode())).await;
    let _ = sink.send(Message::Text(EnginePacket::Close.encode())).await;
    let _ = sink.close().await;
}
