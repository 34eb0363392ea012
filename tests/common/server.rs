//! Minimal Socket.IO server for transport tests.
//!
//! Serves one connection at a time: Engine.IO open, default namespace
//! CONNECT ack, then relays frames between the test and the client.

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use sockview::startup::ServerConfig;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message};

use super::DEADLINE;

const OPEN_PACKET: &str = r#"0{"sid":"fake-sid","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;
const CONNECT_ACK: &str = r#"40{"sid":"fake-socket"}"#;

/// How the server treats incoming connections.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Behavior {
    /// Complete the handshake and relay frames
    Normal,
    /// Answer the namespace CONNECT with CONNECT_ERROR
    RejectConnect(String),
    /// Send these frames after the client's CONNECT, before the ack
    SendBeforeAck(Vec<String>),
    /// Accept the WebSocket but never send the Engine.IO open packet
    Silent,
}

/// What the server observed from the client.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerFrame {
    /// Client joined the default namespace
    Connected,
    /// Text frame received after the handshake
    Text(String),
    /// Client closed or dropped the socket
    ClientClosed,
}

enum Action {
    Send(String),
    DropConnection,
}

pub struct FakeServer {
    pub addr: SocketAddr,
    actions: mpsc::UnboundedSender<Action>,
    frames: mpsc::UnboundedReceiver<ServerFrame>,
}

#[allow(dead_code)]
impl FakeServer {
    pub async fn start(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (actions_tx, actions_rx) = mpsc::unbounded_channel();
        let (frames_tx, frames_rx) = mpsc::unbounded_channel();

        tokio::spawn(serve(listener, behavior, actions_rx, frames_tx));

        Self {
            addr,
            actions: actions_tx,
            frames: frames_rx,
        }
    }

    /// Client config pointing at this server with fast reconnects.
    pub fn config(&self) -> ServerConfig {
        ServerConfig::default()
            .with_url(format!("http://{}", self.addr))
            .with_reconnect_delay(Duration::from_millis(20))
            .with_handshake_timeout(Duration::from_secs(2))
    }

    pub fn send_raw(&self, frame: &str) {
        let _ = self.actions.send(Action::Send(frame.to_string()));
    }

    /// Emit a Socket.IO event on the default namespace.
    pub fn send_event(&self, name: &str, payload: Value) {
        let packet = Value::Array(vec![Value::String(name.to_string()), payload]);
        self.send_raw(&format!("42{}", packet));
    }

    /// Close the current client connection from the server side.
    pub fn drop_connection(&self) {
        let _ = self.actions.send(Action::DropConnection);
    }

    pub async fn next_frame(&mut self) -> ServerFrame {
        tokio::time::timeout(DEADLINE, self.frames.recv())
            .await
            .expect("timed out waiting for client frame")
            .expect("server task ended")
    }

    /// Next frame if one arrives within `wait`.
    pub async fn try_next_frame(&mut self, wait: Duration) -> Option<ServerFrame> {
        tokio::time::timeout(wait, self.frames.recv())
            .await
            .ok()
            .flatten()
    }
}

async fn serve(
    listener: TcpListener,
    behavior: Behavior,
    mut actions: mpsc::UnboundedReceiver<Action>,
    frames: mpsc::UnboundedSender<ServerFrame>,
) {
    loop {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };
        let Ok(mut ws) = accept_async(stream).await else {
            continue;
        };

        if let Behavior::Silent = behavior {
            while let Some(Ok(_)) = ws.next().await {}
            continue;
        }

        if ws.send(Message::Text(OPEN_PACKET.to_string())).await.is_err() {
            continue;
        }

        let joined = loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) if text == "40" => break true,
                Some(Ok(_)) => continue,
                _ => break false,
            }
        };
        if !joined {
            continue;
        }

        if let Behavior::RejectConnect(message) = &behavior {
            let payload = serde_json::json!({ "message": message });
            let _ = ws.send(Message::Text(format!("44{}", payload))).await;
            let _ = ws.close(None).await;
            continue;
        }

        if let Behavior::SendBeforeAck(early) = &behavior {
            for frame in early {
                let _ = ws.send(Message::Text(frame.clone())).await;
            }
        }

        if ws.send(Message::Text(CONNECT_ACK.to_string())).await.is_err() {
            continue;
        }
        let _ = frames.send(ServerFrame::Connected);

        let (mut sink, mut stream) = ws.split();
        loop {
            tokio::select! {
                action = actions.recv() => match action {
                    Some(Action::Send(text)) => {
                        if sink.send(Message::Text(text)).await.is_err() {
                            let _ = frames.send(ServerFrame::ClientClosed);
                            break;
                        }
                    }
                    Some(Action::DropConnection) => {
                        let _ = sink.close().await;
                        break;
                    }
                    None => return,
                },
                msg = stream.next() => match msg {
                    Some(Ok(Message::Text(text))) => {
                        let _ = frames.send(ServerFrame::Text(text));
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => {
                        let _ = frames.send(ServerFrame::ClientClosed);
                        break;
                    }
                    Some(Ok(_)) => {}
                },
            }
        }
    }
}
