use chrono::Utc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::types::{ClientIdentity, ConnectionState, LocalControlState, ServerSnapshot};
use crate::socketio::{ButtonToggle, DatetimeChange, OutboundEvent};
use crate::traits::{Transport, TransportEvent};

/// Misuse of the controller lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session already initialized")]
    AlreadyInitialized,
    #[error("session has been torn down")]
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Active,
    Disposed,
}

/// Owns the one connection of a view and mirrors its state.
///
/// The controller is driven from a single task: transport events go through
/// [`handle_event`](Self::handle_event), user intents through
/// [`toggle_button`](Self::toggle_button) and
/// [`set_datetime`](Self::set_datetime). Nothing here blocks.
pub struct SessionController {
    client_id: ClientIdentity,
    connection: ConnectionState,
    snapshot: ServerSnapshot,
    controls: LocalControlState,
    transport: Option<Box<dyn Transport>>,
    lifecycle: Lifecycle,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    /// Create a controller with a fresh client identity.
    pub fn new() -> Self {
        Self::with_client_id(ClientIdentity::generate())
    }

    pub fn with_client_id(client_id: ClientIdentity) -> Self {
        Self {
            client_id,
            connection: ConnectionState::Disconnected,
            snapshot: ServerSnapshot::default(),
            controls: LocalControlState::default(),
            transport: None,
            lifecycle: Lifecycle::Created,
        }
    }

    /// Take ownership of the connection handle.
    ///
    /// Called once per view. Connection progress is reported afterwards
    /// through [`handle_event`](Self::handle_event).
    pub fn initialize(&mut self, transport: Box<dyn Transport>) -> Result<(), SessionError> {
        match self.lifecycle {
            Lifecycle::Active => return Err(SessionError::AlreadyInitialized),
            Lifecycle::Disposed => return Err(SessionError::Disposed),
            Lifecycle::Created => {}
        }
        info!("Initializing session for client {}", self.client_id);
        self.transport = Some(transport);
        self.lifecycle = Lifecycle::Active;
        Ok(())
    }

    /// Apply a transport event.
    ///
    /// Returns `false` when the event was ignored because the controller is
    /// not active (before `initialize` or after `teardown`).
    pub fn handle_event(&mut self, event: TransportEvent) -> bool {
        if self.lifecycle != Lifecycle::Active {
            debug!("Ignoring {:?} on inactive session", event);
            return false;
        }

        match event {
            TransportEvent::Open => {
                info!("Connected to server");
                self.connection = ConnectionState::Connected;
            }
            TransportEvent::Close => {
                info!("Disconnected from server");
                self.connection = ConnectionState::Disconnected;
            }
            TransportEvent::Error { message } => {
                warn!("Connection error: {}", message);
                self.connection = ConnectionState::Disconnected;
            }
            TransportEvent::Snapshot(snapshot) => {
                debug!("Received snapshot: {:?}", snapshot);
                self.snapshot = snapshot;
            }
            TransportEvent::ButtonAck(data) => {
                info!("Button acknowledged: {}", data);
            }
            TransportEvent::DatetimeAck(data) => {
                info!("Datetime acknowledged: {}", data);
            }
        }
        true
    }

    /// Flip the button locally and tell the server when connected.
    ///
    /// Returns whether an event was emitted.
    pub fn toggle_button(&mut self) -> bool {
        self.controls.button_state = !self.controls.button_state;
        let state = self.controls.button_state;

        if !self.connection.is_connected() {
            debug!("Button toggled to {} while disconnected", state);
            return false;
        }

        let event = OutboundEvent::ButtonToggle(ButtonToggle::new(
            state,
            &self.client_id,
            Utc::now(),
        ));
        let emitted = self.emit(event);
        if emitted {
            info!("Button toggled to: {}", state);
        }
        emitted
    }

    /// Record a new datetime selection and tell the server when connected.
    ///
    /// An empty value means "no selection" and is never sent. Returns
    /// whether an event was emitted.
    pub fn set_datetime(&mut self, value: impl Into<String>) -> bool {
        self.controls.datetime_value = value.into();

        if !self.connection.is_connected() || self.controls.datetime_value.is_empty() {
            return false;
        }

        let event = OutboundEvent::DatetimeChange(DatetimeChange::new(
            self.controls.datetime_value.clone(),
            &self.client_id,
            Utc::now(),
        ));
        let emitted = self.emit(event);
        if emitted {
            info!("Datetime changed to: {}", self.controls.datetime_value);
        }
        emitted
    }

    /// Release the connection. Safe in any state; later calls are no-ops.
    pub fn teardown(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        info!("Cleaning up session connection");
        if let Some(transport) = self.transport.take() {
            transport.shutdown();
        }
        self.connection = ConnectionState::Disconnected;
        self.lifecycle = Lifecycle::Disposed;
    }

    fn emit(&self, event: OutboundEvent) -> bool {
        let Some(transport) = self.transport.as_ref() else {
            return false;
        };
        let name = event.name();
        match transport.emit(event) {
            Ok(()) => true,
            Err(e) if e.is_transport_unavailable() => {
                warn!("Server unavailable, '{}' not sent: {}", name, e);
                false
            }
            Err(e) => {
                error!("Failed to emit '{}': {}", name, e);
                false
            }
        }
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    pub fn snapshot(&self) -> &ServerSnapshot {
        &self.snapshot
    }

    pub fn controls(&self) -> &LocalControlState {
        &self.controls
    }

    pub fn client_id(&self) -> &ClientIdentity {
        &self.client_id
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle == Lifecycle::Disposed
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.teardown();
    }
}
