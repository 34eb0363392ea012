//! Mock transport for testing.
//!
//! Captures outbound events and records shutdowns so controller behaviour
//! can be asserted without a network.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::socketio::OutboundEvent;
use crate::traits::{Transport, TransportError};

/// Mock transport for testing.
///
/// Clones share state, so a test can hand one clone to the controller and
/// keep another to inspect what was emitted.
///
/// # Example
///
/// ```
/// use sockview::adapters::MockTransport;
/// use sockview::session::SessionController;
/// use sockview::traits::TransportEvent;
///
/// let mock = MockTransport::new();
/// let mut session = SessionController::new();
/// session.initialize(Box::new(mock.clone())).unwrap();
///
/// session.handle_event(TransportEvent::Open);
/// session.toggle_button();
/// assert_eq!(mock.emitted().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    emitted: Arc<Mutex<Vec<OutboundEvent>>>,
    shutdowns: Arc<AtomicUsize>,
    emit_should_fail: Arc<AtomicBool>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events emitted so far.
    pub fn emitted(&self) -> Vec<OutboundEvent> {
        self.emitted
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn clear_emitted(&self) {
        if let Ok(mut events) = self.emitted.lock() {
            events.clear();
        }
    }

    /// Number of times `shutdown` was called.
    pub fn shutdown_count(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }

    /// Configure whether emit should fail.
    pub fn set_emit_should_fail(&self, should_fail: bool) {
        self.emit_should_fail.store(should_fail, Ordering::SeqCst);
    }
}

impl Transport for MockTransport {
    fn emit(&self, event: OutboundEvent) -> Result<(), TransportError> {
        if self.emit_should_fail.load(Ordering::SeqCst) {
            return Err(TransportError::SendFailed("mock emit failure".to_string()));
        }
        self.emitted
            .lock()
            .map_err(|_| TransportError::SendFailed("mock poisoned".to_string()))?
            .push(event);
        Ok(())
    }

    fn shutdown(&self) {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
    }
}
