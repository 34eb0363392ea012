//! Application state for the terminal view.
//!
//! [`App`] wraps the [`SessionController`] with the bits only the view
//! cares about: which control has focus, the datetime draft being typed,
//! and whether the user asked to quit.

mod datetime;
mod handlers;

pub use datetime::{describe_datetime, parse_datetime_local, DATETIME_FORMAT_HINT};

use crate::session::SessionController;
use crate::startup::ServerConfig;
use crate::traits::TransportEvent;

/// Which control receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Button,
    Datetime,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Button => Focus::Datetime,
            Focus::Datetime => Focus::Button,
        }
    }
}

/// Terminal view state.
pub struct App {
    pub session: SessionController,
    pub focus: Focus,
    /// Text typed into the datetime field, committed on Enter
    pub datetime_draft: String,
    /// Validation message for the datetime field
    pub input_error: Option<String>,
    /// Endpoint shown in the debug panel
    pub endpoint: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: SessionController, config: &ServerConfig) -> Self {
        Self {
            session,
            focus: Focus::default(),
            datetime_draft: String::new(),
            input_error: None,
            endpoint: config.endpoint_url(),
            should_quit: false,
        }
    }

    pub fn handle_transport_event(&mut self, event: TransportEvent) {
        self.session.handle_event(event);
    }

    /// The datetime field only accepts input while connected.
    pub fn datetime_enabled(&self) -> bool {
        self.session.is_connected()
    }

    /// Commit the draft through the session.
    ///
    /// Invalid drafts are kept for editing and reported in `input_error`.
    /// Committing the value already selected is a no-op.
    pub fn commit_datetime(&mut self) {
        let draft = self.datetime_draft.trim().to_string();
        if draft == self.session.controls().datetime_value {
            self.input_error = None;
            return;
        }
        if draft.is_empty() {
            self.input_error = None;
            self.session.set_datetime("");
            return;
        }

        match parse_datetime_local(&draft) {
            Some(_) => {
                self.input_error = None;
                self.datetime_draft = draft.clone();
                self.session.set_datetime(draft);
            }
            None => {
                self.input_error = Some(format!("Expected {}", DATETIME_FORMAT_HINT));
            }
        }
    }

    /// Clear the field, which records "no selection".
    pub fn clear_datetime(&mut self) {
        self.datetime_draft.clear();
        self.input_error = None;
        self.session.set_datetime("");
    }

    /// Release the connection before the view goes away.
    pub fn shutdown(&mut self) {
        self.session.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockTransport;
    use crate::session::ClientIdentity;

    pub(crate) fn test_app() -> (App, MockTransport) {
        let mock = MockTransport::new();
        let mut session = SessionController::with_client_id(ClientIdentity::from("client-1"));
        session.initialize(Box::new(mock.clone())).unwrap();
        (App::new(session, &ServerConfig::default()), mock)
    }

    #[test]
    fn test_focus_cycles() {
        assert_eq!(Focus::Button.next(), Focus::Datetime);
        assert_eq!(Focus::Datetime.next(), Focus::Button);
    }

    #[test]
    fn test_datetime_enabled_follows_connection() {
        let (mut app, _mock) = test_app();
        assert!(!app.datetime_enabled());
        app.handle_transport_event(TransportEvent::Open);
        assert!(app.datetime_enabled());
    }

    #[test]
    fn test_commit_valid_datetime_emits() {
        let (mut app, mock) = test_app();
        app.handle_transport_event(TransportEvent::Open);
        app.datetime_draft = "2024-01-01T10:00".to_string();

        app.commit_datetime();

        assert_eq!(app.session.controls().datetime_value, "2024-01-01T10:00");
        assert!(app.input_error.is_none());
        assert_eq!(mock.emitted().len(), 1);
    }

    #[test]
    fn test_recommitting_unchanged_datetime_does_not_emit() {
        let (mut app, mock) = test_app();
        app.handle_transport_event(TransportEvent::Open);
        app.datetime_draft = "2024-01-01T10:00".to_string();

        app.commit_datetime();
        app.commit_datetime();
        assert_eq!(mock.emitted().len(), 1);

        app.datetime_draft = "2024-01-01T11:00".to_string();
        app.commit_datetime();
        assert_eq!(mock.emitted().len(), 2);
        assert_eq!(app.session.controls().datetime_value, "2024-01-01T11:00");
    }

    #[test]
    fn test_commit_invalid_datetime_keeps_draft() {
        let (mut app, mock) = test_app();
        app.handle_transport_event(TransportEvent::Open);
        app.datetime_draft = "tomorrow".to_string();

        app.commit_datetime();

        assert_eq!(app.datetime_draft, "tomorrow");
        assert!(app.input_error.is_some());
        assert_eq!(app.session.controls().datetime_value, "");
        assert!(mock.emitted().is_empty());
    }

    #[test]
    fn test_clear_datetime_records_empty_without_emit() {
        let (mut app, mock) = test_app();
        app.handle_transport_event(TransportEvent::Open);
        app.datetime_draft = "2024-01-01T10:00".to_string();
        app.commit_datetime();
        mock.clear_emitted();

        app.clear_datetime();

        assert_eq!(app.session.controls().datetime_value, "");
        assert!(mock.emitted().is_empty());
    }

    #[test]
    fn test_shutdown_tears_down_session() {
        let (mut app, mock) = test_app();
        app.shutdown();
        assert!(app.session.is_disposed());
        assert_eq!(mock.shutdown_count(), 1);
    }
}
