//! sockview - a terminal client for live Socket.IO value streams
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod session;
pub mod socketio;
pub mod startup;
pub mod terminal;
pub mod traits;
pub mod ui;
