//! Startup ordering: config warnings must reach the log file.
//!
//! Installs the global tracing subscriber, so this file holds a single test.

use serial_test::serial;
use sockview::startup::config::ENV_TIMEOUT_MS;
use sockview::startup::{load_config, ServerConfig};
use std::env;
use std::fs;

#[test]
#[serial]
fn test_invalid_env_value_is_logged_to_file() {
    let temp = tempfile::tempdir().unwrap();
    env::remove_var("RUST_LOG");
    env::set_var(ENV_TIMEOUT_MS, "abc");

    let config = load_config(Some(temp.path()));
    env::remove_var(ENV_TIMEOUT_MS);

    assert_eq!(config.handshake_timeout, ServerConfig::default().handshake_timeout);

    let log = fs::read_to_string(temp.path().join("sockview.log")).unwrap();
    assert!(log.contains("Logging to"), "log was: {}", log);
    assert!(log.contains(ENV_TIMEOUT_MS), "log was: {}", log);
    assert!(log.contains("WARN"), "log was: {}", log);
}
