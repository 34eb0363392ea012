//! Command-line argument parsing for sockview.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use crate::startup::ServerConfig;

/// Connection settings given on the command line.
///
/// These take precedence over the environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub url: Option<String>,
    pub path: Option<String>,
}

impl CliOverrides {
    pub fn apply(&self, mut config: ServerConfig) -> ServerConfig {
        if let Some(url) = &self.url {
            config = config.with_url(url.clone());
        }
        if let Some(path) = &self.path {
            config = config.with_path(path.clone());
        }
        config
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// A flag was missing its value
    Invalid(String),
    /// Run the TUI application (default)
    RunTui(CliOverrides),
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Examples
///
/// ```
/// use sockview::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["sockview".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut overrides = CliOverrides::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--url" | "-u" => match args.next() {
                Some(value) => overrides.url = Some(value),
                None => return CliCommand::Invalid(format!("{} requires a value", arg)),
            },
            "--path" | "-p" => match args.next() {
                Some(value) => overrides.path = Some(value),
                None => return CliCommand::Invalid(format!("{} requires a value", arg)),
            },
            other => {
                if let Some(value) = other.strip_prefix("--url=") {
                    overrides.url = Some(value.to_string());
                } else if let Some(value) = other.strip_prefix("--path=") {
                    overrides.path = Some(value.to_string());
                }
            }
        }
    }

    CliCommand::RunTui(overrides)
}

pub const USAGE: &str = "\
Usage: sockview [OPTIONS]

Options:
  -u, --url <URL>    Server base URL (env: SOCKVIEW_SERVER_URL)
  -p, --path <PATH>  Socket.IO path (env: SOCKVIEW_SOCKET_PATH)
  -V, --version      Print version
  -h, --help         Print this help

Environment:
  SOCKVIEW_SERVER_PORT, SOCKVIEW_RECONNECT_DELAY_MS,
  SOCKVIEW_RECONNECT_ATTEMPTS, SOCKVIEW_TIMEOUT_MS, RUST_LOG";
