//! Startup concerns: connection configuration and logging.
//!
//! - [`config`] - `ServerConfig` from environment variables
//! - [`logging`] - tracing subscriber writing to a log file

pub mod config;
pub mod logging;

pub use config::ServerConfig;
pub use logging::{default_log_dir, init_logging};

use std::path::Path;
use tracing::info;

/// Install file logging, then read the configuration from the environment.
///
/// Logging comes first so warnings about bad `SOCKVIEW_*` values end up in
/// the log file. A missing log directory or a failed subscriber install
/// leaves logging disabled.
pub fn load_config(log_dir: Option<&Path>) -> ServerConfig {
    if let Some(dir) = log_dir {
        match init_logging(dir) {
            Ok(path) => info!("Logging to {}", path.display()),
            Err(e) => eprintln!("Warning: logging disabled: {}", e),
        }
    }
    ServerConfig::from_env()
}
