//! Log file setup.
//!
//! The terminal belongs to the TUI, so tracing output goes to a file under
//! the user's local data directory instead of stderr.

use color_eyre::eyre::{eyre, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "sockview.log";
const DEFAULT_FILTER: &str = "sockview=info";

/// Directory holding the log file, e.g. `~/.local/share/sockview`.
pub fn default_log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("sockview"))
}

/// Filter from `RUST_LOG`, falling back to `sockview=info`.
pub fn build_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Create the directory if needed and open the log file for appending.
pub fn open_log_file(dir: &Path) -> std::io::Result<(File, PathBuf)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Install the global subscriber writing to `dir/sockview.log`.
///
/// Returns the log file path.
pub fn init_logging(dir: &Path) -> Result<PathBuf> {
    let (file, path) = open_log_file(dir)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| eyre!("failed to install log subscriber: {}", e))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_log_file_creates_directory() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("nested").join("logs");

        let (mut file, path) = open_log_file(&dir).unwrap();
        writeln!(file, "hello").unwrap();

        assert_eq!(path, dir.join("sockview.log"));
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_appends() {
        let temp = tempfile::tempdir().unwrap();

        let (mut first, path) = open_log_file(temp.path()).unwrap();
        writeln!(first, "one").unwrap();
        drop(first);
        let (mut second, _) = open_log_file(temp.path()).unwrap();
        writeln!(second, "two").unwrap();
        drop(second);

        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents, "one\ntwo\n");
    }

    #[test]
    fn test_default_log_dir_ends_with_app_name() {
        if let Some(dir) = default_log_dir() {
            assert!(dir.ends_with("sockview"));
        }
    }
}
