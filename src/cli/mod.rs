//! CLI module for sockview.
//!
//! The dispatcher runs early in main() to handle flags before the TUI
//! takes over the terminal:
//!
//! ```ignore
//! use sockview::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! let overrides = match run_cli_command(command) {
//!     Ok(overrides) => overrides,
//!     Err(code) => std::process::exit(code),
//! };
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, CliOverrides, USAGE};
pub use version::{handle_version_command, version_string, VERSION};

/// Run a CLI command if applicable.
///
/// Returns the overrides to start the TUI with, or the process exit code
/// when the command was handled here.
pub fn run_cli_command(command: CliCommand) -> Result<CliOverrides, i32> {
    match command {
        CliCommand::Version => {
            // This function never returns (calls exit)
            handle_version_command();
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Err(0)
        }
        CliCommand::Invalid(message) => {
            eprintln!("Error: {}\n\n{}", message, USAGE);
            Err(2)
        }
        CliCommand::RunTui(overrides) => Ok(overrides),
    }
}
