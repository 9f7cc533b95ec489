//! Diagnostic logging setup.
//!
//! Logs go through `tracing`. Headless commands write them to stderr; the
//! interactive session owns the terminal, so it only logs when a file is
//! given with `--log`.

use std::error::Error;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Disabled,
}

impl LogTarget {
    /// Where logs go for a command, given the `--log` flag.
    pub fn for_command(log_file: Option<&Path>, interactive: bool) -> Self {
        match log_file {
            Some(path) => LogTarget::File(path.to_path_buf()),
            None if interactive => LogTarget::Disabled,
            None => LogTarget::Stderr,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

pub fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber for `target`.
pub fn init_logging(target: &LogTarget) -> Result<(), Box<dyn Error>> {
    match target {
        LogTarget::Disabled => Ok(()),
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(env_filter())
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .try_init()?;
            Ok(())
        }
        LogTarget::File(path) => {
            let file = open_log_file(path)
                .map_err(|e| format!("Cannot open log file {}: {e}", path.display()))?;
            tracing_subscriber::registry()
                .with(env_filter())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()?;
            Ok(())
        }
    }
}
