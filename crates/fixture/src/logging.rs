//! Tracing setup for fixture runs.
//!
//! Fixture output is written through `tracing`. [`init`] installs a
//! subscriber that appends to a log file when one is configured and can be
//! opened, and writes to stderr otherwise. The `DESKFIX_LOG` environment
//! variable overrides the configured filter.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "DESKFIX_LOG";

const DEFAULT_FILTER: &str = "deskfix_fixture=info,deskfix_registry=info,warn";

/// Logging settings.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
	/// `EnvFilter` directive used when `DESKFIX_LOG` is unset.
	pub filter: Option<String>,
	/// File to append to, e.g. `fixture.log`.
	pub file: Option<PathBuf>,
}

impl LogConfig {
	fn env_filter(&self) -> EnvFilter {
		EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(self.filter.as_deref().unwrap_or(DEFAULT_FILTER)))
	}
}

/// Installs the global subscriber. Returns `false` if one was already installed.
///
/// If the configured log file cannot be opened, logs go to stderr and the
/// failure is reported there as a warning.
pub fn init(config: &LogConfig) -> bool {
	let mut file_error = None;
	if let Some(path) = &config.file {
		match open_log_file(path) {
			Ok(file) => {
				let file_layer = tracing_subscriber::fmt::layer()
					.with_writer(Mutex::new(file))
					.with_ansi(false)
					.with_target(true);
				let installed = tracing_subscriber::registry()
					.with(config.env_filter())
					.with(file_layer)
					.try_init()
					.is_ok();
				if installed {
					info!(path = ?path, "fixture tracing initialized");
				}
				return installed;
			}
			Err(error) => file_error = Some((path, error)),
		}
	}

	let installed = tracing_subscriber::fmt()
		.with_env_filter(config.env_filter())
		.with_writer(std::io::stderr)
		.try_init()
		.is_ok();
	if let Some((path, error)) = file_error {
		warn!(domain = "fixture", path = ?path, %error, "cannot open log file; logging to stderr");
	}
	installed
}

fn open_log_file(path: &Path) -> io::Result<File> {
	if let Some(parent) = path.parent()
		&& !parent.as_os_str().is_empty()
	{
		std::fs::create_dir_all(parent)?;
	}
	OpenOptions::new().create(true).append(true).open(path)
}
