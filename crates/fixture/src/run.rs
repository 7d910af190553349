//! Run-wide signals layered on the registry's run objects.
//!
//! The abort flag is cooperative: every fixture step checks it before doing
//! any work and returns its neutral value once it is set. Only clearing the
//! registry resets it.

use std::any::Any;
use std::sync::Arc;

use deskfix_registry::Registry;
use tracing::{error, warn};

use crate::error::{FixtureError, Result};

/// Run object key of the abort flag.
pub const ABORT_KEY: &str = "fixture.abort";
/// Run object key of the window subsequent steps act on.
pub const CURRENT_WINDOW_KEY: &str = "fixture.current_window";
/// Run object key of the root window that carries the menu bar.
pub const DASHBOARD_KEY: &str = "fixture.dashboard";

/// Abort flag and window handles for one run.
#[derive(Debug, Clone)]
pub struct RunCoordinator {
	registry: Arc<Registry>,
}

impl RunCoordinator {
	pub fn new(registry: Arc<Registry>) -> Self {
		Self { registry }
	}

	/// Whether a previous failure aborted the run. False until set.
	pub fn is_aborted(&self) -> bool {
		match self.registry.object::<bool>(ABORT_KEY) {
			Ok(flag) => flag.unwrap_or(false),
			Err(err) => {
				warn!(domain = "run", error = %err, "abort flag unreadable; treating run as aborted");
				true
			}
		}
	}

	/// Sets the abort flag.
	pub fn abort(&self) {
		self.registry.load_object(ABORT_KEY, Some(true));
	}

	/// Clears the abort flag without touching anything else.
	pub fn reset_abort(&self) {
		self.registry.load_object::<bool>(ABORT_KEY, None);
	}

	/// Logs a step failure, aborts the run and hands the error back for propagation.
	pub fn record_failure(&self, err: FixtureError) -> FixtureError {
		error!(domain = "run", error = %err, "fixture step failed; aborting test");
		self.abort();
		err
	}

	/// Sets or clears the current window.
	pub fn set_current_window<W: Any + Send + Sync>(&self, window: Option<W>) {
		self.registry.load_object(CURRENT_WINDOW_KEY, window);
	}

	pub fn current_window<W: Any + Clone>(&self) -> Result<Option<W>> {
		Ok(self.registry.object(CURRENT_WINDOW_KEY)?)
	}

	/// Sets or clears the dashboard window.
	pub fn set_dashboard<W: Any + Send + Sync>(&self, window: Option<W>) {
		self.registry.load_object(DASHBOARD_KEY, window);
	}

	pub fn dashboard<W: Any + Clone>(&self) -> Result<Option<W>> {
		Ok(self.registry.object(DASHBOARD_KEY)?)
	}
}
