//! Error types for fixture steps.

use deskfix_registry::RegistryError;
use thiserror::Error;

use crate::driver::DriverError;

/// Errors that abort a fixture step.
#[derive(Debug, Error)]
pub enum FixtureError {
	/// Registry access or action resolution failed.
	#[error(transparent)]
	Registry(#[from] RegistryError),

	/// An error-severity message was shown with no configured response.
	#[error("error message with no configured response, assumed unexpected: {code} [{text}]")]
	UnhandledErrorMessage {
		/// Upper-cased message code.
		code: String,
		/// Message text as shown to the user.
		text: String,
	},

	/// The GUI driver reported a failure.
	#[error("driver: {0}")]
	Driver(#[from] DriverError),

	/// A step needed a window handle that has not been set.
	#[error("no {0} window is set; start the application first")]
	WindowNotSet(&'static str),

	/// A window-opening step did not open any window.
	#[error("failed to open window {title}")]
	WindowNotOpened {
		/// Title the step expected.
		title: String,
	},

	/// A window-opening step opened a different window.
	#[error("failed to open window {expected}; opened window {actual} instead")]
	WindowMismatch {
		/// Title the step expected.
		expected: String,
		/// Title of the window that opened.
		actual: String,
	},
}

/// Result type for fixture operations.
pub type Result<T> = std::result::Result<T, FixtureError>;
