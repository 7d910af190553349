//! Error types for test data and run object access.

use thiserror::Error;

/// Errors raised while reading the registry or resolving actions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
	/// A run object was read back as a type other than the one it was stored as.
	#[error("run object '{name}' is a {found}, not a {expected}")]
	TypeMismatch {
		/// Key of the run object.
		name: String,
		/// Type requested by the caller.
		expected: &'static str,
		/// Type the object was stored as.
		found: &'static str,
	},

	/// An action extension could not be converted to the type the action needs.
	#[error("invalid extension '{extension}' for action {action} on data item '{name}'")]
	InvalidActionExtension {
		/// Normalized name of the data item.
		name: String,
		/// Action tag of the data item.
		action: String,
		/// The raw extension text.
		extension: String,
	},
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
