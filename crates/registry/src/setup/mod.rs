//! Loading test data for a run.
//!
//! [`SetupData`] is the write interface used by setup and test scripts.
//! Setup pages load unlocked items that later scripts may replace; test pages
//! lock the items they depend on so the setup steps they run cannot change
//! them.
//!
//! With the `setup` feature, items can also be read from TOML setup files,
//! see [`parse_setup_str`] and [`load_setup_file`].

use std::sync::Arc;

use crate::registry::Registry;

#[cfg(feature = "setup")]
mod file;

#[cfg(feature = "setup")]
pub use file::{FieldEntry, SetupError, SetupFile, load_setup_file, parse_setup_str};

/// Write interface for test data.
#[derive(Debug, Clone)]
pub struct SetupData {
	registry: Arc<Registry>,
}

impl SetupData {
	pub fn new(registry: Arc<Registry>) -> Self {
		Self { registry }
	}

	/// Loads an item that later writes may replace.
	pub fn load_unlocked(&self, name: &str, value: &str, action: Option<&str>, extension: Option<&str>) -> bool {
		self.registry.load(name, value, false, action, extension);
		true
	}

	/// Loads an item that later writes cannot replace until the registry is cleared.
	pub fn load_locked(&self, name: &str, value: &str, action: Option<&str>, extension: Option<&str>) -> bool {
		self.registry.load(name, value, true, action, extension);
		true
	}

	pub fn field_value(&self, name: &str, value: &str) -> bool {
		self.load_unlocked(name, value, None, None)
	}

	pub fn field_value_action(&self, name: &str, value: &str, action: &str) -> bool {
		self.load_unlocked(name, value, Some(action), None)
	}

	pub fn field_value_action_extension(&self, name: &str, value: &str, action: &str, extension: &str) -> bool {
		self.load_unlocked(name, value, Some(action), Some(extension))
	}

	pub fn lock_field_value(&self, name: &str, value: &str) -> bool {
		self.load_locked(name, value, None, None)
	}

	pub fn lock_field_value_action(&self, name: &str, value: &str, action: &str) -> bool {
		self.load_locked(name, value, Some(action), None)
	}

	pub fn lock_field_value_action_extension(&self, name: &str, value: &str, action: &str, extension: &str) -> bool {
		self.load_locked(name, value, Some(action), Some(extension))
	}
}
