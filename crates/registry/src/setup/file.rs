//! TOML setup files.
//!
//! ```toml
//! [[field]]
//! name = "Setup Page: User Id"
//! value = "usr001"
//!
//! [[field]]
//! name = "Policy: Date"
//! action = "TODAY"
//! extension = "5"
//! locked = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::item::{Action, DataItem};
use crate::registry::Registry;

/// Errors that can occur when reading a setup file.
#[derive(Debug, Error)]
pub enum SetupError {
	/// Error reading the setup file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// An entry left a required field blank.
	#[error("field entry {index} is missing '{field}'")]
	MissingField {
		/// Zero-based position of the entry in the file.
		index: usize,
		/// The missing field.
		field: &'static str,
	},
}

/// Parsed contents of a setup file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetupFile {
	/// Entries in file order.
	#[serde(default, rename = "field")]
	pub fields: Vec<FieldEntry>,
}

/// One `[[field]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
	pub name: String,
	#[serde(default)]
	pub value: String,
	#[serde(default)]
	pub action: Option<String>,
	#[serde(default)]
	pub extension: Option<String>,
	#[serde(default)]
	pub locked: bool,
}

impl FieldEntry {
	fn to_item(&self) -> DataItem {
		DataItem::new(&self.name, self.value.as_str(), self.locked, Action::from(self.action.as_deref()), self.extension.as_deref())
	}
}

impl SetupFile {
	/// Loads every entry into `registry` in file order. Returns the number of entries stored.
	///
	/// Locked entries already in the registry are left untouched, as with any
	/// other write, and are not counted.
	pub fn apply(&self, registry: &Registry) -> usize {
		self.fields.iter().filter(|entry| registry.load_item(entry.to_item())).count()
	}
}

/// Parses a setup file from a string.
pub fn parse_setup_str(content: &str) -> Result<SetupFile, SetupError> {
	let file: SetupFile = toml::from_str(content)?;
	if let Some(index) = file.fields.iter().position(|entry| entry.name.trim().is_empty()) {
		return Err(SetupError::MissingField { index, field: "name" });
	}
	Ok(file)
}

/// Reads a setup file and loads its entries into `registry`. Returns the number of entries stored.
pub fn load_setup_file(path: &Path, registry: &Registry) -> Result<usize, SetupError> {
	let content = std::fs::read_to_string(path).map_err(|error| SetupError::Io {
		path: path.to_path_buf(),
		error,
	})?;
	let file = parse_setup_str(&content)?;
	let count = file.apply(registry);
	info!(
		domain = "testdata",
		path = %path.display(),
		entries = file.fields.len(),
		stored = count,
		"loaded setup file",
	);
	Ok(count)
}
