//! Test data items.
//!
//! A [`DataItem`] is one named datum a test step can reference instead of a
//! literal value. Names are typically of the form `Page: Field` and are
//! normalized by [`normalize_name`] so `Setup Page: User Id` and
//! `setuppage:userid` address the same item.

use std::fmt;

/// Normalizes a data item name into its lookup key.
///
/// All whitespace is removed and the result is lowercased.
pub fn normalize_name(name: &str) -> String {
	name.chars()
		.filter(|c| !c.is_whitespace())
		.flat_map(char::to_lowercase)
		.collect()
}

/// Action tag attached to a data item.
///
/// Only [`Action::Today`] is interpreted centrally by the resolver. The
/// remaining tags are passed through to the driving layer, which applies them
/// against its own control semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Action {
	/// Use the value as-is.
	#[default]
	Value,
	/// Today's date, offset by the extension in days.
	Today,
	/// Select the first available option.
	First,
	/// Select the last available option.
	Last,
	/// Any other tag, stored upper-cased.
	Custom(String),
}

impl Action {
	/// Parses an action tag. Blank tags become [`Action::Value`].
	pub fn parse(tag: &str) -> Self {
		let tag = tag.trim().to_uppercase();
		match tag.as_str() {
			"" | "VALUE" => Self::Value,
			"TODAY" => Self::Today,
			"FIRST" => Self::First,
			"LAST" => Self::Last,
			_ => Self::Custom(tag),
		}
	}

	/// Returns the upper-case tag.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Value => "VALUE",
			Self::Today => "TODAY",
			Self::First => "FIRST",
			Self::Last => "LAST",
			Self::Custom(tag) => tag,
		}
	}
}

impl From<Option<&str>> for Action {
	fn from(tag: Option<&str>) -> Self {
		tag.map(Self::parse).unwrap_or_default()
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A named test datum.
///
/// Immutable once built; the registry hands out clones, never references into
/// its store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataItem {
	name: String,
	value: String,
	action: Action,
	extension: Option<String>,
	locked: bool,
}

impl DataItem {
	/// Builds an item, normalizing the name and action tag and dropping a blank
	/// extension.
	pub fn new(name: &str, value: impl Into<String>, locked: bool, action: Action, extension: Option<&str>) -> Self {
		Self {
			name: normalize_name(name),
			value: value.into(),
			action: Action::parse(action.as_str()),
			extension: extension.filter(|ext| !ext.trim().is_empty()).map(str::to_owned),
			locked,
		}
	}

	/// Normalized lookup key.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn value(&self) -> &str {
		&self.value
	}

	pub fn action(&self) -> &Action {
		&self.action
	}

	/// Auxiliary parameter for the action, if any.
	pub fn extension(&self) -> Option<&str> {
		self.extension.as_deref()
	}

	/// Whether the item is pinned against later writes.
	pub fn is_locked(&self) -> bool {
		self.locked
	}
}
