//! Action resolution.
//!
//! Turns a data item into the value a test step should use. Only actions that
//! do not depend on the kind of control being driven are computed here
//! (currently `TODAY`); everything else resolves to the stored value and
//! carries its tag and extension through [`Resolved`] so the driving layer
//! can apply it (selecting the first or last option of a list, and so on).

use std::str::FromStr;
use std::sync::Arc;

use chrono::{Local, NaiveDate, TimeDelta};

use crate::error::{RegistryError, Result};
use crate::item::{Action, DataItem};
use crate::registry::Registry;


/// Format used for dates produced by the `TODAY` action.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Source of the current date.
pub trait Clock: Send + Sync {
	/// Returns today's date.
	fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn today(&self) -> NaiveDate {
		Local::now().date_naive()
	}
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
	fn today(&self) -> NaiveDate {
		self.0
	}
}

/// Effective value of a data item, together with the action that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
	name: String,
	value: String,
	action: Action,
	extension: Option<String>,
}

impl Resolved {
	/// The value a test step should use.
	pub fn value(&self) -> &str {
		&self.value
	}

	pub fn into_value(self) -> String {
		self.value
	}

	pub fn action(&self) -> &Action {
		&self.action
	}

	pub fn extension(&self) -> Option<&str> {
		self.extension.as_deref()
	}

	/// Parses the extension as `T`.
	///
	/// Returns `Ok(None)` when the item has no extension and
	/// [`RegistryError::InvalidActionExtension`] when it does not parse.
	pub fn extension_as<T: FromStr>(&self) -> Result<Option<T>> {
		parse_extension(&self.name, &self.action, self.extension.as_deref())
	}
}

fn parse_extension<T: FromStr>(name: &str, action: &Action, extension: Option<&str>) -> Result<Option<T>> {
	let Some(raw) = extension else {
		return Ok(None);
	};
	raw.trim().parse().map(Some).map_err(|_| RegistryError::InvalidActionExtension {
		name: name.to_owned(),
		action: action.to_string(),
		extension: raw.to_owned(),
	})
}

/// Resolves data item names and actions against a [`Registry`].
#[derive(Clone)]
pub struct ActionResolver {
	registry: Arc<Registry>,
	clock: Arc<dyn Clock>,
}

impl ActionResolver {
	/// Creates a resolver using the local system date.
	pub fn new(registry: Arc<Registry>) -> Self {
		Self::with_clock(registry, Arc::new(SystemClock))
	}

	/// Creates a resolver with an explicit clock.
	pub fn with_clock(registry: Arc<Registry>, clock: Arc<dyn Clock>) -> Self {
		Self { registry, clock }
	}

	/// Computes the effective value of `item`.
	pub fn resolve(&self, item: &DataItem) -> Result<Resolved> {
		let value = match item.action() {
			Action::Today => {
				let offset = parse_extension::<i64>(item.name(), item.action(), item.extension())?.unwrap_or(0);
				let date = TimeDelta::try_days(offset)
					.and_then(|delta| self.clock.today().checked_add_signed(delta))
					.ok_or_else(|| RegistryError::InvalidActionExtension {
						name: item.name().to_owned(),
						action: item.action().to_string(),
						extension: offset.to_string(),
					})?;
				date.format(DATE_FORMAT).to_string()
			}
			_ => item.value().to_owned(),
		};
		Ok(Resolved {
			name: item.name().to_owned(),
			value,
			action: item.action().clone(),
			extension: item.extension().map(str::to_owned),
		})
	}

	/// Looks up `name` and resolves it, or returns `None` if no item exists.
	pub fn lookup(&self, name: &str) -> Result<Option<Resolved>> {
		self.registry.data_item(name).map(|item| self.resolve(&item)).transpose()
	}

	/// Resolves `name_or_literal` to a value.
	///
	/// If no data item matches, the input itself is the value.
	pub fn resolve_name(&self, name_or_literal: &str) -> Result<String> {
		Ok(match self.lookup(name_or_literal)? {
			Some(resolved) => resolved.into_value(),
			None => name_or_literal.to_owned(),
		})
	}

	/// Action tag of the item named `name`, if one exists.
	pub fn action_of(&self, name: &str) -> Option<Action> {
		self.registry.data_item(name).map(|item| item.action().clone())
	}

	pub fn registry(&self) -> &Arc<Registry> {
		&self.registry
	}
}

impl std::fmt::Debug for ActionResolver {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ActionResolver")
			.field("registry", &self.registry)
			.field("today", &self.clock.today())
			.finish()
	}
}
