//! Run-scoped store for test data items and run objects.
//!
//! The [`Registry`] holds two independent stores:
//!
//! - **Data items**: named [`DataItem`]s keyed by their normalized name. Items
//!   stored locked cannot be replaced until the store is cleared.
//! - **Run objects**: arbitrary payloads keyed by exact name (window handles,
//!   captured messages, the abort flag). Always overwritable; storing `None`
//!   removes the key.
//!
//! One registry is created per test run and shared by reference (usually an
//! `Arc<Registry>`) with every component that needs it.
//!
//! # Concurrency
//!
//! Each store sits behind its own `Mutex`, held only for the duration of a
//! single load, read or clear.

use std::any::{Any, type_name};
use std::fmt;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::item::{Action, DataItem, normalize_name};


/// A type-erased run object plus the name of the type it was stored as.
struct RunObject {
	value: Box<dyn Any + Send + Sync>,
	type_name: &'static str,
}

/// Store for the data items and run objects of one test run.
#[derive(Default)]
pub struct Registry {
	data: Mutex<FxHashMap<String, DataItem>>,
	objects: Mutex<FxHashMap<String, RunObject>>,
}

impl Registry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Loads a data item.
	///
	/// The name is normalized and a missing or blank action becomes `VALUE`.
	/// If the existing entry for the name is locked the call does nothing.
	pub fn load(&self, name: &str, value: impl Into<String>, locked: bool, action: Option<&str>, extension: Option<&str>) {
		self.load_item(DataItem::new(name, value, locked, Action::from(action), extension));
	}

	/// Loads a prebuilt data item, honoring the same lock rule as [`Registry::load`].
	///
	/// Returns `false` if a locked entry kept the write from being stored.
	pub fn load_item(&self, item: DataItem) -> bool {
		let mut data = self.data.lock();
		if let Some(existing) = data.get(item.name())
			&& existing.is_locked()
		{
			debug!(domain = "testdata", name = item.name(), "data item is locked; ignoring write");
			return false;
		}
		debug!(
			domain = "testdata",
			name = item.name(),
			action = %item.action(),
			locked = item.is_locked(),
			"loaded data item",
		);
		data.insert(item.name().to_owned(), item);
		true
	}

	/// Returns a detached copy of the data item stored under `name`.
	pub fn data_item(&self, name: &str) -> Option<DataItem> {
		self.data.lock().get(&normalize_name(name)).cloned()
	}

	/// Returns the value of the data item stored under `name`.
	pub fn data_value(&self, name: &str) -> Option<String> {
		self.data_item(name).map(|item| item.value().to_owned())
	}

	/// Number of stored data items.
	pub fn data_len(&self) -> usize {
		self.data.lock().len()
	}

	/// Stores a run object, replacing any previous value.
	///
	/// Passing `None` removes the key.
	pub fn load_object<T>(&self, name: &str, value: Option<T>)
	where
		T: Any + Send + Sync,
	{
		let mut objects = self.objects.lock();
		match value {
			Some(value) => {
				objects.insert(
					name.to_owned(),
					RunObject {
						value: Box::new(value),
						type_name: type_name::<T>(),
					},
				);
			}
			None => {
				objects.remove(name);
			}
		}
	}

	/// Reads back a run object as `T`.
	///
	/// Returns `Ok(None)` when the key is missing and
	/// [`RegistryError::TypeMismatch`] when it holds another type.
	pub fn object<T>(&self, name: &str) -> Result<Option<T>>
	where
		T: Any + Clone,
	{
		let objects = self.objects.lock();
		let Some(entry) = objects.get(name) else {
			return Ok(None);
		};
		match entry.value.downcast_ref::<T>() {
			Some(value) => Ok(Some(value.clone())),
			None => Err(RegistryError::TypeMismatch {
				name: name.to_owned(),
				expected: type_name::<T>(),
				found: entry.type_name,
			}),
		}
	}

	/// Replaces the run object under `name` with `f(current)` in one locked step.
	///
	/// `f` runs with the object store locked and must not touch the registry.
	/// Returning `None` removes the key. If the stored object is not a `T` it
	/// is left in place and [`RegistryError::TypeMismatch`] is returned.
	pub fn update_object<T, F>(&self, name: &str, f: F) -> Result<()>
	where
		T: Any + Send + Sync,
		F: FnOnce(Option<T>) -> Option<T>,
	{
		let mut objects = self.objects.lock();
		let current = match objects.remove(name) {
			None => None,
			Some(RunObject { value, type_name: found }) => match value.downcast::<T>() {
				Ok(value) => Some(*value),
				Err(value) => {
					objects.insert(name.to_owned(), RunObject { value, type_name: found });
					return Err(RegistryError::TypeMismatch {
						name: name.to_owned(),
						expected: type_name::<T>(),
						found,
					});
				}
			},
		};
		if let Some(next) = f(current) {
			objects.insert(
				name.to_owned(),
				RunObject {
					value: Box::new(next),
					type_name: type_name::<T>(),
				},
			);
		}
		Ok(())
	}

	/// Whether a run object is stored under `name`.
	pub fn contains_object(&self, name: &str) -> bool {
		self.objects.lock().contains_key(name)
	}

	/// Number of stored run objects.
	pub fn object_len(&self) -> usize {
		self.objects.lock().len()
	}

	/// Drops every data item, locked or not.
	pub fn clear_data(&self) {
		*self.data.lock() = FxHashMap::default();
	}

	/// Drops every run object.
	pub fn clear_objects(&self) {
		*self.objects.lock() = FxHashMap::default();
	}

	/// Resets both stores. Call at the start and end of each run.
	pub fn clear(&self) {
		self.clear_data();
		self.clear_objects();
		debug!(domain = "testdata", "registry cleared");
	}
}

impl fmt::Debug for Registry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registry")
			.field("data", &self.data_len())
			.field("objects", &self.object_len())
			.finish()
	}
}
