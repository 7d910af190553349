//! Boundary to the GUI automation layer.
//!
//! The fixture never locates or manipulates controls itself. A [`Driver`]
//! implementation does that against a concrete toolkit; the fixture resolves
//! test data, gates steps on the abort flag and tracks window handles.

use thiserror::Error;

/// Failure reported by a [`Driver`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
	/// No control of the given kind carries the label.
	#[error("{kind} '{label}' not found")]
	NotFound {
		/// Kind of control, e.g. `button`.
		kind: &'static str,
		/// Label that was looked up.
		label: String,
	},

	/// Any other toolkit failure.
	#[error("{0}")]
	Failed(String),
}

pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Text shown for an item of a list, combo box or table.
pub trait HasDisplayValue {
	fn display_value(&self) -> String;
}

impl HasDisplayValue for String {
	fn display_value(&self) -> String {
		self.clone()
	}
}

impl HasDisplayValue for &str {
	fn display_value(&self) -> String {
		(*self).to_owned()
	}
}

/// Which option a selection step picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
	First,
	Last,
	/// The option whose display value matches the text.
	Text(&'a str),
}

/// Login details for starting the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
	pub user: String,
	pub password: String,
}

/// Operations the fixture needs from the GUI automation layer.
///
/// Methods returning `bool` report whether the control ended up in the
/// requested state.
pub trait Driver {
	/// Opaque handle to an on-screen window.
	type Window: Clone + Send + Sync + 'static;

	/// Starts the application and logs in. Returns the main window, if one appeared.
	fn launch(&mut self, credentials: &Credentials) -> DriverResult<Option<Self::Window>>;

	/// Shuts the application down.
	fn exit(&mut self) -> DriverResult<()>;

	fn title(&self, window: &Self::Window) -> DriverResult<String>;

	/// Structural description of the window's controls.
	fn describe(&self, window: &Self::Window) -> DriverResult<String>;

	fn type_into(&mut self, window: &Self::Window, label: &str, text: &str) -> DriverResult<bool>;

	fn click(&mut self, window: &Self::Window, label: &str) -> DriverResult<bool>;

	/// Clicks a button and returns the window it opened.
	fn click_opening(&mut self, window: &Self::Window, label: &str) -> DriverResult<Option<Self::Window>>;

	/// Triggers a menu item (or one of its submenu items) and returns the window it opened.
	fn open_menu(&mut self, window: &Self::Window, menu: &str, submenu: Option<&str>) -> DriverResult<Option<Self::Window>>;

	/// Items of the list-like control with the given label.
	fn options(&self, window: &Self::Window, label: &str) -> DriverResult<Vec<Box<dyn HasDisplayValue>>>;

	fn select(&mut self, window: &Self::Window, label: &str, selection: Selection<'_>) -> DriverResult<bool>;

	fn select_tab(&mut self, window: &Self::Window, label: &str) -> DriverResult<bool>;

	fn set_checked(&mut self, window: &Self::Window, label: &str, checked: bool) -> DriverResult<bool>;
}
