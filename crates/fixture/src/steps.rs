//! Fixture steps called by the test runner.
//!
//! Every `name_or_*` argument is either the name of a data item or a literal;
//! see [`ActionResolver::resolve_name`]. Each step:
//!
//! 1. returns its neutral value (`false`, `None` or [`EMPTY`]) without touching
//!    the driver once the run is aborted,
//! 2. otherwise resolves its arguments and calls the [`Driver`],
//! 3. routes any failure through [`RunCoordinator::record_failure`], which
//!    aborts the run before the error is returned.

use std::sync::Arc;

use deskfix_registry::{Action, ActionResolver, Registry};
use tracing::{debug, info};

use crate::driver::{Credentials, Driver, Selection};
use crate::error::{FixtureError, Result};
use crate::message::{EMPTY, MessageInterceptor};
use crate::run::RunCoordinator;

/// Data item holding the login user name.
pub const LOGIN_USER: &str = "Login: User Name";
/// Data item holding the login password.
pub const LOGIN_PASSWORD: &str = "Login: Password";
const DEFAULT_LOGIN: &str = "test";

/// Test-runner facade over a [`Driver`].
pub struct Fixture<D: Driver> {
	driver: D,
	resolver: ActionResolver,
	messages: MessageInterceptor,
	run: RunCoordinator,
}

impl<D: Driver> Fixture<D> {
	/// Creates a fixture resolving `TODAY` against the system clock.
	pub fn new(registry: Arc<Registry>, driver: D) -> Self {
		Self::with_resolver(ActionResolver::new(registry), driver)
	}

	pub fn with_resolver(resolver: ActionResolver, driver: D) -> Self {
		let registry = Arc::clone(resolver.registry());
		Self {
			driver,
			messages: MessageInterceptor::new(Arc::clone(&registry)),
			run: RunCoordinator::new(registry),
			resolver,
		}
	}

	pub fn registry(&self) -> &Arc<Registry> {
		self.resolver.registry()
	}

	/// Dialog responder to install in the GUI layer.
	pub fn interceptor(&self) -> &MessageInterceptor {
		&self.messages
	}

	pub fn run_state(&self) -> &RunCoordinator {
		&self.run
	}

	pub fn driver(&self) -> &D {
		&self.driver
	}

	pub fn driver_mut(&mut self) -> &mut D {
		&mut self.driver
	}

	pub fn is_aborted(&self) -> bool {
		self.run.is_aborted()
	}

	fn step<T>(&mut self, name: &'static str, neutral: T, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
		if self.run.is_aborted() {
			debug!(domain = "fixture", step = name, "run aborted; skipping step");
			return Ok(neutral);
		}
		f(self).map_err(|err| self.run.record_failure(err))
	}

	fn resolve(&self, name_or_literal: &str) -> Result<String> {
		Ok(self.resolver.resolve_name(name_or_literal)?)
	}

	fn current_window(&self) -> Result<D::Window> {
		self.run.current_window()?.ok_or(FixtureError::WindowNotSet("current"))
	}

	/// Makes `opened` the current window and checks its title.
	fn expect_window(&mut self, title: String, opened: Option<D::Window>) -> Result<bool> {
		let Some(window) = opened else {
			return Err(FixtureError::WindowNotOpened { title });
		};
		let actual = self.driver.title(&window)?;
		self.run.set_current_window(Some(window));
		if actual.to_lowercase() != title.to_lowercase() {
			return Err(FixtureError::WindowMismatch { expected: title, actual });
		}
		Ok(true)
	}

	/// Resolved value of the data item `name`, or `None` if there is none.
	pub fn data(&mut self, name: &str) -> Result<Option<String>> {
		self.step("data", None, |fx| Ok(fx.resolver.lookup(name)?.map(|resolved| resolved.into_value())))
	}

	/// Starts the application and logs in with the [`LOGIN_USER`] and
	/// [`LOGIN_PASSWORD`] data items, defaulting both to `test`.
	pub fn start(&mut self) -> Result<bool> {
		self.step("start", false, |fx| {
			let user = fx.resolver.lookup(LOGIN_USER)?.map_or_else(|| DEFAULT_LOGIN.to_owned(), |r| r.into_value());
			let password = fx.resolver.lookup(LOGIN_PASSWORD)?.map_or_else(|| DEFAULT_LOGIN.to_owned(), |r| r.into_value());
			info!(domain = "fixture", %user, "logging in");
			let Some(main) = fx.driver.launch(&Credentials { user, password })? else {
				return Ok(false);
			};
			fx.run.set_current_window(Some(main.clone()));
			fx.run.set_dashboard(Some(main));
			info!(domain = "fixture", "login successful");
			Ok(true)
		})
	}

	/// Clears all test data and run objects, then shuts the application down.
	pub fn exit(&mut self) -> Result<()> {
		self.registry().clear();
		info!(domain = "fixture", "exiting application");
		self.driver.exit().map_err(|err| self.run.record_failure(err.into()))
	}

	pub fn type_into(&mut self, name_or_text: &str, name_or_label: &str) -> Result<bool> {
		self.step("type_into", false, |fx| {
			let label = fx.resolve(name_or_label)?;
			let text = fx.resolve(name_or_text)?;
			let window = fx.current_window()?;
			info!(domain = "fixture", %label, %text, "typing");
			Ok(fx.driver.type_into(&window, &label, &text)?)
		})
	}

	pub fn click(&mut self, name_or_label: &str) -> Result<bool> {
		self.step("click", false, |fx| {
			let label = fx.resolve(name_or_label)?;
			let window = fx.current_window()?;
			info!(domain = "fixture", %label, "clicking button");
			Ok(fx.driver.click(&window, &label)?)
		})
	}

	/// Clicks a button that opens a window and makes that window current.
	///
	/// Fails if no window opens or its title differs from the expected one.
	pub fn open_window_click(&mut self, name_or_title: &str, name_or_label: &str) -> Result<bool> {
		self.step("open_window_click", false, |fx| {
			let title = fx.resolve(name_or_title)?;
			let label = fx.resolve(name_or_label)?;
			let window = fx.current_window()?;
			info!(domain = "fixture", %title, %label, "opening window");
			let opened = fx.driver.click_opening(&window, &label)?;
			fx.expect_window(title, opened)
		})
	}

	/// Opens a window from the dashboard menu bar and makes it current.
	pub fn open_window_menu(&mut self, name_or_title: &str, name_or_menu: &str, name_or_submenu: Option<&str>) -> Result<bool> {
		self.step("open_window_menu", false, |fx| {
			let title = fx.resolve(name_or_title)?;
			let menu = fx.resolve(name_or_menu)?;
			let submenu = name_or_submenu.map(|name| fx.resolve(name)).transpose()?;
			let dashboard: D::Window = fx.run.dashboard()?.ok_or(FixtureError::WindowNotSet("dashboard"))?;
			info!(domain = "fixture", %title, %menu, submenu = ?submenu, "opening window from menu");
			let opened = fx.driver.open_menu(&dashboard, &menu, submenu.as_deref())?;
			fx.expect_window(title, opened)
		})
	}

	/// Description of the current window wrapped as `!<...>!`.
	pub fn description(&mut self) -> Result<String> {
		self.step("description", EMPTY.to_owned(), |fx| {
			let window = fx.current_window()?;
			Ok(format!("!<{}>!", fx.driver.describe(&window)?))
		})
	}

	pub fn window_title(&mut self) -> Result<Option<String>> {
		self.step("window_title", None, |fx| {
			let window = fx.current_window()?;
			Ok(Some(fx.driver.title(&window)?))
		})
	}

	/// Options of a list-like control as `|a|b|`, or [`EMPTY`] when it has none.
	pub fn options_of(&mut self, name_or_label: &str) -> Result<String> {
		self.step("options_of", EMPTY.to_owned(), |fx| {
			let label = fx.resolve(name_or_label)?;
			let window = fx.current_window()?;
			let options = fx.driver.options(&window, &label)?;
			debug!(domain = "fixture", %label, count = options.len(), "listing options");
			if options.is_empty() {
				return Ok(EMPTY.to_owned());
			}
			Ok(options.iter().fold(String::from("|"), |mut acc, option| {
				acc.push_str(&option.display_value());
				acc.push('|');
				acc
			}))
		})
	}

	/// Selects an option of a list-like control.
	///
	/// A data item with the `FIRST` or `LAST` action selects by position;
	/// anything else selects the option matching the resolved text.
	pub fn select_from(&mut self, name_or_text: &str, name_or_label: &str) -> Result<bool> {
		self.step("select_from", false, |fx| {
			let text = fx.resolve(name_or_text)?;
			let label = fx.resolve(name_or_label)?;
			let selection = match fx.resolver.action_of(name_or_text) {
				Some(Action::First) => Selection::First,
				Some(Action::Last) => Selection::Last,
				_ => Selection::Text(&text),
			};
			let window = fx.current_window()?;
			info!(domain = "fixture", %label, selection = ?selection, "selecting option");
			Ok(fx.driver.select(&window, &label, selection)?)
		})
	}

	pub fn select_tab(&mut self, name_or_label: &str) -> Result<bool> {
		self.step("select_tab", false, |fx| {
			let label = fx.resolve(name_or_label)?;
			let window = fx.current_window()?;
			info!(domain = "fixture", %label, "selecting tab");
			Ok(fx.driver.select_tab(&window, &label)?)
		})
	}

	/// Checks a check box.
	pub fn tick(&mut self, name_or_label: &str) -> Result<bool> {
		self.select_for("true", name_or_label)
	}

	/// Checks or unchecks a check box. The state is checked unless it resolves to `false`.
	pub fn select_for(&mut self, name_or_bool: &str, name_or_label: &str) -> Result<bool> {
		self.step("select_for", false, |fx| {
			let checked = !fx.resolve(name_or_bool)?.eq_ignore_ascii_case("false");
			let label = fx.resolve(name_or_label)?;
			let window = fx.current_window()?;
			info!(domain = "fixture", %label, checked, "setting check box");
			Ok(fx.driver.set_checked(&window, &label, checked)?)
		})
	}

	/// Text of a captured message, or [`EMPTY`] if it was not captured.
	pub fn message_text(&mut self, code: &str) -> Result<String> {
		self.step("message_text", EMPTY.to_owned(), |fx| Ok(fx.messages.captured_message(code)?.unwrap_or_else(|| EMPTY.to_owned())))
	}

	/// Transcript of handled message codes, or [`EMPTY`].
	pub fn messages(&mut self) -> Result<String> {
		self.step("messages", EMPTY.to_owned(), |fx| fx.messages.transcript())
	}

	pub fn clear_messages(&mut self) -> Result<bool> {
		self.step("clear_messages", false, |fx| {
			fx.messages.clear_transcript();
			Ok(true)
		})
	}
}
