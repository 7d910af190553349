//! Automatic responses to application dialogs.
//!
//! When the application under test raises a message, the GUI layer hands it
//! to [`MessageInterceptor::decide`] instead of showing a dialog. The response
//! is configured as a data item keyed by the message code whose value is the
//! label of the option to choose, e.g. a data item `ERR001` with value `No`.
//!
//! Every handled message code is appended to a pipe-delimited transcript
//! (`|CODE1|CODE2|`) so assertions can check which messages were shown and in
//! what order. Messages with a configured response are also kept whole so
//! their text can be checked.

use std::sync::Arc;

use deskfix_registry::Registry;
use tracing::{error, info};

use crate::error::{FixtureError, Result};
use crate::run::RunCoordinator;


/// Run object key of the message transcript.
pub const TRANSCRIPT_KEY: &str = "Messages";

/// Returned by queries when nothing has been captured.
pub const EMPTY: &str = "!";

/// Severity of an application message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
	#[default]
	Info,
	Warning,
	Question,
	/// Errors must have a configured response; see [`MessageInterceptor::decide`].
	Error,
}

/// A message the application wants to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
	/// Message code, e.g. `CLIGNRL001`.
	pub code: String,
	/// Localized text.
	pub text: String,
	/// Labels of the dialog options, in button order.
	pub options: Vec<String>,
	pub severity: Severity,
}

impl Message {
	pub fn new(code: impl Into<String>, text: impl Into<String>, options: impl IntoIterator<Item = impl Into<String>>, severity: Severity) -> Self {
		Self {
			code: code.into(),
			text: text.into(),
			options: options.into_iter().map(Into::into).collect(),
			severity,
		}
	}

	/// Code as used for run object keys and the transcript.
	pub fn key(&self) -> String {
		self.code.to_uppercase()
	}
}

/// Decides dialog responses from configured data items and records a transcript.
#[derive(Debug, Clone)]
pub struct MessageInterceptor {
	registry: Arc<Registry>,
	run: RunCoordinator,
}

impl MessageInterceptor {
	pub fn new(registry: Arc<Registry>) -> Self {
		let run = RunCoordinator::new(Arc::clone(&registry));
		Self { registry, run }
	}

	/// Chooses the option index to answer `message` with.
	///
	/// A configured response selects the first option whose label matches it,
	/// ignoring case, or `default_index` if none does. Without a configured
	/// response, error-severity messages abort the run and fail with
	/// [`FixtureError::UnhandledErrorMessage`]; anything else gets
	/// `default_index`.
	pub fn decide(&self, message: &Message, default_index: usize) -> Result<usize> {
		let key = message.key();
		let chosen = match self.registry.data_value(&message.code) {
			Some(response) => {
				let index = message.options.iter().position(|option| eq_ignore_case(option, &response)).unwrap_or(default_index);
				self.registry.load_object(&key, Some(message.clone()));
				index
			}
			None if message.severity == Severity::Error => {
				error!(domain = "messages", code = %key, text = %message.text, "unexpected error message");
				self.run.abort();
				return Err(FixtureError::UnhandledErrorMessage {
					code: key,
					text: message.text.clone(),
				});
			}
			None => default_index,
		};

		self.registry.update_object::<String, _>(TRANSCRIPT_KEY, |transcript| {
			Some(match transcript {
				Some(transcript) => format!("{transcript}{key}|"),
				None => format!("|{key}|"),
			})
		})?;

		info!(
			domain = "messages",
			code = %key,
			text = %message.text,
			option = message.options.get(chosen).map_or("<none>", String::as_str),
			options = %message.options.join(", "),
			"responding to message",
		);
		Ok(chosen)
	}

	/// Codes of all handled messages, e.g. `|CLIGNRL001|SEREXCP004|`, or [`EMPTY`].
	pub fn transcript(&self) -> Result<String> {
		Ok(self.registry.object::<String>(TRANSCRIPT_KEY)?.unwrap_or_else(|| EMPTY.to_owned()))
	}

	/// Text of the last message captured under `code`.
	///
	/// Only messages with a configured response are captured.
	pub fn captured_message(&self, code: &str) -> Result<Option<String>> {
		Ok(self.registry.object::<Message>(&code.to_uppercase())?.map(|message| message.text))
	}

	/// Empties the transcript.
	pub fn clear_transcript(&self) {
		self.registry.load_object::<String>(TRANSCRIPT_KEY, None);
	}
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
	a.to_lowercase() == b.to_lowercase()
}
