use deskfix_fixture::registry::SetupData;
use deskfix_fixture::{EMPTY, FixtureError, Message, Severity};
use pretty_assertions::assert_eq;

use crate::common::{MockDriver, fixture};

fn yes_no(code: &str, text: &str, severity: Severity) -> Message {
	Message::new(code, text, ["Yes", "No"], severity)
}

#[test]
fn configured_responses_are_answered_and_transcribed() {
	let mut fx = fixture(MockDriver::with_main("W"));
	assert!(fx.start().unwrap());
	let setup = SetupData::new(fx.registry().clone());
	setup.field_value("CLIGNRL001", "no");

	let chosen = fx
		.interceptor()
		.decide(&yes_no("clignrl001", "Discard changes?", Severity::Question), 0)
		.unwrap();
	fx.interceptor().decide(&yes_no("INF010", "Saved.", Severity::Info), 0).unwrap();

	assert_eq!(chosen, 1);
	assert_eq!(fx.messages().unwrap(), "|CLIGNRL001|INF010|");
	assert_eq!(fx.message_text("CLIGNRL001").unwrap(), "Discard changes?");
	assert_eq!(fx.message_text("INF010").unwrap(), EMPTY);
}

#[test]
fn unexpected_error_message_aborts_the_run() {
	let mut fx = fixture(MockDriver::with_main("W"));
	assert!(fx.start().unwrap());

	let err = fx
		.interceptor()
		.decide(&yes_no("SEREXCP004", "Server exception", Severity::Error), 0)
		.unwrap_err();

	assert!(matches!(err, FixtureError::UnhandledErrorMessage { ref code, .. } if code == "SEREXCP004"));
	assert!(fx.is_aborted());
	assert!(!fx.click("Save").unwrap());
	assert_eq!(fx.interceptor().transcript().unwrap(), EMPTY);
	assert_eq!(fx.interceptor().captured_message("SEREXCP004").unwrap(), None);
	assert_eq!(fx.driver().calls, ["launch"]);
}

#[test]
fn clear_messages_empties_transcript_only() {
	let mut fx = fixture(MockDriver::with_main("W"));
	fx.registry().load("Q1", "Yes", false, None, None);
	fx.interceptor().decide(&yes_no("Q1", "Continue?", Severity::Question), 1).unwrap();

	assert!(fx.clear_messages().unwrap());

	assert_eq!(fx.messages().unwrap(), EMPTY);
	assert_eq!(fx.message_text("q1").unwrap(), "Continue?");
}

#[test]
fn locked_response_survives_reconfiguration() {
	let fx = fixture(MockDriver::with_main("W"));
	let setup = SetupData::new(fx.registry().clone());
	setup.lock_field_value("ERR002", "Yes");
	setup.field_value("ERR002", "No");

	let chosen = fx.interceptor().decide(&yes_no("ERR002", "Retry?", Severity::Error), 1).unwrap();

	assert_eq!(chosen, 0);
}
