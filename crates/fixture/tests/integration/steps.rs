use deskfix_fixture::registry::SetupData;
use deskfix_fixture::{Credentials, EMPTY, FixtureError};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{MockDriver, Window, fixture};

fn started(driver: MockDriver) -> deskfix_fixture::Fixture<MockDriver> {
	let mut fx = fixture(driver);
	assert!(fx.start().unwrap());
	fx
}

#[test]
fn start_uses_default_login() {
	let fx = started(MockDriver::with_main("Dashboard"));

	assert_eq!(
		fx.driver().login,
		Some(Credentials {
			user: "test".into(),
			password: "test".into(),
		})
	);
	assert_eq!(fx.run_state().current_window::<Window>().unwrap(), Some(Window("Dashboard".into())));
	assert_eq!(fx.run_state().dashboard::<Window>().unwrap(), Some(Window("Dashboard".into())));
}

#[test]
fn start_uses_configured_login() {
	let mut fx = fixture(MockDriver::with_main("Dashboard"));
	let setup = SetupData::new(fx.registry().clone());
	setup.field_value("Login: User Name", "ann");
	setup.field_value("Login:Password", "secret");

	assert!(fx.start().unwrap());
	assert_eq!(
		fx.driver().login,
		Some(Credentials {
			user: "ann".into(),
			password: "secret".into(),
		})
	);
}

#[test]
fn start_without_main_window_reports_false() {
	let mut fx = fixture(MockDriver::default());

	assert!(!fx.start().unwrap());
	assert!(!fx.is_aborted());
}

#[test]
fn steps_resolve_data_items_and_literals() {
	let mut fx = started(MockDriver::with_main("Dashboard"));
	let setup = SetupData::new(fx.registry().clone());
	setup.field_value("Lodge: Applicant", "Jane Doe");
	setup.field_value_action_extension("Lodge: Due", "", "TODAY", "5");

	assert!(fx.type_into("Lodge: Applicant", "Applicant name").unwrap());
	assert!(fx.type_into("Lodge: Due", "Due date").unwrap());
	assert!(fx.click("Save").unwrap());

	assert_eq!(
		&fx.driver().calls[1..],
		&[
			"type Dashboard:Applicant name=Jane Doe",
			"type Dashboard:Due date=15/01/2024",
			"click Dashboard:Save",
		]
	);
}

#[test]
fn data_returns_resolved_value_or_none() {
	let mut fx = fixture(MockDriver::default());
	fx.registry().load("D", "", false, Some("TODAY"), None);

	assert_eq!(fx.data("D").unwrap().as_deref(), Some("10/01/2024"));
	assert_eq!(fx.data("missing").unwrap(), None);
}

#[test]
fn select_from_honors_first_and_last() {
	let mut fx = started(MockDriver::with_main("Dashboard"));
	let setup = SetupData::new(fx.registry().clone());
	setup.field_value_action("Pick: First", "ignored", "first");
	setup.field_value_action("Pick: Last", "ignored", "LAST");
	setup.field_value("Pick: Text", "Residential");

	assert!(fx.select_from("Pick: First", "Land use").unwrap());
	assert!(fx.select_from("Pick: Last", "Land use").unwrap());
	assert!(fx.select_from("Pick: Text", "Land use").unwrap());
	assert!(fx.select_from("Commercial", "Land use").unwrap());

	assert_eq!(
		&fx.driver().calls[1..],
		&[
			"select Dashboard:Land use=<first>",
			"select Dashboard:Land use=<last>",
			"select Dashboard:Land use=Residential",
			"select Dashboard:Land use=Commercial",
		]
	);
}

#[test]
fn select_for_treats_anything_but_false_as_checked() {
	let mut fx = started(MockDriver::with_main("W"));
	fx.registry().load("Flag", "FALSE", false, None, None);

	assert!(fx.tick("Active").unwrap());
	assert!(fx.select_for("Flag", "Active").unwrap());
	assert!(fx.select_for("yes", "Active").unwrap());

	assert_eq!(&fx.driver().calls[1..], &["check W:Active=true", "check W:Active=false", "check W:Active=true"]);
}

#[rstest]
#[case("false", false)]
#[case("False", false)]
#[case("true", true)]
#[case("", true)]
#[case("no", true)]
fn select_for_literal_states(#[case] state: &str, #[case] checked: bool) {
	let mut fx = started(MockDriver::with_main("W"));

	assert!(fx.select_for(state, "Active").unwrap());
	assert_eq!(fx.driver().calls.last().cloned(), Some(format!("check W:Active={checked}")));
}

#[test]
fn open_window_click_switches_current_window() {
	let mut driver = MockDriver::with_main("Dashboard");
	driver.opens.insert("New Application".into(), "Application Details".into());
	let mut fx = started(driver);

	assert!(fx.open_window_click("application details", "New Application").unwrap());
	assert_eq!(fx.window_title().unwrap().as_deref(), Some("Application Details"));
	assert!(fx.click("Save").unwrap());
	assert_eq!(fx.driver().calls.last().map(String::as_str), Some("click Application Details:Save"));
}

#[test]
fn open_window_click_with_wrong_title_aborts() {
	let mut driver = MockDriver::with_main("Dashboard");
	driver.opens.insert("Search".into(), "Search Results".into());
	let mut fx = started(driver);

	let err = fx.open_window_click("Application Details", "Search").unwrap_err();

	assert!(matches!(
		err,
		FixtureError::WindowMismatch { ref expected, ref actual } if expected == "Application Details" && actual == "Search Results"
	));
	assert!(fx.is_aborted());
}

#[test]
fn open_window_click_with_nothing_opened_aborts() {
	let mut fx = started(MockDriver::with_main("Dashboard"));

	let err = fx.open_window_click("Details", "Nothing").unwrap_err();

	assert!(matches!(err, FixtureError::WindowNotOpened { ref title } if title == "Details"));
	assert!(fx.is_aborted());
}

#[test]
fn open_window_menu_uses_dashboard() {
	let mut driver = MockDriver::with_main("Dashboard");
	driver.opens.insert("Parcel".into(), "Parcel Search".into());
	driver.opens.insert("Application".into(), "Application Search".into());
	let mut fx = started(driver);

	assert!(fx.open_window_menu("Parcel Search", "Search", Some("Parcel")).unwrap());
	assert!(fx.open_window_menu("Application Search", "Application", None).unwrap());

	assert_eq!(&fx.driver().calls[1..], &["menu Dashboard:Search>Parcel", "menu Dashboard:Application>-"]);
	assert_eq!(fx.window_title().unwrap().as_deref(), Some("Application Search"));
}

#[test]
fn options_of_lists_display_values() {
	let mut driver = MockDriver::with_main("W");
	driver.options.insert("Land use".into(), vec!["Residential".into(), "Commercial".into()]);
	driver.options.insert("Empty".into(), Vec::new());
	let mut fx = started(driver);

	assert_eq!(fx.options_of("Land use").unwrap(), "|Residential|Commercial|");
	assert_eq!(fx.options_of("Empty").unwrap(), EMPTY);
}

#[test]
fn description_and_tab() {
	let mut fx = started(MockDriver::with_main("W"));

	assert_eq!(fx.description().unwrap(), "!<window title=\"W\">!");
	assert!(fx.select_tab("General").unwrap());
}

#[test]
fn steps_before_start_fail_without_window() {
	let mut fx = fixture(MockDriver::default());

	let err = fx.click("Save").unwrap_err();

	assert!(matches!(err, FixtureError::WindowNotSet("current")));
	assert!(fx.is_aborted());
}

#[test]
fn exit_clears_run_state() {
	let mut fx = started(MockDriver::with_main("W"));
	fx.registry().load("K", "v", true, None, None);
	fx.run_state().abort();

	fx.exit().unwrap();

	assert!(fx.registry().data_item("K").is_none());
	assert!(!fx.is_aborted());
	assert_eq!(fx.driver().calls.last().map(String::as_str), Some("exit"));
}
