//! Desktop GUI test fixture.
//!
//! Sits between a data-driven test runner and a GUI automation [`Driver`]:
//!
//! - [`Fixture`]: runner-facing steps that resolve test data and gate on the
//!   abort flag
//! - [`MessageInterceptor`]: answers application dialogs from test data and
//!   keeps a transcript of them
//! - [`RunCoordinator`]: abort flag and window handles for the run
//! - [`logging`]: tracing subscriber setup
//!
//! Test data itself lives in [`deskfix_registry`].

pub mod driver;
pub mod error;
pub mod logging;
pub mod message;
pub mod run;
pub mod steps;

pub use deskfix_registry as registry;
pub use driver::{Credentials, Driver, DriverError, DriverResult, HasDisplayValue, Selection};
pub use error::{FixtureError, Result};
pub use message::{EMPTY, Message, MessageInterceptor, Severity};
pub use run::RunCoordinator;
pub use steps::Fixture;
