//! Test data and run state for desktop fixtures.
//!
//! Test steps reference named *data items* instead of literal values. This
//! crate holds those items along with run-scoped objects, and turns item
//! names into the values a step should use.
//!
//! - [`Registry`]: data items (with locking) and run objects for one test run
//! - [`ActionResolver`]: effective values, including the `TODAY` action
//! - [`SetupData`]: the write interface used by setup and test scripts
//!
//! # Cargo features
//!
//! - `setup`: TOML setup files ([`setup::load_setup_file`]).
//!   *Enabled by default.*

pub mod action;
pub mod error;
pub mod item;
pub mod registry;
pub mod setup;

pub use action::{ActionResolver, Clock, FixedClock, Resolved, SystemClock};
pub use error::{RegistryError, Result};
pub use item::{Action, DataItem, normalize_name};
pub use registry::Registry;
pub use setup::SetupData;
