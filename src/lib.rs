//! Attest: a lightweight unit-testing framework.
//!
//! Tests are plain methods on a fixture type implementing [`Suite`]; user
//! code registers them into a [`Registry`], which supports name/tag filtering,
//! exclusion, and deterministic seeded shuffling. A [`Runner`] executes each
//! surviving entry exactly once — fresh fixture, `set_up`, body, `tear_down`
//! (always) — and classifies it into one of six [`Outcome`]s: pass, fail,
//! expected failure, unexpected pass, skip, or timeout.
//!
//! ```no_run
//! use std::process;
//!
//! use attest::{cli, expect, Registry, Suite};
//!
//! #[derive(Default)]
//! struct MathSuite;
//!
//! impl Suite for MathSuite {}
//!
//! impl MathSuite {
//!     fn add(&mut self) {
//!         expect(2 + 2).to_equal(4);
//!     }
//! }
//!
//! fn main() {
//!     let mut registry = Registry::new();
//!     registry.add("Math", "Add", MathSuite::add, &["fast"]);
//!     process::exit(cli::run(&mut registry));
//! }
//! ```

pub use crate::entry::{TestEntry, TestResult};
pub use crate::error::{AssertionError, SourceLocation};
pub use crate::expect::{expect, Expect};
pub use crate::metadata::{Outcome, TestMetadata};
pub use crate::registry::Registry;
pub use crate::runner::{Runner, RunnerConfig};
pub use crate::suite::Suite;

pub mod cli;
pub mod entry;
pub mod error;
pub mod expect;
pub mod metadata;
pub mod registry;
pub mod runner;
pub mod suite;
