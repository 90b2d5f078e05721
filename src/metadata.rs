//! Test identity, per-test configuration, and outcome classification.

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

/// The six-way classification of a completed test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Pass,
    Fail,
    /// Expected failure that did fail.
    XFail,
    /// Expected failure that unexpectedly passed.
    XPass,
    Skip,
    Timeout,
}

impl Outcome {
    /// Single source of truth for success semantics. Exit codes and summary
    /// accounting must go through this, never re-derive it.
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Pass | Outcome::XFail | Outcome::Skip)
    }

    /// Short display code used in per-test output lines.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Pass => "PASS",
            Outcome::Fail => "FAIL",
            Outcome::XFail => "XFAIL",
            Outcome::XPass => "XPASS",
            Outcome::Skip => "SKIP",
            Outcome::Timeout => "TMO",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Identity and configuration of one registered test.
///
/// Created once by [`crate::Registry::add`]; after the registration statement
/// completes (including any fluent configuration on the returned entry) it is
/// never mutated again. Names are `&'static str` by convention: suites and
/// tests are registered from literal text.
#[derive(Debug, Clone)]
pub struct TestMetadata {
    pub suite_name: &'static str,
    pub test_name: &'static str,
    /// Unique labels, kept sorted. Deduplicated at registration.
    pub tags: BTreeSet<String>,
    /// This test is expected to fail.
    pub xfail: bool,
    /// Do not execute this test.
    pub skip: bool,
    /// Wall-clock budget; exceeding it overrides the outcome to `Timeout`.
    pub timeout: Option<Duration>,
}

impl TestMetadata {
    pub fn new(suite_name: &'static str, test_name: &'static str, tags: BTreeSet<String>) -> Self {
        Self {
            suite_name,
            test_name,
            tags,
            xfail: false,
            skip: false,
            timeout: None,
        }
    }

    /// `"{suite}::{test}"` — assumed unique within one registry.
    pub fn full_name(&self) -> String {
        format!("{}::{}", self.suite_name, self.test_name)
    }

    /// Exact, case-sensitive membership test.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}
