//! Registered tests and their per-run results.

use std::fmt;
use std::time::Duration;

use crate::error::AssertionError;
use crate::metadata::{Outcome, TestMetadata};

pub(crate) type Runnable = Box<dyn Fn()>;

/// A registered, runnable test: metadata plus the fixture closure built at
/// registration time (construct, set up, run body, tear down).
///
/// Entries are owned by the [`crate::Registry`] and never copied after
/// creation. `Registry::add` hands back `&mut TestEntry` so the fluent
/// configurators below can run; the borrow checker guarantees configuration
/// finishes before the registry is mutated again.
pub struct TestEntry {
    pub metadata: TestMetadata,
    pub(crate) runnable: Runnable,
}

impl TestEntry {
    pub(crate) fn new(metadata: TestMetadata, runnable: Runnable) -> Self {
        Self { metadata, runnable }
    }

    /// Marks this test as an expected failure.
    pub fn xfail(&mut self) -> &mut Self {
        self.metadata.xfail = true;
        self
    }

    /// Marks this test to be skipped: no fixture, no clock, outcome `Skip`.
    pub fn skip(&mut self) -> &mut Self {
        self.metadata.skip = true;
        self
    }

    /// Sets a wall-clock budget. A run exceeding it reports `Timeout`
    /// regardless of what the body did; the running body is never interrupted.
    pub fn timeout(&mut self, limit: Duration) -> &mut Self {
        self.metadata.timeout = Some(limit);
        self
    }
}

impl fmt::Debug for TestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestEntry")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// The outcome of running one entry exactly once.
///
/// Borrows the entry's metadata rather than copying it (tag sets can be
/// arbitrarily large); the borrow ties the result's lifetime to the registry,
/// which stays immutable for the duration of a run.
#[derive(Debug)]
pub struct TestResult<'a> {
    pub metadata: &'a TestMetadata,
    pub outcome: Outcome,
    pub duration: Duration,
    /// Present only for `Fail` and `XFail`.
    pub error: Option<AssertionError>,
}
