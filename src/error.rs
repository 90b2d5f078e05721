//! Structured assertion diagnostics.
//!
//! Every test failure that carries detail is represented by [`AssertionError`]:
//! a human-readable "actual" and "expected" pair plus the source location of
//! the assertion call site. The assertion surface in [`crate::expect`] raises
//! these via `panic_any`; the runner catches and classifies them.

use std::fmt;
use std::panic::Location;

use miette::Diagnostic;
use thiserror::Error;

/// Source position captured at an assertion call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(loc: &'static Location<'static>) -> Self {
        Self {
            file: loc.file(),
            line: loc.line(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A failed assertion, with both sides of the comparison already rendered.
///
/// `location` is `None` only for synthesized diagnostics (e.g. a test body
/// that panicked outside the assertion surface), where no meaningful call
/// site exists.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(attest::assertion_failed))]
pub struct AssertionError {
    pub actual: String,
    pub expected: String,
    pub location: Option<SourceLocation>,
    message: String,
}

impl AssertionError {
    /// Builds an error located at the caller.
    #[track_caller]
    pub fn new(actual: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::with_location(actual, expected, Some(SourceLocation::from(Location::caller())))
    }

    /// Builds an error with no source location (runner-synthesized detail).
    pub fn synthesized(actual: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::with_location(actual, expected, None)
    }

    pub fn with_location(
        actual: impl Into<String>,
        expected: impl Into<String>,
        location: Option<SourceLocation>,
    ) -> Self {
        let actual = actual.into();
        let expected = expected.into();
        let message = match location {
            Some(loc) => {
                format!("{loc}: assertion failed\n  expected: {expected}\n    actual: {actual}")
            }
            None => format!("assertion failed\n  expected: {expected}\n    actual: {actual}"),
        };
        Self {
            actual,
            expected,
            location,
            message,
        }
    }
}
