//! Fluent assertion surface.
//!
//! `expect(actual)` starts a chain; every matcher either returns the chain for
//! further assertions or raises an [`AssertionError`] through `panic_any`,
//! which the runner catches and converts into a `Fail`/`XFail` outcome. Both
//! sides of a comparison are rendered with `Debug` formatting at failure time.

use std::fmt::Debug;
use std::panic::{panic_any, Location};

use crate::error::{AssertionError, SourceLocation};

/// Starts an assertion chain on `actual`, capturing the call site.
#[track_caller]
pub fn expect<T>(actual: T) -> Expect<T> {
    Expect {
        actual,
        location: SourceLocation::from(Location::caller()),
    }
}

/// An in-flight assertion chain. See [`expect`].
pub struct Expect<T> {
    actual: T,
    location: SourceLocation,
}

impl<T> Expect<T> {
    fn fail(&self, actual: String, expected: String) -> ! {
        panic_any(AssertionError::with_location(
            actual,
            expected,
            Some(self.location),
        ))
    }
}

impl<T: Debug> Expect<T> {
    pub fn to_equal(self, expected: T) -> Self
    where
        T: PartialEq,
    {
        if self.actual != expected {
            self.fail(stringify_value(&self.actual), stringify_value(&expected));
        }
        self
    }

    pub fn to_not_equal(self, unexpected: T) -> Self
    where
        T: PartialEq,
    {
        if self.actual == unexpected {
            self.fail(
                stringify_value(&self.actual),
                format!("not {}", stringify_value(&unexpected)),
            );
        }
        self
    }

    pub fn to_be_greater_than(self, bound: T) -> Self
    where
        T: PartialOrd,
    {
        if self.actual <= bound {
            self.fail(
                stringify_value(&self.actual),
                format!("greater than {}", stringify_value(&bound)),
            );
        }
        self
    }

    pub fn to_be_less_than(self, bound: T) -> Self
    where
        T: PartialOrd,
    {
        if self.actual >= bound {
            self.fail(
                stringify_value(&self.actual),
                format!("less than {}", stringify_value(&bound)),
            );
        }
        self
    }
}

impl Expect<bool> {
    pub fn to_be_true(self) -> Self {
        if !self.actual {
            self.fail("false".to_string(), "true".to_string());
        }
        self
    }

    pub fn to_be_false(self) -> Self {
        if self.actual {
            self.fail("true".to_string(), "false".to_string());
        }
        self
    }
}

fn stringify_value<T: Debug>(value: &T) -> String {
    format!("{value:?}")
}
