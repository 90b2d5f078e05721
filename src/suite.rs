//! Fixture lifecycle seam.

/// A suite groups related tests and provides their fixture lifecycle.
///
/// One fresh instance is default-constructed per test; `set_up` runs before
/// the test body and `tear_down` runs after it, even when the body panics.
/// Both hooks default to no-ops.
///
/// ```
/// use attest::Suite;
///
/// #[derive(Default)]
/// struct Counter {
///     value: i64,
/// }
///
/// impl Suite for Counter {
///     fn set_up(&mut self) {
///         self.value = 10;
///     }
/// }
/// ```
pub trait Suite: Default {
    fn set_up(&mut self) {}
    fn tear_down(&mut self) {}
}
