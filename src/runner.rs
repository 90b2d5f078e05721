//! Test execution: the per-test state machine and the reporting loop.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use crate::entry::{TestEntry, TestResult};
use crate::error::AssertionError;
use crate::metadata::Outcome;
use crate::registry::Registry;

// Color constants for terminal output
const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

/// Presentation settings for the reporting loop.
pub struct RunnerConfig {
    pub use_colors: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }
}

impl RunnerConfig {
    fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Executes every entry in a registry exactly once, in the registry's current
/// order, printing each result as it happens.
///
/// Strictly single-threaded and sequential: a body that never returns blocks
/// the process (timeouts classify after the fact, they never interrupt).
pub struct Runner<'a> {
    registry: &'a Registry,
    config: RunnerConfig,
}

impl<'a> Runner<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self::with_config(registry, RunnerConfig::default())
    }

    pub fn with_config(registry: &'a Registry, config: RunnerConfig) -> Self {
        Self { registry, config }
    }

    /// Runs, prints, and summarizes every test; returns the process exit
    /// status (0 iff every outcome satisfies [`Outcome::is_success`]).
    pub fn run_all(&self) -> i32 {
        let tests = self.registry.tests();
        let mut results = Vec::with_capacity(tests.len());

        // Expected panics would otherwise spray through the default hook.
        let previous_hook = panic::take_hook();
        panic::set_hook(Box::new(|_| {}));
        for entry in tests {
            let result = Self::run_test(entry);
            self.print_result(&result);
            results.push(result);
        }
        panic::set_hook(previous_hook);

        self.print_summary(&results);

        if results.iter().all(|r| r.outcome.is_success()) {
            0
        } else {
            1
        }
    }

    /// The per-test state machine.
    ///
    /// 1. Skip check, before any fixture or clock.
    /// 2. Timed execution of the fixture closure.
    /// 3. Base classification: no panic → `Pass`; assertion payload → `Fail`
    ///    with the error attached; any other panic → `Fail` with a
    ///    synthesized "threw: …" / "no exception" diagnostic.
    /// 4. xfail remap: `Pass → XPass`, `Fail → XFail` (error retained).
    /// 5. Timeout override, last: exceeding the budget forces `Timeout`
    ///    unconditionally and drops any error.
    pub fn run_test(entry: &TestEntry) -> TestResult<'_> {
        let metadata = &entry.metadata;

        if metadata.skip {
            return TestResult {
                metadata,
                outcome: Outcome::Skip,
                duration: Duration::ZERO,
                error: None,
            };
        }

        let start = Instant::now();
        let run = panic::catch_unwind(AssertUnwindSafe(|| (entry.runnable)()));
        let duration = start.elapsed();

        let (mut outcome, mut error) = match run {
            Ok(()) => (Outcome::Pass, None),
            Err(payload) => (Outcome::Fail, Some(classify_panic(payload))),
        };

        if metadata.xfail {
            outcome = match outcome {
                Outcome::Pass => Outcome::XPass,
                Outcome::Fail => Outcome::XFail,
                other => other,
            };
        }

        if let Some(limit) = metadata.timeout {
            if duration > limit {
                outcome = Outcome::Timeout;
                error = None;
            }
        }

        TestResult {
            metadata,
            outcome,
            duration,
            error,
        }
    }

    fn print_result(&self, result: &TestResult<'_>) {
        let label = self
            .config
            .colorize(result.outcome.label(), outcome_color(result.outcome));
        println!(
            "[ {} ] {} ({})",
            label,
            result.metadata.full_name(),
            format_duration(result.duration)
        );

        // Only Fail and XFail carry diagnostic detail.
        if let Some(err) = &result.error {
            println!("  {err}");
        }
    }

    fn print_summary(&self, results: &[TestResult<'_>]) {
        let count = |o: Outcome| results.iter().filter(|r| r.outcome == o).count();
        println!();
        println!(
            "{} tests, {} passed, {} failed, {} xfailed, {} xpassed, {} skipped, {} timed out",
            results.len(),
            count(Outcome::Pass),
            count(Outcome::Fail),
            count(Outcome::XFail),
            count(Outcome::XPass),
            count(Outcome::Skip),
            count(Outcome::Timeout),
        );
    }
}

fn outcome_color(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Pass => GREEN,
        Outcome::XFail | Outcome::Skip => YELLOW,
        Outcome::Fail | Outcome::XPass | Outcome::Timeout => RED,
    }
}

/// Converts an escaped panic payload into the diagnostic attached to `Fail`.
fn classify_panic(payload: Box<dyn Any + Send>) -> AssertionError {
    match payload.downcast::<AssertionError>() {
        Ok(err) => *err,
        Err(payload) => {
            let actual = if let Some(msg) = payload.downcast_ref::<String>() {
                format!("threw: {msg}")
            } else if let Some(msg) = payload.downcast_ref::<&'static str>() {
                format!("threw: {msg}")
            } else {
                "unknown exception".to_string()
            };
            AssertionError::synthesized(actual, "no exception")
        }
    }
}

fn format_duration(duration: Duration) -> String {
    let ns = duration.as_nanos();
    if ns < 1_000 {
        format!("{ns}ns")
    } else if ns < 1_000_000 {
        format!("{:.2}\u{b5}s", ns as f64 / 1_000.0)
    } else if ns < 1_000_000_000 {
        format!("{:.2}ms", ns as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", ns as f64 / 1_000_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use std::panic::panic_any;

    use super::*;

    #[test]
    fn duration_formatting_thresholds() {
        assert_eq!(format_duration(Duration::from_nanos(999)), "999ns");
        assert_eq!(format_duration(Duration::from_nanos(1_500)), "1.50\u{b5}s");
        assert_eq!(format_duration(Duration::from_micros(2_500)), "2.50ms");
        assert_eq!(format_duration(Duration::from_millis(1_500)), "1.50s");
    }

    #[test]
    fn string_panic_payload_becomes_threw_diagnostic() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        let err = classify_panic(payload);
        assert_eq!(err.actual, "threw: boom");
        assert_eq!(err.expected, "no exception");
        assert!(err.location.is_none());
    }

    #[test]
    fn opaque_panic_payload_becomes_unknown_exception() {
        let payload =
            panic::catch_unwind(|| panic_any(42_i32)).expect_err("panic_any should unwind");
        let err = classify_panic(payload);
        assert_eq!(err.actual, "unknown exception");
        assert_eq!(err.expected, "no exception");
    }

    #[test]
    fn assertion_payload_passes_through_unchanged() {
        let source = AssertionError::new("1", "2");
        let payload: Box<dyn Any + Send> = Box::new(source.clone());
        let err = classify_panic(payload);
        assert_eq!(err.actual, source.actual);
        assert_eq!(err.expected, source.expected);
        assert_eq!(err.location, source.location);
    }
}
