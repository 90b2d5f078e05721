//! Per-test state machine and exit-code contracts.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use attest::{expect, Outcome, Registry, Runner, Suite};

#[derive(Default)]
struct Fixture;

impl Suite for Fixture {}

fn passing(_: &mut Fixture) {
    expect(1 + 1).to_equal(2);
}

fn failing(_: &mut Fixture) {
    expect(1 + 1).to_equal(3);
}

fn sleeping(_: &mut Fixture) {
    thread::sleep(Duration::from_millis(15));
}

fn panicking(_: &mut Fixture) {
    panic!("kaboom {}", 1);
}

#[test]
fn passing_body_reports_pass_without_error() {
    let mut registry = Registry::new();
    registry.add("S", "Passes", passing, &[]);
    let result = Runner::run_test(&registry.tests()[0]);
    assert_eq!(result.outcome, Outcome::Pass);
    assert!(result.error.is_none());
}

#[test]
fn failed_assertion_reports_fail_with_detail() {
    let mut registry = Registry::new();
    registry.add("S", "Fails", failing, &[]);
    let result = Runner::run_test(&registry.tests()[0]);
    assert_eq!(result.outcome, Outcome::Fail);
    let err = result.error.expect("Fail carries the assertion error");
    assert_eq!(err.actual, "2");
    assert_eq!(err.expected, "3");
    assert!(err.location.is_some());
}

#[test]
fn stray_panic_reports_fail_with_synthesized_detail() {
    let mut registry = Registry::new();
    registry.add("S", "Panics", panicking, &[]);
    let result = Runner::run_test(&registry.tests()[0]);
    assert_eq!(result.outcome, Outcome::Fail);
    let err = result.error.expect("Fail carries a synthesized error");
    assert_eq!(err.actual, "threw: kaboom 1");
    assert_eq!(err.expected, "no exception");
    assert!(err.location.is_none());
}

#[test]
fn xfail_remaps_fail_and_keeps_the_error() {
    let mut registry = Registry::new();
    registry.add("S", "KnownBad", failing, &[]).xfail();
    let result = Runner::run_test(&registry.tests()[0]);
    assert_eq!(result.outcome, Outcome::XFail);
    assert!(result.error.is_some());
}

#[test]
fn xfail_remaps_pass_to_xpass_without_error() {
    let mut registry = Registry::new();
    registry.add("S", "Healed", passing, &[]).xfail();
    let result = Runner::run_test(&registry.tests()[0]);
    assert_eq!(result.outcome, Outcome::XPass);
    assert!(result.error.is_none());
}

#[test]
fn skipped_test_short_circuits_before_the_fixture() {
    static SETUPS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Default)]
    struct Probe;
    impl Suite for Probe {
        fn set_up(&mut self) {
            SETUPS.fetch_add(1, Ordering::SeqCst);
        }
    }
    fn never_runs(_: &mut Probe) {
        panic!("skipped tests never execute");
    }

    let mut registry = Registry::new();
    registry.add("S", "Skipped", never_runs, &[]).skip();
    let result = Runner::run_test(&registry.tests()[0]);
    assert_eq!(result.outcome, Outcome::Skip);
    assert_eq!(result.duration, Duration::ZERO);
    assert!(result.error.is_none());
    assert_eq!(SETUPS.load(Ordering::SeqCst), 0);
}

#[test]
fn skip_beats_xfail() {
    let mut registry = Registry::new();
    registry.add("S", "Both", failing, &[]).xfail().skip();
    let result = Runner::run_test(&registry.tests()[0]);
    assert_eq!(result.outcome, Outcome::Skip);
}

#[test]
fn tear_down_runs_after_a_failing_body() {
    static TEARDOWNS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Default)]
    struct Probe;
    impl Suite for Probe {
        fn tear_down(&mut self) {
            TEARDOWNS.fetch_add(1, Ordering::SeqCst);
        }
    }
    fn bad(_: &mut Probe) {
        expect(false).to_be_true();
    }

    let mut registry = Registry::new();
    registry.add("S", "FailsButTearsDown", bad, &[]);
    let result = Runner::run_test(&registry.tests()[0]);
    assert_eq!(result.outcome, Outcome::Fail);
    assert_eq!(TEARDOWNS.load(Ordering::SeqCst), 1);
}

#[test]
fn tear_down_panic_replaces_the_body_failure() {
    #[derive(Default)]
    struct Probe;
    impl Suite for Probe {
        fn tear_down(&mut self) {
            panic!("teardown boom");
        }
    }
    fn bad(_: &mut Probe) {
        expect(1).to_equal(2);
    }

    let mut registry = Registry::new();
    registry.add("S", "TearDownThrows", bad, &[]);
    let result = Runner::run_test(&registry.tests()[0]);
    assert_eq!(result.outcome, Outcome::Fail);
    let err = result.error.expect("teardown panic is the surfaced failure");
    assert_eq!(err.actual, "threw: teardown boom");
}

#[test]
fn exceeded_timeout_overrides_any_outcome() {
    let mut registry = Registry::new();
    registry
        .add("S", "Slow", sleeping, &[])
        .timeout(Duration::from_millis(1));
    let result = Runner::run_test(&registry.tests()[0]);
    assert_eq!(result.outcome, Outcome::Timeout);
    assert!(result.error.is_none());
    assert!(result.duration > Duration::from_millis(1));
}

#[test]
fn timeout_beats_xfail() {
    let mut registry = Registry::new();
    registry
        .add("S", "SlowAndExpectedToFail", sleeping, &[])
        .xfail()
        .timeout(Duration::from_millis(1));
    let result = Runner::run_test(&registry.tests()[0]);
    assert_eq!(result.outcome, Outcome::Timeout);
}

#[test]
fn generous_timeout_leaves_the_outcome_alone() {
    let mut registry = Registry::new();
    registry
        .add("S", "Quick", passing, &[])
        .timeout(Duration::from_secs(5));
    let result = Runner::run_test(&registry.tests()[0]);
    assert_eq!(result.outcome, Outcome::Pass);
}

#[test]
fn one_of_each_outcome_and_exit_code_one() {
    let mut registry = Registry::new();
    registry.add("Mix", "Pass", passing, &[]);
    registry.add("Mix", "Fail", failing, &[]);
    registry.add("Mix", "XFail", failing, &[]).xfail();
    registry.add("Mix", "XPass", passing, &[]).xfail();
    registry.add("Mix", "Skip", failing, &[]).skip();
    registry
        .add("Mix", "Timeout", sleeping, &[])
        .timeout(Duration::from_millis(1));

    let outcomes: Vec<Outcome> = registry
        .tests()
        .iter()
        .map(|entry| Runner::run_test(entry).outcome)
        .collect();
    for expected in [
        Outcome::Pass,
        Outcome::Fail,
        Outcome::XFail,
        Outcome::XPass,
        Outcome::Skip,
        Outcome::Timeout,
    ] {
        assert_eq!(
            outcomes.iter().filter(|o| **o == expected).count(),
            1,
            "expected exactly one {expected}"
        );
    }

    // Fail, XPass, and Timeout are present, so the run as a whole fails.
    assert_eq!(Runner::new(&registry).run_all(), 1);
}

#[test]
fn all_successful_outcomes_exit_zero() {
    let mut registry = Registry::new();
    registry.add("Ok", "Pass", passing, &[]);
    registry.add("Ok", "XFail", failing, &[]).xfail();
    registry.add("Ok", "Skip", failing, &[]).skip();
    assert_eq!(Runner::new(&registry).run_all(), 0);
}

#[test]
fn empty_registry_is_vacuous_success() {
    let registry = Registry::new();
    assert_eq!(Runner::new(&registry).run_all(), 0);
}
