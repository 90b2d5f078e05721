//! Sample attest test binary.
//!
//! Registers a small, deterministic set of suites covering every outcome
//! category. The CLI regression tests drive this binary end to end.

use std::process;
use std::thread;
use std::time::Duration;

use attest::{cli, expect, Registry, Suite};

#[derive(Default)]
struct MathSuite {
    values: Vec<i64>,
}

impl Suite for MathSuite {
    fn set_up(&mut self) {
        self.values = vec![1, 2, 3];
    }
}

impl MathSuite {
    fn add(&mut self) {
        expect(2 + 2).to_equal(4);
    }

    fn div(&mut self) {
        // Integer division truncates; this assertion is wrong on purpose.
        expect(10 / 4).to_equal(3);
    }

    fn sum(&mut self) {
        expect(self.values.iter().sum::<i64>()).to_equal(6);
    }
}

#[derive(Default)]
struct EdgeSuite;

impl Suite for EdgeSuite {}

impl EdgeSuite {
    fn known_bug(&mut self) {
        expect(f64::NAN == f64::NAN).to_be_true();
    }

    fn unsupported(&mut self) {
        unreachable!("skipped tests never execute");
    }

    fn surprise(&mut self) {
        expect(1 + 1).to_equal(2);
    }

    fn slow_loop(&mut self) {
        thread::sleep(Duration::from_millis(20));
    }
}

fn main() {
    let mut registry = Registry::new();

    registry.add("Math", "Add", MathSuite::add, &["fast"]);
    registry.add("Math", "Div", MathSuite::div, &["slow"]);
    // "fast" listed twice: exercises the duplicate-tag warning.
    registry.add("Math", "Sum", MathSuite::sum, &["fast", "fast"]);

    registry.add("Edge", "KnownBug", EdgeSuite::known_bug, &[]).xfail();
    registry.add("Edge", "Surprise", EdgeSuite::surprise, &[]).xfail();
    registry.add("Edge", "Unsupported", EdgeSuite::unsupported, &[]).skip();
    registry
        .add("Edge", "SlowLoop", EdgeSuite::slow_loop, &[])
        .timeout(Duration::from_millis(1));

    process::exit(cli::run(&mut registry));
}
