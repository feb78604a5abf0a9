//! Shared fixtures for the reporter integration tests.

#![allow(dead_code)]

use spec_reporter::clock::ManualClock;
use spec_reporter::output::SharedBuffer;
use spec_reporter::runner::{AssertionResult, Runner, SpecId, SpecResults, SuiteId};
use spec_reporter::ReporterConfig;

pub const SUBTRACT_STACK: &str = "Error: expected 1 got 2\n    at math.spec.js:7";

/// One suite "Math" with a passing "adds" and a failing "subtracts".
pub struct MathRun {
    pub runner: Runner,
    pub math: SuiteId,
    pub adds: SpecId,
    pub subtracts: SpecId,
}

pub fn math_run() -> MathRun {
    let mut builder = Runner::builder();
    let math = builder.add_suite(None, "Math");
    let adds = builder.add_spec(
        math,
        "adds",
        SpecResults::new(vec![AssertionResult::pass("Passed.")]),
    );
    let subtracts = builder.add_spec(
        math,
        "subtracts",
        SpecResults::new(vec![AssertionResult::fail("expected 1 got 2", SUBTRACT_STACK)]),
    );
    MathRun {
        runner: builder.build(),
        math,
        adds,
        subtracts,
    }
}

/// A config writing into a fresh buffer and timed by `clock`.
pub fn captured(clock: &ManualClock) -> (ReporterConfig, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let config = ReporterConfig::default()
        .with_sink(buffer.clone())
        .with_clock(clock.clone());
    (config, buffer)
}
