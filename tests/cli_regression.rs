// Regression tests for the spec-reporter binary.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn replay_with_failures_exits_nonzero() {
    let mut cmd = Command::cargo_bin("spec-reporter").unwrap();
    cmd.args(["replay", "--color", "never"]).arg(fixture("math.yaml"));
    cmd.assert().failure().code(1).stdout(
        contains(".F-")
            .and(contains("  1) Math subtracts"))
            .and(contains("2 tests, 3 assertions, 1 failure, 1 skipped")),
    );
}

#[test]
fn passing_replay_succeeds() {
    let mut cmd = Command::cargo_bin("spec-reporter").unwrap();
    cmd.args(["replay", "--color", "never"]).arg(fixture("passing.json"));
    cmd.assert()
        .success()
        .stdout(contains("2 tests, 2 assertions, 0 failures, 0 skipped"));
}

#[test]
fn stack_filter_drops_matching_frames() {
    let mut cmd = Command::cargo_bin("spec-reporter").unwrap();
    cmd.args(["replay", "--color", "never", "--stack-filter", "node_modules"])
        .arg(fixture("math.yaml"));
    cmd.assert().failure().stdout(
        contains("at math.spec.js:7").and(contains("node_modules").not()),
    );
}

#[test]
fn verbose_without_stack_traces() {
    let mut cmd = Command::cargo_bin("spec-reporter").unwrap();
    cmd.args(["replay", "--verbose", "--no-stack-trace", "--color", "never"])
        .arg(fixture("math.yaml"));
    cmd.assert().failure().stdout(
        contains("Math - 7 ms\n    adds - 3 ms")
            .and(contains("Stacktrace:").not()),
    );
}

#[test]
fn always_color_emits_escapes() {
    let mut cmd = Command::cargo_bin("spec-reporter").unwrap();
    cmd.args(["replay", "--color", "always"]).arg(fixture("passing.json"));
    cmd.assert().success().stdout(contains("\x1b[32m.\x1b[0m"));
}

#[test]
fn tree_lists_suites_and_specs() {
    let mut cmd = Command::cargo_bin("spec-reporter").unwrap();
    cmd.arg("tree").arg(fixture("math.yaml"));
    cmd.assert().success().stdout(
        contains("Math")
            .and(contains("(suite, depth 0)"))
            .and(contains("    by zero")),
    );
}

#[test]
fn bad_recording_reports_diagnostic() {
    let mut cmd = Command::cargo_bin("spec-reporter").unwrap();
    cmd.arg("replay").arg(fixture("broken.yaml"));
    cmd.assert()
        .failure()
        .code(65)
        .stderr(contains("spec_reporter::parse::yaml").or(contains("not a valid YAML run")));
}

#[test]
fn invalid_stack_filter_is_rejected() {
    let mut cmd = Command::cargo_bin("spec-reporter").unwrap();
    cmd.args(["replay", "--stack-filter", "("]).arg(fixture("math.yaml"));
    cmd.assert()
        .failure()
        .code(64)
        .stderr(contains("invalid stack filter pattern"));
}

#[test]
fn missing_recording_exits_with_io_code() {
    let mut cmd = Command::cargo_bin("spec-reporter").unwrap();
    cmd.arg("replay").arg(fixture("missing.yaml"));
    cmd.assert().failure().code(66).stderr(contains("missing.yaml"));
}

#[test]
fn unknown_extension_exits_with_usage_code() {
    let mut cmd = Command::cargo_bin("spec-reporter").unwrap();
    cmd.arg("tree").arg(fixture("math.txt"));
    cmd.assert().failure().code(64);
}
