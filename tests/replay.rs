//! Recorded runs driven through the reporters.

use std::path::Path;

use spec_reporter::clock::ManualClock;
use spec_reporter::errors::ErrorType;
use spec_reporter::replay::Recording;
use spec_reporter::runner::{Child, SpecId, SuiteId};
use spec_reporter::summary::{summarize_forest, NodeKind};
use spec_reporter::{ReplayError, Reporter, Runner, Spec, Suite, TerminalReporter, VerboseReporter};

mod common;
use common::captured;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

/// Records the callback sequence it receives.
#[derive(Default)]
struct EventLog(Vec<String>);

impl Reporter for EventLog {
    fn run_starting(&mut self, _runner: &Runner) {
        self.0.push("run".to_string());
    }

    fn spec_starting(&mut self, _runner: &Runner, spec: &Spec) {
        self.0.push(format!("start {}", spec.description));
    }

    fn spec_results(&mut self, _runner: &Runner, spec: &Spec) {
        self.0.push(format!("spec {}", spec.description));
    }

    fn suite_results(&mut self, _runner: &Runner, suite: &Suite) {
        self.0.push(format!("suite {}", suite.description));
    }

    fn runner_results(&mut self, _runner: &Runner) {
        self.0.push("done".to_string());
    }
}

#[test]
fn yaml_recording_builds_hierarchy_in_declaration_order() {
    let replay = Recording::load(&fixture("math.yaml")).unwrap().into_replay();
    let runner = replay.runner();

    let math = runner.suite(SuiteId(0)).unwrap();
    assert_eq!(math.description, "Math");
    assert_eq!(
        math.children,
        vec![Child::Spec(SpecId(0)), Child::Spec(SpecId(1)), Child::Suite(SuiteId(1))]
    );
    assert_eq!(runner.suite(SuiteId(1)).unwrap().parent, Some(SuiteId(0)));
    assert_eq!(runner.spec_full_name(runner.spec(SpecId(2)).unwrap()), "Math division by zero");
    assert_eq!(replay.duration_ms(SpecId(1)), 4);

    let results = runner.results();
    assert_eq!((results.total_count, results.failed_count), (3, 1));

    let forest = summarize_forest(runner);
    assert_eq!(forest[0].children[2].kind, NodeKind::Suite);
    assert_eq!(forest[0].children[2].depth, 1);
}

#[test]
fn events_arrive_depth_first_with_suite_after_children() {
    let replay = Recording::load(&fixture("math.yaml")).unwrap().into_replay();
    let mut log = EventLog::default();
    replay.drive(&mut log, &ManualClock::new(0));

    assert_eq!(
        log.0,
        vec![
            "run",
            "start adds",
            "spec adds",
            "start subtracts",
            "spec subtracts",
            "start by zero",
            "spec by zero",
            "suite division",
            "suite Math",
            "done",
        ]
    );
}

#[test]
fn compact_replay_uses_recorded_durations() {
    let replay = Recording::load(&fixture("math.yaml")).unwrap().into_replay();
    let clock = ManualClock::new(0);
    let (config, buffer) = captured(&clock);
    let mut reporter = TerminalReporter::new(config);

    replay.drive(&mut reporter, &clock);

    let output = buffer.contents();
    assert!(output.starts_with(".F-\n\nFailures:"));
    assert!(output.contains("Finished in 0.007 seconds\n"));
    assert!(output.contains("2 tests, 3 assertions, 1 failure, 1 skipped\n"));
}

#[test]
fn verbose_replay_renders_nested_suite() {
    let replay = Recording::load(&fixture("math.yaml")).unwrap().into_replay();
    let clock = ManualClock::new(0);
    let (config, buffer) = captured(&clock);
    let mut reporter = VerboseReporter::new(config.with_stack_trace(false));

    replay.drive(&mut reporter, &clock);

    let expected = [
        "\n",
        "Math - 7 ms\n",
        "    adds - 3 ms\n",
        "    subtracts - 4 ms\n",
        "\n",
        "    division - 0 ms\n",
        "        by zero - 0 ms",
        "\n\nFailures:",
    ]
    .concat();
    assert!(buffer.contents().starts_with(&expected));
}

#[test]
fn json_recording_replays() {
    let replay = Recording::load(&fixture("passing.json")).unwrap().into_replay();
    let clock = ManualClock::new(0);
    let (config, buffer) = captured(&clock);
    replay.drive(&mut TerminalReporter::new(config), &clock);

    assert_eq!(
        buffer.contents(),
        "..\n\nFinished in 0.02 seconds\n2 tests, 2 assertions, 0 failures, 0 skipped\n\n"
    );
}

#[test]
fn recorded_status_overrides_empty_assertions() {
    let recording = Recording::from_yaml_str(
        "suites:\n  - description: Timers\n    children:\n      - kind: spec\n        description: times out\n        passed: false\n        assertions: []\n",
    )
    .unwrap();
    let replay = recording.into_replay();
    let clock = ManualClock::new(0);
    let (config, buffer) = captured(&clock);
    let mut reporter = TerminalReporter::new(config);

    replay.drive(&mut reporter, &clock);

    assert!(buffer.contents().starts_with('F'));
    assert!(reporter.failures().is_empty());
    assert!(buffer.contents().contains("1 test, 0 assertions, 0 failures, 0 skipped"));
}

#[test]
fn inline_sources_parse() {
    let yaml = Recording::from_yaml_str("suites: []").unwrap();
    assert!(yaml.suites.is_empty());
    let json = Recording::from_json_str(r#"{"suites": [{"description": "Empty"}]}"#).unwrap();
    assert_eq!(json.suites[0].description, "Empty");
}

#[test]
fn unknown_node_kind_is_a_parse_error() {
    let err = Recording::load(&fixture("broken.yaml")).unwrap_err();
    assert!(matches!(err, ReplayError::Yaml { .. }));
    assert_eq!(err.error_type(), ErrorType::Parse);
}

#[test]
fn unknown_extension_is_rejected_before_reading() {
    let err = Recording::load(Path::new("does/not/exist.txt")).unwrap_err();
    assert!(matches!(err, ReplayError::UnsupportedFormat { .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Recording::load(&fixture("missing.yaml")).unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Io);
    assert!(err.to_string().contains("missing.yaml"));
}
