//! Lifecycle-driven console reporters.
//!
//! A spec runner drives a [`Reporter`] through one run:
//! `run_starting`, then any mix of `spec_starting` / `spec_results` /
//! `suite_results` in runner order, then `runner_results`. Reporters only
//! format what they are handed; they never decide pass/fail.
//!
//! - [`TerminalReporter`] prints one character per spec as results arrive,
//!   then a failure digest and a tally line.
//! - [`VerboseReporter`] wraps a `TerminalReporter`, times specs and suites,
//!   and prints the whole result tree before delegating the digest and tally.

use crate::runner::{Runner, Spec, Suite};

pub mod terminal;
pub mod verbose;

pub use terminal::TerminalReporter;
pub use verbose::VerboseReporter;

pub trait Reporter {
    fn run_starting(&mut self, runner: &Runner);

    fn spec_starting(&mut self, _runner: &Runner, _spec: &Spec) {}

    fn spec_results(&mut self, runner: &Runner, spec: &Spec);

    fn suite_results(&mut self, _runner: &Runner, _suite: &Suite) {}

    fn runner_results(&mut self, runner: &Runner);
}

/// One failing assertion, captured when its spec reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub spec_full_name: String,
    pub message: String,
    pub stack_trace: String,
}

/// Where a reporter is in its single pass over a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    NotStarted,
    Started,
    Finished,
}

/// Builds one record per failing assertion of `spec`, in assertion order.
pub fn failure_records(runner: &Runner, spec: &Spec) -> Vec<FailureRecord> {
    let full_name = runner.spec_full_name(spec);
    spec.results
        .failures()
        .map(|item| FailureRecord {
            spec_full_name: full_name.clone(),
            message: item.message.clone(),
            stack_trace: item.stack.clone().unwrap_or_default(),
        })
        .collect()
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// The one-line run summary, trailing newline included.
///
/// `tests` is the spec count minus skipped specs, so a spec that somehow
/// neither passed, failed, nor skipped still counts here.
pub fn tally_line(runner: &Runner) -> String {
    let results = runner.results();
    let specs = runner.specs();
    let skipped = specs.iter().filter(|spec| spec.results.skipped).count();
    let tests = specs.len() - skipped;
    format!(
        "{}, {}, {}, {} skipped\n",
        plural(tests, "test"),
        plural(results.total_count, "assertion"),
        plural(results.failed_count, "failure"),
        skipped
    )
}

/// Elapsed milliseconds as seconds in shortest decimal form (`1.5`, `2`, `0.012`).
pub fn format_seconds(elapsed_ms: u64) -> String {
    (elapsed_ms as f64 / 1000.0).to_string()
}
