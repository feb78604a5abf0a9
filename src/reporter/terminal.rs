use log::{debug, trace};

use crate::clock::Clock;
use crate::config::{CompletionCallback, ReporterConfig, StackFilter};
use crate::output::OutputSink;
use crate::palette::{ColorRole, Palette};
use crate::reporter::{failure_records, format_seconds, tally_line, FailureRecord, Phase, Reporter};
use crate::runner::{Runner, Spec};
use crate::summary::{summarize_forest, SummaryNode};

/// Compact reporter: `.` / `F` / `-` per spec, then failures and a tally.
pub struct TerminalReporter {
    sink: Box<dyn OutputSink>,
    palette: Palette,
    on_complete: Option<CompletionCallback>,
    include_stack_trace: bool,
    stack_filter: StackFilter,
    clock: Box<dyn Clock>,

    phase: Phase,
    started_at: u64,
    suites: Vec<SummaryNode>,
    failures: Vec<FailureRecord>,
}

impl TerminalReporter {
    pub fn new(config: ReporterConfig) -> Self {
        Self {
            sink: config.sink,
            palette: Palette::from_color_flag(config.color),
            on_complete: config.on_complete,
            include_stack_trace: config.include_stack_trace,
            stack_filter: config.stack_filter,
            clock: config.clock,
            phase: Phase::NotStarted,
            started_at: 0,
            suites: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// The hierarchy snapshot taken at run start.
    pub fn summary(&self) -> &[SummaryNode] {
        &self.suites
    }

    pub fn failures(&self) -> &[FailureRecord] {
        &self.failures
    }

    pub(crate) fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub(crate) fn record_failures(&mut self, runner: &Runner, spec: &Spec) {
        self.failures.extend(failure_records(runner, spec));
    }

    pub(crate) fn print(&mut self, text: &str) {
        self.sink.print(text);
    }

    pub(crate) fn print_line(&mut self, text: &str) {
        self.sink.print(text);
        self.sink.print("\n");
    }

    fn paint(&self, text: &str, role: ColorRole) -> String {
        self.palette.paint(text, role)
    }

    fn report_failures(&mut self) {
        if self.failures.is_empty() {
            return;
        }

        self.print_line("\n");
        self.print("Failures:");

        let failures = std::mem::take(&mut self.failures);
        for (index, failure) in failures.iter().enumerate() {
            self.print_line("\n");
            self.print_line(&format!("  {}) {}", index + 1, failure.spec_full_name));
            self.print_line("   Message:");
            let message = self.paint(&failure.message, ColorRole::Fail);
            self.print_line(&format!("     {}", message));
            if self.include_stack_trace {
                self.print_line("   Stacktrace:");
                let stack = (self.stack_filter)(&failure.stack_trace);
                self.print(&format!("     {}", stack));
            }
        }
        self.failures = failures;
    }
}

impl Reporter for TerminalReporter {
    fn run_starting(&mut self, runner: &Runner) {
        if self.phase != Phase::NotStarted {
            debug!("ignoring run start: reporter already {:?}", self.phase);
            return;
        }
        self.phase = Phase::Started;
        self.started_at = self.clock.now_ms();
        self.suites = summarize_forest(runner);
        debug!("run starting with {} top-level suites", self.suites.len());
    }

    fn spec_results(&mut self, runner: &Runner, spec: &Spec) {
        if self.phase == Phase::Finished {
            debug!("ignoring results for {} after run finished", spec.id);
            return;
        }
        let results = &spec.results;
        let token = if results.skipped {
            self.paint("-", ColorRole::Ignore)
        } else if results.passed() {
            self.paint(".", ColorRole::Pass)
        } else {
            self.record_failures(runner, spec);
            self.paint("F", ColorRole::Fail)
        };
        trace!("{} reported: {:?}", spec.id, crate::palette::strip_ansi(&token));
        self.print(&token);
    }

    fn runner_results(&mut self, runner: &Runner) {
        if self.phase == Phase::Finished {
            debug!("ignoring duplicate run completion");
            return;
        }
        self.report_failures();

        let results = runner.results();
        let role = if results.failed_count > 0 {
            ColorRole::Fail
        } else {
            ColorRole::Pass
        };

        let elapsed = self.clock.now_ms().saturating_sub(self.started_at);
        self.print_line(&format!("\n\nFinished in {} seconds", format_seconds(elapsed)));
        let tally = self.paint(&tally_line(runner), role);
        self.print_line(&tally);

        self.phase = Phase::Finished;
        debug!(
            "run finished: {} failing assertions across {} specs",
            results.failed_count,
            runner.specs().len()
        );
        if let Some(callback) = self.on_complete.as_mut() {
            callback(runner);
        }
    }
}
