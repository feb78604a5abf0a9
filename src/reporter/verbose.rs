use std::collections::HashMap;

use log::{debug, trace};

use crate::config::ReporterConfig;
use crate::palette::ColorRole;
use crate::reporter::{Phase, Reporter, TerminalReporter};
use crate::runner::{AssertionResult, Runner, Spec, SpecId, Suite, SuiteId};
use crate::summary::{NodeId, SummaryNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
}

/// Stored when a spec reports; never touched again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecResult {
    pub messages: Vec<AssertionResult>,
    pub outcome: Outcome,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteResult {
    pub elapsed_ms: u64,
}

/// Timed tree reporter.
///
/// Wraps a [`TerminalReporter`] and reuses it for the failure digest and the
/// tally. Nothing is written until the run completes.
pub struct VerboseReporter {
    base: TerminalReporter,
    spec_starts: HashMap<SpecId, u64>,
    suite_starts: HashMap<SuiteId, u64>,
    spec_results: HashMap<SpecId, SpecResult>,
    suite_results: HashMap<SuiteId, SuiteResult>,
}

impl VerboseReporter {
    pub fn new(config: ReporterConfig) -> Self {
        Self {
            base: TerminalReporter::new(config),
            spec_starts: HashMap::new(),
            suite_starts: HashMap::new(),
            spec_results: HashMap::new(),
            suite_results: HashMap::new(),
        }
    }

    pub fn base(&self) -> &TerminalReporter {
        &self.base
    }

    pub fn spec_result(&self, id: SpecId) -> Option<&SpecResult> {
        self.spec_results.get(&id)
    }

    /// `None` when the suite never reported, or reported with no started spec.
    pub fn suite_result(&self, id: SuiteId) -> Option<&SuiteResult> {
        self.suite_results.get(&id)
    }

    /// Renders the result tree into display lines, no newlines attached.
    pub fn tree_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.render_nodes(&mut lines, self.base.summary(), 0);
        lines
    }

    fn render_nodes(&self, lines: &mut Vec<String>, nodes: &[SummaryNode], depth: usize) {
        let palette = self.base.palette();
        for node in nodes {
            let name = indent(&node.name, depth);
            match node.id {
                NodeId::Spec(id) => {
                    let line = match self.spec_results.get(&id) {
                        Some(result) => {
                            let role = match result.outcome {
                                Outcome::Passed => ColorRole::Pass,
                                Outcome::Failed => ColorRole::Fail,
                            };
                            let timing = format!(" - {} ms", result.elapsed_ms);
                            format!(
                                "{}{}",
                                palette.paint(&name, role),
                                palette.paint(&timing, ColorRole::SpecTiming)
                            )
                        }
                        None => name,
                    };
                    lines.push(line);
                }
                NodeId::Suite(id) => {
                    lines.push(String::new());
                    let line = match self.suite_results.get(&id) {
                        Some(result) => {
                            let timing = format!(" - {} ms", result.elapsed_ms);
                            name + &palette.paint(&timing, ColorRole::SuiteTiming)
                        }
                        None => name,
                    };
                    lines.push(line);
                }
            }
            self.render_nodes(lines, &node.children, depth + 2);
        }
    }
}

fn indent(text: &str, depth: usize) -> String {
    format!("{}{}", "  ".repeat(depth), text)
}

impl Reporter for VerboseReporter {
    fn run_starting(&mut self, runner: &Runner) {
        self.base.run_starting(runner);
    }

    /// Stamps the spec and every ancestor suite that has no start yet, so a
    /// suite's start is the start of its first spec.
    fn spec_starting(&mut self, runner: &Runner, spec: &Spec) {
        if self.base.phase() == Phase::Finished {
            debug!("ignoring start of {} after run finished", spec.id);
            return;
        }
        let now = self.base.now_ms();
        self.spec_starts.insert(spec.id, now);
        for suite in runner.ancestors(spec.suite) {
            self.suite_starts.entry(suite.id).or_insert(now);
        }
    }

    fn spec_results(&mut self, runner: &Runner, spec: &Spec) {
        if self.base.phase() == Phase::Finished {
            debug!("ignoring results for {} after run finished", spec.id);
            return;
        }
        let now = self.base.now_ms();
        let started = self.spec_starts.get(&spec.id).copied().unwrap_or(now);
        let elapsed_ms = now.saturating_sub(started);

        let failed = !spec.results.passed();
        if failed {
            self.base.record_failures(runner, spec);
        }

        trace!("{} finished in {} ms", spec.id, elapsed_ms);
        self.spec_results.insert(
            spec.id,
            SpecResult {
                messages: spec.results.items.clone(),
                outcome: if failed { Outcome::Failed } else { Outcome::Passed },
                elapsed_ms,
            },
        );
    }

    fn suite_results(&mut self, _runner: &Runner, suite: &Suite) {
        if self.base.phase() == Phase::Finished {
            debug!("ignoring results for {} after run finished", suite.id);
            return;
        }
        let Some(started) = self.suite_starts.get(&suite.id).copied() else {
            trace!("{} finished without a started spec", suite.id);
            return;
        };
        let elapsed_ms = self.base.now_ms().saturating_sub(started);
        trace!("{} finished in {} ms", suite.id, elapsed_ms);
        self.suite_results.insert(suite.id, SuiteResult { elapsed_ms });
    }

    fn runner_results(&mut self, runner: &Runner) {
        if self.base.phase() == Phase::Finished {
            debug!("ignoring duplicate run completion");
            return;
        }
        let lines = self.tree_lines();
        if let Some((last, rest)) = lines.split_last() {
            for line in rest {
                self.base.print_line(line);
            }
            self.base.print(last);
        }
        self.base.runner_results(runner);
    }
}
