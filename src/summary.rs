//! Snapshot of the runner's hierarchy taken once at run start.

use crate::runner::{Child, Runner, Spec, SpecId, Suite, SuiteId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Suite,
    Spec,
}

/// Id of the suite or spec a [`SummaryNode`] was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeId {
    Suite(SuiteId),
    Spec(SpecId),
}

/// Lightweight, immutable copy of one suite or spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryNode {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    /// Ancestor count for suites; always 0 for specs.
    pub depth: usize,
    pub children: Vec<SummaryNode>,
}

impl SummaryNode {
    pub fn is_suite(&self) -> bool {
        self.kind == NodeKind::Suite
    }
}

/// Builds one node per top-level suite, preserving declaration order.
pub fn summarize_forest(runner: &Runner) -> Vec<SummaryNode> {
    runner
        .top_level_suites()
        .map(|suite| summarize_suite(runner, suite))
        .collect()
}

fn summarize_suite(runner: &Runner, suite: &Suite) -> SummaryNode {
    let children = suite
        .children
        .iter()
        .filter_map(|child| match *child {
            Child::Suite(id) => runner.suite(id).map(|s| summarize_suite(runner, s)),
            Child::Spec(id) => runner.spec(id).map(summarize_spec),
        })
        .collect();

    SummaryNode {
        id: NodeId::Suite(suite.id),
        name: suite.description.clone(),
        kind: NodeKind::Suite,
        depth: runner.nesting_level(suite.id),
        children,
    }
}

fn summarize_spec(spec: &Spec) -> SummaryNode {
    SummaryNode {
        id: NodeId::Spec(spec.id),
        name: spec.description.clone(),
        kind: NodeKind::Spec,
        depth: 0,
        children: Vec::new(),
    }
}
