//! The runner-side view of a spec run.
//!
//! A spec runner hands these payloads to a [`Reporter`](crate::reporter::Reporter)
//! as it walks its hierarchy. Suites and specs live in an arena owned by
//! [`Runner`] and refer to each other through [`SuiteId`] / [`SpecId`], so the
//! `parentSuite` back-reference is just an id lookup.

use serde::{Deserialize, Serialize};

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// Dense index of a suite inside its [`Runner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SuiteId(pub usize);

/// Dense index of a spec inside its [`Runner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpecId(pub usize);

impl std::fmt::Display for SuiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "suite#{}", self.0)
    }
}

impl std::fmt::Display for SpecId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "spec#{}", self.0)
    }
}

// ============================================================================
// PAYLOADS
// ============================================================================

/// One entry in a suite's ordered child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child {
    Suite(SuiteId),
    Spec(SpecId),
}

/// A named grouping of specs and nested suites.
#[derive(Debug, Clone)]
pub struct Suite {
    pub id: SuiteId,
    pub description: String,
    /// `None` for top-level suites.
    pub parent: Option<SuiteId>,
    pub children: Vec<Child>,
}

/// A single test case.
#[derive(Debug, Clone)]
pub struct Spec {
    pub id: SpecId,
    pub description: String,
    pub suite: SuiteId,
    pub results: SpecResults,
}

/// The outcome of one expectation evaluated within a spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionResult {
    pub passed: bool,
    #[serde(default)]
    pub message: String,
    /// Stack trace captured for a failing expectation.
    #[serde(default)]
    pub stack: Option<String>,
}

impl AssertionResult {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
            stack: None,
        }
    }

    pub fn fail(message: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
            stack: Some(stack.into()),
        }
    }
}

/// Results accessor for a spec: the skip flag, the runner's pass/fail status,
/// and every assertion item in the order the expectations ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecResults {
    #[serde(default)]
    pub skipped: bool,
    /// Status reported by the runner. `None` derives it from `items`.
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default)]
    pub items: Vec<AssertionResult>,
}

impl SpecResults {
    pub fn new(items: Vec<AssertionResult>) -> Self {
        Self {
            skipped: false,
            status: None,
            items,
        }
    }

    pub fn skipped() -> Self {
        Self {
            skipped: true,
            status: None,
            items: Vec::new(),
        }
    }

    /// Pins the pass/fail status regardless of what the items say.
    pub fn with_status(self, passed: bool) -> Self {
        Self {
            status: Some(passed),
            ..self
        }
    }

    pub fn failed_count(&self) -> usize {
        self.items.iter().filter(|item| !item.passed).count()
    }

    /// The runner's status when it gave one, else true when no assertion
    /// failed. Does not look at the skip flag.
    pub fn passed(&self) -> bool {
        self.status.unwrap_or_else(|| self.failed_count() == 0)
    }

    pub fn failures(&self) -> impl Iterator<Item = &AssertionResult> {
        self.items.iter().filter(|item| !item.passed)
    }
}

/// Aggregate counts across every spec in a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunResults {
    /// Number of assertion items evaluated.
    pub total_count: usize,
    /// Number of failing assertion items.
    pub failed_count: usize,
}

// ============================================================================
// RUNNER
// ============================================================================

/// The suite/spec hierarchy of one run, plus the results recorded so far.
#[derive(Debug, Clone, Default)]
pub struct Runner {
    suites: Vec<Suite>,
    specs: Vec<Spec>,
    top_level: Vec<SuiteId>,
}

impl Runner {
    pub fn builder() -> RunnerBuilder {
        RunnerBuilder::default()
    }

    pub fn top_level_suites(&self) -> impl Iterator<Item = &Suite> {
        self.top_level.iter().filter_map(move |id| self.suite(*id))
    }

    pub fn suite(&self, id: SuiteId) -> Option<&Suite> {
        self.suites.get(id.0)
    }

    pub fn spec(&self, id: SpecId) -> Option<&Spec> {
        self.specs.get(id.0)
    }

    /// Every spec in the run, in declaration order.
    pub fn specs(&self) -> &[Spec] {
        &self.specs
    }

    pub fn results(&self) -> RunResults {
        self.specs.iter().fold(RunResults::default(), |acc, spec| RunResults {
            total_count: acc.total_count + spec.results.items.len(),
            failed_count: acc.failed_count + spec.results.failed_count(),
        })
    }

    /// Walks `parent` links from `id` (inclusive) up to its top-level suite.
    pub fn ancestors(&self, id: SuiteId) -> Ancestors<'_> {
        Ancestors {
            runner: self,
            next: Some(id),
        }
    }

    /// Number of ancestor suites above `id`.
    pub fn nesting_level(&self, id: SuiteId) -> usize {
        self.ancestors(id).count().saturating_sub(1)
    }

    /// Suite descriptions joined root-first with single spaces.
    pub fn suite_full_name(&self, id: SuiteId) -> String {
        let mut names: Vec<&str> = self
            .ancestors(id)
            .map(|suite| suite.description.as_str())
            .collect();
        names.reverse();
        names.join(" ")
    }

    pub fn spec_full_name(&self, spec: &Spec) -> String {
        format!("{} {}", self.suite_full_name(spec.suite), spec.description)
    }
}

/// Iterator returned by [`Runner::ancestors`].
pub struct Ancestors<'a> {
    runner: &'a Runner,
    next: Option<SuiteId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Suite;

    fn next(&mut self) -> Option<Self::Item> {
        let suite = self.runner.suite(self.next?)?;
        self.next = suite.parent;
        Some(suite)
    }
}

/// Incrementally assembles a [`Runner`]. Ids are handed out in call order.
#[derive(Debug, Default)]
pub struct RunnerBuilder {
    runner: Runner,
}

impl RunnerBuilder {
    /// Declares a suite under `parent`, or at top level when `parent` is `None`.
    pub fn add_suite(&mut self, parent: Option<SuiteId>, description: impl Into<String>) -> SuiteId {
        let id = SuiteId(self.runner.suites.len());
        self.runner.suites.push(Suite {
            id,
            description: description.into(),
            parent,
            children: Vec::new(),
        });
        match parent.and_then(|p| self.runner.suites.get_mut(p.0)) {
            Some(parent) => parent.children.push(Child::Suite(id)),
            None => self.runner.top_level.push(id),
        }
        id
    }

    pub fn add_spec(
        &mut self,
        suite: SuiteId,
        description: impl Into<String>,
        results: SpecResults,
    ) -> SpecId {
        let id = SpecId(self.runner.specs.len());
        self.runner.specs.push(Spec {
            id,
            description: description.into(),
            suite,
            results,
        });
        if let Some(owner) = self.runner.suites.get_mut(suite.0) {
            owner.children.push(Child::Spec(id));
        }
        id
    }

    pub fn build(self) -> Runner {
        self.runner
    }
}
